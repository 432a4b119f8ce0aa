use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::registry::{DatasourceResolver, ResourceProvider, SessionFactoryRegistry};
use crate::session::DriverSession;
use crate::{Dialect, Result};

type SessionKey = (i64, String);
type SessionSlot = Arc<OnceCell<Arc<dyn DriverSession>>>;

/// Hands out one shared driver session per tenant and datasource.
///
/// Concurrent first requests for the same key wait on a single construction. A
/// construction that fails leaves nothing behind, so the next request tries again. A
/// session evicted while it is still being built is closed and its waiters build anew.
pub struct SessionRegistry {
    factories: SessionFactoryRegistry,
    resolver: Arc<dyn DatasourceResolver>,
    provider: Arc<dyn ResourceProvider>,
    sessions: Mutex<HashMap<SessionKey, SessionSlot>>,
}

impl SessionRegistry {
    pub fn new(
        factories: SessionFactoryRegistry,
        resolver: Arc<dyn DatasourceResolver>,
        provider: Arc<dyn ResourceProvider>,
    ) -> Self {
        SessionRegistry {
            factories,
            resolver,
            provider,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionKey, SessionSlot>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, key: &SessionKey, slot: &SessionSlot) -> bool {
        self.sessions().get(key).is_some_and(|s| Arc::ptr_eq(s, slot))
    }

    /// Drops a slot whose construction failed, unless someone already replaced or filled it.
    fn forget_failed(&self, key: &SessionKey, slot: &SessionSlot) {
        let mut sessions = self.sessions();
        if sessions
            .get(key)
            .is_some_and(|s| Arc::ptr_eq(s, slot) && !s.initialized())
        {
            sessions.remove(key);
        }
    }

    #[instrument(skip(self))]
    pub async fn get_driver_session(&self, tenant_id: i64, datasource_code: &str) -> Result<Arc<dyn DriverSession>> {
        let key = (tenant_id, datasource_code.to_string());

        loop {
            let slot = self.sessions().entry(key.clone()).or_default().clone();

            let session = match slot
                .get_or_try_init(|| self.create_session(tenant_id, datasource_code))
                .await
            {
                Ok(session) => session.clone(),
                Err(e) => {
                    self.forget_failed(&key, &slot);
                    return Err(e);
                }
            };

            if self.is_current(&key, &slot) {
                return Ok(session);
            }

            // Evicted while it was being built. Nobody else can reach it to close it.
            session.close().await;
            info!(tenant_id, datasource_code, "discarded driver session evicted during construction");
        }
    }

    async fn create_session(&self, tenant_id: i64, datasource_code: &str) -> Result<Arc<dyn DriverSession>> {
        let config = self.resolver.resolve(tenant_id, datasource_code).await?;
        let dialect: Dialect = config.dialect.parse()?;
        let factory = self.factories.get(dialect)?;

        let resource = self.provider.connect(&config.connection).await?;
        let session = factory.create(resource);

        info!(tenant_id, datasource_code, %dialect, "created driver session");

        Ok(session)
    }

    /// Drops the cached session and closes its resource. Returns whether there was one.
    #[instrument(skip(self))]
    pub async fn evict(&self, tenant_id: i64, datasource_code: &str) -> bool {
        let slot = self.sessions().remove(&(tenant_id, datasource_code.to_string()));

        match slot.as_ref().and_then(|s| s.get()) {
            Some(session) => {
                session.close().await;
                info!(tenant_id, datasource_code, "evicted driver session");
                true
            }
            None => false,
        }
    }

    /// Evicts the cached session if its resource no longer answers.
    pub async fn evict_if_invalid(&self, tenant_id: i64, datasource_code: &str) -> bool {
        let session = self
            .sessions()
            .get(&(tenant_id, datasource_code.to_string()))
            .and_then(|s| s.get().cloned());

        match session {
            Some(session) if !session.is_valid().await => self.evict(tenant_id, datasource_code).await,
            _ => false,
        }
    }

    /// The number of sessions that have been built and not evicted.
    pub fn cached_count(&self) -> usize {
        self.sessions().values().filter(|s| s.initialized()).count()
    }

    #[cfg(test)]
    pub(super) fn slot_count(&self) -> usize {
        self.sessions().len()
    }
}
