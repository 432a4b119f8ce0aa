use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::connection::ConnectableResource;
use crate::{DriverError, Result};

/// Everything needed to reach one datasource of one tenant.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DatasourceConfig {
    pub tenant_id: i64,
    pub datasource_code: String,
    /// A dialect name, parsed when the session is built.
    pub dialect: String,
    pub connection: ConnectionParameters,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConnectionParameters {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_schema: Option<String>,
    /// Driver specific settings, passed through untouched.
    pub properties: BTreeMap<String, String>,
}

/// Looks up the configuration of a datasource.
#[async_trait]
pub trait DatasourceResolver: Send + Sync {
    /// Fails with [`DriverError::DatasourceNotFound`] for unknown datasources.
    async fn resolve(&self, tenant_id: i64, datasource_code: &str) -> Result<DatasourceConfig>;
}

/// Builds the resource a session talks through.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn connect(&self, parameters: &ConnectionParameters) -> Result<Box<dyn ConnectableResource>>;
}

/// A resolver over a fixed set of datasources, typically loaded from a JSON document.
#[derive(Debug, Default)]
pub struct InMemoryDatasourceResolver {
    datasources: HashMap<(i64, String), DatasourceConfig>,
}

impl InMemoryDatasourceResolver {
    pub fn new(datasources: impl IntoIterator<Item = DatasourceConfig>) -> Self {
        InMemoryDatasourceResolver {
            datasources: datasources
                .into_iter()
                .map(|d| ((d.tenant_id, d.datasource_code.clone()), d))
                .collect(),
        }
    }

    /// Reads a JSON array of datasource configurations.
    pub fn from_json(json: &str) -> Result<Self> {
        let datasources: Vec<DatasourceConfig> = serde_json::from_str(json)
            .map_err(|e| DriverError::InvalidArgument(format!("invalid datasource configuration: {}", e)))?;

        Ok(Self::new(datasources))
    }
}

#[async_trait]
impl DatasourceResolver for InMemoryDatasourceResolver {
    async fn resolve(&self, tenant_id: i64, datasource_code: &str) -> Result<DatasourceConfig> {
        self.datasources
            .get(&(tenant_id, datasource_code.to_string()))
            .cloned()
            .ok_or_else(|| DriverError::DatasourceNotFound {
                tenant_id,
                datasource_code: datasource_code.to_string(),
            })
    }
}
