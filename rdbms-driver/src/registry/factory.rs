use std::collections::HashMap;
use std::sync::Arc;

use crate::connection::ConnectableResource;
use crate::drivers::{hana, mysql, oracle};
use crate::session::DriverSession;
use crate::{Dialect, DriverError, Result};

/// Builds driver sessions of one dialect.
pub trait DriverSessionFactory: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Wraps a resource in a session. The session takes ownership of the resource.
    fn create(&self, resource: Box<dyn ConnectableResource>) -> Arc<dyn DriverSession>;
}

/// Dialect to factory mapping. Filled once at startup and only read afterwards.
#[derive(Default, Clone)]
pub struct SessionFactoryRegistry {
    factories: HashMap<Dialect, Arc<dyn DriverSessionFactory>>,
}

impl SessionFactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every dialect this crate ships.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(mysql::MysqlDriverSessionFactory);
        registry.register(oracle::OracleDriverSessionFactory);
        registry.register(hana::HanaDriverSessionFactory);

        registry
    }

    /// Registers a factory under its dialect, replacing any earlier one.
    pub fn register(&mut self, factory: impl DriverSessionFactory + 'static) {
        self.factories.insert(factory.dialect(), Arc::new(factory));
    }

    pub fn get(&self, dialect: Dialect) -> Result<Arc<dyn DriverSessionFactory>> {
        self.factories
            .get(&dialect)
            .cloned()
            .ok_or_else(|| DriverError::UnknownDialect(dialect.to_string()))
    }
}
