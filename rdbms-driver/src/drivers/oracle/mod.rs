//! Oracle 12c and later.

mod catalog;
mod generator;

use std::sync::Arc;

pub use catalog::OracleCatalog;
pub use generator::{OracleSqlGenerator, GENERATOR};

use crate::connection::ConnectableResource;
use crate::registry::DriverSessionFactory;
use crate::session::{DriverSession, RdbmsDriverSession};
use crate::Dialect;

#[derive(Debug, Default, Copy, Clone)]
pub struct OracleDriverSessionFactory;

impl DriverSessionFactory for OracleDriverSessionFactory {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn create(&self, resource: Box<dyn ConnectableResource>) -> Arc<dyn DriverSession> {
        Arc::new(RdbmsDriverSession::new(OracleCatalog, resource))
    }
}
