//! MySQL 5.7 and 8.

mod catalog;
mod generator;

use std::sync::Arc;

pub use catalog::MysqlCatalog;
pub use generator::{MysqlSqlGenerator, GENERATOR};

use crate::connection::ConnectableResource;
use crate::registry::DriverSessionFactory;
use crate::session::{DriverSession, RdbmsDriverSession};
use crate::Dialect;

#[derive(Debug, Default, Copy, Clone)]
pub struct MysqlDriverSessionFactory;

impl DriverSessionFactory for MysqlDriverSessionFactory {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn create(&self, resource: Box<dyn ConnectableResource>) -> Arc<dyn DriverSession> {
        Arc::new(RdbmsDriverSession::new(MysqlCatalog, resource))
    }
}
