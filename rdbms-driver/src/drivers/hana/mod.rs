//! SAP HANA.

mod catalog;
mod generator;

use std::sync::Arc;

pub use catalog::HanaCatalog;
pub use generator::{HanaSqlGenerator, GENERATOR};

use crate::connection::ConnectableResource;
use crate::registry::DriverSessionFactory;
use crate::session::{DriverSession, RdbmsDriverSession};
use crate::Dialect;

#[derive(Debug, Default, Copy, Clone)]
pub struct HanaDriverSessionFactory;

impl DriverSessionFactory for HanaDriverSessionFactory {
    fn dialect(&self) -> Dialect {
        Dialect::Hana
    }

    fn create(&self, resource: Box<dyn ConnectableResource>) -> Arc<dyn DriverSession> {
        Arc::new(RdbmsDriverSession::new(HanaCatalog, resource))
    }
}
