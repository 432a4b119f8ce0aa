//! Resolution of a tenant's datasource to a live, cached driver session.

mod cache;
mod config;
mod factory;

pub use cache::SessionRegistry;
pub use config::{ConnectionParameters, DatasourceConfig, DatasourceResolver, InMemoryDatasourceResolver, ResourceProvider};
pub use factory::{DriverSessionFactory, SessionFactoryRegistry};
