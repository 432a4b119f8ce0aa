#[cfg(test)]
mod test_helpers;

pub mod connection;
mod connection_wrapper;
mod ddl_query_builder;
mod dialect;
pub mod drivers;
mod error;
pub mod generator;
mod helpers;
pub mod models;
pub mod quoting;
pub mod registry;
pub mod session;
pub mod sql_splitter;

pub use connection::{ConnectableResource, Connection, QueryResult, ResultColumn, Row, SqlValue};
pub use connection_wrapper::{ConnectionWrapper, FromRow, FromSqlValue};
pub use dialect::*;
pub use error::*;
pub use generator::{generator_for, SqlGenerator};
pub use models::*;
pub use registry::{
    ConnectionParameters, DatasourceConfig, DatasourceResolver, DriverSessionFactory, InMemoryDatasourceResolver,
    ResourceProvider, SessionFactoryRegistry, SessionRegistry,
};
pub use session::{DriverSession, SqlResponse, StatementOutcome};
