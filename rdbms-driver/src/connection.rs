//! The contract between the driver sessions and the transport that actually talks to a
//! database. Pooling, wire protocols and timeouts all live behind these traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// An opaque handle that metadata queries and statements run through.
///
/// A resource is acquired once when its session is built, used for every call on that
/// session and closed when the session is evicted.
#[async_trait]
pub trait ConnectableResource: Send + Sync {
    /// Checks out a connection. Statements that depend on each other must run on the
    /// same connection.
    async fn acquire(&self) -> Result<Box<dyn Connection>>;

    /// Liveness probe.
    async fn is_valid(&self) -> bool;

    /// Releases everything the resource holds. Further calls to `acquire` fail.
    async fn close(&self);
}

/// A single checked-out connection.
#[async_trait]
pub trait Connection: Send {
    /// Runs a statement that returns rows. Parameters use the dialect's native placeholder.
    async fn query(&mut self, sql: &str, params: &[SqlValue]) -> Result<QueryResult>;

    /// Runs a statement and returns the number of affected rows.
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64>;

    /// Describes the shape of the result set a query would produce, without fetching rows.
    async fn describe(&mut self, sql: &str) -> Result<Vec<ResultColumn>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum SqlValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "int",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Row {
    pub values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// One column of a described result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultColumn {
    pub name: String,
    pub type_name: Option<String>,
    /// `java.sql.Types` code when the transport reports one.
    pub type_code: Option<i32>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub nullable: bool,
}
