//! The capability surface callers use to inspect and change a database, independent of
//! its dialect.

mod rdbms;
mod rows;

pub use rdbms::RdbmsDriverSession;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::connection::{QueryResult, SqlValue};
use crate::generator::{generator_for, SqlGenerator};
use crate::models::{
    Catalog, Column, ForeignKey, IndexKey, PageRequest, PrimaryKey, Schema, ShowType, Table, TablePartition,
};
use crate::{Dialect, Result};

/// Introspection, execution and DDL rendering against one datasource.
///
/// `schema` arguments are optional: without one the connection's current schema is used.
/// None of the metadata operations change the database.
#[async_trait]
pub trait DriverSession: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn generator(&self) -> &'static dyn SqlGenerator;

    async fn schema_list(&self) -> Result<Vec<String>>;

    /// Table names, optionally filtered with a LIKE pattern.
    async fn table_list(&self, schema: Option<&str>, pattern: Option<&str>) -> Result<Vec<String>>;

    /// View names, optionally filtered with a LIKE pattern.
    async fn view_list(&self, schema: Option<&str>, pattern: Option<&str>) -> Result<Vec<String>>;

    /// Tables with their remarks, without columns or keys.
    async fn tables_name_and_desc(&self, schema: Option<&str>) -> Result<Vec<Table>>;

    async fn table_exists(&self, schema: Option<&str>, table: &str) -> Result<bool>;

    async fn table_pk(&self, schema: Option<&str>, table: &str) -> Result<Vec<PrimaryKey>>;

    async fn table_fk(&self, schema: Option<&str>, table: &str) -> Result<Vec<ForeignKey>>;

    async fn table_index(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexKey>>;

    /// The full table: columns, primary key, foreign keys and indexes.
    async fn table_meta_data(&self, schema: Option<&str>, table: &str) -> Result<Table>;

    /// The table level facts only: type and remarks.
    async fn table_meta_extra(&self, schema: Option<&str>, table: &str) -> Result<Table>;

    async fn tables_meta_data(&self, schema: Option<&str>, tables: &[String]) -> Result<Vec<Table>>;

    async fn column_meta_data(&self, schema: Option<&str>, table: &str) -> Result<Vec<Column>>;

    /// The partitions of a table in partition order. Empty when the table is not partitioned.
    async fn partition_list(&self, schema: Option<&str>, table: &str) -> Result<Vec<TablePartition>>;

    /// One page of the table's rows.
    async fn table_query(&self, schema: Option<&str>, table: &str, page: PageRequest) -> Result<QueryResult>;

    /// The columns an arbitrary query would return, without running it.
    async fn column_meta_data_by_sql(&self, schema: Option<&str>, sql: &str) -> Result<Vec<Column>>;

    async fn schema_meta_extra(&self, schema: Option<&str>) -> Result<Schema>;

    async fn catalog_meta_extra(&self) -> Result<Catalog>;

    /// Empty for dialects without schemas.
    async fn current_schema(&self) -> Result<String>;

    async fn current_catalog(&self) -> Result<String>;

    async fn show_create_sql(&self, schema: Option<&str>, name: &str, show_type: ShowType) -> Result<String>;

    async fn query_count(&self, schema: Option<&str>, sql: &str) -> Result<i64>;

    /// Runs every statement of `text` in order on one connection. A failing statement is
    /// recorded in its own slot and does not stop the ones after it.
    async fn execute_all(&self, schema: Option<&str>, text: &str, with_count: bool) -> Result<Vec<SqlResponse>>;

    /// Like [`DriverSession::execute_all`], but queries only fetch one page.
    async fn execute_all_paged(
        &self,
        schema: Option<&str>,
        text: &str,
        page: PageRequest,
        with_count: bool,
    ) -> Result<Vec<SqlResponse>>;

    /// Runs exactly one statement and returns the affected row count.
    async fn execute_one_update(&self, schema: Option<&str>, sql: &str) -> Result<u64>;

    /// Writes the remark of every column that has one. Returns the number of statements run.
    async fn update_comment(&self, columns: &[Column]) -> Result<usize>;

    async fn schema_create(&self, schema: &str) -> Result<()>;

    async fn is_valid(&self) -> bool;

    /// Releases the underlying resource.
    async fn close(&self);
}

/// The outcome of one statement of an [`DriverSession::execute_all`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlResponse {
    pub sql: String,
    pub outcome: StatementOutcome,
}

impl SqlResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, StatementOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatementOutcome {
    Query {
        columns: Vec<String>,
        rows: Vec<Vec<SqlValue>>,
        /// Only present when a count was asked for.
        total: Option<i64>,
    },
    Update {
        affected_rows: u64,
    },
    Failed {
        message: String,
    },
}

/// Where a dialect gets the text for `show_create_sql` from.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowCreateSource {
    /// The database renders the DDL. The text is in `column` of the single returned row.
    Query {
        sql: String,
        params: Vec<SqlValue>,
        column: usize,
    },
    /// The catalog stores only the view's query, bound with schema and view name.
    ViewDefinition { sql: &'static str },
    /// Rebuilt from the table's metadata with the dialect's generator.
    Generated,
}

/// The catalog queries of one dialect.
///
/// Queries taking a schema and a table bind them in that order. The schema is bound as
/// NULL when absent and each query falls back to the current schema itself. Result
/// columns follow the fixed orders read in `rows.rs`.
pub trait DialectCatalog: Send + Sync + 'static {
    fn dialect(&self) -> Dialect;

    fn generator(&self) -> &'static dyn SqlGenerator {
        generator_for(self.dialect())
    }

    /// Schema names.
    fn schemas_sql(&self) -> &'static str;

    /// Table rows for a schema, plus a LIKE pattern when `with_pattern` is set.
    fn tables_sql(&self, with_pattern: bool) -> &'static str;

    /// View rows for a schema, plus a LIKE pattern when `with_pattern` is set.
    fn views_sql(&self, with_pattern: bool) -> &'static str;

    /// The table row of one table.
    fn table_sql(&self) -> &'static str;

    fn columns_sql(&self) -> &'static str;

    fn primary_key_sql(&self) -> &'static str;

    fn foreign_keys_sql(&self) -> &'static str;

    fn indexes_sql(&self) -> &'static str;

    fn partitions_sql(&self) -> &'static str;

    /// The schema row, bound with the schema.
    fn schema_extra_sql(&self) -> &'static str;

    fn catalog_extra_sql(&self) -> &'static str;

    /// `None` when the dialect has no schemas.
    fn current_schema_sql(&self) -> Option<&'static str>;

    fn current_catalog_sql(&self) -> &'static str;

    /// Makes `schema` the connection's default for unqualified names.
    fn use_schema_sql(&self, schema: &str) -> String;

    fn show_create(&self, schema: Option<&str>, name: &str, show_type: ShowType) -> ShowCreateSource;
}
