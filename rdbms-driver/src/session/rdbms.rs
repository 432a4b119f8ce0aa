use async_trait::async_trait;
use futures::try_join;
use tracing::{info, instrument, warn};

use crate::connection::{ConnectableResource, QueryResult, SqlValue};
use crate::connection_wrapper::{ConnectionWrapper, FromRow};
use crate::generator::common::{qualified_name, strip_terminator};
use crate::generator::SqlGenerator;
use crate::models::{
    group_foreign_keys, group_index_keys, group_primary_key, Catalog, Column, ForeignKey, IndexKey, PageRequest,
    PrimaryKey, Schema, ShowType, Table, TablePartition,
};
use crate::session::{DialectCatalog, DriverSession, ShowCreateSource, SqlResponse, StatementOutcome};
use crate::sql_splitter::{is_query, split_statements};
use crate::{Dialect, DriverError, Result};

/// A driver session for any dialect with a catalog reachable through plain SQL.
///
/// The session owns its resource exclusively. Every call checks out its own connection,
/// so independent metadata queries run concurrently.
pub struct RdbmsDriverSession<C: DialectCatalog> {
    catalog: C,
    resource: Box<dyn ConnectableResource>,
}

impl<C: DialectCatalog> RdbmsDriverSession<C> {
    pub fn new(catalog: C, resource: Box<dyn ConnectableResource>) -> Self {
        RdbmsDriverSession { catalog, resource }
    }

    async fn connect(&self) -> Result<ConnectionWrapper> {
        ConnectionWrapper::acquire(self.resource.as_ref()).await
    }

    /// A connection whose default schema is `schema`, if one is given.
    async fn connect_to(&self, schema: Option<&str>) -> Result<ConnectionWrapper> {
        let mut connection = self.connect().await?;

        if let Some(schema) = schema.filter(|s| !s.is_empty()) {
            connection
                .execute_non_query(&self.catalog.use_schema_sql(schema))
                .await?;
        }

        Ok(connection)
    }

    async fn fetch<T: FromRow>(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<T>> {
        let mut connection = self.connect().await?;
        connection.get_results(sql, params).await
    }

    fn table_params(schema: Option<&str>, table: &str) -> [SqlValue; 2] {
        [schema.into(), table.into()]
    }

    fn listing_params(schema: Option<&str>, pattern: Option<&str>) -> Vec<SqlValue> {
        let mut params: Vec<SqlValue> = vec![schema.into()];
        if let Some(pattern) = pattern {
            params.push(pattern.into());
        }
        params
    }

    async fn table_header(&self, schema: Option<&str>, table: &str) -> Result<Table> {
        let tables: Vec<Table> = self
            .fetch(self.catalog.table_sql(), &Self::table_params(schema, table))
            .await?;

        tables
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::TableNotFound {
                schema: schema.unwrap_or_default().to_string(),
                table: table.to_string(),
            })
    }

    async fn run_statement(
        &self,
        connection: &mut ConnectionWrapper,
        statement: &str,
        page: Option<PageRequest>,
        with_count: bool,
    ) -> Result<StatementOutcome> {
        if !is_query(statement) {
            let affected_rows = connection.execute_non_query(statement).await?;
            return Ok(StatementOutcome::Update { affected_rows });
        }

        let generator = self.generator();

        let result = match &page {
            Some(page) => connection.query(&generator.page_sql(statement, page), &[]).await?,
            None => connection.query(statement, &[]).await?,
        };

        let total = match (with_count, page) {
            (false, _) => None,
            (true, Some(_)) => Some(
                connection
                    .get_single_result::<i64>(&generator.count_sql(statement), &[])
                    .await?,
            ),
            (true, None) => Some(result.rows.len() as i64),
        };

        Ok(StatementOutcome::Query {
            columns: result.columns,
            rows: result.rows.into_iter().map(|r| r.values).collect(),
            total,
        })
    }

    async fn execute_statements(
        &self,
        schema: Option<&str>,
        text: &str,
        page: Option<PageRequest>,
        with_count: bool,
    ) -> Result<Vec<SqlResponse>> {
        let statements = split_statements(text, self.dialect().backslash_escapes());
        let mut connection = self.connect_to(schema).await?;

        let mut responses = Vec::with_capacity(statements.len());

        for (index, statement) in statements.into_iter().enumerate() {
            let outcome = match self.run_statement(&mut connection, &statement, page, with_count).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(index, error = %e, "statement failed");
                    StatementOutcome::Failed { message: e.to_string() }
                }
            };

            responses.push(SqlResponse {
                sql: statement,
                outcome,
            });
        }

        Ok(responses)
    }
}

#[async_trait]
impl<C: DialectCatalog> DriverSession for RdbmsDriverSession<C> {
    fn dialect(&self) -> Dialect {
        self.catalog.dialect()
    }

    fn generator(&self) -> &'static dyn SqlGenerator {
        self.catalog.generator()
    }

    #[instrument(skip_all)]
    async fn schema_list(&self) -> Result<Vec<String>> {
        let mut connection = self.connect().await?;
        connection.get_single_results(self.catalog.schemas_sql(), &[]).await
    }

    #[instrument(skip(self))]
    async fn table_list(&self, schema: Option<&str>, pattern: Option<&str>) -> Result<Vec<String>> {
        let tables: Vec<Table> = self
            .fetch(
                self.catalog.tables_sql(pattern.is_some()),
                &Self::listing_params(schema, pattern),
            )
            .await?;

        Ok(tables.into_iter().map(|t| t.table_name).collect())
    }

    #[instrument(skip(self))]
    async fn view_list(&self, schema: Option<&str>, pattern: Option<&str>) -> Result<Vec<String>> {
        let views: Vec<Table> = self
            .fetch(
                self.catalog.views_sql(pattern.is_some()),
                &Self::listing_params(schema, pattern),
            )
            .await?;

        Ok(views.into_iter().map(|v| v.table_name).collect())
    }

    #[instrument(skip(self))]
    async fn tables_name_and_desc(&self, schema: Option<&str>) -> Result<Vec<Table>> {
        self.fetch(self.catalog.tables_sql(false), &Self::listing_params(schema, None))
            .await
    }

    #[instrument(skip(self))]
    async fn table_exists(&self, schema: Option<&str>, table: &str) -> Result<bool> {
        let tables: Vec<Table> = self
            .fetch(self.catalog.table_sql(), &Self::table_params(schema, table))
            .await?;

        Ok(!tables.is_empty())
    }

    #[instrument(skip(self))]
    async fn table_pk(&self, schema: Option<&str>, table: &str) -> Result<Vec<PrimaryKey>> {
        self.fetch(self.catalog.primary_key_sql(), &Self::table_params(schema, table))
            .await
    }

    #[instrument(skip(self))]
    async fn table_fk(&self, schema: Option<&str>, table: &str) -> Result<Vec<ForeignKey>> {
        self.fetch(self.catalog.foreign_keys_sql(), &Self::table_params(schema, table))
            .await
    }

    #[instrument(skip(self))]
    async fn table_index(&self, schema: Option<&str>, table: &str) -> Result<Vec<IndexKey>> {
        self.fetch(self.catalog.indexes_sql(), &Self::table_params(schema, table))
            .await
    }

    #[instrument(skip(self))]
    async fn table_meta_data(&self, schema: Option<&str>, table: &str) -> Result<Table> {
        let (header, columns, primary_keys, foreign_keys, index_keys) = try_join!(
            self.table_header(schema, table),
            self.column_meta_data(schema, table),
            self.table_pk(schema, table),
            self.table_fk(schema, table),
            self.table_index(schema, table)
        )?;

        Ok(Table {
            columns,
            primary_key: group_primary_key(&primary_keys)?,
            foreign_keys: group_foreign_keys(&foreign_keys)?,
            index_keys: group_index_keys(&index_keys)?,
            ..header
        })
    }

    #[instrument(skip(self))]
    async fn table_meta_extra(&self, schema: Option<&str>, table: &str) -> Result<Table> {
        self.table_header(schema, table).await
    }

    #[instrument(skip(self))]
    async fn tables_meta_data(&self, schema: Option<&str>, tables: &[String]) -> Result<Vec<Table>> {
        let mut result = Vec::with_capacity(tables.len());
        for table in tables {
            result.push(self.table_meta_data(schema, table).await?);
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn column_meta_data(&self, schema: Option<&str>, table: &str) -> Result<Vec<Column>> {
        self.fetch(self.catalog.columns_sql(), &Self::table_params(schema, table))
            .await
    }

    #[instrument(skip(self))]
    async fn partition_list(&self, schema: Option<&str>, table: &str) -> Result<Vec<TablePartition>> {
        self.fetch(self.catalog.partitions_sql(), &Self::table_params(schema, table))
            .await
    }

    #[instrument(skip(self))]
    async fn table_query(&self, schema: Option<&str>, table: &str, page: PageRequest) -> Result<QueryResult> {
        let generator = self.generator();
        let sql = generator.page_sql(
            &format!("SELECT * FROM {}", qualified_name(generator, schema, table)),
            &page,
        );

        let mut connection = self.connect().await?;
        connection.query(&sql, &[]).await
    }

    #[instrument(skip(self, sql))]
    async fn column_meta_data_by_sql(&self, schema: Option<&str>, sql: &str) -> Result<Vec<Column>> {
        let mut connection = self.connect_to(schema).await?;
        let described = connection.describe(strip_terminator(sql)).await?;

        Ok(described
            .into_iter()
            .enumerate()
            .map(|(index, column)| Column {
                table_schema: schema.map(str::to_string),
                column_name: column.name,
                data_type: column.type_code,
                type_name: column.type_name,
                column_size: column.precision,
                decimal_digits: column.scale,
                nullable: column.nullable,
                ordinal_position: index as i32 + 1,
                ..Default::default()
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn schema_meta_extra(&self, schema: Option<&str>) -> Result<Schema> {
        let mut connection = self.connect().await?;
        connection
            .get_result(self.catalog.schema_extra_sql(), &[schema.into()])
            .await
    }

    #[instrument(skip_all)]
    async fn catalog_meta_extra(&self) -> Result<Catalog> {
        let mut connection = self.connect().await?;
        connection.get_result(self.catalog.catalog_extra_sql(), &[]).await
    }

    async fn current_schema(&self) -> Result<String> {
        let Some(sql) = self.catalog.current_schema_sql() else {
            return Ok(String::new());
        };

        let mut connection = self.connect().await?;
        let schema: Option<String> = connection.get_single_result(sql, &[]).await?;

        Ok(schema.unwrap_or_default())
    }

    async fn current_catalog(&self) -> Result<String> {
        let mut connection = self.connect().await?;
        let catalog: Option<String> = connection
            .get_single_result(self.catalog.current_catalog_sql(), &[])
            .await?;

        Ok(catalog.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn show_create_sql(&self, schema: Option<&str>, name: &str, show_type: ShowType) -> Result<String> {
        match self.catalog.show_create(schema, name, show_type) {
            ShowCreateSource::Query { sql, params, column } => {
                let mut connection = self.connect().await?;
                let result = connection.query(&sql, &params).await?;
                let row = result.rows.into_iter().next().ok_or(DriverError::InvalidNumberOfResults {
                    actual: 0,
                    expected: 1,
                })?;

                row.try_get(column)
            }
            ShowCreateSource::ViewDefinition { sql } => {
                let mut connection = self.connect().await?;
                let definition: String = connection
                    .get_single_result(sql, &Self::table_params(schema, name))
                    .await?;

                Ok(format!(
                    "CREATE VIEW {} AS {}",
                    qualified_name(self.generator(), schema, name),
                    definition.trim()
                ))
            }
            ShowCreateSource::Generated => {
                let table = self.table_meta_data(schema, name).await?;
                self.generator().create_table(&table)
            }
        }
    }

    #[instrument(skip(self, sql))]
    async fn query_count(&self, schema: Option<&str>, sql: &str) -> Result<i64> {
        let mut connection = self.connect_to(schema).await?;
        connection
            .get_single_result(&self.generator().count_sql(sql), &[])
            .await
    }

    #[instrument(skip(self, text))]
    async fn execute_all(&self, schema: Option<&str>, text: &str, with_count: bool) -> Result<Vec<SqlResponse>> {
        self.execute_statements(schema, text, None, with_count).await
    }

    #[instrument(skip(self, text))]
    async fn execute_all_paged(
        &self,
        schema: Option<&str>,
        text: &str,
        page: PageRequest,
        with_count: bool,
    ) -> Result<Vec<SqlResponse>> {
        self.execute_statements(schema, text, Some(page), with_count)
            .await
    }

    #[instrument(skip(self, sql))]
    async fn execute_one_update(&self, schema: Option<&str>, sql: &str) -> Result<u64> {
        let statements = split_statements(sql, self.dialect().backslash_escapes());
        let [statement] = statements.as_slice() else {
            return Err(DriverError::InvalidArgument(format!(
                "expected exactly one statement, got {}",
                statements.len()
            )));
        };

        let mut connection = self.connect_to(schema).await?;
        connection.execute_non_query(statement).await
    }

    #[instrument(skip_all)]
    async fn update_comment(&self, columns: &[Column]) -> Result<usize> {
        let generator = self.generator();

        let mut statements = Vec::new();
        for column in columns {
            if let Some(statement) = generator.comment_column(column.namespace(), &column.table_name, column)? {
                statements.push(statement);
            }
        }

        let mut connection = self.connect().await?;
        for statement in &statements {
            connection.execute_non_query(strip_terminator(statement)).await?;
        }

        Ok(statements.len())
    }

    #[instrument(skip(self))]
    async fn schema_create(&self, schema: &str) -> Result<()> {
        let statement = self.generator().create_schema(schema);

        let mut connection = self.connect().await?;
        connection.execute_non_query(strip_terminator(&statement)).await?;

        info!(schema, "created schema");
        Ok(())
    }

    async fn is_valid(&self) -> bool {
        self.resource.is_valid().await
    }

    async fn close(&self) {
        self.resource.close().await;
    }
}
