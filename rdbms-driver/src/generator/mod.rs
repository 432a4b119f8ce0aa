//! Rendering of dialect specific DDL from the metadata model.
//!
//! Every dialect has one stateless generator living in a static. Shared rendering rules
//! live as free functions in [`common`], the trait's default methods call into them and
//! each dialect overrides only the statements where its syntax differs.

pub mod common;

use crate::drivers::{hana, mysql, oracle};
use crate::models::{
    BeautifiedForeignKey, BeautifiedIndexKey, BeautifiedPrimaryKey, Column, ForeignKey, IndexKey, JdbcType,
    PageRequest, PrimaryKey, Table,
};
use crate::quoting::{quote_value_string, IdentifierQuoter};
use crate::{Dialect, DriverError, Result};

/// Renders DDL for one dialect. Implementations are pure: the same input always gives
/// byte identical output, and nothing is ever executed.
///
/// Multi statement results terminate every statement with `;` and a newline. Single
/// statement results end with `;`.
pub trait SqlGenerator: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn quoter(&self) -> &IdentifierQuoter;

    /// The largest DECIMAL precision the dialect accepts.
    fn decimal_bound(&self) -> i32;

    /// Renders a known type code with the column's size and digits.
    fn render_type(&self, jdbc_type: JdbcType, column: &Column) -> Result<String>;

    /// Quotes an identifier if it is not a safe bare word for the dialect.
    fn quote_identifier(&self, identifier: &str) -> String {
        self.quoter().quote(identifier)
    }

    /// Always wraps the identifier in the dialect's quote characters.
    fn add_back_quote(&self, identifier: &str) -> String {
        self.quoter().quote_always(identifier)
    }

    /// The full script recreating a table: the table itself, comments, primary key,
    /// indexes and finally foreign keys.
    fn create_table(&self, table: &Table) -> Result<String> {
        common::create_table_script(self, table)
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String;

    fn drop_table(&self, table: &Table) -> String {
        format!(
            "DROP TABLE {};",
            common::qualified_name(self, table.namespace(), &table.table_name)
        )
    }

    fn add_column(&self, column: &Column) -> Result<String>;

    fn rename_column(&self, column: &Column, new_name: &str) -> String;

    /// Changes the type of `column` to the type described by `new_column`.
    fn modify_column_type(&self, column: &Column, new_column: &Column) -> Result<String>;

    fn drop_column(&self, column: &Column) -> String;

    /// One CREATE INDEX per index, skipping the index that backs `primary_key`.
    fn add_index(
        &self,
        schema: Option<&str>,
        table: &str,
        indexes: &[BeautifiedIndexKey],
        primary_key: Option<&BeautifiedPrimaryKey>,
    ) -> String {
        common::create_indexes(self, schema, table, indexes, primary_key, true)
    }

    fn drop_index(&self, index: &IndexKey) -> String {
        format!(
            "DROP INDEX {};",
            common::qualified_name(self, index.namespace(), &index.index_name)
        )
    }

    fn add_primary_key(&self, schema: Option<&str>, table: &str, primary_key: Option<&BeautifiedPrimaryKey>) -> String {
        common::add_primary_key(self, schema, table, primary_key)
    }

    fn drop_primary_key(&self, primary_key: &PrimaryKey) -> String {
        format!(
            "ALTER TABLE {} DROP PRIMARY KEY;",
            common::qualified_name(self, primary_key.namespace(), &primary_key.table_name)
        )
    }

    fn add_foreign_key(&self, schema: Option<&str>, table: &str, foreign_keys: &[BeautifiedForeignKey]) -> String {
        common::add_foreign_keys(self, schema, table, foreign_keys)
    }

    fn drop_foreign_key(&self, foreign_key: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT {};",
            common::qualified_name(self, foreign_key.namespace(), &foreign_key.fk_table_name),
            self.quote_identifier(&foreign_key.fk_name)
        )
    }

    /// The statement attaching the table's remark, if it has one.
    fn comment_table(&self, table: &Table) -> Option<String> {
        let remark = table.remark()?;

        Some(format!(
            "COMMENT ON TABLE {} IS {};",
            common::qualified_name(self, table.namespace(), &table.table_name),
            quote_value_string(remark)
        ))
    }

    /// The statement attaching the column's remark, if it has one.
    fn comment_column(&self, namespace: Option<&str>, table: &str, column: &Column) -> Result<Option<String>> {
        let Some(remark) = column.remark() else {
            return Ok(None);
        };

        Ok(Some(format!(
            "COMMENT ON COLUMN {}.{} IS {};",
            common::qualified_name(self, namespace, table),
            self.quote_identifier(&column.column_name),
            quote_value_string(remark)
        )))
    }

    /// Renders the column's type from its native type name alone.
    fn name_convert_type(&self, column: &Column) -> Result<String> {
        common::name_convert_type(self, column)
    }

    /// Renders the column's type from its type code, falling back to the type name when
    /// the code is absent or unknown.
    fn convert_type(&self, column: &Column) -> Result<String> {
        match column.jdbc_type() {
            Some(jdbc_type) => self.render_type(jdbc_type, column),
            None if column.type_name.is_some() => self.name_convert_type(column),
            None => match column.data_type {
                Some(code) => Err(DriverError::InvalidArgument(format!(
                    "column `{}` has unsupported type code {} and no type name",
                    column.column_name, code
                ))),
                None => Err(DriverError::InvalidArgument(format!(
                    "column `{}` has neither a type code nor a type name",
                    column.column_name
                ))),
            },
        }
    }

    /// Wraps a query so it only returns one page of rows.
    fn page_sql(&self, sql: &str, page: &PageRequest) -> String {
        format!(
            "SELECT * FROM ({}) t_page LIMIT {} OFFSET {}",
            common::strip_terminator(sql),
            page.size,
            page.offset()
        )
    }

    /// Wraps a query so it returns its row count.
    fn count_sql(&self, sql: &str) -> String {
        format!("SELECT COUNT(*) FROM ({}) t_count", common::strip_terminator(sql))
    }

    fn create_schema(&self, schema: &str) -> String {
        format!("CREATE SCHEMA {};", self.quote_identifier(schema))
    }
}

/// The shared generator for a dialect.
pub fn generator_for(dialect: Dialect) -> &'static dyn SqlGenerator {
    match dialect {
        Dialect::Mysql => &mysql::GENERATOR,
        Dialect::Oracle => &oracle::GENERATOR,
        Dialect::Hana => &hana::GENERATOR,
    }
}
