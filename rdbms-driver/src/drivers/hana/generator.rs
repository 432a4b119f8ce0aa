use crate::generator::{common, SqlGenerator};
use crate::models::{Column, JdbcType, Table};
use crate::quoting::{IdentifierCase, IdentifierQuoter};
use crate::{Dialect, Result};

static QUOTER: IdentifierQuoter = IdentifierQuoter::new(
    '"',
    '"',
    IdentifierCase::FoldedToUpper,
    "_",
    "",
    &[
        "ALL", "ALTER", "AS", "BEFORE", "BEGIN", "BOTH", "CASE", "CHAR", "CONDITION", "CONNECT", "CROSS",
        "CUBE", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DECLARE",
        "DISTINCT", "DO", "ELSE", "ELSEIF", "END", "EXCEPT", "EXISTS", "FOR", "FROM", "FULL", "GROUP",
        "HAVING", "IF", "IN", "INNER", "INOUT", "INTERSECT", "INTO", "IS", "JOIN", "LEADING", "LEFT", "LIMIT",
        "LOOP", "MINUS", "NATURAL", "NCHAR", "NOT", "NULL", "OF", "OFFSET", "ON", "OR", "ORDER", "OUT",
        "PRIOR", "RETURN", "RETURNS", "RIGHT", "ROLLUP", "ROWID", "SELECT", "SESSION_USER", "SET", "SQL",
        "START", "SYSUUID", "TABLE", "TABLESAMPLE", "TOP", "TRAILING", "UNION", "UNTIL", "USER", "USING",
        "UTCTIMESTAMP", "VALUES", "WHEN", "WHERE", "WHILE", "WITH",
    ],
);

/// SAP HANA. Column names in RENAME COLUMN are addressed through their table, and DECIMAL
/// precision tops out at 30 digits in the column store.
#[derive(Debug)]
pub struct HanaSqlGenerator;

pub static GENERATOR: HanaSqlGenerator = HanaSqlGenerator;

impl SqlGenerator for HanaSqlGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Hana
    }

    fn quoter(&self) -> &IdentifierQuoter {
        &QUOTER
    }

    fn decimal_bound(&self) -> i32 {
        30
    }

    fn render_type(&self, jdbc_type: JdbcType, column: &Column) -> Result<String> {
        let rendered = match jdbc_type {
            JdbcType::Bit | JdbcType::Boolean => "BOOLEAN".to_string(),
            JdbcType::TinyInt => "TINYINT".to_string(),
            JdbcType::SmallInt => "SMALLINT".to_string(),
            JdbcType::Integer => "INTEGER".to_string(),
            JdbcType::BigInt => "BIGINT".to_string(),
            JdbcType::Float => "FLOAT".to_string(),
            JdbcType::Real => "REAL".to_string(),
            JdbcType::Double => "DOUBLE".to_string(),
            JdbcType::Numeric | JdbcType::Decimal => common::decimal_type(
                "DECIMAL",
                column.column_size,
                column.decimal_digits,
                self.decimal_bound(),
            ),
            JdbcType::Char => common::sized_type("CHAR", column)?,
            JdbcType::NChar => common::sized_type("NCHAR", column)?,
            JdbcType::Varchar => common::sized_type("VARCHAR", column)?,
            JdbcType::NVarchar => common::sized_type("NVARCHAR", column)?,
            JdbcType::LongVarchar | JdbcType::Clob => "CLOB".to_string(),
            JdbcType::LongNVarchar | JdbcType::NClob => "NCLOB".to_string(),
            JdbcType::Date => "DATE".to_string(),
            JdbcType::Time | JdbcType::TimeWithTimezone => "TIME".to_string(),
            JdbcType::Timestamp | JdbcType::TimestampWithTimezone => "TIMESTAMP".to_string(),
            JdbcType::Binary | JdbcType::VarBinary => common::sized_type("VARBINARY", column)?,
            JdbcType::LongVarBinary | JdbcType::Blob => "BLOB".to_string(),
        };

        Ok(rendered)
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "RENAME TABLE {} TO {};",
            common::qualified_name(self, table.namespace(), &table.table_name),
            self.quote_identifier(new_name)
        )
    }

    fn add_column(&self, column: &Column) -> Result<String> {
        let data_type = common::add_column_type(self, column)?;

        Ok(format!(
            "ALTER TABLE {} ADD ({});",
            common::qualified_name(self, column.namespace(), &column.table_name),
            common::column_definition(self, column, &data_type)
        ))
    }

    fn rename_column(&self, column: &Column, new_name: &str) -> String {
        format!(
            "RENAME COLUMN {}.{} TO {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name),
            self.quote_identifier(new_name)
        )
    }

    fn modify_column_type(&self, column: &Column, new_column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ALTER ({} {});",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name),
            self.convert_type(new_column)?
        ))
    }

    fn drop_column(&self, column: &Column) -> String {
        format!(
            "ALTER TABLE {} DROP ({});",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name)
        )
    }
}
