use crate::generator::{common, SqlGenerator};
use crate::models::{BeautifiedIndexKey, BeautifiedPrimaryKey, Column, ForeignKey, IndexKey, JdbcType, Table};
use crate::quoting::{quote_value_string, IdentifierCase, IdentifierQuoter};
use crate::{Dialect, Result};

static QUOTER: IdentifierQuoter = IdentifierQuoter::new(
    '`',
    '`',
    IdentifierCase::Preserved,
    "_",
    "$",
    &[
        "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHANGE", "CHECK", "COLUMN",
        "CONSTRAINT", "CREATE", "DATABASE", "DEFAULT", "DELETE", "DESC", "DESCRIBE", "DISTINCT", "DROP", "ELSE",
        "EXISTS", "FOREIGN", "FROM", "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTERVAL", "INTO", "IS",
        "JOIN", "KEY", "KEYS", "LIKE", "LIMIT", "LOCK", "NOT", "NULL", "ON", "OR", "ORDER", "PRIMARY",
        "RANGE", "REFERENCES", "RENAME", "SELECT", "SET", "SHOW", "TABLE", "THEN", "TO", "UNION", "UNIQUE",
        "UPDATE", "USE", "USING", "VALUES", "WHEN", "WHERE", "WITH",
    ],
);

/// MySQL 5.7 and 8 DDL. A MySQL "schema" is a database, so the catalog is the namespace
/// most objects are reported with.
#[derive(Debug)]
pub struct MysqlSqlGenerator;

pub static GENERATOR: MysqlSqlGenerator = MysqlSqlGenerator;

impl SqlGenerator for MysqlSqlGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn quoter(&self) -> &IdentifierQuoter {
        &QUOTER
    }

    fn decimal_bound(&self) -> i32 {
        65
    }

    fn render_type(&self, jdbc_type: JdbcType, column: &Column) -> Result<String> {
        let rendered = match jdbc_type {
            JdbcType::Bit => "BIT".to_string(),
            JdbcType::Boolean => "TINYINT(1)".to_string(),
            JdbcType::TinyInt => "TINYINT".to_string(),
            JdbcType::SmallInt => "SMALLINT".to_string(),
            JdbcType::Integer => "INT".to_string(),
            JdbcType::BigInt => "BIGINT".to_string(),
            JdbcType::Float | JdbcType::Real => "FLOAT".to_string(),
            JdbcType::Double => "DOUBLE".to_string(),
            JdbcType::Numeric | JdbcType::Decimal => common::decimal_type(
                "DECIMAL",
                column.column_size,
                column.decimal_digits,
                self.decimal_bound(),
            ),
            JdbcType::Char | JdbcType::NChar => common::sized_type("CHAR", column)?,
            JdbcType::Varchar | JdbcType::NVarchar => common::sized_type("VARCHAR", column)?,
            JdbcType::LongVarchar | JdbcType::LongNVarchar => "TEXT".to_string(),
            JdbcType::Clob | JdbcType::NClob => "LONGTEXT".to_string(),
            JdbcType::Date => "DATE".to_string(),
            JdbcType::Time | JdbcType::TimeWithTimezone => "TIME".to_string(),
            JdbcType::Timestamp | JdbcType::TimestampWithTimezone => "DATETIME".to_string(),
            JdbcType::Binary => common::sized_type("BINARY", column)?,
            JdbcType::VarBinary => common::sized_type("VARBINARY", column)?,
            JdbcType::LongVarBinary => "LONGBLOB".to_string(),
            JdbcType::Blob => "BLOB".to_string(),
        };

        Ok(rendered)
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "RENAME TABLE {} TO {};",
            common::qualified_name(self, table.namespace(), &table.table_name),
            common::qualified_name(self, table.namespace(), new_name)
        )
    }

    fn add_column(&self, column: &Column) -> Result<String> {
        let data_type = common::add_column_type(self, column)?;

        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            common::column_definition(self, column, &data_type)
        ))
    }

    fn rename_column(&self, column: &Column, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name),
            self.quote_identifier(new_name)
        )
    }

    fn modify_column_type(&self, column: &Column, new_column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} MODIFY COLUMN {} {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name),
            self.convert_type(new_column)?
        ))
    }

    fn drop_column(&self, column: &Column) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name)
        )
    }

    // Index names are scoped to their table.
    fn add_index(
        &self,
        schema: Option<&str>,
        table: &str,
        indexes: &[BeautifiedIndexKey],
        primary_key: Option<&BeautifiedPrimaryKey>,
    ) -> String {
        common::create_indexes(self, schema, table, indexes, primary_key, false)
    }

    fn drop_index(&self, index: &IndexKey) -> String {
        format!(
            "DROP INDEX {} ON {};",
            self.quote_identifier(&index.index_name),
            common::qualified_name(self, index.namespace(), &index.table_name)
        )
    }

    fn drop_foreign_key(&self, foreign_key: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} DROP FOREIGN KEY {};",
            common::qualified_name(self, foreign_key.namespace(), &foreign_key.fk_table_name),
            self.quote_identifier(&foreign_key.fk_name)
        )
    }

    fn comment_table(&self, table: &Table) -> Option<String> {
        let remark = table.remark()?;

        Some(format!(
            "ALTER TABLE {} COMMENT {};",
            common::qualified_name(self, table.namespace(), &table.table_name),
            quote_value_string(remark)
        ))
    }

    // MySQL has no COMMENT ON, the column has to be restated in full.
    fn comment_column(&self, namespace: Option<&str>, table: &str, column: &Column) -> Result<Option<String>> {
        let Some(remark) = column.remark() else {
            return Ok(None);
        };

        let data_type = self.convert_type(column)?;

        Ok(Some(format!(
            "ALTER TABLE {} MODIFY COLUMN {} COMMENT {};",
            common::qualified_name(self, namespace, table),
            common::column_definition(self, column, &data_type),
            quote_value_string(remark)
        )))
    }

    fn create_schema(&self, schema: &str) -> String {
        format!("CREATE DATABASE {};", self.quote_identifier(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndexColumn, PrimaryKeyColumn};
    use indoc::indoc;

    fn users_table() -> Table {
        Table {
            table_cat: Some("shop".to_string()),
            table_name: "users".to_string(),
            remarks: Some("Registered users".to_string()),
            columns: vec![
                Column {
                    column_name: "id".to_string(),
                    data_type: Some(4),
                    type_name: Some("INT".to_string()),
                    nullable: false,
                    ordinal_position: 1,
                    ..Default::default()
                },
                Column {
                    column_name: "email".to_string(),
                    data_type: Some(12),
                    type_name: Some("VARCHAR".to_string()),
                    column_size: Some(255),
                    remarks: Some("Login e-mail".to_string()),
                    ordinal_position: 2,
                    ..Default::default()
                },
                Column {
                    column_name: "order".to_string(),
                    data_type: Some(4),
                    column_def: Some("0".to_string()),
                    ordinal_position: 3,
                    ..Default::default()
                },
            ],
            primary_key: Some(BeautifiedPrimaryKey {
                table_name: "users".to_string(),
                pk_name: Some("PRIMARY".to_string()),
                columns: vec![PrimaryKeyColumn {
                    column_name: "id".to_string(),
                    key_seq: 1,
                }],
                ..Default::default()
            }),
            index_keys: vec![
                BeautifiedIndexKey {
                    table_name: "users".to_string(),
                    index_name: "PRIMARY".to_string(),
                    columns: vec![IndexColumn {
                        column_name: "id".to_string(),
                        ordinal_position: 1,
                        asc_or_desc: None,
                    }],
                    ..Default::default()
                },
                BeautifiedIndexKey {
                    table_name: "users".to_string(),
                    index_name: "uk_email".to_string(),
                    columns: vec![IndexColumn {
                        column_name: "email".to_string(),
                        ordinal_position: 1,
                        asc_or_desc: None,
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn creates_table_with_comments_and_keys() {
        let sql = GENERATOR.create_table(&users_table()).unwrap();

        similar_asserts::assert_eq!(
            sql,
            indoc! {r#"
            CREATE TABLE shop.users (
                id INT NOT NULL,
                email VARCHAR(255),
                `order` INT DEFAULT 0
            );
            ALTER TABLE shop.users COMMENT 'Registered users';
            ALTER TABLE shop.users MODIFY COLUMN email VARCHAR(255) COMMENT 'Login e-mail';
            ALTER TABLE shop.users ADD PRIMARY KEY (id);
            CREATE UNIQUE INDEX uk_email ON shop.users (email);
            "#}
        );
    }

    #[test]
    fn single_statements() {
        let table = users_table();
        let email = Column {
            table_cat: Some("shop".to_string()),
            table_name: "users".to_string(),
            ..table.columns[1].clone()
        };

        assert_eq!(
            GENERATOR.rename_table(&table, "members"),
            "RENAME TABLE shop.users TO shop.members;"
        );
        assert_eq!(GENERATOR.drop_table(&table), "DROP TABLE shop.users;");
        assert_eq!(
            GENERATOR.add_column(&email).unwrap(),
            "ALTER TABLE shop.users ADD COLUMN email VARCHAR(255);"
        );
        assert_eq!(
            GENERATOR.rename_column(&email, "mail"),
            "ALTER TABLE shop.users RENAME COLUMN email TO mail;"
        );
        assert_eq!(
            GENERATOR.drop_column(&email),
            "ALTER TABLE shop.users DROP COLUMN email;"
        );
        assert_eq!(
            GENERATOR.drop_index(&IndexKey {
                table_cat: Some("shop".to_string()),
                table_name: "users".to_string(),
                index_name: "uk_email".to_string(),
                ..Default::default()
            }),
            "DROP INDEX uk_email ON shop.users;"
        );
        assert_eq!(
            GENERATOR.drop_foreign_key(&ForeignKey {
                fk_table_cat: Some("shop".to_string()),
                fk_table_name: "orders".to_string(),
                fk_name: "fk_user".to_string(),
                ..Default::default()
            }),
            "ALTER TABLE shop.orders DROP FOREIGN KEY fk_user;"
        );
        assert_eq!(GENERATOR.create_schema("shop"), "CREATE DATABASE shop;");
    }

    #[test]
    fn modify_column_type_uses_code_then_name() {
        let column = Column {
            table_cat: Some("shop".to_string()),
            table_name: "users".to_string(),
            column_name: "score".to_string(),
            ..Default::default()
        };

        let by_code = Column {
            data_type: Some(3),
            type_name: Some("ignored".to_string()),
            column_size: Some(12),
            decimal_digits: Some(4),
            ..Default::default()
        };
        assert_eq!(
            GENERATOR.modify_column_type(&column, &by_code).unwrap(),
            "ALTER TABLE shop.users MODIFY COLUMN score DECIMAL(12, 4);"
        );

        let by_name = Column {
            type_name: Some("mediumint".to_string()),
            ..Default::default()
        };
        assert_eq!(
            GENERATOR.modify_column_type(&column, &by_name).unwrap(),
            "ALTER TABLE shop.users MODIFY COLUMN score mediumint;"
        );

        assert!(GENERATOR.modify_column_type(&column, &Column::default()).is_err());
    }

    #[test]
    fn back_quote_always_quotes() {
        assert_eq!(GENERATOR.add_back_quote("id"), "`id`");
        assert_eq!(GENERATOR.quote_identifier("id"), "id");
        assert_eq!(GENERATOR.quote_identifier("select"), "`select`");
    }
}
