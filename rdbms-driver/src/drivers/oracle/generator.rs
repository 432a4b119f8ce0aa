use crate::generator::{common, SqlGenerator};
use crate::models::{Column, JdbcType, PageRequest, Table};
use crate::quoting::{IdentifierCase, IdentifierQuoter};
use crate::{Dialect, Result};

static QUOTER: IdentifierQuoter = IdentifierQuoter::new(
    '"',
    '"',
    IdentifierCase::FoldedToUpper,
    "",
    "$#",
    &[
        "ACCESS", "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "AUDIT", "BETWEEN", "BY", "CHAR", "CHECK",
        "CLUSTER", "COLUMN", "COMMENT", "COMPRESS", "CONNECT", "CREATE", "CURRENT", "DATE", "DECIMAL", "DEFAULT",
        "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "EXCLUSIVE", "EXISTS", "FILE", "FLOAT", "FOR", "FROM",
        "GRANT", "GROUP", "HAVING", "IDENTIFIED", "IMMEDIATE", "IN", "INCREMENT", "INDEX", "INITIAL", "INSERT",
        "INTEGER", "INTERSECT", "INTO", "IS", "LEVEL", "LIKE", "LOCK", "LONG", "MAXEXTENTS", "MINUS", "MODE",
        "MODIFY", "NOAUDIT", "NOCOMPRESS", "NOT", "NOWAIT", "NULL", "NUMBER", "OF", "OFFLINE", "ON", "ONLINE",
        "OPTION", "OR", "ORDER", "PCTFREE", "PRIOR", "PUBLIC", "RAW", "RENAME", "RESOURCE", "REVOKE", "ROW",
        "ROWID", "ROWNUM", "ROWS", "SELECT", "SESSION", "SET", "SHARE", "SIZE", "SMALLINT", "START",
        "SUCCESSFUL", "SYNONYM", "SYSDATE", "TABLE", "THEN", "TO", "TRIGGER", "UID", "UNION", "UNIQUE",
        "UPDATE", "USER", "VALIDATE", "VALUES", "VARCHAR", "VARCHAR2", "VIEW", "WHENEVER", "WHERE", "WITH",
    ],
);

/// Oracle 12c and later. Unquoted identifiers fold to upper case, so anything with a
/// lower case letter gets quoted.
#[derive(Debug)]
pub struct OracleSqlGenerator;

pub static GENERATOR: OracleSqlGenerator = OracleSqlGenerator;

impl SqlGenerator for OracleSqlGenerator {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn quoter(&self) -> &IdentifierQuoter {
        &QUOTER
    }

    fn decimal_bound(&self) -> i32 {
        38
    }

    fn render_type(&self, jdbc_type: JdbcType, column: &Column) -> Result<String> {
        let rendered = match jdbc_type {
            JdbcType::Bit | JdbcType::Boolean => "NUMBER(1)".to_string(),
            JdbcType::TinyInt => "NUMBER(3)".to_string(),
            JdbcType::SmallInt => "NUMBER(5)".to_string(),
            JdbcType::Integer => "NUMBER(10)".to_string(),
            JdbcType::BigInt => "NUMBER(19)".to_string(),
            JdbcType::Float => "FLOAT".to_string(),
            JdbcType::Real => "BINARY_FLOAT".to_string(),
            JdbcType::Double => "BINARY_DOUBLE".to_string(),
            JdbcType::Numeric | JdbcType::Decimal => common::decimal_type(
                "NUMBER",
                column.column_size,
                column.decimal_digits,
                self.decimal_bound(),
            ),
            JdbcType::Char => common::sized_type("CHAR", column)?,
            JdbcType::NChar => common::sized_type("NCHAR", column)?,
            JdbcType::Varchar => common::sized_type("VARCHAR2", column)?,
            JdbcType::NVarchar => common::sized_type("NVARCHAR2", column)?,
            JdbcType::LongVarchar | JdbcType::Clob => "CLOB".to_string(),
            JdbcType::LongNVarchar | JdbcType::NClob => "NCLOB".to_string(),
            JdbcType::Date => "DATE".to_string(),
            JdbcType::Time | JdbcType::Timestamp => "TIMESTAMP".to_string(),
            JdbcType::TimeWithTimezone | JdbcType::TimestampWithTimezone => "TIMESTAMP WITH TIME ZONE".to_string(),
            JdbcType::Binary | JdbcType::VarBinary => common::sized_type("RAW", column)?,
            JdbcType::LongVarBinary | JdbcType::Blob => "BLOB".to_string(),
        };

        Ok(rendered)
    }

    fn rename_table(&self, table: &Table, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {};",
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
            "ALTER TABLE {} RENAME COLUMN {} TO {};",
            common::qualified_name(self, column.namespace(), &column.table_name),
            self.quote_identifier(&column.column_name),
            self.quote_identifier(new_name)
        )
    }

    fn modify_column_type(&self, column: &Column, new_column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} MODIFY ({} {});",
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

    fn page_sql(&self, sql: &str, page: &PageRequest) -> String {
        format!(
            "SELECT * FROM ({}) t_page OFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
            common::strip_terminator(sql),
            page.offset(),
            page.size
        )
    }

    // Oracle schemas are users. A schema only account holds objects without being able to log in.
    fn create_schema(&self, schema: &str) -> String {
        format!("CREATE USER {} NO AUTHENTICATION;", self.quote_identifier(schema))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BeautifiedForeignKey, ForeignKeyColumn, ForeignKey, IndexKey, PrimaryKey};

    fn column(name: &str) -> Column {
        Column {
            table_schema: Some("HR".to_string()),
            table_name: "EMPLOYEES".to_string(),
            column_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn single_statements() {
        let salary = Column {
            data_type: Some(3),
            column_size: Some(10),
            decimal_digits: Some(2),
            nullable: false,
            ..column("SALARY")
        };

        assert_eq!(
            GENERATOR.add_column(&salary).unwrap(),
            "ALTER TABLE HR.EMPLOYEES ADD (SALARY NUMBER(10, 2) NOT NULL);"
        );
        assert_eq!(
            GENERATOR.modify_column_type(&salary, &Column {
                data_type: Some(12),
                column_size: Some(40),
                ..Default::default()
            })
            .unwrap(),
            "ALTER TABLE HR.EMPLOYEES MODIFY (SALARY VARCHAR2(40));"
        );
        assert_eq!(
            GENERATOR.rename_column(&column("name"), "FULL_NAME"),
            "ALTER TABLE HR.EMPLOYEES RENAME COLUMN \"name\" TO FULL_NAME;"
        );
        assert_eq!(
            GENERATOR.drop_column(&column("SALARY")),
            "ALTER TABLE HR.EMPLOYEES DROP COLUMN SALARY;"
        );

        let table = Table {
            table_schema: Some("HR".to_string()),
            ..Table::new("EMPLOYEES")
        };
        assert_eq!(
            GENERATOR.rename_table(&table, "STAFF"),
            "ALTER TABLE HR.EMPLOYEES RENAME TO STAFF;"
        );
        assert_eq!(
            GENERATOR.drop_index(&IndexKey {
                table_schema: Some("HR".to_string()),
                table_name: "EMPLOYEES".to_string(),
                index_name: "EMP_NAME_IX".to_string(),
                ..Default::default()
            }),
            "DROP INDEX HR.EMP_NAME_IX;"
        );
        assert_eq!(
            GENERATOR.drop_primary_key(&PrimaryKey {
                table_schema: Some("HR".to_string()),
                table_name: "EMPLOYEES".to_string(),
                ..Default::default()
            }),
            "ALTER TABLE HR.EMPLOYEES DROP PRIMARY KEY;"
        );
        assert_eq!(
            GENERATOR.drop_foreign_key(&ForeignKey {
                fk_table_schema: Some("HR".to_string()),
                fk_table_name: "EMPLOYEES".to_string(),
                fk_name: "EMP_DEPT_FK".to_string(),
                ..Default::default()
            }),
            "ALTER TABLE HR.EMPLOYEES DROP CONSTRAINT EMP_DEPT_FK;"
        );
    }

    #[test]
    fn comments_use_comment_on() {
        let table = Table {
            table_schema: Some("HR".to_string()),
            remarks: Some("People's records".to_string()),
            ..Table::new("EMPLOYEES")
        };
        assert_eq!(
            GENERATOR.comment_table(&table).unwrap(),
            "COMMENT ON TABLE HR.EMPLOYEES IS 'People''s records';"
        );

        let with_remark = Column {
            remarks: Some("Monthly".to_string()),
            ..column("SALARY")
        };
        assert_eq!(
            GENERATOR
                .comment_column(Some("HR"), "EMPLOYEES", &with_remark)
                .unwrap()
                .unwrap(),
            "COMMENT ON COLUMN HR.EMPLOYEES.SALARY IS 'Monthly';"
        );
        assert_eq!(
            GENERATOR.comment_column(Some("HR"), "EMPLOYEES", &column("SALARY")).unwrap(),
            None
        );
        assert_eq!(GENERATOR.comment_table(&Table::new("EMPLOYEES")), None);
    }

    #[test]
    fn foreign_key_references_fall_back_to_catalog() {
        let foreign_keys = vec![BeautifiedForeignKey {
            fk_name: "EMP_DEPT_FK".to_string(),
            fk_table_name: "EMPLOYEES".to_string(),
            pk_table_cat: Some("CORP".to_string()),
            pk_table_name: "DEPARTMENTS".to_string(),
            columns: vec![ForeignKeyColumn {
                column_name: "DEPARTMENT_ID".to_string(),
                pk_column_name: "ID".to_string(),
                key_seq: 1,
            }],
            ..Default::default()
        }];

        assert_eq!(
            GENERATOR.add_foreign_key(Some("HR"), "EMPLOYEES", &foreign_keys),
            "ALTER TABLE HR.EMPLOYEES ADD CONSTRAINT EMP_DEPT_FK FOREIGN KEY (DEPARTMENT_ID) REFERENCES CORP.DEPARTMENTS (ID);\n"
        );
    }

    #[test]
    fn pages_with_fetch_next() {
        assert_eq!(
            GENERATOR.page_sql("SELECT * FROM EMPLOYEES", &PageRequest::new(1, 25)),
            "SELECT * FROM (SELECT * FROM EMPLOYEES) t_page OFFSET 25 ROWS FETCH NEXT 25 ROWS ONLY"
        );
    }

    #[test]
    fn lower_case_identifiers_are_quoted() {
        assert_eq!(GENERATOR.quote_identifier("EMPLOYEES"), "EMPLOYEES");
        assert_eq!(GENERATOR.quote_identifier("employees"), "\"employees\"");
        assert_eq!(GENERATOR.quote_identifier("USER"), "\"USER\"");
        assert_eq!(GENERATOR.add_back_quote("EMPLOYEES"), "\"EMPLOYEES\"");
    }
}
