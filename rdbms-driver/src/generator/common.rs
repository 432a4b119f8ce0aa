use itertools::Itertools;

use crate::ddl_query_builder::DdlQueryBuilder;
use crate::generator::SqlGenerator;
use crate::helpers::StringExt;
use crate::models::{BeautifiedForeignKey, BeautifiedIndexKey, BeautifiedPrimaryKey, Column, Table};
use crate::quoting::quote_value_string;
use crate::{DriverError, Result};

/// `ns.name` with both parts quoted as needed, or just `name` without a namespace.
pub fn qualified_name<G: SqlGenerator + ?Sized>(generator: &G, namespace: Option<&str>, name: &str) -> String {
    match namespace.filter(|n| !n.is_empty()) {
        Some(namespace) => format!(
            "{}.{}",
            generator.quote_identifier(namespace),
            generator.quote_identifier(name)
        ),
        None => generator.quote_identifier(name),
    }
}

pub(crate) fn strip_terminator(sql: &str) -> &str {
    sql.trim().trim_end_matches(';').trim_end()
}

/// `NAME(p, s)` when the precision is usable, otherwise the bare keyword.
///
/// The precision has to be positive and within the dialect's bound, and the scale must
/// not be negative. A missing scale counts as zero.
pub fn decimal_type(name: &str, precision: Option<i32>, scale: Option<i32>, bound: i32) -> String {
    let scale = scale.unwrap_or(0);

    match precision {
        Some(precision) if precision > 0 && precision <= bound && scale >= 0 => {
            format!("{}({}, {})", name, precision, scale)
        }
        _ => name.to_string(),
    }
}

/// `NAME(size)`. Character and binary types are meaningless without a length.
pub fn sized_type(name: &str, column: &Column) -> Result<String> {
    match column.column_size {
        Some(size) if size > 0 => Ok(format!("{}({})", name, size)),
        _ => Err(DriverError::InvalidArgument(format!(
            "column `{}` of type {} needs a length",
            column.column_name, name
        ))),
    }
}

pub fn name_convert_type<G: SqlGenerator + ?Sized>(generator: &G, column: &Column) -> Result<String> {
    let Some(type_name) = column.type_name.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        return Err(DriverError::InvalidArgument(format!(
            "column `{}` has no type name",
            column.column_name
        )));
    };

    let upper = type_name.to_ascii_uppercase();

    match upper.as_str() {
        "VARCHAR" | "CHAR" | "VARCHAR2" | "NVARCHAR" | "NVARCHAR2" | "NCHAR" | "VARBINARY" | "RAW" => {
            sized_type(&upper, column)
        }
        "DECIMAL" | "NUMERIC" | "NUMBER" => Ok(decimal_type(
            &upper,
            column.column_size,
            column.decimal_digits,
            generator.decimal_bound(),
        )),
        _ => Ok(type_name.to_string()),
    }
}

/// The column default as it has to appear in DDL.
///
/// MySQL and HANA report literal defaults of character and temporal columns bare, Oracle
/// reports them already quoted. Bare literals get quoted, keywords and function calls such
/// as `CURRENT_TIMESTAMP` or `now()` are kept as they are.
pub fn default_expression(column: &Column) -> Option<String> {
    let default = column.column_def.as_deref().map(str::trim).filter(|d| !d.is_empty())?;

    let is_bare_literal = column.jdbc_type().is_some_and(|t| t.takes_quoted_literal())
        && !default.starts_with('\'')
        && !is_default_keyword(default);

    if is_bare_literal {
        Some(quote_value_string(default))
    } else {
        Some(default.to_string())
    }
}

fn is_default_keyword(default: &str) -> bool {
    let upper = default.to_ascii_uppercase();

    default.contains('(')
        || upper == "NULL"
        || upper.starts_with("CURRENT_")
        || upper.starts_with("SYSDATE")
        || upper.starts_with("SYSTIMESTAMP")
        || upper.starts_with("LOCALTIME")
}

/// `name TYPE [DEFAULT x] [NOT NULL]` for ALTER statements.
pub fn column_definition<G: SqlGenerator + ?Sized>(generator: &G, column: &Column, data_type: &str) -> String {
    let mut definition = format!("{} {}", generator.quote_identifier(&column.column_name), data_type);

    if let Some(default) = default_expression(column) {
        definition.push_str(" DEFAULT ");
        definition.push_str(&default);
    }

    if !column.nullable {
        definition.push_str(" NOT NULL");
    }

    definition
}

/// The type used when adding a column: the native name wins over the type code, since
/// the column most likely came from the same dialect.
pub fn add_column_type<G: SqlGenerator + ?Sized>(generator: &G, column: &Column) -> Result<String> {
    if column.type_name.is_some() {
        generator.name_convert_type(column)
    } else {
        generator.convert_type(column)
    }
}

pub fn create_table_script<G: SqlGenerator + ?Sized>(generator: &G, table: &Table) -> Result<String> {
    let namespace = table.namespace();

    let mut builder = DdlQueryBuilder::new(generator.quoter());
    let mut table_builder = builder.create_table(namespace, &table.table_name);

    for column in &table.columns {
        let data_type = generator.convert_type(column)?;
        let mut column_builder = table_builder.column(&column.column_name, &data_type);

        if let Some(default) = default_expression(column) {
            column_builder.default_value(&default);
        }
        if !column.nullable {
            column_builder.not_null();
        }
    }

    let mut sql = builder.build();
    sql.push('\n');

    if let Some(comment) = generator.comment_table(table) {
        sql.push_script(comment);
    }

    for column in &table.columns {
        if let Some(comment) = generator.comment_column(namespace, &table.table_name, column)? {
            sql.push_script(comment);
        }
    }

    let primary_key = table.primary_key.as_ref();
    sql.push_script(generator.add_primary_key(namespace, &table.table_name, primary_key));
    sql.push_script(generator.add_index(namespace, &table.table_name, &table.index_keys, primary_key));
    sql.push_script(generator.add_foreign_key(namespace, &table.table_name, &table.foreign_keys));

    Ok(sql)
}

/// CREATE [UNIQUE] INDEX statements. Some dialects put indexes in a schema of their own,
/// those qualify the index name as well.
pub fn create_indexes<G: SqlGenerator + ?Sized>(
    generator: &G,
    schema: Option<&str>,
    table: &str,
    indexes: &[BeautifiedIndexKey],
    primary_key: Option<&BeautifiedPrimaryKey>,
    qualify_index_name: bool,
) -> String {
    let mut sql = String::new();

    for index in indexes.iter().filter(|ik| !ik.is_primary_key(primary_key)) {
        let index_name = if qualify_index_name {
            qualified_name(generator, schema, &index.index_name)
        } else {
            generator.quote_identifier(&index.index_name)
        };

        sql.push_str(if index.non_unique {
            "CREATE INDEX "
        } else {
            "CREATE UNIQUE INDEX "
        });
        sql.push_str(&index_name);
        sql.push_str(" ON ");
        sql.push_str(&qualified_name(generator, schema, table));
        sql.push_str(" (");
        sql.push_join(", ", generator.quoter().quote_iter(index.column_names()));
        sql.push_str(");\n");
    }

    sql
}

pub fn add_primary_key<G: SqlGenerator + ?Sized>(
    generator: &G,
    schema: Option<&str>,
    table: &str,
    primary_key: Option<&BeautifiedPrimaryKey>,
) -> String {
    let Some(primary_key) = primary_key.filter(|pk| !pk.columns.is_empty()) else {
        return String::new();
    };

    let columns = primary_key
        .columns
        .iter()
        .sorted_by_key(|c| c.key_seq)
        .map(|c| generator.quote_identifier(&c.column_name));

    let mut sql = format!("ALTER TABLE {} ADD PRIMARY KEY (", qualified_name(generator, schema, table));
    sql.push_join(", ", columns);
    sql.push_str(");\n");

    sql
}

pub fn add_foreign_keys<G: SqlGenerator + ?Sized>(
    generator: &G,
    schema: Option<&str>,
    table: &str,
    foreign_keys: &[BeautifiedForeignKey],
) -> String {
    let mut sql = String::new();

    for foreign_key in foreign_keys {
        let columns = foreign_key.columns.iter().sorted_by_key(|c| c.key_seq).collect_vec();

        sql.push_str("ALTER TABLE ");
        sql.push_str(&qualified_name(generator, schema, table));
        sql.push_str(" ADD ");
        if !foreign_key.fk_name.is_empty() {
            sql.push_str("CONSTRAINT ");
            sql.push_str(&generator.quote_identifier(&foreign_key.fk_name));
            sql.push(' ');
        }
        sql.push_str("FOREIGN KEY (");
        sql.push_join(", ", columns.iter().map(|c| generator.quote_identifier(&c.column_name)));
        sql.push_str(") REFERENCES ");
        sql.push_str(&qualified_name(
            generator,
            foreign_key.referenced_namespace(),
            &foreign_key.pk_table_name,
        ));
        sql.push_str(" (");
        sql.push_join(", ", columns.iter().map(|c| generator.quote_identifier(&c.pk_column_name)));
        sql.push_str(");\n");
    }

    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_degrades_outside_the_bound() {
        assert_eq!(decimal_type("DECIMAL", Some(10), Some(2), 30), "DECIMAL(10, 2)");
        assert_eq!(decimal_type("DECIMAL", Some(30), None, 30), "DECIMAL(30, 0)");
        assert_eq!(decimal_type("DECIMAL", Some(40), Some(2), 30), "DECIMAL");
        assert_eq!(decimal_type("DECIMAL", Some(0), Some(2), 30), "DECIMAL");
        assert_eq!(decimal_type("DECIMAL", Some(10), Some(-1), 30), "DECIMAL");
        assert_eq!(decimal_type("NUMBER", None, None, 38), "NUMBER");
    }

    #[test]
    fn bare_literal_defaults_are_quoted() {
        let column = |type_code: i32, default: &str| Column {
            column_name: "c".to_string(),
            data_type: Some(type_code),
            column_def: Some(default.to_string()),
            ..Default::default()
        };

        assert_eq!(default_expression(&column(12, "abc")).as_deref(), Some("'abc'"));
        assert_eq!(default_expression(&column(12, "it's")).as_deref(), Some("'it''s'"));
        assert_eq!(default_expression(&column(12, "'abc'")).as_deref(), Some("'abc'"));
        assert_eq!(default_expression(&column(91, "2020-01-01")).as_deref(), Some("'2020-01-01'"));
        assert_eq!(
            default_expression(&column(93, "CURRENT_TIMESTAMP")).as_deref(),
            Some("CURRENT_TIMESTAMP")
        );
        assert_eq!(default_expression(&column(93, "now()")).as_deref(), Some("now()"));
        assert_eq!(default_expression(&column(4, "0")).as_deref(), Some("0"));
        assert_eq!(default_expression(&column(12, " ")), None);
    }

    #[test]
    fn character_types_need_a_length() {
        let mut column = Column {
            column_name: "name".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            sized_type("VARCHAR", &column),
            Err(DriverError::InvalidArgument(_))
        ));

        column.column_size = Some(50);
        assert_eq!(sized_type("VARCHAR", &column).unwrap(), "VARCHAR(50)");
    }

    #[test]
    fn strips_statement_terminators() {
        assert_eq!(strip_terminator("  select 1 ;  "), "select 1");
        assert_eq!(strip_terminator("select 1"), "select 1");
    }
}
