use crate::connection::SqlValue;
use crate::generator::common::qualified_name;
use crate::generator::SqlGenerator;
use crate::models::ShowType;
use crate::session::{DialectCatalog, ShowCreateSource};
use crate::Dialect;

use super::generator::GENERATOR;

/// information_schema queries. A MySQL schema is a database, so objects report it as their
/// catalog and the schema columns stay empty.
#[derive(Debug, Default, Copy, Clone)]
pub struct MysqlCatalog;

impl DialectCatalog for MysqlCatalog {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn schemas_sql(&self) -> &'static str {
        //language=mysql
        r#"
select schema_name
from information_schema.schemata
order by schema_name
"#
    }

    fn tables_sql(&self, with_pattern: bool) -> &'static str {
        if with_pattern {
            //language=mysql
            r#"
select table_schema, null, table_name, 'TABLE', table_comment
from information_schema.tables
where table_schema = coalesce(?, database())
  and table_type = 'BASE TABLE'
  and table_name like ?
order by table_name
"#
        } else {
            //language=mysql
            r#"
select table_schema, null, table_name, 'TABLE', table_comment
from information_schema.tables
where table_schema = coalesce(?, database())
  and table_type = 'BASE TABLE'
order by table_name
"#
        }
    }

    fn views_sql(&self, with_pattern: bool) -> &'static str {
        if with_pattern {
            //language=mysql
            r#"
select table_schema, null, table_name, 'VIEW', null
from information_schema.views
where table_schema = coalesce(?, database())
  and table_name like ?
order by table_name
"#
        } else {
            //language=mysql
            r#"
select table_schema, null, table_name, 'VIEW', null
from information_schema.views
where table_schema = coalesce(?, database())
order by table_name
"#
        }
    }

    fn table_sql(&self) -> &'static str {
        //language=mysql
        r#"
select table_schema,
       null,
       table_name,
       case table_type when 'VIEW' then 'VIEW' else 'TABLE' end,
       table_comment
from information_schema.tables
where table_schema = coalesce(?, database())
  and table_name = ?
"#
    }

    fn columns_sql(&self) -> &'static str {
        //language=mysql
        r#"
select table_schema,
       null,
       table_name,
       column_name,
       null,
       upper(data_type),
       least(coalesce(character_maximum_length, numeric_precision), 2147483647),
       numeric_scale,
       is_nullable,
       column_default,
       column_comment,
       ordinal_position
from information_schema.columns
where table_schema = coalesce(?, database())
  and table_name = ?
order by ordinal_position
"#
    }

    fn primary_key_sql(&self) -> &'static str {
        //language=mysql
        r#"
select table_schema, null, table_name, column_name, ordinal_position, constraint_name
from information_schema.key_column_usage
where table_schema = coalesce(?, database())
  and table_name = ?
  and constraint_name = 'PRIMARY'
order by ordinal_position
"#
    }

    fn foreign_keys_sql(&self) -> &'static str {
        //language=mysql
        r#"
select k.referenced_table_schema,
       null,
       k.referenced_table_name,
       k.referenced_column_name,
       k.table_schema,
       null,
       k.table_name,
       k.column_name,
       k.ordinal_position,
       r.update_rule,
       r.delete_rule,
       k.constraint_name,
       r.unique_constraint_name
from information_schema.key_column_usage k
         join information_schema.referential_constraints r
              on r.constraint_schema = k.constraint_schema and r.constraint_name = k.constraint_name
where k.table_schema = coalesce(?, database())
  and k.table_name = ?
  and k.referenced_table_name is not null
order by k.constraint_name, k.ordinal_position
"#
    }

    fn indexes_sql(&self) -> &'static str {
        //language=mysql
        r#"
select table_schema,
       null,
       table_name,
       non_unique,
       index_name,
       index_type,
       seq_in_index,
       column_name,
       collation
from information_schema.statistics
where table_schema = coalesce(?, database())
  and table_name = ?
  and column_name is not null
order by index_name, seq_in_index
"#
    }

    fn partitions_sql(&self) -> &'static str {
        //language=mysql
        r#"
select partition_name,
       partition_ordinal_position,
       partition_method,
       partition_expression,
       table_rows
from information_schema.partitions
where table_schema = coalesce(?, database())
  and table_name = ?
  and partition_name is not null
  and (subpartition_ordinal_position is null or subpartition_ordinal_position = 1)
order by partition_ordinal_position
"#
    }

    fn schema_extra_sql(&self) -> &'static str {
        //language=mysql
        r#"
select s.schema_name,
       s.schema_name,
       null,
       (select count(*) from information_schema.tables t
        where t.table_schema = s.schema_name and t.table_type = 'BASE TABLE'),
       (select count(*) from information_schema.views v where v.table_schema = s.schema_name)
from information_schema.schemata s
where s.schema_name = coalesce(?, database())
"#
    }

    fn catalog_extra_sql(&self) -> &'static str {
        //language=mysql
        r#"
select coalesce(database(), ''), null, version(), (select count(*) from information_schema.schemata)
"#
    }

    fn current_schema_sql(&self) -> Option<&'static str> {
        None
    }

    fn current_catalog_sql(&self) -> &'static str {
        "select database()"
    }

    fn use_schema_sql(&self, schema: &str) -> String {
        format!("use {}", GENERATOR.quote_identifier(schema))
    }

    fn show_create(&self, schema: Option<&str>, name: &str, show_type: ShowType) -> ShowCreateSource {
        ShowCreateSource::Query {
            sql: format!(
                "show create {} {}",
                show_type.keyword().to_ascii_lowercase(),
                qualified_name(&GENERATOR, schema, name)
            ),
            params: Vec::<SqlValue>::new(),
            // Both variants return the name first and the statement second.
            column: 1,
        }
    }
}
