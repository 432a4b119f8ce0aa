use crate::generator::SqlGenerator;
use crate::models::ShowType;
use crate::session::{DialectCatalog, ShowCreateSource};
use crate::Dialect;

use super::generator::GENERATOR;

/// Queries against the `ALL_*` dictionary views. Oracle schemas are users and there is no
/// catalog level, so catalog columns are always NULL.
#[derive(Debug, Default, Copy, Clone)]
pub struct OracleCatalog;

impl DialectCatalog for OracleCatalog {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn schemas_sql(&self) -> &'static str {
        //language=oracle
        r#"
select username
from all_users
order by username
"#
    }

    fn tables_sql(&self, with_pattern: bool) -> &'static str {
        if with_pattern {
            //language=oracle
            r#"
select null, t.owner, t.table_name, 'TABLE', c.comments
from all_tables t
         left join all_tab_comments c on c.owner = t.owner and c.table_name = t.table_name
where t.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and t.table_name like :2
order by t.table_name
"#
        } else {
            //language=oracle
            r#"
select null, t.owner, t.table_name, 'TABLE', c.comments
from all_tables t
         left join all_tab_comments c on c.owner = t.owner and c.table_name = t.table_name
where t.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
order by t.table_name
"#
        }
    }

    fn views_sql(&self, with_pattern: bool) -> &'static str {
        if with_pattern {
            //language=oracle
            r#"
select null, v.owner, v.view_name, 'VIEW', c.comments
from all_views v
         left join all_tab_comments c on c.owner = v.owner and c.table_name = v.view_name
where v.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and v.view_name like :2
order by v.view_name
"#
        } else {
            //language=oracle
            r#"
select null, v.owner, v.view_name, 'VIEW', c.comments
from all_views v
         left join all_tab_comments c on c.owner = v.owner and c.table_name = v.view_name
where v.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
order by v.view_name
"#
        }
    }

    fn table_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null, c.owner, c.table_name, c.table_type, c.comments
from all_tab_comments c
where c.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and c.table_name = :2
"#
    }

    fn columns_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null,
       c.owner,
       c.table_name,
       c.column_name,
       null,
       c.data_type,
       case when c.data_type in ('NUMBER', 'FLOAT') then c.data_precision else c.char_length end,
       c.data_scale,
       case c.nullable when 'Y' then 1 else 0 end,
       c.data_default,
       m.comments,
       c.column_id
from all_tab_columns c
         left join all_col_comments m
                   on m.owner = c.owner and m.table_name = c.table_name and m.column_name = c.column_name
where c.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and c.table_name = :2
order by c.column_id
"#
    }

    fn primary_key_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null, c.owner, c.table_name, cc.column_name, cc.position, c.constraint_name
from all_constraints c
         join all_cons_columns cc on cc.owner = c.owner and cc.constraint_name = c.constraint_name
where c.constraint_type = 'P'
  and c.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and c.table_name = :2
order by cc.position
"#
    }

    fn foreign_keys_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null,
       r.owner,
       r.table_name,
       rc.column_name,
       null,
       c.owner,
       c.table_name,
       cc.column_name,
       cc.position,
       null,
       c.delete_rule,
       c.constraint_name,
       c.r_constraint_name
from all_constraints c
         join all_cons_columns cc on cc.owner = c.owner and cc.constraint_name = c.constraint_name
         join all_constraints r on r.owner = c.r_owner and r.constraint_name = c.r_constraint_name
         join all_cons_columns rc
              on rc.owner = r.owner and rc.constraint_name = r.constraint_name and rc.position = cc.position
where c.constraint_type = 'R'
  and c.owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and c.table_name = :2
order by c.constraint_name, cc.position
"#
    }

    fn indexes_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null,
       i.table_owner,
       i.table_name,
       case i.uniqueness when 'UNIQUE' then 0 else 1 end,
       i.index_name,
       i.index_type,
       ic.column_position,
       ic.column_name,
       substr(ic.descend, 1, 1)
from all_indexes i
         join all_ind_columns ic on ic.index_owner = i.owner and ic.index_name = i.index_name
where i.table_owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and i.table_name = :2
order by i.index_name, ic.column_position
"#
    }

    fn partitions_sql(&self) -> &'static str {
        //language=oracle
        r#"
select p.partition_name,
       p.partition_position,
       t.partitioning_type,
       (select listagg(k.column_name, ', ') within group (order by k.column_position)
        from all_part_key_columns k
        where k.owner = p.table_owner
          and k.name = p.table_name
          and k.object_type = 'TABLE'),
       p.num_rows
from all_tab_partitions p
         join all_part_tables t on t.owner = p.table_owner and t.table_name = p.table_name
where p.table_owner = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
  and p.table_name = :2
order by p.partition_position
"#
    }

    fn schema_extra_sql(&self) -> &'static str {
        //language=oracle
        r#"
select null,
       u.username,
       null,
       (select count(*) from all_tables t where t.owner = u.username),
       (select count(*) from all_views v where v.owner = u.username)
from all_users u
where u.username = coalesce(:1, sys_context('USERENV', 'CURRENT_SCHEMA'))
"#
    }

    fn catalog_extra_sql(&self) -> &'static str {
        //language=oracle
        r#"
select sys_context('USERENV', 'DB_NAME'),
       null,
       (select version from product_component_version where product like 'Oracle%' and rownum = 1),
       (select count(*) from all_users)
from dual
"#
    }

    fn current_schema_sql(&self) -> Option<&'static str> {
        Some("select sys_context('USERENV', 'CURRENT_SCHEMA') from dual")
    }

    fn current_catalog_sql(&self) -> &'static str {
        "select sys_context('USERENV', 'DB_NAME') from dual"
    }

    fn use_schema_sql(&self, schema: &str) -> String {
        format!("alter session set current_schema = {}", GENERATOR.quote_identifier(schema))
    }

    fn show_create(&self, schema: Option<&str>, name: &str, show_type: ShowType) -> ShowCreateSource {
        ShowCreateSource::Query {
            sql: "select dbms_metadata.get_ddl(:1, :2, :3) from dual".to_string(),
            params: vec![show_type.keyword().into(), name.into(), schema.into()],
            column: 0,
        }
    }
}
