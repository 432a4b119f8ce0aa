use crate::connection::Row;
use crate::connection_wrapper::FromRow;
use crate::models::{Catalog, Column, ForeignKey, IndexKey, JdbcType, PrimaryKey, Schema, Table, TablePartition};
use crate::Result;

// table_cat, table_schema, table_name, table_type, remarks
impl FromRow for Table {
    fn from_row(row: Row) -> Result<Self> {
        Ok(Table {
            table_cat: row.try_get(0)?,
            table_schema: row.try_get(1)?,
            table_name: row.try_get(2)?,
            table_type: row.try_get(3)?,
            remarks: row.try_get(4)?,
            ..Default::default()
        })
    }
}

// table_cat, table_schema, table_name, column_name, data_type, type_name, column_size,
// decimal_digits, nullable, column_def, remarks, ordinal_position
impl FromRow for Column {
    fn from_row(row: Row) -> Result<Self> {
        let type_name: Option<String> = row.try_get(5)?;
        let data_type: Option<i32> = row.try_get(4)?;
        // information_schema style catalogs only know the native name
        let data_type = data_type.or_else(|| {
            type_name
                .as_deref()
                .and_then(JdbcType::from_type_name)
                .map(|t| t.code())
        });
        let column_def: Option<String> = row.try_get(9)?;

        Ok(Column {
            table_cat: row.try_get(0)?,
            table_schema: row.try_get(1)?,
            table_name: row.try_get(2)?,
            column_name: row.try_get(3)?,
            data_type,
            type_name,
            column_size: row.try_get(6)?,
            decimal_digits: row.try_get(7)?,
            nullable: row.try_get(8)?,
            column_def: column_def.map(|d| d.trim().to_string()),
            remarks: row.try_get(10)?,
            ordinal_position: row.try_get(11)?,
        })
    }
}

// table_cat, table_schema, table_name, column_name, key_seq, pk_name
impl FromRow for PrimaryKey {
    fn from_row(row: Row) -> Result<Self> {
        Ok(PrimaryKey {
            table_cat: row.try_get(0)?,
            table_schema: row.try_get(1)?,
            table_name: row.try_get(2)?,
            column_name: row.try_get(3)?,
            key_seq: row.try_get(4)?,
            pk_name: row.try_get(5)?,
        })
    }
}

// pk_table_cat, pk_table_schema, pk_table_name, pk_column_name, fk_table_cat,
// fk_table_schema, fk_table_name, fk_column_name, key_seq, update_rule, delete_rule,
// fk_name, pk_name
impl FromRow for ForeignKey {
    fn from_row(row: Row) -> Result<Self> {
        Ok(ForeignKey {
            pk_table_cat: row.try_get(0)?,
            pk_table_schema: row.try_get(1)?,
            pk_table_name: row.try_get(2)?,
            pk_column_name: row.try_get(3)?,
            fk_table_cat: row.try_get(4)?,
            fk_table_schema: row.try_get(5)?,
            fk_table_name: row.try_get(6)?,
            fk_column_name: row.try_get(7)?,
            key_seq: row.try_get(8)?,
            update_rule: row.try_get(9)?,
            delete_rule: row.try_get(10)?,
            fk_name: row.try_get(11)?,
            pk_name: row.try_get(12)?,
        })
    }
}

// table_cat, table_schema, table_name, non_unique, index_name, index_type,
// ordinal_position, column_name, asc_or_desc
impl FromRow for IndexKey {
    fn from_row(row: Row) -> Result<Self> {
        Ok(IndexKey {
            table_cat: row.try_get(0)?,
            table_schema: row.try_get(1)?,
            table_name: row.try_get(2)?,
            non_unique: row.try_get(3)?,
            index_name: row.try_get(4)?,
            index_type: row.try_get(5)?,
            ordinal_position: row.try_get(6)?,
            column_name: row.try_get(7)?,
            asc_or_desc: row.try_get(8)?,
        })
    }
}

// catalog, schema, remarks, table_count, view_count
impl FromRow for Schema {
    fn from_row(row: Row) -> Result<Self> {
        Ok(Schema {
            catalog: row.try_get(0)?,
            schema: row.try_get(1)?,
            remarks: row.try_get(2)?,
            table_count: row.try_get(3)?,
            view_count: row.try_get(4)?,
        })
    }
}

// partition_name, position, method, expression, row_count
impl FromRow for TablePartition {
    fn from_row(row: Row) -> Result<Self> {
        Ok(TablePartition {
            partition_name: row.try_get(0)?,
            position: row.try_get(1)?,
            method: row.try_get(2)?,
            expression: row.try_get(3)?,
            row_count: row.try_get(4)?,
        })
    }
}

// name, remarks, product_version, schema_count
impl FromRow for Catalog {
    fn from_row(row: Row) -> Result<Self> {
        Ok(Catalog {
            name: row.try_get(0)?,
            remarks: row.try_get(1)?,
            product_version: row.try_get(2)?,
            schema_count: row.try_get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::SqlValue;

    #[test]
    fn column_type_code_is_derived_from_the_name() {
        let row = Row::new(vec![
            "shop".into(),
            SqlValue::Null,
            "users".into(),
            "email".into(),
            SqlValue::Null,
            "VARCHAR".into(),
            SqlValue::Int(255),
            SqlValue::Null,
            "YES".into(),
            "'none' ".into(),
            "Login".into(),
            SqlValue::Int(2),
        ]);

        let column = Column::from_row(row).unwrap();

        assert_eq!(column.data_type, Some(12));
        assert_eq!(column.column_size, Some(255));
        assert!(column.nullable);
        assert_eq!(column.column_def.as_deref(), Some("'none'"));
        assert_eq!(column.namespace(), Some("shop"));
    }
}
