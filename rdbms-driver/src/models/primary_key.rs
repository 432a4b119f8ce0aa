use serde::{Deserialize, Serialize};

use crate::models::{group_key_rows, namespace, KeyRow};
use crate::{DriverError, Result};

/// One column of a primary key, as read from the catalog.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PrimaryKey {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    pub column_name: String,
    pub key_seq: i32,
    pub pk_name: Option<String>,
}

impl PrimaryKey {
    pub fn namespace(&self) -> Option<&str> {
        namespace(self.table_schema.as_deref(), self.table_cat.as_deref())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct BeautifiedPrimaryKey {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    pub pk_name: Option<String>,
    /// Sorted by key sequence.
    pub columns: Vec<PrimaryKeyColumn>,
}

impl BeautifiedPrimaryKey {
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.column_name.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct PrimaryKeyColumn {
    pub column_name: String,
    pub key_seq: i32,
}

impl KeyRow for PrimaryKey {
    type Attributes = (Option<String>, Option<String>, String);
    type Column = PrimaryKeyColumn;

    fn key_name(&self) -> &str {
        self.pk_name.as_deref().unwrap_or_default()
    }

    fn key_seq(&self) -> i32 {
        self.key_seq
    }

    fn column_name(&self) -> &str {
        &self.column_name
    }

    fn attributes(&self) -> Self::Attributes {
        (
            self.table_cat.clone(),
            self.table_schema.clone(),
            self.table_name.clone(),
        )
    }

    fn column(&self) -> Self::Column {
        PrimaryKeyColumn {
            column_name: self.column_name.clone(),
            key_seq: self.key_seq,
        }
    }
}

/// Groups the primary key rows of one table. A table has at most one primary key, so
/// rows naming more than one key are rejected.
pub fn group_primary_key(rows: &[PrimaryKey]) -> Result<Option<BeautifiedPrimaryKey>> {
    let mut groups = group_key_rows(rows)?.into_iter();

    let Some(group) = groups.next() else {
        return Ok(None);
    };

    if let Some(other) = groups.next() {
        return Err(DriverError::InconsistentKeyAttributes {
            key_name: other.key_name,
        });
    }

    let (table_cat, table_schema, table_name) = group.attributes;

    Ok(Some(BeautifiedPrimaryKey {
        table_cat,
        table_schema,
        table_name,
        pk_name: Some(group.key_name).filter(|n| !n.is_empty()),
        columns: group.columns,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk_row(column: &str, seq: i32) -> PrimaryKey {
        PrimaryKey {
            table_cat: Some("shop".to_string()),
            table_name: "orders".to_string(),
            column_name: column.to_string(),
            key_seq: seq,
            pk_name: Some("PRIMARY".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn composite_key_is_sorted_by_sequence() {
        let pk = group_primary_key(&[pk_row("line_no", 2), pk_row("order_id", 1)])
            .unwrap()
            .unwrap();

        assert_eq!(pk.pk_name.as_deref(), Some("PRIMARY"));
        assert_eq!(pk.table_cat.as_deref(), Some("shop"));
        assert_eq!(pk.column_names().collect::<Vec<_>>(), vec!["order_id", "line_no"]);
    }

    #[test]
    fn no_rows_no_key() {
        assert_eq!(group_primary_key(&[]).unwrap(), None);
    }

    #[test]
    fn two_key_names_are_rejected() {
        let mut other = pk_row("id", 1);
        other.pk_name = Some("PK_OTHER".to_string());

        let err = group_primary_key(&[pk_row("order_id", 1), other]).unwrap_err();
        assert!(matches!(err, DriverError::InconsistentKeyAttributes { key_name } if key_name == "PK_OTHER"));
    }
}
