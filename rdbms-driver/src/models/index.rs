use serde::{Deserialize, Serialize};

use crate::models::{group_key_rows, namespace, BeautifiedPrimaryKey, KeyRow};
use crate::Result;

/// One column of an index, as read from the catalog.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexKey {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    pub non_unique: bool,
    pub index_name: String,
    pub index_type: Option<String>,
    pub ordinal_position: i32,
    pub column_name: String,
    /// `A`, `D`, or absent when the index does not record a direction.
    pub asc_or_desc: Option<String>,
}

impl IndexKey {
    pub fn namespace(&self) -> Option<&str> {
        namespace(self.table_schema.as_deref(), self.table_cat.as_deref())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct BeautifiedIndexKey {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    pub index_name: String,
    pub non_unique: bool,
    pub index_type: Option<String>,
    /// Sorted by ordinal position.
    pub columns: Vec<IndexColumn>,
}

impl BeautifiedIndexKey {
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.column_name.as_str())
    }

    /// An index backs the primary key when it carries the key's name and exactly its columns.
    pub fn is_primary_key(&self, primary_key: Option<&BeautifiedPrimaryKey>) -> bool {
        let Some(pk) = primary_key else {
            return false;
        };

        let mut index_columns: Vec<&str> = self.column_names().collect();
        let mut pk_columns: Vec<&str> = pk.column_names().collect();
        index_columns.sort_unstable();
        pk_columns.sort_unstable();

        pk.pk_name.as_deref() == Some(self.index_name.as_str()) && index_columns == pk_columns
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct IndexColumn {
    pub column_name: String,
    pub ordinal_position: i32,
    pub asc_or_desc: Option<String>,
}

impl KeyRow for IndexKey {
    type Attributes = (Option<String>, Option<String>, String, bool, Option<String>);
    type Column = IndexColumn;

    fn key_name(&self) -> &str {
        &self.index_name
    }

    fn key_seq(&self) -> i32 {
        self.ordinal_position
    }

    fn column_name(&self) -> &str {
        &self.column_name
    }

    fn attributes(&self) -> Self::Attributes {
        (
            self.table_cat.clone(),
            self.table_schema.clone(),
            self.table_name.clone(),
            self.non_unique,
            self.index_type.clone(),
        )
    }

    fn column(&self) -> Self::Column {
        IndexColumn {
            column_name: self.column_name.clone(),
            ordinal_position: self.ordinal_position,
            asc_or_desc: self.asc_or_desc.clone(),
        }
    }
}

pub fn group_index_keys(rows: &[IndexKey]) -> Result<Vec<BeautifiedIndexKey>> {
    let groups = group_key_rows(rows)?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let (table_cat, table_schema, table_name, non_unique, index_type) = group.attributes;

            BeautifiedIndexKey {
                table_cat,
                table_schema,
                table_name,
                index_name: group.key_name,
                non_unique,
                index_type,
                columns: group.columns,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrimaryKeyColumn;

    fn index(name: &str, columns: &[&str]) -> BeautifiedIndexKey {
        BeautifiedIndexKey {
            table_name: "users".to_string(),
            index_name: name.to_string(),
            columns: columns
                .iter()
                .enumerate()
                .map(|(i, c)| IndexColumn {
                    column_name: c.to_string(),
                    ordinal_position: i as i32 + 1,
                    asc_or_desc: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn primary_key(name: &str, columns: &[&str]) -> BeautifiedPrimaryKey {
        BeautifiedPrimaryKey {
            table_name: "users".to_string(),
            pk_name: Some(name.to_string()),
            columns: columns
                .iter()
                .enumerate()
                .map(|(i, c)| PrimaryKeyColumn {
                    column_name: c.to_string(),
                    key_seq: i as i32 + 1,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn recognises_the_primary_key_index() {
        let pk = primary_key("PRIMARY", &["tenant_id", "id"]);

        assert!(index("PRIMARY", &["id", "tenant_id"]).is_primary_key(Some(&pk)));
        assert!(!index("PRIMARY", &["id"]).is_primary_key(Some(&pk)));
        assert!(!index("idx_id", &["tenant_id", "id"]).is_primary_key(Some(&pk)));
        assert!(!index("PRIMARY", &["tenant_id", "id"]).is_primary_key(None));
    }

    #[test]
    fn groups_index_rows() {
        let row = |name: &str, column: &str, pos: i32, non_unique: bool| IndexKey {
            table_name: "users".to_string(),
            index_name: name.to_string(),
            column_name: column.to_string(),
            ordinal_position: pos,
            non_unique,
            ..Default::default()
        };

        let indexes = group_index_keys(&[
            row("uk_email", "email", 1, false),
            row("idx_name", "last_name", 2, true),
            row("idx_name", "first_name", 1, true),
        ])
        .unwrap();

        assert_eq!(indexes.len(), 2);
        assert!(!indexes[0].non_unique);
        assert_eq!(
            indexes[1].column_names().collect::<Vec<_>>(),
            vec!["first_name", "last_name"]
        );
    }
}
