use serde::{Deserialize, Serialize};

use crate::models::{group_key_rows, namespace, KeyRow};
use crate::Result;

/// One column pair of a foreign key, as read from the catalog. The `pk_` side is the
/// referenced table, the `fk_` side the referencing one.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ForeignKey {
    pub pk_table_cat: Option<String>,
    pub pk_table_schema: Option<String>,
    pub pk_table_name: String,
    pub pk_column_name: String,
    pub fk_table_cat: Option<String>,
    pub fk_table_schema: Option<String>,
    pub fk_table_name: String,
    pub fk_column_name: String,
    pub key_seq: i32,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
    pub fk_name: String,
    pub pk_name: Option<String>,
}

impl ForeignKey {
    pub fn namespace(&self) -> Option<&str> {
        namespace(self.fk_table_schema.as_deref(), self.fk_table_cat.as_deref())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct BeautifiedForeignKey {
    pub fk_name: String,
    pub fk_table_cat: Option<String>,
    pub fk_table_schema: Option<String>,
    pub fk_table_name: String,
    pub pk_table_cat: Option<String>,
    pub pk_table_schema: Option<String>,
    pub pk_table_name: String,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
    /// Sorted by key sequence.
    pub columns: Vec<ForeignKeyColumn>,
}

impl BeautifiedForeignKey {
    /// Where the referenced table lives, falling back to its catalog.
    pub fn referenced_namespace(&self) -> Option<&str> {
        namespace(self.pk_table_schema.as_deref(), self.pk_table_cat.as_deref())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct ForeignKeyColumn {
    pub column_name: String,
    pub pk_column_name: String,
    pub key_seq: i32,
}

type ForeignKeyAttributes = (
    (Option<String>, Option<String>, String),
    (Option<String>, Option<String>, String),
    Option<String>,
    Option<String>,
);

impl KeyRow for ForeignKey {
    type Attributes = ForeignKeyAttributes;
    type Column = ForeignKeyColumn;

    fn key_name(&self) -> &str {
        &self.fk_name
    }

    fn key_seq(&self) -> i32 {
        self.key_seq
    }

    fn column_name(&self) -> &str {
        &self.fk_column_name
    }

    fn attributes(&self) -> Self::Attributes {
        (
            (
                self.fk_table_cat.clone(),
                self.fk_table_schema.clone(),
                self.fk_table_name.clone(),
            ),
            (
                self.pk_table_cat.clone(),
                self.pk_table_schema.clone(),
                self.pk_table_name.clone(),
            ),
            self.update_rule.clone(),
            self.delete_rule.clone(),
        )
    }

    fn column(&self) -> Self::Column {
        ForeignKeyColumn {
            column_name: self.fk_column_name.clone(),
            pk_column_name: self.pk_column_name.clone(),
            key_seq: self.key_seq,
        }
    }
}

pub fn group_foreign_keys(rows: &[ForeignKey]) -> Result<Vec<BeautifiedForeignKey>> {
    let groups = group_key_rows(rows)?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let ((fk_table_cat, fk_table_schema, fk_table_name), (pk_table_cat, pk_table_schema, pk_table_name), update_rule, delete_rule) =
                group.attributes;

            BeautifiedForeignKey {
                fk_name: group.key_name,
                fk_table_cat,
                fk_table_schema,
                fk_table_name,
                pk_table_cat,
                pk_table_schema,
                pk_table_name,
                update_rule,
                delete_rule,
                columns: group.columns,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk_row(name: &str, column: &str, referenced: &str, seq: i32) -> ForeignKey {
        ForeignKey {
            pk_table_cat: Some("shop".to_string()),
            pk_table_name: "parent".to_string(),
            pk_column_name: referenced.to_string(),
            fk_table_cat: Some("shop".to_string()),
            fk_table_name: "child".to_string(),
            fk_column_name: column.to_string(),
            key_seq: seq,
            fk_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn groups_composite_foreign_keys() {
        let fks = group_foreign_keys(&[
            fk_row("fk_parent", "a", "x", 2),
            fk_row("fk_other", "o", "p", 1),
            fk_row("fk_parent", "b", "y", 1),
        ])
        .unwrap();

        assert_eq!(fks.len(), 2);
        assert_eq!(fks[0].fk_name, "fk_parent");
        assert_eq!(
            fks[0].columns,
            vec![
                ForeignKeyColumn {
                    column_name: "b".to_string(),
                    pk_column_name: "y".to_string(),
                    key_seq: 1,
                },
                ForeignKeyColumn {
                    column_name: "a".to_string(),
                    pk_column_name: "x".to_string(),
                    key_seq: 2,
                },
            ]
        );
        assert_eq!(fks[0].referenced_namespace(), Some("shop"));
        assert_eq!(fks[1].fk_name, "fk_other");
    }

    #[test]
    fn referenced_table_must_agree() {
        let mut second = fk_row("fk_parent", "b", "y", 2);
        second.pk_table_name = "elsewhere".to_string();

        assert!(group_foreign_keys(&[fk_row("fk_parent", "a", "x", 1), second]).is_err());
    }
}
