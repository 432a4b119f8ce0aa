use serde::{Deserialize, Serialize};

use crate::models::{namespace, BeautifiedForeignKey, BeautifiedIndexKey, BeautifiedPrimaryKey, Column};

/// A table snapshot with everything needed to recreate it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Table {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    /// `TABLE` or `VIEW`, as the catalog reports it.
    pub table_type: Option<String>,
    pub remarks: Option<String>,
    /// Ordered by ordinal position.
    pub columns: Vec<Column>,
    pub primary_key: Option<BeautifiedPrimaryKey>,
    pub foreign_keys: Vec<BeautifiedForeignKey>,
    pub index_keys: Vec<BeautifiedIndexKey>,
}

impl Table {
    pub fn new(table_name: &str) -> Self {
        Table {
            table_name: table_name.to_string(),
            ..Default::default()
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        namespace(self.table_schema.as_deref(), self.table_cat.as_deref())
    }

    pub fn remark(&self) -> Option<&str> {
        self.remarks.as_deref().filter(|r| !r.is_empty())
    }
}
