use serde::{Deserialize, Serialize};

use crate::models::{namespace, JdbcType};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Column {
    pub table_cat: Option<String>,
    pub table_schema: Option<String>,
    pub table_name: String,
    pub column_name: String,
    /// `java.sql.Types` code.
    pub data_type: Option<i32>,
    /// The dialect's own name for the type, without size.
    pub type_name: Option<String>,
    pub column_size: Option<i32>,
    pub decimal_digits: Option<i32>,
    pub nullable: bool,
    pub column_def: Option<String>,
    pub remarks: Option<String>,
    pub ordinal_position: i32,
}

impl Default for Column {
    fn default() -> Self {
        Column {
            table_cat: None,
            table_schema: None,
            table_name: String::new(),
            column_name: String::new(),
            data_type: None,
            type_name: None,
            column_size: None,
            decimal_digits: None,
            nullable: true,
            column_def: None,
            remarks: None,
            ordinal_position: 0,
        }
    }
}

impl Column {
    pub fn namespace(&self) -> Option<&str> {
        namespace(self.table_schema.as_deref(), self.table_cat.as_deref())
    }

    pub fn jdbc_type(&self) -> Option<JdbcType> {
        self.data_type.and_then(JdbcType::from_code)
    }

    /// The remark, if there is one worth writing.
    pub fn remark(&self) -> Option<&str> {
        self.remarks.as_deref().filter(|r| !r.is_empty())
    }
}
