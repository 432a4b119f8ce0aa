use serde::{Deserialize, Serialize};

/// Which object a "show create" statement should describe.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShowType {
    Table,
    View,
}

impl ShowType {
    pub fn keyword(&self) -> &'static str {
        match self {
            ShowType::Table => "TABLE",
            ShowType::View => "VIEW",
        }
    }
}
