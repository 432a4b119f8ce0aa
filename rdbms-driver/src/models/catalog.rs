use serde::{Deserialize, Serialize};

/// A catalog (database) as seen from the current session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub name: String,
    pub remarks: Option<String>,
    pub product_version: Option<String>,
    pub schema_count: i64,
}

/// A schema with the counts of the objects inside it.
///
/// `catalog` is absent for dialects that have no catalog concept.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    pub catalog: Option<String>,
    pub schema: String,
    pub remarks: Option<String>,
    pub table_count: i64,
    pub view_count: i64,
}
