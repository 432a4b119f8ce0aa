use serde::{Deserialize, Serialize};

/// One partition of a partitioned table.
///
/// `method` and `expression` describe how the table is partitioned, so they repeat on
/// every partition of the same table. Unpartitioned tables have no partitions at all.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct TablePartition {
    pub partition_name: String,
    /// One based.
    pub position: i32,
    pub method: Option<String>,
    pub expression: Option<String>,
    /// The row count from the catalog statistics, which may be stale.
    pub row_count: Option<i64>,
}
