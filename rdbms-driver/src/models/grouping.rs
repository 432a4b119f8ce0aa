use std::collections::HashSet;

use itertools::Itertools;

use crate::{DriverError, Result};

/// One row of flat key metadata: a single column's participation in a named key.
pub trait KeyRow {
    /// Key level attributes. Every row of one key must agree on them.
    type Attributes: PartialEq;
    /// The per-column data kept in the grouped key.
    type Column;

    fn key_name(&self) -> &str;
    fn key_seq(&self) -> i32;
    fn column_name(&self) -> &str;
    fn attributes(&self) -> Self::Attributes;
    fn column(&self) -> Self::Column;
}

/// All rows of one key, with the columns in key sequence order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KeyGroup<A, C> {
    pub key_name: String,
    pub attributes: A,
    pub columns: Vec<C>,
}

/// Groups flat key rows by key name.
///
/// Keys come out in the order their name was first seen. Within a key the columns are
/// sorted by key sequence. Rows of one key that disagree on key level attributes, repeat
/// a column or repeat a key sequence are rejected.
pub fn group_key_rows<R: KeyRow>(rows: &[R]) -> Result<Vec<KeyGroup<R::Attributes, R::Column>>> {
    let mut partitions: Vec<(&str, R::Attributes, Vec<&R>)> = Vec::new();

    for row in rows {
        let attributes = row.attributes();

        match partitions
            .iter()
            .position(|(name, _, _)| *name == row.key_name())
        {
            Some(i) => {
                let (_, expected, members) = &mut partitions[i];
                if *expected != attributes {
                    return Err(DriverError::InconsistentKeyAttributes {
                        key_name: row.key_name().to_string(),
                    });
                }
                members.push(row);
            }
            None => partitions.push((row.key_name(), attributes, vec![row])),
        }
    }

    partitions
        .into_iter()
        .map(|(key_name, attributes, members)| {
            let members = members
                .into_iter()
                .sorted_by_key(|m| m.key_seq())
                .collect_vec();

            if let Some((a, _)) = members
                .iter()
                .tuple_windows()
                .find(|(a, b)| a.key_seq() == b.key_seq())
            {
                return Err(DriverError::DuplicateKeySequence {
                    key_name: key_name.to_string(),
                    key_seq: a.key_seq(),
                });
            }

            let mut seen = HashSet::new();
            if let Some(duplicate) = members.iter().find(|m| !seen.insert(m.column_name())) {
                return Err(DriverError::DuplicateKeyColumn {
                    key_name: key_name.to_string(),
                    column_name: duplicate.column_name().to_string(),
                });
            }

            Ok(KeyGroup {
                key_name: key_name.to_string(),
                attributes,
                columns: members.iter().map(|m| m.column()).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRow {
        key: &'static str,
        seq: i32,
        column: &'static str,
        unique: bool,
    }

    impl KeyRow for TestRow {
        type Attributes = bool;
        type Column = (&'static str, i32);

        fn key_name(&self) -> &str {
            self.key
        }

        fn key_seq(&self) -> i32 {
            self.seq
        }

        fn column_name(&self) -> &str {
            self.column
        }

        fn attributes(&self) -> Self::Attributes {
            self.unique
        }

        fn column(&self) -> Self::Column {
            (self.column, self.seq)
        }
    }

    fn row(key: &'static str, seq: i32, column: &'static str) -> TestRow {
        TestRow {
            key,
            seq,
            column,
            unique: true,
        }
    }

    #[test]
    fn groups_by_key_in_first_seen_order() {
        let rows = vec![
            row("idx_b", 2, "y"),
            row("idx_a", 1, "a"),
            row("idx_b", 1, "x"),
            row("idx_a", 3, "c"),
            row("idx_a", 2, "b"),
        ];

        let groups = group_key_rows(&rows).unwrap();

        assert_eq!(
            groups,
            vec![
                KeyGroup {
                    key_name: "idx_b".to_string(),
                    attributes: true,
                    columns: vec![("x", 1), ("y", 2)],
                },
                KeyGroup {
                    key_name: "idx_a".to_string(),
                    attributes: true,
                    columns: vec![("a", 1), ("b", 2), ("c", 3)],
                },
            ]
        );
    }

    #[test]
    fn every_group_is_strictly_increasing_without_duplicate_columns() {
        let names = ["k1", "k2", "k3"];
        let columns = ["c0", "c1", "c2", "c3", "c4", "c5"];
        let rows = (0..18)
            .map(|i| TestRow {
                key: names[i % 3],
                seq: (17 - i as i32) / 3 + 1,
                column: columns[(17 - i) / 3],
                unique: false,
            })
            .collect_vec();

        let groups = group_key_rows(&rows).unwrap();

        assert_eq!(groups.len(), 3);
        for group in groups {
            assert!(group.columns.windows(2).all(|w| w[0].1 < w[1].1));
            assert_eq!(group.columns.iter().map(|c| c.0).unique().count(), group.columns.len());
            assert_eq!(group.columns.len(), 6);
        }
    }

    #[test]
    fn rejects_inconsistent_attributes() {
        let rows = vec![
            row("idx", 1, "a"),
            TestRow {
                key: "idx",
                seq: 2,
                column: "b",
                unique: false,
            },
        ];

        let err = group_key_rows(&rows).unwrap_err();
        assert!(matches!(err, DriverError::InconsistentKeyAttributes { key_name } if key_name == "idx"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = group_key_rows(&[row("pk", 1, "a"), row("pk", 1, "b")]).unwrap_err();
        assert!(matches!(err, DriverError::DuplicateKeySequence { key_seq: 1, .. }));

        let err = group_key_rows(&[row("pk", 1, "a"), row("pk", 2, "a")]).unwrap_err();
        assert!(matches!(err, DriverError::DuplicateKeyColumn { column_name, .. } if column_name == "a"));
    }

    #[test]
    fn empty_input_gives_no_groups() {
        let rows: Vec<TestRow> = vec![];
        assert!(group_key_rows(&rows).unwrap().is_empty());
    }
}
