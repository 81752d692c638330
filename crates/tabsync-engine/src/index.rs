//! Key-to-row mapping over one table snapshot.

use std::collections::BTreeMap;

use tabsync_model::{BusinessKey, TableSnapshot};

/// Maps each business key in a snapshot to a row index.
///
/// Blank keys are excluded. When a key occurs more than once the last
/// occurrence wins; callers needing duplicate detection use the duplicate
/// resolver, not this index.
#[derive(Debug, Clone, Default)]
pub struct KeyedRowIndex {
    map: BTreeMap<BusinessKey, usize>,
}

impl KeyedRowIndex {
    pub fn build(table: &TableSnapshot, key_col: usize) -> Self {
        let mut map = BTreeMap::new();
        for (row, _) in table.rows.iter().enumerate() {
            if let Some(key) = BusinessKey::from_cell(table.cell(row, key_col)) {
                map.insert(key, row);
            }
        }
        Self { map }
    }

    pub fn row(&self, key: &BusinessKey) -> Option<usize> {
        self.map.get(key).copied()
    }

    pub fn contains(&self, key: &BusinessKey) -> bool {
        self.map.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &BusinessKey> {
        self.map.keys()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsync_model::CellValue;

    #[test]
    fn blank_keys_are_excluded_and_last_occurrence_wins() {
        let table = TableSnapshot::with_rows(
            "Main",
            vec![
                vec![CellValue::text("K-1")],
                vec![CellValue::Blank],
                vec![CellValue::text(" K-1 ")],
                vec![CellValue::text("K-2")],
            ],
        );
        let index = KeyedRowIndex::build(&table, 0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.row(&BusinessKey::new("K-1").unwrap()), Some(2));
        assert_eq!(index.row(&BusinessKey::new("K-2").unwrap()), Some(3));
    }
}
