//! Duplicate-key flagging within one table.

use std::collections::BTreeSet;

use tabsync_model::{BusinessKey, Progress, TableSnapshot};

/// Flag duplicate keys in a single forward scan.
///
/// The first occurrence of a repeated key is never flagged; every later
/// occurrence gets the duplicate sentinel. Stale sentinels (rows whose key
/// is no longer duplicated, or whose key went blank) reset to "not
/// started". Returns the number of rows left carrying the sentinel.
pub fn resolve(table: &mut TableSnapshot, key_col: usize, status_col: usize) -> usize {
    let mut seen: BTreeSet<BusinessKey> = BTreeSet::new();
    let mut flagged = 0;
    for row in 0..table.n_rows() {
        let key = BusinessKey::from_cell(table.cell(row, key_col));
        let status = Progress::from_cell(table.cell(row, status_col));
        let is_sentinel = status.as_ref().is_some_and(Progress::is_duplicate);
        match key {
            None => {
                // A blank key cannot be a duplicate of anything.
                if is_sentinel {
                    table.set_cell(row, status_col, Progress::NotStarted.to_cell());
                }
            }
            Some(key) if seen.contains(&key) => {
                if !is_sentinel {
                    table.set_cell(row, status_col, Progress::Duplicate.to_cell());
                }
                flagged += 1;
            }
            Some(key) => {
                seen.insert(key);
                if is_sentinel {
                    table.set_cell(row, status_col, Progress::NotStarted.to_cell());
                }
            }
        }
    }
    flagged
}
