//! Duplicate-key flagging: later occurrences only, stale flags released.

use std::collections::BTreeSet;

use proptest::prelude::*;

use tabsync_engine::duplicate::resolve;
use tabsync_model::{CellValue, TableSnapshot};

const KEY: usize = 0;
const STATUS: usize = 1;

fn table(rows: &[(&str, &str)]) -> TableSnapshot {
    TableSnapshot::with_rows(
        "Main",
        rows.iter()
            .map(|(key, status)| {
                vec![CellValue::from_input(key), CellValue::from_input(status)]
            })
            .collect(),
    )
}

fn status(table: &TableSnapshot, row: usize) -> String {
    table.cell(row, STATUS).as_text()
}

#[test]
fn only_later_occurrences_are_flagged() {
    let mut t = table(&[("A", ""), ("B", ""), ("A", ""), ("A", "")]);
    assert_eq!(resolve(&mut t, KEY, STATUS), 2);
    assert_eq!(status(&t, 0), "");
    assert_eq!(status(&t, 1), "");
    assert_eq!(status(&t, 2), "Duplicate");
    assert_eq!(status(&t, 3), "Duplicate");
}

#[test]
fn stale_sentinel_resets_when_the_key_is_unique_again() {
    let mut t = table(&[("A", "Duplicate"), ("B", "Done")]);
    assert_eq!(resolve(&mut t, KEY, STATUS), 0);
    assert_eq!(status(&t, 0), "Not started");
    assert_eq!(status(&t, 1), "Done");
}

#[test]
fn sentinel_on_a_blanked_key_resets() {
    let mut t = table(&[("", "Duplicate"), ("A", "In progress")]);
    assert_eq!(resolve(&mut t, KEY, STATUS), 0);
    assert_eq!(status(&t, 0), "Not started");
    assert_eq!(status(&t, 1), "In progress");
}

#[test]
fn already_flagged_repeats_stay_flagged_and_are_counted() {
    let mut t = table(&[("A", "Done"), ("A", "Duplicate")]);
    assert_eq!(resolve(&mut t, KEY, STATUS), 1);
    assert_eq!(status(&t, 0), "Done");
    assert_eq!(status(&t, 1), "Duplicate");
}

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(
        ["", "K-1", "K-2", "K-3", "K-4"]
            .map(String::from)
            .to_vec(),
    )
}

fn status_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(
        ["", "Not started", "In progress", "Done", "Duplicate"]
            .map(String::from)
            .to_vec(),
    )
}

proptest! {
    /// A row carries the sentinel after resolution exactly when its
    /// non-blank key already occurred above it, whatever statuses were
    /// entered beforehand.
    #[test]
    fn sentinel_marks_exactly_the_repeats(
        rows in proptest::collection::vec((key_strategy(), status_strategy()), 0..24)
    ) {
        let mut t = TableSnapshot::with_rows(
            "Main",
            rows.iter()
                .map(|(key, status)| {
                    vec![CellValue::from_input(key), CellValue::from_input(status)]
                })
                .collect(),
        );
        let flagged = resolve(&mut t, KEY, STATUS);

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut expected = 0;
        for (row, (key, _)) in rows.iter().enumerate() {
            let is_sentinel = t.cell(row, STATUS).as_text() == "Duplicate";
            if key.is_empty() {
                prop_assert!(!is_sentinel);
            } else if seen.contains(key.as_str()) {
                prop_assert!(is_sentinel);
                expected += 1;
            } else {
                seen.insert(key.as_str());
                prop_assert!(!is_sentinel);
            }
        }
        prop_assert_eq!(flagged, expected);

        // Resolution is idempotent.
        let settled = t.clone();
        resolve(&mut t, KEY, STATUS);
        prop_assert_eq!(t, settled);
    }
}
