//! Last-write-wins progress synchronization across ledgers, main and
//! master.
//!
//! Authority order: the ledger entry with the newest timestamp feeds the
//! main table; the main table back-feeds stale ledgers; the master simply
//! mirrors the main status. All writes touch only the status, timestamp
//! and editor columns.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::trace;

use tabsync_model::{
    BusinessKey, CellValue, EditorName, LedgerProgressView, MainProgressView, Progress,
    TableSnapshot, WorkbookConfig,
};

use crate::index::KeyedRowIndex;

/// The winning status update for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub progress: Progress,
    pub timestamp: NaiveDateTime,
    pub editor: EditorName,
}

/// Collect, per key, the latest-stamped status across all ledgers.
///
/// Ledgers are examined in the given order; an equal timestamp in a later
/// ledger replaces the earlier one, which makes the tie-break
/// "last-enumerated wins". Rows without a status or timestamp carry no
/// update.
pub fn collect_latest_updates(
    ledgers: &[(EditorName, TableSnapshot)],
    config: &WorkbookConfig,
) -> BTreeMap<BusinessKey, StatusUpdate> {
    let layout = &config.ledger;
    let mut latest: BTreeMap<BusinessKey, StatusUpdate> = BTreeMap::new();
    for (editor, ledger) in ledgers {
        for row in 0..ledger.n_rows() {
            let view = LedgerProgressView::from_row(ledger, row, layout);
            let (Some(key), Some(progress), Some(timestamp)) =
                (view.key, view.progress, view.last_update)
            else {
                continue;
            };
            let replace = latest
                .get(&key)
                .is_none_or(|current| timestamp >= current.timestamp);
            if replace {
                latest.insert(
                    key,
                    StatusUpdate {
                        progress,
                        timestamp,
                        editor: editor.clone(),
                    },
                );
            }
        }
    }
    latest
}

/// Write the winning ledger updates into the main snapshot.
pub fn apply_updates_to_main(
    main: &mut TableSnapshot,
    updates: &BTreeMap<BusinessKey, StatusUpdate>,
    config: &WorkbookConfig,
) {
    let layout = &config.main;
    let index = KeyedRowIndex::build(main, layout.key);
    for (key, update) in updates {
        let Some(row) = index.row(key) else {
            continue;
        };
        trace!(key = %key, status = %update.progress, editor = %update.editor, "ledger update wins");
        main.set_cell(row, layout.progress, update.progress.to_cell());
        main.set_cell(row, layout.last_update, CellValue::DateTime(update.timestamp));
        main.set_cell(
            row,
            layout.progress_editor,
            CellValue::text(update.editor.as_str()),
        );
    }
}

/// Back-propagate main statuses into one ledger.
///
/// A ledger row is overwritten when it has no local timestamp, when the
/// main timestamp is strictly newer, or unconditionally when the main
/// status is the duplicate sentinel and the ledger's is not. The local
/// timestamp is aligned with the main one so the overwrite settles.
pub fn back_propagate(
    main: &TableSnapshot,
    ledger: &mut TableSnapshot,
    config: &WorkbookConfig,
) {
    let main_layout = &config.main;
    let layout = &config.ledger;
    let main_index = KeyedRowIndex::build(main, main_layout.key);
    for row in 0..ledger.n_rows() {
        let view = LedgerProgressView::from_row(ledger, row, layout);
        let Some(key) = view.key else {
            continue;
        };
        let Some(main_row) = main_index.row(&key) else {
            continue;
        };
        let main_view = MainProgressView::from_row(main, main_row, main_layout);
        let Some(main_progress) = main_view.progress else {
            continue;
        };

        let sentinel_wins = main_progress.is_duplicate()
            && view.progress.as_ref().is_none_or(|p| !p.is_duplicate());
        let stale = match (main_view.last_update, view.last_update) {
            (_, None) => true,
            (Some(main_ts), Some(local_ts)) => main_ts > local_ts,
            (None, Some(_)) => false,
        };
        if !(sentinel_wins || stale) {
            continue;
        }
        ledger.set_cell(row, layout.progress, main_progress.to_cell());
        if let Some(main_ts) = main_view.last_update {
            ledger.set_cell(row, layout.last_update, CellValue::DateTime(main_ts));
        }
    }
}

/// Mirror the main status into the master; rows absent a status read as
/// "not started".
pub fn propagate_to_master(
    main: &TableSnapshot,
    master: &mut TableSnapshot,
    config: &WorkbookConfig,
) {
    let main_layout = &config.main;
    let master_layout = &config.master;
    let main_index = KeyedRowIndex::build(main, main_layout.key);
    for row in 0..master.n_rows() {
        let Some(key) = BusinessKey::from_cell(master.cell(row, master_layout.key)) else {
            continue;
        };
        let Some(main_row) = main_index.row(&key) else {
            continue;
        };
        let progress = Progress::from_cell(main.cell(main_row, main_layout.progress))
            .unwrap_or(Progress::NotStarted);
        master.set_cell(row, master_layout.progress, progress.to_cell());
    }
}
