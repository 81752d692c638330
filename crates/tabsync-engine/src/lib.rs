//! Multi-table reconciliation engine.
//!
//! Keeps a master table, a main (aggregation) table and a set of
//! per-editor ledgers consistent under manual edits: keyed projection
//! with manual-field preservation, ledger regeneration, last-write-wins
//! progress sync, duplicate flagging, and a fixed sweep dispatched from
//! edit events.

pub mod addr;
pub mod backup;
pub mod dispatch;
pub mod duplicate;
pub mod error;
pub mod index;
pub mod ledger;
pub mod link;
pub mod progress;
pub mod projector;
pub mod report;
pub mod schedule;
pub mod sweep;

pub use backup::{BACKUP_FOLDER_NAME, BackupOutcome, backup_workbook, ensure_series_folders};
pub use dispatch::{CellRange, EditEvent, apply_event, body_relative, run_full_sync};
pub use error::{Result, SyncError};
pub use index::KeyedRowIndex;
pub use ledger::{append_month_columns, day_dates, rebuild, refresh_total_labor};
pub use link::{hyperlink_formula, hyperlink_label, hyperlink_target, series_code};
pub use progress::{
    StatusUpdate, apply_updates_to_main, back_propagate, collect_latest_updates,
    propagate_to_master,
};
pub use projector::project;
pub use report::{SyncReport, TableReport};
pub use schedule::sync_assembly_dates;
pub use sweep::run_sweep;
