//! Workbook backups and per-series folder provisioning via the document
//! store. Failures here are per-item: one bad folder or file is logged
//! and the rest of the run continues.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use tabsync_model::{MasterRecord, TableSnapshot, WorkbookConfig};
use tabsync_store::{DocumentStore, FileId, FolderId};

use crate::error::Result;
use crate::link::series_code;

pub const BACKUP_FOLDER_NAME: &str = "Backups";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub created: String,
    pub trashed: usize,
}

/// Copy the workbook into the backup folder under a date-stamped name and
/// prune copies older than `retain_days`.
pub fn backup_workbook(
    docs: &mut dyn DocumentStore,
    source: &FileId,
    parent: &FolderId,
    workbook_name: &str,
    today: NaiveDate,
    retain_days: u64,
) -> Result<BackupOutcome> {
    let folder = docs.find_or_create_folder(parent, BACKUP_FOLDER_NAME)?;
    let name = format!("{workbook_name} {today}");
    let created = docs.copy_file(source, &name, &folder)?;
    debug!(backup = %name, "created workbook backup");

    let cutoff = today
        .checked_sub_days(Days::new(retain_days))
        .unwrap_or(today);
    let mut trashed = 0;
    for file in docs.list_files(&folder)? {
        if file.id == created || file.created >= cutoff {
            continue;
        }
        match docs.trash(&file.id) {
            Ok(()) => trashed += 1,
            Err(error) => warn!(file = %file.name, %error, "failed to trash old backup"),
        }
    }
    Ok(BackupOutcome { created: name, trashed })
}

/// Ensure one folder per derived series code under `parent`, named
/// `<code> <model>`. Rows without a derivable code are skipped. Returns
/// the number of rows that resolved to a folder.
pub fn ensure_series_folders(
    docs: &mut dyn DocumentStore,
    parent: &FolderId,
    master: &TableSnapshot,
    config: &WorkbookConfig,
) -> Result<usize> {
    let mut ensured = 0;
    for row in 0..master.n_rows() {
        let record = MasterRecord::from_row(master, row, &config.master);
        let key = record.key.as_ref().map(|k| k.as_str().to_string());
        let Some(code) = series_code(&record.model, key.as_deref()) else {
            continue;
        };
        let name = format!("{code} {}", record.model.trim());
        match docs.find_or_create_folder(parent, &name) {
            Ok(_) => ensured += 1,
            // Partial success: keep going for the other rows.
            Err(error) => warn!(folder = %name, %error, "failed to ensure series folder"),
        }
    }
    Ok(ensured)
}
