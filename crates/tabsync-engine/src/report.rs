//! Outcome summary of one dispatch/sweep run, for logging and the CLI.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct TableReport {
    pub table: String,
    pub rows: usize,
    /// Whether the sweep wrote this table's body back.
    pub wrote: bool,
    /// Rows carrying the duplicate sentinel after resolution.
    pub duplicates: usize,
    /// Ledger rows whose key is absent from the main table.
    pub orphans: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Which dispatch branch ran, for humans reading the log.
    pub trigger: String,
    /// True when the event carried no usable range and nothing ran.
    pub skipped: bool,
    /// Writes performed by the immediate reaction, before the sweep.
    pub pre_writes: usize,
    pub tables: Vec<TableReport>,
}

impl SyncReport {
    pub fn skipped(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            skipped: true,
            ..Self::default()
        }
    }

    pub fn total_duplicates(&self) -> usize {
        self.tables.iter().map(|t| t.duplicates).sum()
    }

    pub fn total_orphans(&self) -> usize {
        self.tables.iter().map(|t| t.orphans).sum()
    }
}
