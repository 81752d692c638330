//! Maps one edit event onto the reconciliation sequence.
//!
//! The dispatcher holds no state between invocations; the tables are the
//! only persistent state. Each branch does its immediate reaction, then
//! the fixed sweep runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use tabsync_model::{BusinessKey, CellValue, EditorName, WorkbookConfig};
use tabsync_store::TabularStore;

use crate::error::Result;
use crate::index::KeyedRowIndex;
use crate::ledger::{rebuild, refresh_total_labor};
use crate::progress::{apply_updates_to_main, collect_latest_updates};
use crate::projector::project;
use crate::report::SyncReport;
use crate::schedule::sync_assembly_dates;
use crate::sweep::{run_sweep, write_body_if_changed};

/// The edited cell block, body-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub row: usize,
    pub col: usize,
    pub n_rows: usize,
    pub n_cols: usize,
}

impl CellRange {
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            n_rows: 1,
            n_cols: 1,
        }
    }

    pub fn covers_col(&self, col: usize) -> bool {
        col >= self.col && col < self.col + self.n_cols
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.row..self.row + self.n_rows
    }
}

/// An edit as reported by the host: which table, which cells.
///
/// A missing range means the host gave no usable context; the event is
/// silently ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub table: String,
    pub range: Option<CellRange>,
}

impl EditEvent {
    pub fn new(table: impl Into<String>, range: CellRange) -> Self {
        Self {
            table: table.into(),
            range: Some(range),
        }
    }
}

/// React to one edit event, then run the full sweep.
pub fn apply_event<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    event: &EditEvent,
    now: NaiveDateTime,
    holidays: &BTreeSet<NaiveDate>,
) -> Result<SyncReport> {
    let Some(range) = event.range else {
        debug!(table = %event.table, "edit event without a range, ignoring");
        return Ok(SyncReport::skipped("no active range"));
    };

    let mut report = SyncReport::default();
    let table = event.table.as_str();
    if table == config.master_table {
        report.trigger = "master edit".to_string();
        report.pre_writes = on_master_edit(store, config)?;
    } else if table == config.main_table {
        report.trigger = "main edit".to_string();
        report.pre_writes = on_main_edit(store, config, range, now)?;
    } else if config.is_ledger_table(table) {
        report.trigger = format!("ledger edit: {table}");
        report.pre_writes = on_ledger_edit(store, config, table, range, now)?;
    } else if table == config.schedule_table {
        report.trigger = "schedule edit".to_string();
        report.pre_writes = on_schedule_edit(store, config)?;
    } else {
        debug!(table, "edit on unrecognized table, ignoring");
        return Ok(SyncReport::skipped(format!("unrecognized table: {table}")));
    }

    run_sweep(store, config, now, holidays, &mut report)?;
    info!(
        trigger = %report.trigger,
        duplicates = report.total_duplicates(),
        orphans = report.total_orphans(),
        "reconciliation complete"
    );
    Ok(report)
}

/// Master changed: re-project the main table, then rebuild every ledger.
fn on_master_edit<S: TabularStore>(store: &mut S, config: &WorkbookConfig) -> Result<usize> {
    let master = store.snapshot(&config.master_table)?;
    let main_orig = store.snapshot(&config.main_table)?;
    let main = project(&master, &main_orig, config);
    let mut writes = usize::from(write_body_if_changed(store, &main_orig, &main)?);

    for name in store.ledger_names(&config.ledger_prefix) {
        let existing = store.snapshot(&name)?;
        if let Some(rebuilt) = rebuild(&main, &existing, config)
            && write_body_if_changed(store, &existing, &rebuilt)?
        {
            writes += 1;
        }
    }
    Ok(writes)
}

/// Main-table edit: stamp timestamps on status edits, push assignee and
/// inquiry changes out to the ledgers.
fn on_main_edit<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    range: CellRange,
    now: NaiveDateTime,
) -> Result<usize> {
    let layout = &config.main;
    let main_orig = store.snapshot(&config.main_table)?;
    let mut main = main_orig.clone();
    let mut writes = 0;

    if range.covers_col(layout.progress) {
        for row in range.rows() {
            if BusinessKey::from_cell(main.cell(row, layout.key)).is_some() {
                main.set_cell(row, layout.last_update, CellValue::DateTime(now));
            }
        }
        writes += usize::from(write_body_if_changed(store, &main_orig, &main)?);
    }

    if range.covers_col(layout.assignee) || range.covers_col(layout.inquiry) {
        let mut pushes: BTreeMap<BusinessKey, (CellValue, CellValue)> = BTreeMap::new();
        for row in range.rows() {
            if let Some(key) = BusinessKey::from_cell(main.cell(row, layout.key)) {
                pushes.insert(
                    key,
                    (
                        main.cell(row, layout.assignee).clone(),
                        main.cell(row, layout.inquiry).clone(),
                    ),
                );
            }
        }
        writes += push_assignments(store, config, &pushes)?;
    }
    Ok(writes)
}

fn push_assignments<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    pushes: &BTreeMap<BusinessKey, (CellValue, CellValue)>,
) -> Result<usize> {
    let layout = &config.ledger;
    let mut writes = 0;
    for name in store.ledger_names(&config.ledger_prefix) {
        let orig = store.snapshot(&name)?;
        let mut ledger = orig.clone();
        let index = KeyedRowIndex::build(&ledger, layout.key);
        for (key, (assignee, inquiry)) in pushes {
            if let Some(row) = index.row(key) {
                ledger.set_cell(row, layout.assignee, assignee.clone());
                ledger.set_cell(row, layout.inquiry, inquiry.clone());
            }
        }
        writes += usize::from(write_body_if_changed(store, &orig, &ledger)?);
    }
    Ok(writes)
}

/// Ledger edit: stamp the row's timestamp on status edits, then propagate
/// the latest ledger statuses into the main table and refresh the edited
/// ledger's total-labor formulas.
fn on_ledger_edit<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    table: &str,
    range: CellRange,
    now: NaiveDateTime,
) -> Result<usize> {
    let layout = &config.ledger;
    let orig = store.snapshot(table)?;
    let mut ledger = orig.clone();
    let mut writes = 0;

    if range.covers_col(layout.progress) {
        for row in range.rows() {
            if BusinessKey::from_cell(ledger.cell(row, layout.key)).is_some() {
                ledger.set_cell(row, layout.last_update, CellValue::DateTime(now));
            }
        }
    }
    refresh_total_labor(&mut ledger, config);
    writes += usize::from(write_body_if_changed(store, &orig, &ledger)?);

    let mut ledgers = Vec::new();
    for name in store.ledger_names(&config.ledger_prefix) {
        if let Some(editor) = EditorName::from_table_name(&name, &config.ledger_prefix) {
            ledgers.push((editor, store.snapshot(&name)?));
        }
    }
    let updates = collect_latest_updates(&ledgers, config);
    let main_orig = store.snapshot(&config.main_table)?;
    let mut main = main_orig.clone();
    apply_updates_to_main(&mut main, &updates, config);
    writes += usize::from(write_body_if_changed(store, &main_orig, &main)?);
    Ok(writes)
}

/// Production schedule changed: re-sync assembly start dates.
fn on_schedule_edit<S: TabularStore>(store: &mut S, config: &WorkbookConfig) -> Result<usize> {
    let schedule = store.snapshot(&config.schedule_table)?;
    let main_orig = store.snapshot(&config.main_table)?;
    let mut main = main_orig.clone();
    sync_assembly_dates(&schedule, &mut main, config);
    Ok(usize::from(write_body_if_changed(store, &main_orig, &main)?))
}

/// Run the sweep without a triggering edit (manual invocation).
pub fn run_full_sync<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    now: NaiveDateTime,
    holidays: &BTreeSet<NaiveDate>,
) -> Result<SyncReport> {
    let mut report = SyncReport {
        trigger: "manual sweep".to_string(),
        ..SyncReport::default()
    };
    run_sweep(store, config, now, holidays, &mut report)?;
    Ok(report)
}

/// One helper for hosts that only know the sheet-absolute coordinates.
pub fn body_relative(range: CellRange, header_rows: usize) -> Option<CellRange> {
    let first_body = header_rows;
    let end = range.row + range.n_rows;
    if end <= first_body {
        return None;
    }
    let row = range.row.max(first_body) - first_body;
    let n_rows = end - first_body - row;
    Some(CellRange {
        row,
        col: range.col,
        n_rows,
        n_cols: range.n_cols,
    })
}
