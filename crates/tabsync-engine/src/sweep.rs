//! The fixed reconciliation sweep run after every recognized edit.
//!
//! Step order is part of the contract: fill blank statuses, stamp
//! completion dates, mirror statuses to the master, flag orphans, resolve
//! duplicates (main first, then each ledger), back-propagate main
//! statuses into the ledgers, then recompute formatting from the final
//! data. Every table is written back at most once, and only if changed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use tabsync_format as format;
use tabsync_model::{
    BusinessKey, CellValue, EditorName, Progress, TableSnapshot, WorkbookConfig,
};
use tabsync_store::TabularStore;

use crate::duplicate;
use crate::error::{Result, SyncError};
use crate::index::KeyedRowIndex;
use crate::ledger::day_dates;
use crate::progress::back_propagate;
use crate::report::{SyncReport, TableReport};

pub fn run_sweep<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    now: NaiveDateTime,
    holidays: &BTreeSet<NaiveDate>,
    report: &mut SyncReport,
) -> Result<()> {
    for required in [&config.master_table, &config.main_table] {
        if !store.has_table(required) {
            warn!(table = %required, "required table missing, aborting sweep");
            return Err(SyncError::MissingTable(required.clone()));
        }
    }

    let master_orig = store.snapshot(&config.master_table)?;
    let main_orig = store.snapshot(&config.main_table)?;
    let mut master = master_orig.clone();
    let mut main = main_orig.clone();

    let ledger_names = store.ledger_names(&config.ledger_prefix);
    let mut ledgers: Vec<(EditorName, TableSnapshot, TableSnapshot)> = Vec::new();
    for name in &ledger_names {
        match store.snapshot(name) {
            Ok(snapshot) => {
                if let Some(editor) = EditorName::from_table_name(name, &config.ledger_prefix) {
                    ledgers.push((editor, snapshot.clone(), snapshot));
                }
            }
            // One unreadable ledger must not block the rest of the sweep.
            Err(error) => warn!(table = %name, %error, "skipping unreadable ledger"),
        }
    }

    fill_blank_statuses(&mut main, config.main.key, config.main.progress);
    for (_, _, ledger) in &mut ledgers {
        fill_blank_statuses(ledger, config.ledger.key, config.ledger.progress);
    }

    stamp_completion_dates(&mut main, config, now);

    crate::progress::propagate_to_master(&main, &mut master, config);

    let main_index = KeyedRowIndex::build(&main, config.main.key);
    let main_keys: BTreeSet<BusinessKey> = main_index.keys().cloned().collect();
    let mut orphan_counts: BTreeMap<String, usize> = BTreeMap::new();
    for (_, _, ledger) in &ledgers {
        let orphans = count_orphans(ledger, config.ledger.key, &main_keys);
        if orphans > 0 {
            debug!(table = %ledger.name, orphans, "ledger rows missing from main");
        }
        orphan_counts.insert(ledger.name.clone(), orphans);
    }

    let main_duplicates = duplicate::resolve(&mut main, config.main.key, config.main.progress);
    let mut ledger_duplicates: BTreeMap<String, usize> = BTreeMap::new();
    for (_, _, ledger) in &mut ledgers {
        let flagged = duplicate::resolve(ledger, config.ledger.key, config.ledger.progress);
        ledger_duplicates.insert(ledger.name.clone(), flagged);
    }

    for (_, _, ledger) in &mut ledgers {
        back_propagate(&main, ledger, config);
    }

    let main_wrote = write_body_if_changed(store, &main_orig, &main)?;
    report.tables.push(TableReport {
        table: main.name.clone(),
        rows: main.n_rows(),
        wrote: main_wrote,
        duplicates: main_duplicates,
        orphans: 0,
    });

    let master_wrote = write_body_if_changed(store, &master_orig, &master)?;
    report.tables.push(TableReport {
        table: master.name.clone(),
        rows: master.n_rows(),
        wrote: master_wrote,
        duplicates: 0,
        orphans: 0,
    });

    for (_, orig, ledger) in &ledgers {
        let wrote = match write_body_if_changed(store, orig, ledger) {
            Ok(wrote) => wrote,
            Err(error) => {
                warn!(table = %ledger.name, %error, "failed to write ledger");
                false
            }
        };
        report.tables.push(TableReport {
            table: ledger.name.clone(),
            rows: ledger.n_rows(),
            wrote,
            duplicates: ledger_duplicates.get(&ledger.name).copied().unwrap_or(0),
            orphans: orphan_counts.get(&ledger.name).copied().unwrap_or(0),
        });
    }

    recompute_formatting(store, config, &main, &ledgers, &main_keys, holidays)?;
    apply_number_formats(store, config, &ledger_names)?;
    Ok(())
}

/// Rows with a key but no status read as "not started".
fn fill_blank_statuses(table: &mut TableSnapshot, key_col: usize, status_col: usize) {
    for row in 0..table.n_rows() {
        if BusinessKey::from_cell(table.cell(row, key_col)).is_none() {
            continue;
        }
        if table.cell(row, status_col).is_blank() {
            table.set_cell(row, status_col, Progress::NotStarted.to_cell());
        }
    }
}

/// Terminal statuses lacking a completion date get today's.
fn stamp_completion_dates(main: &mut TableSnapshot, config: &WorkbookConfig, now: NaiveDateTime) {
    let layout = &config.main;
    for row in 0..main.n_rows() {
        if BusinessKey::from_cell(main.cell(row, layout.key)).is_none() {
            continue;
        }
        let terminal = Progress::from_cell(main.cell(row, layout.progress))
            .is_some_and(|p| p.is_terminal());
        if terminal && main.cell(row, layout.completion_date).is_blank() {
            main.set_cell(row, layout.completion_date, CellValue::Date(now.date()));
        }
    }
}

fn count_orphans(
    ledger: &TableSnapshot,
    key_col: usize,
    main_keys: &BTreeSet<BusinessKey>,
) -> usize {
    (0..ledger.n_rows())
        .filter_map(|row| BusinessKey::from_cell(ledger.cell(row, key_col)))
        .filter(|key| !main_keys.contains(key))
        .count()
}

pub(crate) fn write_body_if_changed<S: TabularStore>(
    store: &mut S,
    old: &TableSnapshot,
    new: &TableSnapshot,
) -> Result<bool> {
    if old.rows == new.rows {
        return Ok(false);
    }
    store.write_body(&new.name, new)?;
    Ok(true)
}

fn recompute_formatting<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    main: &TableSnapshot,
    ledgers: &[(EditorName, TableSnapshot, TableSnapshot)],
    main_keys: &BTreeSet<BusinessKey>,
    holidays: &BTreeSet<NaiveDate>,
) -> Result<()> {
    let main_grid = format::main_backgrounds(main, &config.main);
    write_backgrounds_if_changed(store, &main.name, main_grid)?;

    for (_, _, ledger) in ledgers {
        let header = store.read_header(&ledger.name)?;
        let dates = day_dates(&header, config);
        let grid =
            format::ledger_backgrounds(ledger, &config.ledger, main_keys, &dates, holidays);
        write_backgrounds_if_changed(store, &ledger.name, grid)?;
    }
    Ok(())
}

fn write_backgrounds_if_changed<S: TabularStore>(
    store: &mut S,
    table: &str,
    grid: Vec<Vec<Option<String>>>,
) -> Result<bool> {
    if store.read_backgrounds(table)? == grid {
        return Ok(false);
    }
    store.write_backgrounds(table, grid)?;
    Ok(true)
}

fn apply_number_formats<S: TabularStore>(
    store: &mut S,
    config: &WorkbookConfig,
    ledger_names: &[String],
) -> Result<()> {
    let main = &config.main;
    let main_table = config.main_table.as_str();
    store.set_number_format(main_table, main.planned_hours, format::HOURS_PATTERN)?;
    store.set_number_format(main_table, main.total_labor, format::HOURS_PATTERN)?;
    store.set_number_format(main_table, main.deadline, format::DATE_PATTERN)?;
    store.set_number_format(main_table, main.completion_date, format::DATE_PATTERN)?;
    store.set_number_format(main_table, main.assembly_start, format::DATE_PATTERN)?;
    store.set_number_format(main_table, main.last_update, format::TIMESTAMP_PATTERN)?;

    let ledger = &config.ledger;
    for name in ledger_names {
        store.set_number_format(name, ledger.planned_hours, format::HOURS_PATTERN)?;
        store.set_number_format(name, ledger.total_labor, format::HOURS_PATTERN)?;
        store.set_number_format(name, ledger.deadline, format::DATE_PATTERN)?;
        store.set_number_format(name, ledger.last_update, format::TIMESTAMP_PATTERN)?;
    }
    Ok(())
}
