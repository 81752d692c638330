//! Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use tabsync_model::{CellValue, Row, TableSnapshot, WorkbookConfig};
use tabsync_store::MemoryWorkbook;

pub fn config() -> WorkbookConfig {
    WorkbookConfig::default()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// A master row: key, machine number, model, optional doc URL/label.
pub fn master_row(
    cfg: &WorkbookConfig,
    key: &str,
    machine: &str,
    model: &str,
    url: Option<&str>,
    label: Option<&str>,
) -> Row {
    let layout = &cfg.master;
    let mut row = vec![CellValue::Blank; layout.progress + 1];
    row[layout.key] = CellValue::text(key);
    row[layout.machine_no] = CellValue::text(machine);
    row[layout.model] = CellValue::text(model);
    if let Some(url) = url {
        row[layout.doc_url] = CellValue::text(url);
    }
    if let Some(label) = label {
        row[layout.doc_label] = CellValue::text(label);
    }
    row[layout.destination] = CellValue::text("Osaka");
    row[layout.planned_hours] = CellValue::Number(8.0);
    row[layout.deadline] = CellValue::Date(date(2026, 9, 30));
    row
}

/// A ledger row with a status and timestamp already entered.
pub fn ledger_row(
    cfg: &WorkbookConfig,
    key: &str,
    status: &str,
    stamp: Option<NaiveDateTime>,
) -> Row {
    let layout = &cfg.ledger;
    let mut row = vec![CellValue::Blank; layout.first_day_col];
    row[layout.key] = CellValue::text(key);
    if !status.is_empty() {
        row[layout.progress] = CellValue::text(status);
    }
    if let Some(stamp) = stamp {
        row[layout.last_update] = CellValue::DateTime(stamp);
    }
    row
}

/// A workbook holding master, main, schedule and the given ledgers, with
/// the main table projected and ledgers rebuilt so everything starts
/// consistent.
pub fn seeded_workbook(
    cfg: &WorkbookConfig,
    master_rows: Vec<Row>,
    ledgers: &[&str],
) -> MemoryWorkbook {
    let master = TableSnapshot::with_rows(&cfg.master_table, master_rows);
    let main = tabsync_engine::project(&master, &TableSnapshot::new(&cfg.main_table), cfg);

    let mut workbook = MemoryWorkbook::new();
    workbook.insert_table(&cfg.master_table, Vec::new(), master.rows.clone());
    workbook.insert_table(&cfg.main_table, Vec::new(), main.rows.clone());
    workbook.insert_table(&cfg.schedule_table, Vec::new(), Vec::new());
    for name in ledgers {
        let empty = TableSnapshot::new(*name);
        let body = tabsync_engine::rebuild(&main, &empty, cfg)
            .map(|t| t.rows)
            .unwrap_or_default();
        workbook.insert_table(*name, Vec::new(), body);
    }
    workbook
}
