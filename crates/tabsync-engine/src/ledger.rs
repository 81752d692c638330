//! Per-editor ledger regeneration and daily-column maintenance.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use tabsync_model::{BusinessKey, CellValue, Row, TableSnapshot, WorkbookConfig};

use crate::addr::{col_letter, sheet_row};
use crate::index::KeyedRowIndex;

/// Rebuild one ledger body from the main table.
///
/// Returns `None` when the main table has no data rows; the ledger is
/// left untouched in that case (a no-op, not an error).
pub fn rebuild(
    main: &TableSnapshot,
    existing_ledger: &TableSnapshot,
    config: &WorkbookConfig,
) -> Option<TableSnapshot> {
    if main.is_empty() {
        return None;
    }
    let main_layout = &config.main;
    let layout = &config.ledger;
    let existing_index = KeyedRowIndex::build(existing_ledger, layout.key);
    let width = existing_ledger.width().max(layout.first_day_col);

    let mut result = TableSnapshot::new(&existing_ledger.name);
    for (row, _) in main.rows.iter().enumerate() {
        let Some(key) = BusinessKey::from_cell(main.cell(row, main_layout.key)) else {
            continue;
        };

        let mut cells = vec![CellValue::Blank; width];
        cells[layout.key] = CellValue::text(key.as_str());
        cells[layout.machine_no] = formula_or_literal(main.cell(row, main_layout.machine_no));
        cells[layout.model] = formula_or_literal(main.cell(row, main_layout.model));
        cells[layout.assignee] = main.cell(row, main_layout.assignee).clone();
        cells[layout.inquiry] = main.cell(row, main_layout.inquiry).clone();
        cells[layout.deadline] = main.cell(row, main_layout.deadline).clone();
        cells[layout.planned_hours] = main.cell(row, main_layout.planned_hours).clone();

        // Editor-entered cells survive the rebuild when the key matches.
        if let Some(existing_row) = existing_index.row(&key) {
            cells[layout.progress] = existing_ledger.cell(existing_row, layout.progress).clone();
            cells[layout.last_update] =
                existing_ledger.cell(existing_row, layout.last_update).clone();
            for col in layout.first_day_col..width {
                cells[col] = existing_ledger.cell(existing_row, col).clone();
            }
        }

        let out_row = result.n_rows();
        cells[layout.total_labor] = total_labor_formula(out_row, config);
        result.push_row(cells);
    }
    debug!(
        ledger = %existing_ledger.name,
        rows = result.n_rows(),
        "rebuilt ledger from main"
    );
    Some(result)
}

/// Re-emit the total-labor formula on every data row of a ledger.
pub fn refresh_total_labor(ledger: &mut TableSnapshot, config: &WorkbookConfig) {
    let layout = &config.ledger;
    for row in 0..ledger.n_rows() {
        if BusinessKey::from_cell(ledger.cell(row, layout.key)).is_none() {
            continue;
        }
        ledger.set_cell(row, layout.total_labor, total_labor_formula(row, config));
    }
}

/// Daily labor columns sum from the first day column to the end of the
/// row; non-numeric noise collapses to zero on the host side.
fn total_labor_formula(body_row: usize, config: &WorkbookConfig) -> CellValue {
    let row = sheet_row(body_row, config.header_rows);
    let col = col_letter(config.ledger.first_day_col);
    CellValue::Formula(format!("=ARRAYFORMULA(SUM(IFERROR({col}{row}:{row},0)))"))
}

fn formula_or_literal(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Formula(f) => CellValue::Formula(f.clone()),
        other => CellValue::Text(other.as_text()),
    }
}

/// Dates carried by a ledger's header, by absolute column index.
pub fn day_dates(header: &[Row], config: &WorkbookConfig) -> Vec<Option<NaiveDate>> {
    let Some(first) = header.first() else {
        return Vec::new();
    };
    first
        .iter()
        .enumerate()
        .map(|(col, cell)| {
            if col >= config.ledger.first_day_col {
                cell.as_date()
            } else {
                None
            }
        })
        .collect()
}

/// Append one dated header column per day of `year`/`month` after the last
/// existing day column. Existing columns are never reordered or removed.
///
/// Returns the header rows to write back, or `None` when every day of the
/// month is already present.
pub fn append_month_columns(
    header: &[Row],
    config: &WorkbookConfig,
    year: i32,
    month: u32,
) -> Option<Vec<Row>> {
    let mut header = header.to_vec();
    if header.is_empty() {
        header.push(Vec::new());
    }
    let existing: Vec<NaiveDate> = day_dates(&header, config).into_iter().flatten().collect();
    let mut appended = false;
    let first_row_len = header[0].len().max(config.ledger.first_day_col);
    header[0].resize(first_row_len, CellValue::Blank);

    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    while date.month() == month {
        if !existing.contains(&date) {
            header[0].push(CellValue::Date(date));
            appended = true;
        }
        date = date.succ_opt()?;
    }
    if appended { Some(header) } else { None }
}
