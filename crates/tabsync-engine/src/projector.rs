//! Master → main projection.
//!
//! The main table's body is rebuilt from the master on every run: row
//! order follows master order, keys absent from the master disappear, and
//! the operator-entered main-only columns are merged in from the previous
//! body by key.

use tracing::debug;

use tabsync_model::{BusinessKey, CellValue, TableSnapshot, WorkbookConfig};

use crate::index::KeyedRowIndex;
use crate::link::{hyperlink_formula, series_code};

/// Project the master snapshot into a new main-table body.
pub fn project(
    master: &TableSnapshot,
    existing_main: &TableSnapshot,
    config: &WorkbookConfig,
) -> TableSnapshot {
    let master_layout = &config.master;
    let main_layout = &config.main;
    let existing_index = KeyedRowIndex::build(existing_main, main_layout.key);

    let mut result = TableSnapshot::new(&config.main_table);
    for (row, _) in master.rows.iter().enumerate() {
        let Some(key) = BusinessKey::from_cell(master.cell(row, master_layout.key)) else {
            continue;
        };

        let mut cells = vec![CellValue::Blank; main_layout.width()];
        cells[main_layout.key] = CellValue::text(key.as_str());
        cells[main_layout.machine_no] = machine_cell(master, row, config, &key);
        cells[main_layout.model] = master.cell(row, master_layout.model).clone();
        cells[main_layout.destination] = master.cell(row, master_layout.destination).clone();
        cells[main_layout.planned_hours] = master.cell(row, master_layout.planned_hours).clone();
        cells[main_layout.deadline] = master.cell(row, master_layout.deadline).clone();
        cells[main_layout.progress] = master.cell(row, master_layout.progress).clone();

        if let Some(existing_row) = existing_index.row(&key) {
            for col in main_layout.preserved_columns() {
                cells[col] = existing_main.cell(existing_row, col).clone();
            }
        }
        result.push_row(cells);
    }
    debug!(
        master_rows = master.n_rows(),
        projected = result.n_rows(),
        "projected master into main"
    );
    result
}

/// The machine-number cell: a hyperlink formula when the master carries a
/// document URL, otherwise the literal machine number.
///
/// Label precedence: explicit label from the master, else the series code
/// derived from the model string, else the machine number itself.
fn machine_cell(
    master: &TableSnapshot,
    row: usize,
    config: &WorkbookConfig,
    key: &BusinessKey,
) -> CellValue {
    let layout = &config.master;
    let machine_no = master.cell(row, layout.machine_no).as_text();
    let url_cell = master.cell(row, layout.doc_url);
    if url_cell.is_blank() {
        return CellValue::Text(machine_no);
    }
    let label_cell = master.cell(row, layout.doc_label);
    let label = if label_cell.is_blank() {
        let model = master.cell(row, layout.model).as_text();
        series_code(&model, Some(key.as_str())).unwrap_or(machine_no)
    } else {
        label_cell.as_text()
    };
    CellValue::Formula(hyperlink_formula(&url_cell.as_text(), &label))
}
