//! The tabular-store seam between the reconciliation engine and whatever
//! actually holds the workbook.
//!
//! Values and formulas travel together: a cell holding a formula is a
//! `CellValue::Formula`, so one snapshot covers both the value view and
//! the formula view of a range. Coordinates are body-relative; the store
//! keeps its header rows to itself.

use tabsync_model::{CellValue, Row, TableSnapshot};

use crate::error::Result;

/// Background colors per body cell, `None` meaning unstyled.
pub type BackgroundGrid = Vec<Vec<Option<String>>>;

pub trait TabularStore {
    /// All table names in the workbook, in deterministic order.
    fn table_names(&self) -> Vec<String>;

    fn has_table(&self, name: &str) -> bool;

    /// Full body snapshot of one table.
    fn snapshot(&self, name: &str) -> Result<TableSnapshot>;

    /// The header rows above the body (dated day columns live here in
    /// ledger tables).
    fn read_header(&self, name: &str) -> Result<Vec<Row>>;

    /// Replace the header rows.
    fn write_header(&mut self, name: &str, rows: Vec<Row>) -> Result<()>;

    /// Replace the whole body of a table. The previous body is cleared
    /// first; there is no incremental patching.
    fn write_body(&mut self, name: &str, snapshot: &TableSnapshot) -> Result<()>;

    /// Write a single body cell in place.
    fn set_cell(&mut self, name: &str, row: usize, col: usize, value: CellValue) -> Result<()>;

    fn read_backgrounds(&self, name: &str) -> Result<BackgroundGrid>;

    fn write_backgrounds(&mut self, name: &str, backgrounds: BackgroundGrid) -> Result<()>;

    /// Set the display number-format pattern for a whole body column.
    fn set_number_format(&mut self, name: &str, col: usize, pattern: &str) -> Result<()>;

    /// Ledger tables: names sharing `prefix`, sorted. Sorted order is what
    /// makes the reconciler's tie-break deterministic per workbook.
    fn ledger_names(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .table_names()
            .into_iter()
            .filter(|name| name.starts_with(prefix) && name.len() > prefix.len())
            .collect();
        names.sort();
        names
    }
}
