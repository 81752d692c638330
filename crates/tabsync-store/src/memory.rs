//! In-memory workbook used by the engine tests and the CSV backend.

use std::collections::BTreeMap;

use tabsync_model::{CellValue, Row, TableSnapshot};

use crate::error::{Result, StoreError};
use crate::tabular::{BackgroundGrid, TabularStore};

#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub header: Vec<Row>,
    pub body: Vec<Row>,
    pub backgrounds: BackgroundGrid,
    pub number_formats: BTreeMap<usize, String>,
}

/// A whole workbook held in memory.
///
/// Tracks how many mutating calls it has served; the sweep's idempotence
/// tests assert that a second pass performs zero writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, Sheet>,
    write_count: usize,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a table with one header row and the given body.
    pub fn insert_table(&mut self, name: impl Into<String>, header: Row, body: Vec<Row>) {
        self.sheets.insert(
            name.into(),
            Sheet {
                header: vec![header],
                body,
                backgrounds: Vec::new(),
                number_formats: BTreeMap::new(),
            },
        );
    }

    pub fn insert_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        self.sheets.insert(name.into(), sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&String, &Sheet)> {
        self.sheets.iter()
    }

    /// Number of mutating store calls served so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn reset_write_count(&mut self) {
        self.write_count = 0;
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }
}

impl TabularStore for MemoryWorkbook {
    fn table_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn has_table(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    fn snapshot(&self, name: &str) -> Result<TableSnapshot> {
        let sheet = self
            .sheets
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        Ok(TableSnapshot::with_rows(name, sheet.body.clone()))
    }

    fn read_header(&self, name: &str) -> Result<Vec<Row>> {
        let sheet = self
            .sheets
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        Ok(sheet.header.clone())
    }

    fn write_header(&mut self, name: &str, rows: Vec<Row>) -> Result<()> {
        let sheet = self.sheet_mut(name)?;
        sheet.header = rows;
        self.write_count += 1;
        Ok(())
    }

    fn write_body(&mut self, name: &str, snapshot: &TableSnapshot) -> Result<()> {
        let sheet = self.sheet_mut(name)?;
        sheet.body = snapshot.rows.clone();
        self.write_count += 1;
        Ok(())
    }

    fn set_cell(&mut self, name: &str, row: usize, col: usize, value: CellValue) -> Result<()> {
        let sheet = self.sheet_mut(name)?;
        while sheet.body.len() <= row {
            sheet.body.push(Vec::new());
        }
        let cells = &mut sheet.body[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Blank);
        }
        cells[col] = value;
        self.write_count += 1;
        Ok(())
    }

    fn read_backgrounds(&self, name: &str) -> Result<BackgroundGrid> {
        let sheet = self
            .sheets
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;
        Ok(sheet.backgrounds.clone())
    }

    fn write_backgrounds(&mut self, name: &str, backgrounds: BackgroundGrid) -> Result<()> {
        let sheet = self.sheet_mut(name)?;
        sheet.backgrounds = backgrounds;
        self.write_count += 1;
        Ok(())
    }

    fn set_number_format(&mut self, name: &str, col: usize, pattern: &str) -> Result<()> {
        let sheet = self.sheet_mut(name)?;
        let changed = sheet.number_formats.get(&col).map(String::as_str) != Some(pattern);
        if changed {
            sheet.number_formats.insert(col, pattern.to_string());
            self.write_count += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_missing_table_errors() {
        let workbook = MemoryWorkbook::new();
        assert!(matches!(
            workbook.snapshot("Main"),
            Err(StoreError::TableNotFound(_))
        ));
    }

    #[test]
    fn write_body_replaces_and_counts() {
        let mut workbook = MemoryWorkbook::new();
        workbook.insert_table(
            "Main",
            vec![CellValue::text("Key")],
            vec![vec![CellValue::text("K-1")], vec![CellValue::text("K-2")]],
        );
        let replacement = TableSnapshot::with_rows("Main", vec![vec![CellValue::text("K-9")]]);
        workbook.write_body("Main", &replacement).unwrap();
        assert_eq!(workbook.snapshot("Main").unwrap(), replacement);
        assert_eq!(workbook.write_count(), 1);
        // Header stays untouched by body writes.
        assert_eq!(workbook.sheet("Main").unwrap().header.len(), 1);
    }

    #[test]
    fn ledger_names_are_sorted_and_prefix_filtered() {
        let mut workbook = MemoryWorkbook::new();
        for name in ["Ledger_Sato", "Main", "Ledger_Abe", "Ledger_"] {
            workbook.insert_table(name, vec![], vec![]);
        }
        assert_eq!(
            workbook.ledger_names("Ledger_"),
            vec!["Ledger_Abe".to_string(), "Ledger_Sato".to_string()]
        );
    }
}
