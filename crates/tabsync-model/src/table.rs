#![deny(unsafe_code)]

use crate::CellValue;

pub type Row = Vec<CellValue>;

static BLANK: CellValue = CellValue::Blank;

/// An in-memory snapshot of one table's body (header rows excluded).
///
/// Rows may be ragged; reads past the end of a row yield `Blank`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub rows: Vec<Row>,
}

impl TableSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row in the snapshot.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&BLANK)
    }

    /// Set a cell, growing the row with blanks as needed.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Blank);
        }
        cells[col] = value;
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Pad every row to `width` columns so the grid is rectangular.
    pub fn pad_to_width(&mut self, width: usize) {
        for cells in &mut self.rows {
            if cells.len() < width {
                cells.resize(width, CellValue::Blank);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_reads_past_row_end_are_blank() {
        let table = TableSnapshot::with_rows("Main", vec![vec![CellValue::text("K-1")]]);
        assert_eq!(table.cell(0, 0), &CellValue::text("K-1"));
        assert_eq!(table.cell(0, 9), &CellValue::Blank);
        assert_eq!(table.cell(5, 0), &CellValue::Blank);
    }

    #[test]
    fn set_cell_grows_rows_and_columns() {
        let mut table = TableSnapshot::new("Main");
        table.set_cell(1, 2, CellValue::Number(8.0));
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.cell(1, 2), &CellValue::Number(8.0));
        assert_eq!(table.cell(1, 0), &CellValue::Blank);
    }
}
