//! Typed views over single rows of the three table kinds.
//!
//! Components that copy cells verbatim work on the grid directly; these
//! decoders exist for the fields the engine has to interpret (keys,
//! statuses, timestamps, numbers). Blank or malformed cells decode to
//! `None` rather than failing.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{BusinessKey, LedgerLayout, MainLayout, MasterLayout, Progress, TableSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub struct MasterRecord {
    pub key: Option<BusinessKey>,
    pub machine_no: String,
    pub model: String,
    pub doc_url: Option<String>,
    pub doc_label: Option<String>,
    pub planned_hours: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub progress: Option<Progress>,
}

impl MasterRecord {
    pub fn from_row(table: &TableSnapshot, row: usize, layout: &MasterLayout) -> Self {
        let non_blank = |col: usize| -> Option<String> {
            let cell = table.cell(row, col);
            if cell.is_blank() {
                None
            } else {
                Some(cell.as_text())
            }
        };
        Self {
            key: BusinessKey::from_cell(table.cell(row, layout.key)),
            machine_no: table.cell(row, layout.machine_no).as_text(),
            model: table.cell(row, layout.model).as_text(),
            doc_url: non_blank(layout.doc_url),
            doc_label: non_blank(layout.doc_label),
            planned_hours: table.cell(row, layout.planned_hours).as_number(),
            deadline: table.cell(row, layout.deadline).as_date(),
            progress: Progress::from_cell(table.cell(row, layout.progress)),
        }
    }
}

/// The fields of a main-table row the reconciler reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct MainProgressView {
    pub key: Option<BusinessKey>,
    pub progress: Option<Progress>,
    pub editor: Option<String>,
    pub last_update: Option<NaiveDateTime>,
}

impl MainProgressView {
    pub fn from_row(table: &TableSnapshot, row: usize, layout: &MainLayout) -> Self {
        let editor_cell = table.cell(row, layout.progress_editor);
        Self {
            key: BusinessKey::from_cell(table.cell(row, layout.key)),
            progress: Progress::from_cell(table.cell(row, layout.progress)),
            editor: if editor_cell.is_blank() {
                None
            } else {
                Some(editor_cell.as_text())
            },
            last_update: table.cell(row, layout.last_update).as_datetime(),
        }
    }
}

/// The fields of a ledger row the reconciler reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerProgressView {
    pub key: Option<BusinessKey>,
    pub progress: Option<Progress>,
    pub last_update: Option<NaiveDateTime>,
}

impl LedgerProgressView {
    pub fn from_row(table: &TableSnapshot, row: usize, layout: &LedgerLayout) -> Self {
        Self {
            key: BusinessKey::from_cell(table.cell(row, layout.key)),
            progress: Progress::from_cell(table.cell(row, layout.progress)),
            last_update: table.cell(row, layout.last_update).as_datetime(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    #[test]
    fn master_record_decodes_typed_fields() {
        let mut table = TableSnapshot::new("Master");
        table.push_row(vec![
            CellValue::text("K-001"),
            CellValue::text("M-12"),
            CellValue::text("NX200 press"),
            CellValue::text("https://example.com/doc"),
            CellValue::Blank,
            CellValue::text("Osaka"),
            CellValue::Number(12.5),
            CellValue::from_input("2026-04-01"),
            CellValue::text("In progress"),
        ]);
        let record = MasterRecord::from_row(&table, 0, &MasterLayout::default());
        assert_eq!(record.key.unwrap().as_str(), "K-001");
        assert_eq!(record.doc_url.as_deref(), Some("https://example.com/doc"));
        assert_eq!(record.doc_label, None);
        assert_eq!(record.planned_hours, Some(12.5));
        assert_eq!(record.progress, Some(Progress::InProgress));
    }

    #[test]
    fn progress_views_tolerate_short_rows() {
        let table = TableSnapshot::with_rows("Ledger_A", vec![vec![CellValue::text("K-002")]]);
        let view = LedgerProgressView::from_row(&table, 0, &LedgerLayout::default());
        assert_eq!(view.key.unwrap().as_str(), "K-002");
        assert_eq!(view.progress, None);
        assert_eq!(view.last_update, None);
    }
}
