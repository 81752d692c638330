//! CSV-directory workbook: one `<table>.csv` per table.
//!
//! Cells beginning with `=` round-trip as formulas, ISO dates and
//! datetimes as date cells. Text that happens to look numeric comes back
//! as a number cell; the engine's string coercions make that lossless for
//! keys and statuses.

use std::fs;
use std::path::Path;

use tracing::debug;

use tabsync_model::{CellValue, Row};

use crate::error::Result;
use crate::memory::{MemoryWorkbook, Sheet};

/// Load every `*.csv` in `dir` as a table; the file stem is the table name.
pub fn load_workbook(dir: &Path, header_rows: usize) -> Result<MemoryWorkbook> {
    let mut workbook = MemoryWorkbook::new();
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;
        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellValue::from_input).collect());
        }
        let body = rows.split_off(header_rows.min(rows.len()));
        debug!(table = name, rows = body.len(), "loaded table");
        workbook.insert_sheet(
            name,
            Sheet {
                header: rows,
                body,
                backgrounds: Vec::new(),
                number_formats: Default::default(),
            },
        );
    }
    Ok(workbook)
}

/// Write every table of `workbook` back to `dir` as CSV.
pub fn save_workbook(dir: &Path, workbook: &MemoryWorkbook) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (name, sheet) in workbook.sheets() {
        let path = dir.join(format!("{name}.csv"));
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)?;
        let width = sheet
            .header
            .iter()
            .chain(sheet.body.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        for row in sheet.header.iter().chain(sheet.body.iter()) {
            let mut fields: Vec<String> = row.iter().map(CellValue::as_text).collect();
            fields.resize(width, String::new());
            writer.write_record(&fields)?;
        }
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::TabularStore;

    #[test]
    fn workbook_round_trips_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut workbook = MemoryWorkbook::new();
        workbook.insert_table(
            "Main",
            vec![CellValue::text("Key"), CellValue::text("Hours")],
            vec![
                vec![CellValue::text("K-1"), CellValue::Number(3.5)],
                vec![
                    CellValue::Formula("=HYPERLINK(\"https://e.com\",\"NX200\")".to_string()),
                    CellValue::from_input("2026-04-01"),
                ],
            ],
        );
        save_workbook(dir.path(), &workbook).unwrap();
        let loaded = load_workbook(dir.path(), 1).unwrap();
        let snapshot = loaded.snapshot("Main").unwrap();
        assert_eq!(snapshot.cell(0, 0), &CellValue::text("K-1"));
        assert_eq!(snapshot.cell(0, 1), &CellValue::Number(3.5));
        assert!(snapshot.cell(1, 0).as_formula().is_some());
        assert_eq!(
            snapshot.cell(1, 1).as_date(),
            Some(chrono::NaiveDate::from_ymd_opt(2026, 4, 1).unwrap())
        );
    }

    #[test]
    fn header_rows_are_kept_out_of_the_body() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Master.csv"), "Key,Model\nK-1,NX200\n").unwrap();
        let loaded = load_workbook(dir.path(), 1).unwrap();
        let snapshot = loaded.snapshot("Master").unwrap();
        assert_eq!(snapshot.n_rows(), 1);
        assert_eq!(snapshot.cell(0, 1), &CellValue::text("NX200"));
    }
}
