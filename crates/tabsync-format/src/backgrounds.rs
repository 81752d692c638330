//! Background grids derived from final table data.
//!
//! Formatting is a projection of data, never an input: every sweep
//! recomputes these grids from scratch and overwrites what was there.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use tabsync_model::{BusinessKey, LedgerLayout, MainLayout, Progress, TableSnapshot};

use crate::palette::{COLOR_NON_WORKDAY, COLOR_ORPHAN, status_color};

pub type BackgroundGrid = Vec<Vec<Option<String>>>;

/// Whole-row status coloring for the main table.
pub fn main_backgrounds(main: &TableSnapshot, layout: &MainLayout) -> BackgroundGrid {
    let width = layout.width().max(main.width());
    main.rows
        .iter()
        .enumerate()
        .map(|(row, _)| {
            let color = Progress::from_cell(main.cell(row, layout.progress))
                .as_ref()
                .and_then(status_color);
            vec![color.map(String::from); width]
        })
        .collect()
}

/// Ledger coloring: status rows, orphan override, non-workday day columns.
///
/// `day_dates` maps each column index to the date in that ledger's header,
/// where one exists. Orphan rows (key missing from the main table) take the
/// orphan color over any status color; the flag disappears on the next
/// recompute once the key is back.
pub fn ledger_backgrounds(
    ledger: &TableSnapshot,
    layout: &LedgerLayout,
    main_keys: &BTreeSet<BusinessKey>,
    day_dates: &[Option<NaiveDate>],
    holidays: &BTreeSet<NaiveDate>,
) -> BackgroundGrid {
    let width = ledger.width().max(day_dates.len()).max(layout.first_day_col);
    ledger
        .rows
        .iter()
        .enumerate()
        .map(|(row, _)| {
            let key = BusinessKey::from_cell(ledger.cell(row, layout.key));
            let row_color: Option<String> = match &key {
                Some(key) if !main_keys.contains(key) => Some(COLOR_ORPHAN.to_string()),
                _ => Progress::from_cell(ledger.cell(row, layout.progress))
                    .as_ref()
                    .and_then(status_color)
                    .map(String::from),
            };
            (0..width)
                .map(|col| {
                    if let Some(color) = &row_color {
                        return Some(color.clone());
                    }
                    let date = day_dates.get(col).copied().flatten();
                    match date {
                        Some(date) if is_non_workday(date, holidays) => {
                            Some(COLOR_NON_WORKDAY.to_string())
                        }
                        _ => None,
                    }
                })
                .collect()
        })
        .collect()
}

pub fn is_non_workday(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || holidays.contains(&date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabsync_model::CellValue;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn orphan_color_overrides_status_color() {
        let layout = LedgerLayout::default();
        let mut ledger = TableSnapshot::new("Ledger_Abe");
        ledger.set_cell(0, layout.key, CellValue::text("K-GONE"));
        ledger.set_cell(0, layout.progress, CellValue::text("Done"));
        let grid = ledger_backgrounds(
            &ledger,
            &layout,
            &BTreeSet::new(),
            &[],
            &BTreeSet::new(),
        );
        assert_eq!(grid[0][0].as_deref(), Some(COLOR_ORPHAN));
    }

    #[test]
    fn weekend_day_columns_are_shaded_for_unstyled_rows() {
        let layout = LedgerLayout::default();
        let mut ledger = TableSnapshot::new("Ledger_Abe");
        ledger.set_cell(0, layout.key, CellValue::text("K-1"));
        let mut day_dates = vec![None; layout.first_day_col];
        day_dates.push(Some(day(2026, 8, 29))); // Saturday
        day_dates.push(Some(day(2026, 8, 31))); // Monday
        let main_keys = BTreeSet::from([BusinessKey::new("K-1").unwrap()]);
        let grid = ledger_backgrounds(&ledger, &layout, &main_keys, &day_dates, &BTreeSet::new());
        assert_eq!(grid[0][layout.first_day_col].as_deref(), Some(COLOR_NON_WORKDAY));
        assert_eq!(grid[0][layout.first_day_col + 1], None);
    }

    #[test]
    fn holidays_count_as_non_workdays() {
        let holidays = BTreeSet::from([day(2026, 1, 1)]);
        assert!(is_non_workday(day(2026, 1, 1), &holidays)); // Thursday, but a holiday
        assert!(!is_non_workday(day(2026, 1, 2), &holidays));
    }
}
