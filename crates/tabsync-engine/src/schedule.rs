//! Assembly-start-date sync from the external production schedule.

use std::collections::BTreeMap;

use tracing::debug;

use tabsync_model::{CellValue, TableSnapshot, WorkbookConfig};

use crate::link::hyperlink_label;

/// Copy assembly start dates into the main table, matched by machine
/// number. Main rows whose machine number has no schedule entry are left
/// alone. Returns the number of cells updated.
pub fn sync_assembly_dates(
    schedule: &TableSnapshot,
    main: &mut TableSnapshot,
    config: &WorkbookConfig,
) -> usize {
    let schedule_layout = &config.schedule;
    let main_layout = &config.main;

    // Last occurrence wins, as with business keys.
    let mut by_machine: BTreeMap<String, CellValue> = BTreeMap::new();
    for row in 0..schedule.n_rows() {
        let machine = schedule.cell(row, schedule_layout.machine_no).as_text();
        let machine = machine.trim();
        if machine.is_empty() {
            continue;
        }
        by_machine.insert(
            machine.to_string(),
            schedule.cell(row, schedule_layout.assembly_start).clone(),
        );
    }

    let mut updated = 0;
    for row in 0..main.n_rows() {
        let machine = machine_text(main.cell(row, main_layout.machine_no));
        let Some(start) = by_machine.get(machine.trim()) else {
            continue;
        };
        if main.cell(row, main_layout.assembly_start) != start {
            main.set_cell(row, main_layout.assembly_start, start.clone());
            updated += 1;
        }
    }
    debug!(updated, "synced assembly start dates");
    updated
}

/// The machine number shown in a main-table cell: the hyperlink label when
/// the cell is a rendered link, otherwise the literal text.
fn machine_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Formula(formula) => {
            hyperlink_label(formula).unwrap_or_else(|| formula.clone())
        }
        other => other.as_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::hyperlink_formula;
    use chrono::NaiveDate;

    #[test]
    fn matches_literal_and_linked_machine_numbers() {
        let config = WorkbookConfig::default();
        let mut schedule = TableSnapshot::new("Schedule");
        schedule.set_cell(0, 0, CellValue::text("M-12"));
        schedule.set_cell(0, 1, CellValue::from_input("2026-09-15"));
        schedule.set_cell(1, 0, CellValue::text("M-77"));
        schedule.set_cell(1, 1, CellValue::from_input("2026-10-01"));

        let mut main = TableSnapshot::new("Main");
        main.set_cell(0, config.main.key, CellValue::text("K-1"));
        main.set_cell(0, config.main.machine_no, CellValue::text("M-12"));
        main.set_cell(1, config.main.key, CellValue::text("K-2"));
        main.set_cell(
            1,
            config.main.machine_no,
            CellValue::Formula(hyperlink_formula("https://e.com/d", "M-77")),
        );

        let updated = sync_assembly_dates(&schedule, &mut main, &config);
        assert_eq!(updated, 2);
        assert_eq!(
            main.cell(0, config.main.assembly_start).as_date(),
            Some(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())
        );
        assert_eq!(
            main.cell(1, config.main.assembly_start).as_date(),
            Some(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())
        );
    }

    #[test]
    fn unmatched_rows_are_untouched_and_resync_is_stable() {
        let config = WorkbookConfig::default();
        let mut schedule = TableSnapshot::new("Schedule");
        schedule.set_cell(0, 0, CellValue::text("M-12"));
        schedule.set_cell(0, 1, CellValue::from_input("2026-09-15"));

        let mut main = TableSnapshot::new("Main");
        main.set_cell(0, config.main.machine_no, CellValue::text("M-99"));
        main.set_cell(1, config.main.machine_no, CellValue::text("M-12"));

        assert_eq!(sync_assembly_dates(&schedule, &mut main, &config), 1);
        assert!(main.cell(0, config.main.assembly_start).is_blank());
        // Second pass changes nothing.
        assert_eq!(sync_assembly_dates(&schedule, &mut main, &config), 0);
    }
}
