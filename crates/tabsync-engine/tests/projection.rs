//! Master → main projection behavior.

mod common;

use common::{config, date, master_row};
use tabsync_engine::{hyperlink_label, hyperlink_target, project};
use tabsync_model::{CellValue, TableSnapshot};

#[test]
fn every_master_key_appears_once_in_master_order() {
    let cfg = config();
    let master = TableSnapshot::with_rows(
        "Master",
        vec![
            master_row(&cfg, "K-3", "M-3", "NX200 press", None, None),
            master_row(&cfg, "K-1", "M-1", "NX200 press", None, None),
            master_row(&cfg, "K-2", "M-2", "FNX360", None, None),
        ],
    );
    let main = project(&master, &TableSnapshot::new("Main"), &cfg);

    let keys: Vec<String> = (0..main.n_rows())
        .map(|row| main.cell(row, cfg.main.key).as_text())
        .collect();
    assert_eq!(keys, vec!["K-3", "K-1", "K-2"]);
    assert_eq!(main.cell(0, cfg.main.machine_no), &CellValue::text("M-3"));
    assert_eq!(main.cell(0, cfg.main.model), &CellValue::text("NX200 press"));
    assert_eq!(main.cell(0, cfg.main.destination), &CellValue::text("Osaka"));
    assert_eq!(main.cell(0, cfg.main.planned_hours), &CellValue::Number(8.0));
    assert_eq!(
        main.cell(0, cfg.main.deadline),
        &CellValue::Date(date(2026, 9, 30))
    );
}

#[test]
fn operator_columns_survive_reprojection() {
    let cfg = config();
    let mut master = TableSnapshot::with_rows(
        "Master",
        vec![
            master_row(&cfg, "K-1", "M-1", "NX200 press", None, None),
            master_row(&cfg, "K-2", "M-2", "FNX360", None, None),
        ],
    );
    let mut main = project(&master, &TableSnapshot::new("Main"), &cfg);
    main.set_cell(1, cfg.main.remarks, CellValue::text("rush order"));
    main.set_cell(1, cfg.main.assignee, CellValue::text("Tanaka"));
    main.set_cell(1, cfg.main.temp_code, CellValue::text("T-99"));

    // Master revises the planned hours; the operator columns must ride along.
    master.set_cell(1, cfg.master.planned_hours, CellValue::Number(12.5));
    let reprojected = project(&master, &main, &cfg);

    assert_eq!(
        reprojected.cell(1, cfg.main.planned_hours),
        &CellValue::Number(12.5)
    );
    assert_eq!(
        reprojected.cell(1, cfg.main.remarks),
        &CellValue::text("rush order")
    );
    assert_eq!(
        reprojected.cell(1, cfg.main.assignee),
        &CellValue::text("Tanaka")
    );
    assert_eq!(
        reprojected.cell(1, cfg.main.temp_code),
        &CellValue::text("T-99")
    );
}

#[test]
fn keys_removed_from_master_disappear_and_blank_keys_are_skipped() {
    let cfg = config();
    let mut master = TableSnapshot::with_rows(
        "Master",
        vec![
            master_row(&cfg, "K-1", "M-1", "NX200 press", None, None),
            master_row(&cfg, "K-2", "M-2", "FNX360", None, None),
        ],
    );
    // A half-filled row without a key yet.
    master.set_cell(2, cfg.master.machine_no, CellValue::text("M-3"));

    let main = project(&master, &TableSnapshot::new("Main"), &cfg);
    assert_eq!(main.n_rows(), 2);

    master.rows.remove(0);
    let main = project(&master, &main, &cfg);
    assert_eq!(main.n_rows(), 1);
    assert_eq!(main.cell(0, cfg.main.key), &CellValue::text("K-2"));
}

#[test]
fn document_url_renders_as_hyperlink_with_explicit_label() {
    let cfg = config();
    let master = TableSnapshot::with_rows(
        "Master",
        vec![master_row(
            &cfg,
            "K-1",
            "M-1",
            "NX200 press",
            Some("https://example.com/doc/42"),
            Some("DWG-7"),
        )],
    );
    let main = project(&master, &TableSnapshot::new("Main"), &cfg);

    let CellValue::Formula(formula) = main.cell(0, cfg.main.machine_no) else {
        panic!("expected a formula cell");
    };
    assert_eq!(
        hyperlink_target(formula).as_deref(),
        Some("https://example.com/doc/42")
    );
    assert_eq!(hyperlink_label(formula).as_deref(), Some("DWG-7"));
}

#[test]
fn missing_label_falls_back_to_series_code_then_machine_number() {
    let cfg = config();
    let master = TableSnapshot::with_rows(
        "Master",
        vec![
            master_row(
                &cfg,
                "K-881",
                "M-1",
                "K-881 ***FNX360-II",
                Some("https://example.com/doc/1"),
                None,
            ),
            master_row(
                &cfg,
                "K-2",
                "M-2",
                "custom jig",
                Some("https://example.com/doc/2"),
                None,
            ),
        ],
    );
    let main = project(&master, &TableSnapshot::new("Main"), &cfg);

    let CellValue::Formula(first) = main.cell(0, cfg.main.machine_no) else {
        panic!("expected a formula cell");
    };
    assert_eq!(hyperlink_label(first).as_deref(), Some("FNX360"));

    let CellValue::Formula(second) = main.cell(1, cfg.main.machine_no) else {
        panic!("expected a formula cell");
    };
    assert_eq!(hyperlink_label(second).as_deref(), Some("M-2"));
}

#[test]
fn rows_without_document_url_keep_the_literal_machine_number() {
    let cfg = config();
    let master = TableSnapshot::with_rows(
        "Master",
        vec![master_row(&cfg, "K-1", "M-1", "NX200 press", None, Some("DWG-7"))],
    );
    let main = project(&master, &TableSnapshot::new("Main"), &cfg);
    // A label without a URL is not a link.
    assert_eq!(main.cell(0, cfg.main.machine_no), &CellValue::text("M-1"));
}
