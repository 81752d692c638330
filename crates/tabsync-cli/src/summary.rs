//! Post-run summary rendering.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabsync_engine::SyncReport;

pub fn print_report(report: &SyncReport) {
    println!("Trigger: {}", report.trigger);
    if report.skipped {
        println!("Nothing to do.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Written"),
        header_cell("Duplicates"),
        header_cell("Orphans"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 1..5 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for entry in &report.tables {
        table.add_row(vec![
            Cell::new(&entry.table)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.rows),
            written_cell(entry.wrote),
            count_cell(entry.duplicates, Color::Red),
            count_cell(entry.orphans, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.tables.iter().map(|t| t.rows).sum::<usize>()),
        dim_cell("-"),
        count_cell(report.total_duplicates(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(report.total_orphans(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn written_cell(wrote: bool) -> Cell {
    if wrote {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
