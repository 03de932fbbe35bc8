use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use genie_submit::RunSummary;
use genie_validate::FormatRegistry;

/// Print the validation report, then the run table.
pub fn print_summary(summary: &RunSummary) {
    print!("{}", summary.message);
    println!("{}", summary_table(summary));
}

pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Center"), Cell::new(&summary.center)]);
    table.add_row(vec![
        Cell::new("File type"),
        match &summary.file_type {
            Some(file_type) => Cell::new(file_type),
            None => dim_cell("unrecognized"),
        },
    ]);
    table.add_row(vec![Cell::new("Result"), status_cell(summary.valid)]);
    table.add_row(vec![
        Cell::new("Destination"),
        match &summary.destination {
            Some(id) => Cell::new(id),
            None => dim_cell("-"),
        },
    ]);
    for entity in &summary.stored {
        table.add_row(vec![
            Cell::new("Uploaded"),
            Cell::new(format!("{} ({})", entity.name, entity.id)),
        ]);
    }
    table
}

/// Registered file types in probing order.
pub fn formats_table(registry: &FormatRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("File type"),
        header_cell("Package"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (index, entry) in registry.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&entry.file_type),
            Cell::new(&entry.package),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("valid").fg(Color::Green)
    } else {
        Cell::new("invalid")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
