use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::pipeline::MergeOutcome;

pub fn print_summary(outcome: &MergeOutcome) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Source"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for source in &outcome.sources {
        table.add_row(vec![Cell::new(&source.id), Cell::new(source.rows)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.table.rows.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Columns: {}",
        outcome.table.columns.join(", ")
    );
    if outcome.dry_run {
        println!("Dry run: no outputs written");
    }
    for path in &outcome.outputs {
        println!("Output: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
