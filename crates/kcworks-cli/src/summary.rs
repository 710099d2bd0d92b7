//! Human-readable output for command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::commands::{AssetInventory, RenderOutcome};

pub fn print_render_outcome(outcome: &RenderOutcome) {
    println!("Query: {}", outcome.query);
    println!(
        "Style: {}  Locale: {}  Sort: {}",
        outcome.style, outcome.locale, outcome.sort
    );
    if let Some(error) = &outcome.error {
        println!("Error: {error}");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Id"), header_cell("Title"), header_cell("Year")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for item in &outcome.items {
        table.add_row(vec![
            item.id.clone(),
            item.title.clone().unwrap_or_default(),
            item.year.map(|y| y.to_string()).unwrap_or_else(|| "n.d.".to_string()),
        ]);
    }
    println!("{table}");
    if let Some(warning) = &outcome.generation_error {
        println!("Warning: {warning}");
    }
    if let Some(bibliography) = &outcome.bibliography {
        println!();
        println!("{bibliography}");
    }
}

pub fn print_asset_inventory(inventory: &AssetInventory) {
    println!("Assets: {}", inventory.root);
    let mut styles = Table::new();
    styles.set_header(vec![header_cell("Style"), header_cell("Title")]);
    apply_table_style(&mut styles);
    for style in &inventory.styles {
        styles.add_row(vec![
            style.id.clone(),
            style.title.clone().unwrap_or_default(),
        ]);
    }
    println!("{styles}");

    let mut locales = Table::new();
    locales.set_header(vec![header_cell("Locale"), header_cell("Default")]);
    apply_table_style(&mut locales);
    for locale in &inventory.locales {
        locales.add_row(vec![
            locale.id.clone(),
            if locale.is_default { "yes" } else { "" }.to_string(),
        ]);
    }
    println!("{locales}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
