use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use table_cli::data::datatable::Record;

/// Render rows as a comfy-table, one column per entry in `columns`
pub fn format_rows(rows: &[&Record], columns: &[String]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        columns
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
    );

    for record in rows {
        table.add_row(columns.iter().map(|column| record.display_value(column)));
    }

    table.to_string()
}

pub fn display_rows(rows: &[&Record], columns: &[String]) {
    if rows.is_empty() {
        println!("{}", "No rows to display.".yellow());
        return;
    }

    println!("{}", format_rows(rows, columns));
    println!("\n{}", format!("{} rows", rows.len()).green());
}
