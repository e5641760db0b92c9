//! Table output for scan reports

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};

/// A cell's text and optional foreground color.
pub type ColoredCell = (String, Option<Color>);

/// Build a table with a cyan header row.
pub fn build_table(headers: &[&str], rows: Vec<Vec<ColoredCell>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        let cells: Vec<Cell> = row
            .into_iter()
            .map(|(text, color)| match color {
                Some(c) => Cell::new(text).fg(c),
                None => Cell::new(text),
            })
            .collect();
        table.add_row(cells);
    }

    table
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<ColoredCell>>) {
    println!("{}", build_table(headers, rows));
}

/// Show `-` for empty values so columns stay readable.
pub fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
