use comfy_table::{Table, presets::ASCII_FULL};

use crate::report::{COLUMNS, Row};

pub const REPORT_TITLE: &str = "=== Option Orders (Last 24 Hours) ===";
pub const HEADERS: [&str; COLUMNS] = [
    "Time",
    "Side",
    "Quantity",
    "Price",
    "Premium",
    "Option Details",
    "State",
];

/// Grid table: `+`/`-`/`|` borders, `=` under the header.
pub fn render(rows: &[Row], headers: &[&str]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.to_vec());
    }
    table.to_string()
}
