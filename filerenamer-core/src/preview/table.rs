use crate::mapping::RenameMapping;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render a mapping as a numbered table of current and new names
pub fn render_table(mapping: &RenameMapping, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Current name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Current name", "New name"]);
    }

    for (number, pair) in (1_usize..).zip(mapping) {
        if use_color {
            table.add_row(vec![
                Cell::new(number).fg(Color::DarkGrey),
                Cell::new(&pair.old),
                Cell::new(format!("→ {}", pair.new)).fg(Color::Magenta),
            ]);
        } else {
            table.add_row(vec![
                number.to_string(),
                pair.old.clone(),
                format!("→ {}", pair.new),
            ]);
        }
    }

    let total = format!("{} files", mapping.len());
    if use_color {
        table.add_row(vec![
            Cell::new("TOTAL").fg(Color::Cyan),
            Cell::new(total).fg(Color::Yellow),
            Cell::new(""),
        ]);
    } else {
        table.add_row(vec!["TOTAL".to_string(), total, String::new()]);
    }

    table.to_string()
}
