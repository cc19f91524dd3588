//! Markdown writer for the map dump table

use crate::error::{Error, Result};
use crate::table::Table;
use std::fs;
use std::path::Path;
use tracing::info;

/// Render a table and its surrounding prose as a Markdown document.
///
/// Leading prose loses its trailing blank lines and is separated from the
/// table by exactly one blank line. Without leading prose the document
/// starts with a single blank line. Records are written in identifier order.
pub fn render_table(table: &Table) -> String {
    let mut out = render_leading(&table.leading);

    let mut lines = Vec::with_capacity(table.records.len() + 2);
    lines.push(render_row(table.columns.iter().map(|c| c.name.as_str())));
    lines.push(render_row(table.columns.iter().map(|_| "---")));
    for record in table.records.values() {
        lines.push(render_row(
            table.columns.iter().map(|c| record.get(&c.name)),
        ));
    }
    out.push_str(&lines.join("\n"));

    if !table.trailing.is_empty() {
        out.push('\n');
        out.push_str(&table.trailing.join("\n"));
    }

    out
}

/// Render and write a table, replacing the file's contents
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_table(table)).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), records = table.records.len(), "table written");
    Ok(())
}

fn render_leading(leading: &[String]) -> String {
    let end = leading
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |idx| idx + 1);

    if end == 0 {
        return "\n".to_string();
    }

    let mut text = leading[..end].join("\n");
    text.push_str("\n\n");
    text
}

/// Render one `| a | b |` row; blank cells become a single space
fn render_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut row = String::from("|");
    for cell in cells {
        let cell = escape_cell(cell);
        row.push(' ');
        row.push_str(if cell.is_empty() { " " } else { &cell });
        row.push_str(" |");
    }
    row
}

/// Keep a cell on one line and inside its column: line breaks become
/// `<br>` and pipes are escaped as `\|`.
fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace("\r\n", "\n")
        .replace(['\r', '\n'], "<br>")
        .replace('|', "\\|")
}
