//! Markdown parser for the map dump table
//!
//! The table is the first pipe-table in the document whose header row
//! mentions the identifier column. Text above it is kept as leading prose
//! and text below it as trailing prose, so a rewrite only touches the table.

use crate::error::{Error, Result};
use crate::table::{Column, Record, Table, COL_IDENTIFIER};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

/// Parse a Markdown document into a Table
pub fn parse_table(content: &str) -> Table {
    let content = content.replace("\r\n", "\n");
    let lines: Vec<&str> = content.split('\n').collect();

    let header_idx = lines
        .iter()
        .position(|line| line.starts_with('|') && line.contains(COL_IDENTIFIER));

    let Some(header_idx) = header_idx else {
        info!("no table found, starting a new one");
        let mut table = Table::new();
        table.leading = to_owned_lines(&lines);
        return table;
    };

    let headers = split_row(lines[header_idx]);
    let mut table = Table::with_headers(headers);
    table.leading = to_owned_lines(&lines[..header_idx]);

    // Skip the header and its `| --- |` separator
    for (line_idx, raw) in lines.iter().enumerate().skip(header_idx + 2) {
        let line = raw.trim();
        if !line.starts_with('|') {
            table.trailing = to_owned_lines(&lines[line_idx..]);
            break;
        }

        let mut cells = split_row(line);
        let id = match cells.first() {
            Some(id) if !id.is_empty() && id != "--" => id.clone(),
            _ => continue,
        };

        // Pad with empty cells if row is shorter than header
        while cells.len() < table.columns.len() {
            cells.push(String::new());
        }

        // Warn if row is longer than header (truncate)
        if cells.len() > table.columns.len() {
            warn!(
                line = line_idx + 1,
                cells = cells.len(),
                columns = table.columns.len(),
                "row has more cells than columns, truncating"
            );
            cells.truncate(table.columns.len());
        }

        let record = build_record(&table.columns, cells);
        if table.records.insert(id.clone(), record).is_some() {
            warn!(%id, line = line_idx + 1, "duplicate identifier, keeping the later row");
        }
    }

    info!(records = table.records.len(), "read existing records");
    table
}

/// Read and parse a Markdown table file
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_table(&content))
}

/// Like [`read_table`], but logs a failure and falls back to an empty
/// table with the default header.
pub fn load_table<P: AsRef<Path>>(path: P) -> Table {
    read_table(path).unwrap_or_else(|err| {
        error!(%err, "failed to read existing table");
        Table::new()
    })
}

/// Split `| a | b |` into trimmed cells; `\|` is a literal pipe
fn split_row(line: &str) -> Vec<String> {
    let mut body = line.trim().trim_start_matches('|');
    while body.ends_with('|') && !body.ends_with("\\|") {
        body = &body[..body.len() - 1];
    }

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn build_record(columns: &[Column], cells: Vec<String>) -> Record {
    let mut record = Record::default();
    for (column, value) in columns.iter().zip(cells) {
        record.set(column.name.as_str(), value);
    }
    record
}

fn to_owned_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
