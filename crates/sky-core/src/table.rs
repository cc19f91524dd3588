//! Core table types for representing the map dump table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier column header, also used to locate the table in a document
pub const COL_IDENTIFIER: &str = "标识符";
/// Localized name in the primary language
pub const COL_PRIMARY_NAME: &str = "中文名";
/// Community nickname
pub const COL_NICKNAME: &str = "玩家社区称呼";
/// Localized name in the secondary (base) language
pub const COL_SECONDARY_NAME: &str = "英文名";
/// Translation key the names were resolved from
pub const COL_TRANSLATION_KEY: &str = "翻译键";
/// Game version the map exists in
pub const COL_VERSION: &str = "存在版本";
/// Realm or area the map belongs to
pub const COL_GROUP: &str = "隶属于";
/// Screenshot reference
pub const COL_SCREENSHOT: &str = "截图";
/// Free-text note
pub const COL_NOTE: &str = "注释";

/// Header used when a document has no table yet
pub const DEFAULT_HEADERS: [&str; 9] = [
    COL_IDENTIFIER,
    COL_PRIMARY_NAME,
    COL_NICKNAME,
    COL_SECONDARY_NAME,
    COL_TRANSLATION_KEY,
    COL_VERSION,
    COL_GROUP,
    COL_SCREENSHOT,
    COL_NOTE,
];

/// The map table plus the prose around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column definitions, in document order
    pub columns: Vec<Column>,
    /// Records keyed by identifier (iterates in sorted order)
    pub records: BTreeMap<String, Record>,
    /// Lines before the header row
    pub leading: Vec<String>,
    /// Lines after the last table row
    pub trailing: Vec<String>,
}

impl Table {
    /// Create an empty table with the default header and no surrounding text
    pub fn new() -> Self {
        Self::with_headers(DEFAULT_HEADERS)
    }

    /// Create an empty table with the given header names
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column::new(name.into(), i))
            .collect();
        Self {
            columns,
            records: BTreeMap::new(),
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of records
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a record by identifier
    pub fn find_record(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Name of the column holding identifiers (the first one)
    pub fn identifier_column(&self) -> &str {
        self.columns
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or(COL_IDENTIFIER)
    }

    /// Header names, in order
    pub fn header_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A column definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text (e.g., "标识符")
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// One table row, with cells addressed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    /// Create a record holding only its identifier, stored under `id_column`
    pub fn new(id_column: &str, id: &str) -> Self {
        let mut record = Self::default();
        record.set(id_column, id);
        record
    }

    /// Get a cell value; absent cells read as empty
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Set a cell value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Whether a cell is missing, empty or whitespace only
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).trim().is_empty()
    }

    /// Fill `column` with `value` if the cell is blank and `value` is not.
    ///
    /// Returns true when the cell changed.
    pub fn backfill(&mut self, column: &str, value: &str) -> bool {
        if value.trim().is_empty() || !self.is_blank(column) {
            return false;
        }
        self.set(column, value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_nine_columns() {
        let table = Table::new();
        assert_eq!(table.column_count(), 9);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns[0].name, COL_IDENTIFIER);
        assert_eq!(table.find_column(COL_NOTE).map(|c| c.index), Some(8));
    }

    #[test]
    fn test_identifier_column_is_first_header() {
        let table = Table::with_headers(["地图标识符", "中文名"]);
        assert_eq!(table.identifier_column(), "地图标识符");

        let headless = Table::with_headers(Vec::<String>::new());
        assert_eq!(headless.identifier_column(), COL_IDENTIFIER);
    }

    #[test]
    fn test_record_missing_cell_is_empty() {
        let record = Record::new(COL_IDENTIFIER, "Day");
        assert_eq!(record.get(COL_IDENTIFIER), "Day");
        assert_eq!(record.get(COL_PRIMARY_NAME), "");
        assert!(record.is_blank(COL_PRIMARY_NAME));
    }

    #[test]
    fn test_backfill_fills_blank_only() {
        let mut record = Record::new(COL_IDENTIFIER, "Day");
        record.set(COL_PRIMARY_NAME, "   ");
        record.set(COL_SECONDARY_NAME, "Daylight Prairie");

        assert!(record.backfill(COL_PRIMARY_NAME, "云野"));
        assert!(!record.backfill(COL_SECONDARY_NAME, "Isle of Dawn"));
        assert!(!record.backfill(COL_TRANSLATION_KEY, " "));

        assert_eq!(record.get(COL_PRIMARY_NAME), "云野");
        assert_eq!(record.get(COL_SECONDARY_NAME), "Daylight Prairie");
        assert_eq!(record.get(COL_TRANSLATION_KEY), "");
    }
}
