//! Table and Row data structures

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::schema::Column;
use crate::error::CompareError;

/// A row in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell text in column order; blank cells are empty strings
    pub cells: Vec<String>,
    /// Original line/row number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<String>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// A table containing columns and rows
#[derive(Debug, Clone)]
pub struct Table {
    /// Display name (sheet name or file stem)
    pub name: String,
    /// File the table was read from
    pub source: PathBuf,
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
    /// Column name to position; a repeated header name resolves to its last column
    column_index: IndexMap<String, usize>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>, columns: Vec<Column>) -> Self {
        let column_index = columns
            .iter()
            .map(|c| (c.name.clone(), c.index))
            .collect();
        Self {
            name: name.into(),
            source: source.into(),
            columns,
            rows: Vec::new(),
            column_index,
        }
    }

    /// Build a table from a header and string rows, estimating column widths
    pub fn from_records<I, R, S>(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        header: &[&str],
        records: I,
    ) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(*name, i))
            .collect();
        let mut table = Self::new(name, source, columns);
        for (line, record) in records.into_iter().enumerate() {
            table.add_row(record.into_iter().map(Into::into).collect(), line + 2);
        }
        table
    }

    /// Add a row, padding or truncating it to the header length and widening columns
    pub fn add_row(&mut self, mut cells: Vec<String>, source_line: usize) {
        cells.resize(self.columns.len(), String::new());
        for (column, cell) in self.columns.iter_mut().zip(&cells) {
            column.fit(cell);
        }
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    /// Check that a column is present in the header
    pub fn require_column(&self, name: &str) -> Result<usize, CompareError> {
        self.column_index(name)
            .ok_or_else(|| CompareError::column_not_found(name, self.file_name()))
    }

    /// Column names mapped to their width hints, in header order
    pub fn column_widths(&self) -> IndexMap<&str, usize> {
        self.column_index
            .iter()
            .map(|(name, &idx)| (name.as_str(), self.columns[idx].width))
            .collect()
    }

    /// Look up a cell by row and column name; missing cells read as empty
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> &'a str {
        self.column_index(column)
            .and_then(|idx| row.get(idx))
            .unwrap_or("")
    }

    /// File name component of the source path
    pub fn file_name(&self) -> String {
        file_name(&self.source)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(
            "Sheet1",
            "data/old.xlsx",
            &["ID", "Name"],
            vec![vec!["1", "Tom"], vec!["2"]],
        )
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = sample();
        assert_eq!(table.rows[1].cells, vec!["2".to_string(), String::new()]);
        assert_eq!(table.rows[1].source_line, 3);
    }

    #[test]
    fn test_cell_lookup_by_name() {
        let table = sample();
        assert_eq!(table.cell(&table.rows[0], "Name"), "Tom");
        assert_eq!(table.cell(&table.rows[0], "Missing"), "");
    }

    #[test]
    fn test_require_column_names_file() {
        let table = sample();
        assert_eq!(table.require_column("ID").unwrap(), 0);
        let err = table.require_column("Key").unwrap_err();
        assert_eq!(err.to_string(), "Column Key not found in old.xlsx");
    }

    #[test]
    fn test_widths_grow_with_content() {
        let mut table = sample();
        table.add_row(vec!["3".into(), "Alexandria".into()], 4);
        let widths = table.column_widths();
        assert_eq!(widths["ID"], 2);
        assert_eq!(widths["Name"], 12);
    }

    #[test]
    fn test_duplicate_header_resolves_to_last() {
        let table = Table::from_records("s", "t.csv", &["A", "A"], vec![vec!["x", "y"]]);
        assert_eq!(table.column_index("A"), Some(1));
        assert_eq!(table.column_widths().len(), 1);
    }
}
