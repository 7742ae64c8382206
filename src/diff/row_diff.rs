//! Row matching and per-cell classification

use std::borrow::Cow;

use indexmap::IndexMap;
use log::{debug, warn};

use super::cell_diff::{substitute_bullets, CellDiffer};
use super::CellRendering;
use crate::model::{normalize_key, Row, Table};

/// An old/new row pair sharing one key; a missing side stands for a blank row
#[derive(Debug, Clone, Copy)]
pub struct RowPair<'k, 'a> {
    pub key: &'k str,
    pub old: Option<&'a Row>,
    pub new: Option<&'a Row>,
}

/// Row matcher using key-indexed lookup
pub struct RowMatcher<'a> {
    old_table: &'a Table,
    new_table: &'a Table,
    id_column: &'a str,
    normalize_ids: bool,
    old_index: IndexMap<String, &'a Row>,
    new_index: IndexMap<String, &'a Row>,
}

impl<'a> RowMatcher<'a> {
    /// Index both tables by identifier.
    ///
    /// The identifier column must already be known to exist in both tables.
    pub fn new(
        old_table: &'a Table,
        new_table: &'a Table,
        id_column: &'a str,
        normalize_ids: bool,
    ) -> Self {
        let old_index = index_rows(old_table, id_column, normalize_ids);
        let new_index = index_rows(new_table, id_column, normalize_ids);
        debug!(
            "indexed {} old and {} new row keys",
            old_index.len(),
            new_index.len()
        );
        Self {
            old_table,
            new_table,
            id_column,
            normalize_ids,
            old_index,
            new_index,
        }
    }

    /// Pair rows by key: every new key in new order, then old-only keys in old order
    pub fn match_rows(&self) -> Vec<RowPair<'_, 'a>> {
        let mut pairs: Vec<RowPair<'_, 'a>> = self
            .new_index
            .iter()
            .map(|(key, &new_row)| RowPair {
                key,
                old: self.old_index.get(key).copied(),
                new: Some(new_row),
            })
            .collect();

        pairs.extend(
            self.old_index
                .iter()
                .filter(|(key, _)| !self.new_index.contains_key(*key))
                .map(|(key, &old_row)| RowPair {
                    key,
                    old: Some(old_row),
                    new: None,
                }),
        );

        pairs
    }

    /// Cell text of an old row, or empty for the blank row
    pub fn old_value(&self, row: Option<&'a Row>, column: &str) -> Cow<'a, str> {
        self.value(self.old_table, row, column)
    }

    /// Cell text of a new row, or empty for the blank row
    pub fn new_value(&self, row: Option<&'a Row>, column: &str) -> Cow<'a, str> {
        self.value(self.new_table, row, column)
    }

    fn value(&self, table: &Table, row: Option<&'a Row>, column: &str) -> Cow<'a, str> {
        let Some(row) = row else {
            return Cow::Borrowed("");
        };
        let text = table.cell(row, column);
        if self.normalize_ids && column == self.id_column {
            normalize_key(text)
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Build a key→row index; a later duplicate replaces the earlier row but keeps its position
fn index_rows<'a>(table: &'a Table, id_column: &str, normalize: bool) -> IndexMap<String, &'a Row> {
    let mut index = IndexMap::with_capacity(table.row_count());
    for row in &table.rows {
        let raw = table.cell(row, id_column);
        let key = if normalize {
            normalize_key(raw).into_owned()
        } else {
            raw.to_string()
        };
        if let Some(previous) = index.insert(key, row) {
            warn!(
                "{}: duplicate {} {:?} on line {} replaces line {}",
                table.file_name(),
                id_column,
                table.cell(row, id_column),
                row.source_line,
                previous.source_line
            );
        }
    }
    index
}

/// Classify one old/new cell pair; the flag is set when the cell counts as a difference
pub fn render_cell(old: &str, new: &str, differ: &CellDiffer) -> (CellRendering, bool) {
    if old.trim().is_empty() && new.trim().is_empty() {
        return (CellRendering::Blank, false);
    }
    if old == new {
        return (CellRendering::Plain(substitute_bullets(old)), false);
    }

    let rendering = if new.is_empty() {
        CellRendering::Deleted(substitute_bullets(old))
    } else if old.is_empty() {
        CellRendering::Inserted(substitute_bullets(new))
    } else {
        CellRendering::Segments(differ.diff(&substitute_bullets(old), &substitute_bullets(new)))
    };
    (rendering, true)
}
