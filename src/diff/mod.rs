//! Diff engine for comparing tables

pub mod cell_diff;
mod row_diff;
mod schema_diff;
mod stats;

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::error::CompareError;
use crate::model::Table;

pub use cell_diff::{CellDiffer, DiffSegment, StyleTag};
pub use row_diff::{render_cell, RowMatcher, RowPair};
pub use schema_diff::{HeaderDiff, SchemaDiff};
pub use stats::DiffStats;

/// Outcome for one row key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowDiffStatus {
    Inserted,
    Deleted,
    Modified,
    Unchanged,
}

impl std::fmt::Display for RowDiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowDiffStatus::Inserted => write!(f, "Inserted"),
            RowDiffStatus::Deleted => write!(f, "Deleted"),
            RowDiffStatus::Modified => write!(f, "Modified"),
            RowDiffStatus::Unchanged => write!(f, "Unchanged"),
        }
    }
}

/// How a single output cell is to be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellRendering {
    /// Nothing on either side worth showing
    Blank,
    /// Same text on both sides
    Plain(String),
    /// Whole cell added
    Inserted(String),
    /// Whole cell removed
    Deleted(String),
    /// Character-level edit script
    Segments(Vec<DiffSegment>),
}

impl CellRendering {
    /// Base style of the cell as a whole
    pub fn style(&self) -> StyleTag {
        match self {
            CellRendering::Blank => StyleTag::Blank,
            CellRendering::Plain(_) | CellRendering::Segments(_) => StyleTag::Equal,
            CellRendering::Inserted(_) => StyleTag::Inserted,
            CellRendering::Deleted(_) => StyleTag::Deleted,
        }
    }

    /// Styled text runs making up the cell
    pub fn runs(&self) -> Vec<(StyleTag, &str)> {
        match self {
            CellRendering::Blank => Vec::new(),
            CellRendering::Plain(s) => vec![(StyleTag::Equal, s.as_str())],
            CellRendering::Inserted(s) => vec![(StyleTag::Inserted, s.as_str())],
            CellRendering::Deleted(s) => vec![(StyleTag::Deleted, s.as_str())],
            CellRendering::Segments(segments) => {
                segments.iter().map(|s| (s.style(), s.text())).collect()
            }
        }
    }

    /// Whether the cell shows any insertion or deletion
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            CellRendering::Inserted(_) | CellRendering::Deleted(_) | CellRendering::Segments(_)
        )
    }
}

/// Diff of one row key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDiffResult {
    /// Normalized row key
    pub key: String,
    pub status: RowDiffStatus,
    /// One rendering per common column, in output order
    pub cells: Vec<CellRendering>,
    /// Whether any column differed
    pub changed: bool,
}

impl RowDiffResult {
    /// Value of the trailing "Changed" column
    pub fn changed_indicator(&self) -> &'static str {
        if self.changed {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Result of comparing two tables
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    /// Identifier column the rows were matched on
    pub id_column: String,
    /// Column reconciliation
    pub header: HeaderDiff,
    /// Rows in unified key order
    pub rows: Vec<RowDiffResult>,
    /// Output column positions with at least one difference, plus the identifier
    pub visible_columns: BTreeSet<usize>,
    /// Row positions without any difference
    pub hidden_rows: BTreeSet<usize>,
    /// Statistics
    pub stats: DiffStats,
}

impl DiffResult {
    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.stats.has_changes()
    }

    /// Whether the output column at `index` should be shown
    pub fn is_column_visible(&self, index: usize) -> bool {
        self.visible_columns.contains(&index)
    }

    /// Whether the row at `index` should be shown
    pub fn is_row_visible(&self, index: usize) -> bool {
        !self.hidden_rows.contains(&index)
    }

    /// Rows with at least one difference
    pub fn changed_rows(&self) -> impl Iterator<Item = &RowDiffResult> {
        self.rows.iter().filter(|r| r.changed)
    }
}

/// Main diff engine
pub struct DiffEngine {
    config: Config,
    differ: CellDiffer,
}

impl DiffEngine {
    /// Create a new diff engine with configuration
    pub fn new(config: Config) -> Self {
        let differ = CellDiffer::new(config.max_diff_chars);
        Self { config, differ }
    }

    /// Compare two tables.
    ///
    /// Fails with [`CompareError::ColumnNotFound`] when either table lacks the
    /// identifier column; nothing is compared in that case.
    pub fn diff(&self, old_table: &Table, new_table: &Table) -> Result<DiffResult, CompareError> {
        let id_column = self.config.id_column.as_str();
        old_table.require_column(id_column)?;
        new_table.require_column(id_column)?;

        let header = SchemaDiff::compare(
            &old_table.column_widths(),
            &new_table.column_widths(),
            self.config.col_width_max,
        );

        let matcher = RowMatcher::new(old_table, new_table, id_column, self.config.normalize_ids);

        let mut result = DiffResult {
            id_column: id_column.to_string(),
            ..Default::default()
        };
        if let Some(position) = header.position(id_column) {
            result.visible_columns.insert(position);
        }

        for (row_index, pair) in matcher.match_rows().into_iter().enumerate() {
            let mut changed = false;
            let cells = header
                .columns()
                .enumerate()
                .map(|(col_index, column)| {
                    let old_value = matcher.old_value(pair.old, column);
                    let new_value = matcher.new_value(pair.new, column);
                    let (rendering, differs) = render_cell(&old_value, &new_value, &self.differ);
                    if differs {
                        changed = true;
                        result.visible_columns.insert(col_index);
                    }
                    rendering
                })
                .collect();

            let status = match (pair.old, pair.new) {
                (None, _) => RowDiffStatus::Inserted,
                (_, None) => RowDiffStatus::Deleted,
                _ if changed => RowDiffStatus::Modified,
                _ => RowDiffStatus::Unchanged,
            };
            result.stats.record(status);
            if !changed {
                result.hidden_rows.insert(row_index);
            }

            result.rows.push(RowDiffResult {
                key: pair.key.to_string(),
                status,
                cells,
                changed,
            });
        }

        debug!(
            "compared {} rows: {:?}, {} visible columns",
            result.rows.len(),
            result.stats,
            result.visible_columns.len()
        );

        result.header = header;
        Ok(result)
    }
}

/// Convenience function to compute diff
pub fn compute_diff(
    old_table: &Table,
    new_table: &Table,
    config: &Config,
) -> Result<DiffResult, CompareError> {
    let engine = DiffEngine::new(config.clone());
    engine.diff(old_table, new_table)
}
