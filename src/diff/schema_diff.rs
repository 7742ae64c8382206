//! Schema comparison logic

use indexmap::{IndexMap, IndexSet};
use log::warn;
use serde::Serialize;

/// Result of reconciling the old and new column sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderDiff {
    /// Columns present in both tables, in old-table order, with clipped widths
    pub common: IndexMap<String, usize>,
    /// Columns only in the old table, in old-table order
    pub old_only: IndexSet<String>,
    /// Columns only in the new table, in new-table order
    pub new_only: IndexSet<String>,
}

impl HeaderDiff {
    /// Position of a common column in the output
    pub fn position(&self, column: &str) -> Option<usize> {
        self.common.get_index_of(column)
    }

    /// Common column names in output order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.common.keys().map(String::as_str)
    }

    /// Human-readable notices about columns that were not compared
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();
        if !self.old_only.is_empty() {
            notices.push(format!(
                "Columns in old but not new: {}",
                join(&self.old_only)
            ));
        }
        if !self.new_only.is_empty() {
            notices.push(format!(
                "Columns in new but not old: {}",
                join(&self.new_only)
            ));
        }
        notices
    }
}

fn join(columns: &IndexSet<String>) -> String {
    columns
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Schema comparison engine
pub struct SchemaDiff;

impl SchemaDiff {
    /// Reconcile two column→width mappings, clipping widths to `max_width`
    pub fn compare(
        old: &IndexMap<&str, usize>,
        new: &IndexMap<&str, usize>,
        max_width: usize,
    ) -> HeaderDiff {
        let common: IndexMap<String, usize> = old
            .iter()
            .filter(|(name, _)| new.contains_key(*name))
            .map(|(name, &width)| (name.to_string(), width.min(max_width)))
            .collect();

        let old_only = old
            .keys()
            .filter(|name| !new.contains_key(*name))
            .map(|name| name.to_string())
            .collect();

        let new_only = new
            .keys()
            .filter(|name| !old.contains_key(*name))
            .map(|name| name.to_string())
            .collect();

        if common.is_empty() {
            warn!("old and new tables share no columns; the diff will have no data columns");
        }

        HeaderDiff {
            common,
            old_only,
            new_only,
        }
    }
}
