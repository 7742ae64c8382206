//! Change statistics

use serde::{Deserialize, Serialize};

use super::RowDiffStatus;

/// Row counts by outcome
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub modified: usize,
    /// Tallied for completeness; never counted as a change
    pub unchanged: usize,
}

impl DiffStats {
    /// Count one row
    pub fn record(&mut self, status: RowDiffStatus) {
        match status {
            RowDiffStatus::Inserted => self.inserted += 1,
            RowDiffStatus::Deleted => self.deleted += 1,
            RowDiffStatus::Modified => self.modified += 1,
            RowDiffStatus::Unchanged => self.unchanged += 1,
        }
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.inserted > 0 || self.deleted > 0 || self.modified > 0
    }

    /// Summary lines, e.g. `Inserted rows: 2`
    pub fn report(&self) -> Vec<String> {
        if !self.has_changes() {
            return vec!["No differences found.".to_string()];
        }

        [
            ("Inserted", self.inserted),
            ("Deleted", self.deleted),
            ("Modified", self.modified),
        ]
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(category, count)| format!("{} rows: {}", category, count))
        .collect()
    }
}
