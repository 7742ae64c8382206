//! Column metadata and display width hints

use serde::{Deserialize, Serialize};

/// Scale applied to character counts when estimating display widths
const WIDTH_SCALE: f64 = 1.25;

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
    /// Suggested display width, in characters
    pub width: usize,
}

impl Column {
    /// Create a new column sized to fit its own header
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        let name = name.into();
        let width = scaled_width(name.chars().count());
        Self { name, index, width }
    }

    /// Widen the column so that `text` fits
    pub fn fit(&mut self, text: &str) {
        self.width = estimate_width(text, self.width);
    }
}

fn scaled_width(chars: usize) -> usize {
    (WIDTH_SCALE * chars as f64) as usize
}

/// Estimate the width needed for multi-line `text`, never shrinking below `initial`
pub fn estimate_width(text: &str, initial: usize) -> usize {
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    initial.max(scaled_width(longest))
}
