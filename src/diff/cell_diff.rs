//! Character-level comparison of cell text

use log::debug;
use serde::{Deserialize, Serialize};
use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::config::DEFAULT_MAX_DIFF_CHARS;

/// Presentation class of a rendered cell or segment.
///
/// Renderers map each tag to a concrete format; the diff engine never deals
/// in fonts or colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Equal,
    Inserted,
    Deleted,
    Blank,
}

/// One contiguous span of cell text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum DiffSegment {
    Equal(String),
    Inserted(String),
    Deleted(String),
}

impl DiffSegment {
    /// Segment text
    pub fn text(&self) -> &str {
        match self {
            DiffSegment::Equal(s) | DiffSegment::Inserted(s) | DiffSegment::Deleted(s) => s,
        }
    }

    /// Style tag for this segment
    pub fn style(&self) -> StyleTag {
        match self {
            DiffSegment::Equal(_) => StyleTag::Equal,
            DiffSegment::Inserted(_) => StyleTag::Inserted,
            DiffSegment::Deleted(_) => StyleTag::Deleted,
        }
    }
}

/// Replace the `*. ` list marker with a bullet glyph
pub fn substitute_bullets(text: &str) -> String {
    text.replace("*. ", "\u{2022} ")
}

/// Computes edit scripts between cell strings
#[derive(Debug, Clone, Copy)]
pub struct CellDiffer {
    max_chars: usize,
}

impl Default for CellDiffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIFF_CHARS)
    }
}

impl CellDiffer {
    /// Create a differ that aligns cells of up to `max_chars` characters
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Diff `old` against `new`.
    ///
    /// The `Equal` and `Deleted` segments concatenate back to `old`; the
    /// `Equal` and `Inserted` segments concatenate back to `new`.
    pub fn diff(&self, old: &str, new: &str) -> Vec<DiffSegment> {
        if old == new {
            return non_empty(DiffSegment::Equal(old.to_string()));
        }
        if old.is_empty() {
            return vec![DiffSegment::Inserted(new.to_string())];
        }
        if new.is_empty() {
            return vec![DiffSegment::Deleted(old.to_string())];
        }

        let old_chars: Vec<char> = old.chars().collect();
        let new_chars: Vec<char> = new.chars().collect();

        if old_chars.len() > self.max_chars || new_chars.len() > self.max_chars {
            debug!(
                "cell of {}/{} chars exceeds diff limit {}, replacing whole text",
                old_chars.len(),
                new_chars.len(),
                self.max_chars
            );
            return vec![
                DiffSegment::Deleted(old.to_string()),
                DiffSegment::Inserted(new.to_string()),
            ];
        }

        let ops = capture_diff_slices(Algorithm::Myers, &old_chars, &new_chars);
        let mut segments = Vec::with_capacity(ops.len());
        for op in ops {
            match op {
                DiffOp::Equal {
                    old_index, len, ..
                } => push(
                    &mut segments,
                    DiffSegment::Equal(span(&old_chars, old_index, len)),
                ),
                DiffOp::Delete {
                    old_index, old_len, ..
                } => push(
                    &mut segments,
                    DiffSegment::Deleted(span(&old_chars, old_index, old_len)),
                ),
                DiffOp::Insert {
                    new_index, new_len, ..
                } => push(
                    &mut segments,
                    DiffSegment::Inserted(span(&new_chars, new_index, new_len)),
                ),
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    push(
                        &mut segments,
                        DiffSegment::Deleted(span(&old_chars, old_index, old_len)),
                    );
                    push(
                        &mut segments,
                        DiffSegment::Inserted(span(&new_chars, new_index, new_len)),
                    );
                }
            }
        }
        segments
    }
}

fn span(chars: &[char], start: usize, len: usize) -> String {
    chars[start..start + len].iter().collect()
}

fn non_empty(segment: DiffSegment) -> Vec<DiffSegment> {
    if segment.text().is_empty() {
        Vec::new()
    } else {
        vec![segment]
    }
}

fn push(segments: &mut Vec<DiffSegment>, segment: DiffSegment) {
    if !segment.text().is_empty() {
        segments.push(segment);
    }
}
