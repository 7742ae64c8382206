//! Colored terminal output

use std::io::{IsTerminal, Write};

use anyhow::Result;
use termcolor::{Ansi, Color, ColorSpec, NoColor, WriteColor};

use crate::diff::{DiffResult, StyleTag};

use super::OutputFormatter;

/// Terminal output with colors
pub struct TerminalOutput {
    color: bool,
}

impl TerminalOutput {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    pub fn new() -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn write_report<W: WriteColor>(&self, diff: &DiffResult, out: &mut W) -> Result<()> {
        let columns: Vec<&str> = diff.header.columns().collect();

        for row in diff.changed_rows() {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", row.status)?;
            out.reset()?;
            writeln!(out, " {}: {}", diff.id_column, row.key)?;

            for (index, (column, cell)) in columns.iter().zip(&row.cells).enumerate() {
                if !diff.is_column_visible(index) || !cell.is_change() {
                    continue;
                }
                write!(out, "  {}: ", column)?;
                for (tag, text) in cell.runs() {
                    out.set_color(&color_spec(tag))?;
                    write!(out, "{}", text)?;
                    out.reset()?;
                }
                writeln!(out)?;
            }
        }

        if diff.changed_rows().next().is_some() {
            writeln!(out)?;
        }
        for line in diff.stats.report() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

fn color_spec(tag: StyleTag) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match tag {
        StyleTag::Inserted => {
            spec.set_fg(Some(Color::Green));
        }
        StyleTag::Deleted => {
            spec.set_fg(Some(Color::Red)).set_strikethrough(true);
        }
        StyleTag::Equal | StyleTag::Blank => {}
    }
    spec
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, diff: &DiffResult, writer: &mut dyn Write) -> Result<()> {
        if self.color {
            self.write_report(diff, &mut Ansi::new(writer))
        } else {
            self.write_report(diff, &mut NoColor::new(writer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{CellRendering, DiffSegment, RowDiffResult, RowDiffStatus};

    fn sample() -> DiffResult {
        let mut diff = DiffResult {
            id_column: "ID".to_string(),
            ..Default::default()
        };
        diff.header.common.insert("ID".to_string(), 2);
        diff.header.common.insert("Name".to_string(), 5);
        diff.visible_columns.extend([0, 1]);
        diff.rows.push(RowDiffResult {
            key: "1".to_string(),
            status: RowDiffStatus::Unchanged,
            cells: vec![
                CellRendering::Plain("1".to_string()),
                CellRendering::Plain("Tom".to_string()),
            ],
            changed: false,
        });
        diff.rows.push(RowDiffResult {
            key: "2".to_string(),
            status: RowDiffStatus::Modified,
            cells: vec![
                CellRendering::Plain("2".to_string()),
                CellRendering::Segments(vec![
                    DiffSegment::Equal("S".to_string()),
                    DiffSegment::Deleted("a".to_string()),
                    DiffSegment::Inserted("u".to_string()),
                    DiffSegment::Equal("m".to_string()),
                ]),
            ],
            changed: true,
        });
        diff.stats.modified = 1;
        diff.stats.unchanged = 1;
        diff
    }

    #[test]
    fn test_plain_report() {
        let mut buffer = Vec::new();
        TerminalOutput::with_color(false)
            .render(&sample(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text, "Modified ID: 2\n  Name: Saum\n\nModified rows: 1\n");
    }

    #[test]
    fn test_colored_report_has_escapes() {
        let mut buffer = Vec::new();
        TerminalOutput::with_color(true)
            .render(&sample(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("\x1b["));
        assert!(text.contains("Modified rows: 1"));
    }

    #[test]
    fn test_no_differences() {
        let mut buffer = Vec::new();
        TerminalOutput::with_color(false)
            .render(&DiffResult::default(), &mut buffer)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "No differences found.\n");
    }
}
