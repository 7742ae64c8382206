//! Excel workbook output

use std::io::Write;

use anyhow::{Context, Result};
use log::warn;
use rust_xlsxwriter::{
    Color, ColNum, FilterCondition, Format, FormatAlign, FormatBorder, RowNum, Workbook,
    Worksheet,
};

use crate::diff::{CellRendering, DiffResult, StyleTag};

use super::OutputFormatter;

/// Heading of the trailing indicator column
pub const CHANGED_HEADING: &str = "Changed";

/// Longest text Excel accepts in a single cell
pub const MAX_CELL_CHARS: usize = 32_767;

const HEADER_BACKGROUND: u32 = 0x0070C0;

/// Concrete formats for every style tag, built once per workbook
#[derive(Debug, Clone)]
pub struct StyleSheet {
    header: Format,
    equal: Format,
    inserted: Format,
    deleted: Format,
    blank: Format,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        let cell = Format::new()
            .set_text_wrap()
            .set_num_format("@")
            .set_border(FormatBorder::Thin);

        Self {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_num_format("@")
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(HEADER_BACKGROUND))
                .set_text_wrap()
                .set_border(FormatBorder::Thin),
            equal: cell.clone(),
            inserted: cell.clone().set_font_color(Color::Blue),
            deleted: cell.clone().set_font_color(Color::Red).set_font_strikethrough(),
            blank: cell,
        }
    }

    /// Format of the header row
    pub fn header(&self) -> &Format {
        &self.header
    }

    /// Format for a style tag, used both for whole cells and rich-string runs
    pub fn format(&self, tag: StyleTag) -> &Format {
        match tag {
            StyleTag::Equal => &self.equal,
            StyleTag::Inserted => &self.inserted,
            StyleTag::Deleted => &self.deleted,
            StyleTag::Blank => &self.blank,
        }
    }
}

/// Writes the diff as a single-sheet workbook
pub struct XlsxOutput {
    styles: StyleSheet,
}

impl XlsxOutput {
    pub fn new() -> Self {
        Self::with_styles(StyleSheet::new())
    }

    pub fn with_styles(styles: StyleSheet) -> Self {
        Self { styles }
    }

    fn write_header(&self, sheet: &mut Worksheet, diff: &DiffResult) -> Result<ColNum> {
        sheet.set_freeze_panes(1, 0)?;

        let mut col: ColNum = 0;
        for (heading, &width) in &diff.header.common {
            sheet.write_string_with_format(0, col, heading, self.styles.header())?;
            sheet.set_column_width(col, width as f64)?;
            col += 1;
        }
        sheet.write_string_with_format(0, col, CHANGED_HEADING, self.styles.header())?;
        Ok(col)
    }

    fn write_cell(
        &self,
        sheet: &mut Worksheet,
        row: RowNum,
        col: ColNum,
        cell: &CellRendering,
    ) -> Result<bool> {
        let (runs, clipped) = clip_runs(cell.runs(), MAX_CELL_CHARS);
        match runs.as_slice() {
            [] => {
                sheet.write_blank(row, col, self.styles.format(StyleTag::Blank))?;
            }
            [(tag, text)] => {
                sheet.write_string_with_format(row, col, *text, self.styles.format(*tag))?;
            }
            _ => {
                let fragments: Vec<(&Format, &str)> = runs
                    .iter()
                    .map(|&(tag, text)| (self.styles.format(tag), text))
                    .collect();
                sheet.write_rich_string_with_format(
                    row,
                    col,
                    &fragments,
                    self.styles.format(cell.style()),
                )?;
            }
        }
        Ok(clipped)
    }
}

impl Default for XlsxOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for XlsxOutput {
    fn render(&self, diff: &DiffResult, writer: &mut dyn Write) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();

        let changed_col = self.write_header(sheet, diff)?;
        let headings: Vec<&str> = diff.header.columns().collect();

        let mut last_row: RowNum = 0;
        for (index, row) in diff.rows.iter().enumerate() {
            let row_number = row_num(index + 1)?;
            for (col, cell) in row.cells.iter().enumerate() {
                if self.write_cell(sheet, row_number, col_num(col)?, cell)? {
                    warn!(
                        "{} {}, column {}: cell text clipped to {} characters",
                        diff.id_column,
                        row.key,
                        headings.get(col).copied().unwrap_or_default(),
                        MAX_CELL_CHARS
                    );
                }
            }
            sheet.write_string_with_format(
                row_number,
                changed_col,
                row.changed_indicator(),
                self.styles.format(StyleTag::Equal),
            )?;
            last_row = row_number;
        }

        for col in 0..diff.header.common.len() {
            if !diff.is_column_visible(col) {
                sheet.set_column_hidden(col_num(col)?)?;
            }
        }

        sheet.autofilter(0, 0, last_row, changed_col)?;
        sheet.filter_column(changed_col, &FilterCondition::new().add_list_filter("Yes"))?;
        for index in 0..diff.rows.len() {
            if !diff.is_row_visible(index) {
                sheet.set_row_hidden(row_num(index + 1)?)?;
            }
        }

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        Ok(())
    }
}

/// Shorten `runs` to at most `limit` characters in total.
///
/// Deleted text is cut first, from the end of the cell; anything still over
/// the limit is cut from the trailing runs. Emptied runs are dropped.
fn clip_runs(mut runs: Vec<(StyleTag, &str)>, limit: usize) -> (Vec<(StyleTag, &str)>, bool) {
    let total: usize = runs.iter().map(|(_, text)| text.chars().count()).sum();
    if total <= limit {
        return (runs, false);
    }

    let mut excess = total - limit;
    for deleted_only in [true, false] {
        for (tag, text) in runs.iter_mut().rev() {
            if excess == 0 {
                break;
            }
            if deleted_only && *tag != StyleTag::Deleted {
                continue;
            }
            let len = text.chars().count();
            let keep = len.saturating_sub(excess);
            *text = truncate_chars(*text, keep);
            excess -= len - keep;
        }
    }
    runs.retain(|(_, text)| !text.is_empty());
    (runs, true)
}

fn truncate_chars(text: &str, keep: usize) -> &str {
    match text.char_indices().nth(keep) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).with_context(|| format!("Row {} exceeds worksheet limits", index))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).with_context(|| format!("Column {} exceeds worksheet limits", index))
}
