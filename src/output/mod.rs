//! Output formatting for diff results

mod json;
mod terminal;
mod xlsx;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::diff::DiffResult;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;
pub use xlsx::{StyleSheet, XlsxOutput};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render diff result to a writer
    fn render(&self, diff: &DiffResult, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Xlsx => Box::new(XlsxOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        }
    }
}

/// Render diff result to a file.
///
/// The whole artifact is rendered in memory first, so a failed render leaves
/// no partial file behind.
pub fn render_to_file(diff: &DiffResult, path: &Path, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut buffer = Vec::new();
    formatter.render(diff, &mut buffer)?;
    fs::write(path, buffer)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

/// Render diff result to stdout
pub fn render_to_stdout(diff: &DiffResult, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout();
    formatter.render(diff, &mut stdout)
}
