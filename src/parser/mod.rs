//! Table loaders for the supported spreadsheet formats

mod csv;
mod excel;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::config::Config;
use crate::error::CompareError;
use crate::model::Table;

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(ExcelParser), Box::new(CsvParser)],
        }
    }

    /// Get a parser for the given file path, sniffing the content when the extension is unknown
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if let Some(parser) = self.find(&ext) {
            return Ok(parser);
        }

        if let Some(detected) = detect_format(path) {
            debug!("{}: detected {} content", path.display(), detected);
            if let Some(parser) = self.find(detected) {
                return Ok(parser);
            }
        }

        let ext = if ext.is_empty() { "unknown".to_string() } else { ext };
        Err(CompareError::unsupported_format(ext).into())
    }

    fn find(&self, ext: &str) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.supports_extension(ext))
            .map(|p| p.as_ref())
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        let table = parser.parse(path, config)?;
        debug!(
            "{}: loaded {} rows x {} columns",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

/// Detect file format from content (for files without a known extension)
pub fn detect_format(path: &Path) -> Option<&'static str> {
    let mut file = File::open(path).ok()?;
    let mut buffer = [0u8; 4];
    file.read_exact(&mut buffer).ok()?;

    match &buffer {
        // Excel ZIP container (xlsx)
        b"PK\x03\x04" => Some("xlsx"),
        // Compound document (xls)
        b"\xD0\xCF\x11\xE0" => Some("xls"),
        _ => Some("csv"),
    }
}

/// Display name for a table read from `path`
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
