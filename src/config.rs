//! Configuration handling for xlcompare

use std::path::PathBuf;

/// Default identifier column heading
pub const DEFAULT_ID_COLUMN: &str = "ID";
/// Default output workbook
pub const DEFAULT_OUTFILE: &str = "diff.xlsx";
/// Default output file for `--format json`
pub const DEFAULT_JSON_OUTFILE: &str = "diff.json";
/// Default cap on output column widths
pub const DEFAULT_COL_WIDTH_MAX: usize = 50;
/// Cells longer than this many characters are diffed as a whole
pub const DEFAULT_MAX_DIFF_CHARS: usize = 10_000;

/// Output format for diff results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Json,
    Terminal,
}

impl OutputFormat {
    /// Whether the format produces a file at the configured output path
    pub fn writes_file(self) -> bool {
        !matches!(self, OutputFormat::Terminal)
    }

    /// Output path used when none is given
    pub fn default_outfile(self) -> &'static str {
        match self {
            OutputFormat::Json => DEFAULT_JSON_OUTFILE,
            OutputFormat::Xlsx | OutputFormat::Terminal => DEFAULT_OUTFILE,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "json" => Ok(OutputFormat::Json),
            "terminal" => Ok(OutputFormat::Terminal),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the old/original file
    pub old_file: PathBuf,
    /// Path to the new file
    pub new_file: PathBuf,
    /// Heading of the column that identifies rows
    pub id_column: String,
    /// Where the rendered diff is written
    pub outfile: PathBuf,
    /// Maximum column width in the output
    pub col_width_max: usize,
    /// Output format
    pub output_format: OutputFormat,
    /// For Excel files: which sheet to compare (first sheet when unset)
    pub sheet_name: Option<String>,
    /// Strip float formatting from numeric identifiers
    pub normalize_ids: bool,
    /// Character limit above which a cell is not aligned character by character
    pub max_diff_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            old_file: PathBuf::new(),
            new_file: PathBuf::new(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            outfile: PathBuf::from(DEFAULT_OUTFILE),
            col_width_max: DEFAULT_COL_WIDTH_MAX,
            output_format: OutputFormat::default(),
            sheet_name: None,
            normalize_ids: true,
            max_diff_chars: DEFAULT_MAX_DIFF_CHARS,
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(old_file: PathBuf, new_file: PathBuf) -> Self {
        Self {
            old_file,
            new_file,
            ..Default::default()
        }
    }

    /// Set the identifier column
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    /// Set the output path
    pub fn with_outfile(mut self, outfile: PathBuf) -> Self {
        self.outfile = outfile;
        self
    }

    /// Set the maximum output column width
    pub fn with_col_width_max(mut self, width: usize) -> Self {
        self.col_width_max = width;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = Some(name);
        self
    }

    /// Enable or disable identifier normalization
    pub fn with_normalize_ids(mut self, normalize: bool) -> Self {
        self.normalize_ids = normalize;
        self
    }

    /// Set the per-cell character diff limit
    pub fn with_max_diff_chars(mut self, limit: usize) -> Self {
        self.max_diff_chars = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli() {
        let config = Config::default();
        assert_eq!(config.id_column, "ID");
        assert_eq!(config.outfile, PathBuf::from("diff.xlsx"));
        assert_eq!(config.col_width_max, 50);
        assert!(config.normalize_ids);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("XLSX".parse::<OutputFormat>(), Ok(OutputFormat::Xlsx));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("html".parse::<OutputFormat>().is_err());
        assert!(!OutputFormat::Terminal.writes_file());
    }

    #[test]
    fn test_default_outfile_follows_format() {
        assert_eq!(OutputFormat::Xlsx.default_outfile(), "diff.xlsx");
        assert_eq!(OutputFormat::Json.default_outfile(), "diff.json");
    }
}
