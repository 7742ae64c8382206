//! Error types for xlcompare

/// Fatal conditions that stop a comparison before anything is written
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    #[error("{path} not found")]
    FileNotFound { path: String },

    #[error("Column {column} not found in {file}")]
    ColumnNotFound { column: String, file: String },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("No data found in {file}")]
    EmptySheet { file: String },
}

impl CompareError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn column_not_found(column: impl Into<String>, file: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            file: file.into(),
        }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn empty_sheet(file: impl Into<String>) -> Self {
        Self::EmptySheet { file: file.into() }
    }
}
