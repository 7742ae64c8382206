//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;

use crate::config::Config;
use crate::error::CompareError;
use crate::model::{Column, Table};

use super::{file_stem, Parser};

/// Parser for delimited text files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path, _config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let delimiter = if is_tsv(path) { b'\t' } else { b',' };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(BufReader::new(file));

        let headers = csv_reader
            .byte_headers()
            .context("Failed to read CSV headers")?
            .clone();
        if headers.is_empty() {
            return Err(CompareError::empty_sheet(path.display().to_string()).into());
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(column_name(&String::from_utf8_lossy(name), i), i))
            .collect();

        let mut table = Table::new(file_stem(path), path, columns);

        for (line_num, result) in csv_reader.byte_records().enumerate() {
            // +2 for 1-indexing and header
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?;
            if std::str::from_utf8(record.as_slice()).is_err() {
                warn!(
                    "{}: row {} is not valid UTF-8; invalid bytes replaced",
                    path.display(),
                    line_num + 2
                );
            }
            let cells = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();
            table.add_row(cells, line_num + 2);
        }

        Ok(table)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

fn is_tsv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tsv"))
}

fn column_name(name: &str, index: usize) -> String {
    if name.is_empty() {
        format!("Column{}", index + 1)
    } else {
        name.to_string()
    }
}
