//! xlcompare - cell-level diff of two spreadsheets keyed by an ID column
//!
//! Rows of the old and new table are matched on a configurable identifier
//! column; changed cells are diffed character by character and rendered to
//! an Excel workbook, JSON, or the terminal.

pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use diff::{compute_diff, DiffResult};
pub use error::CompareError;
pub use model::Table;
