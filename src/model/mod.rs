//! Data model for tabular data representation

mod key;
mod schema;
mod table;

pub use key::normalize_key;
pub use schema::{estimate_width, Column};
pub use table::{Row, Table};
