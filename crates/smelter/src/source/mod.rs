//! Row-source adapters for common text formats.
//!
//! The engine depends only on [`crate::pipeline::RowSource`]; these adapters
//! are shipped implementations for delimited text and line-delimited JSON.

mod csv;
mod json;

pub use csv::CsvRowSource;
pub use json::JsonLinesRowSource;
