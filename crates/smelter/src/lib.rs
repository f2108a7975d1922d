//! Smelter: streaming schema-driven validation and type coercion for
//! tabular data.
//!
//! Smelter takes loosely-typed rows of raw text, validates and coerces them
//! against a declared [`Schema`], and streams the results two ways: admitted
//! rows into a columnar [`TableBuilder`], and every validation finding into
//! a [`DiagnosticSink`] as a [`Diagnostic`] with a severity and a code.
//!
//! # Core Principles
//!
//! - **Streaming**: one row resident at a time, regardless of input size
//! - **Failures are values**: bad fields become diagnostics, never panics;
//!   a bad row never aborts the run (only a fatal source failure does)
//! - **Declarative**: the schema is built once, validated once, and shared
//!   read-only across the whole run
//!
//! # Example
//!
//! ```
//! use smelter::{
//!     Constraint, FieldSpec, FieldType, IterSource, MemoryTableBuilder, RawRow, Schema, Smelter,
//! };
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::new("age", FieldType::Integer)
//!         .required()
//!         .with_constraint(Constraint::Range { min: Some(0.0), max: Some(120.0) }),
//! ])
//! .unwrap();
//!
//! let rows = IterSource::new(
//!     vec![
//!         RawRow::from_strings(0, vec!["17"]),
//!         RawRow::from_strings(1, vec!["200"]),
//!     ]
//!     .into_iter(),
//! );
//!
//! let mut diagnostics = Vec::new();
//! let result = Smelter::new()
//!     .run(rows, &schema, MemoryTableBuilder::new(&schema), &mut diagnostics)
//!     .unwrap();
//!
//! assert_eq!(result.summary.rows_admitted, 1);
//! assert_eq!(result.summary.rows_rejected, 1);
//! assert_eq!(diagnostics.len(), 1);
//! ```

pub mod coerce;
pub mod error;
pub mod pipeline;
pub mod row;
pub mod schema;
pub mod source;
pub mod transform;
pub mod validate;
pub mod value;

pub use coerce::{CoercionConfig, CoercionError, coerce};
pub use error::{Result, SmelterError};
pub use pipeline::{
    DiagnosticSink, Ingestion, IterSource, MemoryTable, MemoryTableBuilder, RowSource, RunSummary,
    Smelter, SmelterConfig, TableBuilder,
};
pub use row::{RawRow, RowOutcome, RowProcessor, TypedRow};
pub use schema::{Constraint, ErrorPolicy, FieldSource, FieldSpec, FieldType, Schema};
pub use source::{CsvRowSource, JsonLinesRowSource};
pub use transform::{DefaultMode, Transform, TransformError};
pub use validate::{Diagnostic, DiagnosticCode, FieldIssue, FieldResult, FieldValidator, Severity};
pub use value::Value;
