//! Error types for the smelter library.
//!
//! Per-value failures (coercion, constraint, transform) are not errors in
//! this sense: they travel as [`crate::validate::Diagnostic`] values through
//! the diagnostic sink. [`SmelterError`] covers schema construction problems
//! and external-collaborator failures that abort a run.

use thiserror::Error;

/// Main error type for smelter operations.
#[derive(Debug, Error)]
pub enum SmelterError {
    /// Two fields in one schema share a name.
    #[error("duplicate field '{name}' in schema")]
    DuplicateField { name: String },

    /// A constraint was declared on a type it is not meaningful for.
    #[error("{constraint} constraint is not meaningful for {field_type} field '{name}'")]
    IncompatibleConstraint {
        name: String,
        constraint: &'static str,
        field_type: &'static str,
    },

    /// A pattern constraint or regex transform failed to compile.
    #[error("invalid pattern for field '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A non-nullable field cannot be nulled on error.
    #[error("field '{name}' is not nullable and cannot use a null-on-error policy")]
    PolicyConflict { name: String },

    /// An enum field was declared with no allowed values.
    #[error("enum field '{name}' has no allowed values")]
    EmptyEnumeration { name: String },

    /// The input header is missing a column the schema requires.
    #[error("missing required column '{name}' in input header")]
    MissingColumn { name: String },

    /// The table builder failed to accept a row or to finalize.
    #[error("table builder error: {0}")]
    Builder(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the CSV library.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for smelter operations.
pub type Result<T> = std::result::Result<T, SmelterError>;
