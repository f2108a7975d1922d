//! Validation: diagnostics and per-field checking.

mod diagnostic;
mod field;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use field::{FieldIssue, FieldResult, FieldValidator};
