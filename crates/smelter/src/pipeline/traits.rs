//! Collaborator seams the engine drives: row sources, table builders and
//! diagnostic sinks.

use crate::row::{RawRow, TypedRow};
use crate::validate::Diagnostic;

/// A pull-based, finite sequence of raw rows.
///
/// Exhaustion (`Ok(None)`) is distinct from failure: a structurally bad
/// record should still be yielded as a [`RawRow`] with its `malformed` flag
/// set, while `Err` means the source itself cannot safely continue and
/// aborts the run with a fatal diagnostic.
pub trait RowSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Pull the next row, or `None` at end of input.
    fn next_row(&mut self) -> Result<Option<RawRow>, Self::Error>;
}

/// Receives admitted rows in order and produces the finished table.
pub trait TableBuilder {
    /// The finished table handle.
    type Table;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append one admitted row. Rows arrive in input order.
    fn append(&mut self, row: TypedRow) -> Result<(), Self::Error>;

    /// Finalize the table. Called exactly once, on every exit path of a run,
    /// including fatal aborts; zero appended rows is valid.
    fn finish(self) -> Result<Self::Table, Self::Error>;
}

/// Receives diagnostics in emission order.
///
/// The engine hands over ownership on emission and never queries past
/// diagnostics back.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// An iterator of ready-made rows as a row source. Useful in tests and for
/// callers with rows already in memory.
#[derive(Debug)]
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I: Iterator<Item = RawRow>> RowSource for IterSource<I> {
    type Error = std::convert::Infallible;

    fn next_row(&mut self) -> Result<Option<RawRow>, Self::Error> {
        Ok(self.inner.next())
    }
}
