//! The ingestion engine: drives rows from a source through the processor
//! into a table builder, streaming diagnostics to a sink.

use serde::{Deserialize, Serialize};

use crate::coerce::CoercionConfig;
use crate::error::{Result, SmelterError};
use crate::row::RowProcessor;
use crate::schema::Schema;
use crate::validate::{Diagnostic, DiagnosticCode, Severity};

use super::traits::{DiagnosticSink, RowSource, TableBuilder};

/// Configuration for an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct SmelterConfig {
    /// Coercion policy (boolean tokens, temporal formats, null markers).
    pub coercion: CoercionConfig,
    /// Optional source name, substituted into fields that declare a
    /// [`crate::schema::FieldSource::SourceName`] source.
    pub source_name: Option<String>,
}

/// Running counters for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Rows pulled from the source (including a row whose pull failed).
    pub rows_seen: u64,
    /// Rows admitted to the table builder.
    pub rows_admitted: u64,
    /// Rows rejected by validation.
    pub rows_rejected: u64,
    /// True when a fatal diagnostic ended the run before source exhaustion.
    pub partial: bool,
}

/// The result of a completed (possibly partial) run: counters plus ownership
/// of the finished table.
#[derive(Debug)]
pub struct Ingestion<T> {
    /// Summary counters.
    pub summary: RunSummary,
    /// The finalized table handle.
    pub table: T,
}

/// The streaming validation-and-coercion engine.
///
/// `run` is single-pass and forward-only: each row is pulled, processed and
/// released before the next is requested, so resident memory stays at one
/// row regardless of input size.
#[derive(Debug, Clone, Default)]
pub struct Smelter {
    config: SmelterConfig,
}

impl Smelter {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: SmelterConfig) -> Self {
        Self { config }
    }

    /// Ingest every row from `source` against `schema`.
    ///
    /// Admitted rows stream into `builder` in input order; every diagnostic
    /// streams into `sink` in production order. A fatal diagnostic stops
    /// consumption after being forwarded and marks the summary partial.
    /// The builder is finalized on every exit path; only a collaborator
    /// failure (builder append/finish) aborts with an error, and even then
    /// the complete diagnostic stream up to that point has been delivered.
    pub fn run<S, B, K>(
        &self,
        mut source: S,
        schema: &Schema,
        mut builder: B,
        sink: &mut K,
    ) -> Result<Ingestion<B::Table>>
    where
        S: RowSource,
        B: TableBuilder,
        K: DiagnosticSink + ?Sized,
    {
        let processor = RowProcessor::new(
            schema,
            &self.config.coercion,
            self.config.source_name.as_deref(),
        )?;

        let mut summary = RunSummary::default();

        loop {
            let raw = match source.next_row() {
                Ok(Some(raw)) => raw,
                Ok(None) => break,
                Err(err) => {
                    // The failed pull counts as a seen row so the summary
                    // reflects where the run stopped.
                    let row = summary.rows_seen;
                    summary.rows_seen += 1;
                    summary.rows_rejected += 1;
                    sink.emit(Diagnostic::row_level(
                        row,
                        DiagnosticCode::StructuralCorruption,
                        format!("row source failed: {err}"),
                    ));
                    summary.partial = true;
                    break;
                }
            };

            summary.rows_seen += 1;
            let outcome = processor.process(&raw);
            let fatal = outcome
                .diagnostics
                .iter()
                .any(|d| d.severity == Severity::Fatal);

            for diagnostic in outcome.diagnostics {
                sink.emit(diagnostic);
            }

            match outcome.row {
                Some(row) => {
                    if let Err(err) = builder.append(row) {
                        // Best-effort finalize so the collaborator is not
                        // left open; the append failure is what we report.
                        let _ = builder.finish();
                        return Err(SmelterError::Builder(Box::new(err)));
                    }
                    summary.rows_admitted += 1;
                }
                None => summary.rows_rejected += 1,
            }

            if fatal {
                summary.partial = true;
                break;
            }
        }

        let table = builder
            .finish()
            .map_err(|err| SmelterError::Builder(Box::new(err)))?;

        Ok(Ingestion { summary, table })
    }
}
