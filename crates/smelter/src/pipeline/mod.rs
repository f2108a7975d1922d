//! The ingestion pipeline: collaborator traits, the engine, and in-memory
//! reference implementations.

mod engine;
mod memory;
mod traits;

pub use engine::{Ingestion, RunSummary, Smelter, SmelterConfig};
pub use memory::{MemoryTable, MemoryTableBuilder, MemoryTableError};
pub use traits::{DiagnosticSink, IterSource, RowSource, TableBuilder};
