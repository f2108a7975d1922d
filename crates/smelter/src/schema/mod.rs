//! Declarative schema types: the contract an ingestion run validates against.

mod field;
mod table;
mod types;

pub use field::{ErrorPolicy, FieldSource, FieldSpec};
pub use table::Schema;
pub(crate) use table::compile_anchored;
pub use types::{Constraint, FieldType};
