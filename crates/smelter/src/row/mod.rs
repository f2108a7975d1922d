//! Raw and typed row representations plus the row processor.

mod processor;

use indexmap::IndexMap;

use crate::value::Value;

pub use processor::{RowOutcome, RowProcessor};

/// One row of raw input, positionally aligned with the schema.
///
/// Cells are `None` when the source had no token at that position — distinct
/// from `Some("")`, an empty-but-present token. Sources that detect a
/// structurally bad record (wrong token count, unparseable line) still yield
/// a `RawRow` with the `malformed` flag set rather than ending the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Zero-based index of the row within the run.
    pub index: u64,
    /// Raw tokens, one per schema field.
    pub cells: Vec<Option<String>>,
    /// Set by the source when the record did not have the expected shape.
    pub malformed: bool,
}

impl RawRow {
    /// A well-formed row from owned cells.
    pub fn new(index: u64, cells: Vec<Option<String>>) -> Self {
        Self {
            index,
            cells,
            malformed: false,
        }
    }

    /// Convenience constructor from present string tokens.
    pub fn from_strings(index: u64, cells: Vec<&str>) -> Self {
        Self::new(index, cells.into_iter().map(|c| Some(c.to_string())).collect())
    }

    /// Mark the row as structurally malformed.
    pub fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }
}

/// One admitted row of typed values, keyed by field name in schema order.
///
/// Created by the row processor and handed straight to the table builder;
/// the engine does not retain it afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedRow {
    values: IndexMap<String, Value>,
}

impl TypedRow {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    /// Get a value by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(name, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume the row, yielding values in schema order.
    pub fn into_values(self) -> impl Iterator<Item = (String, Value)> {
        self.values.into_iter()
    }
}
