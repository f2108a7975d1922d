//! In-memory columnar table, the reference [`TableBuilder`] implementation.

use thiserror::Error;

use crate::row::TypedRow;
use crate::schema::Schema;
use crate::value::Value;

use super::traits::TableBuilder;

/// Error from the in-memory builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryTableError {
    /// An appended row did not match the table's columns.
    #[error("row has {got} values but the table has {expected} columns")]
    ShapeMismatch { expected: usize, got: usize },
}

/// A finished in-memory table, stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTable {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
}

impl MemoryTable {
    /// Column names in schema order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// All values of one column, by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(&self.columns[idx])
    }

    /// A single cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column)?.get(row)
    }
}

/// Builds a [`MemoryTable`] from appended rows.
#[derive(Debug, Clone)]
pub struct MemoryTableBuilder {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
}

impl MemoryTableBuilder {
    /// Create a builder with one empty column per schema field.
    pub fn new(schema: &Schema) -> Self {
        let names: Vec<String> = schema.field_names().map(|n| n.to_string()).collect();
        let columns = vec![Vec::new(); names.len()];
        Self { names, columns }
    }
}

impl TableBuilder for MemoryTableBuilder {
    type Table = MemoryTable;
    type Error = MemoryTableError;

    fn append(&mut self, row: TypedRow) -> Result<(), Self::Error> {
        if row.len() != self.names.len() {
            return Err(MemoryTableError::ShapeMismatch {
                expected: self.names.len(),
                got: row.len(),
            });
        }
        for (column, (_, value)) in self.columns.iter_mut().zip(row.into_values()) {
            column.push(value);
        }
        Ok(())
    }

    fn finish(self) -> Result<Self::Table, Self::Error> {
        Ok(MemoryTable {
            names: self.names,
            columns: self.columns,
        })
    }
}
