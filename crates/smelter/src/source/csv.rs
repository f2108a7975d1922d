//! Adapts a CSV reader into a [`RowSource`].

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SmelterError};
use crate::pipeline::RowSource;
use crate::row::RawRow;
use crate::schema::{FieldSource, Schema};

/// Streams CSV records as schema-aligned raw rows.
///
/// Headers are required and matched to schema field names, so CSV column
/// order may differ from schema order. Records with a token count different
/// from the header are yielded with the malformed flag set rather than
/// terminating the stream; only reader-level failures (I/O, invalid UTF-8)
/// end the run.
pub struct CsvRowSource<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    /// Schema position -> CSV column index; `None` for synthesized fields.
    mapping: Vec<Option<usize>>,
    header_len: usize,
    index: u64,
}

impl CsvRowSource<File> {
    /// Open a CSV file as a row source for `schema`.
    pub fn from_path(path: impl AsRef<Path>, schema: &Schema) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        Self::new(reader, schema)
    }
}

impl<R: Read> CsvRowSource<R> {
    /// Wrap an existing CSV reader.
    ///
    /// The reader should be built with `flexible(true)` so short/long
    /// records surface as malformed rows instead of reader errors.
    pub fn new(mut reader: csv::Reader<R>, schema: &Schema) -> Result<Self> {
        let headers = reader.headers()?.clone();

        let mut mapping = Vec::with_capacity(schema.len());
        for field in schema.fields() {
            match &field.source {
                FieldSource::Column => {
                    let idx = headers
                        .iter()
                        .position(|h| h == field.name)
                        .ok_or_else(|| SmelterError::MissingColumn {
                            name: field.name.clone(),
                        })?;
                    mapping.push(Some(idx));
                }
                // Synthesized fields take no input column.
                _ => mapping.push(None),
            }
        }

        Ok(Self {
            records: reader.into_records(),
            mapping,
            header_len: headers.len(),
            index: 0,
        })
    }
}

// The record iterator has no Debug impl, so it is omitted here.
impl<R: Read> fmt::Debug for CsvRowSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvRowSource")
            .field("mapping", &self.mapping)
            .field("header_len", &self.header_len)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<R: Read> RowSource for CsvRowSource<R> {
    type Error = csv::Error;

    fn next_row(&mut self) -> std::result::Result<Option<RawRow>, Self::Error> {
        let Some(result) = self.records.next() else {
            return Ok(None);
        };
        let record = result?;

        let cells = self
            .mapping
            .iter()
            .map(|m| m.and_then(|ci| record.get(ci)).map(|s| s.to_string()))
            .collect();

        let mut row = RawRow::new(self.index, cells);
        if record.len() != self.header_len {
            row = row.malformed();
        }
        self.index += 1;
        Ok(Some(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType};

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("id", FieldType::Integer),
            FieldSpec::new("name", FieldType::String),
        ])
        .unwrap()
    }

    fn source_from<'a>(data: &'a str, schema: &Schema) -> CsvRowSource<&'a [u8]> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());
        CsvRowSource::new(reader, schema).unwrap()
    }

    #[test]
    fn test_reads_rows_in_order() {
        let schema = schema();
        let mut source = source_from("id,name\n1,a\n2,b\n", &schema);

        let first = source.next_row().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.cells, vec![Some("1".to_string()), Some("a".to_string())]);

        let second = source.next_row().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert!(source.next_row().unwrap().is_none());
    }

    #[test]
    fn test_reordered_columns_align_to_schema() {
        let schema = schema();
        let mut source = source_from("name,id\nalice,7\n", &schema);
        let row = source.next_row().unwrap().unwrap();
        assert_eq!(
            row.cells,
            vec![Some("7".to_string()), Some("alice".to_string())]
        );
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let schema = schema();
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader("id,other\n1,x\n".as_bytes());
        assert!(matches!(
            CsvRowSource::new(reader, &schema),
            Err(SmelterError::MissingColumn { name }) if name == "name"
        ));
    }

    #[test]
    fn test_short_record_is_malformed_not_fatal() {
        let schema = schema();
        let mut source = source_from("id,name\n1\n2,b\n", &schema);

        let short = source.next_row().unwrap().unwrap();
        assert!(short.malformed);
        assert_eq!(short.cells, vec![Some("1".to_string()), None]);

        // The stream continues past the bad record.
        let next = source.next_row().unwrap().unwrap();
        assert!(!next.malformed);
    }

    #[test]
    fn test_debug_output_skips_the_record_stream() {
        let schema = schema();
        let source = source_from("id,name\n1,a\n", &schema);
        let rendered = format!("{source:?}");
        assert!(rendered.contains("CsvRowSource"));
        assert!(rendered.contains("header_len"));
    }

    #[test]
    fn test_synthesized_fields_need_no_column() {
        let schema = Schema::new(vec![
            FieldSpec::new("id", FieldType::Integer),
            FieldSpec::new("row_number", FieldType::Integer)
                .with_source(FieldSource::RowNumber),
        ])
        .unwrap();
        let mut source = source_from("id\n5\n", &schema);
        let row = source.next_row().unwrap().unwrap();
        assert_eq!(row.cells, vec![Some("5".to_string()), None]);
    }
}
