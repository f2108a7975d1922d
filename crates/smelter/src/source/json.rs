//! Adapts line-delimited JSON into a [`RowSource`].

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::Result;
use crate::pipeline::RowSource;
use crate::row::RawRow;
use crate::schema::{FieldSource, Schema};

/// Streams newline-delimited JSON objects as schema-aligned raw rows.
///
/// Values are extracted by field name; dotted names address nested objects
/// (`user.name`). JSON null and missing keys are absent; scalars are
/// rendered to their raw string form and handed to coercion like any other
/// token. A line that is not a JSON object is yielded as a malformed row,
/// not a stream error. Blank lines are skipped.
#[derive(Debug)]
pub struct JsonLinesRowSource<R: BufRead> {
    lines: Lines<R>,
    /// Schema position -> field name; `None` for synthesized fields.
    names: Vec<Option<String>>,
    index: u64,
}

impl JsonLinesRowSource<BufReader<File>> {
    /// Open an NDJSON file as a row source for `schema`.
    pub fn from_path(path: impl AsRef<Path>, schema: &Schema) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), schema))
    }
}

impl<R: BufRead> JsonLinesRowSource<R> {
    /// Wrap a buffered reader of newline-delimited JSON.
    pub fn new(reader: R, schema: &Schema) -> Self {
        let names = schema
            .fields()
            .iter()
            .map(|f| match &f.source {
                FieldSource::Column => Some(f.name.clone()),
                _ => None,
            })
            .collect();

        Self {
            lines: reader.lines(),
            names,
            index: 0,
        }
    }

    fn emit(&mut self, cells: Vec<Option<String>>, malformed: bool) -> RawRow {
        let mut row = RawRow::new(self.index, cells);
        if malformed {
            row = row.malformed();
        }
        self.index += 1;
        row
    }
}

impl<R: BufRead> RowSource for JsonLinesRowSource<R> {
    type Error = io::Error;

    fn next_row(&mut self) -> std::result::Result<Option<RawRow>, Self::Error> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let all_absent = vec![None; self.names.len()];
            let parsed: serde_json::Value = match serde_json::from_str(&line) {
                Ok(value) => value,
                Err(_) => return Ok(Some(self.emit(all_absent, true))),
            };
            if !parsed.is_object() {
                return Ok(Some(self.emit(all_absent, true)));
            }

            let cells = self
                .names
                .iter()
                .map(|name| {
                    name.as_deref()
                        .and_then(|n| lookup_path(&parsed, n))
                        .and_then(json_to_raw)
                })
                .collect();
            return Ok(Some(self.emit(cells, false)));
        }
    }
}

/// Resolve a possibly-dotted field name against a JSON object.
fn lookup_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}

/// Render a JSON value to the raw string the coercers consume.
fn json_to_raw(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
