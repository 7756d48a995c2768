//! Flattening of nested archive records into a single table.
//!
//! Records come back from the API as nested JSON objects — linked
//! resources like the sampling point or determinand expand into
//! sub-objects several levels deep. Analysis wants one flat row per
//! record, with nested keys joined to their parent key by a separator.
//! Arrays are carried through as opaque values, never exploded into
//! columns.

use std::collections::HashSet;
use std::io;

use serde_json::{Map, Value};

use crate::model::Record;

/// Separator joining nested keys to their parent, e.g. `sample_id`.
pub const DEFAULT_SEPARATOR: &str = "_";

/// One flattened record: joined key paths mapped to scalar-or-opaque
/// values, in the order the keys were encountered.
pub type FlatRow = Map<String, Value>;

// ---------------------------------------------------------------------------
// Record flattening
// ---------------------------------------------------------------------------

/// Flatten one record by recursively inlining nested objects.
///
/// Scalars and arrays are copied through untouched; only objects
/// recurse. A record that is not an object flattens to an empty row.
pub fn flatten_record(record: &Record, sep: &str) -> FlatRow {
    let mut row = FlatRow::new();
    if let Value::Object(fields) = record {
        flatten_into(&mut row, fields, "", sep);
    }
    row
}

fn flatten_into(row: &mut FlatRow, fields: &Map<String, Value>, prefix: &str, sep: &str) {
    for (key, value) in fields {
        let flat_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, sep, key)
        };
        match value {
            Value::Object(nested) => flatten_into(row, nested, &flat_key, sep),
            other => {
                row.insert(flat_key, other.clone());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// A column-oriented view over a batch of flattened records.
///
/// Row order matches the input record order. The column set is the
/// union of every row's keys, in first-seen order; rows missing a
/// column simply have no value there (rendered empty in CSV). Nothing
/// is deduplicated or coerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    pub columns: Vec<String>,
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    /// Flatten a batch of records with the default `_` separator.
    pub fn from_records(records: &[Record]) -> Self {
        Self::with_separator(records, DEFAULT_SEPARATOR)
    }

    /// Flatten a batch of records with a caller-chosen separator.
    pub fn with_separator(records: &[Record], sep: &str) -> Self {
        let mut columns = Vec::new();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            let row = flatten_record(record, sep);
            for key in row.keys() {
                if seen.insert(key.clone()) {
                    columns.push(key.clone());
                }
            }
            rows.push(row);
        }

        FlatTable { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at (row, column), if that row has the column.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// Write the table as CSV: one header row of column names, one
    /// record per row, missing and null cells empty.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|column| match row.get(column) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                })
                .collect();
            out.write_record(&cells)?;
        }
        out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
