//! CSV documents as value trees.
//!
//! The first row is the header. Every following row becomes a mapping from
//! header to cell. A document with exactly one data row yields that mapping
//! directly, so a single-record CSV file can stand in for a flat
//! configuration; any other row count yields a sequence of mappings.

use serde_json::{Map, Number, Value};

use crate::LoadError;

/// Parse CSV text into a value tree.
///
/// # Errors
///
/// Returns `LoadError::Csv` for malformed input (for example rows whose
/// length differs from the header).
pub fn parse_csv(content: &str) -> Result<Value, LoadError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, cell)| (key.to_string(), infer_scalar(cell)))
            .collect();
        rows.push(Value::Object(row));
    }

    if rows.len() == 1 {
        Ok(rows.remove(0))
    } else {
        Ok(Value::Array(rows))
    }
}

/// Infer a scalar from a CSV cell.
///
/// Empty cells are null. Then booleans, integers and finite floats are
/// tried in that order; anything else stays a string.
pub fn infer_scalar(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}
