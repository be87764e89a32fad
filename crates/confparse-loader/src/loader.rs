//! Reading configuration documents into value trees.
//!
//! Every format is decoded into a [`serde_json::Value`], so callers work with
//! one schema-less tree of mappings, sequences and scalars regardless of the
//! file the data came from.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{table::parse_csv, DocFormat, LoadError};

/// Read a configuration file, detecting its format from the extension.
///
/// # Errors
///
/// Returns `LoadError` if:
/// - The file does not exist
/// - The file cannot be read
/// - The extension is not a supported format
/// - The content is not valid for its format
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), confparse_loader::LoadError> {
/// let tree = confparse_loader::load_file("config.yaml")?;
/// println!("{tree}");
/// # Ok(())
/// # }
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let format = DocFormat::from_path(path)?;
    load_file_as(path, format)
}

/// Read a configuration file using an explicit format, ignoring its extension.
///
/// # Errors
///
/// Returns `LoadError` if the file is missing, unreadable or malformed.
pub fn load_file_as<P: AsRef<Path>>(path: P, format: DocFormat) -> Result<Value, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::file_not_found(path));
    }

    let content = fs::read_to_string(path).map_err(|e| LoadError::read_error(path, e))?;

    let value = load_str(&content, format)?;
    tracing::info!(path = %path.display(), %format, "loaded configuration file");
    Ok(value)
}

/// Decode configuration text of the given format.
///
/// # Errors
///
/// Returns the format-specific `LoadError` variant if parsing fails.
///
/// # Example
///
/// ```
/// use confparse_loader::{load_str, DocFormat};
///
/// let tree = load_str("arg1: val1\narg2: 2\n", DocFormat::Yaml).unwrap();
/// assert_eq!(tree["arg1"], "val1");
/// assert_eq!(tree["arg2"], 2);
/// ```
pub fn load_str(content: &str, format: DocFormat) -> Result<Value, LoadError> {
    tracing::debug!(%format, bytes = content.len(), "decoding configuration document");

    let value = match format {
        DocFormat::Json => serde_json::from_str(content)?,
        DocFormat::Yaml => serde_yaml::from_str(content)?,
        DocFormat::Toml => toml_to_json(toml::from_str(content)?),
        DocFormat::Csv => parse_csv(content)?,
    };

    Ok(value)
}

// Datetimes become their RFC 3339 text; non-finite floats become null.
fn toml_to_json(table: toml::Table) -> Value {
    Value::Object(
        table
            .into_iter()
            .map(|(key, value)| (key, toml_value_to_json(value)))
            .collect(),
    )
}

fn toml_value_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Array(items.into_iter().map(toml_value_to_json).collect())
        }
        toml::Value::Table(table) => toml_to_json(table),
    }
}
