//! Parse results.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{ConfigError, ConfigResult};

/// Values recorded for one section of a successfully parsed document.
///
/// A result mirrors the schema that produced it: one value per declared
/// argument (in declaration order) and one nested result per sub-section
/// that was present. Optional sub-sections missing from the document have
/// no entry.
///
/// # Example
///
/// ```
/// use confparse::{ArgType, Argument, Schema};
/// use serde_json::json;
///
/// # fn main() -> Result<(), confparse::ConfigError> {
/// let mut db = Schema::new();
/// db.add_argument(Argument::new("url").with_type(ArgType::String))?;
///
/// let mut schema = Schema::new();
/// schema.add_argument(Argument::new("name").with_type(ArgType::String))?;
/// schema.add_sub_section("database", db)?;
///
/// let result = schema.parse_value(&json!({
///     "name": "svc",
///     "database": {"url": "postgres://localhost"}
/// }))?;
///
/// assert_eq!(result.get_str("name"), Some("svc"));
/// assert_eq!(
///     result.section("database").and_then(|db| db.get_str("url")),
///     Some("postgres://localhost")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseResult {
    context: String,
    values: IndexMap<String, Value>,
    sections: IndexMap<String, ParseResult>,
}

impl ParseResult {
    pub(crate) fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            ..Self::default()
        }
    }

    pub(crate) fn insert_value(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn insert_section(&mut self, name: impl Into<String>, section: ParseResult) {
        self.sections.insert(name.into(), section);
    }

    /// The context label of the section this result was parsed from.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The value recorded for an argument.
    ///
    /// Returns `None` only for names the schema never declared; declared
    /// arguments missing from the document are recorded as null.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The value of an argument as a string slice.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The value of an argument as an `i64`.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// The value of an argument as an `f64`.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// The value of an argument as a `bool`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Deserialize the value of an argument into `T`.
    ///
    /// An undeclared name deserializes from null, so `Option<T>` targets
    /// yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Deserialize` if the value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> ConfigResult<T> {
        let value = self.get(name).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|source| ConfigError::Deserialize {
            field: name.to_string(),
            source,
        })
    }

    /// The result of a sub-section, if it was present in the document.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&ParseResult> {
        self.sections.get(name)
    }

    /// Whether a sub-section was present in the document.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Recorded argument values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Recorded sub-section results in declaration order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &ParseResult)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The whole result as a JSON object, sub-sections nested under their names.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.values {
            object.insert(name.clone(), value.clone());
        }
        for (name, section) in &self.sections {
            object.insert(name.clone(), section.to_value());
        }
        Value::Object(object)
    }

    /// Deserialize the whole result into a typed configuration struct.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Deserialize` if the result does not fit `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_value(self.to_value()).map_err(|source| ConfigError::Deserialize {
            field: self.context.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> ParseResult {
        let mut sub = ParseResult::new("sub1");
        sub.insert_value("arg11", json!("val11"));

        let mut root = ParseResult::new("main");
        root.insert_value("arg1", json!("val1"));
        root.insert_value("port", json!(8080));
        root.insert_value("ratio", json!(0.25));
        root.insert_value("debug", json!(true));
        root.insert_value("unset", Value::Null);
        root.insert_section("sub1", sub);
        root
    }

    #[test]
    fn test_typed_getters() {
        let result = sample();
        assert_eq!(result.get_str("arg1"), Some("val1"));
        assert_eq!(result.get_i64("port"), Some(8080));
        assert_eq!(result.get_f64("ratio"), Some(0.25));
        assert_eq!(result.get_bool("debug"), Some(true));
        assert_eq!(result.get("unset"), Some(&Value::Null));
        assert_eq!(result.get("undeclared"), None);
    }

    #[test]
    fn test_get_as() {
        let result = sample();
        let port: u16 = result.get_as("port").unwrap();
        assert_eq!(port, 8080);
        let unset: Option<String> = result.get_as("unset").unwrap();
        assert_eq!(unset, None);
        let err = result.get_as::<u16>("arg1").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize { ref field, .. } if field == "arg1"));
    }

    #[test]
    fn test_sections() {
        let result = sample();
        assert!(result.has_section("sub1"));
        assert!(!result.has_section("sub2"));
        let sub = result.section("sub1").unwrap();
        assert_eq!(sub.context(), "sub1");
        assert_eq!(sub.get_str("arg11"), Some("val11"));
    }

    #[test]
    fn test_iteration_keeps_order() {
        let result = sample();
        let names: Vec<&str> = result.values().map(|(name, _)| name).collect();
        assert_eq!(names, ["arg1", "port", "ratio", "debug", "unset"]);
        assert_eq!(result.sections().count(), 1);
    }

    #[test]
    fn test_to_value_and_deserialize() {
        #[derive(Debug, Deserialize)]
        struct Sub {
            arg11: String,
        }

        #[derive(Debug, Deserialize)]
        struct Root {
            arg1: String,
            port: u16,
            unset: Option<String>,
            sub1: Sub,
        }

        let result = sample();
        assert_eq!(result.to_value()["sub1"], json!({"arg11": "val11"}));

        let root: Root = result.deserialize().unwrap();
        assert_eq!(root.arg1, "val1");
        assert_eq!(root.port, 8080);
        assert_eq!(root.unset, None);
        assert_eq!(root.sub1.arg11, "val11");
    }
}
