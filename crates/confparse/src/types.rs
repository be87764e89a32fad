//! Type descriptors for argument values.
//!
//! An [`ArgType`] is checked against a value from the parsed document at
//! runtime. Container types check their elements recursively and report the
//! path of the first element that does not conform.

use std::fmt;

use serde_json::Value;

use crate::{ConfigError, ConfigResult};

/// The declared type of an argument.
///
/// # Example
///
/// ```
/// use confparse::ArgType;
/// use serde_json::json;
///
/// let ports = ArgType::list(ArgType::Integer);
/// assert!(ports.matches(&json!([80, 443])));
/// assert!(!ports.matches(&json!(["80"])));
/// assert_eq!(ports.to_string(), "list[integer]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArgType {
    /// Any value, including null.
    #[default]
    Any,
    /// A string.
    String,
    /// An integral number.
    Integer,
    /// Any number, integral or not.
    Float,
    /// `true` or `false`.
    Boolean,
    /// A sequence whose items all match the inner type.
    List(Box<ArgType>),
    /// A mapping whose values all match the inner type.
    Map(Box<ArgType>),
    /// Null, or a value matching the inner type.
    Optional(Box<ArgType>),
    /// A value matching at least one of the variants.
    Union(Vec<ArgType>),
}

impl ArgType {
    /// A list of `inner`.
    #[must_use]
    pub fn list(inner: ArgType) -> Self {
        Self::List(Box::new(inner))
    }

    /// A mapping from string keys to `inner`.
    #[must_use]
    pub fn map(inner: ArgType) -> Self {
        Self::Map(Box::new(inner))
    }

    /// `inner` or null.
    #[must_use]
    pub fn optional(inner: ArgType) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Any of `variants`.
    #[must_use]
    pub fn union(variants: impl IntoIterator<Item = ArgType>) -> Self {
        Self::Union(variants.into_iter().collect())
    }

    /// Returns true if `value` conforms to this type.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        self.check(value, "").is_ok()
    }

    /// Check `value` against this type.
    ///
    /// `path` names the value in the error; list items and map entries
    /// extend it as `path[index]` and `path.key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` for the first non-conforming value.
    pub fn check(&self, value: &Value, path: &str) -> ConfigResult<()> {
        let ok = match (self, value) {
            (Self::Any, _)
            | (Self::String, Value::String(_))
            | (Self::Float, Value::Number(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Optional(_), Value::Null) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Optional(inner), _) => return inner.check(value, path),
            (Self::Union(variants), _) => variants.iter().any(|v| v.matches(value)),
            (Self::List(inner), Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    inner.check(item, &format!("{path}[{index}]"))?;
                }
                true
            }
            (Self::Map(inner), Value::Object(entries)) => {
                for (key, item) in entries {
                    inner.check(item, &format!("{path}.{key}"))?;
                }
                true
            }
            _ => false,
        };

        if ok {
            Ok(())
        } else {
            Err(ConfigError::type_mismatch(
                path,
                self.to_string(),
                describe_value(value),
            ))
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Map(inner) => write!(f, "map[{inner}]"),
            Self::Optional(inner) => write!(f, "optional[{inner}]"),
            Self::Union(variants) => {
                f.write_str("union[")?;
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{variant}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Short human-readable description of a value, used in error messages.
pub fn describe_value(value: &Value) -> String {
    const MAX_SHOWN: usize = 32;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) if n.is_f64() => format!("float {n}"),
        Value::Number(n) => format!("integer {n}"),
        Value::String(s) if s.chars().count() > MAX_SHOWN => {
            let shown: String = s.chars().take(MAX_SHOWN).collect();
            format!("string {shown:?}...")
        }
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("list of {} items", items.len()),
        Value::Object(entries) => format!("mapping with {} keys", entries.len()),
    }
}
