//! Argument declarations.

use std::fmt;

use serde_json::Value;

use crate::{ArgType, ConfigResult};

/// A single named, typed configuration key.
///
/// Arguments are created with [`Argument::new`] and refined with the
/// `with_*` methods before being added to a [`Schema`](crate::Schema).
///
/// # Example
///
/// ```
/// use confparse::{ArgType, Argument};
///
/// let port = Argument::new("port")
///     .with_type(ArgType::Integer)
///     .with_default(8080)
///     .with_description("listening port")
///     .required();
///
/// assert_eq!(port.name(), "port");
/// assert!(port.is_required());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    name: String,
    arg_type: ArgType,
    description: String,
    default: Option<Value>,
    required: bool,
}

impl Argument {
    /// Declare an optional argument of type [`ArgType::Any`] with no default.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgType::Any,
            description: String::new(),
            default: None,
            required: false,
        }
    }

    /// Set the expected type.
    #[must_use]
    pub fn with_type(mut self, arg_type: ArgType) -> Self {
        self.arg_type = arg_type;
        self
    }

    /// Set the default value used when the document omits the argument.
    ///
    /// A null default is the same as no default.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.default = (!default.is_null()).then_some(default);
        self
    }

    /// Set the description shown in example documents.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the argument as required.
    #[must_use]
    pub fn required(self) -> Self {
        self.with_required(true)
    }

    /// Set whether the argument is required.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The key of the argument in its section.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[must_use]
    pub fn arg_type(&self) -> &ArgType {
        &self.arg_type
    }

    /// The description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The default value, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the document must provide a value (or a default must exist).
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check `value` against the declared type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` naming this argument.
    pub fn validate(&self, value: &Value) -> ConfigResult<()> {
        self.validate_at(value, &self.name)
    }

    /// Check `value` against the declared type, reporting mismatches at
    /// `path` (the dotted location of this argument in the document).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` naming `path`.
    pub fn validate_at(&self, value: &Value, path: &str) -> ConfigResult<()> {
        self.arg_type.check(value, path)
    }

    /// Render the default value the way example documents show it.
    ///
    /// Strings are shown raw, a missing default as `null`, anything else as
    /// compact JSON.
    #[must_use]
    pub fn default_display(&self) -> String {
        match &self.default {
            None => "null".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// The trailing annotation of an example line.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!(
            "required-{}, type-{}, description-{}",
            self.required, self.arg_type, self.description
        )
    }

    /// One documentation line for JSON-shaped example documents.
    ///
    /// # Example
    ///
    /// ```
    /// use confparse::{ArgType, Argument};
    ///
    /// let arg = Argument::new("arg1").with_type(ArgType::String).with_default("x");
    /// assert_eq!(
    ///     arg.example_line(),
    ///     r#""arg1": "x"  # required-false, type-string, description-"#
    /// );
    /// ```
    #[must_use]
    pub fn example_line(&self) -> String {
        format!(
            "\"{}\": \"{}\"  # {}",
            self.name,
            self.default_display(),
            self.annotation()
        )
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.arg_type)
    }
}
