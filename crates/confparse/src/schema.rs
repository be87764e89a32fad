//! Schema declaration and recursive parsing.
//!
//! A [`Schema`] is a tree: each node owns its [`Argument`]s and its named
//! sub-sections. Parsing walks the tree depth-first against a value tree,
//! arguments before sub-sections, and stops at the first violation.
//!
//! # Example
//!
//! ```
//! use confparse::{ArgType, Argument, Schema};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), confparse::ConfigError> {
//! let tls = Schema::builder()
//!     .optional()
//!     .argument(Argument::new("cert").with_type(ArgType::String).required())
//!     .build()?;
//!
//! let schema = Schema::builder()
//!     .argument(Argument::new("host").with_type(ArgType::String).required())
//!     .argument(Argument::new("port").with_type(ArgType::Integer).with_default(8080))
//!     .sub_section("tls", tls)
//!     .build()?;
//!
//! let result = schema.parse_value(&json!({"host": "localhost"}))?;
//! assert_eq!(result.get_str("host"), Some("localhost"));
//! assert_eq!(result.get_i64("port"), Some(8080));
//! assert!(!result.has_section("tls"));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use confparse_loader::{load_file, load_file_as, load_str, DocFormat};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::types::describe_value;
use crate::{Argument, ConfigError, ConfigResult, ParseOptions, ParseResult};

/// Context label of a schema that is not attached to a parent.
pub const ROOT_CONTEXT: &str = "main";

/// A declared configuration section: arguments plus named sub-sections.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    description: Option<String>,
    required: bool,
    context: String,
    arguments: Vec<Argument>,
    sub_sections: IndexMap<String, Schema>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Create an empty, required schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            description: None,
            required: true,
            context: ROOT_CONTEXT.to_string(),
            arguments: Vec::new(),
            sub_sections: IndexMap::new(),
        }
    }

    /// Create an empty schema that, as a sub-section, may be absent.
    #[must_use]
    pub fn optional() -> Self {
        Self::new().with_required(false)
    }

    /// Start a [`SchemaBuilder`].
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Set whether this schema, as a sub-section, must be present.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare an argument.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidName` for an empty name and
    /// `ConfigError::DuplicateArgument` if the name is already declared in
    /// this section, as an argument or a sub-section.
    pub fn add_argument(&mut self, argument: Argument) -> ConfigResult<&mut Self> {
        if argument.name().is_empty() {
            return Err(ConfigError::InvalidName {
                context: self.context.clone(),
            });
        }
        if self.declares(argument.name()) {
            return Err(ConfigError::duplicate_argument(
                argument.name(),
                &self.context,
            ));
        }

        self.arguments.push(argument);
        Ok(self)
    }

    /// Attach `section` under `name`.
    ///
    /// The section's context becomes `name`; its own required flag decides
    /// whether the key must appear in documents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidName` for an empty name and
    /// `ConfigError::DuplicateSubsection` if the name is already declared in
    /// this section.
    pub fn add_sub_section(
        &mut self,
        name: impl Into<String>,
        mut section: Schema,
    ) -> ConfigResult<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::InvalidName {
                context: self.context.clone(),
            });
        }
        if self.declares(&name) {
            return Err(ConfigError::duplicate_subsection(name, &self.context));
        }

        section.context.clone_from(&name);
        self.sub_sections.insert(name, section);
        Ok(self)
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether this schema, as a sub-section, must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The label used in error messages.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Declared arguments in declaration order.
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Look up a declared argument.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name() == name)
    }

    /// Declared sub-sections in declaration order.
    pub fn sub_sections(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.sub_sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a declared sub-section.
    #[must_use]
    pub fn sub_section(&self, name: &str) -> Option<&Schema> {
        self.sub_sections.get(name)
    }

    /// Whether `name` is declared here as an argument or sub-section.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.argument(name).is_some() || self.sub_sections.contains_key(name)
    }

    /// Parse a configuration file.
    ///
    /// The format is detected from the file extension (JSON, YAML, TOML or
    /// CSV).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if the file cannot be read or decoded, and
    /// the first schema violation otherwise.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> ConfigResult<ParseResult> {
        self.parse_with(path, &ParseOptions::default())
    }

    /// Parse a configuration file with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`Schema::parse`], plus `ConfigError::UnknownField` in strict
    /// mode.
    pub fn parse_with<P: AsRef<Path>>(
        &self,
        path: P,
        options: &ParseOptions,
    ) -> ConfigResult<ParseResult> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("parse", path = %path.display()).entered();

        let tree = match options.format {
            Some(format) => load_file_as(path, format)?,
            None => load_file(path)?,
        };
        self.parse_value_with(&tree, options)
    }

    /// Parse configuration text of a known format.
    ///
    /// # Errors
    ///
    /// Same as [`Schema::parse`].
    pub fn parse_str(&self, content: &str, format: DocFormat) -> ConfigResult<ParseResult> {
        let tree = load_str(content, format)?;
        self.parse_value(&tree)
    }

    /// Parse an already decoded value tree.
    ///
    /// # Errors
    ///
    /// Returns the first schema violation.
    pub fn parse_value(&self, tree: &Value) -> ConfigResult<ParseResult> {
        self.parse_value_with(tree, &ParseOptions::default())
    }

    /// Parse an already decoded value tree with explicit options.
    ///
    /// # Errors
    ///
    /// Returns the first schema violation.
    pub fn parse_value_with(
        &self,
        tree: &Value,
        options: &ParseOptions,
    ) -> ConfigResult<ParseResult> {
        self.parse_section(tree, "", options)
    }

    fn parse_section(
        &self,
        value: &Value,
        prefix: &str,
        options: &ParseOptions,
    ) -> ConfigResult<ParseResult> {
        let Value::Object(entries) = value else {
            return Err(ConfigError::NotAMapping {
                context: self.context.clone(),
                actual: describe_value(value),
            });
        };

        tracing::debug!(context = %self.context, keys = entries.len(), "parsing section");

        if options.strict {
            if let Some(field) = entries.keys().find(|key| !self.declares(key)) {
                return Err(ConfigError::unknown_field(field, &self.context));
            }
        }

        let mut result = ParseResult::new(&self.context);

        for argument in &self.arguments {
            let path = join_path(prefix, argument.name());
            let value = self.resolve_argument(argument, entries, &path, options)?;
            result.insert_value(argument.name(), value);
        }

        for (name, section) in &self.sub_sections {
            match entries.get(name).filter(|v| !v.is_null()) {
                Some(sub_value) => {
                    let sub_prefix = join_path(prefix, name);
                    let parsed = section.parse_section(sub_value, &sub_prefix, options)?;
                    result.insert_section(name, parsed);
                }
                None if section.required => {
                    return Err(ConfigError::missing_subsection(name, &self.context));
                }
                None => {
                    tracing::debug!(
                        section = %join_path(prefix, name),
                        "optional sub-section absent"
                    );
                }
            }
        }

        Ok(result)
    }

    // Type-checks the effective value of `argument` and returns the value to
    // record. Absent keys without a default are checked as null.
    fn resolve_argument(
        &self,
        argument: &Argument,
        entries: &Map<String, Value>,
        path: &str,
        options: &ParseOptions,
    ) -> ConfigResult<Value> {
        if let Some(value) = entries.get(argument.name()).filter(|v| !v.is_null()) {
            argument.validate_at(value, path)?;
            return Ok(value.clone());
        }

        match argument.default_value() {
            Some(default) => {
                argument.validate_at(default, path)?;
                if options.backfill_defaults {
                    tracing::debug!(argument = %path, "using declared default");
                    Ok(default.clone())
                } else {
                    Ok(Value::Null)
                }
            }
            None if argument.is_required() => Err(ConfigError::missing_argument(
                argument.name(),
                &self.context,
            )),
            None => {
                argument.validate_at(&Value::Null, path)?;
                Ok(Value::Null)
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Fluent construction of a [`Schema`].
///
/// Declaration errors are held until [`SchemaBuilder::build`], which reports
/// the first one.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
    error: Option<ConfigError>,
}

impl SchemaBuilder {
    /// Create a builder for an empty, required schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Mark the schema as an optional sub-section.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.schema.required = false;
        self
    }

    /// Declare an argument.
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.schema.add_argument(argument) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Attach a sub-section.
    #[must_use]
    pub fn sub_section(mut self, name: impl Into<String>, section: Schema) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.schema.add_sub_section(name, section) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Finish the schema.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error recorded by the builder.
    pub fn build(self) -> ConfigResult<Schema> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgType;
    use serde_json::json;

    fn simple_schema() -> Schema {
        Schema::builder()
            .argument(Argument::new("arg1").with_type(ArgType::String).required())
            .argument(Argument::new("arg2").with_type(ArgType::String))
            .build()
            .unwrap()
    }

    fn nested_schema(sub_required: bool) -> Schema {
        let sub = Schema::builder()
            .argument(Argument::new("arg11").with_type(ArgType::String))
            .build()
            .unwrap()
            .with_required(sub_required);

        Schema::builder()
            .argument(Argument::new("arg1").with_type(ArgType::String))
            .sub_section("sub_section1", sub)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let result = simple_schema()
            .parse_value(&json!({"arg1": "val1", "arg2": "val2"}))
            .unwrap();
        assert_eq!(result.get_str("arg1"), Some("val1"));
        assert_eq!(result.get_str("arg2"), Some("val2"));
        assert_eq!(result.context(), ROOT_CONTEXT);
    }

    #[test]
    fn test_missing_required_argument() {
        let mut schema = Schema::new();
        schema
            .add_argument(Argument::new("arg1").with_type(ArgType::String))
            .unwrap()
            .add_argument(Argument::new("arg2").with_type(ArgType::String))
            .unwrap()
            .add_argument(Argument::new("arg3").with_type(ArgType::Integer).required())
            .unwrap();

        let err = schema
            .parse_value(&json!({"arg1": "val1", "arg2": "val2"}))
            .unwrap_err();
        match err {
            ConfigError::MissingArgument { argument, context } => {
                assert_eq!(argument, "arg3");
                assert_eq!(context, "main");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_null_counts_as_missing() {
        let err = simple_schema()
            .parse_value(&json!({"arg1": null}))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument { .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let schema = Schema::builder()
            .argument(Argument::new("arg1").with_type(ArgType::Integer))
            .build()
            .unwrap();
        let err = schema.parse_value(&json!({"arg1": "val1"})).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref path, .. } if path == "arg1"));
    }

    #[test]
    fn test_required_argument_type_mismatch() {
        let schema = Schema::builder()
            .argument(Argument::new("arg1").with_type(ArgType::Integer).required())
            .build()
            .unwrap();
        let err = schema.parse_value(&json!({"arg1": "val1"})).unwrap_err();
        match err {
            ConfigError::TypeMismatch {
                path,
                expected,
                actual,
            } => {
                assert_eq!(path, "arg1");
                assert_eq!(expected, "integer");
                assert_eq!(actual, "string \"val1\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_absent_typed_argument_is_checked_as_null() {
        let err = simple_schema().parse_value(&json!({"arg1": "val1"})).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref path, ref actual, .. }
            if path == "arg2" && actual == "null"));

        let err = simple_schema()
            .parse_value(&json!({"arg1": "val1", "arg2": null}))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref path, .. } if path == "arg2"));
    }

    #[test]
    fn test_nullable_argument_absent_is_null() {
        let schema = Schema::builder()
            .argument(Argument::new("arg1").with_type(ArgType::optional(ArgType::String)))
            .argument(Argument::new("arg2"))
            .build()
            .unwrap();
        let result = schema.parse_value(&json!({"arg2": null})).unwrap();
        assert_eq!(result.get("arg1"), Some(&Value::Null));
        assert_eq!(result.get("arg2"), Some(&Value::Null));
    }

    #[test]
    fn test_default_satisfies_required_and_is_backfilled() {
        let schema = Schema::builder()
            .argument(
                Argument::new("retries")
                    .with_type(ArgType::Integer)
                    .with_default(3)
                    .required(),
            )
            .build()
            .unwrap();

        let result = schema.parse_value(&json!({})).unwrap();
        assert_eq!(result.get_i64("retries"), Some(3));

        let options = ParseOptions::new().with_backfill_defaults(false);
        let result = schema.parse_value_with(&json!({}), &options).unwrap();
        assert_eq!(result.get("retries"), Some(&Value::Null));
    }

    #[test]
    fn test_backfilled_default_is_type_checked() {
        let schema = Schema::builder()
            .argument(Argument::new("port").with_type(ArgType::Integer).with_default("80"))
            .build()
            .unwrap();
        let err = schema.parse_value(&json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));

        let options = ParseOptions::new().with_backfill_defaults(false);
        let err = schema.parse_value_with(&json!({}), &options).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn test_nested_parse() {
        let result = nested_schema(true)
            .parse_value(&json!({"arg1": "val1", "sub_section1": {"arg11": "val11"}}))
            .unwrap();
        assert_eq!(result.get_str("arg1"), Some("val1"));
        let sub = result.section("sub_section1").unwrap();
        assert_eq!(sub.context(), "sub_section1");
        assert_eq!(sub.get_str("arg11"), Some("val11"));
    }

    #[test]
    fn test_required_subsection_missing() {
        let err = nested_schema(true)
            .parse_value(&json!({"arg1": "val1"}))
            .unwrap_err();
        match err {
            ConfigError::MissingSubsection { section, context } => {
                assert_eq!(section, "sub_section1");
                assert_eq!(context, "main");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_subsection_skipped() {
        let result = nested_schema(false)
            .parse_value(&json!({"arg1": "val1"}))
            .unwrap();
        assert!(!result.has_section("sub_section1"));
        assert_eq!(result.get_str("arg1"), Some("val1"));
    }

    #[test]
    fn test_nested_type_mismatch_has_dotted_path() {
        let err = nested_schema(true)
            .parse_value(&json!({"arg1": "val1", "sub_section1": {"arg11": 5}}))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref path, .. }
            if path == "sub_section1.arg11"));
    }

    #[test]
    fn test_nested_missing_argument_names_section_context() {
        let sub = Schema::builder()
            .argument(Argument::new("url").required())
            .build()
            .unwrap();
        let schema = Schema::builder().sub_section("database", sub).build().unwrap();
        let err = schema.parse_value(&json!({"database": {}})).unwrap_err();
        assert!(
            matches!(err, ConfigError::MissingArgument { ref context, .. } if context == "database")
        );
    }

    #[test]
    fn test_section_must_be_mapping() {
        let err = nested_schema(true)
            .parse_value(&json!({"arg1": "val1", "sub_section1": [1, 2]}))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { ref context, .. }
            if context == "sub_section1"));

        let err = simple_schema().parse_value(&json!(["arg1"])).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_strict_mode_rejects_unknown_keys() {
        let tree = json!({"arg1": "val1", "arg2": "val2", "extra": true});
        assert!(simple_schema().parse_value(&tree).is_ok());

        let options = ParseOptions::new().with_strict(true);
        let err = simple_schema().parse_value_with(&tree, &options).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField { ref field, .. } if field == "extra"));
    }

    #[test]
    fn test_schema_is_reusable() {
        let schema = simple_schema();
        let first = schema.parse_value(&json!({"arg1": "a", "arg2": "x"})).unwrap();
        assert!(schema.parse_value(&json!({"arg1": "b"})).is_err());
        let second = schema.parse_value(&json!({"arg1": "b", "arg2": "c"})).unwrap();
        assert_eq!(first.get_str("arg1"), Some("a"));
        assert_eq!(first.get_str("arg2"), Some("x"));
        assert_eq!(second.get_str("arg1"), Some("b"));
        assert_eq!(second.get_str("arg2"), Some("c"));
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let mut schema = Schema::new();
        schema.add_argument(Argument::new("arg1")).unwrap();
        let err = schema.add_argument(Argument::new("arg1")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateArgument { .. }));
        assert_eq!(schema.arguments().len(), 1);
    }

    #[test]
    fn test_name_collisions_between_arguments_and_sections() {
        let mut schema = Schema::new();
        schema.add_argument(Argument::new("db")).unwrap();
        let err = schema.add_sub_section("db", Schema::new()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSubsection { .. }));

        let mut schema = Schema::new();
        schema.add_sub_section("db", Schema::new()).unwrap();
        let err = schema.add_argument(Argument::new("db")).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateArgument { .. }));
    }

    #[test]
    fn test_empty_names_rejected() {
        let mut schema = Schema::new();
        assert!(matches!(
            schema.add_argument(Argument::new("")).unwrap_err(),
            ConfigError::InvalidName { .. }
        ));
        assert!(matches!(
            schema.add_sub_section("", Schema::new()).unwrap_err(),
            ConfigError::InvalidName { .. }
        ));
    }

    #[test]
    fn test_builder_reports_first_error() {
        let err = Schema::builder()
            .argument(Argument::new("a"))
            .argument(Argument::new("a"))
            .argument(Argument::new(""))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateArgument { .. }));
    }

    #[test]
    fn test_attach_sets_context() {
        let schema = nested_schema(false);
        let sub = schema.sub_section("sub_section1").unwrap();
        assert_eq!(sub.context(), "sub_section1");
        assert!(!sub.is_required());
        assert!(schema.declares("arg1"));
        assert!(schema.declares("sub_section1"));
        assert!(!schema.declares("missing"));
    }

    #[test]
    fn test_parse_str_toml_datetime_as_string() {
        let schema = Schema::builder()
            .argument(Argument::new("started").with_type(ArgType::String).required())
            .build()
            .unwrap();
        let result = schema
            .parse_str("started = 1979-05-27T07:32:00Z\n", DocFormat::Toml)
            .unwrap();
        assert_eq!(result.get_str("started"), Some("1979-05-27T07:32:00Z"));
        assert_eq!(result.to_value(), json!({"started": "1979-05-27T07:32:00Z"}));
    }

    #[test]
    fn test_parse_str_yaml() {
        let result = nested_schema(true)
            .parse_str("arg1: val1\nsub_section1:\n  arg11: val11\n", DocFormat::Yaml)
            .unwrap();
        let sub = result.section("sub_section1").unwrap();
        assert_eq!(sub.get_str("arg11"), Some("val11"));
    }
}
