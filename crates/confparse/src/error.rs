//! Configuration error types.

use std::path::PathBuf;

use confparse_loader::LoadError;
use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building a schema, parsing a configuration
/// against it, or writing an example document.
///
/// Parsing stops at the first violation, so a failed parse reports exactly
/// one of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required argument has neither a value nor a default.
    #[error("failed to find argument named {argument} in context {context}")]
    MissingArgument {
        /// The missing argument name.
        argument: String,
        /// Context (section) the argument belongs to.
        context: String,
    },

    /// A required sub-section is absent.
    #[error("failed to find required sub-section {section} in context {context}")]
    MissingSubsection {
        /// The missing sub-section name.
        section: String,
        /// Context (section) expected to contain it.
        context: String,
    },

    /// A value does not conform to its declared type.
    #[error("type mismatch for {path}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// Dotted path of the offending value.
        path: String,
        /// The declared type.
        expected: String,
        /// Description of the value that was found.
        actual: String,
    },

    /// An argument name is declared twice in the same section.
    #[error("duplicate argument {name} in context {context}")]
    DuplicateArgument {
        /// The repeated name.
        name: String,
        /// Context (section) of the declaration.
        context: String,
    },

    /// A sub-section name is declared twice, or collides with an argument.
    #[error("duplicate sub-section {name} in context {context}")]
    DuplicateSubsection {
        /// The repeated name.
        name: String,
        /// Context (section) of the declaration.
        context: String,
    },

    /// An argument or sub-section was declared with an empty name.
    #[error("names must not be empty (context {context})")]
    InvalidName {
        /// Context (section) of the declaration.
        context: String,
    },

    /// A section's value is not a mapping.
    #[error("expected a mapping for context {context}, found {actual}")]
    NotAMapping {
        /// Context (section) being parsed.
        context: String,
        /// Description of the value that was found.
        actual: String,
    },

    /// Unknown key in configuration (strict mode).
    #[error("unknown configuration field: {field} in context {context}")]
    UnknownField {
        /// The unknown key.
        field: String,
        /// Context (section) containing it.
        context: String,
    },

    /// No example renderer exists for the requested format.
    #[error("unsupported example format: {format}")]
    UnsupportedFormat {
        /// The requested format.
        format: String,
    },

    /// A parsed value could not be converted to the requested Rust type.
    #[error("failed to deserialize {field}: {source}")]
    Deserialize {
        /// Name of the value (or section) being converted.
        field: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write an example document.
    #[error("failed to write example file: {path}")]
    WriteError {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the configuration file failed.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ConfigError {
    /// Create a new missing argument error.
    pub fn missing_argument(argument: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
            context: context.into(),
        }
    }

    /// Create a new missing sub-section error.
    pub fn missing_subsection(section: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingSubsection {
            section: section.into(),
            context: context.into(),
        }
    }

    /// Create a new type mismatch error.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new duplicate argument error.
    pub fn duplicate_argument(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::DuplicateArgument {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Create a new duplicate sub-section error.
    pub fn duplicate_subsection(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::DuplicateSubsection {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Create a new unknown field error.
    pub fn unknown_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create a new write error.
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_error() {
        let err = ConfigError::missing_argument("arg3", "main");
        assert_eq!(
            err.to_string(),
            "failed to find argument named arg3 in context main"
        );
    }

    #[test]
    fn test_missing_subsection_error() {
        let err = ConfigError::missing_subsection("database", "main");
        assert!(err.to_string().contains("database"));
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = ConfigError::type_mismatch("server.port", "integer", "string \"80\"");
        assert!(err.to_string().contains("server.port"));
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_duplicate_argument_error() {
        let err = ConfigError::duplicate_argument("arg1", "main");
        assert!(err.to_string().contains("arg1"));
    }

    #[test]
    fn test_load_error_is_transparent() {
        let err = ConfigError::from(LoadError::file_not_found("/missing.json"));
        assert_eq!(err.to_string(), "configuration file not found: /missing.json");
    }
}
