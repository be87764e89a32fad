//! Document formats understood by the loader.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::LoadError;

/// A structured document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocFormat {
    /// JSON (`.json`).
    #[default]
    Json,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// TOML (`.toml`).
    Toml,
    /// Comma separated values with a header row (`.csv`).
    Csv,
}

impl DocFormat {
    /// All supported formats.
    pub const ALL: [Self; 4] = [Self::Json, Self::Yaml, Self::Toml, Self::Csv];

    /// Canonical lowercase name of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Csv => "csv",
        }
    }

    /// Canonical file extension for the format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Detect the format from a file extension (case-insensitive).
    ///
    /// # Example
    ///
    /// ```
    /// use confparse_loader::DocFormat;
    ///
    /// assert_eq!(DocFormat::from_extension("YML"), Some(DocFormat::Yaml));
    /// assert_eq!(DocFormat::from_extension("ini"), None);
    /// ```
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" | "tml" => Some(Self::Toml),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Detect the format of a file from its path.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnsupportedFormat` when the path has no extension or
    /// an unknown one.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(extension)
            .ok_or_else(|| LoadError::unsupported_format(path.display().to_string()))
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| LoadError::unsupported_format(s))
    }
}
