//! Parse options.

use confparse_loader::DocFormat;

/// Options controlling how a document is matched against a schema.
///
/// The defaults detect the format from the file extension, ignore keys the
/// schema does not declare, and fill in declared defaults for missing
/// arguments.
///
/// # Example
///
/// ```
/// use confparse::{DocFormat, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_format(DocFormat::Yaml)
///     .with_strict(true);
///
/// assert!(options.strict);
/// assert!(options.backfill_defaults);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Format override. `None` detects the format from the file extension.
    pub format: Option<DocFormat>,

    /// Reject keys that match no declared argument or sub-section.
    pub strict: bool,

    /// Record the declared default for arguments missing from the document.
    pub backfill_defaults: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            format: None,
            strict: false,
            backfill_defaults: true,
        }
    }
}

impl ParseOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read files as `format` regardless of their extension.
    #[must_use]
    pub fn with_format(mut self, format: DocFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Enable or disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable default back-fill.
    #[must_use]
    pub fn with_backfill_defaults(mut self, backfill: bool) -> Self {
        self.backfill_defaults = backfill;
        self
    }
}
