//! Example document generation.
//!
//! Renderers walk a [`Schema`] recursively: each section renders its own
//! arguments and then composes the output of its sub-sections one level
//! deeper. Adding a format means implementing [`ExampleRenderer`].

use std::fs;
use std::path::Path;

use confparse_loader::DocFormat;
use serde_json::Value;

use crate::{Argument, ConfigError, ConfigResult, Schema};

/// One level of indentation in rendered examples.
pub const INDENT: &str = "    ";

/// Renders a schema as an example configuration document.
pub trait ExampleRenderer {
    /// Render `schema` as a section nested `depth` levels below the root.
    ///
    /// `path` is the dotted key path of the section (empty for the root).
    fn render_section(&self, schema: &Schema, depth: usize, path: &str) -> String;

    /// Render a whole document.
    fn render(&self, schema: &Schema) -> String {
        self.render_section(schema, 0, "")
    }
}

/// JSON-shaped bracketed document with comment-annotated lines.
///
/// The output documents the schema; the `#` annotations make it invalid as
/// strict JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ExampleRenderer for JsonRenderer {
    fn render_section(&self, schema: &Schema, depth: usize, _path: &str) -> String {
        let outer = INDENT.repeat(depth);
        let inner = INDENT.repeat(depth + 1);

        let mut lines: Vec<String> = schema
            .arguments()
            .iter()
            .map(|arg| format!("{inner}{}", arg.example_line()))
            .collect();
        for (name, section) in schema.sub_sections() {
            let block = self.render_section(section, depth + 1, name);
            lines.push(format!("{inner}\"{name}\":\n{block}"));
        }

        let mut out = format!("{outer}{{\n");
        if !lines.is_empty() {
            out.push_str(&lines.join(",\n"));
            out.push('\n');
        }
        out.push_str(&outer);
        out.push('}');
        out
    }
}

/// YAML document with trailing comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlRenderer;

impl ExampleRenderer for YamlRenderer {
    fn render_section(&self, schema: &Schema, depth: usize, _path: &str) -> String {
        let indent = INDENT.repeat(depth);
        let mut out = String::new();

        for arg in schema.arguments() {
            let value = arg
                .default_value()
                .map_or_else(|| "null".to_string(), Value::to_string);
            out.push_str(&format!(
                "{indent}{}: {value}  # {}\n",
                yaml_key(arg.name()),
                arg.annotation()
            ));
        }

        for (name, section) in schema.sub_sections() {
            let comment = section
                .description()
                .map(|d| format!("  # {d}"))
                .unwrap_or_default();
            let body = self.render_section(section, depth + 1, name);
            let key = yaml_key(name);
            if body.is_empty() {
                out.push_str(&format!("{indent}{key}: {{}}{comment}\n"));
            } else {
                out.push_str(&format!("{indent}{key}:{comment}\n{body}"));
            }
        }

        out
    }
}

/// TOML document: top-level keys first, then one table per sub-section.
///
/// Arguments without a default are emitted commented out, since TOML has no
/// null.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlRenderer;

impl TomlRenderer {
    fn argument_line(arg: &Argument) -> String {
        let key = toml_key(arg.name());
        match arg.default_value().and_then(toml_inline) {
            Some(value) => format!("{key} = {value}  # {}\n", arg.annotation()),
            None => format!("# {key} = <{}>  # {}\n", arg.arg_type(), arg.annotation()),
        }
    }
}

impl ExampleRenderer for TomlRenderer {
    fn render_section(&self, schema: &Schema, _depth: usize, path: &str) -> String {
        let mut out: String = schema
            .arguments()
            .iter()
            .map(Self::argument_line)
            .collect();

        for (name, section) in schema.sub_sections() {
            let table = if path.is_empty() {
                toml_key(name)
            } else {
                format!("{path}.{}", toml_key(name))
            };
            out.push_str(&format!("\n[{table}]"));
            if let Some(description) = section.description() {
                out.push_str(&format!("  # {description}"));
            }
            out.push('\n');
            out.push_str(&self.render_section(section, 0, &table));
        }

        if path.is_empty() {
            out.trim_start_matches('\n').to_string()
        } else {
            out
        }
    }
}

fn toml_key(name: &str) -> String {
    let bare = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if bare {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

// Plain identifiers stay bare; anything YAML could read as another scalar
// or as syntax is double-quoted.
fn yaml_key(name: &str) -> String {
    const RESERVED: [&str; 9] = ["true", "false", "null", "yes", "no", "on", "off", "y", "n"];

    let bare = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !RESERVED.contains(&name.to_ascii_lowercase().as_str());
    if bare {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

fn toml_inline(value: &Value) -> Option<String> {
    toml::Value::try_from(value).ok().map(|v| v.to_string())
}

/// The renderer for `format`.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedFormat` for formats without a renderer.
pub fn renderer_for(format: DocFormat) -> ConfigResult<Box<dyn ExampleRenderer>> {
    match format {
        DocFormat::Json => Ok(Box::new(JsonRenderer)),
        DocFormat::Yaml => Ok(Box::new(YamlRenderer)),
        DocFormat::Toml => Ok(Box::new(TomlRenderer)),
        DocFormat::Csv => Err(ConfigError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}

impl Schema {
    /// Render an example configuration document for this schema.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for formats without a renderer.
    ///
    /// # Example
    ///
    /// ```
    /// use confparse::{ArgType, Argument, DocFormat, Schema};
    ///
    /// # fn main() -> Result<(), confparse::ConfigError> {
    /// let schema = Schema::builder()
    ///     .argument(Argument::new("arg1").with_type(ArgType::String).with_default("x"))
    ///     .build()?;
    ///
    /// let doc = schema.render_example(DocFormat::Json)?;
    /// assert!(doc.starts_with("{\n    \"arg1\": \"x\""));
    /// # Ok(())
    /// # }
    /// ```
    pub fn render_example(&self, format: DocFormat) -> ConfigResult<String> {
        Ok(renderer_for(format)?.render(self))
    }

    /// Write an example configuration document to `path`, replacing any
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for formats without a
    /// renderer and `ConfigError::WriteError` if the file cannot be written.
    pub fn save_example<P: AsRef<Path>>(&self, path: P, format: DocFormat) -> ConfigResult<()> {
        let path = path.as_ref();
        let document = self.render_example(format)?;
        fs::write(path, document).map_err(|e| ConfigError::write_error(path, e))?;
        tracing::info!(path = %path.display(), %format, "saved example configuration");
        Ok(())
    }
}
