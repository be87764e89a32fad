//! Schema-driven configuration parsing.
//!
//! This crate lets a program declare the configuration it expects and then
//! parse concrete files against that declaration:
//! - Typed arguments with defaults, descriptions and a required flag
//! - Nested sub-sections, each described by its own [`Schema`]
//! - JSON, YAML, TOML and CSV input (via `confparse-loader`)
//! - Fail-fast errors naming the missing or mistyped key
//! - Example document generation from the schema itself
//!
//! # Overview
//!
//! A [`Schema`] holds [`Argument`]s and named sub-sections. Parsing never
//! modifies the schema; every call produces a fresh [`ParseResult`], so one
//! schema can validate any number of files.
//!
//! # Example
//!
//! ```no_run
//! use confparse::{ArgType, Argument, DocFormat, Schema};
//!
//! # fn main() -> Result<(), confparse::ConfigError> {
//! let database = Schema::builder()
//!     .description("connection settings")
//!     .argument(Argument::new("url").with_type(ArgType::String).required())
//!     .argument(Argument::new("pool_size").with_type(ArgType::Integer).with_default(10))
//!     .build()?;
//!
//! let schema = Schema::builder()
//!     .argument(Argument::new("name").with_type(ArgType::String).required())
//!     .argument(Argument::new("debug").with_type(ArgType::Boolean).with_default(false))
//!     .sub_section("database", database)
//!     .build()?;
//!
//! schema.save_example("config.example.json", DocFormat::Json)?;
//!
//! let config = schema.parse("config.yaml")?;
//! let url = config.section("database").and_then(|db| db.get_str("url"));
//! println!("connecting to {url:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! The schema above accepts, for example:
//!
//! ```yaml
//! name: my-service
//! database:
//!   url: postgres://localhost/app
//!   pool_size: 4
//! ```

#![warn(missing_docs)]

mod argument;
mod error;
mod options;
mod render;
mod result;
mod schema;
mod types;

pub use argument::Argument;
pub use confparse_loader::{DocFormat, LoadError};
pub use error::{ConfigError, ConfigResult};
pub use options::ParseOptions;
pub use render::{renderer_for, ExampleRenderer, JsonRenderer, TomlRenderer, YamlRenderer, INDENT};
pub use result::ParseResult;
pub use schema::{Schema, SchemaBuilder, ROOT_CONTEXT};
pub use types::{describe_value, ArgType};
