//! Multi-format configuration reader for confparse.
//!
//! This crate turns a configuration file into a generic value tree
//! ([`serde_json::Value`]) without knowing anything about the expected
//! schema. Supported formats:
//! - JSON (`.json`)
//! - YAML (`.yaml`, `.yml`)
//! - TOML (`.toml`)
//! - CSV with a header row (`.csv`)
//!
//! The format is detected from the file extension unless given explicitly.
//!
//! # Example
//!
//! ```no_run
//! use confparse_loader::{load_file, load_file_as, DocFormat};
//!
//! # fn main() -> Result<(), confparse_loader::LoadError> {
//! let detected = load_file("settings.toml")?;
//! let forced = load_file_as("settings.conf", DocFormat::Yaml)?;
//! # let _ = (detected, forced);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod format;
mod loader;
pub mod table;

pub use error::LoadError;
pub use format::DocFormat;
pub use loader::{load_file, load_file_as, load_str};
pub use serde_json::Value;
