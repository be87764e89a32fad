//! Declares a service schema, writes example documents, and parses a YAML file.
//!
//! Run with `RUST_LOG=confparse=debug` to see the section walk.

use std::fs;

use anyhow::Context;
use confparse::{ArgType, Argument, DocFormat, Schema};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const CONFIG: &str = "\
name: billing
listen:
  host: 0.0.0.0
  port: 9000
database:
  url: postgres://db/billing
";

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true).with_filter(filter))
        .try_init()
        .context("failed to initialize logging")
}

fn schema() -> confparse::ConfigResult<Schema> {
    let listen = Schema::builder()
        .description("network listener")
        .argument(Argument::new("host").with_type(ArgType::String).with_default("127.0.0.1"))
        .argument(
            Argument::new("port")
                .with_type(ArgType::Integer)
                .with_description("TCP port")
                .required(),
        )
        .build()?;

    let database = Schema::builder()
        .argument(Argument::new("url").with_type(ArgType::String).required())
        .argument(Argument::new("pool_size").with_type(ArgType::Integer).with_default(10))
        .build()?;

    let tls = Schema::builder()
        .optional()
        .argument(Argument::new("cert").with_type(ArgType::String).required())
        .argument(Argument::new("key").with_type(ArgType::String).required())
        .build()?;

    Schema::builder()
        .argument(
            Argument::new("name")
                .with_type(ArgType::String)
                .with_description("service name")
                .required(),
        )
        .argument(
            Argument::new("tags")
                .with_type(ArgType::optional(ArgType::list(ArgType::String))),
        )
        .sub_section("listen", listen)
        .sub_section("database", database)
        .sub_section("tls", tls)
        .build()
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let schema = schema()?;
    let dir = std::env::temp_dir().join("confparse-demo");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    for format in [DocFormat::Json, DocFormat::Yaml, DocFormat::Toml] {
        let path = dir.join(format!("example.{}", format.extension()));
        schema.save_example(&path, format)?;
    }

    let config_path = dir.join("service.yaml");
    fs::write(&config_path, CONFIG)?;
    let config = schema.parse(&config_path)?;

    let listen = config.section("listen").context("listen section")?;
    tracing::info!(
        name = config.get_str("name").unwrap_or_default(),
        host = listen.get_str("host").unwrap_or_default(),
        port = listen.get_i64("port").unwrap_or_default(),
        tls = config.has_section("tls"),
        "configuration loaded"
    );

    println!("{}", serde_json::to_string_pretty(&config.to_value())?);
    Ok(())
}
