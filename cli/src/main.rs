//! Inventory CLI
//!
//! Builds a container from raw item descriptors (JSON array) and prints one
//! of its views as JSON.
//!
//! ```text
//! inventory-cli --input items.json --format table --pretty
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inventory_core_rs::{Container, ViewFormat};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Inventory CLI: project raw item descriptors into a view
#[derive(Parser, Debug)]
#[command(name = "inventory-cli")]
#[command(about = "Build an inventory container from JSON descriptors and print a view")]
struct Args {
    /// Descriptor file (JSON array of items); reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// View to print: obj, json or table (any case)
    #[arg(short, long, default_value = "json")]
    format: ViewFormat,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Build a container from descriptor JSON and encode one of its views
fn render(raw: &str, format: ViewFormat, pretty: bool) -> Result<String> {
    let raw: serde_json::Value = serde_json::from_str(raw).context("parsing descriptor JSON")?;
    let container = Container::from_json(&raw)?;
    info!(
        items = container.len(),
        total_qty = ?container.total_qty(),
        format = %format,
        "container built"
    );

    let view = container.container_data(format);
    let out = if pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    Ok(out)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inventory=info")))
        .init();

    let args = Args::parse();

    let raw = read_input(args.input.as_ref())?;
    println!("{}", render(&raw, args.format, args.pretty)?);

    Ok(())
}
