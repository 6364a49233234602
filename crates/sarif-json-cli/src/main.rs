//! `sarif-json` CLI: convert PREfast defects to SARIF and reformat JSON documents.
//!
//! ## Usage
//!
//! ```sh
//! # Convert a defect list to a SARIF log (stdin → stdout)
//! sarif-json convert < defects.json
//!
//! # Convert from file to file
//! sarif-json convert -i defects.json -o results.sarif
//!
//! # Re-emit a JSON document in the engine's pretty format
//! sarif-json format -i data.json
//!
//! # Keep the legacy behavior: malformed input prints `null`
//! sarif-json format --lenient -i broken.json
//!
//! # Report the root kind and size of a document
//! sarif-json check -i results.sarif
//!
//! # Verbose logging
//! SARIF_JSON_LOG=debug sarif-json format -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sarif_json::{Defect, Value};
use std::io::{self, Read};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_ENV: &str = "SARIF_JSON_LOG";

#[derive(Parser)]
#[command(
    name = "sarif-json",
    version,
    about = "PREfast to SARIF converter and JSON formatter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter (e.g. "debug", "sarif_json=trace"); overrides SARIF_JSON_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON list of PREfast defects to a SARIF log
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse a JSON document and re-emit it pretty-printed
    Format {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print `null` for malformed input instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Parse a JSON document and report its root kind and size
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Convert { input, output } => {
            let text = read_input(input.as_deref())?;
            let defects: Vec<Defect> =
                serde_json::from_str(&text).context("Failed to read defect list")?;
            tracing::info!(defects = defects.len(), "converting defects");
            let log = sarif_json::convert(&defects).context("Failed to build SARIF log")?;
            write_output(output.as_deref(), &sarif_json::serialize(&log))?;
        }
        Commands::Format {
            input,
            output,
            lenient,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = if lenient {
                sarif_json::deserialize(&text)
            } else {
                sarif_json::try_deserialize(&text).context("Failed to parse JSON document")?
            };
            write_output(output.as_deref(), &sarif_json::serialize(&doc))?;
        }
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            let doc = sarif_json::try_deserialize(&text).context("Failed to parse JSON document")?;
            println!("kind:   {}", doc.kind());
            println!("size:   {}", doc.size());
            println!("strict: {}", strict_status(&text, &doc));
        }
    }

    Ok(())
}

/// Install the stderr logger. `--log-level` wins over `SARIF_JSON_LOG`; the
/// default is `warn`.
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// How a standard JSON parser sees the same text:
///
/// - `yes` when serde_json reads an identical tree
/// - `differs` when it reads a different one (e.g. strings with surrounding
///   whitespace, which the engine trims)
/// - `no` when it rejects the text
fn strict_status(text: &str, doc: &Value) -> &'static str {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) if Value::from(json.clone()) == *doc => "yes",
        Ok(_) => "differs",
        Err(err) => {
            tracing::debug!(error = %err, "serde_json rejected the document");
            "no"
        }
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
