//! Runs one configuration to completion and prints the decoded result as
//! JSON. Grounded on `generate_map.rs`/`generate.rs`'s `clap::Parser` +
//! `anyhow::Result` shape.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use scenario_engine::config::Configuration;
use scenario_engine::solve::{self, DEFAULT_TIMEOUT_MS};

#[derive(Parser)]
struct Cli {
    /// Path to a JSON configuration file. Reads stdin if omitted.
    #[clap(long, short = 'c')]
    config: Option<String>,
    /// Wall-clock solve budget in milliseconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
    /// Emit compact JSON instead of pretty-printed.
    #[clap(long, short = 'C', default_value_t = false)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let text = match &args.config {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };
    let cfg: Configuration = serde_json::from_str(&text).context("parsing configuration JSON")?;

    let result = solve::solve_and_decode(&cfg, args.timeout_ms)?;
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    match result {
        Some(output) => {
            if args.compact {
                serde_json::to_writer(&mut w, &output)?;
            } else {
                serde_json::to_writer_pretty(&mut w, &output)?;
            }
        }
        None => {
            serde_json::to_writer_pretty(&mut w, &serde_json::json!({"status": "unsat_or_timeout"}))?;
        }
    }
    Ok(())
}
