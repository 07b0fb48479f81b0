//! Emits a random connected room graph, reusing the teacher's
//! door-shuffle RNG plumbing (`rand::rngs::StdRng::seed_from_u64`)
//! adapted from 6-regular doors to plain undirected rooms. Grounded on
//! `generate_map.rs`'s `clap::Parser` struct and output-format inference.

use std::fs;
use std::io::Write;

use anyhow::bail;
use clap::{Parser, ValueEnum};
use scenario_engine::mapgen::random;

#[derive(Parser)]
struct Cli {
    /// Number of rooms.
    #[clap(long, short = 'n', default_value_t = 10)]
    n_rooms: usize,
    /// Path to output file. If not provided, outputs to stdout.
    #[clap(long, short = 'o', default_value = "")]
    output: String,
    /// File format: mermaid or json. If not provided, infers from output file extension.
    #[clap(long, short = 'f', default_value = "unspecified")]
    format: Format,
    #[clap(long, short = 'c', default_value_t = false)]
    compact: bool,
    #[clap(long, short = 's')]
    seed: Option<u64>,
}

#[derive(Default, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Unspecified,
    Mermaid,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let (rooms, edges) = random::generate_rooms_and_edges(args.n_rooms, args.seed);

    let format = if args.format == Format::Unspecified {
        if args.output.ends_with(".json") {
            Format::Json
        } else if args.output.ends_with(".mmd") || args.output.ends_with(".txt") || args.output.is_empty() {
            Format::Mermaid
        } else {
            bail!("Cannot infer format from output file extension. Specify format with -f option.")
        }
    } else {
        args.format.clone()
    };

    let mut w: Box<dyn Write> = if args.output.is_empty() {
        Box::new(std::io::stdout())
    } else {
        Box::new(fs::File::create(&args.output)?)
    };

    match format {
        Format::Mermaid => {
            w.write_all(random::render_mermaid(&rooms, &edges).as_bytes())?;
        }
        Format::Json => {
            let value = serde_json::json!({ "rooms": rooms, "edges": edges });
            if args.compact {
                serde_json::to_writer(&mut w, &value)?;
            } else {
                serde_json::to_writer_pretty(&mut w, &value)?;
            }
        }
        Format::Unspecified => unreachable!(),
    }
    Ok(())
}
