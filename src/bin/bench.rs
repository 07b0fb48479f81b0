//! Sweeps independent `(seed, scenario)` pairs and reports solve-time
//! statistics, in the spirit of the teacher's `chokudai*`/`wata_sat*`
//! exploratory bins. `rayon` parallelizes only this outer sweep — each
//! individual solve is itself single-threaded.

use clap::Parser;
use rayon::prelude::*;
use scenario_engine::config::{Configuration, ScenarioFlags};
use scenario_engine::mapgen::random;
use scenario_engine::solve::{self, DEFAULT_TIMEOUT_MS};
use serde::Serialize;

const ALL_SCENARIOS: &[&str] = &[
    "s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "s12", "s13", "s14", "s15", "s16",
];

#[derive(Parser)]
struct Cli {
    #[clap(long, default_value_t = 8)]
    n_rooms: usize,
    #[clap(long, default_value_t = 5)]
    n_chars: usize,
    #[clap(long, default_value_t = 8)]
    t: usize,
    /// Number of seeds to sweep per scenario (seeds 0..count).
    #[clap(long, default_value_t = 10)]
    seeds: u64,
    /// Comma-separated scenario list, e.g. "s1,s7,s10". Defaults to all 16.
    #[clap(long)]
    scenarios: Option<String>,
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunResult {
    scenario: String,
    seed: u64,
    solved: bool,
    solve_time_ms: u128,
    conflicts: u64,
    decisions: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSummary {
    scenario: String,
    runs: usize,
    solved: usize,
    mean_solve_time_ms: f64,
    max_solve_time_ms: u128,
}

fn flags_for(scenario: &str) -> ScenarioFlags {
    let mut flags = ScenarioFlags::default();
    match scenario {
        "s1" => flags.s1 = true,
        "s2" => flags.s2 = true,
        "s3" => flags.s3 = true,
        "s4" => flags.s4 = true,
        "s5" => flags.s5 = true,
        "s6" => flags.s6 = true,
        "s7" => flags.s7 = true,
        "s8" => flags.s8 = true,
        "s9" => flags.s9 = true,
        "s10" => flags.s10 = true,
        "s11" => flags.s11 = true,
        "s12" => flags.s12 = true,
        "s13" => flags.s13 = true,
        "s14" => flags.s14 = true,
        "s15" => flags.s15 = true,
        "s16" => flags.s16 = true,
        other => panic!("unknown scenario {other}"),
    }
    flags
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let scenario_list: Vec<String> = match &args.scenarios {
        Some(s) => s.split(',').map(|s| s.trim().to_string()).collect(),
        None => ALL_SCENARIOS.iter().map(|s| s.to_string()).collect(),
    };

    let n_rooms = args.n_rooms.max(4);
    let n_chars = args.n_chars.max(2);
    let t = args.t.max(6);

    let jobs: Vec<(String, u64)> = scenario_list
        .iter()
        .flat_map(|sc| (0..args.seeds).map(move |seed| (sc.clone(), seed)))
        .collect();

    let results: Vec<RunResult> = jobs
        .par_iter()
        .map(|(scenario, seed)| {
            let (rooms, edges) = random::generate_rooms_and_edges(n_rooms, Some(*seed));
            let chars: Vec<String> = (0..n_chars).map(|i| format!("Char{i}")).collect();
            let cfg = Configuration {
                rooms,
                edges,
                chars,
                t,
                must_move: false,
                allow_stay: true,
                scenarios: flags_for(scenario),
                seed: Some(*seed),
            };
            match solve::solve_and_decode(&cfg, args.timeout_ms) {
                Ok(Some(output)) => RunResult {
                    scenario: scenario.clone(),
                    seed: *seed,
                    solved: true,
                    solve_time_ms: output.stats.solve_time_ms,
                    conflicts: output.stats.conflicts,
                    decisions: output.stats.decisions,
                },
                Ok(None) => RunResult {
                    scenario: scenario.clone(),
                    seed: *seed,
                    solved: false,
                    solve_time_ms: args.timeout_ms as u128,
                    conflicts: 0,
                    decisions: 0,
                },
                Err(e) => {
                    tracing::warn!(scenario = %scenario, seed, error = %e, "encoder rejected generated configuration");
                    RunResult {
                        scenario: scenario.clone(),
                        seed: *seed,
                        solved: false,
                        solve_time_ms: 0,
                        conflicts: 0,
                        decisions: 0,
                    }
                }
            }
        })
        .collect();

    let summaries: Vec<ScenarioSummary> = scenario_list
        .iter()
        .map(|sc| {
            let runs: Vec<&RunResult> = results.iter().filter(|r| &r.scenario == sc).collect();
            let solved = runs.iter().filter(|r| r.solved).count();
            let mean = if runs.is_empty() {
                0.0
            } else {
                runs.iter().map(|r| r.solve_time_ms as f64).sum::<f64>() / runs.len() as f64
            };
            let max = runs.iter().map(|r| r.solve_time_ms).max().unwrap_or(0);
            ScenarioSummary {
                scenario: sc.clone(),
                runs: runs.len(),
                solved,
                mean_solve_time_ms: mean,
                max_solve_time_ms: max,
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "summaries": summaries,
        "runs": results,
    }))?);
    Ok(())
}
