use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bot_core::{PolicyConfig, ReplayResult, load_journal_from_file, replay_journal};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSONL turn journal to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Optional TOML file overriding the policy thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print one JSON decision per line instead of the text summary
    #[arg(long)]
    json: bool,
}

/// `RUST_LOG` when it is set and parses, otherwise `fallback`.
fn log_filter(rust_log: Option<&str>, fallback: &str) -> EnvFilter {
    rust_log
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn main() -> Result<()> {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), "info"))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = PolicyConfig::load_or_default(args.config.as_deref())
        .with_context(|| format!("Failed to load policy config: {:?}", args.config))?;
    let loaded = load_journal_from_file(&args.journal)
        .with_context(|| format!("Failed to load journal file: {}", args.journal.display()))?;

    let result: ReplayResult = replay_journal(&loaded.journal, &config)
        .map_err(|e| anyhow::anyhow!("Replay failed: {:?}", e))?;

    if args.json {
        for turn in &result.turns {
            let line = serde_json::to_string(&turn.decision)
                .with_context(|| format!("Failed to encode decision for turn {}", turn.turn))?;
            println!("{line}");
        }
        return Ok(());
    }

    println!("Replay complete for {}.", loaded.journal.bot_name);
    for turn in &result.turns {
        println!("{:>5}  {:<24?} {:?}", turn.turn, turn.decision.reason, turn.decision.action);
    }
    println!("Turns: {}", result.turns.len());
    println!(
        "Final memory: health {}% shield {}%",
        result.final_memory.last_health_percent, result.final_memory.last_shield_percent
    );
    println!("Trace Hash: 0x{:016x}", result.trace_hash);

    Ok(())
}
