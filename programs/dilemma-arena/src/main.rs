//! Iterated Dilemma Arena
//!
//! Loads a tournament configuration, registers its strategies and runs
//! the round robin, reporting every match through the log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dilemma_logic::{LogObserver, TournamentConfig};

#[derive(Parser, Debug)]
#[command(name = "dilemma-arena", version, about = "Round robin of iterated dilemma strategies")]
struct Args {
    /// JSON tournament configuration (the classic three-strategy demo if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rounds per match, overriding the configuration
    #[arg(short, long, allow_negative_numbers = true)]
    iterations: Option<i64>,

    /// Seed for probabilistic strategies, overriding the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    /// List the registered strategies and exit
    #[arg(long)]
    list: bool,

    /// Log the penalty pair of every round
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    log(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => TournamentConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => TournamentConfig::classic(),
    };
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let tournament = config
        .build_tournament()
        .context("invalid tournament configuration")?;

    if args.list {
        for (index, descriptor) in tournament.strategies().iter().enumerate() {
            let description = descriptor
                .kind()
                .map(|kind| kind.describe())
                .unwrap_or_default();
            println!("{:>3}  {:<32}{}", index, descriptor.label(), description);
        }
        return Ok(());
    }

    let iterations = config.iterations()?;
    tournament
        .run_round_robin(iterations, &mut LogObserver)
        .context("round robin aborted")?;

    log::info!("{} matches played", tournament.match_count());
    Ok(())
}

/// Terminal logging: info by default, debug with `--verbose`.
fn log(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .context("initialize logger")
}
