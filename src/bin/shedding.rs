use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shedding_rs::agents::BotTier;
use shedding_rs::config::{GameConfig, SeatKind};
use shedding_rs::session::Session;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    Basic,
    Heuristic,
    Scored,
}

impl From<TierArg> for BotTier {
    fn from(t: TierArg) -> Self {
        match t {
            TierArg::Basic => BotTier::Basic,
            TierArg::Heuristic => BotTier::Heuristic,
            TierArg::Scored => BotTier::Scored,
        }
    }
}

/// Run an all-bot shedding match and print the result.
#[derive(Debug, Parser)]
#[command(name = "shedding-rs", author, version, about = "Bot match runner for the shedding card game")]
struct Cli {
    /// JSON configuration file; flags below override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of seats (2-6).
    #[arg(short, long, value_name = "N")]
    players: Option<usize>,

    /// Round wins needed to take the match.
    #[arg(short, long, value_name = "WINS")]
    threshold: Option<u32>,

    /// Seed for deals and bot decisions.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Bot tier per seat, cycled when fewer than the seat count.
    #[arg(long, value_enum, value_delimiter = ',')]
    tiers: Vec<TierArg>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore error if a global subscriber is already set
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn build_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::all_bots(4, BotTier::Scored),
    };
    if let Some(players) = cli.players {
        config.player_count = players;
    }
    if let Some(threshold) = cli.threshold {
        config.win_threshold = threshold;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let tiers: Vec<BotTier> = if cli.tiers.is_empty() {
        config
            .seats
            .iter()
            .filter_map(|s| match s {
                SeatKind::Bot(tier) => Some(*tier),
                SeatKind::Human => None,
            })
            .collect()
    } else {
        cli.tiers.iter().copied().map(BotTier::from).collect()
    };
    let tiers = if tiers.is_empty() { vec![BotTier::Scored] } else { tiers };
    config.seats = (0..config.player_count).map(|i| SeatKind::Bot(tiers[i % tiers.len()])).collect();

    config.validate().context("invalid match settings")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();
    let config = build_config(&cli)?;

    let mut session = Session::new(&config)?;
    let summary = session.run_to_completion().context("match did not finish")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Match over after {} rounds ({} turns)", summary.rounds, summary.turns);
    for (seat, kind) in config.seats.iter().enumerate() {
        let marker = if seat == summary.winner { "*" } else { " " };
        println!(
            "{marker} P{} {:?}: {} wins, {} losses",
            seat + 1,
            kind,
            summary.wins[seat],
            summary.losses[seat]
        );
    }
    Ok(())
}
