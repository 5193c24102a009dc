//! Session simulator: plays whole games with bots against in-memory collaborators.
//!
//! Windows run on real timers scaled down by `--time-scale`, so bots race the
//! clock the same way chat players do.

mod metrics;
mod output;
mod simulator;
mod types;

use std::collections::BTreeMap;
use std::time::Instant;

use clap::Parser;
use mafia::telemetry::LogFormat;
use mafia::{Faction, GameSettings};
use metrics::{build_game_metrics, GameConfig, GameMetrics};
use output::OutputWriter;
use simulator::Simulator;
use tracing::{info, warn};
use types::{BotKind, OutputFormat};

#[derive(Parser)]
#[command(name = "session-simulator")]
#[command(about = "Play simulated mafia sessions with bots")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game
    #[arg(short, long, default_value = "8")]
    players: usize,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// How bots answer prompts
    #[arg(long, default_value = "random")]
    bots: BotKind,

    /// Multiplier applied to night and vote windows
    #[arg(long, default_value = "0.002")]
    time_scale: f64,

    /// JSON game settings; defaults come from MAFIA_* environment variables
    #[arg(long)]
    settings: Option<String>,

    /// Emit JSON logs through the engine's telemetry setup
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    if args.json_logs {
        mafia::telemetry::init_tracing(LogFormat::Json);
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let base_settings = match &args.settings {
        Some(path) => GameSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => GameSettings::from_env()?,
    };

    if args.show_output {
        info!(games = args.games, players = args.players, bots = ?args.bots, "Starting session simulator");
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let start = Instant::now();
    let mut finished = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(game_num));
        let simulator = Simulator::new(
            base_settings.clone(),
            seed,
            game_num,
            args.players,
            args.bots,
            args.time_scale,
        );

        match simulator.simulate_game().await {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let config = GameConfig {
                    players: args.players,
                    bots: args.bots,
                    total_games: args.games,
                };
                let metrics = build_game_metrics(game_num, seed, config, &result, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game_num, winner = metrics.result.winner.as_str(), nights = metrics.result.nights, "Game completed");
                }
                finished.push(metrics);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();
    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&finished, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(games: &[GameMetrics], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", games.len(), total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if games.is_empty() {
        return;
    }
    println!("Average time per game: {:?}", elapsed / games.len() as u32);

    let mut wins: BTreeMap<Faction, u32> = BTreeMap::new();
    let mut solo = 0;
    for game in games {
        *wins.entry(game.result.winner).or_insert(0) += 1;
        if game.result.solo.is_some() {
            solo += 1;
        }
    }
    let nights: u32 = games.iter().map(|g| g.result.nights).sum();
    let dropped: usize = games.iter().map(|g| g.result.dropped_out).sum();

    println!("\n=== Results by Faction ===");
    for (faction, count) in &wins {
        let rate = f64::from(*count) / games.len() as f64 * 100.0;
        println!("{}: {} ({:.1}%)", faction.as_str(), count, rate);
    }
    println!("Solo victories: {solo}");
    println!("Average nights: {:.1}", f64::from(nights) / games.len() as f64);
    println!("Players dropped for inactivity: {dropped}");
}
