//! Play simulator CLI - runs batches of card-play episodes in memory.
//!
//! Every seat is driven by a scripted agent; rewards, substitutions and
//! contract results are written per episode for later analysis.

mod agents;
mod metrics;
mod output;
mod simulator;
mod types;

use std::time::{Duration, Instant};

use agents::{Agent, RandomAgent};
use bridge_play::domain::rules::PLAYERS;
use bridge_play::domain::{derive_agent_seed, derive_episode_seed};
use bridge_play::encoding::{ActionEncoding, ObservationEncoding};
use bridge_play::{EngineSettings, RewardMode, TurnMode};
use clap::Parser;
use metrics::{build_episode_metrics, RunInfo};
use output::OutputWriter;
use simulator::{EpisodeResult, Simulator};
use tracing::{info, warn};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "play-simulator")]
#[command(about = "Fast in-memory card-play simulator for agent training")]
struct Args {
    /// Number of episodes to simulate
    #[arg(short, long, default_value = "1")]
    episodes: u32,

    /// Base seed for the batch; each episode derives its own from it
    #[arg(long)]
    seed: Option<u64>,

    /// Reward policy: win, win_tricks, win_points or play_cards
    #[arg(long, default_value = "play_cards")]
    reward_mode: RewardMode,

    /// Turn mode: sequential or simultaneous
    #[arg(long, default_value = "sequential")]
    turn_mode: TurnMode,

    /// Observation encoding logged in verbose runs: integer, multi_binary or mixed
    #[arg(long, default_value = "multi_binary")]
    encoding: ObservationEncoding,

    /// Action encoding agents' proposals are routed through: integer or multi_binary
    #[arg(long, default_value = "integer")]
    action_encoding: ActionEncoding,

    /// Probability that an agent proposes an arbitrary, possibly illegal, card
    #[arg(long, default_value = "0.0")]
    illegal_rate: f64,

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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let settings = EngineSettings::new(args.reward_mode, args.turn_mode);

    if args.show_output {
        info!("Starting play simulator");
        info!(
            "Configuration: {} episodes, reward_mode={}, turn_mode={}, base_seed={}",
            args.episodes, settings.reward_mode, settings.turn_mode, base_seed
        );
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir);
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0u32;

    for episode_no in 1..=args.episodes {
        let episode_start = Instant::now();
        let episode_seed = derive_episode_seed(base_seed, u64::from(episode_no));
        let agents: [Box<dyn Agent>; PLAYERS] = [0, 1, 2, 3].map(|seat| {
            let seed = derive_agent_seed(base_seed, u64::from(episode_no), seat);
            Box::new(RandomAgent::new(seed, args.illegal_rate)) as Box<dyn Agent>
        });

        let mut simulator = Simulator::new(
            settings,
            episode_seed,
            u64::from(episode_no),
            args.action_encoding,
        );
        if args.verbose {
            simulator = simulator.with_observation_encoding(args.encoding);
        }

        match simulator.simulate_episode(&agents) {
            Ok(result) => {
                let duration_ms = episode_start.elapsed().as_secs_f64() * 1000.0;
                let run = RunInfo {
                    reward_mode: settings.reward_mode.as_str(),
                    turn_mode: settings.turn_mode.as_str(),
                    agent_types: [0, 1, 2, 3].map(|i| agents[i].name().to_string()),
                    illegal_rate: args.illegal_rate,
                    total_episodes: args.episodes,
                };
                let metrics =
                    build_episode_metrics(episode_no, episode_seed, run, &result, duration_ms);

                if let Err(e) = output_writer.write_episode(&metrics) {
                    warn!("Failed to write metrics for episode {}: {}", episode_no, e);
                }
                if args.verbose {
                    info!(
                        "Episode {} completed: contract={} made={} rewards={:?}",
                        episode_no,
                        result.final_state.contract,
                        result.final_state.contract_made(),
                        result.total_rewards
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Episode {} failed: {}", episode_no, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (json_path, csv_path) = output_writer.output_paths();
    let (json_path, csv_path) = (json_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", json_path.display());
        info!("Summary CSV written to: {}", csv_path.display());
        print_summary(&results, errors, elapsed, args.episodes);
    }

    Ok(())
}

fn print_summary(results: &[EpisodeResult], errors: u32, elapsed: Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Episodes completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per episode: {:?}",
        elapsed / results.len() as u32
    );

    let made = results
        .iter()
        .filter(|r| r.final_state.contract_made())
        .count();
    println!(
        "Contracts made: {}/{} ({:.1}%)",
        made,
        results.len(),
        made as f64 / results.len() as f64 * 100.0
    );

    let mut total_rewards = [0i64; PLAYERS];
    let mut substitutions = [0u32; PLAYERS];
    let mut tricks = [0u32; PLAYERS];
    for result in results {
        for seat in 0..PLAYERS {
            total_rewards[seat] += result.total_rewards[seat];
            substitutions[seat] += result.substitutions[seat];
            tricks[seat] += u32::from(result.final_state.tricks_won[seat]);
        }
    }

    println!("\n=== Results by Seat ===");
    for (seat, name) in ["N", "E", "S", "W"].iter().enumerate() {
        let n = results.len() as f64;
        println!(
            "Seat {}: avg_reward={:.2}, avg_tricks={:.2}, substitutions={}",
            name,
            total_rewards[seat] as f64 / n,
            tricks[seat] as f64 / n,
            substitutions[seat]
        );
    }
}
