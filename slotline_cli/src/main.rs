mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slotline_core::{replay_grid, simulate, Bet, FairSeed, Machine, MachineConfig, RngSource};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "slotline", about = "Three-reel slot machine for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// TOML file with machine settings (rows, cols, max_lines, min_bet, max_bet, max_deposit)
    #[arg(long, value_parser, env = "SLOTLINE_CONFIG")]
    config: Option<PathBuf>,
    /// Secret server seed; makes every spin replayable
    #[arg(long, env = "SLOTLINE_SERVER_SEED")]
    server_seed: Option<String>,
    /// Client seed mixed into provably-fair spins
    #[arg(long, default_value = "player")]
    client_seed: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (default)
    Play,
    /// Spin many times at a fixed bet and report the return to player
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        spins: u64,
        #[arg(long, default_value_t = 1)]
        lines: usize,
        #[arg(long, default_value_t = 1)]
        bet: u64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the grid of a past provably-fair spin
    Replay {
        #[arg(long)]
        nonce: u64,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = MachineConfig::load(cli.config.as_deref()).context("loading machine config")?;
    let machine = Machine::new(config).context("invalid machine configuration")?;
    let seed = cli
        .server_seed
        .map(|server_seed| FairSeed::new(server_seed, cli.client_seed));

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let source = match seed {
                Some(seed) => {
                    println!("Server seed hash: {}", seed.server_seed_hash_hex());
                    RngSource::provably_fair(seed)
                }
                None => RngSource::entropy(),
            };
            let stdin = io::stdin();
            let balance = Session::new(&machine, source, stdin.lock(), io::stdout()).run()?;
            info!(balance, "session ended");
        }
        Commands::Simulate {
            spins,
            lines,
            bet,
            json,
        } => {
            let mut source = seed
                .map(RngSource::provably_fair)
                .unwrap_or_else(RngSource::entropy);
            let report = simulate(&machine, &mut source, Bet::new(lines, bet), spins)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "spins={} staked=${} won=${} winning_spins={} rtp={:.4} hit_rate={:.4}",
                    report.spins,
                    report.total_staked,
                    report.total_won,
                    report.winning_spins,
                    report.rtp(),
                    report.hit_rate()
                );
            }
        }
        Commands::Replay { nonce } => {
            let seed = seed.context("replay needs --server-seed")?;
            let grid = replay_grid(&machine, &seed, nonce)?;
            println!(
                "server_seed_hash={} client_seed={} nonce={}",
                seed.server_seed_hash_hex(),
                seed.client_seed,
                nonce
            );
            print!("{grid}");
        }
    }

    Ok(())
}

// Logs go to stderr so they never interleave with prompts on stdout.
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}
