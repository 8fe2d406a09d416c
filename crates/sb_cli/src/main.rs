//! Softball simulation CLI
//!
//! Reads a game request (the same JSON the library API accepts) and prints
//! results as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sb_core::api::load_config_from_env;
use sb_core::{game_request_schema, simulate_game, simulate_series, GameRequest};

#[derive(Parser)]
#[command(name = "sb")]
#[command(about = "Simulate softball games from JSON rosters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game and print the full response
    Simulate {
        /// Game request JSON file
        #[arg(long)]
        input: PathBuf,

        /// Override the request seed
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Simulate many games between the request's teams and print a summary
    Series {
        /// Game request JSON file
        #[arg(long)]
        input: PathBuf,

        /// Number of games
        #[arg(long, default_value = "100")]
        games: u32,

        /// Seed of the first game; defaults to the request seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the JSON schema of a game request
    Schema,
}

fn read_request(path: &Path) -> Result<GameRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid game request in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { input, seed, pretty } => {
            let mut request = read_request(&input)?;
            if let Some(seed) = seed {
                request.seed = seed;
            }
            let response = simulate_game(request).context("Simulation failed")?;
            let out = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{out}");
        }
        Commands::Series { input, games, seed } => {
            let request = read_request(&input)?;
            let config = match request.config {
                Some(config) => config,
                None => load_config_from_env().context("Failed to load engine config")?,
            };
            let base_seed = seed.unwrap_or(request.seed);
            info!(games, base_seed, "running series");
            let summary = simulate_series(
                &request.home_team,
                &request.away_team,
                &config,
                games,
                base_seed,
            )
            .context("Series failed")?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&game_request_schema())?);
        }
    }

    Ok(())
}
