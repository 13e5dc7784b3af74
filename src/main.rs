use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_pairing::config::AppConfig;
use swiss_pairing::pairing::PairingEngine;
use swiss_pairing::storage::StorageConfig;
use swiss_pairing::store::{JsonlStore, TournamentStore};
use swiss_pairing::PlayerId;

#[derive(Parser)]
#[command(name = "swiss-pairing")]
#[command(about = "Swiss-system tournament standings and pairings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Tournament name (overrides the config file)
    #[arg(long)]
    tournament: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new player
    Register {
        /// Player's full name
        name: String,
    },

    /// Record the result of a match
    Report {
        /// Id of the winning player
        winner: u32,

        /// Id of the losing player
        loser: u32,
    },

    /// Print the number of registered players
    Count,

    /// Print current standings
    Standings {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate pairings for the next round
    Pair {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all match records
    DeleteMatches,

    /// Remove all players and their matches
    DeletePlayers,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)?
    } else {
        AppConfig::default()
    };

    if let Some(ref dir) = cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(ref name) = cli.tournament {
        config.tournament.name = name.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    init_tracing(&config.log_level, cli.json_logs);
    tracing::debug!("Starting swiss-pairing v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let mut store = JsonlStore::open(storage, config.tournament.name.clone())
        .with_allow_rematches(config.tournament.allow_rematches);

    match cli.command {
        Commands::Register { name } => {
            let id = store.register_player(&name)?;
            println!("Registered {} with id {}", name, id);
        }
        Commands::Report { winner, loser } => {
            let record = store.report_match(PlayerId(winner), PlayerId(loser))?;
            println!(
                "Recorded match {}: {} beat {}",
                record.sequence, record.winner_id, record.loser_id
            );
        }
        Commands::Count => {
            println!("{}", store.count_players()?);
        }
        Commands::Standings { json } => {
            let standings = store.standings()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
            } else {
                println!("\n=== Standings: {} ===\n", store.tournament());
                println!("{:>4}  {:<24} {:>4} {:>7}", "id", "name", "wins", "played");
                for s in &standings {
                    println!(
                        "{:>4}  {:<24} {:>4} {:>7}",
                        s.id.get(), s.name, s.wins, s.matches_played
                    );
                }
            }
        }
        Commands::Pair { json } => {
            let engine = PairingEngine::new(config.tournament.pairing_options());
            let round = store.snapshot()?.pair_next_round(&engine)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&round)?);
            } else {
                println!("\n=== Round {} ===\n", round.number);
                for p in &round.pairings {
                    println!(
                        "  {:>4} {:<24} vs {:>4} {}",
                        p.player_a.get(),
                        p.name_a,
                        p.player_b.get(),
                        p.name_b
                    );
                }
            }
        }
        Commands::DeleteMatches => {
            let removed = store.delete_matches()?;
            println!("Deleted {} matches", removed);
        }
        Commands::DeletePlayers => {
            let removed = store.delete_players()?;
            println!("Deleted {} players", removed);
        }
    }

    Ok(())
}
