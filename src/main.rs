//! city-chain CLI - play the city word-chain game against the computer.
//!
//! Progress is saved after every turn and resumed on the next launch.

use std::path::PathBuf;
use std::process::ExitCode;

use city_chain::core::{DEFAULT_CATALOG_PATH, DEFAULT_SAVE_PATH};
use city_chain::{
    load_catalog, ConsoleIo, GameConfig, GameController, GameRng, JsonFileStore, RunResult,
    TurnEngine,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "city-chain")]
#[command(about = "Name cities in a chain against the computer")]
struct Args {
    /// City catalog (JSON sequence of records)
    #[arg(long, env = "CITY_CHAIN_CATALOG", default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Saved game location
    #[arg(long, env = "CITY_CHAIN_SAVE", default_value = DEFAULT_SAVE_PATH)]
    save: PathBuf,

    /// Seed for the computer's choices (for reproducible games)
    #[arg(long)]
    seed: Option<u64>,

    /// Discard any saved game and start a new one
    #[arg(long)]
    new: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> GameConfig {
        let mut config = GameConfig::new()
            .with_catalog_path(&self.catalog)
            .with_save_path(&self.save);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.new {
            config = config.fresh();
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so they never interleave with the prompt.
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.into_config();

    let catalog = match load_catalog(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "cannot load city catalog");
            eprintln!("city-chain: {e}");
            return ExitCode::FAILURE;
        }
    };

    let rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!(seed = rng.seed(), "rng ready");

    let engine = TurnEngine::new(catalog, rng);
    let store = JsonFileStore::new(&config.save_path);
    let mut controller = GameController::new(engine, store, ConsoleIo::stdio());
    if config.fresh {
        controller.discard_saved_game();
    }

    match controller.run() {
        Ok(RunResult::Finished(outcome)) => {
            info!(%outcome, "done");
            ExitCode::SUCCESS
        }
        Ok(RunResult::Suspended) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "game aborted");
            eprintln!("city-chain: {e}");
            ExitCode::FAILURE
        }
    }
}
