//! Runner binary for the Artisan crafting engine.
//!
//! Loads configuration, builds every shipped discipline, and plays a
//! scripted crafting session against in-memory host adapters. Useful for
//! checking a recipe's feel (chance, loss, wear) without a game server.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ARTISAN_CONFIG` or `artisan-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the discipline registry
//! 4. Run the session and wait for its sound effects
//! 5. Print the session summary as JSON

mod error;
mod session;

use std::path::PathBuf;

use artisan_engine::ArtisanConfig;
use artisan_engine::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;

/// Application entry point for the runner.
///
/// # Errors
///
/// Returns an error if configuration, registry construction, or the
/// session setup fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so report the source
    //    afterwards.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        source = source.as_deref().unwrap_or("defaults"),
        discipline = %config.simulation.discipline,
        recipe = config.simulation.recipe,
        seed = config.simulation.seed,
        "artisan-runner starting"
    );

    // 3. Build the registry.
    let registry = artisan_disciplines::standard_registry().map_err(RunnerError::from)?;

    // 4. Run the session.
    let summary = session::run(&registry, &config.crafting, &config.simulation).await?;

    // 5. Report.
    let rendered = serde_json::to_string_pretty(&summary).map_err(RunnerError::from)?;
    println!("{rendered}");
    info!("artisan-runner finished");
    Ok(())
}

/// Load configuration from `$ARTISAN_CONFIG`, falling back to
/// `artisan-config.yaml`. A missing file means defaults.
fn load_config() -> Result<(ArtisanConfig, Option<String>), RunnerError> {
    let path = std::env::var(CONFIG_PATH_ENV).map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = ArtisanConfig::from_file(&path)?;
        Ok((config, Some(path.display().to_string())))
    } else {
        let mut config = ArtisanConfig::default();
        config.logging.apply_env_overrides();
        Ok((config, None))
    }
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
