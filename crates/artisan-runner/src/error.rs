//! Error types for the runner binary.

use artisan_types::{DisciplineId, ItemType};

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: artisan_engine::ConfigError,
    },

    /// A discipline could not be built or found.
    #[error("registry error: {source}")]
    Registry {
        /// The underlying registry error.
        #[from]
        source: artisan_engine::RegistryError,
    },

    /// Seeding the crafter's inventory failed.
    #[error("host error: {source}")]
    Host {
        /// The underlying host error.
        #[from]
        source: artisan_engine::HostError,
    },

    /// The configured recipe is not in the discipline's catalog.
    #[error("{discipline} has no recipe for {target}")]
    UnknownRecipe {
        /// The discipline searched.
        discipline: DisciplineId,
        /// The item type asked for.
        target: ItemType,
    },

    /// The summary could not be serialized.
    #[error("summary error: {source}")]
    Summary {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}
