//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `artisan-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use std::collections::BTreeMap;
use std::path::Path;

use artisan_types::{DisciplineId, MarkOption, QualityTier};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Environment variable overriding `logging.level`.
pub const LOG_LEVEL_ENV: &str = "ARTISAN_LOG";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ARTISAN_CONFIG";

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "artisan-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArtisanConfig {
    /// Engine tuning.
    #[serde(default)]
    pub crafting: CraftingConfig,

    /// Logging output.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The runner's simulated crafting session.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl ArtisanConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// Engine tuning shared by every discipline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CraftingConfig {
    /// Share of each resource line destroyed by a failed attempt, in percent.
    /// At least one unit is lost whenever a line is consumed on failure.
    #[serde(default = "default_failure_loss_pct")]
    pub failure_loss_pct: u32,

    /// Tool uses spent per attempt that reaches consumption.
    #[serde(default = "default_tool_wear_per_attempt")]
    pub tool_wear_per_attempt: u32,

    /// Skill gained per successful use by the in-memory skill store.
    #[serde(default = "default_skill_gain")]
    pub skill_gain: Decimal,

    /// Ceiling for the in-memory skill store.
    #[serde(default = "default_skill_cap")]
    pub skill_cap: Decimal,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            failure_loss_pct: default_failure_loss_pct(),
            tool_wear_per_attempt: default_tool_wear_per_attempt(),
            skill_gain: default_skill_gain(),
            skill_cap: default_skill_cap(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Apply `ARTISAN_LOG` if set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LOG_LEVEL_ENV) {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// A scripted crafting session for the runner binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of attempts to make.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Discipline to craft in.
    #[serde(default = "default_discipline")]
    pub discipline: DisciplineId,

    /// Target item type of the recipe to craft.
    #[serde(default = "default_recipe")]
    pub recipe: String,

    /// The crafter's starting value in every skill.
    #[serde(default = "default_skill")]
    pub skill: Decimal,

    /// Sub-resource material to use; the family base when absent.
    #[serde(default)]
    pub material: Option<String>,

    /// Uses on the crafter's tool.
    #[serde(default = "default_tool_uses")]
    pub tool_uses: u32,

    /// Starting inventory: item type to quantity.
    #[serde(default = "default_stock")]
    pub stock: BTreeMap<String, u32>,

    /// Maker's mark preference.
    #[serde(default)]
    pub mark: MarkOption,

    /// Quality returned by the fixed quality roller.
    #[serde(default = "default_quality")]
    pub quality: QualityTier,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            attempts: default_attempts(),
            discipline: default_discipline(),
            recipe: default_recipe(),
            skill: default_skill(),
            material: None,
            tool_uses: default_tool_uses(),
            stock: default_stock(),
            mark: MarkOption::default(),
            quality: default_quality(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_failure_loss_pct() -> u32 {
    50
}

const fn default_tool_wear_per_attempt() -> u32 {
    1
}

const fn default_skill_gain() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 1)
}

const fn default_skill_cap() -> Decimal {
    Decimal::from_parts(120, 0, 0, false, 0)
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_attempts() -> u32 {
    10
}

const fn default_discipline() -> DisciplineId {
    DisciplineId::Tinkering
}

fn default_recipe() -> String {
    "Globe".to_owned()
}

const fn default_skill() -> Decimal {
    Decimal::from_parts(80, 0, 0, false, 0)
}

const fn default_tool_uses() -> u32 {
    50
}

fn default_stock() -> BTreeMap<String, u32> {
    BTreeMap::from([("IronIngot".to_owned(), 100)])
}

const fn default_quality() -> QualityTier {
    QualityTier::Normal
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ArtisanConfig::default();
        assert_eq!(config.crafting.failure_loss_pct, 50);
        assert_eq!(config.crafting.tool_wear_per_attempt, 1);
        assert_eq!(config.crafting.skill_gain, dec!(0.1));
        assert_eq!(config.crafting.skill_cap, dec!(120));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.simulation.skill, dec!(80));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(ArtisanConfig::parse("").unwrap(), ArtisanConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
crafting:
  failure_loss_pct: 25
  tool_wear_per_attempt: 2
  skill_gain: 0.2
  skill_cap: 100

logging:
  level: debug
  json: true

simulation:
  seed: 7
  attempts: 3
  discipline: blacksmithy
  recipe: Longsword
  skill: 92.5
  material: VeriteIngot
  tool_uses: 5
  stock:
    VeriteIngot: 40
    Log: 2
  mark: mark
  quality: exceptional
";
        let config = ArtisanConfig::parse(yaml).unwrap();
        assert_eq!(config.crafting.failure_loss_pct, 25);
        assert_eq!(config.crafting.skill_gain, dec!(0.2));
        assert!(config.logging.json);
        assert_eq!(config.simulation.discipline, DisciplineId::Blacksmithy);
        assert_eq!(config.simulation.skill, dec!(92.5));
        assert_eq!(config.simulation.material.as_deref(), Some("VeriteIngot"));
        assert_eq!(config.simulation.stock.get("Log"), Some(&2));
        assert_eq!(config.simulation.mark, MarkOption::Mark);
        assert_eq!(config.simulation.quality, QualityTier::Exceptional);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = ArtisanConfig::parse("logging:\n  level: warn\n").unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.crafting, CraftingConfig::default());
        assert_eq!(config.simulation.recipe, "Globe");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ArtisanConfig::parse("crafting: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
