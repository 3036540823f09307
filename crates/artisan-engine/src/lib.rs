//! Crafting resolution engine for the Artisan game server.
//!
//! Each discipline owns a [`CraftCatalog`] of recipes and a
//! [`CraftSystemPolicy`] with its rules. The [`ResolutionEngine`] takes one
//! attempt through validation, the success roll, consumption, and
//! reporting, talking to the host server only through the traits in
//! [`host`].
//!
//! # Modules
//!
//! - [`catalog`] -- Recipe catalogs and their builder API
//! - [`chance`] -- The success-chance ramp and the per-10000 roll
//! - [`config`] -- YAML configuration with environment overrides
//! - [`context`] -- Per-crafter session memory
//! - [`effects`] -- Delayed sound effects on a Tokio runtime
//! - [`error`] -- Error types for catalogs, registries, and attempts
//! - [`host`] -- Traits the host server implements
//! - [`memory`] -- In-memory host adapters
//! - [`policy`] -- Per-discipline rules
//! - [`recipe`] -- Recipe definitions and skill windows
//! - [`registry`] -- The set of registered disciplines
//! - [`resolution`] -- The attempt state machine
//! - [`resource`] -- Resource lines and sub-resource tiers

pub mod catalog;
pub mod chance;
pub mod config;
pub mod context;
pub mod effects;
pub mod error;
pub mod host;
pub mod memory;
pub mod policy;
pub mod recipe;
pub mod registry;
pub mod resolution;
pub mod resource;

pub use catalog::{CraftCatalog, RecipeBuilder};
pub use chance::{ChanceOverride, success_chance};
pub use config::{ArtisanConfig, ConfigError, CraftingConfig};
pub use context::{ContextStore, CraftContext};
pub use effects::{DelayedEffect, EffectTimers};
pub use error::{
    AttemptError, CatalogError, HostError, RegistryError, SubResourceError, ValidationFailure, ValidationKind,
};
pub use host::{CraftedItemSpec, EffectSink, Environment, HostServices, Inventory, Messenger, QualityRoller, SkillStore, Tool};
pub use policy::{CraftCheck, CraftSystemPolicy, DisciplineProfile, Ending, EndingMessages};
pub use recipe::{RecipeDefinition, RecipeIndex, SkillRequirement, SkillWindow, StationRequirement};
pub use registry::{Discipline, DisciplineRegistry};
pub use resolution::{AttemptPhase, AttemptReport, AttemptRequest, ConsumedResource, ResolutionEngine};
pub use resource::{ResourceSpec, SubResourceTable, SubResourceTier};
