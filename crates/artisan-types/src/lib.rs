//! Shared type definitions for the Artisan crafting engine.
//!
//! Every crate in the workspace speaks in these types: identifiers for the
//! entities the engine talks about, the enumerations that name skills and
//! disciplines, and the small value types (`Message`, `ItemType`, `Hue`)
//! that flow between the engine and the host server.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for crafters, tools, and items
//! - [`enums`] -- Skills, disciplines, quality tiers, stations, and lore
//! - [`structs`] -- Item types, player messages, hues, sounds, and geometry

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    DisciplineId, GainOutcome, Lore, MarkOption, QualityTier, SkillName, Station,
};
pub use ids::{CrafterId, ItemId, ToolId};
pub use structs::{Area, Hue, ItemType, Message, Position, SoundId};
