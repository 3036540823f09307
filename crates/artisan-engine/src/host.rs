//! Interfaces to the host server's systems.
//!
//! The engine owns no player state. Skills, inventories, tools, message
//! delivery, the world around the crafter, sound playback, and the quality
//! roll all belong to the host; the engine reaches them through the traits
//! in this module, bundled per attempt into [`HostServices`].

use artisan_types::{CrafterId, GainOutcome, Hue, ItemId, ItemType, Lore, Message, Position, QualityTier, SkillName, SoundId, Station, ToolId};
use rust_decimal::Decimal;

use crate::error::HostError;
use crate::recipe::RecipeDefinition;

/// Current skill values and skill-gain events.
pub trait SkillStore {
    /// The crafter's current value in `skill`.
    fn skill(&self, crafter: CrafterId, skill: SkillName) -> Decimal;

    /// Report that `skill` was used with the given outcome. The gain curve is
    /// the host's business.
    fn grant_skill_gain(&mut self, crafter: CrafterId, skill: SkillName, outcome: GainOutcome);
}

/// What to create after a successful craft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftedItemSpec {
    /// Who made it.
    pub crafter: CrafterId,
    /// The item type.
    pub target: ItemType,
    /// Rolled quality.
    pub quality: QualityTier,
    /// Signature, present only on marked exceptional items.
    pub maker: Option<CrafterId>,
    /// Colour inherited from the material, if any.
    pub hue: Option<Hue>,
    /// The primary material actually consumed.
    pub material: ItemType,
}

/// The crafter's containers.
pub trait Inventory {
    /// Units of `material` the crafter holds.
    fn quantity(&self, crafter: CrafterId, material: &ItemType) -> u32;

    /// Remove `amount` units of `material`.
    fn consume(&mut self, crafter: CrafterId, material: &ItemType, amount: u32) -> Result<(), HostError>;

    /// Create a crafted item and place it with the crafter.
    fn create_item(&mut self, spec: &CraftedItemSpec) -> Result<ItemId, HostError>;
}

/// The tool used for an attempt.
pub trait Tool {
    /// The tool's identity.
    fn id(&self) -> ToolId;

    /// Uses left before it breaks.
    fn uses_remaining(&self) -> u32;

    /// Spend one use. Never goes below zero.
    fn decrement_uses(&mut self);

    /// Whether the crafter is carrying it.
    fn is_on_person(&self, crafter: CrafterId) -> bool;

    /// Whether the tool has been removed from the world.
    fn is_deleted(&self) -> bool {
        false
    }
}

/// Message delivery to players.
pub trait Messenger {
    /// Send `message` to the crafter.
    fn deliver(&mut self, crafter: CrafterId, message: &Message);
}

/// Read-only facts about the crafter's surroundings and knowledge.
pub trait Environment {
    /// Whether a `station` lies within `range` tiles of the crafter.
    fn is_near(&self, crafter: CrafterId, station: Station, range: u32) -> bool;

    /// Whether the crafter has unlocked `lore`.
    fn has_learned(&self, crafter: CrafterId, lore: Lore) -> bool;

    /// The crafter's map position, if they are in the world.
    fn position(&self, crafter: CrafterId) -> Option<Position>;

    /// Whether the crafter has learned the scroll recipe `recipe_id`.
    fn knows_recipe(&self, crafter: CrafterId, recipe_id: u32) -> bool;
}

/// Sound playback.
///
/// Takes `&self` so a sink can be shared with [`EffectTimers`](crate::effects::EffectTimers)
/// tasks; implementations provide their own interior mutability.
pub trait EffectSink {
    /// Play `sound` at the crafter's location.
    fn play_sound(&self, crafter: CrafterId, sound: SoundId);
}

/// The host's quality roll for successful crafts.
pub trait QualityRoller {
    /// Choose a quality tier for a successful attempt at `recipe` by a
    /// crafter with `skill` in the discipline's main skill.
    fn roll_quality(&mut self, crafter: CrafterId, recipe: &RecipeDefinition, skill: Decimal) -> QualityTier;
}

/// Every collaborator one attempt needs.
pub struct HostServices<'h> {
    /// Skill values and gains.
    pub skills: &'h mut dyn SkillStore,
    /// The crafter's inventory.
    pub inventory: &'h mut dyn Inventory,
    /// The tool in use.
    pub tool: &'h mut dyn Tool,
    /// Player message delivery.
    pub messenger: &'h mut dyn Messenger,
    /// Stations, lore, and position.
    pub environment: &'h dyn Environment,
    /// Sound playback.
    pub effects: &'h dyn EffectSink,
    /// Quality roll.
    pub quality: &'h mut dyn QualityRoller,
}

impl core::fmt::Debug for HostServices<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostServices")
            .field("tool", &self.tool.id())
            .finish_non_exhaustive()
    }
}
