//! Error types for the artisan-engine crate.
//!
//! Two families live here. Construction errors ([`CatalogError`],
//! [`RegistryError`]) are programmer errors raised while disciplines are
//! initialised at server start; they are fatal and never reach a player.
//! Attempt errors ([`AttemptError`]) are raised while a player crafts; each
//! one carries the message the player is shown and aborts the attempt before
//! anything is consumed.
//!
//! A failed craft roll is not an error: it is an
//! [`AttemptReport`](crate::resolution::AttemptReport) with `failed == true`.

use artisan_types::{DisciplineId, ItemType, Message};
use rust_decimal::Decimal;

use crate::recipe::RecipeIndex;

// ---------------------------------------------------------------------------
// Construction errors
// ---------------------------------------------------------------------------

/// Errors raised while building a [`CraftCatalog`](crate::catalog::CraftCatalog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A recipe for this target type is already registered.
    #[error("duplicate recipe for target {0}")]
    DuplicateRecipe(ItemType),

    /// The index does not refer to a recipe returned by a prior `add_recipe`.
    #[error("unknown recipe index {index} (catalog holds {len} recipes)")]
    UnknownRecipeIndex {
        /// The offending index.
        index: usize,
        /// Number of recipes in the catalog.
        len: usize,
    },

    /// A resource requirement asked for zero units.
    #[error("resource {0} must require a positive quantity")]
    ZeroQuantity(ItemType),

    /// A skill window whose minimum exceeds its maximum.
    #[error("invalid skill window: min {min} exceeds max {max}")]
    InvalidSkillWindow {
        /// Lower bound.
        min: Decimal,
        /// Upper bound.
        max: Decimal,
    },

    /// A sub-resource table was built without any tiers.
    #[error("sub-resource table for {0} has no tiers")]
    EmptySubResourceTable(ItemType),

    /// A tier's minimum skill is lower than the tier before it.
    #[error("sub-resource tier {material} (min {min_skill}) is below the previous tier (min {previous})")]
    TiersOutOfOrder {
        /// The out-of-order material.
        material: ItemType,
        /// Its minimum skill.
        min_skill: Decimal,
        /// The previous tier's minimum skill.
        previous: Decimal,
    },

    /// The same material appears twice in one table.
    #[error("sub-resource material {0} listed twice")]
    DuplicateTier(ItemType),

    /// The table's base material is not one of its tiers.
    #[error("sub-resource table base {0} is not one of its tiers")]
    MissingBaseTier(ItemType),

    /// A table for this base material is already registered.
    #[error("duplicate sub-resource table for base {0}")]
    DuplicateSubResource(ItemType),
}

/// Errors raised while assembling the discipline registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The discipline is already registered.
    #[error("discipline {0} registered twice")]
    DuplicateDiscipline(DisciplineId),

    /// No discipline with this id is registered.
    #[error("discipline {0} is not registered")]
    UnknownDiscipline(DisciplineId),

    /// The catalog and policy disagree about which discipline they belong to.
    #[error("catalog for {catalog} paired with policy for {policy}")]
    MismatchedDiscipline {
        /// The catalog's discipline.
        catalog: DisciplineId,
        /// The policy's discipline.
        policy: DisciplineId,
    },

    /// A discipline's catalog failed to build.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

// ---------------------------------------------------------------------------
// Attempt errors
// ---------------------------------------------------------------------------

/// Why a discipline's validation gate rejected an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// The tool is missing, deleted, or has no uses left.
    ToolWornOut,
    /// The tool is not carried by the crafter.
    ToolNotOnPerson,
    /// The crafter is not near a required station or not inside a required
    /// area.
    AmbientRequirement,
    /// The crafter has not learned the discipline (lore flag or minimum
    /// skill) or the recipe.
    PrerequisiteUnmet,
}

/// A rejected validation gate, with the message the player sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationFailure {
    /// Category of the rejection.
    pub kind: ValidationKind,
    /// Message delivered to the crafter.
    pub message: Message,
}

impl ValidationFailure {
    /// Build a failure from a kind and a message.
    pub fn new(kind: ValidationKind, message: impl Into<Message>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors reported by host collaborators (inventory, item creation).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The inventory holds fewer units than the engine tried to consume.
    #[error("insufficient stock: wanted {requested} of {material} but only have {available}")]
    InsufficientStock {
        /// The material.
        material: ItemType,
        /// Units requested.
        requested: u32,
        /// Units held.
        available: u32,
    },

    /// The host refused the operation for its own reasons.
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

/// Result of checking a held material against a sub-resource table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubResourceError {
    /// The material is not a tier of this table.
    #[error("material {0} is not part of this sub-resource family")]
    NotInFamily(ItemType),

    /// The crafter's skill is below the tier's minimum.
    #[error("material {material} requires {required} skill, crafter has {skill}")]
    InsufficientSkill {
        /// The material.
        material: ItemType,
        /// Tier minimum skill.
        required: Decimal,
        /// The crafter's skill.
        skill: Decimal,
        /// Message for the crafter.
        message: Message,
    },
}

/// Errors that abort a crafting attempt before any resource is touched.
///
/// Every variant is recovered at the command boundary: the engine has already
/// delivered [`AttemptError::message`] to the crafter when it returns one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    /// The requested recipe index is not in the discipline's catalog.
    #[error("unknown recipe {0}")]
    UnknownRecipe(RecipeIndex),

    /// The discipline's validation gate rejected the attempt.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// The crafter lacks a fixed resource.
    #[error("insufficient {material}: need {required}, have {available}")]
    InsufficientResource {
        /// The missing material.
        material: ItemType,
        /// Units required.
        required: u32,
        /// Units held.
        available: u32,
        /// Message for the crafter.
        message: Message,
    },

    /// The crafter holds none (or not enough) of the chosen material tier, or
    /// the chosen material is not part of the recipe's family.
    #[error("insufficient sub-resource {material}")]
    InsufficientSubResource {
        /// The chosen material.
        material: ItemType,
        /// Message for the crafter.
        message: Message,
    },

    /// The crafter holds the material but lacks the skill to work it.
    #[error("insufficient skill for {material}: need {required}, have {skill}")]
    InsufficientSkillForMaterial {
        /// The chosen material.
        material: ItemType,
        /// Tier minimum skill.
        required: Decimal,
        /// The crafter's skill.
        skill: Decimal,
        /// Message for the crafter.
        message: Message,
    },

    /// A host collaborator failed while the engine was consuming or creating.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl AttemptError {
    /// The message the crafter is shown for this error.
    pub fn message(&self) -> Message {
        match self {
            Self::UnknownRecipe(_) | Self::Host(_) => Message::text(self.to_string()),
            Self::Validation(failure) => failure.message.clone(),
            Self::InsufficientResource { message, .. }
            | Self::InsufficientSubResource { message, .. }
            | Self::InsufficientSkillForMaterial { message, .. } => message.clone(),
        }
    }
}
