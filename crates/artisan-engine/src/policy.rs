//! Per-discipline rules.
//!
//! Each discipline supplies one [`CraftSystemPolicy`]. The trait's required
//! method is [`profile`](CraftSystemPolicy::profile); every hook has a
//! default matching the common case, so a discipline overrides only what it
//! does differently: tool and ambient validation, per-item success-chance
//! overrides, failure losses, colour retention, sounds, and the ending
//! message.

use std::time::Duration;

use artisan_types::{CrafterId, DisciplineId, ItemType, Message, QualityTier, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::chance::ChanceOverride;
use crate::effects::DelayedEffect;
use crate::error::{ValidationFailure, ValidationKind};
use crate::host::{Environment, SkillStore, Tool};
use crate::recipe::RecipeDefinition;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Fixed parameters of a discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisciplineProfile {
    /// Which discipline this is.
    pub discipline: DisciplineId,
    /// The skill the success roll and material tiers read.
    pub main_skill: SkillName,
    /// Crafting menu title.
    pub gump_title: Message,
    /// Fewest repetitions of the craft sound per attempt.
    pub min_effect_count: u32,
    /// Most repetitions of the craft sound per attempt.
    pub max_effect_count: u32,
    /// Spacing between craft sound repetitions.
    pub effect_delay: Duration,
    /// Success chance at a recipe's window minimum.
    pub chance_at_min: Decimal,
    /// Whether exceptional items may carry the crafter's mark.
    pub can_mark: bool,
    /// Shown when the tool is worn out, before or after an attempt.
    pub tool_broken: Message,
    /// Shown when the tool is not carried.
    pub tool_not_on_person: Message,
    /// The six possible ending messages.
    pub endings: EndingMessages,
}

impl DisciplineProfile {
    /// A profile with one effect per attempt, a 1.25 s effect spacing, a
    /// zero floor, no maker's mark, and the stock messages.
    pub fn new(discipline: DisciplineId, main_skill: SkillName, gump_title: impl Into<Message>) -> Self {
        Self {
            discipline,
            main_skill,
            gump_title: gump_title.into(),
            min_effect_count: 1,
            max_effect_count: 1,
            effect_delay: Duration::from_millis(1_250),
            chance_at_min: Decimal::ZERO,
            can_mark: false,
            tool_broken: Message::cliloc(TOOL_WORN_OUT),
            tool_not_on_person: Message::cliloc(TOOL_NOT_ON_PERSON),
            endings: EndingMessages::default(),
        }
    }

    /// Set the discipline's chance floor.
    #[must_use]
    pub const fn chance_at_min(mut self, chance: Decimal) -> Self {
        self.chance_at_min = chance;
        self
    }

    /// Let exceptional items be signed when the crafter asks for it.
    #[must_use]
    pub const fn can_mark(mut self, can_mark: bool) -> Self {
        self.can_mark = can_mark;
        self
    }

    /// Set the craft-sound repetition range and spacing.
    #[must_use]
    pub const fn effects(mut self, min_count: u32, max_count: u32, delay: Duration) -> Self {
        self.min_effect_count = min_count;
        self.max_effect_count = max_count;
        self.effect_delay = delay;
        self
    }

    /// Replace the ending messages.
    #[must_use]
    pub fn endings(mut self, endings: EndingMessages) -> Self {
        self.endings = endings;
        self
    }

    /// Replace the tool messages.
    #[must_use]
    pub fn tool_messages(mut self, broken: impl Into<Message>, not_on_person: impl Into<Message>) -> Self {
        self.tool_broken = broken.into();
        self.tool_not_on_person = not_on_person.into();
        self
    }
}

/// "You have worn out your tool!"
pub const TOOL_WORN_OUT: u32 = 1_044_038;
/// "The tool must be on your person to use."
pub const TOOL_NOT_ON_PERSON: u32 = 1_044_263;

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

/// Everything the ending message is chosen from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ending<'a> {
    /// The recipe attempted.
    pub recipe: &'a RecipeDefinition,
    /// Whether any roll failed.
    pub failed: bool,
    /// Whether materials were destroyed by the failure.
    pub lost_material: bool,
    /// Whether the tool broke during the attempt.
    pub tool_broken: bool,
    /// Quality on success.
    pub quality: Option<QualityTier>,
    /// Whether the item was signed.
    pub makers_mark: bool,
}

/// The message table for attempt endings: two failure messages and four
/// success messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndingMessages {
    /// Failure that destroyed materials.
    pub failed_lost_material: Message,
    /// Failure that kept every material.
    pub failed_no_loss: Message,
    /// Success at below-average quality.
    pub below_average: Message,
    /// Exceptional success, signed.
    pub exceptional_marked: Message,
    /// Exceptional success, unsigned.
    pub exceptional: Message,
    /// Ordinary success.
    pub normal: Message,
}

impl Default for EndingMessages {
    fn default() -> Self {
        Self {
            failed_lost_material: Message::cliloc(1_044_043),
            failed_no_loss: Message::cliloc(1_044_157),
            below_average: Message::cliloc(502_785),
            exceptional_marked: Message::cliloc(1_044_156),
            exceptional: Message::cliloc(1_044_155),
            normal: Message::cliloc(1_044_154),
        }
    }
}

impl EndingMessages {
    /// Pick the one message describing `ending`.
    pub fn select(&self, ending: &Ending<'_>) -> &Message {
        if ending.failed {
            return if ending.lost_material {
                &self.failed_lost_material
            } else {
                &self.failed_no_loss
            };
        }
        match ending.quality {
            Some(QualityTier::BelowAverage) => &self.below_average,
            Some(QualityTier::Exceptional) if ending.makers_mark => &self.exceptional_marked,
            Some(QualityTier::Exceptional) => &self.exceptional,
            Some(QualityTier::Normal) | None => &self.normal,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation input
// ---------------------------------------------------------------------------

/// What a policy sees when deciding whether an attempt may start.
#[derive(Clone, Copy)]
pub struct CraftCheck<'a> {
    /// Who is crafting.
    pub crafter: CrafterId,
    /// The recipe chosen.
    pub recipe: &'a RecipeDefinition,
    /// The tool in hand.
    pub tool: &'a dyn Tool,
    /// The crafter's surroundings.
    pub environment: &'a dyn Environment,
    /// The crafter's skills.
    pub skills: &'a dyn SkillStore,
}

impl core::fmt::Debug for CraftCheck<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CraftCheck")
            .field("crafter", &self.crafter)
            .field("recipe", &self.recipe.target)
            .field("tool", &self.tool.id())
            .finish_non_exhaustive()
    }
}

/// The tool check every discipline starts with.
///
/// A deleted tool or one with no uses left is worn out; a tool the crafter
/// is not carrying is rejected next.
pub fn check_tool(check: &CraftCheck<'_>, profile: &DisciplineProfile) -> Result<(), ValidationFailure> {
    if check.tool.is_deleted() || check.tool.uses_remaining() == 0 {
        return Err(ValidationFailure::new(ValidationKind::ToolWornOut, profile.tool_broken.clone()));
    }
    if !check.tool.is_on_person(check.crafter) {
        return Err(ValidationFailure::new(
            ValidationKind::ToolNotOnPerson,
            profile.tool_not_on_person.clone(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CraftSystemPolicy
// ---------------------------------------------------------------------------

/// Hooks a discipline plugs into the resolution engine.
pub trait CraftSystemPolicy: Send + Sync {
    /// The discipline's fixed parameters.
    fn profile(&self) -> &DisciplineProfile;

    /// Gate an attempt before anything is consumed. The default checks the
    /// tool only.
    fn can_craft(&self, check: &CraftCheck<'_>) -> Result<(), ValidationFailure> {
        check_tool(check, self.profile())
    }

    /// Per-item replacement for the discipline's chance ramp.
    fn chance_override(&self, _recipe: &RecipeDefinition) -> Option<ChanceOverride> {
        None
    }

    /// Whether a failed attempt destroys some of `material`.
    fn consume_on_failure(&self, _crafter: CrafterId, _material: &ItemType, _recipe: &RecipeDefinition) -> bool {
        true
    }

    /// Whether the crafted item takes the colour of `material`.
    fn retains_color_from(&self, _recipe: &RecipeDefinition, _material: &ItemType) -> bool {
        false
    }

    /// Sound played while crafting, repeated per the profile's effect count.
    fn craft_sound(&self) -> Option<SoundId> {
        None
    }

    /// A second sound following the craft sound.
    fn delayed_sound(&self) -> Option<DelayedEffect> {
        None
    }

    /// The message for an attempt's outcome.
    fn ending_message(&self, ending: &Ending<'_>) -> Message {
        self.profile().endings.select(ending).clone()
    }

    /// Sound played with the ending message.
    fn ending_sound(&self, _ending: &Ending<'_>) -> Option<SoundId> {
        None
    }
}

impl core::fmt::Debug for dyn CraftSystemPolicy + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CraftSystemPolicy")
            .field("discipline", &self.profile().discipline)
            .finish_non_exhaustive()
    }
}
