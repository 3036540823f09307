//! The resolution engine: one crafting attempt from validation to report.
//!
//! An attempt moves through `Validating -> RollingSuccess -> (Success |
//! Failure) -> Consuming -> Reporting -> Terminal` synchronously. Anything
//! that stops it during validation is an [`AttemptError`]; nothing is
//! consumed, no tool use is spent, and no skill is trained. A failed roll is
//! a normal outcome and produces an [`AttemptReport`] with `failed == true`.

use std::collections::BTreeMap;

use artisan_types::{CrafterId, GainOutcome, Hue, ItemId, ItemType, MarkOption, Message, QualityTier};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::catalog::CraftCatalog;
use crate::chance::{roll, success_chance};
use crate::config::CraftingConfig;
use crate::context::CraftContext;
use crate::effects::DelayedEffect;
use crate::error::{AttemptError, SubResourceError, ValidationFailure, ValidationKind};
use crate::host::{CraftedItemSpec, HostServices};
use crate::policy::{CraftCheck, CraftSystemPolicy, Ending};
use crate::recipe::{RecipeDefinition, RecipeIndex};

/// "You must learn that recipe from a scroll."
pub const RECIPE_NOT_LEARNED: u32 = 1_072_847;

// ---------------------------------------------------------------------------
// Request / report
// ---------------------------------------------------------------------------

/// One crafting attempt as requested by the command layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRequest {
    /// Who is crafting.
    pub crafter: CrafterId,
    /// Which recipe in the discipline's catalog.
    pub recipe: RecipeIndex,
    /// Chosen sub-resource material; the family base when `None`.
    pub material: Option<ItemType>,
    /// Maker's mark preference. [`MarkOption::Prompt`] signs nothing.
    pub mark: MarkOption,
    /// Keep the item's default colour even when the material could tint it.
    pub do_not_color: bool,
}

impl AttemptRequest {
    /// A request with the base material, no mark, and colour inheritance on.
    pub const fn new(crafter: CrafterId, recipe: RecipeIndex) -> Self {
        Self {
            crafter,
            recipe,
            material: None,
            mark: MarkOption::DoNotMark,
            do_not_color: false,
        }
    }

    /// A request carrying the crafter's saved preferences.
    pub fn from_context(crafter: CrafterId, recipe: RecipeIndex, context: &CraftContext) -> Self {
        Self {
            crafter,
            recipe,
            material: context.last_material().cloned(),
            mark: context.mark_option(),
            do_not_color: context.do_not_color(),
        }
    }

    /// Choose a sub-resource material.
    #[must_use]
    pub fn material(mut self, material: impl Into<ItemType>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Set the maker's mark preference.
    #[must_use]
    pub const fn mark(mut self, mark: MarkOption) -> Self {
        self.mark = mark;
        self
    }

    /// Opt out of colour inheritance.
    #[must_use]
    pub const fn do_not_color(mut self, do_not_color: bool) -> Self {
        self.do_not_color = do_not_color;
        self
    }
}

/// Where an attempt is in its lifecycle. Logged at every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptPhase {
    /// Checking recipe, tool, surroundings, and materials.
    Validating,
    /// Rolling the main and secondary skills.
    RollingSuccess,
    /// Every roll passed.
    Success,
    /// At least one roll failed.
    Failure,
    /// Spending materials and tool uses.
    Consuming,
    /// Delivering messages and sounds.
    Reporting,
    /// Done.
    Terminal,
}

/// Units of one material consumed by an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumedResource {
    /// The material.
    pub material: ItemType,
    /// Units removed from the crafter.
    pub quantity: u32,
}

/// The outcome of an attempt that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    /// The recipe attempted.
    pub recipe: RecipeIndex,
    /// Its target item type.
    pub target: ItemType,
    /// The primary material used.
    pub material: ItemType,
    /// Main-skill success chance the attempt was rolled at.
    pub chance: Decimal,
    /// Whether any roll failed.
    pub failed: bool,
    /// Whether the failure destroyed materials. Always false on success.
    pub lost_material: bool,
    /// Whether the tool ran out of uses during this attempt.
    pub tool_broken: bool,
    /// Quality of the crafted item; `None` on failure.
    pub quality: Option<QualityTier>,
    /// Whether the item carries the crafter's mark. Implies exceptional.
    pub makers_mark: bool,
    /// The created item; `None` on failure.
    pub item: Option<ItemId>,
    /// Colour inherited from the material.
    pub hue: Option<Hue>,
    /// Everything removed from the crafter's inventory.
    pub consumed: Vec<ConsumedResource>,
    /// Messages delivered, in order.
    pub messages: Vec<Message>,
    /// Sounds still to be played, for [`EffectTimers`](crate::effects::EffectTimers).
    pub effects: Vec<DelayedEffect>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A material line resolved against the crafter's inventory.
#[derive(Debug)]
struct Requirement {
    material: ItemType,
    quantity: u32,
    held: u32,
    primary: bool,
}

/// Output of a successful validation.
#[derive(Debug)]
struct Plan<'r> {
    recipe: &'r RecipeDefinition,
    skill: Decimal,
    material: ItemType,
    requirements: Vec<Requirement>,
}

/// The item made by a successful attempt.
#[derive(Debug)]
struct Crafted {
    quality: QualityTier,
    makers_mark: bool,
    hue: Option<Hue>,
    item: ItemId,
}

/// Resolves attempts for one discipline.
///
/// Holds only shared references and copied settings, so engines are cheap
/// to create per attempt or to keep around.
#[derive(Debug, Clone)]
pub struct ResolutionEngine<'r> {
    catalog: &'r CraftCatalog,
    policy: &'r dyn CraftSystemPolicy,
    settings: CraftingConfig,
}

impl<'r> ResolutionEngine<'r> {
    /// Bind an engine to a discipline's catalog and policy.
    pub const fn new(catalog: &'r CraftCatalog, policy: &'r dyn CraftSystemPolicy, settings: CraftingConfig) -> Self {
        Self {
            catalog,
            policy,
            settings,
        }
    }

    /// The catalog this engine resolves against.
    pub const fn catalog(&self) -> &'r CraftCatalog {
        self.catalog
    }

    /// The discipline policy.
    pub const fn policy(&self) -> &'r dyn CraftSystemPolicy {
        self.policy
    }

    /// Main-skill success chance for `recipe` at `skill`, as the engine would
    /// roll it.
    pub fn chance_for(&self, recipe: &RecipeDefinition, skill: Decimal) -> Decimal {
        success_chance(
            recipe.skill_window,
            skill,
            self.policy.profile().chance_at_min,
            self.policy.chance_override(recipe),
        )
    }

    /// Resolve one attempt.
    ///
    /// Validation errors are delivered to the crafter through the messenger
    /// before being returned; the inventory, tool, and skills are untouched.
    pub fn attempt<R: Rng + ?Sized>(
        &self,
        request: &AttemptRequest,
        host: &mut HostServices<'_>,
        rng: &mut R,
    ) -> Result<AttemptReport, AttemptError> {
        let result = self.run(request, host, rng);
        if let Err(error) = &result {
            debug!(
                crafter = %request.crafter,
                recipe = %request.recipe,
                error = %error,
                "attempt rejected"
            );
            host.messenger.deliver(request.crafter, &error.message());
        }
        result
    }

    fn run<R: Rng + ?Sized>(
        &self,
        request: &AttemptRequest,
        host: &mut HostServices<'_>,
        rng: &mut R,
    ) -> Result<AttemptReport, AttemptError> {
        let crafter = request.crafter;
        let profile = self.policy.profile();
        self.trace(request, AttemptPhase::Validating);
        let plan = self.validate(request, host)?;
        let recipe = plan.recipe;

        // -- RollingSuccess ------------------------------------------------
        self.trace(request, AttemptPhase::RollingSuccess);
        if let Some(sound) = self.policy.craft_sound() {
            host.effects.play_sound(crafter, sound);
        }
        let chance = self.chance_for(recipe, plan.skill);
        let ramp = self.policy.chance_override(recipe);
        let mut succeeded = roll(rng, chance);
        for requirement in &recipe.secondary_skills {
            let skill = host.skills.skill(crafter, requirement.skill);
            let secondary = success_chance(requirement.window, skill, profile.chance_at_min, ramp);
            // Every roll is drawn even after a miss so the draw count does
            // not depend on earlier outcomes.
            succeeded &= roll(rng, secondary);
        }
        let outcome = if succeeded { GainOutcome::Success } else { GainOutcome::Failure };
        self.trace(
            request,
            if succeeded { AttemptPhase::Success } else { AttemptPhase::Failure },
        );

        // The item is created before anything is spent so a host failure
        // leaves the crafter as they were.
        let crafted = if succeeded {
            Some(self.create_item(request, &plan, host)?)
        } else {
            None
        };
        let quality = crafted.as_ref().map(|c| c.quality);
        let makers_mark = crafted.as_ref().is_some_and(|c| c.makers_mark);
        let hue = crafted.as_ref().and_then(|c| c.hue);
        let item = crafted.map(|c| c.item);
        self.grant_gains(crafter, recipe, outcome, host);

        // -- Consuming -----------------------------------------------------
        self.trace(request, AttemptPhase::Consuming);
        let consumed = if succeeded {
            Self::consume_all(crafter, &plan.requirements, recipe.use_all_resource, host)?
        } else {
            self.consume_failure_losses(crafter, recipe, &plan.requirements, host)?
        };
        let lost_material = !succeeded && !consumed.is_empty();
        let tool_broken = self.wear_tool(host);

        // -- Reporting -----------------------------------------------------
        self.trace(request, AttemptPhase::Reporting);
        let ending = Ending {
            recipe,
            failed: !succeeded,
            lost_material,
            tool_broken,
            quality,
            makers_mark,
        };
        let mut messages = Vec::with_capacity(2);
        if tool_broken {
            messages.push(profile.tool_broken.clone());
        }
        messages.push(self.policy.ending_message(&ending));
        for message in &messages {
            host.messenger.deliver(crafter, message);
        }
        if let Some(sound) = self.policy.ending_sound(&ending) {
            host.effects.play_sound(crafter, sound);
        }
        let effects = self.follow_up_effects(rng);

        self.trace(request, AttemptPhase::Terminal);
        info!(
            crafter = %crafter,
            discipline = %profile.discipline,
            target = %recipe.target,
            chance = %chance,
            failed = !succeeded,
            lost_material,
            tool_broken,
            quality = ?quality,
            "craft attempt resolved"
        );

        Ok(AttemptReport {
            recipe: request.recipe,
            target: recipe.target.clone(),
            material: plan.material,
            chance,
            failed: !succeeded,
            lost_material,
            tool_broken,
            quality,
            makers_mark,
            item,
            hue,
            consumed,
            messages,
            effects,
        })
    }

    fn trace(&self, request: &AttemptRequest, phase: AttemptPhase) {
        debug!(
            crafter = %request.crafter,
            discipline = %self.policy.profile().discipline,
            recipe = %request.recipe,
            phase = ?phase,
            "attempt phase"
        );
    }

    // -- Validating ----------------------------------------------------------

    fn validate(&self, request: &AttemptRequest, host: &HostServices<'_>) -> Result<Plan<'r>, AttemptError> {
        let crafter = request.crafter;
        let recipe = self
            .catalog
            .recipe(request.recipe)
            .ok_or(AttemptError::UnknownRecipe(request.recipe))?;

        self.policy.can_craft(&CraftCheck {
            crafter,
            recipe,
            tool: &*host.tool,
            environment: host.environment,
            skills: &*host.skills,
        })?;

        if recipe
            .recipe_id
            .is_some_and(|recipe_id| !host.environment.knows_recipe(crafter, recipe_id))
        {
            let message = Message::cliloc(RECIPE_NOT_LEARNED);
            return Err(ValidationFailure::new(ValidationKind::PrerequisiteUnmet, message).into());
        }

        if let Some(station) = &recipe.required_station {
            if !host.environment.is_near(crafter, station.station, station.range) {
                return Err(ValidationFailure::new(ValidationKind::AmbientRequirement, station.message.clone()).into());
            }
        }

        let skill = host.skills.skill(crafter, self.policy.profile().main_skill);
        let material = self.choose_material(request, recipe, skill, host)?;

        // Quantities are summed per material so a material listed on two
        // lines is checked against its combined need.
        let mut requirements = Vec::with_capacity(recipe.secondary_resources.len().saturating_add(1));
        let mut needed: BTreeMap<&ItemType, u32> = BTreeMap::new();
        let primary = &recipe.primary_resource;
        let lines = core::iter::once((primary, &material, true)).chain(
            recipe
                .secondary_resources
                .iter()
                .map(|spec| (spec, &spec.material, false)),
        );
        for (spec, line_material, is_primary) in lines {
            let total = needed.entry(line_material).or_insert(0);
            *total = total.saturating_add(spec.quantity);
            let held = host.inventory.quantity(crafter, line_material);
            if held < *total {
                return Err(AttemptError::InsufficientResource {
                    material: line_material.clone(),
                    required: *total,
                    available: held,
                    message: spec.missing_message.clone(),
                });
            }
            requirements.push(Requirement {
                material: line_material.clone(),
                quantity: spec.quantity,
                held,
                primary: is_primary,
            });
        }

        Ok(Plan {
            recipe,
            skill,
            material,
            requirements,
        })
    }

    /// Resolve the primary material, checking family membership, possession,
    /// and skill in that order.
    fn choose_material(
        &self,
        request: &AttemptRequest,
        recipe: &RecipeDefinition,
        skill: Decimal,
        host: &HostServices<'_>,
    ) -> Result<ItemType, AttemptError> {
        let Some(table) = self.catalog.sub_resource_for(recipe) else {
            return Ok(recipe.primary_resource.material.clone());
        };
        let chosen = request.material.clone().unwrap_or_else(|| table.base().clone());

        if !table.contains(&chosen) || host.inventory.quantity(request.crafter, &chosen) == 0 {
            return Err(AttemptError::InsufficientSubResource {
                material: chosen,
                message: table.material_missing_message().clone(),
            });
        }

        match table.check_material(&chosen, skill) {
            Ok(tier) => Ok(tier.material.clone()),
            Err(SubResourceError::InsufficientSkill {
                material,
                required,
                skill,
                message,
            }) => Err(AttemptError::InsufficientSkillForMaterial {
                material,
                required,
                skill,
                message,
            }),
            Err(SubResourceError::NotInFamily(material)) => Err(AttemptError::InsufficientSubResource {
                material,
                message: table.material_missing_message().clone(),
            }),
        }
    }

    // -- Rolling -------------------------------------------------------------

    /// Roll quality and hand the finished item to the inventory.
    fn create_item(
        &self,
        request: &AttemptRequest,
        plan: &Plan<'_>,
        host: &mut HostServices<'_>,
    ) -> Result<Crafted, AttemptError> {
        let crafter = request.crafter;
        let quality = host.quality.roll_quality(crafter, plan.recipe, plan.skill);
        let makers_mark = self.policy.profile().can_mark
            && request.mark == MarkOption::Mark
            && quality == QualityTier::Exceptional;
        let hue = if !request.do_not_color && self.policy.retains_color_from(plan.recipe, &plan.material) {
            self.catalog.hue_of(&plan.material)
        } else {
            None
        };
        let spec = CraftedItemSpec {
            crafter,
            target: plan.recipe.target.clone(),
            quality,
            maker: makers_mark.then_some(crafter),
            hue,
            material: plan.material.clone(),
        };
        let item = host.inventory.create_item(&spec)?;
        Ok(Crafted {
            quality,
            makers_mark,
            hue,
            item,
        })
    }

    fn grant_gains(&self, crafter: CrafterId, recipe: &RecipeDefinition, outcome: GainOutcome, host: &mut HostServices<'_>) {
        let main = self.policy.profile().main_skill;
        host.skills.grant_skill_gain(crafter, main, outcome);
        for requirement in recipe.secondary_skills.iter().filter(|r| r.skill != main) {
            host.skills.grant_skill_gain(crafter, requirement.skill, outcome);
        }
    }

    // -- Consuming -----------------------------------------------------------

    fn consume_all(
        crafter: CrafterId,
        requirements: &[Requirement],
        use_all: bool,
        host: &mut HostServices<'_>,
    ) -> Result<Vec<ConsumedResource>, AttemptError> {
        let mut consumed = Vec::with_capacity(requirements.len());
        for requirement in requirements {
            let amount = if use_all && requirement.primary {
                // The whole stack, less whatever other lines still need of
                // the same material.
                let reserved: u32 = requirements
                    .iter()
                    .filter(|other| !other.primary && other.material == requirement.material)
                    .fold(0_u32, |sum, other| sum.saturating_add(other.quantity));
                requirement.held.saturating_sub(reserved).max(requirement.quantity)
            } else {
                requirement.quantity
            };
            host.inventory.consume(crafter, &requirement.material, amount)?;
            consumed.push(ConsumedResource {
                material: requirement.material.clone(),
                quantity: amount,
            });
        }
        Ok(consumed)
    }

    fn consume_failure_losses(
        &self,
        crafter: CrafterId,
        recipe: &RecipeDefinition,
        requirements: &[Requirement],
        host: &mut HostServices<'_>,
    ) -> Result<Vec<ConsumedResource>, AttemptError> {
        let mut consumed = Vec::new();
        for requirement in requirements {
            if !self.policy.consume_on_failure(crafter, &requirement.material, recipe) {
                continue;
            }
            let amount = failure_loss(requirement.quantity, self.settings.failure_loss_pct);
            if amount == 0 {
                continue;
            }
            host.inventory.consume(crafter, &requirement.material, amount)?;
            consumed.push(ConsumedResource {
                material: requirement.material.clone(),
                quantity: amount,
            });
        }
        Ok(consumed)
    }

    /// Spend tool uses; true when the tool has none left afterwards.
    fn wear_tool(&self, host: &mut HostServices<'_>) -> bool {
        for _ in 0..self.settings.tool_wear_per_attempt {
            if host.tool.uses_remaining() == 0 {
                break;
            }
            host.tool.decrement_uses();
        }
        host.tool.uses_remaining() == 0
    }

    // -- Reporting -----------------------------------------------------------

    /// Craft sound repetitions after the first, then the policy's follow-up.
    fn follow_up_effects<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<DelayedEffect> {
        let profile = self.policy.profile();
        let mut effects = Vec::new();
        if let Some(sound) = self.policy.craft_sound() {
            let low = profile.min_effect_count.min(profile.max_effect_count);
            let high = profile.max_effect_count.max(low);
            let count = rng.random_range(low..=high);
            for repetition in 1..count {
                if let Some(delay) = profile.effect_delay.checked_mul(repetition) {
                    effects.push(DelayedEffect::new(delay, sound));
                }
            }
        }
        if let Some(follow_up) = self.policy.delayed_sound() {
            effects.push(follow_up);
        }
        effects
    }
}

/// Units of a `quantity`-unit line destroyed by a failed attempt at
/// `loss_pct` percent: rounded up, at least one, never more than the line.
/// A zero percentage loses nothing.
pub fn failure_loss(quantity: u32, loss_pct: u32) -> u32 {
    if loss_pct == 0 {
        return 0;
    }
    let pct = u64::from(loss_pct.min(100));
    let scaled = u64::from(quantity).saturating_mul(pct).saturating_add(99) / 100;
    let rounded = u32::try_from(scaled).unwrap_or(quantity);
    rounded.max(1).min(quantity)
}
