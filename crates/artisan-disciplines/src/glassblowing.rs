//! Glassblowing: bottles, flasks, and hourglasses blown from sand.
//!
//! An Alchemy discipline. Only crafters who have learned the craft and
//! reached 100 Alchemy may blow glass, and only beside a forge.

use std::time::Duration;

use artisan_engine::policy::check_tool;
use artisan_engine::{
    CatalogError, CraftCatalog, CraftCheck, CraftSystemPolicy, DelayedEffect, Discipline, DisciplineProfile, Ending,
    RegistryError, ValidationFailure, ValidationKind,
};
use artisan_types::{DisciplineId, Lore, Message, SkillName, SoundId, Station};
use rust_decimal::Decimal;

use crate::content::{Material, Row, add_rows, row};

/// "Glassblowing Menu"
const GUMP_TITLE: u32 = 1_044_622;
/// "You havent learned glassblowing."
const NOT_LEARNED: u32 = 1_044_634;
/// "You must be near a forge to blow glass."
const NEED_FORGE: u32 = 1_044_628;
/// Tiles within which the forge must stand.
const FORGE_RANGE: u32 = 2;

const BELLOWS: SoundId = SoundId(0x2B);
const ANVIL_HIT: SoundId = SoundId(0x2A);
const GLASS_BREAKING: SoundId = SoundId(0x41);
const ANVIL_HIT_DELAY: Duration = Duration::from_millis(700);

/// Alchemy needed before the craft can be practised at all.
pub const REQUIRED_ALCHEMY: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Glassblowing rules.
#[derive(Debug, Clone)]
pub struct GlassblowingPolicy {
    profile: DisciplineProfile,
}

impl GlassblowingPolicy {
    /// The standard Glassblowing profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Glassblowing, SkillName::Alchemy, Message::cliloc(GUMP_TITLE)),
        }
    }
}

impl Default for GlassblowingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for GlassblowingPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn can_craft(&self, check: &CraftCheck<'_>) -> Result<(), ValidationFailure> {
        check_tool(check, &self.profile)?;
        let learned = check.environment.has_learned(check.crafter, Lore::Glassblowing)
            && check.skills.skill(check.crafter, SkillName::Alchemy) >= REQUIRED_ALCHEMY;
        if !learned {
            return Err(ValidationFailure::new(
                ValidationKind::PrerequisiteUnmet,
                Message::cliloc(NOT_LEARNED),
            ));
        }
        if !check.environment.is_near(check.crafter, Station::Forge, FORGE_RANGE) {
            return Err(ValidationFailure::new(
                ValidationKind::AmbientRequirement,
                Message::cliloc(NEED_FORGE),
            ));
        }
        Ok(())
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(BELLOWS)
    }

    fn delayed_sound(&self) -> Option<DelayedEffect> {
        Some(DelayedEffect::new(ANVIL_HIT_DELAY, ANVIL_HIT))
    }

    fn ending_sound(&self, ending: &Ending<'_>) -> Option<SoundId> {
        (!ending.failed).then_some(GLASS_BREAKING)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Blown from a whole handful of sand.
const BASIC: [Row; 2] = [
    row("Bottle", "Empty Bottle", 525, 1025, 1),
    row("Jar", "Empty Jar", 525, 1025, 1),
];

const GLASSWARE: [Row; 14] = [
    row("Monocle", "Monocle", 50, 550, 1),
    row("SmallFlask", "Small Flask", 525, 1025, 2),
    row("MediumFlask", "Medium Flask", 525, 1025, 3),
    row("CurvedFlask", "Curved Flask", 550, 1050, 2),
    row("LongFlask", "Long Flask", 575, 1075, 4),
    row("LargeFlask", "Large Flask", 600, 1100, 5),
    row("AniSmallBlueFlask", "Small Bubbling Blue Flask", 600, 1100, 5),
    row("AniLargeVioletFlask", "Large Bubbling Violet Flask", 600, 1100, 5),
    row("Jug", "Jug", 600, 1100, 5),
    row("BeverageBottle", "Beverage Bottle", 600, 1100, 5),
    row("AniRedRibbedFlask", "Red Ribbed Flask", 600, 1100, 7),
    row("EmptyVialsWRack", "Empty Vials With Rack", 650, 1150, 8),
    row("FullVialsWRack", "Full Vials With Rack", 650, 1150, 9),
    row("SpinningHourglass", "Spinning Hourglass", 750, 1250, 10),
];

/// Build the Glassblowing catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Glassblowing);
    let category = Message::cliloc(1_044_050);
    let sand = Material::new("Sand", Message::cliloc(1_044_625), Message::cliloc(1_044_627));

    for basic in &BASIC {
        catalog
            .add_recipe(basic.definition(&category, &sand)?)?
            .use_all_resource()
            .finish();
    }
    add_rows(&mut catalog, &category, &sand, &GLASSWARE)?;
    Ok(catalog)
}

/// The Glassblowing catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(GlassblowingPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_engine::RecipeDefinition;
    use artisan_engine::memory::{InMemorySkills, SimpleTool, StaticEnvironment};
    use artisan_types::{CrafterId, ItemType, QualityTier};
    use rust_decimal_macros::dec;

    use super::*;

    fn bottle() -> RecipeDefinition {
        let catalog = init_craft_list().unwrap();
        catalog.find(&ItemType::new("Bottle")).unwrap().1.clone()
    }

    fn check(environment: &StaticEnvironment, alchemy: Decimal) -> Result<(), ValidationFailure> {
        let crafter = CrafterId::new();
        let recipe = bottle();
        let tool = SimpleTool::new(crafter, 50);
        let mut skills = InMemorySkills::new(Decimal::ZERO, dec!(120));
        skills.set(crafter, SkillName::Alchemy, alchemy);
        GlassblowingPolicy::new().can_craft(&CraftCheck {
            crafter,
            recipe: &recipe,
            tool: &tool,
            environment,
            skills: &skills,
        })
    }

    #[test]
    fn lore_and_alchemy_come_before_the_forge() {
        let mut untrained = StaticEnvironment::default();
        untrained.add_station(Station::Forge);
        let failure = check(&untrained, dec!(100)).unwrap_err();
        assert_eq!(failure.kind, ValidationKind::PrerequisiteUnmet);

        let mut trained = StaticEnvironment::default().with_lore(Lore::Glassblowing);
        assert_eq!(
            check(&trained, dec!(99.9)).unwrap_err().message,
            Message::cliloc(NOT_LEARNED)
        );

        let failure = check(&trained, dec!(100)).unwrap_err();
        assert_eq!(failure.kind, ValidationKind::AmbientRequirement);
        assert_eq!(failure.message, Message::cliloc(NEED_FORGE));

        trained.add_station_at(Station::Forge, FORGE_RANGE);
        assert!(check(&trained, dec!(100)).is_ok());
    }

    #[test]
    fn glass_breaks_only_on_success() {
        let policy = GlassblowingPolicy::new();
        let recipe = bottle();
        let success = Ending {
            recipe: &recipe,
            failed: false,
            lost_material: false,
            tool_broken: false,
            quality: Some(QualityTier::Normal),
            makers_mark: false,
        };
        let failure = Ending { failed: true, quality: None, ..success };
        assert_eq!(policy.ending_sound(&success), Some(GLASS_BREAKING));
        assert_eq!(policy.ending_sound(&failure), None);
        assert_eq!(policy.delayed_sound(), Some(DelayedEffect::new(ANVIL_HIT_DELAY, ANVIL_HIT)));
    }

    #[test]
    fn bottles_and_jars_take_the_whole_stack() {
        let catalog = init_craft_list().unwrap();
        let flags: Vec<(&str, bool)> = catalog
            .iter()
            .take(3)
            .map(|(_, recipe)| (recipe.target.as_str(), recipe.use_all_resource))
            .collect();
        assert_eq!(flags, vec![("Bottle", true), ("Jar", true), ("Monocle", false)]);
    }
}
