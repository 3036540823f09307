//! Masonry: furniture, vases, and statues carved from granite.
//!
//! A Carpentry discipline open only to crafters who have learned
//! stonecraft. Coloured granite always tints the carving.

use std::time::Duration;

use artisan_engine::{
    CatalogError, CraftCatalog, CraftCheck, CraftSystemPolicy, DelayedEffect, Discipline, DisciplineProfile,
    RecipeDefinition, RegistryError, ValidationFailure, ValidationKind,
};
use artisan_types::{DisciplineId, ItemType, Lore, Message, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::content::{Material, Row, add_rows, row};
use crate::metals;

/// "Masonry Menu"
const GUMP_TITLE: u32 = 1_044_500;
/// "You havent learned stonecraft."
const NOT_LEARNED: u32 = 1_044_633;
/// "Granite"
const GRANITE_NAME: u32 = 1_044_514;
/// "You do not have enough granite to make that."
const NO_GRANITE: u32 = 1_044_513;

const STONEWORKING: SoundId = SoundId(0x65A);
const ANVIL_HIT: SoundId = SoundId(0x23D);
const ANVIL_HIT_DELAY: Duration = Duration::from_millis(700);

/// Carpentry needed before stone can be worked at all.
pub const REQUIRED_CARPENTRY: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Masonry rules.
#[derive(Debug, Clone)]
pub struct MasonryPolicy {
    profile: DisciplineProfile,
}

impl MasonryPolicy {
    /// The standard Masonry profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Masonry, SkillName::Carpentry, Message::cliloc(GUMP_TITLE)),
        }
    }
}

impl Default for MasonryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for MasonryPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    /// A worn tool is reported first, then missing stonecraft, and only then
    /// a tool left out of reach.
    fn can_craft(&self, check: &CraftCheck<'_>) -> Result<(), ValidationFailure> {
        if check.tool.is_deleted() || check.tool.uses_remaining() == 0 {
            return Err(ValidationFailure::new(
                ValidationKind::ToolWornOut,
                self.profile.tool_broken.clone(),
            ));
        }
        let learned = check.environment.has_learned(check.crafter, Lore::Masonry)
            && check.skills.skill(check.crafter, SkillName::Carpentry) >= REQUIRED_CARPENTRY;
        if !learned {
            return Err(ValidationFailure::new(
                ValidationKind::PrerequisiteUnmet,
                Message::cliloc(NOT_LEARNED),
            ));
        }
        if !check.tool.is_on_person(check.crafter) {
            return Err(ValidationFailure::new(
                ValidationKind::ToolNotOnPerson,
                self.profile.tool_not_on_person.clone(),
            ));
        }
        Ok(())
    }

    fn retains_color_from(&self, _recipe: &RecipeDefinition, _material: &ItemType) -> bool {
        true
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(STONEWORKING)
    }

    fn delayed_sound(&self) -> Option<DelayedEffect> {
        Some(DelayedEffect::new(ANVIL_HIT_DELAY, ANVIL_HIT))
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const CONTAINERS: [Row; 4] = [
    row("RockUrn", "urn", 800, 1050, 5),
    row("RockVase", "vase", 800, 1050, 5),
    row("StoneOrnateUrn", "urn, ornate", 900, 1100, 6),
    row("StoneOrnateTallVase", "vase, ornate tall", 950, 1200, 8),
];

const DECORATIONS: [Row; 9] = [
    row("StoneVase", "vase", 425, 925, 2),
    row("StoneLargeVase", "vase, large", 525, 1025, 4),
    row("StoneAmphora", "amphora", 425, 925, 2),
    row("StoneLargeAmphora", "amphora, large", 525, 1025, 4),
    row("StoneOrnateVase", "vase, ornate", 525, 1025, 4),
    row("StoneGargoyleVase", "vase, gargoyle", 625, 1125, 6),
    row("StoneMingSculpture", "sculpture, Ming", 525, 1225, 6),
    row("StoneMingUrn", "urn, Ming", 425, 925, 3),
    row("StoneQinUrn", "urn, Qin", 425, 925, 3),
];

const FURNITURE: [Row; 10] = [
    row("StoneChairs", "stone chair", 550, 1050, 4),
    row("StoneBenchLong", "bench, long", 550, 1050, 8),
    row("StoneBenchShort", "bench, short", 550, 1050, 5),
    row("StoneTableLong", "table, long", 650, 1150, 12),
    row("StoneTableShort", "table, short", 650, 1150, 10),
    row("StoneWizardTable", "table, wizard", 950, 1250, 15),
    row("StoneSteps", "steps", 550, 1050, 5),
    row("StoneColumn", "column", 650, 1250, 10),
    row("StoneGothicColumn", "column, gothic", 850, 1350, 20),
    row("StonePedestal", "pedestal", 650, 1250, 5),
];

const SMALL_STATUES: [Row; 4] = [
    row("SmallStatueAngel", "angel statue", 550, 1050, 4),
    row("SmallStatueDragon", "dragon statue", 550, 1050, 4),
    row("StatueGargoyleBust", "gargoyle bust", 600, 1100, 6),
    row("SmallStatuePegasus", "pegasus statue", 550, 1050, 4),
];

const MEDIUM_STATUES: [Row; 4] = [
    row("StatueDruid", "druid statue", 650, 1150, 8),
    row("StatueGryphon", "gryphon statue", 650, 1150, 8),
    row("MedusaStatue", "medusa statue", 650, 1150, 8),
    row("SphinxStatue", "sphinx statue", 650, 1150, 8),
];

const LARGE_STATUES: [Row; 3] = [
    row("StatueDwarf", "dwarf statue", 750, 1250, 16),
    row("MediumStatueLion", "lion statue", 750, 1250, 16),
    row("LargePegasusStatue", "pegasus statue", 750, 1250, 16),
];

const HUGE_STATUES: [Row; 2] = [
    row("StatueAngelTall", "angel statue", 850, 1250, 24),
    row("LargeStatueWolf", "wolf statue", 850, 1250, 24),
];

const GIANT_STATUES: [Row; 2] = [
    row("StatueGateGuardian", "gate guardian statue", 950, 1350, 32),
    row("StatueGuardian", "guardian statue", 950, 1350, 32),
];

const TOMBSTONES: [Row; 3] = [
    row("StoneTombStoneA", "tombstone", 450, 950, 3),
    row("StoneTombStoneB", "tombstone", 450, 950, 3),
    row("StoneTombStoneC", "tombstone", 450, 950, 3),
];

/// Build the Masonry catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Masonry);
    let granite = Material::new(metals::GRANITE, Message::cliloc(GRANITE_NAME), Message::cliloc(NO_GRANITE));

    let groups: [(&str, &[Row]); 9] = [
        ("Containers", &CONTAINERS),
        ("Decorations", &DECORATIONS),
        ("Furniture", &FURNITURE),
        ("Small Statues", &SMALL_STATUES),
        ("Medium Statues", &MEDIUM_STATUES),
        ("Large Statues", &LARGE_STATUES),
        ("Huge Statues", &HUGE_STATUES),
        ("Giant Statues", &GIANT_STATUES),
        ("Tombstones", &TOMBSTONES),
    ];
    for (category, rows) in groups {
        add_rows(&mut catalog, &Message::text(category), &granite, rows)?;
    }

    catalog.add_sub_resource_table(metals::granite()?)?;
    Ok(catalog)
}

/// The Masonry catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(MasonryPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_engine::memory::{InMemorySkills, SimpleTool, StaticEnvironment};
    use artisan_types::CrafterId;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::metals::Metal;

    fn check(tool: &SimpleTool, crafter: CrafterId, lore: bool) -> Result<(), ValidationFailure> {
        let catalog = init_craft_list().unwrap();
        let (_, vase) = catalog.find(&ItemType::new("StoneVase")).unwrap();
        let environment = if lore {
            StaticEnvironment::default().with_lore(Lore::Masonry)
        } else {
            StaticEnvironment::default()
        };
        let mut skills = InMemorySkills::new(Decimal::ZERO, dec!(120));
        skills.set(crafter, SkillName::Carpentry, dec!(100));
        MasonryPolicy::new().can_craft(&CraftCheck {
            crafter,
            recipe: vase,
            tool,
            environment: &environment,
            skills: &skills,
        })
    }

    #[test]
    fn stonecraft_is_checked_before_tool_possession() {
        let crafter = CrafterId::new();
        let mut tool = SimpleTool::new(crafter, 10);
        tool.set_on_person(false);

        let failure = check(&tool, crafter, false).unwrap_err();
        assert_eq!(failure.kind, ValidationKind::PrerequisiteUnmet);
        assert_eq!(failure.message, Message::cliloc(NOT_LEARNED));

        let failure = check(&tool, crafter, true).unwrap_err();
        assert_eq!(failure.kind, ValidationKind::ToolNotOnPerson);

        tool.set_on_person(true);
        assert!(check(&tool, crafter, true).is_ok());

        let worn = SimpleTool::new(crafter, 0);
        assert_eq!(check(&worn, crafter, false).unwrap_err().kind, ValidationKind::ToolWornOut);
    }

    #[test]
    fn carvings_draw_on_the_granite_family() {
        let catalog = init_craft_list().unwrap();
        let (_, column) = catalog.find(&ItemType::new("StoneGothicColumn")).unwrap();
        let family = catalog.sub_resource_for(column).unwrap();
        assert!(family.contains(&Metal::Verite.granite()));
        assert_eq!(catalog.hue_of(&Metal::Verite.granite()), Metal::Verite.hue());
        assert!(MasonryPolicy::new().retains_color_from(column, &Metal::Verite.granite()));
    }
}
