//! Blacksmithy: armour, shields, and weapons hammered from ingots.
//!
//! Every recipe draws on the smithing ingot family and shows its metal, so
//! coloured ingots always tint the result. The smith must stand within two
//! tiles of both an anvil and a forge.

use artisan_engine::policy::check_tool;
use artisan_engine::{
    CatalogError, CraftCatalog, CraftCheck, CraftSystemPolicy, Discipline, DisciplineProfile, RecipeDefinition,
    RegistryError, ValidationFailure, ValidationKind,
};
use artisan_types::{DisciplineId, ItemType, Message, SkillName, SoundId, Station};

use crate::content::{Material, Row, add_rows, row};
use crate::metals::{self, Metal};

/// "Blacksmithing Menu"
const GUMP_TITLE: u32 = 1_044_002;
/// "You must be near an anvil and a forge to smith items."
const NEED_ANVIL_AND_FORGE: u32 = 1_044_267;
const CRAFT_SOUND: SoundId = SoundId(0x541);
/// Tiles within which the anvil and forge must stand.
pub const STATION_RANGE: u32 = 2;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Blacksmithy rules.
#[derive(Debug, Clone)]
pub struct BlacksmithyPolicy {
    profile: DisciplineProfile,
}

impl BlacksmithyPolicy {
    /// The standard Blacksmithy profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(
                DisciplineId::Blacksmithy,
                SkillName::Blacksmithy,
                Message::cliloc(GUMP_TITLE),
            )
            .can_mark(true),
        }
    }
}

impl Default for BlacksmithyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for BlacksmithyPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn can_craft(&self, check: &CraftCheck<'_>) -> Result<(), ValidationFailure> {
        check_tool(check, &self.profile)?;
        let near = |station| check.environment.is_near(check.crafter, station, STATION_RANGE);
        if near(Station::Anvil) && near(Station::Forge) {
            Ok(())
        } else {
            Err(ValidationFailure::new(
                ValidationKind::AmbientRequirement,
                Message::cliloc(NEED_ANVIL_AND_FORGE),
            ))
        }
    }

    fn retains_color_from(&self, _recipe: &RecipeDefinition, material: &ItemType) -> bool {
        Metal::from_ingot(material).is_some()
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(CRAFT_SOUND)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const RINGMAIL: [Row; 2] = [
    row("RingmailGloves", "Ringmail Gloves", 320, 620, 8),
    row("RingmailChest", "Ringmail Tunic", 449, 749, 14),
];

const CHAINMAIL: [Row; 2] = [
    row("ChainCoif", "Chainmail Coif", 345, 645, 10),
    row("ChainChest", "Chainmail Tunic", 491, 891, 16),
];

const PLATEMAIL: [Row; 2] = [
    row("PlateGloves", "Platemail Gloves", 589, 1089, 12),
    row("PlateChest", "Platemail Tunic", 750, 1250, 25),
];

const HELMETS: [Row; 3] = [
    row("Bascinet", "Bascinet", 283, 583, 11),
    row("Helmet", "Helmet", 379, 879, 12),
    row("PlateHelm", "Plate Helm", 626, 1126, 16),
];

const SHIELDS: [Row; 3] = [
    row("Buckler", "Buckler", 0, 450, 10),
    row("MetalShield", "Metal Shield", 152, 498, 12),
    row("HeaterShield", "Heater Shield", 653, 893, 18),
];

const BLADED: [Row; 5] = [
    row("Dagger", "Dagger", 0, 496, 3),
    row("Cutlass", "Cutlass", 243, 643, 8),
    row("Katana", "Katana", 421, 901, 9),
    row("Broadsword", "Broadsword", 554, 954, 11),
    row("Longsword", "Longsword", 590, 880, 14),
];

const AXES: [Row; 2] = [
    row("Axe", "Axe", 352, 742, 12),
    row("BattleAxe", "Battle Axe", 305, 705, 11),
];

const POLEARMS: [Row; 1] = [row("Spear", "Spear", 550, 900, 12)];

const BASHING: [Row; 2] = [
    row("Mace", "Mace", 145, 645, 8),
    row("WarHammer", "War Hammer", 342, 842, 13),
];

/// Build the Blacksmithy catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Blacksmithy);
    let ingots = Material::new(metals::IRON_INGOT, Message::cliloc(1_044_036), Message::cliloc(1_044_037));

    let groups: [(u32, &[Row]); 9] = [
        (1_011_076, &RINGMAIL),
        (1_011_077, &CHAINMAIL),
        (1_011_078, &PLATEMAIL),
        (1_011_079, &HELMETS),
        (1_011_080, &SHIELDS),
        (1_011_081, &BLADED),
        (1_011_082, &AXES),
        (1_011_083, &POLEARMS),
        (1_011_084, &BASHING),
    ];
    for (category, rows) in groups {
        add_rows(&mut catalog, &Message::cliloc(category), &ingots, rows)?;
    }

    catalog.add_sub_resource_table(metals::smithing_ingots()?)?;
    Ok(catalog)
}

/// The Blacksmithy catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(BlacksmithyPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_engine::memory::{InMemorySkills, SimpleTool, StaticEnvironment};
    use artisan_types::CrafterId;
    use rust_decimal::Decimal;

    use super::*;

    fn check(environment: &StaticEnvironment) -> Result<(), ValidationFailure> {
        let crafter = CrafterId::new();
        let catalog = init_craft_list().unwrap();
        let (_, dagger) = catalog.find(&ItemType::new("Dagger")).unwrap();
        let tool = SimpleTool::new(crafter, 50);
        let skills = InMemorySkills::new(Decimal::ZERO, Decimal::ONE_HUNDRED);
        BlacksmithyPolicy::new().can_craft(&CraftCheck {
            crafter,
            recipe: dagger,
            tool: &tool,
            environment,
            skills: &skills,
        })
    }

    #[test]
    fn needs_anvil_and_forge_in_range() {
        let mut forge_only = StaticEnvironment::default();
        forge_only.add_station(Station::Forge);
        let failure = check(&forge_only).unwrap_err();
        assert_eq!(failure.kind, ValidationKind::AmbientRequirement);
        assert_eq!(failure.message, Message::cliloc(NEED_ANVIL_AND_FORGE));

        let mut far = StaticEnvironment::default();
        far.add_station(Station::Forge);
        far.add_station_at(Station::Anvil, 3);
        assert!(check(&far).is_err());

        let mut smithy = StaticEnvironment::default();
        smithy.add_station(Station::Forge);
        smithy.add_station_at(Station::Anvil, STATION_RANGE);
        assert!(check(&smithy).is_ok());
    }

    #[test]
    fn every_item_shows_its_metal() {
        let policy = BlacksmithyPolicy::new();
        let catalog = init_craft_list().unwrap();
        let (_, spear) = catalog.find(&ItemType::new("Spear")).unwrap();
        assert!(policy.retains_color_from(spear, &Metal::Valorite.ingot()));
        assert!(!policy.retains_color_from(spear, &ItemType::new("Log")));
        assert_eq!(catalog.len(), 22);
    }
}
