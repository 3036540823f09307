//! Tinkering: tools, parts, utensils, and clockwork assemblies.
//!
//! Metal recipes draw on the Tinkering ingot family. Assemblies join parts
//! made earlier and have a zero-width window, so they never fail. Potion
//! kegs and Eternal Keys roll on their own ramps rather than the
//! discipline's.

use artisan_engine::{
    CatalogError, ChanceOverride, CraftCatalog, CraftSystemPolicy, Discipline, DisciplineProfile, RecipeDefinition,
    RegistryError,
};
use artisan_types::{DisciplineId, ItemType, Message, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::content::{Material, Mixture, Row, add_mixtures, add_rows, mixture, row, window};
use crate::metals::{self, Metal};

/// "Tinkering Menu"
const GUMP_TITLE: u32 = 1_044_007;
/// "You don't have the components needed to make that."
const NO_COMPONENTS: u32 = 1_044_253;
const CRAFT_SOUND: SoundId = SoundId(0x542);

/// Kegs and trap-removal kits ramp from an even chance.
const KEG_RAMP: ChanceOverride = ChanceOverride::new(Decimal::from_parts(5, 0, 0, false, 1), Decimal::ONE);
/// The Eternal Key never rises above 35%.
const ETERNAL_KEY_RAMP: ChanceOverride =
    ChanceOverride::new(Decimal::from_parts(20, 0, 0, false, 2), Decimal::from_parts(35, 0, 0, false, 2));

/// Shapes that take the colour of the ingots they are made from.
const METAL_SHOWING: [&str; 17] = [
    "ForkLeft",
    "ForkRight",
    "SpoonLeft",
    "SpoonRight",
    "KnifeLeft",
    "KnifeRight",
    "Plate",
    "Goblet",
    "PewterMug",
    "KeyRing",
    "Candelabra",
    "Scales",
    "Key",
    "Globe",
    "Spyglass",
    "Lantern",
    "HeatingStand",
];

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tinkering rules.
#[derive(Debug, Clone)]
pub struct TinkeringPolicy {
    profile: DisciplineProfile,
}

impl TinkeringPolicy {
    /// The standard Tinkering profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Tinkering, SkillName::Tinkering, Message::cliloc(GUMP_TITLE))
                .can_mark(true),
        }
    }
}

impl Default for TinkeringPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for TinkeringPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn chance_override(&self, recipe: &RecipeDefinition) -> Option<ChanceOverride> {
        match recipe.target.as_str() {
            "PotionKeg" | "FactionTrapRemovalKit" => Some(KEG_RAMP),
            "EternalKey" => Some(ETERNAL_KEY_RAMP),
            _ => None,
        }
    }

    fn retains_color_from(&self, recipe: &RecipeDefinition, material: &ItemType) -> bool {
        Metal::from_ingot(material).is_some() && METAL_SHOWING.contains(&recipe.target.as_str())
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(CRAFT_SOUND)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const WOODEN_ITEMS: [Row; 2] = [
    row("ClockFrame", "Clock Frame", 0, 500, 6),
    row("Axle", "Axle", -250, 250, 2),
];

const TOOLS: [Row; 5] = [
    row("Scissors", "Scissors", 50, 550, 2),
    row("Hammer", "Tinker's Hammer", 300, 800, 1),
    row("Tongs", "Tongs", 350, 850, 1),
    row("Lockpick", "Lockpick", 450, 950, 1),
    row("Skillet", "Skillet", 300, 800, 4),
];

const PARTS: [Row; 6] = [
    row("Gears", "Gears", 50, 550, 2),
    row("BarrelTap", "Barrel Tap", 350, 850, 2),
    row("Springs", "Springs", 50, 550, 2),
    row("Hinge", "Hinge", 50, 550, 2),
    row("BarrelHoops", "Barrel Hoops", -150, 350, 5),
    row("BolaBall", "Bola Ball", 450, 950, 10),
];

const UTENSILS: [Row; 9] = [
    row("SpoonLeft", "Spoon (left)", 0, 500, 1),
    row("SpoonRight", "Spoon (right)", 0, 500, 1),
    row("Plate", "Plate", 0, 500, 2),
    row("ForkLeft", "Fork (left)", 0, 500, 1),
    row("ForkRight", "Fork (right)", 0, 500, 1),
    row("KnifeLeft", "Knife (left)", 0, 500, 1),
    row("KnifeRight", "Knife (right)", 0, 500, 1),
    row("Goblet", "Goblet", 100, 600, 2),
    row("PewterMug", "Pewter Mug", 100, 600, 2),
];

const MISC: [Row; 7] = [
    row("KeyRing", "Key Ring", 100, 600, 2),
    row("Key", "Iron Key", 200, 700, 3),
    row("Scales", "Scales", 600, 1100, 4),
    row("Globe", "Globe", 550, 1050, 4),
    row("Spyglass", "Spyglass", 600, 1100, 4),
    row("Lantern", "Lantern", 300, 800, 2),
    row("HeatingStand", "Heating Stand", 600, 1100, 4),
];

const LIGHTING: [(Row, u32); 2] = [
    (row("Candelabra", "Candelabra", 550, 1950, 4), 3),
    (row("CandelabraStand", "Candelabra Stand", 650, 1050, 8), 3),
];

const ASSEMBLIES: [Mixture; 8] = [
    mixture("AxleGears", "Axle With Gears", 0, 0, &[("Axle", 1), ("Gears", 1)]),
    mixture("ClockParts", "Clock Parts", 0, 0, &[("AxleGears", 1), ("Springs", 1)]),
    mixture("SextantParts", "Sextant Parts", 0, 0, &[("AxleGears", 1), ("Hinge", 1)]),
    mixture("ClockRight", "Clock (right)", 0, 0, &[("ClockFrame", 1), ("ClockParts", 1)]),
    mixture("ClockLeft", "Clock (left)", 0, 0, &[("ClockFrame", 1), ("ClockParts", 1)]),
    mixture("Sextant", "Sextant", 0, 0, &[("SextantParts", 1)]),
    mixture("Bola", "Bola", 600, 800, &[("BolaBall", 4), ("Leather", 3)]),
    mixture(
        "PotionKeg",
        "Potion Keg",
        750,
        1000,
        &[("Keg", 1), ("Bottle", 10), ("BarrelLid", 1), ("BarrelTap", 1)],
    ),
];

/// Build the Tinkering catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Tinkering);
    let logs = Material::new("Log", Message::cliloc(1_044_041), Message::cliloc(1_044_351));
    let ingots = Material::new(metals::IRON_INGOT, Message::cliloc(1_044_036), Message::cliloc(1_044_037));

    add_rows(&mut catalog, &Message::cliloc(1_044_042), &logs, &WOODEN_ITEMS)?;
    add_rows(&mut catalog, &Message::cliloc(1_044_046), &ingots, &TOOLS)?;
    add_rows(&mut catalog, &Message::cliloc(1_044_047), &ingots, &PARTS)?;
    add_rows(&mut catalog, &Message::cliloc(1_044_048), &ingots, &UTENSILS)?;

    let misc = Message::cliloc(1_044_050);
    add_rows(&mut catalog, &misc, &ingots, &MISC)?;
    let beeswax = Material::new("Beeswax", "Beeswax", "You do not have enough beeswax.");
    for (candle, wax) in &LIGHTING {
        catalog
            .add_recipe(candle.definition(&misc, &ingots)?)?
            .add_secondary_resource(beeswax.spec(*wax)?)
            .finish();
    }
    add_eternal_key(&mut catalog, &misc)?;

    add_mixtures(
        &mut catalog,
        &Message::cliloc(1_044_051),
        &Message::cliloc(NO_COMPONENTS),
        None,
        &ASSEMBLIES,
    )?;

    catalog.add_sub_resource_table(metals::tinkering_ingots()?)?;
    Ok(catalog)
}

/// Platinum and gold bound with an arcane gem; Magery is rolled alongside
/// Tinkering.
fn add_eternal_key(catalog: &mut CraftCatalog, category: &Message) -> Result<(), CatalogError> {
    let platinum = Material::new("PlatinumIngot", "Platinum Ingots", Message::cliloc(1_044_037));
    let gold = Material::new("GoldIngot", "Gold Ingots", Message::cliloc(1_044_037));
    let gem = Material::new("ArcaneGem", "Arcane Gem", Message::cliloc(NO_COMPONENTS));
    let definition = RecipeDefinition::new("EternalKey", category.clone(), "Eternal Key", window(900, 1200)?, platinum.spec(10)?);
    catalog
        .add_recipe(definition)?
        .add_secondary_resource(gold.spec(4)?)
        .add_secondary_resource(gem.spec(1)?)
        .add_secondary_skill(SkillName::Magery, window(900, 1200)?)
        .finish();
    Ok(())
}

/// The Tinkering catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(TinkeringPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn recipe(target: &str) -> RecipeDefinition {
        let catalog = init_craft_list().unwrap();
        catalog.find(&ItemType::new(target)).unwrap().1.clone()
    }

    #[test]
    fn catalog_builds_with_unique_targets() {
        let catalog = init_craft_list().unwrap();
        assert_eq!(catalog.len(), 40);
        assert!(catalog.sub_resource(&ItemType::new(metals::IRON_INGOT)).is_some());
    }

    #[test]
    fn assemblies_have_zero_width_windows() {
        let gears = recipe("AxleGears");
        assert!(gears.skill_window.is_degenerate());
        assert_eq!(gears.primary_resource.material, ItemType::new("Axle"));
        assert_eq!(gears.secondary_resources.first().unwrap().material, ItemType::new("Gears"));
    }

    #[test]
    fn eternal_key_needs_magery_and_three_materials() {
        let key = recipe("EternalKey");
        assert_eq!(key.skill_window.min, dec!(90));
        assert_eq!(key.resources().count(), 3);
        assert_eq!(key.secondary_skills.first().unwrap().skill, SkillName::Magery);
    }

    #[test]
    fn per_item_ramps() {
        let policy = TinkeringPolicy::new();
        assert_eq!(
            policy.chance_override(&recipe("PotionKeg")),
            Some(ChanceOverride::new(dec!(0.5), dec!(1)))
        );
        assert_eq!(
            policy.chance_override(&recipe("EternalKey")),
            Some(ChanceOverride::new(dec!(0.20), dec!(0.35)))
        );
        assert_eq!(policy.chance_override(&recipe("Scissors")), None);
    }

    #[test]
    fn only_metal_showing_shapes_keep_ingot_colour() {
        let policy = TinkeringPolicy::new();
        let gold = Metal::Gold.ingot();
        assert!(policy.retains_color_from(&recipe("Goblet"), &gold));
        assert!(!policy.retains_color_from(&recipe("Scissors"), &gold));
        assert!(!policy.retains_color_from(&recipe("Goblet"), &ItemType::new("Log")));
    }
}
