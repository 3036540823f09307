//! Tailoring: hats, clothing, footwear, leather armour, and bags.
//!
//! Cloth and leather are separate material families. Only a handful of
//! woven mats keep the colour of the cloth they are sewn from.

use artisan_engine::{
    CatalogError, CraftCatalog, CraftSystemPolicy, Discipline, DisciplineProfile, RecipeDefinition, RegistryError,
    SubResourceTable, SubResourceTier,
};
use artisan_types::{DisciplineId, ItemType, Message, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::content::{Material, Row, add_rows, row, tenths, window};

/// "Tailoring Menu"
const GUMP_TITLE: u32 = 1_044_005;
const CRAFT_SOUND: SoundId = SoundId(0x248);
/// Every Tailoring recipe starts at an even chance.
const CHANCE_AT_MIN: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// "You do not have sufficient metal to make that."
const NO_METAL: u32 = 1_042_081;

/// Plain cotton, the base of the cloth family.
pub const COTTON_CLOTH: &str = "CottonCloth";
/// Plain leather, the base of the leather family.
pub const LEATHER: &str = "Leather";
const GOLIATH_LEATHER: &str = "GoliathLeather";

/// Cloth that can tint what it is sewn into.
const DYEABLE_CLOTH: [&str; 2] = [COTTON_CLOTH, "PolyesterCloth"];

/// Mats that take the colour of their cloth.
const COLOURED_MATS: [&str; 8] = [
    "GozaMatEastDeed",
    "GozaMatSouthDeed",
    "SquareGozaMatEastDeed",
    "SquareGozaMatSouthDeed",
    "BrocadeGozaMatEastDeed",
    "BrocadeGozaMatSouthDeed",
    "BrocadeSquareGozaMatEastDeed",
    "BrocadeSquareGozaMatSouthDeed",
];

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Tailoring rules.
#[derive(Debug, Clone)]
pub struct TailoringPolicy {
    profile: DisciplineProfile,
}

impl TailoringPolicy {
    /// The standard Tailoring profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Tailoring, SkillName::Tailoring, Message::cliloc(GUMP_TITLE))
                .chance_at_min(CHANCE_AT_MIN)
                .can_mark(true),
        }
    }
}

impl Default for TailoringPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for TailoringPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn retains_color_from(&self, recipe: &RecipeDefinition, material: &ItemType) -> bool {
        DYEABLE_CLOTH.contains(&material.as_str()) && COLOURED_MATS.contains(&recipe.target.as_str())
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(CRAFT_SOUND)
    }
}

// ---------------------------------------------------------------------------
// Material families
// ---------------------------------------------------------------------------

const CLOTH_TIERS: [(&str, u32, i64); 5] = [
    (COTTON_CLOTH, 1_067_440, 0),
    ("WoolCloth", 1_067_443, 600),
    ("FlaxCloth", 1_067_441, 700),
    ("SilkCloth", 1_067_442, 800),
    ("PolyesterCloth", 1_067_444, 800),
];

const LEATHER_TIERS: [(&str, u32, i64); 4] = [
    (LEATHER, 1_049_150, 0),
    ("SpinedLeather", 1_049_151, 700),
    ("BarbedLeather", 1_049_153, 800),
    ("HornedLeather", 1_049_152, 850),
];

/// The cloth family.
pub fn cloth() -> Result<SubResourceTable, CatalogError> {
    family(COTTON_CLOTH, 1_067_440, 1_044_458, 1_054_019, &CLOTH_TIERS)
}

/// The leather family.
pub fn leather() -> Result<SubResourceTable, CatalogError> {
    family(LEATHER, 1_049_150, 1_044_462, 1_049_311, &LEATHER_TIERS)
}

fn family(
    base: &'static str,
    name: u32,
    missing: u32,
    cannot_work: u32,
    tiers: &[(&'static str, u32, i64)],
) -> Result<SubResourceTable, CatalogError> {
    let builder = SubResourceTable::builder(base, Message::cliloc(name)).material_missing_message(Message::cliloc(missing));
    tiers
        .iter()
        .fold(builder, |builder, &(material, label, min)| {
            builder.tier(
                SubResourceTier::new(material, Message::cliloc(label), tenths(min))
                    .insufficient_skill_message(Message::cliloc(cannot_work)),
            )
        })
        .build()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const HATS: [Row; 5] = [
    row("SkullCap", "Skullcap", 0, 250, 3),
    row("Bandana", "Bandana", 0, 180, 2),
    row("FloppyHat", "Floppy Hat", 162, 312, 9),
    row("StrawHat", "Straw Hat", 162, 312, 10),
    row("JesterHat", "Jester Hat", 272, 422, 15),
];

const CLOTHING: [Row; 6] = [
    row("Doublet", "Doublet", 0, 250, 7),
    row("Shirt", "Shirt", 207, 457, 8),
    row("Tunic", "Tunic", 0, 250, 12),
    row("Cloak", "Cloak", 414, 664, 15),
    row("Robe", "Robe", 539, 789, 18),
    row("FoolsCoat", "Fool's Coat", 700, 950, 13),
];

const PANTS: [Row; 2] = [
    row("ShortPants", "Short Pants", 248, 498, 8),
    row("Kilt", "Kilt", 207, 457, 8),
];

const MISC: [Row; 1] = [row("BodySash", "Body Sash", 200, 291, 4)];

const FOOTWEAR: [Row; 3] = [
    row("Sandals", "Sandals", 224, 374, 6),
    row("Shoes", "Shoes", 265, 415, 8),
    row("Boots", "Boots", 331, 581, 10),
];

const LEATHER_ARMOR: [Row; 3] = [
    row("LeatherCap", "Leather Cap", 500, 552, 4),
    row("LeatherGloves", "Leather Gloves", 618, 668, 6),
    row("LeatherChest", "Leather Tunic", 705, 755, 16),
];

const BAGS: [Row; 4] = [
    row("Bag", "Bag", 300, 401, 11),
    row("LargeBag", "Large Bag", 500, 601, 21),
    row("Backpack", "Backpack", 500, 601, 15),
    row("RuggedBackpack", "Rugged Backpack", 600, 701, 25),
];

/// Build the Tailoring catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Tailoring);
    let cloth_line = Material::new(COTTON_CLOTH, Message::cliloc(1_044_286), Message::cliloc(1_044_287));
    let leather_line = Material::new(LEATHER, Message::cliloc(1_044_462), Message::cliloc(1_044_463));

    let hats = Message::text("Hats");
    add_rows(&mut catalog, &hats, &cloth_line, &HATS)?;
    catalog
        .add_recipe(row("WizardsHat", "Wizard's Hat", 772, 922, 21).definition(&hats, &cloth_line)?)?
        .add_secondary_skill(SkillName::Magery, window(900, 1000)?)
        .finish();
    let trim = Material::new(LEATHER, Message::cliloc(1_044_462), Message::cliloc(NO_METAL));
    catalog
        .add_recipe(row("WideBrimHat", "Wide-Brim Hat", 162, 312, 10).definition(&hats, &cloth_line)?)?
        .add_secondary_resource(trim.spec(3)?)
        .finish();

    add_rows(&mut catalog, &Message::text("Clothing"), &cloth_line, &CLOTHING)?;
    add_rows(&mut catalog, &Message::text("Pants"), &cloth_line, &PANTS)?;
    add_rows(&mut catalog, &Message::text("Misc"), &cloth_line, &MISC)?;
    add_rows(&mut catalog, &Message::text("Footwear"), &leather_line, &FOOTWEAR)?;
    add_rows(&mut catalog, &Message::text("Leather Armor"), &leather_line, &LEATHER_ARMOR)?;
    add_bags(&mut catalog, &Message::text("Bags"), &leather_line)?;

    catalog.add_sub_resource_table(cloth()?)?;
    catalog.add_sub_resource_table(leather()?)?;
    Ok(catalog)
}

/// Leather bags, and the enchanted pouches sewn from goliath hide.
fn add_bags(catalog: &mut CraftCatalog, category: &Message, leather_line: &Material) -> Result<(), CatalogError> {
    add_rows(catalog, category, leather_line, &BAGS)?;

    let goliath = Material::new(GOLIATH_LEATHER, "Goliath Leather", Message::cliloc(1_061_740));
    catalog.add_recipe(row("GiantBag", "Giant Bag", 700, 801, 20).definition(category, &goliath)?)?;

    let pouch_hide = Material::new(GOLIATH_LEATHER, "Goliath Leather", Message::cliloc(1_049_311));
    let platinum = Material::new("PlatinumIngot", "Platinum Ingots", Message::cliloc(NO_METAL));
    catalog
        .add_recipe(row("MinersPouch", "Miner's Pouch", 900, 1001, 50).definition(category, &pouch_hide)?)?
        .add_secondary_skill(SkillName::Magery, window(900, 1000)?)
        .add_secondary_resource(platinum.spec(8)?)
        .finish();
    Ok(())
}

/// The Tailoring catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(TailoringPolicy::new()))
}
