//! God Crafting: gem-forged plate, exotic hides, and weapon oils.
//!
//! A Blacksmithy discipline worked only inside one forge room. Every piece
//! sits in the 90 to 125 window and starts at an even chance. Any success
//! reads as a plain "You create the item."

use artisan_engine::policy::check_tool;
use artisan_engine::{
    CatalogError, CraftCatalog, CraftCheck, CraftSystemPolicy, Discipline, DisciplineProfile, EndingMessages,
    RecipeDefinition, RegistryError, ResourceSpec, ValidationFailure, ValidationKind,
};
use artisan_types::{Area, DisciplineId, ItemType, Message, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::content::window;

/// "You must be in the forge of the gods to craft this."
const OUTSIDE_FORGE: u32 = 501_816;
/// "You do not have sufficient materials to make that."
const NO_MATERIAL: u32 = 1_042_081;
/// "You create the item."
const ITEM_CREATED: u32 = 1_044_154;
const CRAFT_SOUND: SoundId = SoundId(0x541);
const CHANCE_AT_MIN: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The only room where God Crafting works.
pub const FORGE_OF_THE_GODS: Area = Area {
    min_x: 1_105,
    min_y: 1_961,
    max_x: 1_124,
    max_y: 1_977,
};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// God Crafting rules.
#[derive(Debug, Clone)]
pub struct GodCraftingPolicy {
    profile: DisciplineProfile,
}

impl GodCraftingPolicy {
    /// The standard God Crafting profile.
    pub fn new() -> Self {
        let created = Message::cliloc(ITEM_CREATED);
        let endings = EndingMessages {
            below_average: created.clone(),
            exceptional_marked: created.clone(),
            exceptional: created.clone(),
            normal: created,
            ..EndingMessages::default()
        };
        Self {
            profile: DisciplineProfile::new(DisciplineId::GodCrafting, SkillName::Blacksmithy, "God Crafting")
                .chance_at_min(CHANCE_AT_MIN)
                .endings(endings),
        }
    }
}

impl Default for GodCraftingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for GodCraftingPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn can_craft(&self, check: &CraftCheck<'_>) -> Result<(), ValidationFailure> {
        check_tool(check, &self.profile)?;
        let inside = check
            .environment
            .position(check.crafter)
            .is_some_and(|position| FORGE_OF_THE_GODS.contains(position));
        if inside {
            Ok(())
        } else {
            Err(ValidationFailure::new(
                ValidationKind::AmbientRequirement,
                Message::cliloc(OUTSIDE_FORGE),
            ))
        }
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(CRAFT_SOUND)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A gem worked like metal into a full plate set and an oil.
struct Gem {
    key: &'static str,
    label: &'static str,
    ingot: &'static str,
    shield: &'static str,
    category: &'static str,
}

const fn gem(
    key: &'static str,
    label: &'static str,
    ingot: &'static str,
    shield: &'static str,
    category: &'static str,
) -> Gem {
    Gem {
        key,
        label,
        ingot,
        shield,
        category,
    }
}

const GEMS: [Gem; 15] = [
    gem("Amethyst", "Amethyst", "AmethystIngot", "AmethystShield", "Amethyst & Emerald"),
    gem("Emerald", "Emerald", "EmeraldIngot", "EmeraldShield", "Amethyst & Emerald"),
    gem("Garnet", "Garnet", "GarnetIngot", "GarnetShield", "Garnet & Ice"),
    gem("Ice", "Ice", "IceIngot", "IceShield", "Garnet & Ice"),
    gem("Jade", "Jade", "JadeIngot", "JadeShield", "Jade & Marble"),
    gem("Marble", "Marble", "MarbleIngot", "MarbleShields", "Jade & Marble"),
    gem("Onyx", "Onyx", "OnyxIngot", "OnyxShield", "Onyx & Quartz"),
    gem("Quartz", "Quartz", "QuartzIngot", "QuartzShield", "Onyx & Quartz"),
    gem("Ruby", "Ruby", "RubyIngot", "RubyShield", "Ruby & Sapphire"),
    gem("Sapphire", "Sapphire", "SapphireIngot", "SapphireShield", "Ruby & Sapphire"),
    gem("Silver", "Silver", "ShinySilverIngot", "SilverShield", "Silver & Spinel"),
    gem("Spinel", "Spinel", "SpinelIngot", "SpinelShield", "Silver & Spinel"),
    gem("StarRuby", "Star Ruby", "StarRubyIngot", "StarRubyShield", "Star Ruby & Topaz"),
    gem("Topaz", "Topaz", "TopazIngot", "TopazShield", "Star Ruby & Topaz"),
    gem("Caddellite", "Caddellite", "CaddelliteIngot", "CaddelliteShield", "Caddellite"),
];

/// Plate pieces: target suffix, display suffix, blocks used.
const PLATE: [(&str, &str, u32); 7] = [
    ("PlateArms", "Arms", 18),
    ("PlateGloves", "Gauntlets", 12),
    ("PlateGorget", "Gorget", 10),
    ("PlateLegs", "Leggings", 20),
    ("PlateChest", "Tunic", 25),
    ("FemalePlateChest", "Female Tunic", 20),
    ("PlateHelm", "Helm", 15),
];
const SHIELD_BLOCKS: u32 = 18;
const OIL_BLOCKS: u32 = 30;

/// Hides sewn into a leather set.
const SKINS: [(&str, &str); 6] = [
    ("Demon", "Demon Skin"),
    ("Dragon", "Dragon Skin"),
    ("Nightmare", "Nightmare Skin"),
    ("Serpent", "Serpent Skin"),
    ("Troll", "Troll Skin"),
    ("Unicorn", "Unicorn Skin"),
];

/// Hide pieces: target suffix, display suffix, hides used.
const HIDE: [(&str, &str, u32); 6] = [
    ("Arms", "Arms", 4),
    ("Helm", "Cap", 2),
    ("Gloves", "Gloves", 3),
    ("Gorget", "Gorget", 4),
    ("Legs", "Leggings", 10),
    ("Chest", "Tunic", 12),
];

fn recipe(
    target: String,
    category: &Message,
    name: String,
    primary: ResourceSpec,
) -> Result<RecipeDefinition, CatalogError> {
    Ok(RecipeDefinition::new(
        ItemType::new(target),
        category.clone(),
        Message::text(name),
        window(900, 1250)?,
        primary,
    ))
}

fn add_gem(catalog: &mut CraftCatalog, gem: &Gem) -> Result<(), CatalogError> {
    let category = Message::text(gem.category);
    let block = format!("Block of {}", gem.label);
    let blocks = |quantity| ResourceSpec::new(gem.ingot, block.as_str(), quantity, Message::cliloc(NO_MATERIAL));

    for &(suffix, piece, quantity) in &PLATE {
        catalog.add_recipe(recipe(
            format!("{}{suffix}", gem.key),
            &category,
            format!("{} {piece}", gem.label),
            blocks(quantity)?,
        )?)?;
    }
    catalog.add_recipe(recipe(
        gem.shield.to_owned(),
        &category,
        format!("{} Shield", gem.label),
        blocks(SHIELD_BLOCKS)?,
    )?)?;

    let bottle = ResourceSpec::new("Bottle", Message::cliloc(1_044_529), 1, Message::cliloc(500_315))?;
    catalog
        .add_recipe(recipe(format!("Oil{}", gem.key), &category, format!("{} Oil", gem.label), bottle)?)?
        .add_secondary_resource(blocks(OIL_BLOCKS)?)
        .finish();
    Ok(())
}

fn add_skin(catalog: &mut CraftCatalog, key: &str, label: &str) -> Result<(), CatalogError> {
    let category = Message::text(label);
    let material = format!("{key}Skin");
    for &(suffix, piece, quantity) in &HIDE {
        let hides = ResourceSpec::new(material.as_str(), label, quantity, Message::cliloc(NO_MATERIAL))?;
        catalog.add_recipe(recipe(
            format!("Skin{key}{suffix}"),
            &category,
            format!("{label} {piece}"),
            hides,
        )?)?;
    }
    Ok(())
}

/// Build the God Crafting catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::GodCrafting);
    for gem in &GEMS {
        add_gem(&mut catalog, gem)?;
    }
    for (key, label) in SKINS {
        add_skin(&mut catalog, key, label)?;
    }
    Ok(catalog)
}

/// The God Crafting catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(GodCraftingPolicy::new()))
}
