//! Cooking: ingredients, baking, and barbecue.
//!
//! Recipes combine several ingredients, and most need a mill, an oven, or
//! an open flame nearby. Cooking makes no sound.

use artisan_engine::{CatalogError, CraftCatalog, CraftSystemPolicy, Discipline, DisciplineProfile, RegistryError};
use artisan_types::{DisciplineId, Message, SkillName, Station};

use crate::content::{Mixture, add_mixtures, mixture, near};

/// "Cooking Menu"
const GUMP_TITLE: u32 = 1_044_003;
/// "You don't have the components needed to make that."
const NO_COMPONENTS: u32 = 1_044_253;
/// Tiles within which a mill, oven, or flame must stand.
pub const STATION_RANGE: u32 = 2;

/// Cooking rules: only the tool check.
#[derive(Debug, Clone)]
pub struct CookingPolicy {
    profile: DisciplineProfile,
}

impl CookingPolicy {
    /// The standard Cooking profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Cooking, SkillName::Cooking, Message::cliloc(GUMP_TITLE)),
        }
    }
}

impl Default for CookingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for CookingPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const MILLED: [Mixture; 1] = [mixture("SackFlour", "Sack of Flour", 0, 400, &[("WheatSheaf", 5)])];

const INGREDIENTS: [Mixture; 5] = [
    mixture("Dough", "Dough", 200, 500, &[("SackFlour", 1), ("BaseBeverage", 1)]),
    mixture("SweetDough", "Sweet Dough", 300, 600, &[("Dough", 1), ("JarHoney", 1)]),
    mixture("CakeMix", "Cake Mix", 400, 700, &[("SackFlour", 1), ("SweetDough", 1)]),
    mixture("CookieMix", "Cookie Mix", 400, 700, &[("JarHoney", 1), ("SweetDough", 1)]),
    mixture("UnbakedApplePie", "Unbaked Apple Pie", 400, 850, &[("SweetDough", 1), ("Apple", 2)]),
];

const BAKING: [Mixture; 4] = [
    mixture("BreadLoaf", "Bread Loaf", 300, 800, &[("Dough", 1)]),
    mixture("Cookies", "Pan of Cookies", 700, 1000, &[("CookieMix", 1)]),
    mixture("Cake", "Cake", 800, 1200, &[("CakeMix", 1)]),
    mixture("ApplePie", "Apple Pie", 700, 1000, &[("UnbakedApplePie", 1)]),
];

const BARBECUE: [Mixture; 4] = [
    mixture("CookedBird", "Cooked Bird", 200, 700, &[("RawBird", 1)]),
    mixture("FishSteak", "Fish Steak", 100, 700, &[("RawFishSteak", 1)]),
    mixture("FriedEggs", "Fried Eggs", 100, 700, &[("Eggs", 1)]),
    mixture("Ribs", "Cut of Ribs", 400, 800, &[("RawRibs", 1)]),
];

/// Build the Cooking catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Cooking);
    let missing = Message::cliloc(NO_COMPONENTS);
    let ingredients = Message::cliloc(1_044_495);

    let mill = near(Station::Mill, STATION_RANGE, Message::cliloc(1_044_491));
    add_mixtures(&mut catalog, &ingredients, &missing, Some(&mill), &MILLED)?;
    add_mixtures(&mut catalog, &ingredients, &missing, None, &INGREDIENTS)?;

    let oven = near(Station::Oven, STATION_RANGE, Message::cliloc(1_044_493));
    add_mixtures(&mut catalog, &Message::cliloc(1_044_497), &missing, Some(&oven), &BAKING)?;

    let flame = near(Station::HeatSource, STATION_RANGE, Message::cliloc(1_044_487));
    add_mixtures(&mut catalog, &Message::cliloc(1_044_498), &missing, Some(&flame), &BARBECUE)?;
    Ok(catalog)
}

/// The Cooking catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(CookingPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_types::{ItemType, SoundId};

    use super::*;

    #[test]
    fn stations_follow_the_recipe() {
        let catalog = init_craft_list().unwrap();
        let station = |target: &str| {
            catalog
                .find(&ItemType::new(target))
                .unwrap()
                .1
                .required_station
                .as_ref()
                .map(|requirement| requirement.station)
        };
        assert_eq!(station("SackFlour"), Some(Station::Mill));
        assert_eq!(station("Dough"), None);
        assert_eq!(station("Cake"), Some(Station::Oven));
        assert_eq!(station("Ribs"), Some(Station::HeatSource));
    }

    #[test]
    fn flour_takes_five_sheaves() {
        let catalog = init_craft_list().unwrap();
        let (_, flour) = catalog.find(&ItemType::new("SackFlour")).unwrap();
        assert_eq!(flour.primary_resource.material, ItemType::new("WheatSheaf"));
        assert_eq!(flour.primary_resource.quantity, 5);
        assert_eq!(catalog.len(), 14);
    }

    #[test]
    fn cooking_is_silent() {
        let policy = CookingPolicy::new();
        assert_eq!(policy.craft_sound(), None::<SoundId>);
        assert_eq!(policy.delayed_sound(), None);
    }
}
