//! The crafting disciplines shipped with the Artisan server.
//!
//! Each module pairs a recipe catalog with a [`CraftSystemPolicy`]
//! implementation and exposes `init_craft_list()` and `discipline()`.
//! [`standard_registry`] registers all of them.
//!
//! # Modules
//!
//! - [`blacksmithy`] -- Armour and weapons at an anvil and forge
//! - [`cartography`] -- Blank scrolls and maps
//! - [`cooking`] -- Ingredients, baking, and barbecue
//! - [`glassblowing`] -- Bottles and flasks for trained alchemists
//! - [`god_crafting`] -- Gem plate and exotic hides in the forge of the gods
//! - [`masonry`] -- Granite furniture and statues
//! - [`metals`] -- Ingot and granite families
//! - [`shelves`] -- Dressers and shelving
//! - [`tailoring`] -- Clothing, leather, and bags
//! - [`tinkering`] -- Tools, parts, and clockwork
//!
//! [`CraftSystemPolicy`]: artisan_engine::CraftSystemPolicy

mod content;

pub mod blacksmithy;
pub mod cartography;
pub mod cooking;
pub mod glassblowing;
pub mod god_crafting;
pub mod masonry;
pub mod metals;
pub mod shelves;
pub mod tailoring;
pub mod tinkering;

use artisan_engine::{Discipline, DisciplineRegistry, RegistryError};
use artisan_types::DisciplineId;
use tracing::{debug, info};

pub use blacksmithy::BlacksmithyPolicy;
pub use cartography::CartographyPolicy;
pub use cooking::CookingPolicy;
pub use glassblowing::GlassblowingPolicy;
pub use god_crafting::GodCraftingPolicy;
pub use masonry::MasonryPolicy;
pub use shelves::ShelvesPolicy;
pub use tailoring::TailoringPolicy;
pub use tinkering::TinkeringPolicy;

/// Build one discipline's catalog and policy.
pub fn discipline(id: DisciplineId) -> Result<Discipline, RegistryError> {
    match id {
        DisciplineId::Blacksmithy => blacksmithy::discipline(),
        DisciplineId::Cartography => cartography::discipline(),
        DisciplineId::Glassblowing => glassblowing::discipline(),
        DisciplineId::Tinkering => tinkering::discipline(),
        DisciplineId::Masonry => masonry::discipline(),
        DisciplineId::Tailoring => tailoring::discipline(),
        DisciplineId::Cooking => cooking::discipline(),
        DisciplineId::GodCrafting => god_crafting::discipline(),
        DisciplineId::Shelves => shelves::discipline(),
    }
}

/// A registry holding every shipped discipline.
pub fn standard_registry() -> Result<DisciplineRegistry, RegistryError> {
    let mut registry = DisciplineRegistry::new();
    for id in DisciplineId::ALL {
        let discipline = discipline(id)?;
        debug!(discipline = %id, recipes = discipline.catalog().len(), "discipline built");
        registry.register(discipline)?;
    }
    info!(disciplines = registry.len(), "standard registry built");
    Ok(registry)
}
