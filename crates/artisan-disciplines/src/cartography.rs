//! Cartography: blank scrolls pressed from bark, and maps drawn on blank
//! maps.

use artisan_engine::{CatalogError, CraftCatalog, CraftSystemPolicy, Discipline, DisciplineProfile, RegistryError};
use artisan_types::{DisciplineId, Message, SkillName, SoundId};

use crate::content::{Material, Row, add_rows, row};

/// "Cartography Menu"
const GUMP_TITLE: u32 = 1_044_008;
const CRAFT_SOUND: SoundId = SoundId(0x249);

/// Cartography rules: the tool check and the quill's scratch.
#[derive(Debug, Clone)]
pub struct CartographyPolicy {
    profile: DisciplineProfile,
}

impl CartographyPolicy {
    /// The standard Cartography profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(
                DisciplineId::Cartography,
                SkillName::Cartography,
                Message::cliloc(GUMP_TITLE),
            ),
        }
    }
}

impl Default for CartographyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for CartographyPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(CRAFT_SOUND)
    }
}

const BLANK_SCROLL: Row = row("BlankScroll", "Blank Scroll", 400, 700, 1);

const MAPS: [Row; 5] = [
    row("LocalMap", "Local Map", 100, 700, 1),
    row("CityMap", "City Map", 250, 850, 1),
    row("SeaChart", "Sea Chart", 350, 950, 1),
    row("WorldMap", "World Map", 395, 995, 1),
    row("MapWorld", "Map of the World", 895, 1105, 1),
];

/// Build the Cartography catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Cartography);

    // A whole stack of bark becomes scrolls in one go.
    let bark = Material::new("BarkFragment", Message::cliloc(1_073_477), Message::cliloc(1_073_478));
    catalog
        .add_recipe(BLANK_SCROLL.definition(&Message::cliloc(1_044_294), &bark)?)?
        .use_all_resource()
        .finish();

    let blank_maps = Material::new("BlankMap", Message::cliloc(1_044_449), Message::cliloc(1_044_450));
    add_rows(&mut catalog, &Message::cliloc(1_044_448), &blank_maps, &MAPS)?;
    Ok(catalog)
}

/// The Cartography catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(CartographyPolicy::new()))
}
