//! Shelves: dressers and shelving nailed together from boards.
//!
//! A Carpentry discipline with its own board family and an even chance at
//! the bottom of every window.

use artisan_engine::{
    CatalogError, CraftCatalog, CraftSystemPolicy, Discipline, DisciplineProfile, RegistryError, SubResourceTable,
    SubResourceTier,
};
use artisan_types::{DisciplineId, Message, SkillName, SoundId};
use rust_decimal::Decimal;

use crate::content::{Material, Row, add_rows, row, tenths};

/// "Carpentry Menu"
const GUMP_TITLE: u32 = 1_044_004;
const HAMMERING: SoundId = SoundId(0x23D);
const CHANCE_AT_MIN: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Plain boards, the base of the board family.
pub const BOARD: &str = "Board";
/// "Boards"
const BOARDS: u32 = 1_015_101;
/// "You do not have sufficient wood to make that."
const NO_WOOD: u32 = 1_044_351;
/// "You cannot work this strange and unusual wood."
const CANNOT_WORK_WOOD: u32 = 1_072_652;

/// Shelves rules: the tool check and hammering.
#[derive(Debug, Clone)]
pub struct ShelvesPolicy {
    profile: DisciplineProfile,
}

impl ShelvesPolicy {
    /// The standard Shelves profile.
    pub fn new() -> Self {
        Self {
            profile: DisciplineProfile::new(DisciplineId::Shelves, SkillName::Carpentry, Message::cliloc(GUMP_TITLE))
                .chance_at_min(CHANCE_AT_MIN)
                .can_mark(true),
        }
    }
}

impl Default for ShelvesPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CraftSystemPolicy for ShelvesPolicy {
    fn profile(&self) -> &DisciplineProfile {
        &self.profile
    }

    fn craft_sound(&self) -> Option<SoundId> {
        Some(HAMMERING)
    }
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

const BOARD_TIERS: [(&str, u32, i64); 8] = [
    (BOARD, 1_072_643, 0),
    ("AshBoard", 1_095_379, 600),
    ("EbonyBoard", 1_095_381, 700),
    ("ElvenBoard", 1_095_535, 800),
    ("GoldenOakBoard", 1_095_382, 850),
    ("CherryBoard", 1_095_380, 900),
    ("RosewoodBoard", 1_095_387, 950),
    ("HickoryBoard", 1_095_383, 1000),
];

/// The board family.
pub fn boards() -> Result<SubResourceTable, CatalogError> {
    let builder =
        SubResourceTable::builder(BOARD, Message::cliloc(1_072_643)).material_missing_message(Message::cliloc(NO_WOOD));
    BOARD_TIERS
        .iter()
        .fold(builder, |builder, &(material, label, min)| {
            builder.tier(
                SubResourceTier::new(material, Message::cliloc(label), tenths(min))
                    .insufficient_skill_message(Message::cliloc(CANNOT_WORK_WOOD)),
            )
        })
        .build()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

const DRESSERS: [Row; 6] = [
    row("NewDrawersA", "dresser", 315, 565, 30),
    row("NewDrawersB", "open dresser", 315, 565, 30),
    row("NewDrawersE", "nightstand", 315, 565, 30),
    row("ColoredDresserB", "fancy dresser", 315, 565, 35),
    row("ColoredDresserE", "short elegant dresser", 315, 565, 25),
    row("ColoredDresserJ", "wide medium dresser", 315, 565, 35),
];

const SOLID_SHELVES: [Row; 12] = [
    row("NewShelfC", "shelf", 415, 665, 35),
    row("NewShelfD", "shelf, small", 415, 665, 35),
    row("NewWizardShelfD", "alchemy shelf", 415, 665, 35),
    row("NewArmorShelfC", "armor shelf", 415, 665, 35),
    row("NewBakerShelfC", "baker shelf", 415, 665, 35),
    row("NewBookShelfE", "book shelf", 415, 665, 35),
    row("NewBookShelfG", "book shelf, small", 415, 665, 35),
    row("NewBowyerShelfB", "bowyer shelf", 415, 665, 35),
    row("NewCarpenterShelfA", "carpenter shelf", 415, 665, 35),
    row("NewClothShelfC", "cloth shelf", 415, 665, 35),
    row("NewBlacksmithShelfC", "smith shelf", 415, 665, 35),
    row("NewTailorShelfB", "tailor shelf", 415, 665, 35),
];

/// Build the Shelves catalog.
pub fn init_craft_list() -> Result<CraftCatalog, CatalogError> {
    let mut catalog = CraftCatalog::new(DisciplineId::Shelves);
    let boards_line = Material::new(BOARD, Message::cliloc(BOARDS), Message::cliloc(NO_WOOD));
    add_rows(&mut catalog, &Message::text("Dressers"), &boards_line, &DRESSERS)?;
    add_rows(&mut catalog, &Message::text("Solid Shelves"), &boards_line, &SOLID_SHELVES)?;
    catalog.add_sub_resource_table(boards()?)?;
    Ok(catalog)
}

/// The Shelves catalog and policy.
pub fn discipline() -> Result<Discipline, RegistryError> {
    Discipline::new(init_craft_list()?, Box::new(ShelvesPolicy::new()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_types::ItemType;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn boards_resolve_by_carpentry() {
        let boards = boards().unwrap();
        assert_eq!(boards.resolve(dec!(59.9)).material, ItemType::new(BOARD));
        assert_eq!(boards.resolve(dec!(87)).material, ItemType::new("GoldenOakBoard"));
        assert_eq!(boards.resolve(dec!(100)).material, ItemType::new("HickoryBoard"));
    }

    #[test]
    fn shelves_draw_on_boards() {
        let catalog = init_craft_list().unwrap();
        let (_, shelf) = catalog.find(&ItemType::new("NewBookShelfE")).unwrap();
        assert_eq!(catalog.sub_resource_for(shelf).unwrap().base(), &ItemType::new(BOARD));
        assert_eq!(shelf.skill_window.min, dec!(41.5));
        assert_eq!(ShelvesPolicy::new().profile().chance_at_min, dec!(0.5));
        assert!(ShelvesPolicy::new().profile().can_mark);
    }
}
