//! Metals and the material families built from them.
//!
//! Tinkering and Blacksmithy work ingots; Masonry works granite cut from
//! the same veins. Each family is a sub-resource table whose tiers are the
//! metals in ascending skill order, coloured with the metal's hue.

use artisan_engine::{CatalogError, SubResourceTable, SubResourceTier};
use artisan_types::{Hue, ItemType, Message};

use crate::content::tenths;

/// "Iron"
const IRON_LABEL: u32 = 1_044_022;
/// "You do not have sufficient metal to make that."
const NO_INGOTS: u32 = 1_044_037;
/// "You have no idea how to work this metal."
const CANNOT_WORK_METAL: u32 = 1_044_268;
/// "Granite"
const GRANITE_FAMILY: u32 = 1_044_525;
/// "You do not have enough granite to make that."
const NO_GRANITE: u32 = 1_044_513;
/// "You have no idea how to work this stone."
const CANNOT_WORK_STONE: u32 = 1_044_526;

/// Every metal a smith can work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metal {
    /// Plain iron, the base of every family.
    Iron,
    /// Dull copper.
    DullCopper,
    /// Shadow iron.
    ShadowIron,
    /// Copper.
    Copper,
    /// Bronze.
    Bronze,
    /// Gold.
    Gold,
    /// Agapite.
    Agapite,
    /// Verite.
    Verite,
    /// Valorite.
    Valorite,
    /// Titanium.
    Titanium,
    /// Rosenium.
    Rosenium,
    /// Platinum.
    Platinum,
}

impl Metal {
    /// All metals in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Iron,
        Self::DullCopper,
        Self::ShadowIron,
        Self::Copper,
        Self::Bronze,
        Self::Gold,
        Self::Agapite,
        Self::Verite,
        Self::Valorite,
        Self::Titanium,
        Self::Rosenium,
        Self::Platinum,
    ];

    /// Item-type prefix, e.g. `"DullCopper"`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Iron => "Iron",
            Self::DullCopper => "DullCopper",
            Self::ShadowIron => "ShadowIron",
            Self::Copper => "Copper",
            Self::Bronze => "Bronze",
            Self::Gold => "Gold",
            Self::Agapite => "Agapite",
            Self::Verite => "Verite",
            Self::Valorite => "Valorite",
            Self::Titanium => "Titanium",
            Self::Rosenium => "Rosenium",
            Self::Platinum => "Platinum",
        }
    }

    /// Name in the material picker.
    pub fn label(self) -> Message {
        match self {
            Self::Iron => Message::cliloc(IRON_LABEL),
            Self::DullCopper => Message::cliloc(1_044_023),
            Self::ShadowIron => Message::cliloc(1_044_024),
            Self::Copper => Message::cliloc(1_044_025),
            Self::Bronze => Message::cliloc(1_044_026),
            Self::Gold => Message::cliloc(1_044_027),
            Self::Agapite => Message::cliloc(1_044_028),
            Self::Verite => Message::cliloc(1_044_029),
            Self::Valorite => Message::cliloc(1_044_030),
            Self::Titanium | Self::Rosenium | Self::Platinum => Message::text(self.key()),
        }
    }

    /// Colour the metal gives items that show it. Iron has none.
    pub const fn hue(self) -> Option<Hue> {
        match self {
            Self::Iron => None,
            Self::DullCopper => Some(Hue(0x973)),
            Self::ShadowIron => Some(Hue(0x966)),
            Self::Copper => Some(Hue(0x96D)),
            Self::Bronze => Some(Hue(0x972)),
            Self::Gold => Some(Hue(0x8A5)),
            Self::Agapite => Some(Hue(0x979)),
            Self::Verite => Some(Hue(0x89F)),
            Self::Valorite => Some(Hue(0x8AB)),
            Self::Titanium => Some(Hue(0x4E7)),
            Self::Rosenium => Some(Hue(0x4F2)),
            Self::Platinum => Some(Hue(0x47E)),
        }
    }

    /// The metal's ingot item type.
    pub fn ingot(self) -> ItemType {
        ItemType::new(format!("{}Ingot", self.key()))
    }

    /// The metal's granite item type. Plain granite belongs to iron.
    pub fn granite(self) -> ItemType {
        match self {
            Self::Iron => ItemType::new("Granite"),
            _ => ItemType::new(format!("{}Granite", self.key())),
        }
    }

    /// The metal an ingot is made of.
    pub fn from_ingot(material: &ItemType) -> Option<Self> {
        Self::ALL.into_iter().find(|metal| metal.ingot() == *material)
    }
}

/// Ingot tiers for Tinkering, and the granite tiers for Masonry: valorite
/// and the three newer metals all need 99.
const STANDARD_TIERS: [(Metal, i64); 12] = [
    (Metal::Iron, 0),
    (Metal::DullCopper, 650),
    (Metal::ShadowIron, 700),
    (Metal::Copper, 750),
    (Metal::Bronze, 800),
    (Metal::Gold, 850),
    (Metal::Agapite, 900),
    (Metal::Verite, 950),
    (Metal::Valorite, 990),
    (Metal::Titanium, 990),
    (Metal::Rosenium, 990),
    (Metal::Platinum, 990),
];

/// Ingot tiers for Blacksmithy.
const SMITHING_TIERS: [(Metal, i64); 12] = [
    (Metal::Iron, 0),
    (Metal::DullCopper, 650),
    (Metal::Copper, 700),
    (Metal::Bronze, 750),
    (Metal::ShadowIron, 800),
    (Metal::Platinum, 850),
    (Metal::Gold, 850),
    (Metal::Agapite, 900),
    (Metal::Verite, 950),
    (Metal::Valorite, 950),
    (Metal::Titanium, 1000),
    (Metal::Rosenium, 1000),
];

/// Iron ingots, the base of both ingot families.
pub const IRON_INGOT: &str = "IronIngot";
/// Plain granite, the base of the granite family.
pub const GRANITE: &str = "Granite";

/// The ingot family as Tinkering works it.
pub fn tinkering_ingots() -> Result<SubResourceTable, CatalogError> {
    ingot_table(&STANDARD_TIERS)
}

/// The ingot family as Blacksmithy works it.
pub fn smithing_ingots() -> Result<SubResourceTable, CatalogError> {
    ingot_table(&SMITHING_TIERS)
}

/// The granite family.
pub fn granite() -> Result<SubResourceTable, CatalogError> {
    let builder = SubResourceTable::builder(GRANITE, Message::cliloc(GRANITE_FAMILY))
        .material_missing_message(Message::cliloc(NO_GRANITE));
    STANDARD_TIERS
        .iter()
        .fold(builder, |builder, &(metal, min)| {
            builder.tier(tier(metal.granite(), metal, min, Message::cliloc(CANNOT_WORK_STONE)))
        })
        .build()
}

fn ingot_table(tiers: &[(Metal, i64)]) -> Result<SubResourceTable, CatalogError> {
    let builder =
        SubResourceTable::builder(IRON_INGOT, Message::cliloc(IRON_LABEL)).material_missing_message(Message::cliloc(NO_INGOTS));
    tiers
        .iter()
        .fold(builder, |builder, &(metal, min)| {
            builder.tier(tier(metal.ingot(), metal, min, Message::cliloc(CANNOT_WORK_METAL)))
        })
        .build()
}

fn tier(material: ItemType, metal: Metal, min: i64, cannot_work: Message) -> SubResourceTier {
    let tier = SubResourceTier::new(material, metal.label(), tenths(min)).insufficient_skill_message(cannot_work);
    match metal.hue() {
        Some(hue) => tier.hue(hue),
        None => tier,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ingot_names_round_trip() {
        for metal in Metal::ALL {
            assert_eq!(Metal::from_ingot(&metal.ingot()), Some(metal));
        }
        assert_eq!(Metal::from_ingot(&ItemType::new("AmethystIngot")), None);
        assert_eq!(Metal::Iron.granite(), ItemType::new("Granite"));
        assert_eq!(Metal::Gold.granite(), ItemType::new("GoldGranite"));
    }

    #[test]
    fn every_family_builds_with_iron_as_base() {
        let tinkering = tinkering_ingots().unwrap();
        let smithing = smithing_ingots().unwrap();
        let stone = granite().unwrap();
        assert_eq!(tinkering.base(), &ItemType::new(IRON_INGOT));
        assert_eq!(smithing.base(), &ItemType::new(IRON_INGOT));
        assert_eq!(stone.base(), &ItemType::new(GRANITE));
        assert_eq!(tinkering.tiers().len(), 12);
        assert_eq!(smithing.tiers().len(), 12);
        assert_eq!(stone.tiers().len(), 12);
    }

    #[test]
    fn tiers_resolve_by_skill() {
        let smithing = smithing_ingots().unwrap();
        assert_eq!(smithing.resolve(dec!(10)).material, Metal::Iron.ingot());
        assert_eq!(smithing.resolve(dec!(72)).material, Metal::Copper.ingot());
        assert_eq!(smithing.resolve(dec!(85)).material, Metal::Gold.ingot());
        assert_eq!(smithing.resolve(dec!(120)).material, Metal::Rosenium.ingot());

        let tinkering = tinkering_ingots().unwrap();
        assert_eq!(tinkering.resolve(dec!(72)).material, Metal::ShadowIron.ingot());
    }

    #[test]
    fn tiers_carry_metal_hues() {
        let stone = granite().unwrap();
        let gold = stone.tier_for(&Metal::Gold.granite()).unwrap();
        assert_eq!(gold.hue, Some(Hue(0x8A5)));
        assert_eq!(stone.tier_for(&ItemType::new(GRANITE)).unwrap().hue, None);
        assert_eq!(gold.min_skill, dec!(85));
    }
}
