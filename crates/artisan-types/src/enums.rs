//! Enumeration types shared across the Artisan crates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A skill that a crafting discipline reads or trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillName {
    /// Metal weapons, armor, and God Crafting smithing.
    Blacksmithy,
    /// Maps, charts, and blank scrolls.
    Cartography,
    /// Potions; also the skill behind glassblowing.
    Alchemy,
    /// Small mechanisms, utensils, jewelry, and assemblies.
    Tinkering,
    /// Woodwork, shelves, and stone masonry.
    Carpentry,
    /// Cloth and leather goods.
    Tailoring,
    /// Food preparation.
    Cooking,
    /// Spellcasting; a secondary requirement for enchanted crafts.
    Magery,
    /// Ore extraction.
    Mining,
    /// Scroll and book writing.
    Inscription,
}

impl SkillName {
    /// Stable lowercase name used in logs and configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blacksmithy => "blacksmithy",
            Self::Cartography => "cartography",
            Self::Alchemy => "alchemy",
            Self::Tinkering => "tinkering",
            Self::Carpentry => "carpentry",
            Self::Tailoring => "tailoring",
            Self::Cooking => "cooking",
            Self::Magery => "magery",
            Self::Mining => "mining",
            Self::Inscription => "inscription",
        }
    }
}

impl core::fmt::Display for SkillName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Disciplines
// ---------------------------------------------------------------------------

/// Identifier of a crafting discipline (one catalog plus one policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisciplineId {
    /// Weapons and armor at an anvil and forge.
    Blacksmithy,
    /// Maps and blank scrolls.
    Cartography,
    /// Bottles, flasks, and hourglasses near a forge.
    Glassblowing,
    /// Tools, utensils, jewelry, and multi-part assemblies.
    Tinkering,
    /// Granite furniture and statues.
    Masonry,
    /// Clothing, hats, and leather armor.
    Tailoring,
    /// Doughs, pies, and prepared food.
    Cooking,
    /// High-end smithing, sewing, and brewing inside a sanctified area.
    GodCrafting,
    /// Carpentry shelves and cabinets.
    Shelves,
}

impl DisciplineId {
    /// Every discipline, in registration order.
    pub const ALL: [Self; 9] = [
        Self::Blacksmithy,
        Self::Cartography,
        Self::Glassblowing,
        Self::Tinkering,
        Self::Masonry,
        Self::Tailoring,
        Self::Cooking,
        Self::GodCrafting,
        Self::Shelves,
    ];

    /// Stable lowercase name used in logs and configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blacksmithy => "blacksmithy",
            Self::Cartography => "cartography",
            Self::Glassblowing => "glassblowing",
            Self::Tinkering => "tinkering",
            Self::Masonry => "masonry",
            Self::Tailoring => "tailoring",
            Self::Cooking => "cooking",
            Self::GodCrafting => "god_crafting",
            Self::Shelves => "shelves",
        }
    }
}

impl core::fmt::Display for DisciplineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Quality classification of a successful craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// The crafter barely managed to make the item.
    BelowAverage,
    /// Ordinary output.
    Normal,
    /// Exceptional output; the only tier that can carry a maker's mark.
    Exceptional,
}

/// Outcome reported to the skill store when granting a skill gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GainOutcome {
    /// Every roll passed.
    Success,
    /// At least one roll failed.
    Failure,
}

/// The crafter's maker's-mark preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkOption {
    /// Sign every exceptional item.
    Mark,
    /// Never sign.
    #[default]
    DoNotMark,
    /// Ask every time. The engine cannot prompt, so it treats this as
    /// [`MarkOption::DoNotMark`].
    Prompt,
}

// ---------------------------------------------------------------------------
// Ambient requirements
// ---------------------------------------------------------------------------

/// A fixture a crafter may need to stand near.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    /// A smithing anvil.
    Anvil,
    /// A smelting forge.
    Forge,
    /// Any open flame: campfire, hearth, or forge.
    HeatSource,
    /// A baking oven.
    Oven,
    /// A weaving loom.
    Loom,
    /// A flour mill.
    Mill,
}

/// Knowledge a crafter unlocks outside the skill system (e.g. by reading a
/// book).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lore {
    /// Permits glassblowing.
    Glassblowing,
    /// Permits stone masonry.
    Masonry,
    /// Permits mining sand.
    SandMining,
    /// Permits mining granite.
    StoneMining,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discipline_names_are_unique() {
        let mut names: Vec<&str> = DisciplineId::ALL.iter().map(|d| d.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DisciplineId::ALL.len());
    }

    #[test]
    fn discipline_deserializes_from_snake_case() {
        let parsed: Result<DisciplineId, _> = serde_json::from_str("\"god_crafting\"");
        assert_eq!(parsed.ok(), Some(DisciplineId::GodCrafting));
    }

    #[test]
    fn quality_tiers_are_ordered() {
        assert!(QualityTier::BelowAverage < QualityTier::Normal);
        assert!(QualityTier::Normal < QualityTier::Exceptional);
    }

    #[test]
    fn mark_option_defaults_to_unsigned() {
        assert_eq!(MarkOption::default(), MarkOption::DoNotMark);
    }
}
