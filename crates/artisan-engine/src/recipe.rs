//! Recipe definitions: what an item costs and what skill it takes.

use artisan_types::{ItemType, Message, SkillName, Station};
use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::resource::ResourceSpec;

// ---------------------------------------------------------------------------
// RecipeIndex
// ---------------------------------------------------------------------------

/// Position of a recipe within its catalog, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecipeIndex(pub usize);

impl core::fmt::Display for RecipeIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SkillWindow
// ---------------------------------------------------------------------------

/// The skill range over which an attempt's success chance ramps.
///
/// Below `min` the attempt cannot succeed; at or above `max` it reaches its
/// ceiling. `min == max` is a degenerate window used by fixed-odds and
/// assembly recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillWindow {
    /// Lowest skill with any chance of success.
    pub min: Decimal,
    /// Skill at which the chance stops increasing.
    pub max: Decimal,
}

impl SkillWindow {
    /// Build a window, rejecting `min > max`.
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, CatalogError> {
        if min > max {
            return Err(CatalogError::InvalidSkillWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Whether `min == max`.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether `skill` falls inside the window, bounds included.
    pub fn contains(&self, skill: Decimal) -> bool {
        skill >= self.min && skill <= self.max
    }
}

/// An additional skill an attempt is rolled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillRequirement {
    /// The skill.
    pub skill: SkillName,
    /// Its window.
    pub window: SkillWindow,
}

/// A station the crafter must be standing near.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationRequirement {
    /// The fixture.
    pub station: Station,
    /// Maximum distance in tiles.
    pub range: u32,
    /// Shown when the crafter is too far away.
    pub message: Message,
}

// ---------------------------------------------------------------------------
// RecipeDefinition
// ---------------------------------------------------------------------------

/// Everything the engine needs to resolve an attempt at one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDefinition {
    /// The item produced. Unique within a catalog.
    pub target: ItemType,
    /// Menu grouping.
    pub category: Message,
    /// Menu label.
    pub display_name: Message,
    /// Window for the discipline's main skill.
    pub skill_window: SkillWindow,
    /// The main material; draws from a sub-resource table when its material
    /// is a table's base.
    pub primary_resource: ResourceSpec,
    /// Further materials, consumed alongside the primary.
    pub secondary_resources: Vec<ResourceSpec>,
    /// Further skills rolled independently of the main skill.
    pub secondary_skills: Vec<SkillRequirement>,
    /// Consume the entire held stack of the primary material on success.
    pub use_all_resource: bool,
    /// Fixture the crafter must stand near, checked before any roll.
    pub required_station: Option<StationRequirement>,
    /// Recipe the crafter must have learned from a scroll; open to all when
    /// `None`.
    pub recipe_id: Option<u32>,
}

impl RecipeDefinition {
    /// A recipe with no secondary resources or skills.
    pub fn new(
        target: impl Into<ItemType>,
        category: impl Into<Message>,
        display_name: impl Into<Message>,
        skill_window: SkillWindow,
        primary_resource: ResourceSpec,
    ) -> Self {
        Self {
            target: target.into(),
            category: category.into(),
            display_name: display_name.into(),
            skill_window,
            primary_resource,
            secondary_resources: Vec::new(),
            secondary_skills: Vec::new(),
            use_all_resource: false,
            required_station: None,
            recipe_id: None,
        }
    }

    /// Primary resource followed by the secondaries, in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceSpec> {
        core::iter::once(&self.primary_resource).chain(self.secondary_resources.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn window_rejects_inverted_bounds() {
        let window = SkillWindow::new(dec!(80), dec!(40));
        assert_eq!(
            window.err(),
            Some(CatalogError::InvalidSkillWindow { min: dec!(80), max: dec!(40) })
        );
    }

    #[test]
    fn degenerate_window() {
        let window = SkillWindow::new(dec!(0), dec!(0)).unwrap();
        assert!(window.is_degenerate());
        assert!(window.contains(dec!(0)));
        assert!(!window.contains(dec!(0.1)));
    }

    #[test]
    fn resources_lists_primary_first() {
        let mut recipe = RecipeDefinition::new(
            "Globe",
            "Miscellaneous",
            "Globe",
            SkillWindow::new(dec!(55), dec!(105)).unwrap(),
            ResourceSpec::new("IronIngot", "Iron Ingots", 4, "Not enough ingots.").unwrap(),
        );
        recipe
            .secondary_resources
            .push(ResourceSpec::new("Gears", "Gears", 1, "Not enough gears.").unwrap());

        let materials: Vec<&str> = recipe.resources().map(|r| r.material.as_str()).collect();
        assert_eq!(materials, vec!["IronIngot", "Gears"]);
    }
}
