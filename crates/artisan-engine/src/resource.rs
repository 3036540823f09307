//! Resource requirements and skill-gated material tiers.
//!
//! A [`ResourceSpec`] is one line of a recipe's bill of materials. A
//! [`SubResourceTable`] is a family of interchangeable materials (iron,
//! dull copper, ... valorite) ordered by the minimum skill needed to work
//! each one. Both are immutable once a discipline's catalog is built; every
//! lookup here is pure.

use artisan_types::{Hue, ItemType, Message};
use rust_decimal::Decimal;

use crate::error::{CatalogError, SubResourceError};

// ---------------------------------------------------------------------------
// ResourceSpec
// ---------------------------------------------------------------------------

/// One material requirement of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// The material consumed.
    pub material: ItemType,
    /// Name shown in the crafting menu.
    pub display_name: Message,
    /// Units consumed by a successful attempt. Always positive.
    pub quantity: u32,
    /// Shown when the crafter holds fewer than `quantity` units.
    pub missing_message: Message,
}

impl ResourceSpec {
    /// Build a requirement, rejecting a zero quantity.
    pub fn new(
        material: impl Into<ItemType>,
        display_name: impl Into<Message>,
        quantity: u32,
        missing_message: impl Into<Message>,
    ) -> Result<Self, CatalogError> {
        let material = material.into();
        if quantity == 0 {
            return Err(CatalogError::ZeroQuantity(material));
        }
        Ok(Self {
            material,
            display_name: display_name.into(),
            quantity,
            missing_message: missing_message.into(),
        })
    }
}

// ---------------------------------------------------------------------------
// SubResourceTier
// ---------------------------------------------------------------------------

/// Default message for a crafter who lacks the skill to work a tier.
const DEFAULT_INSUFFICIENT_SKILL: &str = "You have no idea how to work this metal.";

/// One material in a [`SubResourceTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResourceTier {
    /// The material item type.
    pub material: ItemType,
    /// Name of the tier in the material picker.
    pub display_name: Message,
    /// Minimum skill needed to work the material.
    pub min_skill: Decimal,
    /// Label shown next to the recipe's resource line when this tier is
    /// selected.
    pub catalog_message: Message,
    /// Shown when the crafter holds the material but lacks the skill.
    pub insufficient_skill_message: Message,
    /// Colour of the material, inherited by items that show their metal.
    pub hue: Option<Hue>,
}

impl SubResourceTier {
    /// A tier with the default skill message and no colour.
    pub fn new(material: impl Into<ItemType>, display_name: impl Into<Message>, min_skill: Decimal) -> Self {
        let display_name = display_name.into();
        Self {
            material: material.into(),
            catalog_message: display_name.clone(),
            display_name,
            min_skill,
            insufficient_skill_message: Message::text(DEFAULT_INSUFFICIENT_SKILL),
            hue: None,
        }
    }

    /// Set the label shown on the recipe's resource line.
    #[must_use]
    pub fn catalog_message(mut self, message: impl Into<Message>) -> Self {
        self.catalog_message = message.into();
        self
    }

    /// Set the message for a crafter who lacks the skill for this tier.
    #[must_use]
    pub fn insufficient_skill_message(mut self, message: impl Into<Message>) -> Self {
        self.insufficient_skill_message = message.into();
        self
    }

    /// Set the colour of the material.
    #[must_use]
    pub const fn hue(mut self, hue: Hue) -> Self {
        self.hue = Some(hue);
        self
    }
}

// ---------------------------------------------------------------------------
// SubResourceTable
// ---------------------------------------------------------------------------

/// An ordered family of interchangeable materials.
///
/// Tiers are ascending by `min_skill` (ties allowed) and the base material
/// is always one of them. Construct through [`SubResourceTable::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubResourceTable {
    base: SubResourceTier,
    display_name: Message,
    material_missing_message: Message,
    tiers: Vec<SubResourceTier>,
}

impl SubResourceTable {
    /// Start building a table for the family whose default material is
    /// `base`.
    pub fn builder(base: impl Into<ItemType>, display_name: impl Into<Message>) -> SubResourceTableBuilder {
        SubResourceTableBuilder {
            base: base.into(),
            display_name: display_name.into(),
            material_missing_message: Message::text("You do not have sufficient material to make that."),
            tiers: Vec::new(),
        }
    }

    /// The family's default material. Recipes whose primary resource is this
    /// material draw from the table.
    pub const fn base(&self) -> &ItemType {
        &self.base.material
    }

    /// Family label shown in the material picker.
    pub const fn display_name(&self) -> &Message {
        &self.display_name
    }

    /// Shown when the crafter holds none of the chosen material.
    pub const fn material_missing_message(&self) -> &Message {
        &self.material_missing_message
    }

    /// All tiers, ascending by minimum skill.
    pub fn tiers(&self) -> &[SubResourceTier] {
        &self.tiers
    }

    /// The highest tier the skill qualifies for.
    ///
    /// Below every minimum the base tier is returned, so the result is
    /// always a tier of this table.
    pub fn resolve(&self, skill: Decimal) -> &SubResourceTier {
        let qualified = self.tiers.iter().rev().find(|tier| tier.min_skill <= skill);
        qualified.unwrap_or(&self.base)
    }

    /// The tier for `material`, if it belongs to this family.
    pub fn tier_for(&self, material: &ItemType) -> Option<&SubResourceTier> {
        self.tiers.iter().find(|tier| &tier.material == material)
    }

    /// Whether `material` is one of this table's tiers.
    pub fn contains(&self, material: &ItemType) -> bool {
        self.tier_for(material).is_some()
    }

    /// Check that `material` belongs to the family and that `skill` is high
    /// enough to work it.
    ///
    /// "Not part of the family" and "not skilled enough" are distinct
    /// errors; holding the material is checked by the engine, not here.
    pub fn check_material(&self, material: &ItemType, skill: Decimal) -> Result<&SubResourceTier, SubResourceError> {
        let tier = self
            .tier_for(material)
            .ok_or_else(|| SubResourceError::NotInFamily(material.clone()))?;
        if tier.min_skill > skill {
            return Err(SubResourceError::InsufficientSkill {
                material: material.clone(),
                required: tier.min_skill,
                skill,
                message: tier.insufficient_skill_message.clone(),
            });
        }
        Ok(tier)
    }
}

/// Builder for [`SubResourceTable`]; validation happens in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SubResourceTableBuilder {
    base: ItemType,
    display_name: Message,
    material_missing_message: Message,
    tiers: Vec<SubResourceTier>,
}

impl SubResourceTableBuilder {
    /// Set the message shown when the crafter holds none of the chosen
    /// material.
    #[must_use]
    pub fn material_missing_message(mut self, message: impl Into<Message>) -> Self {
        self.material_missing_message = message.into();
        self
    }

    /// Append a tier. Tiers must be added in ascending skill order.
    #[must_use]
    pub fn tier(mut self, tier: SubResourceTier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<SubResourceTable, CatalogError> {
        if self.tiers.is_empty() {
            return Err(CatalogError::EmptySubResourceTable(self.base));
        }

        let mut previous: Option<&SubResourceTier> = None;
        for (position, tier) in self.tiers.iter().enumerate() {
            if let Some(prev) = previous {
                if tier.min_skill < prev.min_skill {
                    return Err(CatalogError::TiersOutOfOrder {
                        material: tier.material.clone(),
                        min_skill: tier.min_skill,
                        previous: prev.min_skill,
                    });
                }
            }
            let seen_before = self
                .tiers
                .iter()
                .take(position)
                .any(|earlier| earlier.material == tier.material);
            if seen_before {
                return Err(CatalogError::DuplicateTier(tier.material.clone()));
            }
            previous = Some(tier);
        }

        let base = self
            .tiers
            .iter()
            .find(|tier| tier.material == self.base)
            .cloned()
            .ok_or(CatalogError::MissingBaseTier(self.base))?;

        Ok(SubResourceTable {
            base,
            display_name: self.display_name,
            material_missing_message: self.material_missing_message,
            tiers: self.tiers,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn metals() -> SubResourceTable {
        SubResourceTable::builder("IronIngot", "Iron")
            .tier(SubResourceTier::new("IronIngot", "Iron", dec!(0)))
            .tier(SubResourceTier::new("DullCopperIngot", "Dull Copper", dec!(65)).hue(Hue(0x973)))
            .tier(SubResourceTier::new("ShadowIronIngot", "Shadow Iron", dec!(70)).hue(Hue(0x966)))
            .tier(SubResourceTier::new("ValoriteIngot", "Valorite", dec!(99)).hue(Hue(0x8AB)))
            .tier(SubResourceTier::new("TitaniumIngot", "Titanium", dec!(99)))
            .build()
            .unwrap()
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let spec = ResourceSpec::new("IronIngot", "Iron Ingots", 0, "You have no ingots.");
        assert_eq!(spec.err(), Some(CatalogError::ZeroQuantity(ItemType::new("IronIngot"))));
    }

    #[test]
    fn resolve_picks_highest_qualified_tier() {
        let table = metals();
        assert_eq!(table.resolve(dec!(0)).material.as_str(), "IronIngot");
        assert_eq!(table.resolve(dec!(64.9)).material.as_str(), "IronIngot");
        assert_eq!(table.resolve(dec!(65)).material.as_str(), "DullCopperIngot");
        assert_eq!(table.resolve(dec!(72)).material.as_str(), "ShadowIronIngot");
        assert_eq!(table.resolve(dec!(120)).material.as_str(), "TitaniumIngot");
    }

    #[test]
    fn resolve_below_every_minimum_returns_base() {
        let table = SubResourceTable::builder("Granite", "Granite")
            .tier(SubResourceTier::new("Granite", "Granite", dec!(10)))
            .build()
            .unwrap();
        assert_eq!(table.resolve(dec!(0)).material.as_str(), "Granite");
    }

    #[test]
    fn check_material_distinguishes_family_and_skill() {
        let table = metals();
        let absent = table.check_material(&ItemType::new("Log"), dec!(100));
        assert_eq!(absent.err(), Some(SubResourceError::NotInFamily(ItemType::new("Log"))));

        let unskilled = table.check_material(&ItemType::new("ShadowIronIngot"), dec!(50));
        assert!(matches!(
            unskilled,
            Err(SubResourceError::InsufficientSkill { required, .. }) if required == dec!(70)
        ));

        let ok = table.check_material(&ItemType::new("ShadowIronIngot"), dec!(70));
        assert_eq!(ok.ok().map(|t| t.hue), Some(Some(Hue(0x966))));
    }

    #[test]
    fn builder_rejects_bad_tables() {
        let empty = SubResourceTable::builder("IronIngot", "Iron").build();
        assert!(matches!(empty, Err(CatalogError::EmptySubResourceTable(_))));

        let descending = SubResourceTable::builder("IronIngot", "Iron")
            .tier(SubResourceTier::new("IronIngot", "Iron", dec!(0)))
            .tier(SubResourceTier::new("GoldIngot", "Gold", dec!(85)))
            .tier(SubResourceTier::new("BronzeIngot", "Bronze", dec!(80)))
            .build();
        assert!(matches!(descending, Err(CatalogError::TiersOutOfOrder { .. })));

        let duplicate = SubResourceTable::builder("IronIngot", "Iron")
            .tier(SubResourceTier::new("IronIngot", "Iron", dec!(0)))
            .tier(SubResourceTier::new("IronIngot", "Iron again", dec!(10)))
            .build();
        assert!(matches!(duplicate, Err(CatalogError::DuplicateTier(_))));

        let baseless = SubResourceTable::builder("IronIngot", "Iron")
            .tier(SubResourceTier::new("GoldIngot", "Gold", dec!(0)))
            .build();
        assert!(matches!(baseless, Err(CatalogError::MissingBaseTier(_))));
    }

    #[test]
    fn equal_minimums_are_allowed() {
        let table = metals();
        assert_eq!(table.tiers().len(), 5);
        assert!(table.contains(&ItemType::new("ValoriteIngot")));
    }
}
