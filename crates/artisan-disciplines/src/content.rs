//! Helpers for writing recipe tables.
//!
//! Skill values in the tables are written in tenths of a point so windows
//! such as 44.9 to 74.9 stay exact without decimal literals.

use artisan_engine::{CatalogError, CraftCatalog, RecipeDefinition, ResourceSpec, SkillWindow, StationRequirement};
use artisan_types::{Message, Station};
use rust_decimal::Decimal;

/// A skill value given in tenths of a point.
pub(crate) fn tenths(value: i64) -> Decimal {
    Decimal::new(value, 1)
}

/// A window from `min` to `max`, both in tenths.
pub(crate) fn window(min: i64, max: i64) -> Result<SkillWindow, CatalogError> {
    SkillWindow::new(tenths(min), tenths(max))
}

/// A station within `range` tiles.
pub(crate) fn near(station: Station, range: u32, message: impl Into<Message>) -> StationRequirement {
    StationRequirement {
        station,
        range,
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Single-material tables
// ---------------------------------------------------------------------------

/// A material shared by every row of a table.
#[derive(Debug, Clone)]
pub(crate) struct Material {
    item: &'static str,
    name: Message,
    missing: Message,
}

impl Material {
    pub(crate) fn new(item: &'static str, name: impl Into<Message>, missing: impl Into<Message>) -> Self {
        Self {
            item,
            name: name.into(),
            missing: missing.into(),
        }
    }

    /// `quantity` units of this material as a resource line.
    pub(crate) fn spec(&self, quantity: u32) -> Result<ResourceSpec, CatalogError> {
        ResourceSpec::new(self.item, self.name.clone(), quantity, self.missing.clone())
    }
}

/// One recipe drawing on a single material.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Row {
    pub target: &'static str,
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
    pub quantity: u32,
}

pub(crate) const fn row(target: &'static str, name: &'static str, min: i64, max: i64, quantity: u32) -> Row {
    Row {
        target,
        name,
        min,
        max,
        quantity,
    }
}

impl Row {
    pub(crate) fn definition(&self, category: &Message, material: &Material) -> Result<RecipeDefinition, CatalogError> {
        Ok(RecipeDefinition::new(
            self.target,
            category.clone(),
            self.name,
            window(self.min, self.max)?,
            material.spec(self.quantity)?,
        ))
    }
}

/// Add one recipe per row, all in `category` and all drawing on `material`.
pub(crate) fn add_rows(
    catalog: &mut CraftCatalog,
    category: &Message,
    material: &Material,
    rows: &[Row],
) -> Result<(), CatalogError> {
    for row in rows {
        catalog.add_recipe(row.definition(category, material)?)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Multi-part tables
// ---------------------------------------------------------------------------

/// A recipe built from several named parts. The first part is primary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mixture {
    pub target: &'static str,
    pub name: &'static str,
    pub min: i64,
    pub max: i64,
    pub parts: &'static [(&'static str, u32)],
}

pub(crate) const fn mixture(
    target: &'static str,
    name: &'static str,
    min: i64,
    max: i64,
    parts: &'static [(&'static str, u32)],
) -> Mixture {
    Mixture {
        target,
        name,
        min,
        max,
        parts,
    }
}

/// Add every mixture in `category`. Parts are labelled by item name and
/// share one missing-material message. A mixture with no parts is skipped.
pub(crate) fn add_mixtures(
    catalog: &mut CraftCatalog,
    category: &Message,
    missing: &Message,
    station: Option<&StationRequirement>,
    rows: &[Mixture],
) -> Result<(), CatalogError> {
    let part = |item: &'static str, quantity: u32| ResourceSpec::new(item, item, quantity, missing.clone());
    for mixture in rows {
        let mut parts = mixture.parts.iter();
        let Some(&(primary, quantity)) = parts.next() else {
            continue;
        };
        let definition = RecipeDefinition::new(
            mixture.target,
            category.clone(),
            mixture.name,
            window(mixture.min, mixture.max)?,
            part(primary, quantity)?,
        );
        let mut builder = catalog.add_recipe(definition)?;
        for &(item, quantity) in parts {
            builder = builder.add_secondary_resource(part(item, quantity)?);
        }
        if let Some(station) = station {
            builder = builder.requires_station(station.clone());
        }
        builder.finish();
    }
    Ok(())
}
