//! The per-discipline recipe catalog.
//!
//! A [`CraftCatalog`] is built once when its discipline initialises: recipes
//! are appended with [`CraftCatalog::add_recipe`], which hands back a
//! [`RecipeBuilder`] for attaching secondary resources, secondary skills,
//! and flags to the recipe just added. Sub-resource tables are registered
//! alongside. After the registry is assembled the catalog is only read.

use std::collections::BTreeMap;
use std::iter::FusedIterator;

use artisan_types::{DisciplineId, Hue, ItemType, Message, SkillName};
use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::recipe::{RecipeDefinition, RecipeIndex, SkillRequirement, SkillWindow, StationRequirement};
use crate::resource::{ResourceSpec, SubResourceTable};

// ---------------------------------------------------------------------------
// CraftCatalog
// ---------------------------------------------------------------------------

/// Recipes and sub-resource tables for one discipline.
#[derive(Debug, Clone)]
pub struct CraftCatalog {
    discipline: DisciplineId,
    recipes: Vec<RecipeDefinition>,
    by_target: BTreeMap<ItemType, RecipeIndex>,
    sub_resources: BTreeMap<ItemType, SubResourceTable>,
}

impl CraftCatalog {
    /// An empty catalog for `discipline`.
    pub const fn new(discipline: DisciplineId) -> Self {
        Self {
            discipline,
            recipes: Vec::new(),
            by_target: BTreeMap::new(),
            sub_resources: BTreeMap::new(),
        }
    }

    /// The discipline this catalog belongs to.
    pub const fn discipline(&self) -> DisciplineId {
        self.discipline
    }

    // -- construction ------------------------------------------------------

    /// Append a recipe and return a builder bound to it.
    ///
    /// Fails with [`CatalogError::DuplicateRecipe`] if a recipe for the same
    /// target already exists.
    pub fn add_recipe(&mut self, definition: RecipeDefinition) -> Result<RecipeBuilder<'_>, CatalogError> {
        if self.by_target.contains_key(&definition.target) {
            return Err(CatalogError::DuplicateRecipe(definition.target));
        }
        let index = RecipeIndex(self.recipes.len());
        self.by_target.insert(definition.target.clone(), index);
        self.recipes.push(definition);
        let recipe = self.recipe_mut(index)?;
        Ok(RecipeBuilder { recipe, index })
    }

    /// Attach a secondary resource to an existing recipe.
    pub fn add_secondary_resource(&mut self, index: RecipeIndex, spec: ResourceSpec) -> Result<(), CatalogError> {
        self.recipe_mut(index)?.secondary_resources.push(spec);
        Ok(())
    }

    /// Attach a secondary skill to an existing recipe.
    pub fn add_secondary_skill(&mut self, index: RecipeIndex, requirement: SkillRequirement) -> Result<(), CatalogError> {
        self.recipe_mut(index)?.secondary_skills.push(requirement);
        Ok(())
    }

    /// Set whether a successful attempt consumes the whole primary stack.
    pub fn set_use_all_resource(&mut self, index: RecipeIndex, use_all: bool) -> Result<(), CatalogError> {
        self.recipe_mut(index)?.use_all_resource = use_all;
        Ok(())
    }

    /// Require the crafter to stand near a station.
    pub fn set_required_station(&mut self, index: RecipeIndex, station: StationRequirement) -> Result<(), CatalogError> {
        self.recipe_mut(index)?.required_station = Some(station);
        Ok(())
    }

    /// Register a sub-resource table keyed by its base material.
    pub fn add_sub_resource_table(&mut self, table: SubResourceTable) -> Result<(), CatalogError> {
        let base = table.base().clone();
        if self.sub_resources.contains_key(&base) {
            return Err(CatalogError::DuplicateSubResource(base));
        }
        self.sub_resources.insert(base, table);
        Ok(())
    }

    fn recipe_mut(&mut self, index: RecipeIndex) -> Result<&mut RecipeDefinition, CatalogError> {
        let len = self.recipes.len();
        self.recipes
            .get_mut(index.0)
            .ok_or(CatalogError::UnknownRecipeIndex { index: index.0, len })
    }

    // -- queries -----------------------------------------------------------

    /// The recipe at `index`.
    pub fn recipe(&self, index: RecipeIndex) -> Option<&RecipeDefinition> {
        self.recipes.get(index.0)
    }

    /// The recipe producing `target`.
    pub fn find(&self, target: &ItemType) -> Option<(RecipeIndex, &RecipeDefinition)> {
        let index = *self.by_target.get(target)?;
        self.recipe(index).map(|recipe| (index, recipe))
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// All recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecipeIndex, &RecipeDefinition)> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(position, recipe)| (RecipeIndex(position), recipe))
    }

    /// Recipes grouped by category, categories in first-seen order and
    /// recipes in insertion order within each group.
    ///
    /// The iterator is lazy and finite; call again to restart.
    pub fn iter_by_category(&self) -> CategoryGroups<'_> {
        CategoryGroups {
            recipes: self.recipes.as_slice(),
            cursor: 0,
        }
    }

    /// Recipes whose window minimum `skill` meets.
    pub fn craftable_at(&self, skill: Decimal) -> impl Iterator<Item = (RecipeIndex, &RecipeDefinition)> {
        self.iter().filter(move |(_, recipe)| recipe.skill_window.min <= skill)
    }

    /// The sub-resource table with base material `base`.
    pub fn sub_resource(&self, base: &ItemType) -> Option<&SubResourceTable> {
        self.sub_resources.get(base)
    }

    /// The table a recipe draws its primary material from, if any.
    pub fn sub_resource_for(&self, recipe: &RecipeDefinition) -> Option<&SubResourceTable> {
        self.sub_resource(&recipe.primary_resource.material)
    }

    /// All registered sub-resource tables, ordered by base material.
    pub fn sub_resources(&self) -> impl Iterator<Item = &SubResourceTable> {
        self.sub_resources.values()
    }

    /// Colour of `material` according to any registered table.
    pub fn hue_of(&self, material: &ItemType) -> Option<Hue> {
        self.sub_resources
            .values()
            .find_map(|table| table.tier_for(material))
            .and_then(|tier| tier.hue)
    }
}

// ---------------------------------------------------------------------------
// RecipeBuilder
// ---------------------------------------------------------------------------

/// Handle to the recipe most recently passed to
/// [`CraftCatalog::add_recipe`].
#[derive(Debug)]
pub struct RecipeBuilder<'c> {
    recipe: &'c mut RecipeDefinition,
    index: RecipeIndex,
}

impl RecipeBuilder<'_> {
    /// The recipe's index in the catalog.
    pub const fn index(&self) -> RecipeIndex {
        self.index
    }

    /// Attach a secondary resource.
    #[must_use]
    pub fn add_secondary_resource(self, spec: ResourceSpec) -> Self {
        self.recipe.secondary_resources.push(spec);
        self
    }

    /// Attach a secondary skill.
    #[must_use]
    pub fn add_secondary_skill(self, skill: SkillName, window: SkillWindow) -> Self {
        self.recipe.secondary_skills.push(SkillRequirement { skill, window });
        self
    }

    /// Consume the whole held stack of the primary material on success.
    #[must_use]
    pub const fn use_all_resource(self) -> Self {
        self.recipe.use_all_resource = true;
        self
    }

    /// Require the crafter to stand near a station.
    #[must_use]
    pub fn requires_station(self, station: StationRequirement) -> Self {
        self.recipe.required_station = Some(station);
        self
    }

    /// Gate the recipe behind a learned recipe id.
    #[must_use]
    pub const fn requires_recipe(self, recipe_id: u32) -> Self {
        self.recipe.recipe_id = Some(recipe_id);
        self
    }

    /// Release the catalog borrow, returning the recipe's index.
    pub const fn finish(self) -> RecipeIndex {
        self.index
    }
}

// ---------------------------------------------------------------------------
// CategoryGroups
// ---------------------------------------------------------------------------

/// Iterator returned by [`CraftCatalog::iter_by_category`].
#[derive(Debug, Clone)]
pub struct CategoryGroups<'c> {
    recipes: &'c [RecipeDefinition],
    cursor: usize,
}

impl<'c> Iterator for CategoryGroups<'c> {
    type Item = (&'c Message, Vec<&'c RecipeDefinition>);

    fn next(&mut self) -> Option<Self::Item> {
        let recipes = self.recipes;
        // Skip recipes whose category was already emitted by an earlier group.
        while let Some(candidate) = recipes.get(self.cursor) {
            let start = self.cursor;
            self.cursor = self.cursor.saturating_add(1);
            let seen = recipes
                .iter()
                .take(start)
                .any(|earlier| earlier.category == candidate.category);
            if seen {
                continue;
            }
            let members = recipes
                .iter()
                .skip(start)
                .filter(|recipe| recipe.category == candidate.category)
                .collect();
            return Some((&candidate.category, members));
        }
        None
    }
}

impl FusedIterator for CategoryGroups<'_> {}
