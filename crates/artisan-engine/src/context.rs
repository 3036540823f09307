//! Per-crafter, per-discipline session memory.
//!
//! The crafting menu remembers what a crafter last made, with which
//! material, and their mark and colour preferences. Contexts live only as
//! long as the [`ContextStore`] holding them.

use std::collections::{BTreeMap, VecDeque};

use artisan_types::{CrafterId, DisciplineId, ItemType, MarkOption, Message};

use crate::catalog::CraftCatalog;
use crate::resolution::AttemptReport;

/// How many recently crafted items a context remembers.
pub const MAX_RECENT_ITEMS: usize = 10;

/// One crafter's memory of one discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CraftContext {
    recent: VecDeque<ItemType>,
    last_material: Option<ItemType>,
    last_category: Option<Message>,
    mark: MarkOption,
    do_not_color: bool,
}

impl CraftContext {
    /// An empty context with the default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recently crafted items, most recent first.
    pub fn recent_items(&self) -> impl Iterator<Item = &ItemType> {
        self.recent.iter()
    }

    /// The most recently crafted item.
    pub fn last_item(&self) -> Option<&ItemType> {
        self.recent.front()
    }

    /// Material chosen for the last successful attempt.
    pub const fn last_material(&self) -> Option<&ItemType> {
        self.last_material.as_ref()
    }

    /// Menu category of the last successful attempt.
    pub const fn last_category(&self) -> Option<&Message> {
        self.last_category.as_ref()
    }

    /// Maker's mark preference.
    pub const fn mark_option(&self) -> MarkOption {
        self.mark
    }

    /// Whether crafted items keep their default colour.
    pub const fn do_not_color(&self) -> bool {
        self.do_not_color
    }

    /// Change the mark preference.
    pub const fn set_mark_option(&mut self, mark: MarkOption) {
        self.mark = mark;
    }

    /// Change the colour preference.
    pub const fn set_do_not_color(&mut self, do_not_color: bool) {
        self.do_not_color = do_not_color;
    }

    /// Choose a material for the next attempt.
    pub fn set_material(&mut self, material: Option<ItemType>) {
        self.last_material = material;
    }

    /// Remember a crafted item, moving it to the front if already present.
    pub fn on_made(&mut self, item: ItemType) {
        self.recent.retain(|existing| *existing != item);
        self.recent.push_front(item);
        self.recent.truncate(MAX_RECENT_ITEMS);
    }

    /// Fold an attempt into the context. Only successful attempts are
    /// remembered.
    pub fn record_attempt(&mut self, report: &AttemptReport, catalog: &CraftCatalog) {
        if report.failed {
            return;
        }
        if let Some(recipe) = catalog.recipe(report.recipe) {
            self.last_category = Some(recipe.category.clone());
        }
        self.last_material = Some(report.material.clone());
        self.on_made(report.target.clone());
    }
}

/// Contexts for every crafter and discipline.
#[derive(Debug, Clone, Default)]
pub struct ContextStore {
    contexts: BTreeMap<(CrafterId, DisciplineId), CraftContext>,
}

impl ContextStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The context for `crafter` in `discipline`, if one exists.
    pub fn get(&self, crafter: CrafterId, discipline: DisciplineId) -> Option<&CraftContext> {
        self.contexts.get(&(crafter, discipline))
    }

    /// The context for `crafter` in `discipline`, created empty on first use.
    pub fn get_or_insert(&mut self, crafter: CrafterId, discipline: DisciplineId) -> &mut CraftContext {
        self.contexts.entry((crafter, discipline)).or_default()
    }

    /// Forget everything about `crafter`, e.g. on logout.
    pub fn remove_crafter(&mut self, crafter: CrafterId) -> usize {
        let before = self.contexts.len();
        self.contexts.retain(|(owner, _), _| *owner != crafter);
        before.saturating_sub(self.contexts.len())
    }

    /// Number of stored contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether no contexts are stored.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_types::QualityTier;
    use rust_decimal::Decimal;

    use super::*;
    use crate::recipe::{RecipeDefinition, RecipeIndex, SkillWindow};
    use crate::resource::ResourceSpec;

    fn report(target: &str, failed: bool) -> AttemptReport {
        AttemptReport {
            recipe: RecipeIndex(0),
            target: ItemType::new(target),
            material: ItemType::new("CopperIngot"),
            chance: Decimal::ONE,
            failed,
            lost_material: false,
            tool_broken: false,
            quality: (!failed).then_some(QualityTier::Normal),
            makers_mark: false,
            item: None,
            hue: None,
            consumed: Vec::new(),
            messages: Vec::new(),
            effects: Vec::new(),
        }
    }

    fn catalog() -> CraftCatalog {
        let mut catalog = CraftCatalog::new(DisciplineId::Tinkering);
        catalog
            .add_recipe(RecipeDefinition::new(
                "Spoon",
                "Utensils",
                "Spoon",
                SkillWindow::new(Decimal::ZERO, Decimal::ONE_HUNDRED).unwrap(),
                ResourceSpec::new("IronIngot", "Ingots", 1, "Not enough ingots.").unwrap(),
            ))
            .unwrap()
            .finish();
        catalog
    }

    #[test]
    fn recent_items_are_most_recent_first_without_duplicates() {
        let mut context = CraftContext::new();
        context.on_made(ItemType::new("Spoon"));
        context.on_made(ItemType::new("Fork"));
        context.on_made(ItemType::new("Spoon"));

        let recent: Vec<&str> = context.recent_items().map(ItemType::as_str).collect();
        assert_eq!(recent, vec!["Spoon", "Fork"]);
    }

    #[test]
    fn recent_items_are_bounded() {
        let mut context = CraftContext::new();
        for n in 0..15 {
            context.on_made(ItemType::new(format!("Item{n}")));
        }
        assert_eq!(context.recent_items().count(), MAX_RECENT_ITEMS);
        assert_eq!(context.last_item().map(ItemType::as_str), Some("Item14"));
    }

    #[test]
    fn only_successes_are_recorded() {
        let catalog = catalog();
        let mut context = CraftContext::new();
        context.record_attempt(&report("Spoon", true), &catalog);
        assert_eq!(context.last_item(), None);

        context.record_attempt(&report("Spoon", false), &catalog);
        assert_eq!(context.last_item().map(ItemType::as_str), Some("Spoon"));
        assert_eq!(context.last_material().map(ItemType::as_str), Some("CopperIngot"));
        assert_eq!(context.last_category(), Some(&Message::text("Utensils")));
    }

    #[test]
    fn store_is_keyed_by_crafter_and_discipline() {
        let mut store = ContextStore::new();
        let alice = CrafterId::new();
        let bob = CrafterId::new();

        store
            .get_or_insert(alice, DisciplineId::Tinkering)
            .set_mark_option(MarkOption::Mark);
        store.get_or_insert(alice, DisciplineId::Blacksmithy);
        store.get_or_insert(bob, DisciplineId::Tinkering);

        assert_eq!(
            store.get(alice, DisciplineId::Tinkering).map(CraftContext::mark_option),
            Some(MarkOption::Mark)
        );
        assert_eq!(
            store.get(bob, DisciplineId::Tinkering).map(CraftContext::mark_option),
            Some(MarkOption::DoNotMark)
        );
        assert_eq!(store.remove_crafter(alice), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get(alice, DisciplineId::Tinkering).is_none());
    }
}
