//! In-memory host adapters.
//!
//! Simple implementations of every [`host`](crate::host) trait, backed by
//! ordered maps. The runner binary drives simulations with them, and they
//! double as test fixtures. All arithmetic is checked: quantities never
//! overflow or go negative, and skills never exceed their cap.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use artisan_types::{
    CrafterId, GainOutcome, ItemId, ItemType, Lore, Message, Position, QualityTier, SkillName, SoundId, Station,
    ToolId,
};
use rust_decimal::Decimal;

use crate::config::CraftingConfig;
use crate::error::HostError;
use crate::host::{CraftedItemSpec, EffectSink, Environment, Inventory, Messenger, QualityRoller, SkillStore, Tool};
use crate::recipe::RecipeDefinition;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Per-crafter material stacks plus a record of every crafted item.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    stacks: BTreeMap<CrafterId, BTreeMap<ItemType, u32>>,
    created: Vec<(ItemId, CraftedItemSpec)>,
}

impl InMemoryInventory {
    /// Empty inventories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `amount` units of `material` to `crafter`.
    pub fn add(&mut self, crafter: CrafterId, material: impl Into<ItemType>, amount: u32) -> Result<(), HostError> {
        let material = material.into();
        let entry = self.stacks.entry(crafter).or_default().entry(material).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| HostError::Rejected(String::from("stack quantity overflow")))?;
        Ok(())
    }

    /// Take every unit of `material` from `crafter`, returning how many there
    /// were.
    pub fn consume_all(&mut self, crafter: CrafterId, material: impl Into<ItemType>) -> u32 {
        let material = material.into();
        self.stacks
            .get_mut(&crafter)
            .and_then(|stacks| stacks.remove(&material))
            .unwrap_or(0)
    }

    /// Everything `crafter` holds.
    pub fn holdings(&self, crafter: CrafterId) -> impl Iterator<Item = (&ItemType, u32)> {
        self.stacks
            .get(&crafter)
            .into_iter()
            .flat_map(|stacks| stacks.iter().map(|(material, qty)| (material, *qty)))
    }

    /// Specs of every item created so far, oldest first.
    pub fn created(&self) -> Vec<&CraftedItemSpec> {
        self.created.iter().map(|(_, spec)| spec).collect()
    }

    /// What an item was created as.
    pub fn item(&self, id: ItemId) -> Option<&CraftedItemSpec> {
        self.created
            .iter()
            .find(|(created, _)| *created == id)
            .map(|(_, spec)| spec)
    }
}

impl Inventory for InMemoryInventory {
    fn quantity(&self, crafter: CrafterId, material: &ItemType) -> u32 {
        self.stacks
            .get(&crafter)
            .and_then(|stacks| stacks.get(material))
            .copied()
            .unwrap_or(0)
    }

    fn consume(&mut self, crafter: CrafterId, material: &ItemType, amount: u32) -> Result<(), HostError> {
        let available = self.quantity(crafter, material);
        let remaining = available.checked_sub(amount).ok_or_else(|| HostError::InsufficientStock {
            material: material.clone(),
            requested: amount,
            available,
        })?;
        if let Some(stacks) = self.stacks.get_mut(&crafter) {
            if remaining == 0 {
                stacks.remove(material);
            } else {
                stacks.insert(material.clone(), remaining);
            }
        }
        Ok(())
    }

    fn create_item(&mut self, spec: &CraftedItemSpec) -> Result<ItemId, HostError> {
        let id = ItemId::new();
        self.created.push((id, spec.clone()));
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// Skill values with a flat gain per use: full on success, half on failure.
#[derive(Debug, Clone)]
pub struct InMemorySkills {
    values: BTreeMap<(CrafterId, SkillName), Decimal>,
    gain: Decimal,
    cap: Decimal,
    log: Vec<(CrafterId, SkillName, GainOutcome)>,
}

impl InMemorySkills {
    /// A store gaining `gain` per successful use, capped at `cap`.
    pub const fn new(gain: Decimal, cap: Decimal) -> Self {
        Self {
            values: BTreeMap::new(),
            gain,
            cap,
            log: Vec::new(),
        }
    }

    /// A store using the configured gain and cap.
    pub const fn from_config(config: &CraftingConfig) -> Self {
        Self::new(config.skill_gain, config.skill_cap)
    }

    /// Set a skill outright, clamped to the cap.
    pub fn set(&mut self, crafter: CrafterId, skill: SkillName, value: Decimal) {
        self.values
            .insert((crafter, skill), value.clamp(Decimal::ZERO, self.cap));
    }

    /// Every gain event, oldest first.
    pub fn gains(&self) -> &[(CrafterId, SkillName, GainOutcome)] {
        &self.log
    }
}

impl SkillStore for InMemorySkills {
    fn skill(&self, crafter: CrafterId, skill: SkillName) -> Decimal {
        self.values.get(&(crafter, skill)).copied().unwrap_or(Decimal::ZERO)
    }

    fn grant_skill_gain(&mut self, crafter: CrafterId, skill: SkillName, outcome: GainOutcome) {
        self.log.push((crafter, skill, outcome));
        let step = match outcome {
            GainOutcome::Success => Some(self.gain),
            GainOutcome::Failure => self.gain.checked_div(Decimal::TWO),
        };
        let current = self.skill(crafter, skill);
        if let Some(next) = step.and_then(|step| current.checked_add(step)) {
            self.values.insert((crafter, skill), next.min(self.cap));
        }
    }
}

// ---------------------------------------------------------------------------
// Tool
// ---------------------------------------------------------------------------

/// A tool with a use counter, carried by one crafter.
#[derive(Debug, Clone)]
pub struct SimpleTool {
    id: ToolId,
    owner: CrafterId,
    uses: u32,
    on_person: bool,
    deleted: bool,
}

impl SimpleTool {
    /// A tool with `uses` uses, carried by `owner`.
    pub fn new(owner: CrafterId, uses: u32) -> Self {
        Self {
            id: ToolId::new(),
            owner,
            uses,
            on_person: true,
            deleted: false,
        }
    }

    /// Uses left.
    pub const fn uses(&self) -> u32 {
        self.uses
    }

    /// Put the tool down or pick it back up.
    pub const fn set_on_person(&mut self, on_person: bool) {
        self.on_person = on_person;
    }

    /// Remove the tool from the world.
    pub const fn delete(&mut self) {
        self.deleted = true;
    }
}

impl Tool for SimpleTool {
    fn id(&self) -> ToolId {
        self.id
    }

    fn uses_remaining(&self) -> u32 {
        self.uses
    }

    fn decrement_uses(&mut self) {
        self.uses = self.uses.saturating_sub(1);
    }

    fn is_on_person(&self, crafter: CrafterId) -> bool {
        self.on_person && crafter == self.owner
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

// ---------------------------------------------------------------------------
// Messages and sounds
// ---------------------------------------------------------------------------

/// Records every delivered message.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    delivered: Vec<(CrafterId, Message)>,
}

impl MessageLog {
    /// Messages in delivery order.
    pub fn delivered(&self) -> &[(CrafterId, Message)] {
        &self.delivered
    }

    /// Forget everything delivered so far.
    pub fn clear(&mut self) {
        self.delivered.clear();
    }
}

impl Messenger for MessageLog {
    fn deliver(&mut self, crafter: CrafterId, message: &Message) {
        self.delivered.push((crafter, message.clone()));
    }
}

/// Records every played sound. Shareable with effect timers.
#[derive(Debug, Default)]
pub struct SoundLog {
    played: Mutex<Vec<(CrafterId, SoundId)>>,
}

impl SoundLog {
    /// Sounds in play order.
    pub fn played(&self) -> Vec<(CrafterId, SoundId)> {
        self.played.lock().map(|played| played.clone()).unwrap_or_default()
    }
}

impl EffectSink for SoundLog {
    fn play_sound(&self, crafter: CrafterId, sound: SoundId) {
        if let Ok(mut played) = self.played.lock() {
            played.push((crafter, sound));
        }
    }
}

// ---------------------------------------------------------------------------
// Environment and quality
// ---------------------------------------------------------------------------

/// Fixed surroundings shared by every crafter.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    stations: BTreeMap<Station, u32>,
    lore: Vec<Lore>,
    recipes: BTreeSet<u32>,
    position: Option<Position>,
}

impl StaticEnvironment {
    /// Place `station` right next to the crafter.
    pub fn add_station(&mut self, station: Station) {
        self.add_station_at(station, 0);
    }

    /// Place `station` `distance` tiles away, keeping the nearest if already
    /// placed.
    pub fn add_station_at(&mut self, station: Station, distance: u32) {
        let entry = self.stations.entry(station).or_insert(distance);
        *entry = (*entry).min(distance);
    }

    /// Grant a lore flag.
    #[must_use]
    pub fn with_lore(mut self, lore: Lore) -> Self {
        if !self.lore.contains(&lore) {
            self.lore.push(lore);
        }
        self
    }

    /// Learn the scroll recipe `recipe_id`.
    pub fn learn_recipe(&mut self, recipe_id: u32) {
        self.recipes.insert(recipe_id);
    }

    /// Stand at `position`.
    #[must_use]
    pub const fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Move to `position`, or out of the world with `None`.
    pub const fn move_to(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl Environment for StaticEnvironment {
    fn is_near(&self, _crafter: CrafterId, station: Station, range: u32) -> bool {
        self.stations.get(&station).is_some_and(|distance| *distance <= range)
    }

    fn has_learned(&self, _crafter: CrafterId, lore: Lore) -> bool {
        self.lore.contains(&lore)
    }

    fn position(&self, _crafter: CrafterId) -> Option<Position> {
        self.position
    }

    fn knows_recipe(&self, _crafter: CrafterId, recipe_id: u32) -> bool {
        self.recipes.contains(&recipe_id)
    }
}

/// Always rolls the same quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedQuality(pub QualityTier);

impl QualityRoller for FixedQuality {
    fn roll_quality(&mut self, _crafter: CrafterId, _recipe: &RecipeDefinition, _skill: Decimal) -> QualityTier {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn consume_removes_empty_stacks() {
        let crafter = CrafterId::new();
        let mut inventory = InMemoryInventory::new();
        inventory.add(crafter, "IronIngot", 5).unwrap();

        inventory.consume(crafter, &ItemType::new("IronIngot"), 5).unwrap();
        assert_eq!(inventory.holdings(crafter).count(), 0);
    }

    #[test]
    fn consume_more_than_held_fails_without_change() {
        let crafter = CrafterId::new();
        let mut inventory = InMemoryInventory::new();
        inventory.add(crafter, "Log", 3).unwrap();

        let result = inventory.consume(crafter, &ItemType::new("Log"), 4);
        assert_eq!(
            result,
            Err(HostError::InsufficientStock {
                material: ItemType::new("Log"),
                requested: 4,
                available: 3,
            })
        );
        assert_eq!(inventory.quantity(crafter, &ItemType::new("Log")), 3);
    }

    #[test]
    fn add_overflow_is_rejected() {
        let crafter = CrafterId::new();
        let mut inventory = InMemoryInventory::new();
        inventory.add(crafter, "Cloth", u32::MAX).unwrap();
        assert!(inventory.add(crafter, "Cloth", 1).is_err());
        assert_eq!(inventory.quantity(crafter, &ItemType::new("Cloth")), u32::MAX);
    }

    #[test]
    fn skill_gain_halves_on_failure_and_caps() {
        let crafter = CrafterId::new();
        let mut skills = InMemorySkills::new(dec!(0.4), dec!(100));
        skills.set(crafter, SkillName::Tailoring, dec!(99.5));

        skills.grant_skill_gain(crafter, SkillName::Tailoring, GainOutcome::Failure);
        assert_eq!(skills.skill(crafter, SkillName::Tailoring), dec!(99.7));

        skills.grant_skill_gain(crafter, SkillName::Tailoring, GainOutcome::Success);
        assert_eq!(skills.skill(crafter, SkillName::Tailoring), dec!(100));
        assert_eq!(skills.gains().len(), 2);
    }

    #[test]
    fn tool_belongs_to_its_owner() {
        let owner = CrafterId::new();
        let mut tool = SimpleTool::new(owner, 1);
        assert!(tool.is_on_person(owner));
        assert!(!tool.is_on_person(CrafterId::new()));

        tool.decrement_uses();
        tool.decrement_uses();
        assert_eq!(tool.uses_remaining(), 0);

        tool.delete();
        assert!(tool.is_deleted());
    }

    #[test]
    fn stations_answer_within_range() {
        let crafter = CrafterId::new();
        let mut env = StaticEnvironment::default()
            .with_lore(Lore::Glassblowing)
            .at(Position { x: 1100, y: 1970 });
        env.add_station_at(Station::Forge, 3);

        assert!(env.is_near(crafter, Station::Forge, 3));
        assert!(!env.is_near(crafter, Station::Forge, 2));
        assert!(!env.is_near(crafter, Station::Anvil, 10));
        assert!(env.has_learned(crafter, Lore::Glassblowing));
        assert!(!env.has_learned(crafter, Lore::Masonry));
        assert_eq!(env.position(crafter), Some(Position { x: 1100, y: 1970 }));

        assert!(!env.knows_recipe(crafter, 500));
        env.learn_recipe(500);
        assert!(env.knows_recipe(crafter, 500));
        assert!(!env.knows_recipe(crafter, 501));
    }

    #[test]
    fn sound_log_records_in_order() {
        let crafter = CrafterId::new();
        let log = SoundLog::default();
        log.play_sound(crafter, SoundId(0x2A));
        log.play_sound(crafter, SoundId(0x23D));
        assert_eq!(log.played(), vec![(crafter, SoundId(0x2A)), (crafter, SoundId(0x23D))]);
    }
}
