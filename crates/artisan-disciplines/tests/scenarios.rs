//! End-to-end attempts against the shipped disciplines, using the in-memory
//! host adapters.

#![allow(clippy::unwrap_used, clippy::panic, clippy::arithmetic_side_effects)]

use artisan_disciplines::metals::Metal;
use artisan_disciplines::standard_registry;
use artisan_engine::memory::{
    FixedQuality, InMemoryInventory, InMemorySkills, MessageLog, SimpleTool, SoundLog, StaticEnvironment,
};
use artisan_engine::{
    AttemptError, AttemptRequest, ConsumedResource, CraftingConfig, DisciplineRegistry, HostServices, Inventory,
    RecipeIndex, ResolutionEngine, ValidationKind,
};
use artisan_types::{CrafterId, DisciplineId, Hue, ItemType, MarkOption, Position, QualityTier, SkillName, Station};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

struct World {
    crafter: CrafterId,
    skills: InMemorySkills,
    inventory: InMemoryInventory,
    tool: SimpleTool,
    messages: MessageLog,
    environment: StaticEnvironment,
    sounds: SoundLog,
    quality: FixedQuality,
}

impl World {
    fn new(skill: SkillName, value: Decimal) -> Self {
        let crafter = CrafterId::new();
        let mut skills = InMemorySkills::new(dec!(0.1), dec!(125));
        skills.set(crafter, skill, value);
        Self {
            crafter,
            skills,
            inventory: InMemoryInventory::new(),
            tool: SimpleTool::new(crafter, 50),
            messages: MessageLog::default(),
            environment: StaticEnvironment::default(),
            sounds: SoundLog::default(),
            quality: FixedQuality(QualityTier::Normal),
        }
    }

    fn give(&mut self, material: &str, amount: u32) {
        self.inventory.add(self.crafter, material, amount).unwrap();
    }

    fn held(&self, material: &str) -> u32 {
        self.inventory.quantity(self.crafter, &ItemType::new(material))
    }

    fn holdings(&self) -> Vec<(ItemType, u32)> {
        let mut holdings: Vec<(ItemType, u32)> = self
            .inventory
            .holdings(self.crafter)
            .map(|(material, amount)| (material.clone(), amount))
            .collect();
        holdings.sort();
        holdings
    }

    fn host(&mut self) -> HostServices<'_> {
        HostServices {
            skills: &mut self.skills,
            inventory: &mut self.inventory,
            tool: &mut self.tool,
            messenger: &mut self.messages,
            environment: &self.environment,
            effects: &self.sounds,
            quality: &mut self.quality,
        }
    }
}

fn registry() -> DisciplineRegistry {
    standard_registry().unwrap()
}

fn engine(registry: &DisciplineRegistry, id: DisciplineId) -> ResolutionEngine<'_> {
    registry.engine(id, &CraftingConfig::default()).unwrap()
}

fn index_of(engine: &ResolutionEngine<'_>, target: &str) -> RecipeIndex {
    engine.catalog().find(&ItemType::new(target)).unwrap().0
}

fn chance(engine: &ResolutionEngine<'_>, target: &str, skill: Decimal) -> Decimal {
    let (_, recipe) = engine.catalog().find(&ItemType::new(target)).unwrap();
    engine.chance_for(recipe, skill)
}

// ---------------------------------------------------------------------------
// Chance ramps
// ---------------------------------------------------------------------------

#[test]
fn plate_ramps_from_zero_floor() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    assert_eq!(chance(&tinkering, "Plate", dec!(0)), dec!(0));
    assert_eq!(chance(&tinkering, "Plate", dec!(25)), dec!(0.5));
    assert_eq!(chance(&tinkering, "Plate", dec!(50)), dec!(1));
}

#[test]
fn god_crafting_starts_at_an_even_chance() {
    let registry = registry();
    let god = engine(&registry, DisciplineId::GodCrafting);
    assert_eq!(chance(&god, "AmethystPlateArms", dec!(89.9)), dec!(0));
    assert_eq!(chance(&god, "AmethystPlateArms", dec!(90)), dec!(0.5));
    assert_eq!(chance(&god, "AmethystPlateArms", dec!(125)), dec!(1));
}

#[test]
fn eternal_key_is_capped() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    assert_eq!(chance(&tinkering, "EternalKey", dec!(90)), dec!(0.20));
    assert_eq!(chance(&tinkering, "EternalKey", dec!(120)), dec!(0.35));
}

#[test]
fn chance_never_falls_as_skill_rises() {
    let registry = registry();
    for discipline in registry.iter() {
        let engine = engine(&registry, discipline.id());
        for (_, recipe) in discipline.catalog().iter() {
            let mut previous = Decimal::ZERO;
            let mut skill = Decimal::ZERO;
            while skill <= dec!(130) {
                let current = engine.chance_for(recipe, skill);
                assert!(
                    current >= previous,
                    "{} {} fell from {previous} to {current} at {skill}",
                    discipline.id(),
                    recipe.target
                );
                assert!(current >= Decimal::ZERO && current <= Decimal::ONE);
                previous = current;
                skill += dec!(0.5);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Attempts
// ---------------------------------------------------------------------------

#[test]
fn assemblies_always_succeed() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(0));
    world.give("Axle", 5);
    world.give("Gears", 5);
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..5 {
        let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "AxleGears"));
        let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();
        assert!(!report.failed);
        assert_eq!(report.chance, dec!(1));
    }
    assert_eq!(world.held("Axle"), 0);
    assert_eq!(world.held("Gears"), 0);
}

#[test]
fn unworkable_metal_is_rejected_before_anything_is_spent() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(80));
    world.give(&Metal::Valorite.ingot().to_string(), 10);
    let before = world.holdings();
    let mut rng = SmallRng::seed_from_u64(1);

    let request =
        AttemptRequest::new(world.crafter, index_of(&tinkering, "Scissors")).material(Metal::Valorite.ingot());
    let error = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap_err();

    assert!(matches!(error, AttemptError::InsufficientSkillForMaterial { .. }));
    assert_eq!(world.holdings(), before);
    assert_eq!(world.tool.uses(), 50);
    assert!(world.skills.gains().is_empty());
    assert_eq!(world.messages.delivered().len(), 1);
}

#[test]
fn gold_goblet_keeps_its_colour_and_mark() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(100));
    world.quality = FixedQuality(QualityTier::Exceptional);
    world.give("GoldIngot", 4);
    let mut rng = SmallRng::seed_from_u64(3);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Goblet"))
        .material("GoldIngot")
        .mark(MarkOption::Mark);
    let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();

    assert!(!report.failed);
    assert_eq!(report.hue, Some(Hue(0x8A5)));
    assert!(report.makers_mark);
    assert_eq!(report.quality, Some(QualityTier::Exceptional));
    assert_eq!(world.held("GoldIngot"), 2);

    let item = world.inventory.item(report.item.unwrap()).unwrap();
    assert_eq!(item.maker, Some(world.crafter));
    assert_eq!(item.hue, Some(Hue(0x8A5)));
}

#[test]
fn eternal_keys_can_be_made_at_the_magery_minimum() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(120));
    world.skills.set(world.crafter, SkillName::Magery, dec!(90));
    world.tool = SimpleTool::new(world.crafter, 1_000);
    world.give("PlatinumIngot", 2_000);
    world.give("GoldIngot", 800);
    world.give("ArcaneGem", 200);
    let mut rng = SmallRng::seed_from_u64(11);
    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "EternalKey"));

    let mut made = 0;
    for _ in 0..200 {
        let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();
        assert_eq!(report.chance, dec!(0.35));
        if !report.failed {
            made += 1;
        }
    }
    // 0.35 for Tinkering times 0.20 for Magery.
    assert!(made > 0, "no key in 200 attempts");
    assert!(made < 60, "{made} keys in 200 attempts");
}

#[test]
fn cooks_never_sign_their_food() {
    let registry = registry();
    let cooking = engine(&registry, DisciplineId::Cooking);
    let mut world = World::new(SkillName::Cooking, dec!(100));
    world.quality = FixedQuality(QualityTier::Exceptional);
    world.environment.add_station(Station::HeatSource);
    world.give("Eggs", 1);
    let mut rng = SmallRng::seed_from_u64(5);

    let request = AttemptRequest::new(world.crafter, index_of(&cooking, "FriedEggs")).mark(MarkOption::Mark);
    let report = cooking.attempt(&request, &mut world.host(), &mut rng).unwrap();

    assert!(!report.failed);
    assert_eq!(report.quality, Some(QualityTier::Exceptional));
    assert!(!report.makers_mark);
    let item = world.inventory.item(report.item.unwrap()).unwrap();
    assert_eq!(item.maker, None);
}

#[test]
fn do_not_color_leaves_the_item_plain() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(100));
    world.give("GoldIngot", 2);
    let mut rng = SmallRng::seed_from_u64(3);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Goblet"))
        .material("GoldIngot")
        .do_not_color(true);
    let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();
    assert_eq!(report.hue, None);
}

#[test]
fn smithing_without_a_forge_spends_nothing() {
    let registry = registry();
    let smithing = engine(&registry, DisciplineId::Blacksmithy);
    let mut world = World::new(SkillName::Blacksmithy, dec!(100));
    world.give("IronIngot", 30);
    world.environment.add_station(Station::Anvil);
    let before = world.holdings();
    let mut rng = SmallRng::seed_from_u64(5);

    let request = AttemptRequest::new(world.crafter, index_of(&smithing, "Dagger"));
    let error = smithing.attempt(&request, &mut world.host(), &mut rng).unwrap_err();

    let AttemptError::Validation(failure) = error else {
        panic!("expected a validation failure, got {error:?}");
    };
    assert_eq!(failure.kind, ValidationKind::AmbientRequirement);
    assert_eq!(world.holdings(), before);
    assert_eq!(world.tool.uses(), 50);
}

#[test]
fn success_consumes_every_line_exactly() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(80));
    world.give("BolaBall", 6);
    world.give("Leather", 5);
    let mut rng = SmallRng::seed_from_u64(11);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Bola"));
    let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();

    assert!(!report.failed);
    assert_eq!(
        report.consumed,
        vec![
            ConsumedResource {
                material: ItemType::new("BolaBall"),
                quantity: 4
            },
            ConsumedResource {
                material: ItemType::new("Leather"),
                quantity: 3
            },
        ]
    );
    assert_eq!(world.held("BolaBall"), 2);
    assert_eq!(world.held("Leather"), 2);
}

#[test]
fn missing_secondary_material_spends_nothing() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(80));
    world.give("BolaBall", 6);
    world.give("Leather", 2);
    let before = world.holdings();
    let mut rng = SmallRng::seed_from_u64(11);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Bola"));
    let error = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap_err();

    assert!(matches!(
        error,
        AttemptError::InsufficientResource {
            required: 3,
            available: 2,
            ..
        }
    ));
    assert_eq!(world.holdings(), before);
}

#[test]
fn failure_rolls_no_quality() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(0));
    world.give("IronIngot", 10);
    let mut rng = SmallRng::seed_from_u64(13);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Scales"));
    let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();

    assert!(report.failed);
    assert_eq!(report.chance, dec!(0));
    assert_eq!(report.quality, None);
    assert_eq!(report.item, None);
    assert!(!report.makers_mark);
    assert!(world.inventory.created().is_empty());
}

#[test]
fn chosen_tier_is_the_material_spent() {
    let registry = registry();
    let tinkering = engine(&registry, DisciplineId::Tinkering);
    let mut world = World::new(SkillName::Tinkering, dec!(80));
    world.give("IronIngot", 10);
    world.give("CopperIngot", 10);
    let mut rng = SmallRng::seed_from_u64(17);

    let request = AttemptRequest::new(world.crafter, index_of(&tinkering, "Scissors")).material("CopperIngot");
    let report = tinkering.attempt(&request, &mut world.host(), &mut rng).unwrap();

    assert_eq!(report.material, ItemType::new("CopperIngot"));
    assert_eq!(report.hue, None);
    assert_eq!(world.held("IronIngot"), 10);
    assert_eq!(world.held("CopperIngot"), 8);
}

#[test]
fn god_crafting_only_inside_the_forge_room() {
    let registry = registry();
    let god = engine(&registry, DisciplineId::GodCrafting);
    let mut world = World::new(SkillName::Blacksmithy, dec!(125));
    world.give("RubyIngot", 40);
    let mut rng = SmallRng::seed_from_u64(19);
    let request = AttemptRequest::new(world.crafter, index_of(&god, "RubyPlateHelm"));

    world.environment.move_to(Some(Position { x: 1_000, y: 1_000 }));
    assert!(god.attempt(&request, &mut world.host(), &mut rng).is_err());
    assert_eq!(world.held("RubyIngot"), 40);

    world.environment.move_to(Some(Position { x: 1_110, y: 1_970 }));
    let report = god.attempt(&request, &mut world.host(), &mut rng).unwrap();
    assert!(!report.failed);
    assert_eq!(world.held("RubyIngot"), 25);
}

#[test]
fn cooking_needs_the_oven() {
    let registry = registry();
    let cooking = engine(&registry, DisciplineId::Cooking);
    let mut world = World::new(SkillName::Cooking, dec!(100));
    world.give("Dough", 1);
    let mut rng = SmallRng::seed_from_u64(23);
    let request = AttemptRequest::new(world.crafter, index_of(&cooking, "BreadLoaf"));

    let error = cooking.attempt(&request, &mut world.host(), &mut rng).unwrap_err();
    assert!(matches!(error, AttemptError::Validation(_)));
    assert_eq!(world.held("Dough"), 1);

    world.environment.add_station(Station::Oven);
    let report = cooking.attempt(&request, &mut world.host(), &mut rng).unwrap();
    assert!(!report.failed);
    assert_eq!(world.held("Dough"), 0);
    assert!(world.sounds.played().is_empty());
}
