//! A scripted crafting session.
//!
//! One crafter repeats one recipe against in-memory host adapters until the
//! configured attempt count is reached or an attempt is rejected (out of
//! materials, tool worn out). Every station is in reach and every lore and
//! scroll recipe is learned, so the session exercises the success roll rather than the
//! ambient checks.

use std::collections::BTreeMap;
use std::sync::Arc;

use artisan_disciplines::god_crafting::FORGE_OF_THE_GODS;
use artisan_engine::config::SimulationConfig;
use artisan_engine::memory::{
    FixedQuality, InMemoryInventory, InMemorySkills, MessageLog, SimpleTool, SoundLog, StaticEnvironment,
};
use artisan_engine::{
    AttemptReport, AttemptRequest, ContextStore, CraftCatalog, CraftingConfig, DisciplineRegistry, EffectSink, EffectTimers,
    HostServices, SkillStore,
};
use artisan_types::{CrafterId, DisciplineId, ItemType, Lore, Position, QualityTier, SkillName, Station};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::RunnerError;

const SKILLS: [SkillName; 10] = [
    SkillName::Blacksmithy,
    SkillName::Cartography,
    SkillName::Alchemy,
    SkillName::Tinkering,
    SkillName::Carpentry,
    SkillName::Tailoring,
    SkillName::Cooking,
    SkillName::Magery,
    SkillName::Mining,
    SkillName::Inscription,
];

const STATIONS: [Station; 6] = [
    Station::Anvil,
    Station::Forge,
    Station::HeatSource,
    Station::Oven,
    Station::Loom,
    Station::Mill,
];

const LORE: [Lore; 4] = [Lore::Glassblowing, Lore::Masonry, Lore::SandMining, Lore::StoneMining];

/// What a session did, printed as JSON when it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Discipline crafted in.
    pub discipline: DisciplineId,
    /// Recipe target.
    pub recipe: ItemType,
    /// Attempts that passed validation.
    pub attempts: u32,
    /// Attempts that produced an item.
    pub successes: u32,
    /// Failed attempts that destroyed materials.
    pub lost_material: u32,
    /// Items by quality tier.
    pub quality: BTreeMap<QualityTier, u32>,
    /// Items carrying the maker's mark.
    pub marked: u32,
    /// Main-skill value when the session ended.
    pub final_skill: Decimal,
    /// Uses left on the tool.
    pub tool_uses: u32,
    /// What the crafter still holds.
    pub remaining: BTreeMap<ItemType, u32>,
    /// Sounds played by the effect timers.
    pub sounds_played: usize,
    /// Why the session stopped early, if it did.
    pub stopped: Option<String>,
}

impl SessionSummary {
    const fn new(discipline: DisciplineId, recipe: ItemType) -> Self {
        Self {
            discipline,
            recipe,
            attempts: 0,
            successes: 0,
            lost_material: 0,
            quality: BTreeMap::new(),
            marked: 0,
            final_skill: Decimal::ZERO,
            tool_uses: 0,
            remaining: BTreeMap::new(),
            sounds_played: 0,
            stopped: None,
        }
    }

    fn record(&mut self, report: &AttemptReport) {
        self.attempts = self.attempts.saturating_add(1);
        if report.lost_material {
            self.lost_material = self.lost_material.saturating_add(1);
        }
        if let Some(tier) = report.quality {
            self.successes = self.successes.saturating_add(1);
            let count = self.quality.entry(tier).or_insert(0);
            *count = count.saturating_add(1);
        }
        if report.makers_mark {
            self.marked = self.marked.saturating_add(1);
        }
    }
}

/// Run `simulation` against the discipline it names.
pub async fn run(
    registry: &DisciplineRegistry,
    crafting: &CraftingConfig,
    simulation: &SimulationConfig,
) -> Result<SessionSummary, RunnerError> {
    let discipline = registry.require(simulation.discipline)?;
    let engine = discipline.engine(crafting);
    let target = ItemType::new(simulation.recipe.as_str());
    let (index, recipe) = engine
        .catalog()
        .find(&target)
        .ok_or_else(|| RunnerError::UnknownRecipe {
            discipline: simulation.discipline,
            target: target.clone(),
        })?;
    let main_skill = engine.policy().profile().main_skill;

    let crafter = CrafterId::new();
    let mut inventory = InMemoryInventory::new();
    for (material, amount) in &simulation.stock {
        inventory.add(crafter, material.as_str(), *amount)?;
    }
    let mut skills = InMemorySkills::from_config(crafting);
    for skill in SKILLS {
        skills.set(crafter, skill, simulation.skill);
    }
    let mut tool = SimpleTool::new(crafter, simulation.tool_uses);
    let mut messenger = MessageLog::default();
    let environment = surroundings(simulation.discipline, engine.catalog());
    let mut quality = FixedQuality(simulation.quality);
    let sounds = Arc::new(SoundLog::default());
    let sink: Arc<dyn EffectSink + Send + Sync> = Arc::<SoundLog>::clone(&sounds);

    let mut contexts = ContextStore::new();
    {
        let context = contexts.get_or_insert(crafter, simulation.discipline);
        context.set_mark_option(simulation.mark);
        context.set_material(simulation.material.as_deref().map(ItemType::new));
    }

    info!(
        crafter = %crafter,
        discipline = %simulation.discipline,
        recipe = %target,
        chance = %engine.chance_for(recipe, simulation.skill),
        attempts = simulation.attempts,
        "session starting"
    );

    let mut rng = SmallRng::seed_from_u64(simulation.seed);
    let mut timers = EffectTimers::new();
    let mut summary = SessionSummary::new(simulation.discipline, target);

    for attempt in 0..simulation.attempts {
        let context = contexts.get_or_insert(crafter, simulation.discipline);
        let request = AttemptRequest::from_context(crafter, index, context);
        let mut host = HostServices {
            skills: &mut skills,
            inventory: &mut inventory,
            tool: &mut tool,
            messenger: &mut messenger,
            environment: &environment,
            effects: sounds.as_ref(),
            quality: &mut quality,
        };
        let report = match engine.attempt(&request, &mut host, &mut rng) {
            Ok(report) => report,
            Err(error) => {
                warn!(attempt, error = %error, "session stopped");
                summary.stopped = Some(error.to_string());
                break;
            }
        };

        debug!(
            attempt,
            failed = report.failed,
            quality = ?report.quality,
            consumed = report.consumed.len(),
            "attempt resolved"
        );
        summary.record(&report);
        timers.schedule(crafter, &report.effects, &sink);
        context.record_attempt(&report, engine.catalog());
    }

    timers.drain().await;

    summary.final_skill = skills.skill(crafter, main_skill);
    summary.tool_uses = tool.uses();
    summary.remaining = inventory
        .holdings(crafter)
        .map(|(material, amount)| (material.clone(), amount))
        .collect();
    summary.sounds_played = sounds.played().len();
    info!(
        attempts = summary.attempts,
        successes = summary.successes,
        messages = messenger.delivered().len(),
        "session finished"
    );
    Ok(summary)
}

/// Every station, lore, and scroll recipe of `catalog`, standing inside the
/// forge of the gods when the discipline needs it.
fn surroundings(discipline: DisciplineId, catalog: &CraftCatalog) -> StaticEnvironment {
    let mut environment = LORE
        .into_iter()
        .fold(StaticEnvironment::default(), StaticEnvironment::with_lore);
    for station in STATIONS {
        environment.add_station(station);
    }
    for recipe_id in catalog.iter().filter_map(|(_, recipe)| recipe.recipe_id) {
        environment.learn_recipe(recipe_id);
    }
    if discipline == DisciplineId::GodCrafting {
        environment.move_to(Some(Position {
            x: FORGE_OF_THE_GODS.min_x,
            y: FORGE_OF_THE_GODS.min_y,
        }));
    }
    environment
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artisan_engine::ArtisanConfig;

    use super::*;

    fn registry() -> DisciplineRegistry {
        artisan_disciplines::standard_registry().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn default_session_runs_to_completion() {
        let config = ArtisanConfig::default();
        let summary = run(&registry(), &config.crafting, &config.simulation).await.unwrap();
        assert_eq!(summary.discipline, DisciplineId::Tinkering);
        assert_eq!(summary.attempts, config.simulation.attempts);
        assert_eq!(summary.stopped, None);
    }

    #[tokio::test(start_paused = true)]
    async fn session_stops_when_materials_run_out() {
        let yaml = "
simulation:
  discipline: blacksmithy
  recipe: PlateGloves
  skill: 120
  attempts: 5
  stock:
    IronIngot: 12
  mark: mark
  quality: exceptional
";
        let config = ArtisanConfig::parse(yaml).unwrap();
        let summary = run(&registry(), &config.crafting, &config.simulation).await.unwrap();
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.successes, 1);
        assert_eq!(summary.marked, 1);
        assert!(summary.stopped.is_some());
        assert!(summary.remaining.is_empty());
        assert!(summary.sounds_played > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_recipe_is_an_error() {
        let mut config = ArtisanConfig::default();
        config.simulation.recipe = String::from("Teapot");
        let result = run(&registry(), &config.crafting, &config.simulation).await;
        assert!(matches!(result, Err(RunnerError::UnknownRecipe { .. })));
    }

    #[test]
    fn god_crafting_stands_in_the_forge() {
        let empty = CraftCatalog::new(DisciplineId::GodCrafting);
        let environment = surroundings(DisciplineId::GodCrafting, &empty);
        let crafter = CrafterId::new();
        let position = artisan_engine::Environment::position(&environment, crafter).unwrap();
        assert!(FORGE_OF_THE_GODS.contains(position));
        assert_eq!(
            artisan_engine::Environment::position(&surroundings(DisciplineId::Cooking, &empty), crafter),
            None
        );
    }

    #[test]
    fn scroll_recipes_are_known() {
        use artisan_engine::{RecipeDefinition, ResourceSpec, SkillWindow};

        let mut catalog = CraftCatalog::new(DisciplineId::Tinkering);
        catalog
            .add_recipe(RecipeDefinition::new(
                "Sextant",
                "Tools",
                "Sextant",
                SkillWindow::new(Decimal::ZERO, Decimal::ZERO).unwrap(),
                ResourceSpec::new("IronIngot", "Ingots", 2, "Not enough ingots.").unwrap(),
            ))
            .unwrap()
            .requires_recipe(450)
            .finish();
        let environment = surroundings(DisciplineId::Tinkering, &catalog);
        let crafter = CrafterId::new();
        assert!(artisan_engine::Environment::knows_recipe(&environment, crafter, 450));
        assert!(!artisan_engine::Environment::knows_recipe(&environment, crafter, 451));
    }
}
