//! Game engine - orchestrates phases, owns the colony, evaluates win/lose.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::config::GameConfig;
use crate::persistence::{self, SaveError};
use crate::state::{GamePhase, GameState};
use crate::systems::*;

/// Turns the colony must survive to win.
const VICTORY_TURN: u32 = 10;
/// Minimum roster size for the victory check.
const VICTORY_ROSTER: usize = 3;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Victory,
    /// Food or oxygen ran out.
    ResourcesDepleted,
    /// The roster is empty.
    ColonyLost,
}

impl GameOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            GameOutcome::Victory => "Your colony has thrived!",
            GameOutcome::ResourcesDepleted => {
                "Your colony has run out of essential resources."
            }
            GameOutcome::ColonyLost => "All colonists have perished.",
        }
    }
}

/// What a single `step` did, for the client to render.
#[derive(Debug, Clone)]
pub enum StepReport {
    Setup,
    Production(ProductionReport),
    Event(EventReport),
    /// `None` when the operator took no action this phase.
    Management(Option<ActionOutcome>),
    End,
}

/// Main game engine.
///
/// Owns the ECS world, the resource ledger and the ordered building and
/// roster lists. Everything runs on the caller's thread; phase order and
/// entity iteration order are fixed by these lists.
pub struct GameEngine {
    /// ECS world containing buildings and colonists
    pub world: World,
    /// Phase machine and turn scalars
    pub state: GameState,
    /// The colony's resource store
    pub ledger: ResourceLedger,
    /// Event registry; replaceable for deterministic tests
    pub resolver: EventResolver,
    /// Runtime configuration
    pub config: GameConfig,
    buildings: Vec<Entity>,
    roster: Vec<Entity>,
    outcome: Option<GameOutcome>,
    rng: StdRng,
}

impl GameEngine {
    /// New game with an entropy-seeded roll source.
    pub fn new(config: GameConfig) -> Self {
        Self::build(config, StdRng::from_entropy())
    }

    /// New game with a fixed seed, for reproducible runs and tests.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, rng: StdRng) -> Self {
        let mut engine = Self {
            world: World::new(),
            state: GameState::new(),
            ledger: ResourceLedger::new(),
            resolver: EventResolver::new(),
            config,
            buildings: Vec::new(),
            roster: Vec::new(),
            outcome: None,
            rng,
        };
        engine.setup_colony();
        engine
    }

    /// Spawn the founding cast: three colonists and two buildings.
    fn setup_colony(&mut self) {
        self.spawn_colonist(Name::new("Alex", "Chen"), Specialization::Engineer);
        self.spawn_colonist(Name::new("Maria", "Santos"), Specialization::Scientist);
        self.spawn_colonist(Name::new("James", "Wilson"), Specialization::Farmer);

        self.spawn_building(BuildingKind::SolarPanel);
        self.spawn_building(BuildingKind::Greenhouse);

        log::info!(
            "colony established: {} colonists, {} buildings, difficulty {}",
            self.roster.len(),
            self.buildings.len(),
            self.config.difficulty
        );
    }

    fn spawn_colonist(&mut self, name: Name, specialization: Specialization) -> Entity {
        let entity = self.world.spawn((name, Colonist::new(specialization)));
        self.roster.push(entity);
        self.state.set_colonist_count(self.roster.len() as u32);
        entity
    }

    fn spawn_building(&mut self, kind: BuildingKind) -> Entity {
        let entity = self.world.spawn((Building::new(kind),));
        self.buildings.push(entity);
        entity
    }

    /// Execute the current phase's side effects, advance the phase, then
    /// evaluate termination. Phase errors are reported and logged, never
    /// fatal; the cycle always proceeds.
    pub fn step(&mut self, action: Option<ManagementAction>) -> StepReport {
        let report = match self.state.phase() {
            GamePhase::Setup => StepReport::Setup,
            GamePhase::Production => {
                let report = production_system(
                    &mut self.world,
                    &self.buildings,
                    &self.roster,
                    &mut self.ledger,
                );
                if let Some(err) = &report.shortfall {
                    log::warn!("upkeep skipped this turn: {}", err);
                }
                StepReport::Production(report)
            }
            GamePhase::Event => StepReport::Event(event_system(
                &self.world,
                &self.roster,
                &mut self.ledger,
                &self.resolver,
                &mut self.rng,
            )),
            GamePhase::Management => StepReport::Management(action.map(|action| {
                management_system(
                    &mut self.world,
                    &mut self.buildings,
                    &self.roster,
                    &mut self.ledger,
                    action,
                )
            })),
            GamePhase::End => StepReport::End,
        };

        self.state.next_phase();
        self.evaluate_conditions();
        report
    }

    /// Win/lose evaluation, in priority order; the first match ends the game.
    fn evaluate_conditions(&mut self) {
        if !self.state.is_running() {
            return;
        }

        let outcome = if self.state.turn() >= VICTORY_TURN && self.roster.len() >= VICTORY_ROSTER
        {
            GameOutcome::Victory
        } else if self.ledger.get(ResourceType::Food) <= 0
            || self.ledger.get(ResourceType::Oxygen) <= 0
        {
            GameOutcome::ResourcesDepleted
        } else if self.roster.is_empty() {
            GameOutcome::ColonyLost
        } else {
            return;
        };

        log::info!("game over on turn {}: {}", self.state.turn(), outcome.message());
        self.outcome = Some(outcome);
        self.state.end_game();
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn buildings(&self) -> &[Entity] {
        &self.buildings
    }

    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    /// Damage a colonist by roster index. Health reaching 0 removes them
    /// from the roster and the world. No current event invokes this; it is
    /// the hook a harmful event would call.
    pub fn apply_colonist_damage(&mut self, index: usize, damage: i32) {
        let Some(&entity) = self.roster.get(index) else {
            return;
        };
        let deceased = match self.world.get::<&mut Colonist>(entity) {
            Ok(mut colonist) => colonist.take_damage(damage).is_err(),
            Err(_) => false,
        };
        if deceased {
            let name = self
                .world
                .get::<&Name>(entity)
                .map(|n| n.full())
                .unwrap_or_default();
            log::warn!("{} {}", name, ColonistError::Deceased);
            let _ = self.world.despawn(entity);
            self.roster.retain(|&e| e != entity);
            self.state.set_colonist_count(self.roster.len() as u32);
        }
    }

    /// One display line per building, in list order.
    pub fn building_summaries(&self) -> Vec<String> {
        self.buildings
            .iter()
            .filter_map(|&entity| self.world.get::<&Building>(entity).ok())
            .map(|building| {
                format!(
                    "{} Level {} ({})",
                    building.kind.name(),
                    building.level,
                    if building.operational {
                        "Operational"
                    } else {
                        "Offline"
                    }
                )
            })
            .collect()
    }

    /// One display line per colonist, in roster order.
    pub fn colonist_summaries(&self) -> Vec<String> {
        self.roster
            .iter()
            .filter_map(|&entity| {
                let name = self.world.get::<&Name>(entity).ok()?.full();
                let colonist = self.world.get::<&Colonist>(entity).ok()?;
                Some(format!(
                    "{} ({}) - Health: {} Experience: {} Assigned: {}",
                    name,
                    colonist.specialization,
                    colonist.health,
                    colonist.experience,
                    if colonist.assigned { "Yes" } else { "No" }
                ))
            })
            .collect()
    }

    /// Write the colony to a save writer.
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(
            writer,
            &self.state,
            &self.ledger,
            &self.world,
            &self.buildings,
            &self.roster,
        )
    }

    /// Replace the colony with a loaded save.
    pub fn load<R: std::io::Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let loaded = persistence::load_game(reader)?;

        self.world = World::new();
        self.buildings.clear();
        self.roster.clear();

        for building in loaded.buildings {
            let entity = self.world.spawn((building,));
            self.buildings.push(entity);
        }
        for (name, colonist) in loaded.colonists {
            let entity = self.world.spawn((name, colonist));
            self.roster.push(entity);
        }

        self.state = loaded.state;
        self.ledger = loaded.ledger;
        self.state.set_colonist_count(self.roster.len() as u32);
        self.outcome = None;

        Ok(())
    }
}
