//! Turn simulator (Bevy ECS)
//!
//! Один `App::update()` = один ход:
//! 1. seeker_turn: DLS к Goal, шаг Seeker или SeekerFoundGoal
//! 2. chaser_turn: бросок стратегии, BFS/A* к новой позиции Seeker, шаг Chaser
//! 3. finish_turn: счётчик ходов, TurnCommitted, SimulationEnded
//!
//! Ограничения на число ходов внутри нет: его задаёт вызывающий ([`Simulation::run`]).

use bevy::prelude::*;

use crate::config::{ConfigurationError, GameConfig};
use crate::create_headless_app;

pub mod components;
pub mod events;
pub mod systems;

pub use components::{AgentState, Chaser, Landmarks, Outcome, Seeker, TurnCounter, TurnRecord};
pub use events::{
    FinalReport, SimulationEnded, SimulationSnapshot, TerminationReport, TurnCommitted,
};

/// Turn Plugin
///
/// Регистрирует turn системы в Update. Порядок выполнения строго последовательный
/// (chain): Chaser должен видеть уже закоммиченный ход Seeker.
pub struct TurnPlugin;

impl Plugin for TurnPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TurnCommitted>()
            .add_event::<SimulationEnded>()
            .init_resource::<Outcome>()
            .init_resource::<TurnCounter>()
            .init_resource::<TurnRecord>()
            .init_resource::<FinalReport>();

        app.add_systems(
            Update,
            (
                systems::seeker_turn.run_if(systems::game_ongoing),
                systems::chaser_turn,
                systems::finish_turn,
            )
                .chain(),
        );
    }
}

/// Валидирует конфиг, вставляет ресурсы партии и спавнит агентов
pub fn install_game(app: &mut App, config: &GameConfig) -> Result<(), ConfigurationError> {
    let grid = config.build_grid()?;

    app.insert_resource(grid)
        .insert_resource(Landmarks {
            goal: config.goal,
            pickup: config.pickup,
            depth_limit: config.depth_limit,
            carry_pickup: config.carry_pickup,
        })
        .insert_resource(config.clone());

    let world = app.world_mut();
    world.spawn((Seeker, AgentState::new(config.seeker_start)));
    world.spawn((Chaser, AgentState::new(config.chaser_start)));

    crate::log_info(&format!(
        "Game installed: {}x{} grid, {} obstacles, seeker {}, chaser {}, goal {}, pickup {}, limit {:.1}",
        config.size,
        config.size,
        config.obstacles.len(),
        config.seeker_start,
        config.chaser_start,
        config.goal,
        config.pickup,
        config.depth_limit
    ));

    Ok(())
}

/// Headless партия: App + TurnPlugin + агенты
///
/// Единственный владелец мутабельного состояния партии; наружу: только snapshot и report.
pub struct Simulation {
    app: App,
}

impl Simulation {
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self, ConfigurationError> {
        // Валидация до создания App: при ошибке объект не создаётся
        config.validate()?;

        let mut app = create_headless_app(seed);
        app.add_plugins(TurnPlugin);
        install_game(&mut app, config)?;

        Ok(Self { app })
    }

    pub fn outcome(&self) -> Outcome {
        *self.app.world().resource::<Outcome>()
    }

    pub fn turn(&self) -> u32 {
        self.app.world().resource::<TurnCounter>().0
    }

    /// Отчёт о завершении (None пока партия идёт)
    pub fn report(&self) -> Option<TerminationReport> {
        self.app.world().resource::<FinalReport>().0.clone()
    }

    /// Один ход. После терминала: no-op, возвращает тот же отчёт.
    pub fn step(&mut self) -> Option<TerminationReport> {
        if !self.outcome().is_terminal() {
            self.app.update();
        }
        self.report()
    }

    /// Ходы до терминала, но не больше `max_turns`.
    /// None: лимит исчерпан, партия всё ещё идёт.
    pub fn run(&mut self, max_turns: u32) -> Option<TerminationReport> {
        for _ in 0..max_turns {
            if let Some(report) = self.step() {
                return Some(report);
            }
        }
        self.report()
    }

    /// Read-only snapshot текущего состояния
    pub fn snapshot(&mut self) -> SimulationSnapshot {
        let world = self.app.world_mut();

        let seeker = world
            .query_filtered::<&AgentState, With<Seeker>>()
            .iter(world)
            .next()
            .copied()
            .unwrap_or_default();
        let chaser = world
            .query_filtered::<&AgentState, With<Chaser>>()
            .iter(world)
            .next()
            .copied()
            .unwrap_or_default();

        let turn = world.resource::<TurnCounter>().0;
        let chaser_strategy = world.resource::<TurnRecord>().chaser_strategy;

        SimulationSnapshot::capture(
            world.resource::<crate::grid::GridModel>(),
            world.resource::<Landmarks>(),
            seeker,
            chaser,
            chaser_strategy,
            turn,
            *world.resource::<Outcome>(),
        )
    }

    /// Доступ к App (например, чтобы повесить presentation-систему на TurnCommitted)
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
