//! Pursuit Simulation Core
//!
//! Пошаговая погоня на 2D сетке (headless Bevy ECS):
//! - Seeker ищет Goal (cost-weighted DLS, pickup даёт скидку на стоимость шагов)
//! - Chaser преследует Seeker (BFS или A*, стратегия выбирается каждый ход)
//!
//! Presentation (текстовый рендер, GUI) получает только read-only snapshot после хода.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod config;
pub mod grid;
pub mod logger;
pub mod render;
pub mod search;
pub mod simulation;
pub mod strategy;

// Re-export базовых типов для удобства
pub use config::{ConfigurationError, GameConfig};
pub use grid::{GridModel, Position, MOVES};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level,
    set_logger, LogLevel, LogPrinter,
};
pub use search::{
    a_star_search, breadth_first_search, depth_limited_search, depth_limited_search_from, Path,
    SearchOutcome,
};
pub use simulation::{
    install_game, AgentState, Chaser, Outcome, Seeker, Simulation, SimulationEnded,
    SimulationSnapshot, TerminationReport, TurnCommitted, TurnPlugin,
};
pub use strategy::{select_strategy, ChaserStrategy, ASTAR_PROBABILITY};

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed));

    app
}
