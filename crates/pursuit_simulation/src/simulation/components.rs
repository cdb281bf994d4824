//! Turn simulator state: агенты (components) и общие ресурсы партии.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::search::Path;
use crate::strategy::ChaserStrategy;

/// Состояние агента (Seeker или Chaser)
///
/// Инвариант: position всегда валидная клетка поля (не препятствие).
/// Мутирует только turn systems, ровно на один шаг за ход.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Position,
    /// Прошёл через pickup (значимо только для Seeker)
    pub has_pickup: bool,
}

impl AgentState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            has_pickup: false,
        }
    }
}

/// Маркер: агент ищет Goal (cost-weighted DLS)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(AgentState)]
pub struct Seeker;

/// Маркер: агент преследует Seeker (BFS / A*, выбор каждый ход)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(AgentState, ChaserStrategy)]
pub struct Chaser;

/// Фиксированные клетки партии + лимит стоимости Seeker
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Landmarks {
    pub goal: Position,
    pub pickup: Position,
    pub depth_limit: f32,
    pub carry_pickup: bool,
}

/// Счётчик обработанных ходов (включая терминальный)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnCounter(pub u32);

/// Исход партии
///
/// Переходы монотонны: Ongoing → {SeekerFoundGoal, ChaserCaughtSeeker}, дальше терминал.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Ongoing,
    SeekerFoundGoal,
    ChaserCaughtSeeker,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Единственный допустимый переход: из Ongoing в терминальное состояние
    pub fn conclude(&mut self, terminal: Outcome) {
        if *self == Outcome::Ongoing && terminal.is_terminal() {
            *self = terminal;
        }
    }
}

/// Результаты поиска текущего хода (сбрасывается в начале хода)
#[derive(Resource, Debug, Clone, Default)]
pub struct TurnRecord {
    /// seeker_turn отработал, finish_turn должен закоммитить ход
    pub in_progress: bool,
    /// Стоимость из DLS Seeker (Found: стоимость пути, NotFound: последняя увиденная)
    pub seeker_cost: f32,
    /// Полный путь Seeker, если Goal найден
    pub seeker_path: Option<Path>,
    /// Стратегия Chaser в этом ходу (None: Chaser не ходил)
    pub chaser_strategy: Option<ChaserStrategy>,
    /// Число рёбер в пути Chaser этого хода
    pub chaser_steps: usize,
}
