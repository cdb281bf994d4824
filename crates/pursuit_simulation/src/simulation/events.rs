//! Turn events: контракт для presentation слоя (read-only).
//!
//! Рендер получает snapshot после каждого закоммиченного хода и не имеет
//! обратного пути записи в состояние симуляции.

use bevy::prelude::*;
use serde::Serialize;

use crate::grid::{GridModel, Position};
use crate::search::Path;
use crate::simulation::components::{AgentState, Landmarks, Outcome};
use crate::strategy::ChaserStrategy;

/// Read-only снимок поля после хода
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    pub grid_size: i32,
    /// Отсортированы (стабильный порядок для сравнения снимков)
    pub obstacles: Vec<Position>,
    pub seeker: AgentState,
    pub chaser: AgentState,
    /// Стратегия Chaser в последнем ходе (None до первого хода Chaser)
    pub chaser_strategy: Option<ChaserStrategy>,
    pub goal: Position,
    pub pickup: Position,
    pub turn: u32,
    pub outcome: Outcome,
}

impl SimulationSnapshot {
    pub fn capture(
        grid: &GridModel,
        landmarks: &Landmarks,
        seeker: AgentState,
        chaser: AgentState,
        chaser_strategy: Option<ChaserStrategy>,
        turn: u32,
        outcome: Outcome,
    ) -> Self {
        Self {
            grid_size: grid.size(),
            obstacles: grid.sorted_obstacles(),
            seeker,
            chaser,
            chaser_strategy,
            goal: landmarks.goal,
            pickup: landmarks.pickup,
            turn,
            outcome,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Итог партии для вызывающего
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminationReport {
    pub outcome: Outcome,
    pub turn_count: u32,
    /// SeekerFoundGoal: стоимость найденного пути; ChaserCaughtSeeker: шаги последнего пути Chaser
    pub final_cost_or_steps: f32,
    /// Полный путь Seeker к Goal (только SeekerFoundGoal)
    pub seeker_path: Option<Path>,
}

/// Event: ход закоммичен (после мутации позиций)
#[derive(Event, Debug, Clone)]
pub struct TurnCommitted {
    pub snapshot: SimulationSnapshot,
}

/// Event: партия завершилась (пишется ровно один раз)
#[derive(Event, Debug, Clone)]
pub struct SimulationEnded {
    pub report: TerminationReport,
}

/// Последний отчёт о завершении (None пока партия идёт)
#[derive(Resource, Debug, Clone, Default)]
pub struct FinalReport(pub Option<TerminationReport>);
