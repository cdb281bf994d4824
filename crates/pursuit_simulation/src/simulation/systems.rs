//! Turn systems: seeker_turn → chaser_turn → finish_turn (chain, один ход за update).
//!
//! Seeker ходит первым и коммитит позицию до поиска Chaser: Chaser ищет путь
//! к уже обновлённой позиции Seeker. Состояние поиска между ходами не хранится.

use bevy::prelude::*;

use crate::grid::GridModel;
use crate::search::{depth_limited_search_from, SearchOutcome};
use crate::simulation::components::{
    AgentState, Chaser, Landmarks, Outcome, Seeker, TurnCounter, TurnRecord,
};
use crate::simulation::events::{
    FinalReport, SimulationEnded, SimulationSnapshot, TerminationReport, TurnCommitted,
};
use crate::strategy::{select_strategy, ChaserStrategy};
use crate::DeterministicRng;

/// Run condition: партия ещё идёт
pub fn game_ongoing(outcome: Res<Outcome>) -> bool {
    !outcome.is_terminal()
}

/// Система: ход Seeker
///
/// DLS от текущей позиции к Goal:
/// - Found → SeekerFoundGoal, Chaser в этом ходу не ходит
/// - NotFound → один шаг по лучшему частичному пути (или стоим, если ходов нет)
pub fn seeker_turn(
    grid: Res<GridModel>,
    landmarks: Res<Landmarks>,
    mut outcome: ResMut<Outcome>,
    mut record: ResMut<TurnRecord>,
    mut seeker: Single<&mut AgentState, (With<Seeker>, Without<Chaser>)>,
) {
    *record = TurnRecord {
        in_progress: true,
        ..Default::default()
    };

    let result = depth_limited_search_from(
        seeker.position,
        landmarks.goal,
        landmarks.pickup,
        landmarks.carry_pickup && seeker.has_pickup,
        landmarks.depth_limit,
        &grid,
    );
    record.seeker_cost = result.cost();

    match result {
        SearchOutcome::Found { path, cost } => {
            crate::log_info(&format!(
                "Seeker: goal {} found from {} (cost {:.1}, {} steps)",
                landmarks.goal,
                seeker.position,
                cost,
                path.len().saturating_sub(1)
            ));
            record.seeker_path = Some(path);
            outcome.conclude(Outcome::SeekerFoundGoal);
        }
        not_found @ SearchOutcome::NotFound { .. } => match not_found.first_step() {
            Some(step) => {
                crate::log(&format!(
                    "Seeker: {} → {} (goal not reachable within limit {:.1}, last cost {:.1})",
                    seeker.position,
                    step,
                    landmarks.depth_limit,
                    not_found.cost()
                ));
                seeker.position = step;
                if step == landmarks.pickup && !seeker.has_pickup {
                    seeker.has_pickup = true;
                    crate::log_info(&format!("Seeker: picked up at {}", step));
                }
            }
            None => {
                crate::log_warning(&format!(
                    "Seeker: no moves from {}, staying in place",
                    seeker.position
                ));
            }
        },
    }
}

/// Система: ход Chaser
///
/// Бросок стратегии (BFS / A*) → поиск к текущей позиции Seeker → один шаг.
/// Совпадение позиций после шага → ChaserCaughtSeeker.
pub fn chaser_turn(
    grid: Res<GridModel>,
    mut rng: ResMut<DeterministicRng>,
    mut outcome: ResMut<Outcome>,
    mut record: ResMut<TurnRecord>,
    seeker: Single<&AgentState, (With<Seeker>, Without<Chaser>)>,
    chaser: Single<(&mut AgentState, &mut ChaserStrategy), (With<Chaser>, Without<Seeker>)>,
) {
    // Seeker уже закончил партию в этом ходу (или ход не начинался)
    if !record.in_progress || outcome.is_terminal() {
        return;
    }

    let (mut state, mut strategy) = chaser.into_inner();
    let target = seeker.position;

    *strategy = select_strategy(&mut rng.rng);
    record.chaser_strategy = Some(*strategy);
    crate::log(&format!("Chaser: strategy {}", strategy.as_str()));

    let result = strategy.plan(state.position, target, &grid);
    record.chaser_steps = result.steps();

    match result.first_step() {
        Some(step) => {
            crate::log(&format!(
                "Chaser ({}): {} → {} (target {}, {})",
                strategy.as_str(),
                state.position,
                step,
                target,
                if result.is_found() { "path found" } else { "partial path" }
            ));
            state.position = step;
        }
        None if state.position != target => {
            crate::log_warning(&format!(
                "Chaser: no moves from {}, staying in place",
                state.position
            ));
        }
        None => {}
    }

    if state.position == target {
        crate::log_info(&format!("Chaser: caught seeker at {}", target));
        outcome.conclude(Outcome::ChaserCaughtSeeker);
    }
}

/// Система: коммит хода
///
/// Инкремент счётчика, TurnCommitted snapshot, SimulationEnded при терминале.
#[allow(clippy::too_many_arguments)]
pub fn finish_turn(
    grid: Res<GridModel>,
    landmarks: Res<Landmarks>,
    outcome: Res<Outcome>,
    mut turn: ResMut<TurnCounter>,
    mut record: ResMut<TurnRecord>,
    mut final_report: ResMut<FinalReport>,
    seeker: Single<&AgentState, (With<Seeker>, Without<Chaser>)>,
    chaser: Single<&AgentState, (With<Chaser>, Without<Seeker>)>,
    mut committed: EventWriter<TurnCommitted>,
    mut ended: EventWriter<SimulationEnded>,
) {
    if !record.in_progress {
        return;
    }
    record.in_progress = false;
    turn.0 += 1;

    let snapshot = SimulationSnapshot::capture(
        &grid,
        &landmarks,
        **seeker,
        **chaser,
        record.chaser_strategy,
        turn.0,
        *outcome,
    );
    committed.write(TurnCommitted { snapshot });

    if !outcome.is_terminal() {
        return;
    }

    let final_cost_or_steps = match *outcome {
        Outcome::SeekerFoundGoal => record.seeker_cost,
        _ => record.chaser_steps as f32,
    };
    let report = TerminationReport {
        outcome: *outcome,
        turn_count: turn.0,
        final_cost_or_steps,
        seeker_path: record.seeker_path.take(),
    };

    crate::log_info(&format!(
        "Simulation ended: {:?} after {} turns ({:.1})",
        report.outcome, report.turn_count, report.final_cost_or_steps
    ));

    final_report.0 = Some(report.clone());
    ended.write(SimulationEnded { report });
}
