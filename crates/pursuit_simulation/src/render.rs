//! Текстовый рендер поля по snapshot (presentation, только чтение)
//!
//! `.` пусто, `X` препятствие, `G` goal, `P` pickup (пока не подобран),
//! `S` seeker, `C` chaser. Агенты рисуются поверх landmarks, Chaser поверх Seeker.

use crate::grid::Position;
use crate::simulation::{Outcome, SimulationSnapshot};

pub const EMPTY: char = '.';
pub const OBSTACLE: char = 'X';
pub const GOAL: char = 'G';
pub const PICKUP: char = 'P';
pub const SEEKER: char = 'S';
pub const CHASER: char = 'C';

/// Клетки поля построчно
pub fn board_cells(snapshot: &SimulationSnapshot) -> Vec<Vec<char>> {
    let size = snapshot.grid_size.max(0) as usize;
    let mut board = vec![vec![EMPTY; size]; size];

    let mut put = |position: Position, glyph: char| {
        if let (Ok(row), Ok(col)) = (usize::try_from(position.row), usize::try_from(position.col)) {
            if let Some(cell) = board.get_mut(row).and_then(|line| line.get_mut(col)) {
                *cell = glyph;
            }
        }
    };

    for &obstacle in &snapshot.obstacles {
        put(obstacle, OBSTACLE);
    }
    put(snapshot.goal, GOAL);
    if !snapshot.seeker.has_pickup {
        put(snapshot.pickup, PICKUP);
    }
    put(snapshot.seeker.position, SEEKER);
    put(snapshot.chaser.position, CHASER);

    board
}

/// Поле одной строкой на ряд, клетки через пробел
pub fn render_board(snapshot: &SimulationSnapshot) -> String {
    board_cells(snapshot)
        .iter()
        .map(|row| {
            row.iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Заголовок хода: номер, стратегия Chaser, исход
pub fn render_status(snapshot: &SimulationSnapshot) -> String {
    let strategy = snapshot
        .chaser_strategy
        .map(|strategy| strategy.as_str())
        .unwrap_or("-");
    let outcome = match snapshot.outcome {
        Outcome::Ongoing => "ongoing",
        Outcome::SeekerFoundGoal => "seeker found goal",
        Outcome::ChaserCaughtSeeker => "chaser caught seeker",
    };
    format!("Turn {} | chaser: {} | {}", snapshot.turn, strategy, outcome)
}
