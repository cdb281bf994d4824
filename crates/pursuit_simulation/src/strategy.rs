//! Strategy selector для Chaser
//!
//! Каждый ход делается независимый бросок, без сохранённого состояния стратегии.
//! RNG передаётся явно (DeterministicRng в симуляции, любой `Rng` в тестах).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{GridModel, Position};
use crate::search::{a_star_search, breadth_first_search, SearchOutcome};

/// Вероятность выбрать A* (бросок `≤ 0.4` → A*)
pub const ASTAR_PROBABILITY: f64 = 0.4;

/// Алгоритм поиска Chaser на текущий ход
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChaserStrategy {
    #[default]
    BreadthFirst,
    AStar,
}

impl ChaserStrategy {
    /// Выбор по значению броска из `[0, 1)`
    pub fn from_roll(roll: f64) -> Self {
        if roll <= ASTAR_PROBABILITY {
            ChaserStrategy::AStar
        } else {
            ChaserStrategy::BreadthFirst
        }
    }

    /// Запустить выбранный поиск
    pub fn plan(self, origin: Position, target: Position, grid: &GridModel) -> SearchOutcome {
        match self {
            ChaserStrategy::BreadthFirst => breadth_first_search(origin, target, grid),
            ChaserStrategy::AStar => a_star_search(origin, target, grid),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChaserStrategy::BreadthFirst => "BFS",
            ChaserStrategy::AStar => "A*",
        }
    }
}

/// Бросок uniform `[0, 1)` → стратегия
pub fn select_strategy<R: Rng + ?Sized>(rng: &mut R) -> ChaserStrategy {
    ChaserStrategy::from_roll(rng.gen::<f64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_threshold_inclusive() {
        assert_eq!(ChaserStrategy::from_roll(0.0), ChaserStrategy::AStar);
        assert_eq!(ChaserStrategy::from_roll(0.4), ChaserStrategy::AStar);
        assert_eq!(ChaserStrategy::from_roll(0.400_001), ChaserStrategy::BreadthFirst);
        assert_eq!(ChaserStrategy::from_roll(0.999), ChaserStrategy::BreadthFirst);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);

        let a: Vec<_> = (0..50).map(|_| select_strategy(&mut rng_a)).collect();
        let b: Vec<_> = (0..50).map(|_| select_strategy(&mut rng_b)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distribution_roughly_forty_percent() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 10_000;
        let a_star = (0..draws)
            .filter(|_| select_strategy(&mut rng) == ChaserStrategy::AStar)
            .count();

        let ratio = a_star as f64 / draws as f64;
        assert!((0.37..0.43).contains(&ratio), "A* ratio = {}", ratio);
    }

    #[test]
    fn test_plan_dispatch() {
        let grid = GridModel::open(4).unwrap();
        let origin = Position::new(0, 0);
        let target = Position::new(3, 3);

        let bfs = ChaserStrategy::BreadthFirst.plan(origin, target, &grid);
        let a_star = ChaserStrategy::AStar.plan(origin, target, &grid);
        assert_eq!(bfs.steps(), 6);
        assert_eq!(a_star.steps(), 6);
    }
}
