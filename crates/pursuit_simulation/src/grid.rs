//! Grid model: границы поля, препятствия, валидность ходов.
//!
//! GridModel неизменяем после конструирования (ресурс ECS, только чтение в системах).

use std::collections::HashSet;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigurationError;

/// Клетка поля `(row, col)`. Сравнение и хеширование по значению.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Manhattan distance `|Δrow| + |Δcol|`
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Порядок генерации ходов: right, left, down, up.
///
/// Порядок фиксирован: DLS (LIFO) и BFS/A* дают детерминированный выбор пути только при нём.
pub const MOVES: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Поле `size × size` с фиксированным набором препятствий
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    size: i32,
    obstacles: HashSet<Position>,
}

impl GridModel {
    /// Создать поле. Препятствия вне поля отклоняются.
    pub fn new(
        size: i32,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Result<Self, ConfigurationError> {
        if size <= 0 {
            return Err(ConfigurationError::InvalidGridSize(size));
        }

        let mut grid = Self {
            size,
            obstacles: HashSet::new(),
        };

        for obstacle in obstacles {
            if !grid.in_bounds(obstacle) {
                return Err(ConfigurationError::ObstacleOutOfBounds(obstacle));
            }
            grid.obstacles.insert(obstacle);
        }

        Ok(grid)
    }

    /// Открытое поле без препятствий
    pub fn open(size: i32) -> Result<Self, ConfigurationError> {
        Self::new(size, std::iter::empty())
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    /// Препятствия в стабильном порядке (для snapshot/логов)
    pub fn sorted_obstacles(&self) -> Vec<Position> {
        let mut obstacles: Vec<_> = self.obstacles.iter().copied().collect();
        obstacles.sort();
        obstacles
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.size).contains(&position.row) && (0..self.size).contains(&position.col)
    }

    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// true iff клетка внутри поля и не препятствие
    pub fn is_valid_move(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_obstacle(position)
    }

    /// Проверка фиксированной сущности (goal, pickup, стартовые позиции агентов)
    pub fn ensure_placeable(
        &self,
        entity: &'static str,
        position: Position,
    ) -> Result<(), ConfigurationError> {
        if !self.in_bounds(position) {
            return Err(ConfigurationError::OutOfBounds { entity, position });
        }
        if self.is_obstacle(position) {
            return Err(ConfigurationError::OnObstacle { entity, position });
        }
        Ok(())
    }

    /// Валидные соседи в порядке [`MOVES`]
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        MOVES
            .iter()
            .map(move |&step| position.offset(step))
            .filter(|next| self.is_valid_move(*next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_grid() -> GridModel {
        GridModel::new(
            6,
            [(1, 1), (1, 2), (2, 2), (3, 1), (4, 4)].map(Position::from),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_move_bounds_and_obstacles() {
        let grid = scenario_grid();

        assert!(grid.is_valid_move(Position::new(0, 0)));
        assert!(grid.is_valid_move(Position::new(5, 5)));
        assert!(!grid.is_valid_move(Position::new(-1, 0)));
        assert!(!grid.is_valid_move(Position::new(0, 6)));
        assert!(!grid.is_valid_move(Position::new(6, 0)));
        assert!(!grid.is_valid_move(Position::new(1, 1))); // obstacle
        assert!(!grid.is_valid_move(Position::new(4, 4))); // obstacle
    }

    #[test]
    fn test_invalid_size_rejected() {
        assert!(matches!(
            GridModel::open(0),
            Err(ConfigurationError::InvalidGridSize(0))
        ));
        assert!(GridModel::open(-3).is_err());
    }

    #[test]
    fn test_obstacle_out_of_bounds_rejected() {
        let result = GridModel::new(3, [Position::new(3, 0)]);
        assert!(matches!(
            result,
            Err(ConfigurationError::ObstacleOutOfBounds(p)) if p == Position::new(3, 0)
        ));
    }

    #[test]
    fn test_neighbors_order() {
        let grid = GridModel::open(3).unwrap();
        let center: Vec<_> = grid.neighbors(Position::new(1, 1)).collect();
        assert_eq!(
            center,
            vec![
                Position::new(1, 2),
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(0, 1),
            ]
        );

        // Угол: только right и down
        let corner: Vec<_> = grid.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner, vec![Position::new(0, 1), Position::new(1, 0)]);
    }

    #[test]
    fn test_neighbors_skip_obstacles() {
        let grid = scenario_grid();
        let around: Vec<_> = grid.neighbors(Position::new(2, 1)).collect();
        // (2,2), (1,1), (3,1): препятствия
        assert_eq!(around, vec![Position::new(2, 0)]);
    }

    #[test]
    fn test_ensure_placeable() {
        let grid = scenario_grid();
        assert!(grid.ensure_placeable("goal", Position::new(5, 5)).is_ok());
        assert!(matches!(
            grid.ensure_placeable("pickup", Position::new(2, 2)),
            Err(ConfigurationError::OnObstacle { entity: "pickup", .. })
        ));
        assert!(matches!(
            grid.ensure_placeable("seeker", Position::new(0, 9)),
            Err(ConfigurationError::OutOfBounds { entity: "seeker", .. })
        ));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(0, 0).manhattan(Position::new(2, 3)), 5);
        assert_eq!(Position::new(4, 1).manhattan(Position::new(1, 4)), 6);
        assert_eq!(Position::new(2, 2).manhattan(Position::new(2, 2)), 0);
    }
}
