//! Конфигурация партии: размер поля, препятствия, стартовые позиции, лимит стоимости.
//!
//! Default: стандартный сценарий 6×6. Валидация только при конструировании:
//! после неё симуляция не проверяет инварианты повторно.

use std::path::Path as FsPath;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{GridModel, Position};

/// Ошибка конструирования. Фатальна: объект симуляции не создаётся.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(i32),
    #[error("depth limit must be a positive finite number, got {0}")]
    InvalidDepthLimit(f32),
    #[error("{entity} position {position} is out of bounds")]
    OutOfBounds {
        entity: &'static str,
        position: Position,
    },
    #[error("{entity} position {position} coincides with an obstacle")]
    OnObstacle {
        entity: &'static str,
        position: Position,
    },
    #[error("obstacle {0} is out of bounds")]
    ObstacleOutOfBounds(Position),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Параметры партии (construction inputs)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Поле `size × size`
    pub size: i32,
    pub obstacles: Vec<Position>,
    pub seeker_start: Position,
    pub chaser_start: Position,
    pub goal: Position,
    pub pickup: Position,
    /// Потолок накопленной стоимости для DLS Seeker
    pub depth_limit: f32,
    /// Подобранный pickup даёт скидку и в поиске следующих ходов
    /// (false: каждый ход DLS стартует без pickup)
    pub carry_pickup: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 6,
            obstacles: vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 1),
                Position::new(4, 4),
            ],
            seeker_start: Position::new(0, 0),
            chaser_start: Position::new(5, 0),
            goal: Position::new(5, 5),
            pickup: Position::new(3, 3),
            depth_limit: 15.0,
            carry_pickup: false,
        }
    }
}

impl GameConfig {
    /// Валидирует конфиг и строит поле
    pub fn build_grid(&self) -> Result<GridModel, ConfigurationError> {
        if !self.depth_limit.is_finite() || self.depth_limit <= 0.0 {
            return Err(ConfigurationError::InvalidDepthLimit(self.depth_limit));
        }

        let grid = GridModel::new(self.size, self.obstacles.iter().copied())?;

        grid.ensure_placeable("goal", self.goal)?;
        grid.ensure_placeable("pickup", self.pickup)?;
        grid.ensure_placeable("seeker", self.seeker_start)?;
        grid.ensure_placeable("chaser", self.chaser_start)?;

        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.build_grid().map(|_| ())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<FsPath>) -> Result<Self, ConfigurationError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.size(), 6);
        assert_eq!(grid.obstacles().len(), 5);
    }

    #[test]
    fn test_goal_on_obstacle_rejected() {
        let config = GameConfig {
            goal: Position::new(4, 4),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OnObstacle { entity: "goal", .. })
        ));
    }

    #[test]
    fn test_chaser_out_of_bounds_rejected() {
        let config = GameConfig {
            chaser_start: Position::new(6, 0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::OutOfBounds { entity: "chaser", .. })
        ));
    }

    #[test]
    fn test_bad_size_and_limit_rejected() {
        let zero = GameConfig {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigurationError::InvalidGridSize(0))));

        for depth_limit in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = GameConfig {
                depth_limit,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigurationError::InvalidDepthLimit(_))
            ));
        }
    }

    #[test]
    fn test_json_roundtrip_and_partial_fields() {
        let json = r#"{
            "size": 4,
            "obstacles": [{"row": 1, "col": 1}],
            "seeker_start": {"row": 0, "col": 0},
            "chaser_start": {"row": 3, "col": 0},
            "goal": {"row": 3, "col": 3},
            "pickup": {"row": 0, "col": 3},
            "depth_limit": 8.0
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.size, 4);
        assert_eq!(config.obstacles, vec![Position::new(1, 1)]);

        // Отсутствующие поля берутся из Default
        let partial = GameConfig::from_json_str(r#"{"depth_limit": 20.0}"#).unwrap();
        assert_eq!(partial.size, 6);
        assert_eq!(partial.depth_limit, 20.0);
        assert!(!partial.carry_pickup);

        let carried = GameConfig::from_json_str(r#"{"carry_pickup": true}"#).unwrap();
        assert!(carried.carry_pickup);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigurationError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_json_str(r#"{"pickup": {"row": 2, "col": 2}}"#),
            Err(ConfigurationError::OnObstacle { entity: "pickup", .. })
        ));
        assert!(matches!(
            GameConfig::from_json_file("/nonexistent/pursuit.json"),
            Err(ConfigurationError::Io(_))
        ));
    }
}
