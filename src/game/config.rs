use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::state::Cell;

/// Side length of the square board
pub const BOARD_SIZE: i32 = 10;
/// Snake at the start of every game, head first
pub const INITIAL_SNAKE: [Cell; 1] = [Cell::new(2, 2)];
pub const INITIAL_FOOD: Cell = Cell::new(5, 5);
pub const INITIAL_HEADING: Direction = Direction::Right;
/// How often the driver advances the game
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the board
    pub board_size: i32,
    /// Starting snake, head first
    pub initial_snake: Vec<Cell>,
    pub initial_food: Cell,
    pub initial_heading: Direction,
    /// Time between two ticks in the interactive driver
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            initial_snake: INITIAL_SNAKE.to_vec(),
            initial_food: INITIAL_FOOD,
            initial_heading: INITIAL_HEADING,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl GameConfig {
    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.board_size.max(0) as usize).pow(2)
    }

    /// Check if a cell lies on the board
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.board_size).contains(&cell.x) && (0..self.board_size).contains(&cell.y)
    }

    /// Check that a starting position is playable on this board
    pub fn validate_start(&self, snake: &[Cell], food: Cell) -> Result<()> {
        ensure!(self.board_size > 0, "board size must be positive");
        ensure!(!snake.is_empty(), "snake needs at least one cell");
        ensure!(
            snake.len() < self.cell_count(),
            "snake of length {} leaves no room for food",
            snake.len()
        );

        for (i, cell) in snake.iter().enumerate() {
            ensure!(self.contains(*cell), "snake cell {cell} is off the board");
            ensure!(
                !snake[..i].contains(cell),
                "snake cell {cell} appears more than once"
            );
        }

        ensure!(self.contains(food), "food {food} is off the board");
        ensure!(!snake.contains(&food), "food {food} is on the snake");

        Ok(())
    }

    /// Check the whole configuration, starting position included
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.tick_interval.is_zero(),
            "tick interval must be non-zero"
        );
        self.validate_start(&self.initial_snake, self.initial_food)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 10);
        assert_eq!(config.initial_snake, vec![Cell::new(2, 2)]);
        assert_eq!(config.initial_food, Cell::new(5, 5));
        assert_eq!(config.initial_heading, Direction::Right);
        assert_eq!(config.tick_interval, Duration::from_millis(200));
        assert_eq!(config.cell_count(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_contains() {
        let config = GameConfig::default();
        assert!(config.contains(Cell::new(0, 0)));
        assert!(config.contains(Cell::new(9, 9)));
        assert!(!config.contains(Cell::new(-1, 0)));
        assert!(!config.contains(Cell::new(0, 10)));
    }

    #[test]
    fn test_rejects_bad_start() {
        let config = GameConfig::default();

        assert!(config.validate_start(&[], Cell::new(5, 5)).is_err());
        assert!(
            config
                .validate_start(&[Cell::new(10, 2)], Cell::new(5, 5))
                .is_err()
        );
        assert!(
            config
                .validate_start(&[Cell::new(2, 2), Cell::new(2, 2)], Cell::new(5, 5))
                .is_err()
        );
        assert!(
            config
                .validate_start(&[Cell::new(2, 2)], Cell::new(2, 2))
                .is_err()
        );
        assert!(
            config
                .validate_start(&[Cell::new(2, 2)], Cell::new(5, -1))
                .is_err()
        );
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }
}
