use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Heading;

/// A position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step along `heading`
    pub fn stepped(&self, heading: Heading) -> Self {
        Self {
            x: self.x + heading.dx(),
            y: self.y + heading.dy(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake's body, head at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Build a snake from its cells, head first. Callers validate the cells.
    pub(crate) fn from_cells(body: Vec<Cell>) -> Self {
        debug_assert!(!body.is_empty());
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Check if any segment, head and tail included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Put a new head in front; drop the tail unless growing
    pub(crate) fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head left the board
    Wall,
    /// Head ran into the snake's own body
    SelfCollision,
    /// Snake covers every cell, leaving nowhere to put food
    BoardFull,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOverReason::Wall => "hit the wall",
            GameOverReason::SelfCollision => "ran into itself",
            GameOverReason::BoardFull => "filled the board",
        };
        f.write_str(text)
    }
}

/// What occupies a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
}

/// Owned copy of the engine state, handed to renderers.
///
/// Nothing in here points back into the engine, so a renderer may keep or
/// modify a snapshot freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub status: GameStatus,
    pub reason: Option<GameOverReason>,
    pub board_size: i32,
}

impl Snapshot {
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Food eaten so far
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(1)
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Classify one board cell on its own. The head wins over food, which
    /// only matters on the tick that fills the board.
    pub fn cell_at(&self, x: i32, y: i32) -> CellContent {
        let cell = Cell::new(x, y);

        if cell == self.head() {
            CellContent::SnakeHead
        } else if self.snake.contains(&cell) {
            CellContent::SnakeBody
        } else if cell == self.food {
            CellContent::Food
        } else {
            CellContent::Empty
        }
    }
}
