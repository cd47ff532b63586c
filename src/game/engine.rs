use anyhow::Result;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use super::{
    action::{Direction, Heading},
    config::GameConfig,
    state::{Cell, GameOverReason, GameStatus, Snake, Snapshot},
};

/// What a single call to [`GameEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TickOutcome {
    /// Snake moved one cell without eating
    Moved,
    /// Snake ate and grew; new food is on the board
    Ate,
    /// This tick ended the game
    Ended(GameOverReason),
    /// Game was already over, nothing changed
    Inert,
}

/// Owns the canonical game state and advances it one tick at a time.
///
/// The engine has no internal synchronization. Drivers that touch it from
/// more than one task must serialize `set_heading`, `tick` and `snapshot`.
pub struct GameEngine {
    config: GameConfig,
    snake: Snake,
    food: Cell,
    heading: Heading,
    status: GameStatus,
    reason: Option<GameOverReason>,
    rng: StdRng,
}

impl GameEngine {
    /// Start a game from the configured initial state
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::build(config, StdRng::from_entropy())
    }

    /// Like [`GameEngine::new`], with a fixed seed for food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    /// Start from an arbitrary position on the configured board
    pub fn from_state(
        config: GameConfig,
        snake: Vec<Cell>,
        food: Cell,
        heading: Direction,
        seed: u64,
    ) -> Result<Self> {
        config.validate_start(&snake, food)?;

        Ok(Self {
            snake: Snake::from_cells(snake),
            food,
            heading: heading.into(),
            status: GameStatus::Running,
            reason: None,
            rng: StdRng::seed_from_u64(seed),
            config,
        })
    }

    fn build(config: GameConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            snake: Snake::from_cells(config.initial_snake.clone()),
            food: config.initial_food,
            heading: config.initial_heading.into(),
            status: GameStatus::Running,
            reason: None,
            rng,
            config,
        })
    }

    /// Point the snake in a new direction for the next tick.
    ///
    /// Reversing straight into the neck is allowed and ends the game on the
    /// next tick once the snake is longer than one cell.
    pub fn set_heading(&mut self, direction: Direction) {
        if self.status == GameStatus::GameOver {
            return;
        }

        let heading = Heading::from(direction);
        if heading != self.heading {
            debug!("heading changed to {direction:?}");
        }
        self.heading = heading;
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.status == GameStatus::GameOver {
            return TickOutcome::Inert;
        }

        let new_head = self.snake.head().stepped(self.heading);

        if let Some(reason) = self.check_collision(new_head) {
            self.end(reason);
            return TickOutcome::Ended(reason);
        }

        let ate_food = new_head == self.food;
        self.snake.advance(new_head, ate_food);
        trace!("head moved to {new_head}");

        if !ate_food {
            return TickOutcome::Moved;
        }

        match self.spawn_food_avoid_snake() {
            Some(food) => {
                debug!(
                    "ate food at {new_head}, length {}, next food at {food}",
                    self.snake.len()
                );
                self.food = food;
                TickOutcome::Ate
            }
            None => {
                self.end(GameOverReason::BoardFull);
                TickOutcome::Ended(GameOverReason::BoardFull)
            }
        }
    }

    /// Owned copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().to_vec(),
            food: self.food,
            status: self.status,
            reason: self.reason,
            board_size: self.config.board_size,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn reason(&self) -> Option<GameOverReason> {
        self.reason
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Wall first, then body. The body check still sees the tail, since it
    /// has not moved yet.
    fn check_collision(&self, pos: Cell) -> Option<GameOverReason> {
        if !self.config.contains(pos) {
            return Some(GameOverReason::Wall);
        }

        if self.snake.occupies(pos) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn end(&mut self, reason: GameOverReason) {
        info!(
            "game over: snake {reason} with length {} (score {})",
            self.snake.len(),
            self.snake.len() - 1
        );
        self.status = GameStatus::GameOver;
        self.reason = Some(reason);
    }

    /// Pick a random free cell, redrawing on hits. `None` when the snake
    /// covers the whole board.
    fn spawn_food_avoid_snake(&mut self) -> Option<Cell> {
        if self.snake.len() >= self.config.cell_count() {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..self.config.board_size);
            let y = self.rng.gen_range(0..self.config.board_size);
            let pos = Cell::new(x, y);

            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
