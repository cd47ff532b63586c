//! Core game logic for the snake
//!
//! Everything here is free of I/O and rendering, so any driver (terminal,
//! headless script, test) can run a game the same way.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Heading, ScriptStep, parse_script};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use state::{Cell, CellContent, GameOverReason, GameStatus, Snake, Snapshot};
