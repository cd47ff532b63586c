//! Grid Snake - a single-player snake game on a 10x10 board
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Key mapping for the terminal driver (input module)
//! - TUI rendering of game snapshots (render module)
//! - In-session counters shown while playing (metrics module)
//! - Drivers: interactive terminal play and scripted headless runs (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
