//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The host drives it by calling [`GameEngine::advance`] with a clock value and
//! forwarding player requests; everything else reads a [`Snapshot`].

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, Tick};
pub use state::{GameState, Position, Snake, Snapshot, Status};
