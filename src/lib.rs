//! Torus Snake - a terminal Snake game on a wrapping board
//!
//! This library provides:
//! - Core game logic, free of I/O (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering of game snapshots (render module)
//! - Score and status tracking (metrics module)
//! - The interactive host loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
