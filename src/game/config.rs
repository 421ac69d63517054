use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Delay between logical ticks at the start of a game
pub const INITIAL_MOVE_INTERVAL_MS: u64 = 150;
/// The speed ramp never goes faster than this
pub const MIN_MOVE_INTERVAL_MS: u64 = 80;
/// How much faster each eaten food makes the game
pub const SPEEDUP_STEP_MS: u64 = 2;

/// Configuration for the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
        }
    }

    /// A 10x10 board, handy for tight scenarios
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration previously written as JSON
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize game config")?;
        Ok(config)
    }

    /// The starting two-cell body must fit on the board
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 2,
            "grid width must be at least 2, got {}",
            self.grid_width
        );
        ensure!(
            self.grid_height >= 1,
            "grid height must be at least 1, got {}",
            self.grid_height
        );
        ensure!(
            self.grid_width <= i32::MAX as usize && self.grid_height <= i32::MAX as usize,
            "grid dimensions are too large"
        );
        Ok(())
    }
}
