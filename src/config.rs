use std::time::Duration;

use crate::constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_TICKS_PER_SECOND};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board needs at least one row and one column, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[display("tick rate must be at least one tick per second")]
    ZeroTickRate,
}

/// Settings for one game session.
///
/// Grid dimensions are fixed for the lifetime of a session; two sessions
/// with different configurations can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub ticks_per_second: u32,
    /// Seed for the piece sequence. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// Fixed time step between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
