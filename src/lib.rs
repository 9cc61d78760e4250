//! Falling-block puzzle engine.
//!
//! A [`Session`](game::Session) owns the board, the falling piece and the
//! score, and is advanced one tick at a time by its caller. Rendering, input
//! and pacing live in the `blockfall` binary.

pub mod config;
pub mod constants;
pub mod game;

pub use config::{ConfigError, GameConfig};
