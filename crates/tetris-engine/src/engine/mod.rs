//! Game rules and state management.
//!
//! This module orchestrates the [`core`](crate::core) data structures into a playable game:
//!
//! - [`GameState`] - Complete state of one game, advanced by applying [`Command`]s
//! - [`GameSession`] - Owner of the state that serializes input and gravity ticks
//! - [`GameStats`] - Score, level and line statistics, plus the scoring formulas
//! - [`PieceGenerator`] - Uniform random piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameEvent`] - Signals for collaborators such as a sound sink
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tetris_engine::{Command, GameSession};
//!
//! let mut session = GameSession::new();
//!
//! session.enqueue(Command::MoveLeft);
//! session.enqueue(Command::Rotate);
//! session.tick(Duration::from_millis(16));
//!
//! if session.state().is_game_over() {
//!     println!("Game over!");
//! }
//! ```

pub use self::{
    game_event::*, game_session::*, game_state::*, game_stats::*, gravity::*, piece_generator::*,
};

mod game_event;
mod game_session;
mod game_state;
mod game_stats;
mod gravity;
mod piece_generator;
