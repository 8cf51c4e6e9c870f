//! Game-state engine for a falling-block puzzle game.
//!
//! - [`core`] holds the board, the seven tetrominoes, collision checks and rotation.
//! - [`engine`] holds the rules: scoring, the game state machine and the ticking session.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the requested position")]
pub struct PieceCollisionError;

/// Reason a [`Command`] was rejected.
///
/// A rejected command leaves the game state untouched, so callers are free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    #[display("game is paused")]
    Paused,
    #[display("game is over")]
    GameOver,
    #[display("piece colliding when executing command")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used for this piece")]
    HoldAlreadyUsed,
}

impl From<PieceCollisionError> for CommandError {
    fn from(err: PieceCollisionError) -> Self {
        Self::PieceCollision(err)
    }
}
