//! Board geometry and pieces.
//!
//! Everything here is plain data: boards and pieces are values, and every
//! operation that "changes" one returns a new value instead.

pub use self::{board::*, piece::*, rotation::KICK_OFFSETS};

mod board;
mod piece;
mod placement;
mod rotation;
