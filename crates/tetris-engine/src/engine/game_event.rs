/// Notable things that happened while applying a command.
///
/// Events are fire-and-forget signals for collaborators such as a sound sink;
/// nothing in the engine depends on them being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum GameEvent {
    /// A new game began (first start or restart).
    Started,
    /// The falling piece moved one column.
    PieceMoved,
    /// The falling piece rotated.
    PieceRotated,
    /// The falling piece went to the hold slot.
    PieceHeld,
    /// The falling piece locked into the board.
    PieceLocked,
    /// One or more rows were cleared by the last lock.
    LinesCleared(usize),
    /// The level increased.
    LevelUp { level: usize },
    /// The promoted piece did not fit at its spawn position.
    GameOver,
    Paused,
    Resumed,
}
