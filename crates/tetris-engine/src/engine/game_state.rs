use crate::{
    CommandError, PieceCollisionError,
    core::{Block, Board, LineClear, Piece},
};

use super::{
    game_event::GameEvent,
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Player input understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    Hold,
    TogglePause,
    Restart,
}

impl Command {
    pub const ALL: [Self; 8] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
        Command::HardDrop,
        Command::Hold,
        Command::TogglePause,
        Command::Restart,
    ];
}

/// Result of a successfully applied command: the replacement state and what happened.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Complete state of one game.
///
/// `GameState` is never mutated by game rules in place: [`GameState::apply`] returns a
/// new state, so a renderer holding a reference always sees a consistent snapshot.
///
/// # Game Flow
///
/// 1. A new state starts `Playing` with an empty board and two drawn pieces
/// 2. Commands move, rotate, hold or drop the falling piece
/// 3. A piece that cannot move down locks; full rows are cleared and scored
/// 4. The next piece is promoted; if it does not fit at spawn, the game is over
///
/// # Example
///
/// ```
/// use tetris_engine::{Command, GameEvent, GameState};
///
/// let state = GameState::new();
/// let transition = state.apply(Command::HardDrop).unwrap();
///
/// assert!(transition.events.contains(&GameEvent::PieceLocked));
/// assert_eq!(transition.state.stats().completed_pieces(), 1);
/// // The original state is untouched
/// assert_eq!(state.stats().completed_pieces(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_piece: Option<Piece>,
    next_piece: Option<Piece>,
    hold_piece: Option<Piece>,
    stats: GameStats,
    status: GameStatus,
    can_hold: bool,
    last_line_clear: Option<LineClear>,
    generator: PieceGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Starts a new game with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Starts a new game whose piece sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let current_piece = generator.draw();
        let next_piece = generator.draw();
        Self {
            board: Board::new(),
            current_piece: Some(current_piece),
            next_piece: Some(next_piece),
            hold_piece: None,
            stats: GameStats::new(),
            status: GameStatus::Playing,
            can_hold: true,
            last_line_clear: None,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece. `None` once the game is over.
    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    /// Returns the piece that will fall next. `None` once the game is over.
    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next_piece.as_ref()
    }

    #[must_use]
    pub fn hold_piece(&self) -> Option<&Piece> {
        self.hold_piece.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn lines(&self) -> usize {
        self.stats.total_cleared_lines()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status.is_paused()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Returns the falling piece moved to where a hard drop would put it.
    #[must_use]
    pub fn ghost_piece(&self) -> Option<Piece> {
        self.current_piece.map(|piece| piece.dropped(&self.board))
    }

    /// Returns the rows removed by the most recent clear, until acknowledged.
    #[must_use]
    pub fn last_line_clear(&self) -> Option<&LineClear> {
        self.last_line_clear.as_ref()
    }

    /// Clears the pending line-clear signal once a renderer has shown it.
    pub fn acknowledge_line_clear(&mut self) {
        self.last_line_clear = None;
    }

    /// Builds a board with the ghost (optional) and the falling piece drawn over the stack.
    #[must_use]
    pub fn render_board(&self, show_ghost: bool) -> Board {
        let mut board = self.board.clone();
        if let Some(piece) = &self.current_piece {
            if show_ghost {
                board.fill_piece_as(&piece.dropped(&self.board), Block::Ghost);
            }
            board.fill_piece(piece);
        }
        board
    }

    /// Applies `command` and returns the resulting state with the events it produced.
    ///
    /// A rejected command returns the reason and leaves `self` as it was. Except for
    /// [`Command::TogglePause`] and [`Command::Restart`], commands are rejected unless
    /// the game is [`GameStatus::Playing`].
    pub fn apply(&self, command: Command) -> Result<Transition, CommandError> {
        let mut state = self.clone();
        let mut events = Vec::new();
        state.execute(command, &mut events)?;
        Ok(Transition { state, events })
    }

    fn execute(
        &mut self,
        command: Command,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), CommandError> {
        match command {
            Command::MoveLeft => self.shift(-1, events),
            Command::MoveRight => self.shift(1, events),
            Command::SoftDrop => self.soft_drop(events),
            Command::Rotate => self.rotate(events),
            Command::HardDrop => self.hard_drop(events),
            Command::Hold => self.hold(events),
            Command::TogglePause => self.toggle_pause(events),
            Command::Restart => {
                self.restart(events);
                Ok(())
            }
        }
    }

    fn ensure_playing(&self) -> Result<(), CommandError> {
        match self.status {
            GameStatus::Playing => Ok(()),
            GameStatus::Paused => Err(CommandError::Paused),
            GameStatus::GameOver => Err(CommandError::GameOver),
        }
    }

    fn current(&self) -> Piece {
        self.current_piece
            .expect("a game in progress always has a falling piece")
    }

    fn shift(&mut self, dx: i32, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self.current().moved(dx, 0);
        if !self.board.can_place(&piece) {
            return Err(PieceCollisionError.into());
        }
        self.current_piece = Some(piece);
        events.push(GameEvent::PieceMoved);
        Ok(())
    }

    fn soft_drop(&mut self, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self.current().moved(0, 1);
        if self.board.can_place(&piece) {
            self.current_piece = Some(piece);
        } else {
            self.lock(0, events);
        }
        Ok(())
    }

    fn hard_drop(&mut self, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self.current();
        let dropped = piece.dropped(&self.board);
        let rows = dropped.position().y - piece.position().y;
        self.current_piece = Some(dropped);
        self.lock(usize::try_from(rows).unwrap_or(0), events);
        Ok(())
    }

    fn rotate(&mut self, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self
            .current()
            .wall_kicked(&self.board)
            .ok_or(PieceCollisionError)?;
        self.current_piece = Some(piece);
        events.push(GameEvent::PieceRotated);
        Ok(())
    }

    fn hold(&mut self, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        self.ensure_playing()?;
        if !self.can_hold {
            return Err(CommandError::HoldAlreadyUsed);
        }
        let outgoing = self.current().respawned();
        let incoming = match self.hold_piece.replace(outgoing) {
            Some(held) => held.respawned(),
            None => {
                let promoted = self.take_next();
                self.next_piece = Some(self.generator.draw());
                promoted
            }
        };
        self.current_piece = Some(incoming);
        self.can_hold = false;
        events.push(GameEvent::PieceHeld);
        Ok(())
    }

    fn toggle_pause(&mut self, events: &mut Vec<GameEvent>) -> Result<(), CommandError> {
        match self.status {
            GameStatus::Playing => {
                self.status = GameStatus::Paused;
                events.push(GameEvent::Paused);
            }
            GameStatus::Paused => {
                self.status = GameStatus::Playing;
                events.push(GameEvent::Resumed);
            }
            GameStatus::GameOver => return Err(CommandError::GameOver),
        }
        Ok(())
    }

    fn restart(&mut self, events: &mut Vec<GameEvent>) {
        *self = Self::with_generator(self.generator.clone());
        events.push(GameEvent::Started);
        tracing::info!("game restarted");
    }

    fn take_next(&mut self) -> Piece {
        match self.next_piece.take() {
            Some(piece) => piece,
            None => self.generator.draw(),
        }
    }

    /// Locks the falling piece, clears rows, scores, and promotes the next piece.
    fn lock(&mut self, drop_rows: usize, events: &mut Vec<GameEvent>) {
        let piece = self.current();
        let (board, line_clear) = self.board.placed(&piece).clear_full_rows();
        let cleared_lines = line_clear.count();
        let leveled_up = self.stats.complete_piece_drop(cleared_lines, drop_rows);
        self.board = board;
        self.can_hold = true;

        events.push(GameEvent::PieceLocked);
        if cleared_lines > 0 {
            events.push(GameEvent::LinesCleared(cleared_lines));
            self.last_line_clear = Some(line_clear);
        }
        if leveled_up {
            events.push(GameEvent::LevelUp {
                level: self.stats.level(),
            });
        }
        tracing::debug!(
            piece = %piece.kind().as_char(),
            cleared_lines,
            score = self.stats.score(),
            level = self.stats.level(),
            "piece locked"
        );

        let promoted = self.take_next();
        if !self.board.can_place(&promoted) {
            self.current_piece = None;
            self.next_piece = None;
            self.status = GameStatus::GameOver;
            events.push(GameEvent::GameOver);
            tracing::info!(
                score = self.stats.score(),
                lines = self.stats.total_cleared_lines(),
                level = self.stats.level(),
                "game over"
            );
            return;
        }
        self.current_piece = Some(promoted);
        self.next_piece = Some(self.generator.draw());
    }
}
