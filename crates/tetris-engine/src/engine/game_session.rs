use std::{collections::VecDeque, time::Duration};

use crate::CommandError;

use super::{
    game_event::GameEvent,
    game_state::{Command, GameState, Transition},
    game_stats::drop_interval,
    gravity::GravityClock,
    piece_generator::PieceSeed,
};

/// A running game: the single owner of the [`GameState`].
///
/// Input and gravity are serialized through the session. Commands can be applied right
/// away with [`dispatch`](Self::dispatch) or queued with [`enqueue`](Self::enqueue); queued
/// commands run in FIFO order at the start of the next [`tick`](Self::tick), before gravity.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use tetris_engine::{Command, GameEvent, GameSession};
///
/// let mut session = GameSession::new();
/// session.enqueue(Command::HardDrop);
/// session.tick(Duration::from_millis(16));
///
/// let events: Vec<_> = session.drain_events().collect();
/// assert_eq!(events[0], GameEvent::Started);
/// assert!(events.contains(&GameEvent::PieceLocked));
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    queue: VecDeque<Command>,
    events: Vec<GameEvent>,
    gravity: GravityClock,
    play_time: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(GameState::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_state(GameState::with_seed(seed))
    }

    fn from_state(state: GameState) -> Self {
        tracing::info!("game started");
        Self {
            state,
            queue: VecDeque::new(),
            events: vec![GameEvent::Started],
            gravity: GravityClock::new(),
            play_time: Duration::ZERO,
        }
    }

    /// Returns the current state for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns an owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Returns the time spent in [`GameStatus::Playing`](super::GameStatus::Playing).
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Returns the gravity interval at the current level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        drop_interval(self.state.level())
    }

    /// Returns the number of commands waiting for the next tick.
    #[must_use]
    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    /// Queues `command` for the next [`tick`](Self::tick).
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Applies `command` immediately.
    ///
    /// On success the new state replaces the old one and the produced events are buffered.
    /// On rejection nothing changes.
    pub fn dispatch(&mut self, command: Command) -> Result<(), CommandError> {
        let Transition { state, events } = self.state.apply(command).inspect_err(|err| {
            tracing::trace!(?command, %err, "command rejected");
        })?;
        if command == Command::Restart {
            self.gravity.reset();
            self.play_time = Duration::ZERO;
        }
        self.state = state;
        self.events.extend(events);
        Ok(())
    }

    /// Advances the session by `elapsed`.
    ///
    /// Queued commands are applied first, in order; rejected ones are dropped. Then, if the
    /// game is still playing, play time advances and gravity moves the piece down once the
    /// level's drop interval has accumulated.
    pub fn tick(&mut self, elapsed: Duration) {
        while let Some(command) = self.queue.pop_front() {
            _ = self.dispatch(command);
        }
        if !self.state.status().is_playing() {
            return;
        }
        self.play_time += elapsed;
        if self.gravity.advance(elapsed, self.drop_interval()) {
            _ = self.dispatch(Command::SoftDrop);
        }
    }

    /// Takes every event produced since the previous call, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Clears the pending line-clear signal once it has been shown.
    pub fn acknowledge_line_clear(&mut self) {
        self.state.acknowledge_line_clear();
    }
}
