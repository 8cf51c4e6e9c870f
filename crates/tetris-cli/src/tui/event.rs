use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by TUI applications.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// Logic update timing; carries the time since the previous tick.
    Tick(Duration),
    /// Screen render timing.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    #[from]
    Crossterm(CrosstermEvent),
}
