use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tetris_engine::Command;

use crate::ui::widgets::KeyBinding;

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Game(Command),
    ToggleMute,
    Quit,
}

/// Maps a key event to an action. Releases and unbound keys map to nothing.
pub(super) fn action_for(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let action = match event.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Action::Game(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Action::Game(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Action::Game(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('w' | 'W') => Action::Game(Command::Rotate),
        KeyCode::Char(' ') => Action::Game(Command::HardDrop),
        KeyCode::Char('c' | 'C') => Action::Game(Command::Hold),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Action::Game(Command::TogglePause),
        KeyCode::Char('r' | 'R') => Action::Game(Command::Restart),
        KeyCode::Char('m' | 'M') => Action::ToggleMute,
        KeyCode::Char('q' | 'Q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

pub(super) const PLAYING_BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["Space"], "Hard Drop"),
    (&["C"], "Hold"),
    (&["P"], "Pause"),
    (&["M"], "Mute"),
    (&["Q"], "Quit"),
];

pub(super) const PAUSED_BINDINGS: &[KeyBinding<'static>] = &[
    (&["P", "Esc"], "Resume"),
    (&["R"], "Restart"),
    (&["M"], "Mute"),
    (&["Q"], "Quit"),
];

pub(super) const GAME_OVER_BINDINGS: &[KeyBinding<'static>] =
    &[(&["R"], "Restart"), (&["M"], "Mute"), (&["Q"], "Quit")];
