use std::{io::Write, time::Duration};

use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetris_engine::{GameEvent, GameSession, GameStatus};

use crate::{
    tui::{App, RenderMode, Runtime},
    ui::widgets::{GameDisplay, KeyBindingDisplay},
};

use super::{
    keymap::{self, Action},
    sound::SoundSink,
};

/// How long cleared rows stay highlighted.
const LINE_CLEAR_FLASH: Duration = Duration::from_millis(600);

/// Countdown for the line-clear highlight.
#[derive(Debug, Default, Clone, Copy)]
struct LineClearFlash {
    remaining: Option<Duration>,
}

impl LineClearFlash {
    fn start(&mut self) {
        self.remaining = Some(LINE_CLEAR_FLASH);
    }

    fn cancel(&mut self) {
        self.remaining = None;
    }

    fn is_active(self) -> bool {
        self.remaining.is_some()
    }

    /// Counts down by `elapsed`. Returns `true` on the call that ends the flash.
    fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let remaining = remaining.saturating_sub(elapsed);
        if remaining.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(remaining);
            false
        }
    }
}

#[derive(Debug)]
pub(super) struct PlayApp<W> {
    session: GameSession,
    sound: SoundSink<W>,
    tick_interval: Duration,
    frame_interval: Duration,
    show_ghost: bool,
    flash: LineClearFlash,
    is_exiting: bool,
}

impl<W> PlayApp<W>
where
    W: Write,
{
    pub(super) fn new(
        session: GameSession,
        sound: SoundSink<W>,
        tick_interval: Duration,
        frame_interval: Duration,
        show_ghost: bool,
    ) -> Self {
        Self {
            session,
            sound,
            tick_interval,
            frame_interval,
            show_ghost,
            flash: LineClearFlash::default(),
            is_exiting: false,
        }
    }

    pub(super) fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Game(command) => self.session.enqueue(command),
            Action::ToggleMute => self.sound.toggle_mute(),
            Action::Quit => self.is_exiting = true,
        }
    }

    fn forward_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::LinesCleared(_) => self.flash.start(),
                GameEvent::Started => self.flash.cancel(),
                _ => {}
            }
            self.sound.play(event);
        }
    }
}

impl<W> App for PlayApp<W>
where
    W: Write,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(self.tick_interval));
        runtime.set_render_mode(RenderMode::Throttled(self.frame_interval));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_event()
            && let Some(action) = keymap::action_for(&key)
        {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game_display = GameDisplay::new(&self.session)
            .show_ghost(self.show_ghost)
            .flash(self.flash.is_active())
            .muted(self.sound.is_muted());
        let bindings = match self.session.state().status() {
            GameStatus::Playing => keymap::PLAYING_BINDINGS,
            GameStatus::Paused => keymap::PAUSED_BINDINGS,
            GameStatus::GameOver => keymap::GAME_OVER_BINDINGS,
        };
        let help = KeyBindingDisplay::new(bindings);

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(game_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(game_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        if self.flash.advance(elapsed) {
            self.session.acknowledge_line_clear();
        }
        self.session.tick(elapsed);
        self.forward_events();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tetris_engine::{Command, PieceSeed};

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> PlayApp<Vec<u8>> {
        let session = GameSession::with_seed(PieceSeed::from_bytes([7; 16]));
        PlayApp::new(session, SoundSink::new(Vec::new(), false), FRAME, FRAME, true)
    }

    fn press(app: &mut PlayApp<Vec<u8>>, code: KeyCode) {
        let mut runtime = Runtime::new();
        app.handle_event(
            &mut runtime,
            Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
        );
    }

    #[test]
    fn test_flash_counts_down() {
        let mut flash = LineClearFlash::default();
        assert!(!flash.advance(FRAME));

        flash.start();
        assert!(flash.is_active());
        assert!(!flash.advance(Duration::from_millis(599)));
        assert!(flash.is_active());
        assert!(flash.advance(Duration::from_millis(1)));
        assert!(!flash.is_active());
        assert!(!flash.advance(FRAME));
    }

    #[test]
    fn test_flash_cancel() {
        let mut flash = LineClearFlash::default();
        flash.start();
        flash.cancel();
        assert!(!flash.is_active());
        assert!(!flash.advance(LINE_CLEAR_FLASH));
    }

    #[test]
    fn test_keys_are_applied_on_next_tick() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let x = app.session().state().current_piece().unwrap().position().x;

        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().pending_commands(), 1);

        app.update(&mut runtime, FRAME);
        assert_eq!(app.session().pending_commands(), 0);
        let piece = app.session().state().current_piece().unwrap();
        assert_eq!(piece.position().x, x - 1);
    }

    #[test]
    fn test_pause_key_pauses() {
        let mut app = app();
        let mut runtime = Runtime::new();
        press(&mut app, KeyCode::Char('p'));
        app.update(&mut runtime, FRAME);
        assert!(app.session().state().is_paused());
    }

    #[test]
    fn test_quit_and_mute_keys() {
        let mut app = app();
        assert!(!app.sound.is_muted());
        press(&mut app, KeyCode::Char('m'));
        assert!(app.sound.is_muted());
        assert_eq!(app.session().pending_commands(), 0);

        assert!(!app.should_exit());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());
    }

    #[test]
    fn test_restart_cancels_flash() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.flash.start();
        app.handle_action(Action::Game(Command::Restart));
        app.update(&mut runtime, FRAME);
        assert!(!app.flash.is_active());
    }

    #[test]
    fn test_hard_drops_reach_game_over() {
        let mut app = app();
        let mut runtime = Runtime::new();
        for _ in 0..200 {
            press(&mut app, KeyCode::Char(' '));
            app.update(&mut runtime, FRAME);
            if app.session().state().is_game_over() {
                break;
            }
        }
        assert!(app.session().state().is_game_over());
        assert!(!app.should_exit());
    }
}
