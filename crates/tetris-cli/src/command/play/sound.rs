use std::io::{self, Write};

use tetris_engine::GameEvent;

/// Audible cue for a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Cue {
    /// A single terminal bell.
    Bell,
    /// Two bells, for milestones.
    DoubleBell,
}

impl Cue {
    /// Returns the cue for `event`. Only line clears and milestones are audible.
    pub(super) fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::LinesCleared(4..) | GameEvent::LevelUp { .. } | GameEvent::GameOver => {
                Some(Self::DoubleBell)
            }
            GameEvent::LinesCleared(1..) => Some(Self::Bell),
            GameEvent::LinesCleared(0)
            | GameEvent::Started
            | GameEvent::PieceMoved
            | GameEvent::PieceRotated
            | GameEvent::PieceHeld
            | GameEvent::PieceLocked
            | GameEvent::Paused
            | GameEvent::Resumed => None,
        }
    }

    const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Bell => b"\x07",
            Self::DoubleBell => b"\x07\x07",
        }
    }
}

/// Fire-and-forget sound output using the terminal bell.
#[derive(Debug)]
pub(super) struct SoundSink<W> {
    out: W,
    muted: bool,
}

impl<W> SoundSink<W>
where
    W: Write,
{
    pub(super) fn new(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub(super) fn is_muted(&self) -> bool {
        self.muted
    }

    pub(super) fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        tracing::debug!(muted = self.muted, "sound toggled");
    }

    /// Plays the cue for `event`. Output failures are logged and otherwise ignored.
    pub(super) fn play(&mut self, event: GameEvent) {
        if self.muted {
            return;
        }
        let Some(cue) = Cue::for_event(event) else {
            return;
        };
        if let Err(err) = self.emit(cue) {
            tracing::warn!(%err, "failed to play sound cue");
        }
    }

    fn emit(&mut self, cue: Cue) -> io::Result<()> {
        self.out.write_all(cue.bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues() {
        assert_eq!(Cue::for_event(GameEvent::LinesCleared(1)), Some(Cue::Bell));
        assert_eq!(Cue::for_event(GameEvent::LinesCleared(3)), Some(Cue::Bell));
        assert_eq!(
            Cue::for_event(GameEvent::LinesCleared(4)),
            Some(Cue::DoubleBell)
        );
        assert_eq!(
            Cue::for_event(GameEvent::LevelUp { level: 2 }),
            Some(Cue::DoubleBell)
        );
        assert_eq!(Cue::for_event(GameEvent::GameOver), Some(Cue::DoubleBell));
        assert_eq!(Cue::for_event(GameEvent::PieceMoved), None);
        assert_eq!(Cue::for_event(GameEvent::LinesCleared(0)), None);
    }

    #[test]
    fn test_sink_writes_bells() {
        let mut sink = SoundSink::new(Vec::new(), false);
        sink.play(GameEvent::PieceLocked);
        sink.play(GameEvent::LinesCleared(2));
        sink.play(GameEvent::GameOver);
        assert_eq!(sink.out, b"\x07\x07\x07");
    }

    #[test]
    fn test_muted_sink_is_silent() {
        let mut sink = SoundSink::new(Vec::new(), true);
        sink.play(GameEvent::LinesCleared(4));
        assert!(sink.out.is_empty());

        sink.toggle_mute();
        assert!(!sink.is_muted());
        sink.play(GameEvent::LinesCleared(1));
        assert_eq!(sink.out, b"\x07");
    }
}
