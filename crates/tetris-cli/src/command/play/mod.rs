use std::time::Duration;

use anyhow::Context as _;
use tetris_engine::{GameSession, PieceSeed};

use crate::tui::{self, Runtime};

use self::{app::PlayApp, sound::SoundSink};

mod app;
mod keymap;
mod sound;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// Game ticks per second
    #[clap(long, default_value_t = 60.0)]
    pub(super) tick_rate: f64,
    /// Maximum frames drawn per second
    #[clap(long, default_value_t = 60.0)]
    pub(super) frame_rate: f64,
    /// Hide the landing preview of the falling piece
    #[clap(long)]
    pub(super) no_ghost: bool,
    /// Start with sound cues muted
    #[clap(long)]
    pub(super) mute: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: 60.0,
            frame_rate: 60.0,
            no_ghost: false,
            mute: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        tick_rate,
        frame_rate,
        no_ghost,
        mute,
    } = arg;

    let tick_interval = rate_interval("tick rate", *tick_rate)?;
    let frame_interval = rate_interval("frame rate", *frame_rate)?;

    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(%seed, "starting interactive game");

    let session = GameSession::with_seed(seed);
    let sound = SoundSink::new(std::io::stdout(), *mute);
    let mut app = PlayApp::new(session, sound, tick_interval, frame_interval, !*no_ghost);

    Runtime::new().run(&mut app)?;

    let state = app.session().state();
    tracing::info!(
        score = state.score(),
        level = state.level(),
        lines = state.lines(),
        "interactive game finished"
    );
    Ok(())
}

fn rate_interval(name: &str, rate: f64) -> anyhow::Result<Duration> {
    tui::interval_from_rate(rate)
        .with_context(|| format!("{name} must be a positive number of events per second: {rate}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_interval() {
        assert_eq!(
            rate_interval("tick rate", 60.0).unwrap(),
            Duration::from_secs_f64(1.0 / 60.0)
        );
    }

    #[test]
    fn test_unusable_rates_are_errors() {
        for rate in [0.0, -1.0, 1e-30, f64::NAN] {
            let err = rate_interval("frame rate", rate).unwrap_err();
            assert!(err.to_string().starts_with("frame rate must be"), "{err}");
        }
    }

    #[test]
    fn test_tiny_frame_rate_is_rejected_before_terminal_setup() {
        let arg = PlayArg {
            frame_rate: 1e-30,
            ..PlayArg::default()
        };
        assert!(run(&arg).is_err());
    }
}
