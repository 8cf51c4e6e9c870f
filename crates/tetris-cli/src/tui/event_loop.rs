use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, but with minimum interval between renders.
    ///
    /// If events occur faster than the interval, they are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    ///
    /// Returns `None` when [`interval_from_rate`] rejects the rate.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Option<Self> {
        interval_from_rate(rate).map(Self::Throttled)
    }
}

/// Converts a rate in Hz into the interval between two events.
///
/// Returns `None` for rates whose interval is zero or not representable as a
/// [`Duration`]: zero, negative, NaN, infinite or vanishingly small rates.
#[must_use]
pub fn interval_from_rate(rate: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(rate.recip())
        .ok()
        .filter(|interval| !interval.is_zero())
}

/// Event loop state management.
///
/// Produces tick, render and terminal events in that priority order.
/// Without a tick interval no tick events are generated.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new() -> Self {
        let now = Instant::now();
        let past_time = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            // First tick is one interval after start, so its elapsed time is meaningful
            last_tick: now,
            last_render: past_time,
            dirty: true, // Initial render is required on startup
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick/render time is reached or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns the tick or render event due at `now`, if any.
    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval {
            let elapsed = now.duration_since(self.last_tick);
            if elapsed >= tick_interval {
                self.last_tick = now;
                self.dirty = true;
                return Some(TuiEvent::Tick(elapsed));
            }
        }

        let do_render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if do_render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}
