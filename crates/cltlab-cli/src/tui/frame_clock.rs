use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

/// What the runtime does next.
#[derive(Debug, Clone)]
pub(super) enum FrameEvent {
    /// A frame is due: advance the animation if one runs, then redraw.
    Frame,
    /// Terminal input or resize.
    Input(Event),
}

/// Paces frames to a fixed rate.
///
/// While animating, frames follow each other at the frame interval. Otherwise
/// the clock blocks on terminal input and emits a single frame after it, no
/// sooner than one interval after the previous frame.
#[derive(Debug)]
pub(super) struct FrameClock {
    interval: Duration,
    animating: bool,
    stale: bool,
    last_frame: Instant,
}

impl FrameClock {
    pub(super) fn new(interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            interval,
            animating: false,
            // the screen is blank until the first frame
            stale: true,
            last_frame: now.checked_sub(interval).unwrap_or(now),
        }
    }

    pub(super) fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    /// Blocks until a frame is due or terminal input arrives.
    pub(super) fn next(&mut self) -> io::Result<FrameEvent> {
        loop {
            let now = Instant::now();
            if let Some(wait) = self.time_to_frame(now) {
                if wait.is_zero() {
                    self.last_frame = now;
                    self.stale = false;
                    return Ok(FrameEvent::Frame);
                }
                if !event::poll(wait)? {
                    continue;
                }
            }
            self.stale = true;
            return Ok(FrameEvent::Input(event::read()?));
        }
    }

    /// Time until the next frame; `None` if nothing needs drawing.
    fn time_to_frame(&self, now: Instant) -> Option<Duration> {
        (self.animating || self.stale)
            .then(|| (self.last_frame + self.interval).saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(20);

    #[test]
    fn test_first_frame_is_immediate() {
        let clock = FrameClock::new(INTERVAL);
        assert_eq!(clock.time_to_frame(Instant::now()), Some(Duration::ZERO));
    }

    #[test]
    fn test_idle_clock_waits_for_input() {
        let mut clock = FrameClock::new(INTERVAL);
        clock.stale = false;
        assert_eq!(clock.time_to_frame(Instant::now()), None);
    }

    #[test]
    fn test_animation_runs_at_frame_rate() {
        let mut clock = FrameClock::new(INTERVAL);
        let now = Instant::now();
        clock.stale = false;
        clock.last_frame = now;
        clock.set_animating(true);
        assert_eq!(clock.time_to_frame(now), Some(INTERVAL));
        assert_eq!(clock.time_to_frame(now + INTERVAL * 2), Some(Duration::ZERO));
    }

    #[test]
    fn test_input_redraw_is_throttled() {
        let mut clock = FrameClock::new(INTERVAL);
        let now = Instant::now();
        clock.last_frame = now;
        assert_eq!(clock.time_to_frame(now + INTERVAL / 2), Some(INTERVAL / 2));
    }
}
