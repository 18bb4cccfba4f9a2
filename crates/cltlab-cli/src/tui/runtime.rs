use std::{io, time::Duration};

use crate::tui::{
    App,
    frame_clock::{FrameClock, FrameEvent},
};

/// Runs an [`App`] in the terminal at a fixed frame rate.
///
/// The app decides when frames are needed through [`App::is_animating`], so
/// nothing runs between key presses while it is idle.
#[derive(Debug)]
pub struct Runtime {
    clock: FrameClock,
}

impl Runtime {
    /// Creates a runtime producing at most `frame_rate` frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `frame_rate` is not positive and finite.
    #[must_use]
    pub fn new(frame_rate: f64) -> Self {
        Self {
            clock: FrameClock::new(Duration::from_secs_f64(frame_rate.recip())),
        }
    }

    /// Runs `app` until it asks to exit.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            while !app.should_exit() {
                self.clock.set_animating(app.is_animating());
                let event = self.clock.next()?;
                if apply(app, event) {
                    terminal.draw(|f| app.draw(f))?;
                }
            }
            Ok(())
        })
    }
}

/// Applies one clock event to `app`; returns `true` if the frame must be drawn.
fn apply<A>(app: &mut A, event: FrameEvent) -> bool
where
    A: App,
{
    match event {
        FrameEvent::Frame => {
            if app.is_animating() {
                app.advance();
            }
            true
        }
        FrameEvent::Input(event) => {
            app.handle_event(event);
            false
        }
    }
}
