use crossterm::event::Event;
use ratatui::Frame;

/// Application driven by [`Runtime::run`](crate::tui::Runtime::run).
///
/// The runtime redraws after input and, while [`is_animating`](Self::is_animating)
/// returns `true`, calls [`advance`](Self::advance) once per frame before drawing.
pub trait App {
    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, etc.).
    fn handle_event(&mut self, event: Event);

    /// Returns `true` while there is work to spread over frames, such as a
    /// batch of draws in flight.
    fn is_animating(&self) -> bool;

    /// Runs one frame's worth of work. Only called while animating.
    fn advance(&mut self);

    fn draw(&self, frame: &mut Frame);
}
