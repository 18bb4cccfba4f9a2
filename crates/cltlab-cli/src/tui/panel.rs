use std::fmt;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::Tabs,
};

use crate::tui::App;

/// One tab of a [`PanelTabs`] application.
pub trait Panel: fmt::Debug {
    /// Tab title.
    fn title(&self) -> &str;

    /// One-line explanation shown under the tab bar.
    fn description(&self) -> &str;

    /// Key help shown at the bottom of the screen.
    fn help(&self) -> String;

    /// Returns `true` while the panel has work to spread over frames.
    ///
    /// Only the foreground panel is asked, so a background panel is paused.
    fn is_animating(&self) -> bool {
        false
    }

    /// Runs one frame's worth of work.
    fn advance(&mut self) {}

    /// Handles a terminal event not consumed by the tab bar.
    fn handle_event(&mut self, event: &Event);

    /// Renders the panel body into `area`.
    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// Tabbed application switching between panels.
///
/// `Tab`/`BackTab` cycle through panels, `q`/`Esc` exit; every other event is
/// forwarded to the foreground panel.
#[derive(Debug)]
pub struct PanelTabs<'a> {
    panels: Vec<Box<dyn Panel + 'a>>,
    active: usize,
    should_exit: bool,
}

impl<'a> PanelTabs<'a> {
    /// Creates the tab set with the first panel in the foreground.
    ///
    /// # Panics
    ///
    /// Panics if `panels` is empty.
    #[must_use]
    pub fn new(panels: Vec<Box<dyn Panel + 'a>>) -> Self {
        assert!(!panels.is_empty(), "at least one panel is required");
        Self {
            panels,
            active: 0,
            should_exit: false,
        }
    }

    fn active_panel(&self) -> &dyn Panel {
        &*self.panels[self.active]
    }
}

impl App for PanelTabs<'_> {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: Event) {
        let len = self.panels.len();
        if let Some(key) = event.as_key_event() {
            match key.code {
                KeyCode::Tab => {
                    self.active = (self.active + 1) % len;
                    return;
                }
                KeyCode::BackTab => {
                    self.active = (self.active + len - 1) % len;
                    return;
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_exit = true;
                    return;
                }
                _ => {}
            }
        }
        self.panels[self.active].handle_event(&event);
    }

    fn is_animating(&self) -> bool {
        self.active_panel().is_animating()
    }

    fn advance(&mut self) {
        self.panels[self.active].advance();
    }

    fn draw(&self, frame: &mut Frame) {
        let [tabs_area, description_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(self.panels.iter().map(|p| p.title().to_owned()))
            .select(self.active)
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        let panel = self.active_panel();
        let description = Text::from(panel.description())
            .style(Style::default().fg(Color::Gray))
            .centered();
        frame.render_widget(description, description_area);

        panel.draw(frame, body_area);

        let help = Text::from(format!("{} | Tab: Switch | q/Esc: Quit", panel.help()))
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help, help_area);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    /// Records calls made to the panels, in order.
    #[derive(Debug, Clone, Default)]
    struct CallLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl CallLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            self.calls.take()
        }
    }

    #[derive(Debug)]
    struct TestPanel {
        name: &'static str,
        animating: bool,
        log: CallLog,
    }

    impl TestPanel {
        fn boxed(name: &'static str, animating: bool, log: &CallLog) -> Box<dyn Panel> {
            Box::new(Self {
                name,
                animating,
                log: log.clone(),
            })
        }
    }

    impl Panel for TestPanel {
        fn title(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "test panel"
        }

        fn help(&self) -> String {
            String::new()
        }

        fn is_animating(&self) -> bool {
            self.animating
        }

        fn advance(&mut self) {
            self.log.log(format!("{}: advance", self.name));
        }

        fn handle_event(&mut self, _event: &Event) {
            self.log.log(format!("{}: handle_event", self.name));
        }

        fn draw(&self, _frame: &mut Frame, _area: Rect) {
            self.log.log(format!("{}: draw", self.name));
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn tabs(log: &CallLog) -> PanelTabs<'static> {
        PanelTabs::new(vec![
            TestPanel::boxed("A", true, log),
            TestPanel::boxed("B", false, log),
            TestPanel::boxed("C", false, log),
        ])
    }

    #[test]
    fn test_tab_cycles_with_wraparound() {
        let log = CallLog::default();
        let mut tabs = tabs(&log);
        assert_eq!(tabs.active, 0);

        tabs.handle_event(key(KeyCode::Tab));
        assert_eq!(tabs.active, 1);
        tabs.handle_event(key(KeyCode::Tab));
        tabs.handle_event(key(KeyCode::Tab));
        assert_eq!(tabs.active, 0);

        tabs.handle_event(key(KeyCode::BackTab));
        assert_eq!(tabs.active, 2);
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_other_events_go_to_active_panel() {
        let log = CallLog::default();
        let mut tabs = tabs(&log);
        tabs.handle_event(key(KeyCode::Char('r')));
        tabs.advance();
        tabs.handle_event(key(KeyCode::Tab));
        tabs.handle_event(key(KeyCode::Up));
        assert_eq!(log.take(), ["A: handle_event", "A: advance", "B: handle_event"]);
    }

    #[test]
    fn test_background_panel_is_paused() {
        let log = CallLog::default();
        let mut tabs = tabs(&log);
        assert!(tabs.is_animating());

        tabs.handle_event(key(KeyCode::Tab));
        assert!(!tabs.is_animating());

        tabs.handle_event(key(KeyCode::BackTab));
        assert!(tabs.is_animating());
    }

    #[test]
    fn test_quit() {
        let log = CallLog::default();
        let mut tabs = tabs(&log);
        assert!(!tabs.should_exit());
        tabs.handle_event(key(KeyCode::Esc));
        assert!(tabs.should_exit());
    }

    #[test]
    fn test_draw_shows_only_active_panel() {
        let log = CallLog::default();
        let mut tabs = tabs(&log);
        tabs.handle_event(key(KeyCode::Tab));

        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| tabs.draw(frame)).unwrap();
        assert_eq!(log.take(), ["B: draw"]);

        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(content.contains("test panel"));
        assert!(content.contains("Tab: Switch"));
    }
}
