use cltlab_sim::sample_size::{
    ConfidenceLevel, DEFAULT_POPULATION_SIZE, MARGIN_OF_ERROR_RANGE, MARGIN_OF_ERROR_STEP,
    PROPORTION_RANGE, SampleSizeError, SampleSizeEstimate, SampleSizeRequest,
};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::{
    tui::Panel,
    ui::widgets::color,
};

// u64::MAX has 20 digits
const MAX_POPULATION_DIGITS: usize = 19;
const PROPORTION_STEP: f64 = 1.0;
const FIELDS_HEIGHT: u16 = 6;
const HINT_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Population,
    Confidence,
    MarginOfError,
    Proportion,
}

impl Field {
    const ALL: [Self; 4] = [
        Self::Population,
        Self::Confidence,
        Self::MarginOfError,
        Self::Proportion,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Population => "Population size",
            Self::Confidence => "Confidence level",
            Self::MarginOfError => "Margin of error",
            Self::Proportion => "Expected proportion",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Population => {
                "Number of individuals in the population. Type digits to edit, \
                 or press i for an infinite population."
            }
            Self::Confidence => {
                "Probability that the sample result lies within the margin of error \
                 of the population value. 95% is the usual choice."
            }
            Self::MarginOfError => {
                "Largest error accepted in the results. A smaller margin requires a larger sample."
            }
            Self::Proportion => {
                "Expected share of the population with the attribute of interest. \
                 Without a prior estimate use 50%, which gives the most conservative size."
            }
        }
    }
}

/// Survey sample-size calculator.
#[derive(Debug)]
pub struct CalculatorPanel {
    population_input: String,
    infinite: bool,
    confidence: ConfidenceLevel,
    margin_of_error: f64,
    proportion: f64,
    selected: usize,
}

impl Default for CalculatorPanel {
    fn default() -> Self {
        let request = SampleSizeRequest::default();
        Self {
            population_input: DEFAULT_POPULATION_SIZE.to_string(),
            infinite: false,
            confidence: request.confidence,
            margin_of_error: request.margin_of_error,
            proportion: request.proportion,
            selected: 0,
        }
    }
}

impl CalculatorPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn selected_field(&self) -> Field {
        Field::ALL[self.selected]
    }

    /// Current inputs; an empty or zero population means an infinite one.
    fn request(&self) -> SampleSizeRequest {
        let population = if self.infinite {
            None
        } else {
            self.population_input.parse::<u64>().ok().filter(|&n| n > 0)
        };
        SampleSizeRequest {
            population,
            confidence: self.confidence,
            margin_of_error: self.margin_of_error,
            proportion: self.proportion,
        }
    }

    fn estimate(&self) -> Result<SampleSizeEstimate, SampleSizeError> {
        self.request().estimate()
    }

    fn adjust(&mut self, increase: bool) {
        match self.selected_field() {
            Field::Population => {}
            Field::Confidence => {
                self.confidence = if increase {
                    self.confidence.raise()
                } else {
                    self.confidence.lower()
                };
            }
            Field::MarginOfError => {
                let delta = if increase {
                    MARGIN_OF_ERROR_STEP
                } else {
                    -MARGIN_OF_ERROR_STEP
                };
                self.margin_of_error = (self.margin_of_error + delta).clamp(
                    *MARGIN_OF_ERROR_RANGE.start(),
                    *MARGIN_OF_ERROR_RANGE.end(),
                );
            }
            Field::Proportion => {
                let delta = if increase {
                    PROPORTION_STEP
                } else {
                    -PROPORTION_STEP
                };
                self.proportion = (self.proportion + delta)
                    .clamp(*PROPORTION_RANGE.start(), *PROPORTION_RANGE.end());
            }
        }
    }

    fn push_digit(&mut self, digit: char) {
        if self.population_input.len() < MAX_POPULATION_DIGITS {
            self.population_input.push(digit);
        }
        self.infinite = false;
    }

    fn field_line(&self, field: Field) -> Line<'static> {
        let value = match field {
            Field::Population if self.infinite => "infinite".to_owned(),
            Field::Population if self.population_input.is_empty() => {
                "(empty: infinite)".to_owned()
            }
            Field::Population => self.population_input.clone(),
            Field::Confidence => format!("< {} >", self.confidence),
            Field::MarginOfError => format!("< {:.1}% >", self.margin_of_error),
            Field::Proportion => format!("< {:.0}% >", self.proportion),
        };
        let selected = field == self.selected_field();
        let marker = if selected { ">> " } else { "   " };
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{:<20}", field.label()), style),
            Span::styled(value, style),
        ])
    }

    fn result_lines(&self) -> Vec<Line<'static>> {
        let estimate = match self.estimate() {
            Ok(estimate) => estimate,
            Err(err) => {
                return vec![Line::styled(
                    format!("  Error: {err}"),
                    Style::default().fg(color::ERROR),
                )];
            }
        };
        let mut lines = vec![
            Line::styled(
                format!("  Required sample size: {}", estimate.required),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "  Minimum number of respondents for results that reflect the population",
                Style::default().fg(color::MUTED),
            ),
            Line::styled(
                "  at the chosen confidence level and margin of error.",
                Style::default().fg(color::MUTED),
            ),
            Line::raw(""),
            Line::raw(format!("  z  = {}", estimate.z)),
            Line::raw(format!("  n0 = z²·p·(1-p)/e² = {:.2}", estimate.base)),
        ];
        if let Some(corrected) = estimate.corrected {
            lines.push(Line::raw(format!(
                "  n  = n0/(1+(n0-1)/N) = {corrected:.2}"
            )));
        } else {
            lines.push(Line::styled(
                "  (infinite population: no correction)",
                Style::default().fg(color::MUTED),
            ));
        }
        lines
    }
}

impl Panel for CalculatorPanel {
    fn title(&self) -> &str {
        "Sample Size"
    }

    fn description(&self) -> &str {
        "Compute how many respondents a survey needs for a given confidence and margin of error."
    }

    fn help(&self) -> String {
        "↑/↓: Select | ←/→: Adjust | 0-9/Backspace: Population | i: Infinite".to_owned()
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        let len = Field::ALL.len();
        match key.code {
            KeyCode::Up => self.selected = (self.selected + len - 1) % len,
            KeyCode::Down => self.selected = (self.selected + 1) % len,
            KeyCode::Left => self.adjust(false),
            KeyCode::Right => self.adjust(true),
            KeyCode::Char('i') => self.infinite = !self.infinite,
            KeyCode::Char(c) if c.is_ascii_digit() => self.push_digit(c),
            KeyCode::Backspace => {
                self.population_input.pop();
                self.infinite = false;
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let [fields_area, hint_area, result_area] = Layout::vertical([
            Constraint::Length(FIELDS_HEIGHT),
            Constraint::Length(HINT_HEIGHT),
            Constraint::Fill(1),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(area);

        let fields = Paragraph::new(
            Field::ALL
                .iter()
                .map(|&field| self.field_line(field))
                .collect::<Vec<_>>(),
        )
        .block(
            Block::bordered()
                .title("Survey")
                .merge_borders(MergeStrategy::Exact),
        );
        let result = Paragraph::new(self.result_lines()).block(
            Block::bordered()
                .title("Result")
                .merge_borders(MergeStrategy::Exact),
        );

        let hint = Paragraph::new(self.selected_field().hint())
            .style(Style::default().fg(color::MUTED))
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(self.selected_field().label())
                    .merge_borders(MergeStrategy::Exact),
            );

        frame.render_widget(fields, fields_area);
        frame.render_widget(hint, hint_area);
        frame.render_widget(result, result_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn press(panel: &mut CalculatorPanel, code: KeyCode) {
        panel.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn select(panel: &mut CalculatorPanel, field: Field) {
        while panel.selected_field() != field {
            press(panel, KeyCode::Down);
        }
    }

    #[test]
    fn test_default_estimate() {
        let panel = CalculatorPanel::new();
        let estimate = panel.estimate().unwrap();
        assert_eq!(estimate.required, 383);
    }

    #[test]
    fn test_margin_of_error_is_clamped() {
        let mut panel = CalculatorPanel::new();
        select(&mut panel, Field::MarginOfError);
        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.margin_of_error, 5.5);
        for _ in 0..20 {
            press(&mut panel, KeyCode::Right);
        }
        assert_eq!(panel.margin_of_error, 10.0);
        for _ in 0..30 {
            press(&mut panel, KeyCode::Left);
        }
        assert_eq!(panel.margin_of_error, 1.0);
    }

    #[test]
    fn test_proportion_and_confidence() {
        let mut panel = CalculatorPanel::new();
        select(&mut panel, Field::Proportion);
        for _ in 0..60 {
            press(&mut panel, KeyCode::Right);
        }
        assert_eq!(panel.proportion, 99.0);

        select(&mut panel, Field::Confidence);
        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.confidence, ConfidenceLevel::P99);
        press(&mut panel, KeyCode::Left);
        press(&mut panel, KeyCode::Left);
        press(&mut panel, KeyCode::Left);
        assert_eq!(panel.confidence, ConfidenceLevel::P90);
    }

    #[test]
    fn test_population_editing() {
        let mut panel = CalculatorPanel::new();
        for _ in 0..6 {
            press(&mut panel, KeyCode::Backspace);
        }
        assert_eq!(panel.request().population, None);
        assert_eq!(panel.estimate().unwrap().required, 385);

        for c in "1000".chars() {
            press(&mut panel, KeyCode::Char(c));
        }
        assert_eq!(panel.estimate().unwrap().required, 278);

        press(&mut panel, KeyCode::Char('i'));
        assert_eq!(panel.request().population, None);
        assert_eq!(panel.estimate().unwrap().required, 385);

        press(&mut panel, KeyCode::Char('0'));
        assert!(!panel.infinite);
        assert_eq!(panel.request().population, Some(10_000));
    }

    #[test]
    fn test_population_input_is_bounded() {
        let mut panel = CalculatorPanel::new();
        for _ in 0..40 {
            press(&mut panel, KeyCode::Char('9'));
        }
        assert_eq!(panel.population_input.len(), MAX_POPULATION_DIGITS);
        assert!(panel.request().population.is_some());
    }

    #[test]
    fn test_field_selection_wraps() {
        let mut panel = CalculatorPanel::new();
        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.selected_field(), Field::Proportion);
        press(&mut panel, KeyCode::Down);
        assert_eq!(panel.selected_field(), Field::Population);
    }

    #[test]
    fn test_hint_follows_selected_field() {
        let mut panel = CalculatorPanel::new();
        select(&mut panel, Field::Proportion);

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal
            .draw(|frame| panel.draw(frame, frame.area()))
            .unwrap();
        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(content.contains("Without a prior estimate use 50%"));
        assert!(content.contains("Required sample size: 383"));
        assert!(content.contains("Minimum number of respondents"));
    }
}
