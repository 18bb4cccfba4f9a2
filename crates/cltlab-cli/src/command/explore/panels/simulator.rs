use cltlab_sim::{
    DataView, DistributionKind, Simulation, SimulationError, SimulationViews,
    session::{BATCH_SIZES, SAMPLE_SIZE_RANGE},
};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block, Gauge, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::{
    tui::Panel,
    ui::widgets::{HistogramCard, color},
};

const PAGE_STEP: usize = 10;
// one row per distribution plus borders
const DISTRIBUTION_LIST_HEIGHT: u16 = 7;

/// Interactive Central Limit Theorem simulator.
///
/// A batch runs `draws_per_frame` draws per frame and animates until it is
/// done; the runtime only asks for frames while the batch is in flight.
#[derive(Debug)]
pub struct SimulatorPanel {
    sim: Simulation,
    bins: usize,
    draws_per_frame: usize,
    views: SimulationViews,
    status: Option<String>,
}

impl SimulatorPanel {
    #[must_use]
    pub fn new(sim: Simulation, bins: usize, draws_per_frame: usize) -> Self {
        let views = sim.views(bins);
        Self {
            sim,
            bins,
            draws_per_frame,
            views,
            status: None,
        }
    }

    fn refresh_samples(&mut self) {
        self.views.latest_sample = DataView::new(self.sim.latest_sample(), self.bins);
        self.views.sample_means = DataView::new(self.sim.sample_means(), self.bins);
    }

    fn report(&mut self, result: Result<(), SimulationError>) {
        self.status = result.err().map(|err| err.to_string());
    }

    fn select_distribution(&mut self, kind: DistributionKind) {
        let result = self.sim.select_distribution(kind);
        if result.is_ok() {
            self.views = self.sim.views(self.bins);
        }
        self.report(result);
    }

    fn adjust_sample_size(&mut self, increase: bool, step: usize) {
        let current = self.sim.sample_size();
        let size = if increase {
            current.saturating_add(step).min(*SAMPLE_SIZE_RANGE.end())
        } else {
            current.saturating_sub(step).max(*SAMPLE_SIZE_RANGE.start())
        };
        let result = self.sim.set_sample_size(size);
        self.report(result);
    }

    fn start_batch(&mut self, count: usize) {
        let result = self.sim.start_batch(count);
        self.report(result);
    }

    fn reset(&mut self) {
        let result = self.sim.reset();
        if result.is_ok() {
            self.refresh_samples();
        }
        self.report(result);
    }
}

impl Panel for SimulatorPanel {
    fn title(&self) -> &str {
        "CLT Simulator"
    }

    fn description(&self) -> &str {
        "Watch sample means approach a normal curve, whatever the shape of the population."
    }

    fn help(&self) -> String {
        let batches = BATCH_SIZES.map(|n| n.to_string()).join("/");
        format!(
            "←/→: Distribution | ↑/↓: Sample Size | 1-{}: Draw {batches} | r: Reset",
            BATCH_SIZES.len()
        )
    }

    fn is_animating(&self) -> bool {
        self.sim.is_busy()
    }

    fn advance(&mut self) {
        if self.sim.step(self.draws_per_frame).is_some() {
            self.refresh_samples();
        }
        if !self.sim.is_busy() {
            // controls rejected during the batch are usable again
            self.status = None;
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        match key.code {
            KeyCode::Left => self.select_distribution(self.sim.distribution().prev()),
            KeyCode::Right => self.select_distribution(self.sim.distribution().next()),
            KeyCode::Up => self.adjust_sample_size(true, 1),
            KeyCode::Down => self.adjust_sample_size(false, 1),
            KeyCode::PageUp => self.adjust_sample_size(true, PAGE_STEP),
            KeyCode::PageDown => self.adjust_sample_size(false, PAGE_STEP),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char(c) => {
                let index = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|d| d.checked_sub(1));
                if let Some(&count) = index.and_then(|i| BATCH_SIZES.get(i)) {
                    self.start_batch(count);
                }
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let [controls_area, charts_area] =
            Layout::horizontal([Constraint::Length(36), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(area);

        let [distribution_pane, stats_pane, progress_pane] = Layout::vertical([
            Constraint::Length(DISTRIBUTION_LIST_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(controls_area);

        let [population_pane, sample_pane, means_pane] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(charts_area);

        frame.render_widget(
            DistributionSelector {
                selected: self.sim.distribution(),
            },
            distribution_pane,
        );
        frame.render_widget(SessionStats { panel: self }, stats_pane);
        frame.render_widget(BatchGauge { sim: &self.sim }, progress_pane);

        frame.render_widget(
            HistogramCard {
                title: "Population",
                view: &self.views.population,
                color: color::POPULATION,
            },
            population_pane,
        );
        frame.render_widget(
            HistogramCard {
                title: "Latest Sample",
                view: &self.views.latest_sample,
                color: color::SAMPLE,
            },
            sample_pane,
        );
        frame.render_widget(
            HistogramCard {
                title: "Sample Means",
                view: &self.views.sample_means,
                color: color::MEANS,
            },
            means_pane,
        );
    }
}

struct DistributionSelector {
    selected: DistributionKind,
}

impl Widget for DistributionSelector {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items = DistributionKind::ALL
            .iter()
            .map(|kind| ListItem::new(kind.to_string()))
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .title("Distribution")
                    .merge_borders(MergeStrategy::Exact),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.index()));

        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

struct SessionStats<'a> {
    panel: &'a SimulatorPanel,
}

impl Widget for SessionStats<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let SimulatorPanel {
            sim, views, status, ..
        } = self.panel;
        let means = &views.sample_means.summary;

        let mut text = vec![
            Line::raw(format!("  Sample size:  {:>10}", sim.sample_size())),
            Line::raw(format!("  Samples:      {:>10}", means.count)),
            Line::raw(""),
            Line::raw("  Std error of the mean"),
            Line::raw(format!(
                "    Expected:   {:>10.3}",
                sim.expected_standard_error()
            )),
        ];
        if means.count >= 2 {
            text.push(Line::raw(format!("    Observed:   {:>10.3}", means.std_dev)));
        } else {
            text.push(Line::raw(format!("    Observed:   {:>10}", "-")));
        }
        if let Some(status) = status {
            text.push(Line::raw(""));
            text.push(Line::styled(
                format!("  {status}"),
                Style::default().fg(color::ERROR),
            ));
        }

        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title("Session")
                    .merge_borders(MergeStrategy::Exact),
            )
            .render(area, buf);
    }
}

struct BatchGauge<'a> {
    sim: &'a Simulation,
}

impl Widget for BatchGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title("Batch")
            .merge_borders(MergeStrategy::Exact);
        let gauge = match self.sim.batch_progress() {
            Some(progress) => Gauge::default()
                .ratio(progress.ratio())
                .label(format!("{}/{}", progress.completed, progress.requested))
                .gauge_style(Style::default().fg(color::MEANS)),
            None => Gauge::default()
                .ratio(0.0)
                .label("Idle")
                .gauge_style(Style::default().fg(color::MUTED)),
        };
        gauge.block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use cltlab_sim::{PopulationConfig, Seed};
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn panel(draws_per_frame: usize) -> SimulatorPanel {
        let sim = Simulation::with_seed(
            DistributionKind::Normal,
            30,
            PopulationConfig::default(),
            Seed::from_u128(11),
        )
        .unwrap();
        SimulatorPanel::new(sim, 30, draws_per_frame)
    }

    fn press(panel: &mut SimulatorPanel, code: KeyCode) {
        panel.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    /// Advances frames until the running batch is done; returns the frame count.
    fn finish_batch(panel: &mut SimulatorPanel) -> usize {
        let mut frames = 0;
        while panel.is_animating() {
            panel.advance();
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_batch_runs_over_frames() {
        let mut panel = panel(10);
        assert!(!panel.is_animating());

        press(&mut panel, KeyCode::Char('3'));
        assert!(panel.is_animating());

        assert_eq!(finish_batch(&mut panel), 10);
        assert_eq!(panel.views.sample_means.summary.count, 100);
        assert_eq!(panel.views.latest_sample.summary.count, 30);
    }

    #[test]
    fn test_controls_rejected_while_busy() {
        let mut panel = panel(1);
        press(&mut panel, KeyCode::Char('2'));
        panel.advance();

        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.sim.distribution(), DistributionKind::Normal);
        assert_eq!(
            panel.status.as_deref(),
            Some("a batch of draws is still running")
        );

        press(&mut panel, KeyCode::Up);
        assert_eq!(panel.sim.sample_size(), 30);
    }

    #[test]
    fn test_status_clears_when_batch_ends() {
        let mut panel = panel(1);
        press(&mut panel, KeyCode::Char('2'));
        press(&mut panel, KeyCode::Char('r'));
        assert!(panel.status.is_some());

        finish_batch(&mut panel);
        assert!(!panel.sim.is_busy());
        assert!(panel.status.is_none());
        assert_eq!(panel.views.sample_means.summary.count, 10);
    }

    #[test]
    fn test_distribution_change_clears_draws() {
        let mut panel = panel(100);
        press(&mut panel, KeyCode::Char('2'));
        panel.advance();
        assert_eq!(panel.views.sample_means.summary.count, 10);

        press(&mut panel, KeyCode::Right);
        assert_eq!(panel.sim.distribution(), DistributionKind::Uniform);
        assert!(panel.views.sample_means.summary.is_empty());
        assert!(panel.status.is_none());

        press(&mut panel, KeyCode::Left);
        press(&mut panel, KeyCode::Left);
        assert_eq!(panel.sim.distribution(), DistributionKind::Bimodal);
    }

    #[test]
    fn test_sample_size_is_clamped() {
        let mut panel = panel(1);
        for _ in 0..10 {
            press(&mut panel, KeyCode::PageUp);
        }
        assert_eq!(panel.sim.sample_size(), 100);
        press(&mut panel, KeyCode::Down);
        assert_eq!(panel.sim.sample_size(), 99);
        for _ in 0..20 {
            press(&mut panel, KeyCode::PageDown);
        }
        assert_eq!(panel.sim.sample_size(), 2);
        assert!(panel.status.is_none());
    }

    #[test]
    fn test_reset_clears_draws() {
        let mut panel = panel(10);
        press(&mut panel, KeyCode::Char('2'));
        panel.advance();
        press(&mut panel, KeyCode::Char('r'));
        assert!(panel.views.sample_means.summary.is_empty());
        assert!(panel.views.latest_sample.summary.is_empty());
        assert_eq!(panel.views.population.summary.count, 10_000);
    }

    #[test]
    fn test_draw_renders_all_cards() {
        let mut panel = panel(10);
        press(&mut panel, KeyCode::Char('2'));
        panel.advance();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
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
        for title in ["Distribution", "Population", "Latest Sample", "Sample Means"] {
            assert!(content.contains(title), "missing {title}");
        }
    }
}
