use cltlab_sim::DataView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols::merge::MergeStrategy,
    text::{Line, Text},
    widgets::{Bar, BarChart, Block, Widget},
};

use crate::ui::widgets::color;

/// Bordered histogram of one dataset with its summary line.
#[derive(Debug)]
pub struct HistogramCard<'a> {
    pub title: &'a str,
    pub view: &'a DataView,
    pub color: ratatui::style::Color,
}

impl Widget for HistogramCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .merge_borders(MergeStrategy::Exact)
            .title(self.title);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let summary = &self.view.summary;
        if summary.is_empty() {
            Text::from("No data yet")
                .style(Style::default().fg(color::MUTED))
                .centered()
                .render(inner, buf);
            return;
        }

        let [stats_area, chart_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

        Line::from(format!(
            "n = {}  mean = {:.2}  sd = {:.2}  min = {:.2}  max = {:.2}",
            summary.count, summary.mean, summary.std_dev, summary.min, summary.max
        ))
        .render(stats_area, buf);

        let bins = &self.view.histogram.bins;
        let bar_width = bar_width(chart_area.width, bins.len());
        let bars = bins
            .iter()
            .map(|bin| {
                Bar::with_label(bin.label.clone(), bin.count)
                    .text_value("")
                    .style(Style::default().fg(self.color))
            })
            .collect::<Vec<_>>();
        BarChart::new(bars)
            .bar_width(bar_width)
            .bar_gap(0)
            .label_style(Style::default().fg(color::MUTED))
            .render(chart_area, buf);
    }
}

/// Widest bar that fits every bin into `width` columns.
fn bar_width(width: u16, bins: usize) -> u16 {
    let bins = u16::try_from(bins).unwrap_or(u16::MAX).max(1);
    (width / bins).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: &DataView, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        HistogramCard {
            title: "Means",
            view,
            color: color::MEANS,
        }
        .render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_empty_view_shows_placeholder() {
        let view = DataView::new(&[], 30);
        let buf = render(&view, 40, 6);
        assert!(row(&buf, 0).contains("Means"));
        assert!((0..6).any(|y| row(&buf, y).contains("No data yet")));
    }

    #[test]
    fn test_summary_line() {
        let view = DataView::new(&[1.0, 2.0, 3.0], 3);
        let buf = render(&view, 80, 10);
        assert!(row(&buf, 1).contains("n = 3  mean = 2.00  sd = 1.00"));
    }

    #[test]
    fn test_bar_width_fits_bins() {
        assert_eq!(bar_width(90, 30), 3);
        assert_eq!(bar_width(20, 30), 1);
        assert_eq!(bar_width(20, 0), 20);
    }
}
