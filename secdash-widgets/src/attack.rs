// secdash-widgets/src/attack.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{BarChart, Block, Borders},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{focus_color, format_number};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "attack-chart",
    title: "Attack Distribution",
    default_size: WidgetSize::Medium,
    refresh: Duration::from_secs(30),
};

/// Attack categories shown in the distribution chart. Labels are kept short
/// so bars stay readable in a medium cell.
const CATEGORIES: [&str; 6] = ["Malware", "Phish", "DDoS", "Brute", "Inject", "XSS"];

/// Bar chart of detected attacks per category over the last 24 hours.
pub struct AttackChartWidget {
    rng: StdRng,
    counts: [u64; CATEGORIES.len()],
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl AttackChartWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            counts: [0; CATEGORIES.len()],
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn poll(&mut self) {
        for (i, count) in self.counts.iter_mut().enumerate() {
            if *count == 0 {
                // Seed each category with its own plausible baseline:
                // commodity attacks dominate, targeted ones trail off
                *count = self.rng.random_range(20..250) / (i as u64 + 1);
            } else {
                let delta = self.rng.random_range(0..=8);
                let churn = self.rng.random_range(0..=4);
                *count = (*count + delta).saturating_sub(churn);
            }
        }
    }
}

impl Widget for AttackChartWidget {
    fn on_mount(&mut self) {
        self.poll();
    }

    fn on_update(&mut self, delta: Duration) {
        self.time_since_poll += delta;

        if self.time_since_poll >= self.poll_interval {
            self.poll();
            self.time_since_poll = Duration::ZERO;
        }
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        use crossterm::event::KeyCode;

        if let Event::Key(key) = event
            && key.code == KeyCode::Char('r')
        {
            self.counts = [0; CATEGORIES.len()];
            self.poll();
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, true);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let title = format!(" Attack Distribution [24h: {}] ", format_number(self.total()));

        let data: Vec<(&str, u64)> = CATEGORIES
            .iter()
            .zip(self.counts.iter())
            .map(|(name, count)| (*name, *count))
            .collect();

        // Fit the bars to the cell width, borders excluded
        let inner_width = area.width.saturating_sub(2);
        let slots = CATEGORIES.len() as u16;
        let bar_width = (inner_width.saturating_sub(slots - 1) / slots).clamp(3, 9);

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(focus_color(focused))),
            )
            .data(&data)
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Red))
            .value_style(Style::default().fg(Color::White).bg(Color::Red));

        ratatui::widgets::Widget::render(chart, area, buf);
    }

    fn needs_update(&self) -> bool {
        true
    }
}
