// secdash-widgets/src/metrics.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{focus_color, format_number};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "metrics",
    title: "Security Metrics",
    default_size: WidgetSize::Small,
    refresh: Duration::from_secs(60),
};

/// Headline security counters as a label/value panel.
pub struct MetricsWidget {
    rng: StdRng,
    active_threats: u64,
    blocked_today: u64,
    quarantined: u64,
    open_incidents: u64,
    failed_logins: u64,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl MetricsWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            active_threats: 0,
            blocked_today: 0,
            quarantined: 0,
            open_incidents: 0,
            failed_logins: 0,
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    fn poll(&mut self) {
        if self.blocked_today == 0 {
            // First sample establishes the day's baseline
            self.active_threats = self.rng.random_range(0..12);
            self.blocked_today = self.rng.random_range(800..4_000);
            self.quarantined = self.rng.random_range(2..40);
            self.open_incidents = self.rng.random_range(0..8);
            self.failed_logins = self.rng.random_range(50..600);
            return;
        }

        // Blocked and failed-login counters only grow within a day
        self.blocked_today += self.rng.random_range(5..120);
        self.failed_logins += self.rng.random_range(0..25);

        self.active_threats = Self::nudge(&mut self.rng, self.active_threats, 20);
        self.quarantined = Self::nudge(&mut self.rng, self.quarantined, 60);
        self.open_incidents = Self::nudge(&mut self.rng, self.open_incidents, 15);
    }

    fn nudge(rng: &mut StdRng, value: u64, cap: u64) -> u64 {
        let next = if rng.random_bool(0.5) {
            value.saturating_add(rng.random_range(0..=2))
        } else {
            value.saturating_sub(rng.random_range(0..=2))
        };
        next.min(cap)
    }

    fn rows(&self) -> [(&'static str, u64, Color); 5] {
        let threat_color = if self.active_threats > 5 {
            Color::Red
        } else if self.active_threats > 0 {
            Color::Yellow
        } else {
            Color::Green
        };
        let incident_color = if self.open_incidents > 3 {
            Color::Red
        } else {
            Color::White
        };

        [
            ("Active Threats", self.active_threats, threat_color),
            ("Blocked Today", self.blocked_today, Color::White),
            ("Quarantined", self.quarantined, Color::White),
            ("Open Incidents", self.open_incidents, incident_color),
            ("Failed Logins", self.failed_logins, Color::White),
        ]
    }
}

impl Widget for MetricsWidget {
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

    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, true);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let lines: Vec<Line> = self
            .rows()
            .iter()
            .map(|(label, value, color)| {
                Line::from(vec![
                    Span::styled(format!("{label:<15}"), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format_number(*value),
                        Style::default().fg(*color),
                    ),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Security Metrics ")
                .border_style(Style::default().fg(focus_color(focused))),
        );

        ratatui::widgets::Widget::render(paragraph, area, buf);
    }

    fn needs_update(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_counter_is_monotonic() {
        let mut widget = MetricsWidget::seeded(9, Duration::from_secs(60));
        widget.on_mount();
        let mut last = widget.blocked_today;

        for _ in 0..50 {
            widget.poll();
            assert!(widget.blocked_today >= last);
            last = widget.blocked_today;
        }
    }

    #[test]
    fn test_bounded_counters_respect_caps() {
        let mut widget = MetricsWidget::seeded(9, Duration::from_secs(60));
        widget.on_mount();

        for _ in 0..300 {
            widget.poll();
            assert!(widget.active_threats <= 20);
            assert!(widget.quarantined <= 60);
            assert!(widget.open_incidents <= 15);
        }
    }

    #[test]
    fn test_renders_all_rows() {
        let mut widget = MetricsWidget::seeded(9, Duration::from_secs(60));
        widget.on_mount();

        let area = Rect::new(0, 0, 30, 7);
        let mut buf = Buffer::empty(area);
        widget.render_focused(area, &mut buf, false);

        let text: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect();
        assert!(text.contains("Active Threats"));
        assert!(text.contains("Failed Logins"));
    }
}
