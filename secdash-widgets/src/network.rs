// secdash-widgets/src/network.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::focus_color;

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "network-status",
    title: "Network Status",
    default_size: WidgetSize::Medium,
    refresh: Duration::from_secs(30),
};

const SEGMENTS: [&str; 6] = [
    "Core", "DMZ", "Data Center", "Branch VPN", "Guest WiFi", "OT Network",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Online,
    Degraded,
    Offline,
}

impl LinkState {
    fn label(self) -> &'static str {
        match self {
            LinkState::Online => "online",
            LinkState::Degraded => "degraded",
            LinkState::Offline => "offline",
        }
    }

    fn color(self) -> Color {
        match self {
            LinkState::Online => Color::Green,
            LinkState::Degraded => Color::Yellow,
            LinkState::Offline => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentStatus {
    pub name: &'static str,
    pub state: LinkState,
    pub latency_ms: u64,
}

/// Per-segment link status with simulated latency.
pub struct NetworkStatusWidget {
    rng: StdRng,
    segments: Vec<SegmentStatus>,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl NetworkStatusWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            segments: SEGMENTS
                .iter()
                .map(|name| SegmentStatus {
                    name,
                    state: LinkState::Online,
                    latency_ms: 10,
                })
                .collect(),
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    pub fn online_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.state == LinkState::Online)
            .count()
    }

    fn poll(&mut self) {
        for i in 0..self.segments.len() {
            // Segments mostly stay healthy; a degraded link usually recovers
            let roll: f64 = self.rng.random();
            let state = match self.segments[i].state {
                LinkState::Online if roll > 0.92 => LinkState::Degraded,
                LinkState::Online => LinkState::Online,
                LinkState::Degraded if roll > 0.85 => LinkState::Offline,
                LinkState::Degraded if roll > 0.35 => LinkState::Online,
                LinkState::Degraded => LinkState::Degraded,
                LinkState::Offline if roll > 0.5 => LinkState::Degraded,
                LinkState::Offline => LinkState::Offline,
            };

            let latency_ms = match state {
                LinkState::Online => self.rng.random_range(2..40),
                LinkState::Degraded => self.rng.random_range(80..400),
                LinkState::Offline => 0,
            };

            self.segments[i].state = state;
            self.segments[i].latency_ms = latency_ms;
        }
    }
}

impl Widget for NetworkStatusWidget {
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
        let title = format!(
            " Network Status [{}/{} online] ",
            self.online_count(),
            self.segments.len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(focus_color(focused)));

        let inner = block.inner(area);
        ratatui::widgets::Widget::render(block, area, buf);

        for (i, segment) in self.segments.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let y = inner.y + i as u16;
            let latency = match segment.state {
                LinkState::Offline => "--".to_string(),
                _ => format!("{} ms", segment.latency_ms),
            };
            let line = format!(
                " {:<12} {:<9} {:>7}",
                segment.name,
                segment.state.label(),
                latency
            );
            let style = Style::default().fg(segment.state.color());

            for (x, ch) in line.chars().enumerate() {
                if let Some(pos_x) = inner.x.checked_add(x as u16) {
                    if pos_x < inner.x + inner.width {
                        buf[(pos_x, y)].set_char(ch).set_style(style);
                    }
                }
            }
        }
    }

    fn needs_update(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_segments_start_online() {
        let widget = NetworkStatusWidget::seeded(21, Duration::from_secs(30));
        assert_eq!(widget.online_count(), SEGMENTS.len());
    }

    #[test]
    fn test_latency_matches_state() {
        let mut widget = NetworkStatusWidget::seeded(21, Duration::from_secs(30));
        widget.on_mount();

        for _ in 0..100 {
            widget.poll();
            for segment in &widget.segments {
                match segment.state {
                    LinkState::Online => assert!(segment.latency_ms < 40),
                    LinkState::Degraded => {
                        assert!((80..400).contains(&segment.latency_ms))
                    }
                    LinkState::Offline => assert_eq!(segment.latency_ms, 0),
                }
            }
        }
    }

    #[test]
    fn test_renders_segment_rows() {
        let mut widget = NetworkStatusWidget::seeded(21, Duration::from_secs(30));
        widget.on_mount();

        let area = Rect::new(0, 0, 40, 8);
        let mut buf = Buffer::empty(area);
        widget.render_focused(area, &mut buf, false);

        let text: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect();
        assert!(text.contains("Core"));
        assert!(text.contains("Guest WiFi"));
    }
}
