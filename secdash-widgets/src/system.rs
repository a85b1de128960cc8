// secdash-widgets/src/system.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    prelude::Widget as RatatuiWidget,
    style::Style,
    widgets::{Block, Borders, Gauge},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{focus_color, load_color};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "system-health",
    title: "System Health",
    default_size: WidgetSize::Small,
    refresh: Duration::from_secs(10),
};

/// Simulated sensor-host load: cpu, memory and disk gauges.
pub struct SystemHealthWidget {
    rng: StdRng,
    cpu: f64,
    memory: f64,
    disk: f64,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl SystemHealthWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            cpu: 35.0,
            memory: 55.0,
            disk: 62.0,
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    fn poll(&mut self) {
        // CPU is volatile, memory drifts, disk creeps
        self.cpu = Self::walk(&mut self.rng, self.cpu, 12.0).clamp(1.0, 100.0);
        self.memory = Self::walk(&mut self.rng, self.memory, 4.0).clamp(10.0, 100.0);
        self.disk = (self.disk + self.rng.random_range(-0.2..=0.5)).clamp(20.0, 100.0);
    }

    fn walk(rng: &mut StdRng, value: f64, spread: f64) -> f64 {
        value + rng.random_range(-spread..=spread)
    }

    fn gauges(&self) -> [(&'static str, f64); 3] {
        [
            ("CPU", self.cpu),
            ("Memory", self.memory),
            ("Disk", self.disk),
        ]
    }
}

impl Widget for SystemHealthWidget {
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
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" System Health ")
            .border_style(Style::default().fg(focus_color(focused)));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 {
            return;
        }

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(inner);

        for ((label, value), chunk) in self.gauges().iter().zip(chunks.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().title(*label))
                .gauge_style(Style::default().fg(load_color(*value)))
                .ratio((value / 100.0).clamp(0.0, 1.0))
                .label(format!("{value:.0}%"));
            gauge.render(*chunk, buf);
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
    fn test_loads_stay_in_range() {
        let mut widget = SystemHealthWidget::seeded(13, Duration::from_secs(10));
        widget.on_mount();

        for _ in 0..500 {
            widget.poll();
            assert!((1.0..=100.0).contains(&widget.cpu));
            assert!((10.0..=100.0).contains(&widget.memory));
            assert!((20.0..=100.0).contains(&widget.disk));
        }
    }

    #[test]
    fn test_renders_three_gauges() {
        let mut widget = SystemHealthWidget::seeded(13, Duration::from_secs(10));
        widget.on_mount();

        let area = Rect::new(0, 0, 30, 11);
        let mut buf = Buffer::empty(area);
        widget.render_focused(area, &mut buf, false);

        let text: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect();
        assert!(text.contains("CPU"));
        assert!(text.contains("Memory"));
        assert!(text.contains("Disk"));
    }
}
