// secdash-widgets/src/threat_map.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{Severity, focus_color, format_number};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "threat-map",
    title: "Threat Map",
    default_size: WidgetSize::Large,
    refresh: Duration::from_secs(15),
};

const REGIONS: [&str; 10] = [
    "CN", "RU", "US", "BR", "IN", "VN", "KP", "IR", "NL", "DE",
];

const MAX_ORIGINS: usize = 12;

/// One attack origin currently active on the map
#[derive(Debug, Clone)]
pub struct ThreatOrigin {
    pub region: &'static str,
    pub source: String,
    pub severity: Severity,
    pub hits: u64,
}

/// Scrollable list of active attack origins by region, newest first.
pub struct ThreatMapWidget {
    rng: StdRng,
    origins: Vec<ThreatOrigin>,
    selected: usize,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl ThreatMapWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            origins: Vec::new(),
            selected: 0,
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    pub fn origins(&self) -> &[ThreatOrigin] {
        &self.origins
    }

    fn random_origin(&mut self) -> ThreatOrigin {
        let region = REGIONS[self.rng.random_range(0..REGIONS.len())];
        let source = format!(
            "{}.{}.{}.{}",
            self.rng.random_range(1..=223u8),
            self.rng.random_range(0..=255u8),
            self.rng.random_range(0..=255u8),
            self.rng.random_range(1..=254u8),
        );
        let severity = match self.rng.random_range(0..10) {
            0 => Severity::Critical,
            1..=3 => Severity::High,
            4..=6 => Severity::Medium,
            _ => Severity::Low,
        };

        ThreatOrigin {
            region,
            source,
            severity,
            hits: self.rng.random_range(1..50),
        }
    }

    fn poll(&mut self) {
        // Existing origins accumulate hits
        let deltas: Vec<u64> = self
            .origins
            .iter()
            .map(|_| self.rng.random_range(0..25))
            .collect();
        for (origin, delta) in self.origins.iter_mut().zip(deltas) {
            origin.hits += delta;
        }

        // New origins surface most refreshes, quiet ones age out
        if self.origins.len() < 3 || self.rng.random_bool(0.7) {
            let origin = self.random_origin();
            self.origins.insert(0, origin);
        }
        self.origins.truncate(MAX_ORIGINS);

        if self.selected >= self.origins.len() {
            self.selected = self.origins.len().saturating_sub(1);
        }
    }
}

impl Widget for ThreatMapWidget {
    fn on_mount(&mut self) {
        for _ in 0..5 {
            let origin = self.random_origin();
            self.origins.push(origin);
        }
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

        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected = if self.selected == 0 {
                        self.origins.len().saturating_sub(1)
                    } else {
                        self.selected - 1
                    };
                    return EventResult::Consumed;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if !self.origins.is_empty() {
                        self.selected = (self.selected + 1) % self.origins.len();
                    }
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, true);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let title = format!(" Threat Map [{} origins] ", self.origins.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(focus_color(focused)));

        let inner = block.inner(area);
        ratatui::widgets::Widget::render(block, area, buf);
        if inner.height < 1 {
            return;
        }

        let max_lines = inner.height as usize;
        let start = self.selected.saturating_sub(max_lines.saturating_sub(1));
        let end = (start + max_lines).min(self.origins.len());

        for (i, idx) in (start..end).enumerate() {
            if let Some(origin) = self.origins.get(idx) {
                let y = inner.y + (i as u16);
                let selected = idx == self.selected;
                let prefix = if selected { ">> " } else { "   " };
                let line = format!(
                    "{}{}  {:<15}  {:<8}  {}",
                    prefix,
                    origin.region,
                    origin.source,
                    origin.severity.label(),
                    format_number(origin.hits)
                );

                let style = if selected {
                    Style::default()
                        .fg(origin.severity.color())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(origin.severity.color())
                };

                for (x, ch) in line.chars().enumerate() {
                    if let Some(pos_x) = inner.x.checked_add(x as u16) {
                        if pos_x < inner.x + inner.width {
                            buf[(pos_x, y)].set_char(ch).set_style(style);
                        }
                    }
                }
            }
        }
    }

    fn needs_update(&self) -> bool {
        true
    }
}
