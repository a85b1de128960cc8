// secdash-widgets/src/traffic.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    prelude::Widget as RatatuiWidget,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{focus_color, format_rate};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "live-traffic",
    title: "Live Traffic",
    default_size: WidgetSize::Medium,
    refresh: Duration::from_secs(5),
};

const MAX_HISTORY: usize = 60;

/// Inbound/outbound traffic sparklines over synthesized flow rates.
pub struct LiveTrafficWidget {
    rng: StdRng,
    rx_history: Vec<u64>,
    tx_history: Vec<u64>,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl LiveTrafficWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            rx_history: Vec::with_capacity(MAX_HISTORY),
            tx_history: Vec::with_capacity(MAX_HISTORY),
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    fn poll(&mut self) {
        // Walk each direction from its last sample; inbound runs heavier
        let rx_base = self.rx_history.last().copied().unwrap_or(48_000_000);
        let tx_base = self.tx_history.last().copied().unwrap_or(12_000_000);

        let rx = Self::walk(&mut self.rng, rx_base, 8_000_000, 120_000_000);
        let tx = Self::walk(&mut self.rng, tx_base, 2_000_000, 40_000_000);

        self.rx_history.push(rx);
        self.tx_history.push(tx);

        if self.rx_history.len() > MAX_HISTORY {
            self.rx_history.remove(0);
        }
        if self.tx_history.len() > MAX_HISTORY {
            self.tx_history.remove(0);
        }
    }

    fn walk(rng: &mut StdRng, base: u64, min: u64, max: u64) -> u64 {
        let jitter = rng.random_range(0..=base / 4 + 1);
        let next = if rng.random_bool(0.5) {
            base.saturating_add(jitter)
        } else {
            base.saturating_sub(jitter)
        };
        next.clamp(min, max)
    }

    fn current_rx(&self) -> u64 {
        self.rx_history.last().copied().unwrap_or(0)
    }

    fn current_tx(&self) -> u64 {
        self.tx_history.last().copied().unwrap_or(0)
    }
}

impl Widget for LiveTrafficWidget {
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
            self.rx_history.clear();
            self.tx_history.clear();
            self.poll();
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, true);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let title = format!(
            " Live Traffic In {} Out {} ",
            format_rate(self.current_rx() as f64),
            format_rate(self.current_tx() as f64)
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(focus_color(focused)));

        let inner = block.inner(area);
        if inner.height < 4 {
            block.render(area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Percentage(50),
            ])
            .split(inner);

        let available = chunks[0].width.saturating_sub(2).max(1) as usize;
        let prepare = |hist: &[u64]| -> Vec<u64> {
            if hist.is_empty() {
                vec![0; available]
            } else if hist.len() >= available {
                hist.iter().rev().take(available).cloned().collect()
            } else {
                let mut v = Vec::with_capacity(available);
                let scale = hist.len() as f32 / available as f32;
                for i in 0..available {
                    let idx = (i as f32 * scale) as usize;
                    v.push(if idx < hist.len() {
                        hist[idx]
                    } else {
                        *hist.last().unwrap_or(&0)
                    });
                }
                v
            }
        };

        let rx_data = prepare(&self.rx_history);
        let tx_data = prepare(&self.tx_history);

        Sparkline::default()
            .block(Block::default().title("Inbound"))
            .data(&rx_data)
            .style(Style::default().fg(Color::Green))
            .render(chunks[0], buf);

        Sparkline::default()
            .block(Block::default().title("Outbound"))
            .data(&tx_data)
            .style(Style::default().fg(Color::Blue))
            .render(chunks[1], buf);

        block.render(area, buf);
    }

    fn needs_update(&self) -> bool {
        true
    }
}
