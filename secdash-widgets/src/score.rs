// secdash-widgets/src/score.rs
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
};
use secdash_core::{Event, EventResult, Widget, WidgetInfo, WidgetSize};
use std::time::Duration;

use crate::common::{focus_color, score_color};

pub const INFO: WidgetInfo = WidgetInfo {
    kind: "security-score",
    title: "Security Score",
    default_size: WidgetSize::Small,
    refresh: Duration::from_secs(30),
};

/// Overall security posture as a 0-100 gauge.
///
/// The score drifts with a bounded random walk so the demo data stays
/// plausible across refreshes instead of jumping around.
pub struct SecurityScoreWidget {
    rng: StdRng,
    score: f64,
    previous: f64,
    poll_interval: Duration,
    time_since_poll: Duration,
}

impl SecurityScoreWidget {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::from_os_rng(), poll_interval)
    }

    pub fn seeded(seed: u64, poll_interval: Duration) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), poll_interval)
    }

    fn with_rng(rng: StdRng, poll_interval: Duration) -> Self {
        Self {
            rng,
            score: 72.0,
            previous: 72.0,
            poll_interval,
            time_since_poll: Duration::ZERO,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    fn poll(&mut self) {
        self.previous = self.score;
        let drift: f64 = self.rng.random_range(-4.0..=4.0);
        self.score = (self.score + drift).clamp(0.0, 100.0);
    }

    fn grade(&self) -> &'static str {
        match self.score as u32 {
            90..=100 => "A",
            80..=89 => "B",
            70..=79 => "C",
            60..=69 => "D",
            _ => "F",
        }
    }

    fn trend(&self) -> &'static str {
        if self.score > self.previous {
            "+"
        } else if self.score < self.previous {
            "-"
        } else {
            "="
        }
    }
}

impl Widget for SecurityScoreWidget {
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
            self.poll();
            return EventResult::Consumed;
        }

        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, true);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let title = format!(" Security Score [{}] {} ", self.grade(), self.trend());

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(focus_color(focused))),
            )
            .gauge_style(Style::default().fg(score_color(self.score)).bg(Color::Black))
            .ratio((self.score / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0} / 100", self.score));

        ratatui::widgets::Widget::render(gauge, area, buf);
    }

    fn needs_update(&self) -> bool {
        true
    }
}
