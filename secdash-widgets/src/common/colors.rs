// secdash-widgets/src/common/colors.rs
use ratatui::style::Color;

/// Score below this is degraded
pub const SCORE_GUARDED: f64 = 60.0;
/// Score at or above this is healthy
pub const SCORE_HEALTHY: f64 = 80.0;

/// Color for a security score (higher is better)
///
/// Green at or above 80, yellow from 60, red below.
pub fn score_color(score: f64) -> Color {
    if score >= SCORE_HEALTHY {
        Color::Green
    } else if score >= SCORE_GUARDED {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Color for a resource load percentage (lower is better)
///
/// Green below 60%, yellow from 60%, red from 80%.
pub fn load_color(percentage: f64) -> Color {
    if percentage < 60.0 {
        Color::Green
    } else if percentage < 80.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Border color for focus state: yellow when focused, dark gray otherwise
pub fn focus_color(focused: bool) -> Color {
    if focused {
        Color::Yellow
    } else {
        Color::DarkGray
    }
}

/// Threat severity buckets used across widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Severity::Low => Color::Green,
            Severity::Medium => Color::Yellow,
            Severity::High => Color::LightRed,
            Severity::Critical => Color::Red,
        }
    }
}
