// secdash-core/src/grid.rs
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Size bucket for a placed widget, mapped to a column span in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
}

impl WidgetSize {
    /// Number of grid columns this size occupies
    pub fn span(self) -> u16 {
        match self {
            WidgetSize::Small => 1,
            WidgetSize::Medium => 2,
            WidgetSize::Large => 3,
        }
    }

    /// Cycle to the next size (small -> medium -> large -> small)
    pub fn next(self) -> Self {
        match self {
            WidgetSize::Small => WidgetSize::Medium,
            WidgetSize::Medium => WidgetSize::Large,
            WidgetSize::Large => WidgetSize::Small,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        }
    }
}

/// Responsive widget grid.
///
/// Widgets pack left to right in list order and wrap to a new row when a
/// span does not fit in the remaining columns. Rows share the vertical
/// space evenly, with the last row absorbing rounding remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: u16,
}

impl GridLayout {
    /// Terminal width at which the grid widens from 3 to 4 columns
    pub const WIDE_BREAKPOINT: u16 = 160;

    pub fn new(columns: u16) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    /// Pick the column count for the current terminal width
    pub fn for_width(width: u16) -> Self {
        if width >= Self::WIDE_BREAKPOINT {
            Self::new(4)
        } else {
            Self::new(3)
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Calculate one area per span, in input order.
    ///
    /// Spans are clamped to `1..=columns`, so a `large` widget still fits a
    /// narrow grid instead of being dropped.
    pub fn calculate(&self, area: Rect, spans: &[u16]) -> Vec<Rect> {
        if spans.is_empty() {
            return Vec::new();
        }

        // First pass: pack (index, span) pairs into rows
        let mut rows: Vec<Vec<(usize, u16)>> = Vec::new();
        let mut current: Vec<(usize, u16)> = Vec::new();
        let mut used = 0u16;

        for (i, &span) in spans.iter().enumerate() {
            let span = span.clamp(1, self.columns);
            if used + span > self.columns && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push((i, span));
            used += span;
        }
        rows.push(current);

        // Second pass: assign areas row by row
        let row_count = rows.len() as u16;
        let base_height = area.height / row_count;
        let remainder = area.height % row_count;
        let col_width = area.width / self.columns;

        let mut areas = vec![Rect::default(); spans.len()];
        let mut y = area.y;

        for (r, row) in rows.iter().enumerate() {
            let mut height = base_height;
            if r as u16 == row_count - 1 {
                height += remainder;
            }

            let mut col = 0u16;
            for &(i, span) in row {
                areas[i] = Rect {
                    x: area.x + col * col_width,
                    y,
                    width: span * col_width,
                    height,
                };
                col += span;
            }

            y += height;
        }

        areas
    }
}
