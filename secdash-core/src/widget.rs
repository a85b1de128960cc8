// secdash-core/src/widget.rs
use ratatui::{buffer::Buffer, layout::Rect};
use std::time::Duration;

/// Core widget trait with lifecycle hooks
pub trait Widget: Send + Sync {
    /// Called once when widget is added to the dashboard
    fn on_mount(&mut self) {}

    /// Called every frame with delta time since last update
    fn on_update(&mut self, _delta: Duration) {}

    /// Handle input events
    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    /// Render the widget to the buffer
    fn render(&mut self, area: Rect, buf: &mut Buffer);

    /// Render the widget with focus awareness (default implementation calls render)
    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, _focused: bool) {
        self.render(area, buf);
    }

    /// Whether widget needs regular updates (for polling generators)
    fn needs_update(&self) -> bool {
        false
    }

    /// Cleanup when widget is removed
    fn on_unmount(&mut self) {}
}

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed, // Stop propagation
    Ignored,  // Continue to next widget
}

/// Container pairing one placed widget with its runtime lifecycle state.
///
/// The minimize toggle lives here rather than in the layout list: it is
/// purely visual and not persisted. A minimized widget keeps its grid cell
/// and stays mounted, only its content is not drawn.
pub struct WidgetContainer {
    id: String,
    title: String,
    widget: Box<dyn Widget>,
    last_update: std::time::Instant,
    mounted: bool,
    minimized: bool,
}

impl WidgetContainer {
    pub fn new(id: String, title: String, widget: Box<dyn Widget>) -> Self {
        Self {
            id,
            title,
            widget,
            last_update: std::time::Instant::now(),
            mounted: false,
            minimized: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mount(&mut self) {
        if !self.mounted {
            self.widget.on_mount();
            self.mounted = true;
        }
    }

    pub fn update(&mut self) {
        let now = std::time::Instant::now();
        let delta = now.duration_since(self.last_update);

        if self.widget.needs_update() {
            self.widget.on_update(delta);
        }

        self.last_update = now;
    }

    pub fn handle_event(&mut self, event: Event) -> EventResult {
        self.widget.on_event(event)
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        if self.minimized {
            self.render_collapsed(area, buf, focused);
        } else {
            self.widget.render_focused(area, buf, focused);
        }
    }

    fn render_collapsed(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        use ratatui::style::{Color, Style};
        use ratatui::widgets::{Block, Borders};

        let border_color = if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} [+] ", self.title))
            .border_style(Style::default().fg(border_color));

        ratatui::widgets::Widget::render(block, area, buf);
    }

    pub fn unmount(&mut self) {
        if self.mounted {
            self.widget.on_unmount();
            self.mounted = false;
        }
    }
}

/// Fallback rendered for widget types the registry does not know.
///
/// Unknown types can reach the dashboard through a persisted layout written
/// by a newer or older build. They render as a placeholder, never an error.
pub struct PlaceholderWidget {
    kind: String,
}

impl PlaceholderWidget {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

impl Widget for PlaceholderWidget {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        self.render_focused(area, buf, false);
    }

    fn render_focused(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        use ratatui::style::{Color, Style};
        use ratatui::widgets::{Block, Borders, Paragraph};

        let border_color = if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.kind))
            .border_style(Style::default().fg(border_color));

        let paragraph = Paragraph::new("Widget content not available")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));

        ratatui::widgets::Widget::render(paragraph, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Widget for Probe {
        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}
    }

    fn row_text(buf: &Buffer, area: Rect, y: u16) -> String {
        (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn test_minimize_toggle() {
        let mut container = WidgetContainer::new(
            "probe-1".to_string(),
            "Probe".to_string(),
            Box::new(Probe),
        );

        assert!(!container.is_minimized());
        container.toggle_minimized();
        assert!(container.is_minimized());
        container.toggle_minimized();
        assert!(!container.is_minimized());
    }

    #[test]
    fn test_minimized_container_draws_title_bar() {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        let mut container = WidgetContainer::new(
            "probe-1".to_string(),
            "Probe".to_string(),
            Box::new(Probe),
        );

        container.toggle_minimized();
        container.render_focused(area, &mut buf, false);

        assert!(row_text(&buf, area, 0).contains("Probe [+]"));
    }

    #[test]
    fn test_placeholder_renders_fallback_text() {
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        let mut widget = PlaceholderWidget::new("mystery-widget");

        widget.render(area, &mut buf);

        assert!(row_text(&buf, area, 0).contains("mystery-widget"));
        assert!(row_text(&buf, area, 1).contains("not available"));
    }
}
