// secdash-cli/src/main.rs
use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::{
    io,
    time::{Duration, Instant},
};

use secdash_core::{
    FileStore, GridLayout, LAYOUT_KEY, LayoutStore, MemStore, StateStore, WidgetContainer,
    WidgetInstance, WidgetRegistry,
};
use secdash_widgets::register_builtin;

const NOTICE_TTL: Duration = Duration::from_secs(3);
const KEY_HINTS: &str = " a add  d remove  m minimize  s resize  Tab focus  q quit ";

/// Layout used on first launch, before the user has customized anything
fn default_layout(registry: &WidgetRegistry) -> Vec<WidgetInstance> {
    [
        "security-score",
        "attack-chart",
        "live-traffic",
        "system-health",
    ]
    .iter()
    .filter_map(|kind| registry.info(kind))
    .map(WidgetInstance::with_default_id)
    .collect()
}

fn build_container(registry: &WidgetRegistry, instance: &WidgetInstance) -> WidgetContainer {
    let widget = registry.create(&instance.kind);
    WidgetContainer::new(instance.id.clone(), instance.title.clone(), widget)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build the widget catalog
    let mut registry = WidgetRegistry::new();
    register_builtin(&mut registry);

    // Without a config directory the layout lives for this session only
    let store: Box<dyn StateStore> = match FileStore::open_default() {
        Ok(store) => Box::new(store),
        Err(e) => {
            eprintln!("Warning: {}. Layout changes will not be saved.", e);
            Box::new(MemStore::new())
        }
    };

    let mut layout = LayoutStore::initialize(store, LAYOUT_KEY, default_layout(&registry));

    // One container per placed instance, in layout list order
    let mut containers: Vec<WidgetContainer> = layout
        .widgets()
        .iter()
        .map(|instance| build_container(&registry, instance))
        .collect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    for container in containers.iter_mut() {
        container.mount();
    }

    let mut focused = 0usize;
    let mut dialog_selected: Option<usize> = None;
    let mut notice: Option<(String, Instant)> = None;

    // Main loop
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        if notice
            .as_ref()
            .is_some_and(|(_, shown_at)| shown_at.elapsed() >= NOTICE_TTL)
        {
            notice = None;
        }

        // Only types not already placed are offered in the add dialog
        let available = layout.available_to_add(&registry);

        // Render
        terminal.draw(|f| {
            let area = f.area();
            let buf = f.buffer_mut();

            let body = Rect {
                height: area.height.saturating_sub(1),
                ..area
            };
            let status = Rect {
                y: area.y + body.height,
                height: area.height - body.height,
                ..area
            };

            // Place widgets in the responsive grid
            let grid = GridLayout::for_width(body.width);
            let spans: Vec<u16> = layout.widgets().iter().map(|w| w.size.span()).collect();
            let areas = grid.calculate(body, &spans);

            let dialog_open = dialog_selected.is_some();
            for (i, (container, widget_area)) in containers.iter_mut().zip(areas).enumerate() {
                container.render_focused(widget_area, buf, i == focused && !dialog_open);
            }

            // Status line: active confirmation or key hints
            let line = match &notice {
                Some((message, _)) => Line::from(Span::styled(
                    format!(" {message} "),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                None => Line::from(Span::styled(
                    KEY_HINTS,
                    Style::default().fg(Color::DarkGray),
                )),
            };
            Paragraph::new(line).render(status, buf);

            // Add-widget dialog
            if let Some(selected) = dialog_selected {
                let height = (available.len() as u16 + 3).max(4);
                let popup = centered_rect(40, height, area);
                Clear.render(popup, buf);

                let block = Block::default()
                    .borders(Borders::ALL)
                    .title(" Add Widget ")
                    .border_style(Style::default().fg(Color::Yellow));
                let inner = block.inner(popup);
                block.render(popup, buf);

                if available.is_empty() {
                    Paragraph::new("All widget types are already placed")
                        .style(Style::default().fg(Color::DarkGray))
                        .render(inner, buf);
                } else {
                    let selected = selected.min(available.len() - 1);
                    let mut lines: Vec<Line> = available
                        .iter()
                        .enumerate()
                        .map(|(i, info)| {
                            let marker = if i == selected { ">> " } else { "   " };
                            let style = if i == selected {
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD)
                            } else {
                                Style::default()
                            };
                            Line::from(Span::styled(
                                format!("{}{} ({})", marker, info.title, info.default_size.label()),
                                style,
                            ))
                        })
                        .collect();
                    lines.push(Line::from(Span::styled(
                        " Enter add  Esc cancel",
                        Style::default().fg(Color::DarkGray),
                    )));
                    Paragraph::new(lines).render(inner, buf);
                }
            }
        })?;

        // Handle input with timeout
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let CEvent::Key(key) = event::read()?
        {
            // Only handle key press events, not key release
            if key.kind == crossterm::event::KeyEventKind::Press {
                if let Some(selected) = dialog_selected {
                    match key.code {
                        KeyCode::Esc => dialog_selected = None,
                        KeyCode::Up | KeyCode::Char('k') => {
                            if !available.is_empty() {
                                dialog_selected = Some(if selected == 0 {
                                    available.len() - 1
                                } else {
                                    selected - 1
                                });
                            }
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            if !available.is_empty() {
                                dialog_selected = Some((selected + 1) % available.len());
                            }
                        }
                        KeyCode::Enter => {
                            if let Some(info) = available.get(selected)
                                && let Some(confirmation) = layout.add(&registry, info.kind)
                            {
                                if let Some(instance) = layout.widgets().last() {
                                    let mut container = build_container(&registry, instance);
                                    container.mount();
                                    containers.push(container);
                                    focused = containers.len() - 1;
                                }
                                notice = Some((confirmation.message, Instant::now()));
                            }
                            dialog_selected = None;
                        }
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Tab => {
                            if !containers.is_empty() {
                                focused = (focused + 1) % containers.len();
                            }
                        }
                        KeyCode::BackTab => {
                            if !containers.is_empty() {
                                focused = if focused == 0 {
                                    containers.len() - 1
                                } else {
                                    focused - 1
                                };
                            }
                        }
                        KeyCode::Char('a') => dialog_selected = Some(0),
                        KeyCode::Char('d') => {
                            if focused < containers.len() {
                                let id = containers[focused].id().to_string();
                                if let Some(confirmation) = layout.remove(&id) {
                                    containers[focused].unmount();
                                    containers.remove(focused);
                                    if focused > 0 && focused >= containers.len() {
                                        focused = containers.len() - 1;
                                    }
                                    notice = Some((confirmation.message, Instant::now()));
                                }
                            }
                        }
                        KeyCode::Char('m') => {
                            if let Some(container) = containers.get_mut(focused) {
                                container.toggle_minimized();
                            }
                        }
                        KeyCode::Char('s') => {
                            if let Some(container) = containers.get(focused) {
                                let id = container.id().to_string();
                                if let Some(next) = layout.get(&id).map(|w| w.size.next()) {
                                    layout.set_size(&id, next);
                                }
                            }
                        }
                        _ => {
                            // Everything else goes to the focused widget
                            if let Some(container) = containers.get_mut(focused) {
                                container.handle_event(secdash_core::Event::Key(key));
                            }
                        }
                    }
                }
            }
        }

        // Update widgets on tick
        if last_tick.elapsed() >= tick_rate {
            for container in containers.iter_mut() {
                container.update();
            }
            last_tick = Instant::now();
        }
    }

    // Cleanup
    for container in containers.iter_mut() {
        container.unmount();
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
