use crate::grid::WidgetSize;
use crate::widget::{PlaceholderWidget, Widget};
use std::time::Duration;

pub type WidgetFactory = Box<dyn Fn(Duration) -> Box<dyn Widget>>;

/// Display metadata for one widget type.
///
/// The catalog is fixed at process start; there is no dynamic registration
/// after the dashboard is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetInfo {
    /// Type tag, the contract between registry and persisted layout
    pub kind: &'static str,
    /// Default display title, copied into instances at creation time
    pub title: &'static str,
    /// Default size, copied into instances at creation time
    pub default_size: WidgetSize,
    /// Mock data refresh interval passed to the widget factory
    pub refresh: Duration,
}

pub struct WidgetRegistry {
    entries: Vec<(WidgetInfo, WidgetFactory)>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a widget type. Re-registering a kind replaces its entry.
    pub fn register(&mut self, info: WidgetInfo, factory: WidgetFactory) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| i.kind == info.kind) {
            *entry = (info, factory);
        } else {
            self.entries.push((info, factory));
        }
    }

    /// Metadata for a kind, if registered
    pub fn info(&self, kind: &str) -> Option<&WidgetInfo> {
        self.entries
            .iter()
            .find(|(info, _)| info.kind == kind)
            .map(|(info, _)| info)
    }

    /// All known types in catalog order
    pub fn list_available(&self) -> Vec<&WidgetInfo> {
        self.entries.iter().map(|(info, _)| info).collect()
    }

    /// Build the widget for `kind`. Unknown kinds get a placeholder rather
    /// than an error so a stale persisted layout still renders.
    pub fn create(&self, kind: &str) -> Box<dyn Widget> {
        match self.entries.iter().find(|(info, _)| info.kind == kind) {
            Some((info, factory)) => factory(info.refresh),
            None => Box::new(PlaceholderWidget::new(kind)),
        }
    }
}

#[macro_export]
macro_rules! register_widget {
    ($registry:expr, $info:expr, $widget_type:ty) => {
        $registry.register($info, Box::new(|interval| Box::new(<$widget_type>::new(interval))));
    };
}
