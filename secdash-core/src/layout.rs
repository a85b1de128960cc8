// secdash-core/src/layout.rs
use crate::grid::WidgetSize;
use crate::registry::{WidgetInfo, WidgetRegistry};
use crate::store::StateStore;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key for the dashboard layout list
pub const LAYOUT_KEY: &str = "dashboard-widgets";

/// One placed widget, the unit of the persisted layout.
///
/// `kind` stays a plain string in storage so an instance whose type has
/// disappeared from the registry still round-trips and renders as a
/// placeholder. Wire field names (`type`, `defaultSize`) match the stored
/// JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Captured from registry metadata at creation, not re-synced later
    pub title: String,
    #[serde(rename = "defaultSize")]
    pub size: WidgetSize,
}

impl WidgetInstance {
    /// Default-layout instance with a stable literal id (`{kind}-1`)
    pub fn with_default_id(info: &WidgetInfo) -> Self {
        Self {
            id: format!("{}-1", info.kind),
            kind: info.kind.to_string(),
            title: info.title.to_string(),
            size: info.default_size,
        }
    }
}

/// User-visible confirmation emitted by layout mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    fn added(title: &str) -> Self {
        Self {
            message: format!("Added {title}"),
        }
    }

    fn removed(title: &str) -> Self {
        Self {
            message: format!("Removed {title}"),
        }
    }
}

/// Ordered list of placed widgets for one named layout, with write-through
/// persistence.
///
/// The list is read once at initialization and is the sole in-memory source
/// of truth afterwards; every mutation rewrites the full list synchronously.
/// A persisted value that fails to parse falls back to the caller-supplied
/// defaults silently.
pub struct LayoutStore {
    key: String,
    widgets: Vec<WidgetInstance>,
    store: Box<dyn StateStore>,
}

impl LayoutStore {
    pub fn initialize(
        store: Box<dyn StateStore>,
        key: &str,
        defaults: Vec<WidgetInstance>,
    ) -> Self {
        let restored: Option<Vec<WidgetInstance>> = store
            .read(key)
            .and_then(|raw| serde_json::from_str(&raw).ok());

        let mut layout = Self {
            key: key.to_string(),
            widgets: Vec::new(),
            store,
        };

        match restored {
            Some(widgets) => layout.widgets = widgets,
            None => {
                layout.widgets = defaults;
                layout.persist();
            }
        }

        layout
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        &self.widgets
    }

    pub fn get(&self, id: &str) -> Option<&WidgetInstance> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Place a new widget of `kind` at the end of the list.
    ///
    /// No-op when the kind is unknown to the registry or already placed:
    /// the one-instance-per-type invariant is enforced here, not only in
    /// the add dialog.
    pub fn add(&mut self, registry: &WidgetRegistry, kind: &str) -> Option<Notice> {
        let info = registry.info(kind)?;
        if self.widgets.iter().any(|w| w.kind == kind) {
            return None;
        }

        let instance = WidgetInstance {
            id: format!("{}-{}", info.kind, unix_millis()),
            kind: info.kind.to_string(),
            title: info.title.to_string(),
            size: info.default_size,
        };
        let notice = Notice::added(&instance.title);

        self.widgets.push(instance);
        self.persist();
        Some(notice)
    }

    /// Remove the instance with `id`. No-op when absent, so a repeated
    /// remove is harmless.
    pub fn remove(&mut self, id: &str) -> Option<Notice> {
        let index = self.widgets.iter().position(|w| w.id == id)?;
        let removed = self.widgets.remove(index);
        self.persist();
        Some(Notice::removed(&removed.title))
    }

    /// Change an instance's size. Writes through to storage so the new
    /// size survives a restart.
    pub fn set_size(&mut self, id: &str, size: WidgetSize) -> bool {
        let Some(index) = self.widgets.iter().position(|w| w.id == id) else {
            return false;
        };

        if self.widgets[index].size != size {
            self.widgets[index].size = size;
            self.persist();
        }
        true
    }

    /// Registry entries not yet placed, in catalog order
    pub fn available_to_add<'a>(&self, registry: &'a WidgetRegistry) -> Vec<&'a WidgetInfo> {
        registry
            .list_available()
            .into_iter()
            .filter(|info| !self.widgets.iter().any(|w| w.kind == info.kind))
            .collect()
    }

    fn persist(&mut self) {
        // A failed write leaves the in-memory list authoritative for this
        // session; there is no fatal state in the layout subsystem.
        if let Ok(raw) = serde_json::to_string(&self.widgets) {
            let _ = self.store.write(&self.key, &raw);
        }
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register_widget;
    use crate::store::MemStore;
    use crate::widget::Widget;
    use ratatui::{buffer::Buffer, layout::Rect};
    use std::time::Duration;

    struct Stub;

    impl Stub {
        fn new(_interval: Duration) -> Self {
            Self
        }
    }

    impl Widget for Stub {
        fn render(&mut self, _area: Rect, _buf: &mut Buffer) {}
    }

    const SECURITY_SCORE: WidgetInfo = WidgetInfo {
        kind: "security-score",
        title: "Security Score",
        default_size: WidgetSize::Small,
        refresh: Duration::from_secs(30),
    };

    const ATTACK_CHART: WidgetInfo = WidgetInfo {
        kind: "attack-chart",
        title: "Attack Distribution",
        default_size: WidgetSize::Medium,
        refresh: Duration::from_secs(30),
    };

    fn test_registry() -> WidgetRegistry {
        let mut registry = WidgetRegistry::new();
        register_widget!(registry, SECURITY_SCORE, Stub);
        register_widget!(registry, ATTACK_CHART, Stub);
        registry
    }

    fn defaults() -> Vec<WidgetInstance> {
        vec![WidgetInstance::with_default_id(&SECURITY_SCORE)]
    }

    fn stored_list(store: &MemStore) -> Vec<WidgetInstance> {
        serde_json::from_str(&store.read(LAYOUT_KEY).expect("layout persisted")).unwrap()
    }

    #[test]
    fn test_initialize_persists_defaults_when_absent() {
        let store = MemStore::new();
        let layout = LayoutStore::initialize(Box::new(store.clone()), LAYOUT_KEY, defaults());

        assert_eq!(layout.widgets(), defaults().as_slice());
        assert_eq!(stored_list(&store), defaults());
    }

    #[test]
    fn test_initialize_prefers_persisted_list() {
        let mut store = MemStore::new();
        let persisted = vec![WidgetInstance {
            id: "attack-chart-7".to_string(),
            kind: "attack-chart".to_string(),
            title: "Attack Distribution".to_string(),
            size: WidgetSize::Large,
        }];
        store
            .write(LAYOUT_KEY, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let layout = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, defaults());
        assert_eq!(layout.widgets(), persisted.as_slice());
    }

    #[test]
    fn test_corrupted_state_falls_back_to_defaults() {
        let mut store = MemStore::new();
        store.write(LAYOUT_KEY, "{not json!").unwrap();

        let layout = LayoutStore::initialize(Box::new(store.clone()), LAYOUT_KEY, defaults());

        assert_eq!(layout.widgets(), defaults().as_slice());
        // The defaults are written back over the corrupted value
        assert_eq!(stored_list(&store), defaults());
    }

    #[test]
    fn test_add_copies_registry_metadata() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, defaults());

        let notice = layout.add(&registry, "attack-chart").expect("added");
        assert_eq!(notice.message, "Added Attack Distribution");

        assert_eq!(layout.widgets().len(), 2);
        let added = &layout.widgets()[1];
        assert!(added.id.starts_with("attack-chart-"));
        assert!(added.id["attack-chart-".len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(added.title, "Attack Distribution");
        assert_eq!(added.size, WidgetSize::Medium);
    }

    #[test]
    fn test_add_unknown_kind_is_noop() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, defaults());

        assert!(layout.add(&registry, "threat-map").is_none());
        assert_eq!(layout.widgets().len(), 1);
    }

    #[test]
    fn test_add_enforces_one_instance_per_type() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, defaults());

        assert!(layout.add(&registry, "attack-chart").is_some());
        assert!(layout.add(&registry, "attack-chart").is_none());
        assert_eq!(layout.widgets().len(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store.clone()), LAYOUT_KEY, defaults());
        assert!(layout.add(&registry, "attack-chart").is_some());

        let notice = layout.remove("security-score-1").expect("removed");
        assert_eq!(notice.message, "Removed Security Score");
        assert_eq!(layout.widgets().len(), 1);
        assert_eq!(layout.widgets()[0].kind, "attack-chart");

        // Second remove of the same id is a no-op
        assert!(layout.remove("security-score-1").is_none());
        assert_eq!(layout.widgets().len(), 1);
        assert_eq!(stored_list(&store).len(), 1);
    }

    #[test]
    fn test_available_to_add_tracks_placed_types() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, defaults());

        let kinds: Vec<&str> = layout
            .available_to_add(&registry)
            .iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, vec!["attack-chart"]);

        assert!(layout.add(&registry, "attack-chart").is_some());
        assert!(layout.available_to_add(&registry).is_empty());

        assert!(layout.remove("security-score-1").is_some());
        let kinds: Vec<&str> = layout
            .available_to_add(&registry)
            .iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, vec!["security-score"]);
    }

    #[test]
    fn test_mutations_roundtrip_through_store() {
        let registry = test_registry();
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store.clone()), LAYOUT_KEY, defaults());

        assert!(layout.add(&registry, "attack-chart").is_some());
        assert!(layout.remove("security-score-1").is_some());

        // The persisted value reconstructs the in-memory list exactly
        assert_eq!(stored_list(&store), layout.widgets());

        let reloaded = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, Vec::new());
        assert_eq!(reloaded.widgets(), layout.widgets());
    }

    #[test]
    fn test_set_size_survives_reinitialization() {
        let store = MemStore::new();
        let mut layout = LayoutStore::initialize(Box::new(store.clone()), LAYOUT_KEY, defaults());

        assert!(layout.set_size("security-score-1", WidgetSize::Large));
        assert!(!layout.set_size("missing-id", WidgetSize::Small));

        let reloaded = LayoutStore::initialize(Box::new(store), LAYOUT_KEY, Vec::new());
        assert_eq!(reloaded.widgets()[0].size, WidgetSize::Large);
    }

    #[test]
    fn test_wire_format_field_names() {
        let instance = WidgetInstance::with_default_id(&ATTACK_CHART);
        let raw = serde_json::to_string(&instance).unwrap();

        assert!(raw.contains("\"type\":\"attack-chart\""));
        assert!(raw.contains("\"defaultSize\":\"medium\""));
        assert!(raw.contains("\"id\":\"attack-chart-1\""));
    }
}
