pub mod grid;
pub mod layout;
pub mod registry;
pub mod store;
pub mod widget;

pub use grid::{GridLayout, WidgetSize};
pub use layout::{LAYOUT_KEY, LayoutStore, Notice, WidgetInstance};
pub use registry::{WidgetFactory, WidgetInfo, WidgetRegistry};
pub use store::{FileStore, MemStore, StateStore, StoreError};
pub use widget::{Event, EventResult, PlaceholderWidget, Widget, WidgetContainer};
