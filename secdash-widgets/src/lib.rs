pub mod attack;
pub mod common;
pub mod metrics;
pub mod network;
pub mod score;
pub mod system;
pub mod threat_map;
pub mod traffic;

pub use attack::AttackChartWidget;
pub use common::*;
pub use metrics::MetricsWidget;
pub use network::{LinkState, NetworkStatusWidget, SegmentStatus};
pub use score::SecurityScoreWidget;
pub use system::SystemHealthWidget;
pub use threat_map::{ThreatMapWidget, ThreatOrigin};
pub use traffic::LiveTrafficWidget;

use secdash_core::{WidgetRegistry, register_widget};

/// Register the full built-in widget catalog.
///
/// This is the only place new visualizations are wired up: add a module
/// with an `INFO` const and a `new(interval)` constructor, then register
/// it here.
pub fn register_builtin(registry: &mut WidgetRegistry) {
    register_widget!(registry, score::INFO, SecurityScoreWidget);
    register_widget!(registry, attack::INFO, AttackChartWidget);
    register_widget!(registry, threat_map::INFO, ThreatMapWidget);
    register_widget!(registry, traffic::INFO, LiveTrafficWidget);
    register_widget!(registry, metrics::INFO, MetricsWidget);
    register_widget!(registry, network::INFO, NetworkStatusWidget);
    register_widget!(registry, system::INFO, SystemHealthWidget);
}

#[cfg(test)]
mod tests {
    use super::*;
    use secdash_core::WidgetSize;

    #[test]
    fn test_catalog_lists_all_types() {
        let mut registry = WidgetRegistry::new();
        register_builtin(&mut registry);

        let kinds: Vec<&str> = registry.list_available().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                "security-score",
                "attack-chart",
                "threat-map",
                "live-traffic",
                "metrics",
                "network-status",
                "system-health",
            ]
        );
    }

    #[test]
    fn test_attack_chart_metadata() {
        let mut registry = WidgetRegistry::new();
        register_builtin(&mut registry);

        let info = registry.info("attack-chart").expect("registered");
        assert_eq!(info.title, "Attack Distribution");
        assert_eq!(info.default_size, WidgetSize::Medium);
    }

    #[test]
    fn test_every_kind_is_constructible() {
        let mut registry = WidgetRegistry::new();
        register_builtin(&mut registry);

        for info in registry.list_available() {
            // Factories must not panic; widgets poll their own data on mount
            let mut widget = registry.create(info.kind);
            widget.on_mount();
            widget.on_unmount();
        }
    }

    #[test]
    fn test_refresh_intervals_within_spec_band() {
        let mut registry = WidgetRegistry::new();
        register_builtin(&mut registry);

        for info in registry.list_available() {
            let secs = info.refresh.as_secs();
            assert!((5..=60).contains(&secs), "{} refreshes every {}s", info.kind, secs);
        }
    }
}
