//! Gauge registry: identifier → gauge, plus the shared movement lock.
//!
//! Whoever drives the frame tick owns the registry and calls
//! [`GaugeRegistry::update`] once per frame. Scripts reach a gauge by
//! identifier through [`GaugeRegistry::get`], which creates it on first use.
//! Gauges are updated in identifier order, so finish actions of gauges that
//! end on the same frame reach the host in a stable order.

use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use gauge_host::{Host, Scene};
use tracing::debug;

use crate::config::GaugeConfig;
use crate::container::GaugeContainer;
use crate::error::GaugeError;
use crate::lock::MovementLock;

/// All gauges of a session.
#[derive(Debug, Default)]
pub struct GaugeRegistry {
    /// Gauges keyed by identifier.
    gauges: BTreeMap<String, GaugeContainer>,
    lock: MovementLock,
}

impl GaugeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gauges: BTreeMap::new(),
            lock: MovementLock::new(),
        }
    }

    /// The gauge named `id`, created with default settings if it does not
    /// exist yet.
    pub fn get(&mut self, id: &str) -> GaugeHandle<'_> {
        let gauge = self.gauges.entry(id.to_string()).or_insert_with(|| {
            debug!(gauge = id, "creating gauge");
            GaugeContainer::new(id)
        });
        GaugeHandle {
            gauge,
            lock: &mut self.lock,
        }
    }

    /// The gauge named `id`, if it exists.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&GaugeContainer> {
        self.gauges.get(id)
    }

    /// Returns `true` if a gauge named `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.gauges.contains_key(id)
    }

    /// Number of gauges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    /// Returns `true` if there are no gauges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Identifiers of all gauges, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.gauges.keys().map(String::as_str).collect()
    }

    /// Remove gauge `id`, detaching it and dropping its holds.
    pub fn remove<S: Scene + ?Sized>(&mut self, id: &str, scene: &mut S) -> Option<GaugeContainer> {
        let mut gauge = self.gauges.remove(id)?;
        gauge.abort(scene, &mut self.lock);
        Some(gauge)
    }

    /// Drop every gauge, as at the end of a session.
    pub fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        for gauge in self.gauges.values_mut() {
            gauge.abort(scene, &mut self.lock);
        }
        self.gauges.clear();
    }

    /// Advance every attached gauge by one frame, in identifier order.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H) {
        for gauge in self.gauges.values_mut().filter(|g| g.is_attached()) {
            gauge.update(host, &mut self.lock);
        }
    }

    /// Shared movement lock.
    #[must_use]
    pub fn lock(&self) -> &MovementLock {
        &self.lock
    }

    /// Is a gauge that takes player input running?
    #[must_use]
    pub fn is_gauge_action_running(&self) -> bool {
        self.lock.is_gauge_action_running()
    }

    /// Should the calling event script stay on its current instruction?
    #[must_use]
    pub fn should_wait(&self) -> bool {
        self.lock.should_wait()
    }

    #[must_use]
    pub fn is_menu_disabled(&self) -> bool {
        self.lock.is_menu_disabled()
    }

    /// Gauge `id` set up to start map event `map_event_id` when it finishes
    /// and store its result in `variable_id`.
    pub fn blank_map_event_gauge(
        &mut self,
        id: &str,
        map_event_id: u32,
        variable_id: u32,
    ) -> GaugeHandle<'_> {
        let mut handle = self.get(id);
        handle
            .map_event_id(map_event_id)
            .common_event_id(0)
            .result_variable_id(variable_id);
        handle
    }

    /// Gauge `id` set up to reserve common event `common_event_id` when it
    /// finishes and store its result in `variable_id`.
    pub fn blank_common_event_gauge(
        &mut self,
        id: &str,
        common_event_id: u32,
        variable_id: u32,
    ) -> GaugeHandle<'_> {
        let mut handle = self.get(id);
        handle
            .common_event_id(common_event_id)
            .map_event_id(0)
            .result_variable_id(variable_id);
        handle
    }

    /// Validate `config` and apply it to the gauge it names.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the registry is left untouched.
    pub fn apply_config(&mut self, config: &GaugeConfig) -> Result<GaugeHandle<'_>, GaugeError> {
        config.validate()?;
        let mut handle = self.get(&config.id);
        config.apply(&mut handle);
        Ok(handle)
    }
}

/// Mutable access to one gauge of a registry.
///
/// Derefs to [`GaugeContainer`] for configuration and queries, and adds
/// [`start`](GaugeHandle::start), which needs the registry's movement lock.
#[derive(Debug)]
pub struct GaugeHandle<'a> {
    gauge: &'a mut GaugeContainer,
    lock: &'a mut MovementLock,
}

impl GaugeHandle<'_> {
    /// Begin a run of this gauge.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> &mut Self {
        self.gauge.start(host, self.lock);
        self
    }
}

impl Deref for GaugeHandle<'_> {
    type Target = GaugeContainer;

    fn deref(&self) -> &Self::Target {
        self.gauge
    }
}

impl DerefMut for GaugeHandle<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.gauge
    }
}

#[cfg(test)]
mod tests {
    use gauge_host::{Button, HeadlessHost, HostEvent};

    use super::*;

    fn host() -> HeadlessHost {
        HeadlessHost::new()
            .with_picture("Fill", 200, 24)
            .with_picture("Cursor", 20, 24)
            .with_picture("Timer", 100, 8)
    }

    fn run(registry: &mut GaugeRegistry, host: &mut HeadlessHost, frames: usize) {
        for _ in 0..frames {
            registry.update(host);
            host.end_frame();
        }
    }

    #[test]
    fn test_get_creates_lazily_and_reuses() {
        let mut registry = GaugeRegistry::new();
        assert!(registry.is_empty());
        registry.get("a").lifetime_value(42);
        registry.get("a");
        registry.get("b");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), ["a", "b"]);
        assert_eq!(registry.find("a").unwrap().lifetime_part().total(), 42);
        assert!(registry.find("c").is_none());
    }

    #[test]
    fn test_start_engages_shared_lock() {
        let mut host = host();
        let mut registry = GaugeRegistry::new();
        registry
            .get("a")
            .fill("Fill", 0, 0)
            .cursor("Cursor", 50)
            .lifetime_value(5)
            .pause_before_fade_out(0)
            .fade_out_speed(255);
        registry.get("a").start(&mut host);
        assert!(registry.is_gauge_action_running());
        assert!(registry.is_menu_disabled());
        assert!(!registry.should_wait());

        run(&mut registry, &mut host, 10);
        assert!(!registry.is_gauge_action_running());
        assert!(registry.find("a").unwrap().is_failed());
    }

    #[test]
    fn test_update_drives_every_attached_gauge() {
        let mut host = host();
        let mut registry = GaugeRegistry::new();
        for id in ["a", "b"] {
            registry
                .get(id)
                .no_action()
                .lifetime("Timer", 3)
                .success_point(100);
        }
        registry.get("a").start(&mut host);
        run(&mut registry, &mut host, 4);

        assert!(registry.find("a").unwrap().is_success());
        assert!(!registry.find("b").unwrap().is_dead());
        assert_eq!(registry.find("b").unwrap().lifetime_part().consumed(), 0);
    }

    #[test]
    fn test_simultaneous_finishes_fire_in_id_order() {
        let mut host = host();
        let mut registry = GaugeRegistry::new();
        for (event, id) in (1..).zip(["a", "b", "c", "d"]) {
            registry
                .get(id)
                .no_action()
                .lifetime("Timer", 2)
                .success_point(100)
                .common_event_id(event)
                .pause_before_fade_out(0)
                .fade_out_speed(255);
        }
        for id in ["c", "a", "d", "b"] {
            registry.get(id).start(&mut host);
        }
        run(&mut registry, &mut host, 6);

        let fired: Vec<u32> = host
            .events()
            .iter()
            .filter_map(|event| match event {
                HostEvent::CommonEvent { id } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(fired, [1, 2, 3, 4]);
    }

    #[test]
    fn test_presets_fire_targets() {
        let mut host = host();
        let mut registry = GaugeRegistry::new();
        let mut gauge = registry.blank_common_event_gauge("c", 7, 3);
        gauge
            .no_action()
            .lifetime("Timer", 1)
            .success_point(100)
            .pause_before_fade_out(0)
            .fade_out_speed(255);
        gauge.start(&mut host);
        run(&mut registry, &mut host, 5);
        assert_eq!(
            host.events(),
            [
                HostEvent::Variable { id: 3, value: 1 },
                HostEvent::CommonEvent { id: 7 },
            ]
        );

        registry
            .blank_map_event_gauge("c", 11, 3)
            .start(&mut host);
        run(&mut registry, &mut host, 5);
        assert_eq!(host.events().last(), Some(&HostEvent::MapEvent { id: 11 }));
    }

    #[test]
    fn test_remove_and_clear_detach() {
        let mut host = host();
        let mut registry = GaugeRegistry::new();
        registry.get("a").fill("Fill", 0, 0).cursor("Cursor", 50);
        registry.get("b").fill("Fill", 0, 0).cursor("Cursor", 50);
        registry.get("a").start(&mut host);
        registry.get("b").start(&mut host);
        host.press(Button::Ok);
        run(&mut registry, &mut host, 2);

        let removed = registry.remove("a", &mut host).unwrap();
        assert!(!removed.is_attached());
        assert!(!host.is_attached("a"));
        assert!(registry.is_gauge_action_running());

        registry.clear(&mut host);
        assert!(registry.is_empty());
        assert!(host.attached().is_empty());
        assert!(!registry.is_gauge_action_running());
    }

    #[test]
    fn test_apply_config_rejects_invalid() {
        let mut registry = GaugeRegistry::new();
        let config = GaugeConfig {
            success_point: 140,
            ..GaugeConfig::new("bad")
        };
        assert!(matches!(
            registry.apply_config(&config),
            Err(GaugeError::PercentOutOfRange { field: "success_point", value: 140 })
        ));
        assert!(!registry.contains("bad"));
    }
}
