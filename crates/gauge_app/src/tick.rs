//! Fixed-timestep frame loop.
//!
//! Each tick:
//!
//! 1. Apply the scenario commands scheduled for this frame.
//! 2. Update every attached gauge.
//! 3. Clear edge-triggered input.
//! 4. Advance the frame counter.

use std::time::{Duration, Instant};

use anyhow::Result;
use gauge_host::HeadlessHost;
use gauge_system::{GaugeRegistry, GaugeResult};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::scenario::{Command, Scenario};

/// Environment variable overriding the tick rate.
pub const TICK_RATE_ENV: &str = "GAUGE_TICK_RATE";

/// Configuration for the frame loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = until the scenario settles).
    pub max_ticks: u64,
    /// Sleep between ticks to hold the tick rate.
    pub realtime: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            realtime: false,
        }
    }
}

impl TickConfig {
    /// Defaults, with the tick rate taken from `GAUGE_TICK_RATE` if set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(TICK_RATE_ENV) {
            match raw.parse::<f64>() {
                Ok(rate) if rate > 0.0 => config.tick_rate = rate,
                _ => warn!(value = %raw, "ignoring invalid {TICK_RATE_ENV}"),
            }
        }
        config
    }
}

/// Final state of one gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeReport {
    pub id: String,
    pub result: GaugeResult,
    pub code: i32,
    pub attached: bool,
}

/// The frame loop state.
#[derive(Debug)]
pub struct TickLoop {
    /// Frames run so far.
    tick_id: u64,
    config: TickConfig,
    scenario: Scenario,
    host: HeadlessHost,
    registry: GaugeRegistry,
}

impl TickLoop {
    /// Build the host and gauges of `scenario`.
    ///
    /// # Errors
    ///
    /// Fails if a gauge description does not validate.
    pub fn new(config: TickConfig, scenario: Scenario) -> Result<Self> {
        let host = scenario.build_host();
        let registry = scenario.build_registry()?;
        Ok(Self {
            tick_id: 0,
            config,
            scenario,
            host,
            registry,
        })
    }

    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    #[must_use]
    pub fn registry(&self) -> &GaugeRegistry {
        &self.registry
    }

    /// Run one frame.
    pub fn tick(&mut self) {
        for command in self.scenario.commands_at(self.tick_id) {
            debug!(frame = self.tick_id, ?command, "scenario command");
            match command {
                Command::Start { gauge } => {
                    self.registry.get(gauge).start(&mut self.host);
                }
                Command::Press { button } => self.host.press(*button),
                Command::Release { button } => self.host.release(*button),
                Command::Tap { button } => self.host.tap(*button),
                Command::Touch { pressed } => self.host.set_touch_pressed(*pressed),
                Command::TouchCancel => self.host.touch_cancel(),
            }
        }

        self.registry.update(&mut self.host);
        self.host.end_frame();
        self.tick_id += 1;
    }

    /// No gauge is running and no command is left in the script.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let script_done = self
            .scenario
            .last_scripted_frame()
            .is_none_or(|last| last < self.tick_id);
        script_done && self.host.attached().is_empty()
    }

    /// Run until the scenario settles or `max_ticks` is reached.
    pub fn run(&mut self) {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            realtime = self.config.realtime,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();
            self.tick();

            if self.is_settled() {
                info!(ticks = self.tick_id, "scenario settled");
                break;
            }
            if self.config.max_ticks > 0 && self.tick_id >= self.config.max_ticks {
                warn!(ticks = self.tick_id, "tick limit reached before scenario settled");
                break;
            }

            if self.config.realtime {
                let elapsed = start.elapsed();
                if elapsed < tick_duration {
                    std::thread::sleep(tick_duration - elapsed);
                } else {
                    warn!(
                        tick_id = self.tick_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = tick_duration.as_millis() as u64,
                        "tick exceeded time budget"
                    );
                }
            }
        }
    }

    /// Final state of every gauge, sorted by identifier.
    #[must_use]
    pub fn report(&self) -> Vec<GaugeReport> {
        self.registry
            .ids()
            .into_iter()
            .filter_map(|id| self.registry.find(id))
            .map(|gauge| GaugeReport {
                id: gauge.id().to_string(),
                result: gauge.result(),
                code: gauge.result().code(),
                attached: gauge.is_attached(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gauge_host::HostEvent;

    use super::*;

    fn scenario(script: &str) -> Scenario {
        Scenario::from_json(&format!(
            r#"{{
                "pictures": [
                    {{ "name": "Fill", "width": 200, "height": 24 }},
                    {{ "name": "Cursor", "width": 20, "height": 24 }}
                ],
                "gauges": [{{
                    "id": "fishing",
                    "fill": {{ "image": "Fill" }},
                    "cursor": {{ "image": "Cursor" }},
                    "fill_speed": 25,
                    "empty_speed": 1,
                    "lifetime_value": 10,
                    "success_point": 50,
                    "result_variable_id": 4,
                    "pause_before_fade_out": 0,
                    "fade_out_speed": 255
                }}],
                "script": {script}
            }}"#
        ))
        .unwrap()
    }

    fn fast() -> TickConfig {
        TickConfig {
            tick_rate: 1000.0,
            max_ticks: 100,
            realtime: false,
        }
    }

    #[test]
    fn test_tick_advances_counter() {
        let mut tick_loop = TickLoop::new(fast(), scenario("[]")).unwrap();
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick();
        tick_loop.tick();
        assert_eq!(tick_loop.tick_id(), 2);
        assert!(tick_loop.is_settled());
    }

    #[test]
    fn test_partial_fill_scenario_succeeds() {
        let mut tick_loop = TickLoop::new(
            fast(),
            scenario(
                r#"[
                    { "frame": 0, "action": "start", "gauge": "fishing" },
                    { "frame": 0, "action": "press", "button": "ok" },
                    { "frame": 4, "action": "release", "button": "ok" }
                ]"#,
            ),
        )
        .unwrap();
        tick_loop.run();

        assert!(tick_loop.is_settled());
        assert_eq!(
            tick_loop.report(),
            [GaugeReport {
                id: "fishing".to_string(),
                result: GaugeResult::Success,
                code: 1,
                attached: false,
            }]
        );
        assert_eq!(tick_loop.host().variable(4), 1);
    }

    #[test]
    fn test_cancel_scenario() {
        let mut tick_loop = TickLoop::new(
            fast(),
            scenario(
                r#"[
                    { "frame": 0, "action": "start", "gauge": "fishing" },
                    { "frame": 2, "action": "tap", "button": "cancel" }
                ]"#,
            ),
        )
        .unwrap();
        tick_loop.run();
        assert_eq!(
            tick_loop.host().events(),
            [HostEvent::Variable { id: 4, value: 3 }]
        );
        assert_eq!(tick_loop.tick_id(), 3);
    }

    #[test]
    fn test_tick_limit_stops_eternal_gauge() {
        let mut scenario = scenario(r#"[{ "frame": 0, "action": "start", "gauge": "fishing" }]"#);
        scenario.gauges[0].eternal = true;
        let mut tick_loop = TickLoop::new(fast(), scenario).unwrap();
        tick_loop.run();
        assert_eq!(tick_loop.tick_id(), 100);
        assert!(!tick_loop.is_settled());
        assert!(tick_loop.registry().find("fishing").unwrap().is_moving());
    }

    #[test]
    fn test_bundled_scenario_settles() {
        let scenario = Scenario::from_json(include_str!("../scenarios/fishing.json")).unwrap();
        let mut tick_loop = TickLoop::new(
            TickConfig {
                max_ticks: 10_000,
                ..fast()
            },
            scenario,
        )
        .unwrap();
        tick_loop.run();

        assert!(tick_loop.is_settled());
        let report = tick_loop.report();
        assert_eq!(report.len(), 3);
        assert!(report.iter().all(|g| g.result.is_decided() && !g.attached));
        assert!(!tick_loop.registry().is_gauge_action_running());
    }
}
