//! Scenario files.
//!
//! A scenario describes one headless session: the pictures the host knows,
//! the screen geometry, the gauges and a frame-indexed script of input and
//! start commands.
//!
//! ```json
//! {
//!   "pictures": [{ "name": "Fill", "width": 200, "height": 24 }],
//!   "gauges": [{ "id": "fishing", "fill": { "image": "Fill" } }],
//!   "script": [
//!     { "frame": 0, "action": "start", "gauge": "fishing" },
//!     { "frame": 0, "action": "press", "button": "ok" }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use gauge_host::{Button, HeadlessHost};
use gauge_math::IVec2;
use gauge_system::{GaugeConfig, GaugeRegistry};
use serde::{Deserialize, Serialize};

/// A picture registered with the headless host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// A map event visible on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMarker {
    pub id: u32,
    pub x: i32,
    pub y: i32,
}

/// One scripted command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Start { gauge: String },
    Press { button: Button },
    Release { button: Button },
    Tap { button: Button },
    Touch { pressed: bool },
    TouchCancel,
}

/// A command issued at the start of frame `frame` (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub frame: u64,
    #[serde(flatten)]
    pub command: Command,
}

/// One headless session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub pictures: Vec<Picture>,
    /// Screen size in pixels; the host default if absent.
    pub screen: Option<[i32; 2]>,
    /// Player position (bottom-center) in screen pixels.
    pub player: Option<[i32; 2]>,
    pub events: Vec<EventMarker>,
    pub gauges: Vec<GaugeConfig>,
    pub script: Vec<Step>,
}

impl Scenario {
    /// Parse and check a scenario.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, invalid gauge descriptions, and start
    /// commands naming gauges the scenario does not declare.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json).context("invalid scenario JSON")?;
        scenario.check()?;
        Ok(scenario)
    }

    /// Read a scenario file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in scenario {}", path.display()))
    }

    fn check(&self) -> Result<()> {
        for gauge in &self.gauges {
            gauge
                .validate()
                .with_context(|| format!("gauge `{}`", gauge.id))?;
        }
        for step in &self.script {
            if let Command::Start { gauge } = &step.command
                && !self.gauges.iter().any(|g| &g.id == gauge)
            {
                bail!("frame {}: start of undeclared gauge `{gauge}`", step.frame);
            }
        }
        Ok(())
    }

    /// A headless host with this scenario's pictures and geometry.
    #[must_use]
    pub fn build_host(&self) -> HeadlessHost {
        let mut host = HeadlessHost::new();
        for picture in &self.pictures {
            host.add_picture(picture.name.as_str(), picture.width, picture.height);
        }
        if let Some([w, h]) = self.screen {
            host.set_screen_size(IVec2::new(w, h));
        }
        if let Some([x, y]) = self.player {
            host.set_player_position(IVec2::new(x, y));
        }
        for event in &self.events {
            host.set_event_position(event.id, IVec2::new(event.x, event.y));
        }
        host
    }

    /// A registry holding every declared gauge, configured but not started.
    ///
    /// # Errors
    ///
    /// Fails if a gauge description does not validate.
    pub fn build_registry(&self) -> Result<GaugeRegistry> {
        let mut registry = GaugeRegistry::new();
        for gauge in &self.gauges {
            registry
                .apply_config(gauge)
                .with_context(|| format!("gauge `{}`", gauge.id))?;
        }
        Ok(registry)
    }

    /// Commands scheduled for `frame`, in file order.
    pub fn commands_at(&self, frame: u64) -> impl Iterator<Item = &Command> {
        self.script
            .iter()
            .filter(move |step| step.frame == frame)
            .map(|step| &step.command)
    }

    /// Frame of the last scripted command.
    #[must_use]
    pub fn last_scripted_frame(&self) -> Option<u64> {
        self.script.iter().map(|step| step.frame).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "pictures": [
            { "name": "Fill", "width": 200, "height": 24 },
            { "name": "Cursor", "width": 20, "height": 24 }
        ],
        "screen": [640, 480],
        "events": [{ "id": 3, "x": 100, "y": 200 }],
        "gauges": [
            { "id": "fishing", "fill": { "image": "Fill" }, "cursor": { "image": "Cursor" } }
        ],
        "script": [
            { "frame": 0, "action": "start", "gauge": "fishing" },
            { "frame": 0, "action": "press", "button": "ok" },
            { "frame": 4, "action": "release", "button": "ok" },
            { "frame": 6, "action": "touch_cancel" }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();
        assert_eq!(scenario.pictures.len(), 2);
        assert_eq!(scenario.gauges[0].id, "fishing");
        assert_eq!(scenario.last_scripted_frame(), Some(6));

        let first: Vec<&Command> = scenario.commands_at(0).collect();
        assert_eq!(
            first,
            [
                &Command::Start {
                    gauge: "fishing".to_string()
                },
                &Command::Press { button: Button::Ok },
            ]
        );
        assert_eq!(scenario.commands_at(6).next(), Some(&Command::TouchCancel));
        assert_eq!(scenario.commands_at(5).count(), 0);
    }

    #[test]
    fn test_build_host_and_registry() {
        let scenario = Scenario::from_json(SAMPLE).unwrap();
        let registry = scenario.build_registry().unwrap();
        assert!(registry.contains("fishing"));
        assert!(!registry.find("fishing").unwrap().is_attached());

        let host = scenario.build_host();
        assert_eq!(gauge_host::Viewport::screen_size(&host), IVec2::new(640, 480));
        assert_eq!(
            gauge_host::Viewport::event_screen_position(&host, 3),
            Some(IVec2::new(100, 200))
        );
    }

    #[test]
    fn test_rejects_undeclared_start() {
        let err = Scenario::from_json(
            r#"{ "script": [{ "frame": 1, "action": "start", "gauge": "ghost" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_rejects_invalid_gauge() {
        let err =
            Scenario::from_json(r#"{ "gauges": [{ "id": "g", "success_point": 300 }] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("success_point"));
    }
}
