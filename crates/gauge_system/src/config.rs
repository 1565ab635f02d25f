//! Declarative gauge configuration.
//!
//! A [`GaugeConfig`] carries every fluent setting of a [`GaugeContainer`] in
//! one serialisable value, so a gauge can be described in JSON and applied
//! in one step. Missing fields take the same defaults as a fresh container.

use gauge_component::{CountDirection, CursorStart, LifetimeComponent};
use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::container::{DEFAULT_FADE_OUT_SPEED, DEFAULT_PAUSE_BEFORE_FADE_OUT, GaugeContainer};
use crate::error::GaugeError;
use crate::result::ActionKind;
use crate::success::{PercentRange, SuccessBias, SuccessTarget};

/// A picture and its offset from the gauge origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartConfig {
    pub image: String,
    #[serde(default)]
    pub offset: [i32; 2],
}

impl PartConfig {
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            offset: [0, 0],
        }
    }

    /// Offset from the gauge origin.
    #[must_use]
    pub fn with_offset(mut self, x: i32, y: i32) -> Self {
        self.offset = [x, y];
        self
    }
}

/// Every setting of one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Registry identifier.
    pub id: String,
    pub action: ActionKind,

    pub fill: Option<PartConfig>,
    pub cursor: Option<PartConfig>,
    pub lifetime: Option<PartConfig>,
    pub background: Option<PartConfig>,
    pub foreground: Option<PartConfig>,

    pub fill_speed: u32,
    /// `0` empties at the fill speed.
    pub empty_speed: u32,
    pub reset_fill: bool,

    /// Patrol speed of a moving cursor.
    pub cursor_speed: u32,
    pub cursor_bounce: bool,
    pub cursor_start: CursorStart,

    pub lifetime_value: u32,
    pub eternal: bool,
    pub lifetime_direction: CountDirection,

    pub anchor: Anchor,
    pub offset: [i32; 2],
    /// Radians.
    pub rotation: f32,

    /// Percent of the fill width, or percent chance for no-action gauges.
    pub success_point: u32,
    pub success_range: Option<PercentRange>,
    pub success_bias: SuccessBias,

    pub common_event_id: u32,
    pub map_event_id: u32,
    pub result_variable_id: u32,

    pub fade_out_speed: i32,
    pub pause_before_fade_out: u32,
    pub wait_to_finish: bool,
    /// Fixed seed for percent-chance draws.
    pub random_seed: Option<u64>,
}

impl GaugeConfig {
    /// Defaults for gauge `id`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON description.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Parse`] for malformed JSON and the validation
    /// error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, GaugeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_fill(mut self, part: PartConfig) -> Self {
        self.fill = Some(part);
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, part: PartConfig) -> Self {
        self.cursor = Some(part);
        self
    }

    #[must_use]
    pub fn with_lifetime(mut self, part: PartConfig) -> Self {
        self.lifetime = Some(part);
        self
    }

    /// Check ranges the container would otherwise accept silently.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), GaugeError> {
        if self.id.is_empty() {
            return Err(GaugeError::EmptyIdentifier);
        }
        percent("success_point", self.success_point)?;
        if let Some(range) = self.success_range {
            percent("success_range.min", range.min)?;
            percent("success_range.max", range.max)?;
            if range.min > range.max {
                return Err(GaugeError::ReversedRange {
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Write every setting onto `gauge`.
    ///
    /// Parts absent from the description keep whatever picture the gauge
    /// already has.
    pub fn apply(&self, gauge: &mut GaugeContainer) {
        if let Some(part) = &self.fill {
            gauge
                .fill_image(part.image.as_str())
                .fill_offset(part.offset[0], part.offset[1]);
        }
        if let Some(part) = &self.cursor {
            gauge
                .cursor_image(part.image.as_str())
                .cursor_offset(part.offset[0], part.offset[1]);
        }
        if let Some(part) = &self.lifetime {
            gauge
                .lifetime_image(part.image.as_str())
                .lifetime_offset(part.offset[0], part.offset[1]);
        }
        if let Some(part) = &self.background {
            gauge
                .background(part.image.as_str())
                .background_offset(part.offset[0], part.offset[1]);
        }
        if let Some(part) = &self.foreground {
            gauge
                .foreground(part.image.as_str())
                .foreground_offset(part.offset[0], part.offset[1]);
        }

        match self.action {
            ActionKind::Cursor => gauge.moving_cursor(self.cursor_speed),
            other => gauge.action(other),
        };

        gauge
            .fill_speed(self.fill_speed)
            .empty_speed(self.empty_speed)
            .reset_fill(self.reset_fill)
            .cursor_bounce(self.cursor_bounce)
            .cursor_start(self.cursor_start)
            .lifetime_value(self.lifetime_value)
            .eternal(self.eternal)
            .lifetime_direction(self.lifetime_direction)
            .anchor(self.anchor)
            .offset(self.offset[0], self.offset[1])
            .rotation(self.rotation)
            .success_point(self.success_point)
            .success_bias(self.success_bias)
            .common_event_id(self.common_event_id)
            .map_event_id(self.map_event_id)
            .result_variable_id(self.result_variable_id)
            .fade_out_speed(self.fade_out_speed)
            .pause_before_fade_out(self.pause_before_fade_out)
            .wait_to_finish(self.wait_to_finish);

        match self.success_range {
            Some(range) => gauge.success_range(range.min, range.max),
            None => gauge.clear_success_range(),
        };
        if let Some(seed) = self.random_seed {
            gauge.random_seed(seed);
        }
    }
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            action: ActionKind::Fill,
            fill: None,
            cursor: None,
            lifetime: None,
            background: None,
            foreground: None,
            fill_speed: 1,
            empty_speed: 0,
            reset_fill: false,
            cursor_speed: 1,
            cursor_bounce: true,
            cursor_start: CursorStart::Left,
            lifetime_value: LifetimeComponent::DEFAULT_LIFETIME,
            eternal: false,
            lifetime_direction: CountDirection::Up,
            anchor: Anchor::default(),
            offset: [0, 0],
            rotation: 0.0,
            success_point: SuccessTarget::DEFAULT_POINT,
            success_range: None,
            success_bias: SuccessBias::Exact,
            common_event_id: 0,
            map_event_id: 0,
            result_variable_id: 0,
            fade_out_speed: DEFAULT_FADE_OUT_SPEED,
            pause_before_fade_out: DEFAULT_PAUSE_BEFORE_FADE_OUT,
            wait_to_finish: false,
            random_seed: None,
        }
    }
}

fn percent(field: &'static str, value: u32) -> Result<(), GaugeError> {
    if value > 100 {
        return Err(GaugeError::PercentOutOfRange { field, value });
    }
    Ok(())
}
