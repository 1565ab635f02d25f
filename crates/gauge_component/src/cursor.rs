//! The cursor.
//!
//! On a fill gauge the cursor marks the target zone and stays put. On a
//! moving-cursor gauge it patrols the fill bar left and right until the
//! player presses confirm to stop it.

use gauge_math::Span;
use serde::{Deserialize, Serialize};

use crate::component::{Component, GaugeComponent};

/// Sentinel for "un-moved position not captured yet".
pub const UNMOVED: i32 = -1;

/// Which end of its track a moving cursor starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStart {
    /// Start at the left bound, moving right.
    #[default]
    Left,
    /// Start at the right bound, moving left.
    Right,
}

impl CursorStart {
    /// Initial direction of travel.
    #[must_use]
    pub const fn direction(self) -> i32 {
        match self {
            Self::Left => 1,
            Self::Right => -1,
        }
    }
}

/// A marker that can patrol a horizontal track.
#[derive(Debug)]
pub struct CursorComponent {
    base: GaugeComponent,
    moving: bool,
    /// Pixels per frame.
    speed: u32,
    /// Reverse at the ends instead of jumping to the other end.
    bounce: bool,
    /// Current direction, `1` (right) or `-1` (left).
    direction: i32,
    start: CursorStart,
    /// Track the cursor's footprint must stay within.
    bounds: Span,
    /// Position before the first movement this run, or [`UNMOVED`].
    unmoved_x: i32,
}

impl CursorComponent {
    /// Create a stationary cursor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: GaugeComponent::new(),
            moving: false,
            speed: 1,
            bounce: true,
            direction: CursorStart::Left.direction(),
            start: CursorStart::Left,
            bounds: Span::default(),
            unmoved_x: UNMOVED,
        }
    }

    /// Enable or disable patrolling.
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// Returns `true` if the cursor patrols.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Set the patrol speed in pixels per frame.
    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed;
    }

    /// Patrol speed.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Bounce at the ends (`true`) or wrap to the opposite end (`false`).
    pub fn set_bounce(&mut self, bounce: bool) {
        self.bounce = bounce;
    }

    /// Returns `true` if the cursor bounces at the ends.
    #[must_use]
    pub fn bounces(&self) -> bool {
        self.bounce
    }

    /// Choose the starting end. Also sets the current direction.
    pub fn set_start(&mut self, start: CursorStart) {
        self.start = start;
        self.direction = start.direction();
    }

    /// Configured starting end.
    #[must_use]
    pub fn start(&self) -> CursorStart {
        self.start
    }

    /// Current direction of travel.
    #[must_use]
    pub fn direction(&self) -> i32 {
        self.direction
    }

    /// Set the track, `[min, max]`, that the cursor's full width must stay
    /// inside.
    pub fn set_bounds(&mut self, bounds: Span) {
        self.bounds = bounds;
    }

    /// Range of x positions the cursor's left edge may take:
    /// `[min, max - width]`, collapsed to `min` if the cursor is wider than
    /// the track.
    #[must_use]
    pub fn travel(&self) -> Span {
        let start = self.bounds.start;
        let end = (self.bounds.end - self.base.width()).max(start);
        Span::new(start, end)
    }

    /// Horizontal center of the cursor.
    #[must_use]
    pub fn center_x(&self) -> i32 {
        self.base.bounds().center_x()
    }

    /// Remembered un-moved position, or [`UNMOVED`].
    #[must_use]
    pub fn unmoved_x(&self) -> i32 {
        self.unmoved_x
    }

    /// Advance the cursor by one frame.
    ///
    /// Bounce mode reverses on reaching the far end. Wrap mode holds at the
    /// far end for the frame it arrives and jumps to the opposite end on the
    /// next step.
    pub fn handle_movement(&mut self) {
        if !self.moving {
            return;
        }
        if self.unmoved_x == UNMOVED {
            self.unmoved_x = self.base.x();
        }

        let travel = self.travel();
        let x = self.base.x();
        let (far, near) = if self.direction > 0 {
            (travel.end, travel.start)
        } else {
            (travel.start, travel.end)
        };

        if !self.bounce && x == far {
            self.base.set_x(near);
            return;
        }

        let step = self.speed as i32 * self.direction;
        let next = travel.clamp(x + step);
        self.base.set_x(next);
        if self.bounce && next == far {
            self.direction = -self.direction;
        }
    }
}

impl Default for CursorComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CursorComponent {
    fn base(&self) -> &GaugeComponent {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GaugeComponent {
        &mut self.base
    }

    fn reset(&mut self) {
        self.base.clear_run_state();
        if self.unmoved_x != UNMOVED {
            self.base.set_x(self.unmoved_x);
        }
        self.unmoved_x = UNMOVED;
        self.direction = self.start.direction();
    }
}
