//! The fill bar.
//!
//! [`FillComponent`] grows while the player holds confirm and shrinks when
//! they let go. The visible part of the picture is cropped to the current
//! fill amount, so the picture itself is the "full" bar.

use gauge_math::Rect;

use crate::component::{Component, GaugeComponent};

/// A bar filled and emptied a fixed number of pixels per frame.
#[derive(Debug)]
pub struct FillComponent {
    base: GaugeComponent,
    /// Current fill in pixels, within `0..=width`.
    amount: u32,
    /// Pixels added per frame while filling.
    fill_speed: u32,
    /// Pixels removed per frame while emptying. `0` reuses `fill_speed`.
    empty_speed: u32,
    /// Wrap to zero when filled past the width instead of holding at max.
    reset_on_max: bool,
    /// Only a moving bar reacts to fill/empty calls.
    moving: bool,
}

impl FillComponent {
    /// Create a bar with a fill speed of 1 pixel per frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: GaugeComponent::new(),
            amount: 0,
            fill_speed: 1,
            empty_speed: 0,
            reset_on_max: false,
            moving: false,
        }
    }

    /// Current fill amount in pixels.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Width of the visible part of the bar.
    #[must_use]
    pub fn visual_width(&self) -> i32 {
        self.amount as i32
    }

    /// Pixels added per frame while filling.
    #[must_use]
    pub fn fill_speed(&self) -> u32 {
        self.fill_speed
    }

    /// Set the pixels added per frame while filling.
    pub fn set_fill_speed(&mut self, speed: u32) {
        self.fill_speed = speed;
    }

    /// Set the pixels removed per frame while emptying (`0` = fill speed).
    pub fn set_empty_speed(&mut self, speed: u32) {
        self.empty_speed = speed;
    }

    /// Effective emptying speed.
    #[must_use]
    pub fn empty_speed(&self) -> u32 {
        if self.empty_speed == 0 {
            self.fill_speed
        } else {
            self.empty_speed
        }
    }

    /// Choose between wrapping to zero and holding at max on overflow.
    pub fn set_reset_on_max(&mut self, reset: bool) {
        self.reset_on_max = reset;
    }

    /// Returns `true` if the bar wraps to zero on overflow.
    #[must_use]
    pub fn resets_on_max(&self) -> bool {
        self.reset_on_max
    }

    /// Enable or disable reactions to fill/empty calls.
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    /// Returns `true` if the bar reacts to fill/empty calls.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Grow the bar by one frame's worth.
    ///
    /// Reaching the width exactly holds there; going past it either wraps to
    /// zero or clamps to the width, depending on the reset-on-max policy.
    pub fn handle_filling(&mut self) {
        if !self.moving || !self.is_ready() {
            return;
        }
        let width = self.base.width() as u32;
        self.amount = self.amount.saturating_add(self.fill_speed);
        if self.amount > width {
            self.amount = if self.reset_on_max { 0 } else { width };
        }
        self.update_crop();
    }

    /// Shrink the bar by one frame's worth, stopping at zero.
    pub fn handle_emptying(&mut self) {
        if !self.moving || !self.is_ready() {
            return;
        }
        self.amount = self.amount.saturating_sub(self.empty_speed());
        self.update_crop();
    }

    fn update_crop(&mut self) {
        let height = self.base.height();
        self.base
            .set_frame(Rect::new(0, 0, self.amount as i32, height));
    }
}

impl Default for FillComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FillComponent {
    fn base(&self) -> &GaugeComponent {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GaugeComponent {
        &mut self.base
    }

    fn reset(&mut self) {
        self.base.clear_run_state();
        self.amount = 0;
        if self.is_ready() {
            self.update_crop();
        }
    }
}
