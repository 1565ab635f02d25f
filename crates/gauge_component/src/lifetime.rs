//! The lifetime countdown.
//!
//! Every gauge run has a frame budget. [`LifetimeComponent`] counts the
//! frames, optionally shows the remaining budget as a cropped bar, and
//! reports death once the budget is spent.

use gauge_math::Rect;
use serde::{Deserialize, Serialize};

use crate::component::{Component, GaugeComponent};

/// How the lifetime bar is drawn as frames are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountDirection {
    /// The bar grows from empty to full.
    #[default]
    Up,
    /// The bar shrinks from full to empty.
    Down,
}

/// A frame countdown with an optional bar.
#[derive(Debug)]
pub struct LifetimeComponent {
    base: GaugeComponent,
    /// Frame budget.
    total: u32,
    /// Frames consumed this run.
    consumed: u32,
    direction: CountDirection,
    /// Never expires.
    eternal: bool,
    dead: bool,
}

impl LifetimeComponent {
    /// Default frame budget: five seconds at 60 frames per second.
    pub const DEFAULT_LIFETIME: u32 = 300;

    /// Create a countdown with the default budget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: GaugeComponent::new(),
            total: Self::DEFAULT_LIFETIME,
            consumed: 0,
            direction: CountDirection::Up,
            eternal: false,
            dead: false,
        }
    }

    /// Set the frame budget.
    pub fn set_total(&mut self, frames: u32) {
        self.total = frames;
    }

    /// Frame budget.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Frames consumed this run.
    #[must_use]
    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    /// Set how the bar is drawn.
    pub fn set_direction(&mut self, direction: CountDirection) {
        self.direction = direction;
    }

    /// How the bar is drawn.
    #[must_use]
    pub fn direction(&self) -> CountDirection {
        self.direction
    }

    /// Disable (or re-enable) expiry.
    pub fn set_eternal(&mut self, eternal: bool) {
        self.eternal = eternal;
    }

    /// Returns `true` if the countdown never expires.
    #[must_use]
    pub fn is_eternal(&self) -> bool {
        self.eternal
    }

    /// Returns `true` once the budget is spent or the countdown was killed.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// End the countdown immediately.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    /// Consume one frame.
    ///
    /// Death is detected on the call after the last frame is consumed, so a
    /// budget of `n` frames gives `n` live updates.
    pub fn handle_lifetime(&mut self) {
        if self.eternal || self.dead {
            return;
        }
        if self.consumed >= self.total {
            self.dead = true;
            return;
        }
        if self.is_ready() {
            let width = self.base.width();
            let value = (i64::from(self.consumed) * i64::from(width) / i64::from(self.total)) as i32;
            let visible = match self.direction {
                CountDirection::Up => value,
                CountDirection::Down => width - value,
            };
            let height = self.base.height();
            self.base.set_frame(Rect::new(0, 0, visible, height));
        }
        self.consumed += 1;
    }
}

impl Default for LifetimeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LifetimeComponent {
    fn base(&self) -> &GaugeComponent {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GaugeComponent {
        &mut self.base
    }

    fn reset(&mut self) {
        self.base.clear_run_state();
        self.consumed = 0;
        self.dead = false;
    }
}

#[cfg(test)]
mod tests {
    use gauge_host::HeadlessHost;
    use proptest::prelude::*;

    use super::*;

    fn countdown(total: u32) -> LifetimeComponent {
        let mut lifetime = LifetimeComponent::new();
        lifetime.set_total(total);
        lifetime
    }

    #[test]
    fn test_dies_when_consumed_reaches_total() {
        let mut lifetime = countdown(10);
        for _ in 0..10 {
            lifetime.handle_lifetime();
            assert!(!lifetime.is_dead());
        }
        assert_eq!(lifetime.consumed(), 10);
        lifetime.handle_lifetime();
        assert!(lifetime.is_dead());
        assert_eq!(lifetime.consumed(), 10);
    }

    #[test]
    fn test_zero_budget_dies_on_first_update() {
        let mut lifetime = countdown(0);
        lifetime.handle_lifetime();
        assert!(lifetime.is_dead());
    }

    #[test]
    fn test_kill_and_reset() {
        let mut lifetime = countdown(10);
        lifetime.handle_lifetime();
        lifetime.kill();
        assert!(lifetime.is_dead());
        lifetime.handle_lifetime();
        assert_eq!(lifetime.consumed(), 1);
        lifetime.reset();
        assert!(!lifetime.is_dead());
        assert_eq!(lifetime.consumed(), 0);
    }

    #[test]
    fn test_bar_counts_up() {
        let mut host = HeadlessHost::new().with_picture("Timer", 100, 8);
        let mut lifetime = countdown(4);
        lifetime.base_mut().set_image(Some("Timer".to_string()));
        lifetime.base_mut().load(&mut host);
        lifetime.handle_lifetime();
        assert_eq!(host.last_crop("Timer"), Some(Rect::new(0, 0, 0, 8)));
        lifetime.handle_lifetime();
        assert_eq!(host.last_crop("Timer"), Some(Rect::new(0, 0, 25, 8)));
    }

    #[test]
    fn test_bar_counts_down() {
        let mut host = HeadlessHost::new().with_picture("Timer", 100, 8);
        let mut lifetime = countdown(4);
        lifetime.set_direction(CountDirection::Down);
        lifetime.base_mut().set_image(Some("Timer".to_string()));
        lifetime.base_mut().load(&mut host);
        lifetime.handle_lifetime();
        lifetime.handle_lifetime();
        lifetime.handle_lifetime();
        assert_eq!(host.last_crop("Timer"), Some(Rect::new(0, 0, 50, 8)));
    }

    proptest! {
        #[test]
        fn test_eternal_never_dies(total in 0u32..50, updates in 0usize..500) {
            let mut lifetime = countdown(total);
            lifetime.set_eternal(true);
            for _ in 0..updates {
                lifetime.handle_lifetime();
            }
            prop_assert!(!lifetime.is_dead());
        }

        #[test]
        fn test_death_exactly_after_budget(total in 0u32..200) {
            let mut lifetime = countdown(total);
            for _ in 0..total {
                lifetime.handle_lifetime();
            }
            prop_assert!(!lifetime.is_dead());
            prop_assert_eq!(lifetime.consumed(), total);
            lifetime.handle_lifetime();
            prop_assert!(lifetime.is_dead());
        }
    }
}
