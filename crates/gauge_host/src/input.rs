//! Input queries.

use serde::{Deserialize, Serialize};

/// Logical buttons the gauge reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Confirm / action button.
    Ok,
    /// Cancel / back button.
    Cancel,
}

impl Button {
    /// The host-side button name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Cancel => "cancel",
        }
    }
}

/// Current-frame input state.
///
/// `pressed` queries are level-triggered (held this frame); `triggered`
/// queries are edge-triggered and only true on the frame the press began.
pub trait Input {
    /// Is `button` held down this frame?
    fn is_pressed(&self, button: Button) -> bool;

    /// Did `button` go down this frame?
    fn is_triggered(&self, button: Button) -> bool;

    /// Is the pointer/touch held down this frame?
    fn is_touch_pressed(&self) -> bool;

    /// Did the pointer/touch begin a press this frame?
    fn is_touch_triggered(&self) -> bool;

    /// Did the pointer/touch issue a cancel gesture this frame?
    fn is_touch_cancelled(&self) -> bool;

    /// Confirm held, by button or touch.
    fn confirm_pressed(&self) -> bool {
        self.is_pressed(Button::Ok) || self.is_touch_pressed()
    }

    /// Confirm started this frame, by button or touch.
    fn confirm_triggered(&self) -> bool {
        self.is_triggered(Button::Ok) || self.is_touch_triggered()
    }

    /// Cancel requested this frame, by button or touch.
    fn cancel_triggered(&self) -> bool {
        self.is_triggered(Button::Cancel) || self.is_touch_cancelled()
    }
}
