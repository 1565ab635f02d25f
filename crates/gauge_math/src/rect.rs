//! Integer pixel rectangle.
//!
//! [`Rect`] is used for crop frames (the visible part of an image) and for
//! bounding boxes of gauge parts relative to their container.

use glam::{IVec2, UVec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at `origin` covering `size`.
    #[must_use]
    pub fn from_origin_size(origin: IVec2, size: UVec2) -> Self {
        Self::new(origin.x, origin.y, size.x as i32, size.y as i32)
    }

    /// The full frame of an image of the given size.
    #[must_use]
    pub fn full(size: UVec2) -> Self {
        Self::from_origin_size(IVec2::ZERO, size)
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal center, rounded toward the left edge.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Top-left corner as a vector.
    #[must_use]
    pub fn origin(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Move the rectangle by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: IVec2) -> Self {
        self.x += offset.x;
        self.y += offset.y;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10, 20, 200, 24);
        assert_eq!(r.right(), 210);
        assert_eq!(r.bottom(), 44);
        assert_eq!(r.center_x(), 110);
    }

    #[test]
    fn test_full_frame() {
        let r = Rect::full(UVec2::new(64, 16));
        assert_eq!(r, Rect::new(0, 0, 64, 16));
        assert!(!r.is_empty());
        assert!(Rect::ZERO.is_empty());
    }

    #[test]
    fn test_translated() {
        let r = Rect::new(1, 2, 3, 4).translated(IVec2::new(10, -2));
        assert_eq!(r.origin(), IVec2::new(11, 0));
        assert_eq!(r.width, 3);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let r = Rect::new(5, 6, 7, 8);
        let json = serde_json::to_string(&r).unwrap();
        let restored: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, restored);
    }
}
