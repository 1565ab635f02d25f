//! # gauge_math
//!
//! Math types for the gauge action engine. Re-exports [`glam`] integer
//! vectors for pixel coordinates and defines the small spatial types the
//! gauge components share:
//!
//! - [`Rect`]: an integer pixel rectangle (crop frames, bounding boxes).
//! - [`Span`]: an inclusive one-dimensional range (success windows, patrol
//!   bounds).
//! - [`percent_of`]: integer percentage of a length.

pub mod rect;
pub mod span;

// Re-export glam types for convenience.
pub use glam::{IVec2, UVec2};

pub use rect::Rect;
pub use span::{Span, percent_of};
