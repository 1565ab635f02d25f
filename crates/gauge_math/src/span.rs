//! Inclusive one-dimensional ranges.

use serde::{Deserialize, Serialize};

/// Integer percentage `pct` of `length`, truncated toward zero.
///
/// Percentages above 100 count as 100, so the result never exceeds
/// `length` in magnitude.
#[must_use]
pub const fn percent_of(length: i32, pct: u32) -> i32 {
    let pct = if pct > 100 { 100 } else { pct };
    (length as i64 * pct as i64 / 100) as i32
}

/// An inclusive range `[start, end]` on one axis.
///
/// Success windows are inclusive on both ends: a scored position equal to
/// either bound counts as inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Lower bound (inclusive).
    pub start: i32,
    /// Upper bound (inclusive).
    pub end: i32,
}

impl Span {
    /// Create a span. Bounds given in reverse order are swapped.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Returns `true` if `value` lies within the span, bounds included.
    #[must_use]
    pub const fn contains(&self, value: i32) -> bool {
        value >= self.start && value <= self.end
    }

    /// Distance between the bounds.
    #[must_use]
    pub const fn len(&self) -> i32 {
        self.end - self.start
    }

    /// Returns `true` if both bounds coincide.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp `value` into the span.
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(200, 50), 100);
        assert_eq!(percent_of(200, 0), 0);
        assert_eq!(percent_of(200, 100), 200);
        assert_eq!(percent_of(99, 50), 49);
    }

    #[test]
    fn test_percent_of_caps_at_whole_length() {
        assert_eq!(percent_of(200, 30_000_000), 200);
        assert_eq!(percent_of(i32::MAX, u32::MAX), i32::MAX);
        assert_eq!(percent_of(-200, 150), -200);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let s = Span::new(90, 110);
        assert!(s.contains(90));
        assert!(s.contains(110));
        assert!(!s.contains(89));
        assert!(!s.contains(111));
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let s = Span::new(10, 2);
        assert_eq!(s, Span { start: 2, end: 10 });
        assert_eq!(s.len(), 8);
    }

    proptest! {
        #[test]
        fn test_clamp_stays_inside(a in -500i32..500, b in -500i32..500, v in -2000i32..2000) {
            let s = Span::new(a, b);
            prop_assert!(s.contains(s.clamp(v)));
        }
    }
}
