//! Success windows.
//!
//! A gauge succeeds when its scored position lands inside the success
//! window. The window comes either from an explicit percentage range of the
//! fill bar, or from a single success point combined with a bias.

use gauge_math::{Span, percent_of};
use serde::{Deserialize, Serialize};

/// Which side of the success point counts as success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessBias {
    /// Only the cursor's footprint around the point.
    #[default]
    Exact,
    /// From the point's center to the end of the bar.
    Above,
    /// From the start of the bar to the point's center.
    Below,
}

/// An explicit success range, in percent of the fill width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PercentRange {
    /// Lower bound, percent.
    pub min: u32,
    /// Upper bound, percent.
    pub max: u32,
}

impl PercentRange {
    /// Returns `true` if the range selects no window and must be ignored.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.min >= self.max
    }
}

/// Where success lies on the fill bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuccessTarget {
    /// Success point, percent of the fill width. For no-action gauges this
    /// is the percent chance of success.
    pub point: u32,
    /// Side of the point that counts.
    pub bias: SuccessBias,
    /// Explicit range; overrides `point` and `bias` unless degenerate.
    pub range: Option<PercentRange>,
}

impl SuccessTarget {
    /// Default success point, percent.
    pub const DEFAULT_POINT: u32 = 80;

    /// Pixel position of the success point on a fill bar spanning `fill`.
    #[must_use]
    pub fn point_x(&self, fill: Span) -> i32 {
        fill.start + percent_of(fill.len(), self.point)
    }

    /// The explicit range, if set and non-degenerate.
    #[must_use]
    pub fn effective_range(&self) -> Option<PercentRange> {
        self.range.filter(|range| !range.is_degenerate())
    }

    /// Compute the success window.
    ///
    /// `fill` is the span of the whole bar and `marker` the footprint of the
    /// cursor at the success point.
    #[must_use]
    pub fn window(&self, fill: Span, marker: Span) -> Span {
        if let Some(range) = self.effective_range() {
            return Span::new(
                fill.start + percent_of(fill.len(), range.min),
                fill.start + percent_of(fill.len(), range.max),
            );
        }
        let center = marker.start + marker.len() / 2;
        match self.bias {
            SuccessBias::Exact => marker,
            SuccessBias::Above => Span::new(center, fill.end),
            SuccessBias::Below => Span::new(fill.start, center),
        }
    }
}

impl Default for SuccessTarget {
    fn default() -> Self {
        Self {
            point: Self::DEFAULT_POINT,
            bias: SuccessBias::Exact,
            range: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const FILL: Span = Span { start: 0, end: 200 };
    const MARKER: Span = Span { start: 90, end: 110 };

    #[test]
    fn test_exact_window_is_marker() {
        let target = SuccessTarget {
            point: 50,
            ..SuccessTarget::default()
        };
        assert_eq!(target.window(FILL, MARKER), MARKER);
    }

    #[test]
    fn test_above_and_below() {
        let above = SuccessTarget {
            point: 50,
            bias: SuccessBias::Above,
            range: None,
        };
        assert_eq!(above.window(FILL, MARKER), Span::new(100, 200));

        let below = SuccessTarget {
            bias: SuccessBias::Below,
            ..above
        };
        assert_eq!(below.window(FILL, MARKER), Span::new(0, 100));
    }

    #[test]
    fn test_range_overrides_point() {
        let target = SuccessTarget {
            point: 50,
            bias: SuccessBias::Above,
            range: Some(PercentRange { min: 20, max: 40 }),
        };
        assert_eq!(target.window(FILL, MARKER), Span::new(40, 80));
    }

    #[test]
    fn test_degenerate_range_is_ignored() {
        let target = SuccessTarget {
            point: 50,
            bias: SuccessBias::Exact,
            range: Some(PercentRange { min: 30, max: 30 }),
        };
        assert_eq!(target.window(FILL, MARKER), MARKER);
    }

    #[test]
    fn test_range_is_relative_to_fill_start() {
        let fill = Span::new(80, 280);
        let target = SuccessTarget {
            point: 50,
            bias: SuccessBias::Exact,
            range: Some(PercentRange { min: 0, max: 50 }),
        };
        assert_eq!(target.window(fill, MARKER), Span::new(80, 180));
        assert_eq!(target.point_x(fill), 180);
    }

    proptest! {
        #[test]
        fn test_window_stays_on_bar(
            start in -500i32..500,
            len in 0i32..1000,
            point in 0u32..=100,
            marker_width in 0i32..64,
            bias in prop_oneof![
                Just(SuccessBias::Exact),
                Just(SuccessBias::Above),
                Just(SuccessBias::Below),
            ],
            range in proptest::option::of((0u32..=100, 0u32..=100)),
        ) {
            let fill = Span::new(start, start + len);
            let target = SuccessTarget {
                point,
                bias,
                range: range.map(|(min, max)| PercentRange { min, max }),
            };
            let max_left = (fill.end - marker_width).max(fill.start);
            let left = (target.point_x(fill) - marker_width / 2).clamp(fill.start, max_left);
            let marker = Span::new(left, (left + marker_width).min(fill.end));
            let window = target.window(fill, marker);
            prop_assert!(window.start <= window.end);
            prop_assert!(fill.contains(window.start));
            prop_assert!(fill.contains(window.end));
        }
    }
}
