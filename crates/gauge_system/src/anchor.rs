//! Screen anchoring.
//!
//! A gauge is placed either in one cell of a 3×3 screen grid, or above or
//! below a character (the player or a map event). Pixel offsets are added
//! after anchoring in every case.

use gauge_host::Viewport;
use gauge_math::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::GaugeError;

/// A cell of the 3×3 screen grid, numbered like a numeric keypad:
///
/// ```text
/// 7 8 9
/// 4 5 6
/// 1 2 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GridPosition {
    LowerLeft = 1,
    LowerCenter = 2,
    LowerRight = 3,
    CenterLeft = 4,
    CenterCenter = 5,
    CenterRight = 6,
    UpperLeft = 7,
    UpperCenter = 8,
    UpperRight = 9,
}

impl GridPosition {
    /// Column, 0 (left) to 2 (right).
    #[must_use]
    pub const fn column(self) -> i32 {
        (self as i32 - 1) % 3
    }

    /// Row, 0 (upper) to 2 (lower).
    #[must_use]
    pub const fn row(self) -> i32 {
        2 - (self as i32 - 1) / 3
    }

    /// Top-left corner of a box of `size` placed in this cell of `screen`.
    #[must_use]
    pub fn place(self, screen: IVec2, size: IVec2) -> IVec2 {
        let along = |cell: i32, extent: i32, length: i32| match cell {
            0 => 0,
            1 => extent / 2 - length / 2,
            _ => extent - length,
        };
        IVec2::new(
            along(self.column(), screen.x, size.x),
            along(self.row(), screen.y, size.y),
        )
    }
}

impl TryFrom<u8> for GridPosition {
    type Error = GaugeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::LowerLeft,
            2 => Self::LowerCenter,
            3 => Self::LowerRight,
            4 => Self::CenterLeft,
            5 => Self::CenterCenter,
            6 => Self::CenterRight,
            7 => Self::UpperLeft,
            8 => Self::UpperCenter,
            9 => Self::UpperRight,
            other => return Err(GaugeError::InvalidGridPosition(other)),
        })
    }
}

impl From<GridPosition> for u8 {
    fn from(position: GridPosition) -> Self {
        position as u8
    }
}

/// Where a gauge is placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// A cell of the screen grid.
    Grid(GridPosition),
    /// Centered above the player character.
    AbovePlayer,
    /// Centered below the player character.
    BelowPlayer,
    /// Centered above a map event.
    AboveEvent(u32),
    /// Centered below a map event.
    BelowEvent(u32),
}

impl Anchor {
    /// Resolve to the top-left corner of a gauge of `size`, offsets included.
    ///
    /// Returns `None` when the anchor refers to a map event the viewport
    /// does not know.
    #[must_use]
    pub fn resolve<V: Viewport + ?Sized>(
        &self,
        viewport: &V,
        size: IVec2,
        offset: IVec2,
    ) -> Option<IVec2> {
        let base = match *self {
            Self::Grid(cell) => cell.place(viewport.screen_size(), size),
            Self::AbovePlayer => above(viewport.player_screen_position(), viewport, size),
            Self::BelowPlayer => below(viewport.player_screen_position(), size),
            Self::AboveEvent(id) => above(viewport.event_screen_position(id)?, viewport, size),
            Self::BelowEvent(id) => below(viewport.event_screen_position(id)?, size),
        };
        Some(base + offset)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::Grid(GridPosition::UpperCenter)
    }
}

/// Character positions are bottom-center; one tile is the character height.
fn above<V: Viewport + ?Sized>(character: IVec2, viewport: &V, size: IVec2) -> IVec2 {
    IVec2::new(
        character.x - size.x / 2,
        character.y - viewport.tile_size().y - size.y,
    )
}

fn below(character: IVec2, size: IVec2) -> IVec2 {
    IVec2::new(character.x - size.x / 2, character.y)
}

#[cfg(test)]
mod tests {
    use gauge_host::HeadlessHost;

    use super::*;

    const SIZE: IVec2 = IVec2::new(200, 40);

    fn host() -> HeadlessHost {
        let mut host = HeadlessHost::new();
        host.set_screen_size(IVec2::new(800, 600));
        host
    }

    #[test]
    fn test_grid_from_keypad_numbers() {
        assert_eq!(GridPosition::try_from(7u8).unwrap(), GridPosition::UpperLeft);
        assert_eq!(GridPosition::try_from(5u8).unwrap(), GridPosition::CenterCenter);
        assert!(matches!(
            GridPosition::try_from(0u8),
            Err(GaugeError::InvalidGridPosition(0))
        ));
        assert!(GridPosition::try_from(10u8).is_err());
    }

    #[test]
    fn test_grid_cells() {
        let host = host();
        let at = |cell| Anchor::Grid(cell).resolve(&host, SIZE, IVec2::ZERO).unwrap();
        assert_eq!(at(GridPosition::UpperLeft), IVec2::new(0, 0));
        assert_eq!(at(GridPosition::UpperCenter), IVec2::new(300, 0));
        assert_eq!(at(GridPosition::UpperRight), IVec2::new(600, 0));
        assert_eq!(at(GridPosition::CenterCenter), IVec2::new(300, 280));
        assert_eq!(at(GridPosition::LowerLeft), IVec2::new(0, 560));
        assert_eq!(at(GridPosition::LowerRight), IVec2::new(600, 560));
    }

    #[test]
    fn test_offset_is_added() {
        let host = host();
        let p = Anchor::Grid(GridPosition::UpperLeft)
            .resolve(&host, SIZE, IVec2::new(12, -4))
            .unwrap();
        assert_eq!(p, IVec2::new(12, -4));
    }

    #[test]
    fn test_above_and_below_player() {
        let mut host = host();
        host.set_player_position(IVec2::new(400, 300));
        let above = Anchor::AbovePlayer.resolve(&host, SIZE, IVec2::ZERO).unwrap();
        assert_eq!(above, IVec2::new(300, 300 - 48 - 40));
        let below = Anchor::BelowPlayer.resolve(&host, SIZE, IVec2::ZERO).unwrap();
        assert_eq!(below, IVec2::new(300, 300));
    }

    #[test]
    fn test_event_anchor() {
        let mut host = host();
        host.set_event_position(3, IVec2::new(100, 200));
        let p = Anchor::BelowEvent(3).resolve(&host, SIZE, IVec2::ZERO).unwrap();
        assert_eq!(p, IVec2::new(0, 200));
        assert!(Anchor::AboveEvent(4).resolve(&host, SIZE, IVec2::ZERO).is_none());
    }

    #[test]
    fn test_grid_position_serde_as_number() {
        let json = serde_json::to_string(&Anchor::Grid(GridPosition::CenterRight)).unwrap();
        assert_eq!(json, r#"{"grid":6}"#);
        let back: Anchor = serde_json::from_str(r#"{"grid":2}"#).unwrap();
        assert_eq!(back, Anchor::Grid(GridPosition::LowerCenter));
        assert!(serde_json::from_str::<Anchor>(r#"{"grid":11}"#).is_err());
    }
}
