//! Screen geometry.

use gauge_math::IVec2;

/// Screen and character geometry used to anchor gauges.
///
/// Character positions follow the usual tile-map convention: `x` is the
/// horizontal center of the character sprite and `y` its bottom (feet).
pub trait Viewport {
    /// Screen size in pixels.
    fn screen_size(&self) -> IVec2;

    /// Tile size in pixels. Used as the character height.
    fn tile_size(&self) -> IVec2;

    /// Screen position of the player character.
    fn player_screen_position(&self) -> IVec2;

    /// Screen position of the map event `id`, or `None` if no such event
    /// exists on the current map.
    fn event_screen_position(&self, id: u32) -> Option<IVec2>;
}
