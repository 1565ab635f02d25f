//! Draw instructions handed to the host renderer.

use gauge_math::{IVec2, Rect};
use serde::Serialize;

/// One picture to draw for a running gauge.
///
/// Layers are produced bottom to top: background, lifetime, fill, cursor,
/// foreground.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderLayer {
    /// Picture name.
    pub image: String,
    /// Absolute screen position of the picture's top-left corner.
    pub position: IVec2,
    /// Visible region of the picture.
    pub frame: Rect,
    /// Opacity, 0 (invisible) to 255.
    pub opacity: u8,
    /// Rotation of the whole gauge around its top-left corner, in radians.
    pub rotation: f32,
}
