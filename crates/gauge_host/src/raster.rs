//! Image handles.
//!
//! A [`Raster`] is whatever the host uses to draw a picture. Images decode
//! asynchronously on most hosts, so a freshly loaded raster reports a zero
//! size until its pixels are available.

use gauge_math::{Rect, UVec2};

/// A loaded (or loading) image.
pub trait Raster: std::fmt::Debug {
    /// Decoded size in pixels. Zero in either dimension while still loading.
    fn size(&self) -> UVec2;

    /// Set the visible region of the image, in image-local pixels.
    fn set_crop(&mut self, crop: Rect);

    /// Returns `true` once the image has decoded to a non-zero size.
    fn is_ready(&self) -> bool {
        let size = self.size();
        size.x != 0 && size.y != 0
    }
}

/// Loads pictures by name.
pub trait ImageLoader {
    /// Request the picture called `name`. The returned handle may not be
    /// ready yet.
    fn load_image(&mut self, name: &str) -> Box<dyn Raster>;
}
