//! Core [`Component`] trait and the shared [`GaugeComponent`] image part.
//!
//! Every part of a gauge wraps one picture. The picture is configured by
//! name, loaded from the host when the gauge starts and decoded
//! asynchronously; nothing about a part's layout can be computed until
//! [`Component::is_ready`] reports the decoded size.

use gauge_host::{ImageLoader, Raster};
use gauge_math::{IVec2, Rect, UVec2};
use tracing::debug;

/// A positioned image with a one-shot offset.
///
/// Positions are relative to the owning gauge container.
#[derive(Debug, Default)]
pub struct GaugeComponent {
    /// Configured picture name, if any.
    image_name: Option<String>,
    /// Name of the picture currently held in `image`.
    loaded_name: Option<String>,
    /// Host raster handle.
    image: Option<Box<dyn Raster>>,
    /// Offset added to the position once per run.
    offset: IVec2,
    /// Current position relative to the container.
    position: IVec2,
    /// Visible region of the image. `None` shows the whole image.
    frame: Option<Rect>,
    /// Set once the offset has been applied this run.
    offset_applied: bool,
}

impl GaugeComponent {
    /// Create an unconfigured part.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure (or clear) the picture shown by this part.
    pub fn set_image(&mut self, name: Option<String>) {
        self.image_name = name;
    }

    /// Configured picture name.
    #[must_use]
    pub fn image_name(&self) -> Option<&str> {
        self.image_name.as_deref()
    }

    /// Returns `true` if a picture is configured.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_name.is_some()
    }

    /// Request the configured picture from `loader` unless it is already
    /// held. Clearing the picture name drops the held raster.
    pub fn load<L: ImageLoader + ?Sized>(&mut self, loader: &mut L) {
        if self.loaded_name == self.image_name {
            return;
        }
        self.image = self.image_name.as_deref().map(|name| {
            debug!(picture = name, "loading gauge picture");
            loader.load_image(name)
        });
        self.loaded_name.clone_from(&self.image_name);
        self.frame = None;
    }

    /// Returns `true` once the held picture has decoded to a non-zero size.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.as_ref().is_some_and(|image| image.is_ready())
    }

    /// Decoded picture size, zero while missing or loading.
    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.image.as_ref().map_or(UVec2::ZERO, |image| image.size())
    }

    /// Decoded picture width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.size().x as i32
    }

    /// Decoded picture height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.size().y as i32
    }

    /// Configure the one-shot offset.
    pub fn set_offset(&mut self, offset: IVec2) {
        self.offset = offset;
    }

    /// Configured offset.
    #[must_use]
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Position relative to the container.
    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Move the part.
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Horizontal position.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.position.x
    }

    /// Set the horizontal position.
    pub fn set_x(&mut self, x: i32) {
        self.position.x = x;
    }

    /// Bounding box of the full picture at the current position.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Visible region of the picture.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame.unwrap_or_else(|| Rect::full(self.size()))
    }

    /// Crop the picture to `frame` and forward the crop to the host raster.
    pub fn set_frame(&mut self, frame: Rect) {
        if let Some(image) = self.image.as_mut() {
            image.set_crop(frame);
        }
        self.frame = Some(frame);
    }

    /// Add the configured offset to the position, once per run.
    pub fn apply_offset_once(&mut self) {
        if self.offset_applied {
            return;
        }
        self.position += self.offset;
        self.offset_applied = true;
    }

    /// Forget per-run state: the offset guard and the crop.
    pub fn clear_run_state(&mut self) {
        self.offset_applied = false;
        self.frame = None;
    }
}

/// The contract shared by every gauge part.
///
/// Parts are composed rather than inherited: each concrete part embeds a
/// [`GaugeComponent`] and exposes it through [`Component::base`].
pub trait Component {
    /// The embedded image part.
    fn base(&self) -> &GaugeComponent;

    /// The embedded image part, mutably.
    fn base_mut(&mut self) -> &mut GaugeComponent;

    /// Returns `true` once the part's picture is decoded.
    fn is_ready(&self) -> bool {
        self.base().is_ready()
    }

    /// Apply the configured offset to the position. Idempotent within a run.
    fn update_offset_position(&mut self) {
        self.base_mut().apply_offset_once();
    }

    /// Clear all per-run state, keeping configuration.
    fn reset(&mut self) {
        self.base_mut().clear_run_state();
    }
}

impl Component for GaugeComponent {
    fn base(&self) -> &GaugeComponent {
        self
    }

    fn base_mut(&mut self) -> &mut GaugeComponent {
        self
    }
}

#[cfg(test)]
mod tests {
    use gauge_host::HeadlessHost;

    use super::*;

    fn loaded(host: &mut HeadlessHost, name: &str) -> GaugeComponent {
        let mut part = GaugeComponent::new();
        part.set_image(Some(name.to_string()));
        part.load(host);
        part
    }

    #[test]
    fn test_not_ready_without_image() {
        let part = GaugeComponent::new();
        assert!(!part.is_ready());
        assert_eq!(part.size(), UVec2::ZERO);
    }

    #[test]
    fn test_ready_after_decode() {
        let mut host = HeadlessHost::new().with_picture("Bg", 300, 60);
        host.set_defer_decoding(true);
        let part = loaded(&mut host, "Bg");
        assert!(!part.is_ready());
        host.decode_pending();
        assert!(part.is_ready());
        assert_eq!(part.width(), 300);
        assert_eq!(part.height(), 60);
    }

    #[test]
    fn test_load_is_skipped_for_same_picture() {
        let mut host = HeadlessHost::new().with_picture("Bg", 300, 60);
        let mut part = loaded(&mut host, "Bg");
        part.load(&mut host);
        assert_eq!(host.load_count(), 1);
        part.set_image(Some("Other".to_string()));
        part.load(&mut host);
        assert_eq!(host.load_count(), 2);
        assert!(!part.is_ready());
    }

    #[test]
    fn test_offset_applied_once_per_run() {
        let mut part = GaugeComponent::new();
        part.set_offset(IVec2::new(5, 7));
        part.update_offset_position();
        part.update_offset_position();
        assert_eq!(part.position(), IVec2::new(5, 7));

        part.reset();
        part.set_position(IVec2::ZERO);
        part.update_offset_position();
        assert_eq!(part.position(), IVec2::new(5, 7));
    }

    #[test]
    fn test_frame_defaults_to_full_image() {
        let mut host = HeadlessHost::new().with_picture("Fill", 200, 24);
        let mut part = loaded(&mut host, "Fill");
        assert_eq!(part.frame(), Rect::new(0, 0, 200, 24));
        part.set_frame(Rect::new(0, 0, 10, 24));
        assert_eq!(host.last_crop("Fill"), Some(Rect::new(0, 0, 10, 24)));
        part.reset();
        assert_eq!(part.frame(), Rect::new(0, 0, 200, 24));
    }
}
