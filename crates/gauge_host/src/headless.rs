//! In-memory host.
//!
//! [`HeadlessHost`] implements every collaborator trait without a window or
//! a real game. Pictures are registered up front with their pixel size;
//! decoding can be deferred to exercise the "image not ready yet" path.
//! Scene attachment, input and emitted events are recorded so callers can
//! inspect them after driving a few frames.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use gauge_math::{IVec2, Rect, UVec2};
use tracing::debug;

use crate::events::{EventSink, HostEvent};
use crate::input::{Button, Input};
use crate::raster::{ImageLoader, Raster};
use crate::scene::Scene;
use crate::viewport::Viewport;

/// Default screen size, in pixels.
pub const DEFAULT_SCREEN_SIZE: IVec2 = IVec2::new(816, 624);

/// Default tile size, in pixels.
pub const DEFAULT_TILE_SIZE: IVec2 = IVec2::new(48, 48);

#[derive(Debug, Default)]
struct RasterState {
    size: UVec2,
    crop: Option<Rect>,
}

/// A raster handed out by [`HeadlessHost`]. Clones share state, so the host
/// can decode a picture after the gauge already holds it.
#[derive(Debug, Clone)]
pub struct HeadlessRaster {
    name: String,
    state: Rc<RefCell<RasterState>>,
}

impl HeadlessRaster {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Rc::new(RefCell::new(RasterState::default())),
        }
    }

    /// Picture name this raster was loaded from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last crop set on this raster.
    #[must_use]
    pub fn crop(&self) -> Option<Rect> {
        self.state.borrow().crop
    }

    fn decode(&self, size: UVec2) {
        self.state.borrow_mut().size = size;
    }
}

impl Raster for HeadlessRaster {
    fn size(&self) -> UVec2 {
        self.state.borrow().size
    }

    fn set_crop(&mut self, crop: Rect) {
        self.state.borrow_mut().crop = Some(crop);
    }
}

/// A host with no window, driven entirely by method calls.
#[derive(Debug)]
pub struct HeadlessHost {
    /// Known pictures and their decoded sizes.
    library: HashMap<String, UVec2>,
    /// When set, loaded pictures stay pending until [`Self::decode_pending`].
    defer_decoding: bool,
    /// Every raster handed out, in load order.
    loaded: Vec<HeadlessRaster>,
    /// Nodes currently attached to the scene, bottom to top.
    attached: Vec<String>,
    /// Number of `attach` calls per node, over the host's lifetime.
    attach_calls: HashMap<String, usize>,
    pressed: HashSet<Button>,
    triggered: HashSet<Button>,
    touch_pressed: bool,
    touch_triggered: bool,
    touch_cancelled: bool,
    /// Side effects in emission order.
    events: Vec<HostEvent>,
    variables: HashMap<u32, i32>,
    screen_size: IVec2,
    tile_size: IVec2,
    player_position: IVec2,
    event_positions: HashMap<u32, IVec2>,
}

impl HeadlessHost {
    /// Create an empty host with the default screen geometry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            library: HashMap::new(),
            defer_decoding: false,
            loaded: Vec::new(),
            attached: Vec::new(),
            attach_calls: HashMap::new(),
            pressed: HashSet::new(),
            triggered: HashSet::new(),
            touch_pressed: false,
            touch_triggered: false,
            touch_cancelled: false,
            events: Vec::new(),
            variables: HashMap::new(),
            screen_size: DEFAULT_SCREEN_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            player_position: DEFAULT_SCREEN_SIZE / 2,
            event_positions: HashMap::new(),
        }
    }

    /// Register a picture with its decoded size.
    #[must_use]
    pub fn with_picture(mut self, name: impl Into<String>, width: u32, height: u32) -> Self {
        self.add_picture(name, width, height);
        self
    }

    /// Register a picture with its decoded size.
    pub fn add_picture(&mut self, name: impl Into<String>, width: u32, height: u32) {
        self.library.insert(name.into(), UVec2::new(width, height));
    }

    /// Keep loaded pictures pending until [`Self::decode_pending`] is called.
    pub fn set_defer_decoding(&mut self, defer: bool) {
        self.defer_decoding = defer;
    }

    /// Decode every loaded picture that is registered in the library.
    pub fn decode_pending(&mut self) {
        for raster in &self.loaded {
            if let Some(size) = self.library.get(raster.name()) {
                raster.decode(*size);
            }
        }
    }

    /// Last crop applied to the most recently loaded raster named `name`.
    #[must_use]
    pub fn last_crop(&self, name: &str) -> Option<Rect> {
        self.loaded
            .iter()
            .rev()
            .find(|r| r.name() == name)
            .and_then(HeadlessRaster::crop)
    }

    /// Number of pictures loaded so far.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loaded.len()
    }

    // -- scene --

    /// Nodes currently attached, bottom to top.
    #[must_use]
    pub fn attached(&self) -> &[String] {
        &self.attached
    }

    /// Returns `true` if `node` is attached.
    #[must_use]
    pub fn is_attached(&self, node: &str) -> bool {
        self.attached.iter().any(|n| n == node)
    }

    /// How many times `node` has been attached.
    #[must_use]
    pub fn attach_count(&self, node: &str) -> usize {
        self.attach_calls.get(node).copied().unwrap_or(0)
    }

    // -- input --

    /// Hold `button` down. The first frame of the hold also triggers it.
    pub fn press(&mut self, button: Button) {
        if self.pressed.insert(button) {
            self.triggered.insert(button);
        }
    }

    /// Release `button`.
    pub fn release(&mut self, button: Button) {
        self.pressed.remove(&button);
    }

    /// Tap `button`: triggered this frame without being held afterwards.
    pub fn tap(&mut self, button: Button) {
        self.triggered.insert(button);
    }

    /// Hold or release the touch pointer.
    pub fn set_touch_pressed(&mut self, pressed: bool) {
        if pressed && !self.touch_pressed {
            self.touch_triggered = true;
        }
        self.touch_pressed = pressed;
    }

    /// Issue a touch cancel gesture this frame.
    pub fn touch_cancel(&mut self) {
        self.touch_cancelled = true;
    }

    /// Clear edge-triggered input. Call once after each frame.
    pub fn end_frame(&mut self) {
        self.triggered.clear();
        self.touch_triggered = false;
        self.touch_cancelled = false;
    }

    // -- events --

    /// Side effects emitted so far.
    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Current value of game variable `id` (0 if never set).
    #[must_use]
    pub fn variable(&self, id: u32) -> i32 {
        self.variables.get(&id).copied().unwrap_or(0)
    }

    // -- viewport --

    /// Override the screen size.
    pub fn set_screen_size(&mut self, size: IVec2) {
        self.screen_size = size;
    }

    /// Move the player character on screen.
    pub fn set_player_position(&mut self, position: IVec2) {
        self.player_position = position;
    }

    /// Place map event `id` on screen.
    pub fn set_event_position(&mut self, id: u32, position: IVec2) {
        self.event_positions.insert(id, position);
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader for HeadlessHost {
    fn load_image(&mut self, name: &str) -> Box<dyn Raster> {
        let raster = HeadlessRaster::pending(name);
        match self.library.get(name) {
            Some(size) if !self.defer_decoding => raster.decode(*size),
            Some(_) => debug!(picture = name, "decoding deferred"),
            None => debug!(picture = name, "unknown picture, raster stays empty"),
        }
        self.loaded.push(raster.clone());
        Box::new(raster)
    }
}

impl Scene for HeadlessHost {
    fn attach(&mut self, node: &str) {
        *self.attach_calls.entry(node.to_string()).or_insert(0) += 1;
        self.attached.push(node.to_string());
    }

    fn detach(&mut self, node: &str) {
        self.attached.retain(|n| n != node);
    }
}

impl Input for HeadlessHost {
    fn is_pressed(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn is_triggered(&self, button: Button) -> bool {
        self.triggered.contains(&button)
    }

    fn is_touch_pressed(&self) -> bool {
        self.touch_pressed
    }

    fn is_touch_triggered(&self) -> bool {
        self.touch_triggered
    }

    fn is_touch_cancelled(&self) -> bool {
        self.touch_cancelled
    }
}

impl EventSink for HeadlessHost {
    fn reserve_common_event(&mut self, id: u32) {
        self.events.push(HostEvent::CommonEvent { id });
    }

    fn start_map_event(&mut self, id: u32) {
        self.events.push(HostEvent::MapEvent { id });
    }

    fn set_variable(&mut self, id: u32, value: i32) {
        self.variables.insert(id, value);
        self.events.push(HostEvent::Variable { id, value });
    }
}

impl Viewport for HeadlessHost {
    fn screen_size(&self) -> IVec2 {
        self.screen_size
    }

    fn tile_size(&self) -> IVec2 {
        self.tile_size
    }

    fn player_screen_position(&self) -> IVec2 {
        self.player_position
    }

    fn event_screen_position(&self, id: u32) -> Option<IVec2> {
        self.event_positions.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_picture_decodes_immediately() {
        let mut host = HeadlessHost::new().with_picture("Fill", 200, 24);
        let raster = host.load_image("Fill");
        assert!(raster.is_ready());
        assert_eq!(raster.size(), UVec2::new(200, 24));
    }

    #[test]
    fn test_unknown_picture_never_ready() {
        let mut host = HeadlessHost::new();
        let raster = host.load_image("Missing");
        assert!(!raster.is_ready());
        host.decode_pending();
        assert!(!raster.is_ready());
    }

    #[test]
    fn test_deferred_decoding() {
        let mut host = HeadlessHost::new().with_picture("Cursor", 20, 32);
        host.set_defer_decoding(true);
        let raster = host.load_image("Cursor");
        assert!(!raster.is_ready());
        host.decode_pending();
        assert!(raster.is_ready());
    }

    #[test]
    fn test_crop_is_shared_with_host() {
        let mut host = HeadlessHost::new().with_picture("Fill", 200, 24);
        let mut raster = host.load_image("Fill");
        raster.set_crop(Rect::new(0, 0, 50, 24));
        assert_eq!(host.last_crop("Fill"), Some(Rect::new(0, 0, 50, 24)));
    }

    #[test]
    fn test_press_triggers_once() {
        let mut host = HeadlessHost::new();
        host.press(Button::Ok);
        assert!(host.is_pressed(Button::Ok));
        assert!(host.is_triggered(Button::Ok));
        host.end_frame();
        host.press(Button::Ok);
        assert!(host.is_pressed(Button::Ok));
        assert!(!host.is_triggered(Button::Ok));
        host.release(Button::Ok);
        assert!(!host.confirm_pressed());
    }

    #[test]
    fn test_touch_counts_as_confirm() {
        let mut host = HeadlessHost::new();
        host.set_touch_pressed(true);
        assert!(host.confirm_pressed());
        assert!(host.confirm_triggered());
        host.end_frame();
        assert!(host.confirm_pressed());
        assert!(!host.confirm_triggered());
    }

    #[test]
    fn test_scene_attach_detach() {
        let mut host = HeadlessHost::new();
        host.attach("a");
        host.attach("b");
        host.detach("a");
        assert_eq!(host.attached(), ["b".to_string()]);
        assert_eq!(host.attach_count("a"), 1);
        assert!(!host.is_attached("a"));
    }

    #[test]
    fn test_variables_and_events_are_recorded() {
        let mut host = HeadlessHost::new();
        host.set_variable(5, 2);
        host.reserve_common_event(7);
        assert_eq!(host.variable(5), 2);
        assert_eq!(host.variable(6), 0);
        assert_eq!(
            host.events(),
            [
                HostEvent::Variable { id: 5, value: 2 },
                HostEvent::CommonEvent { id: 7 }
            ]
        );
    }
}
