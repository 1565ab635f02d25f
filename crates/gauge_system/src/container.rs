//! The gauge container and its per-frame state machine.
//!
//! A [`GaugeContainer`] owns the five parts of one gauge and drives them
//! through a run:
//!
//! 1. **Setup**: attached to the scene, waiting for the pictures the action
//!    kind needs to decode. Nothing else happens while waiting.
//! 2. **Running**: cancel check, action update (fill/empty or cursor
//!    patrol), lifetime countdown. The frame the lifetime dies, the result
//!    is computed from the geometry of that frame.
//! 3. **Dying**: pause, fade out, then finish exactly once: store the
//!    result, fire the target event, release the movement lock, detach.
//! 4. **Idle**: detached but still configured, ready for the next
//!    [`start`](GaugeContainer::start).
//!
//! Configuration setters are plain setters: they never act on a running
//! gauge until the next `start`.

use gauge_component::{
    Component, CountDirection, CursorComponent, CursorStart, FillComponent, GaugeComponent,
    LifetimeComponent,
};
use gauge_host::{Host, Scene};
use gauge_math::{IVec2, Span};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::anchor::{Anchor, GridPosition};
use crate::layer::RenderLayer;
use crate::lock::MovementLock;
use crate::result::{ActionKind, GaugeResult};
use crate::success::{PercentRange, SuccessBias, SuccessTarget};

/// Opacity of a freshly started gauge.
pub const FULL_OPACITY: i32 = 255;

/// Opacity removed per frame while fading out, by default.
pub const DEFAULT_FADE_OUT_SPEED: i32 = 10;

/// Frames to hold the final state before fading out, by default.
pub const DEFAULT_PAUSE_BEFORE_FADE_OUT: u32 = 30;

/// One configurable, restartable gauge.
#[derive(Debug)]
pub struct GaugeContainer {
    /// Registry key; also the scene node id.
    id: String,
    action: ActionKind,

    // Parts, in draw order.
    background: GaugeComponent,
    lifetime: LifetimeComponent,
    fill: FillComponent,
    cursor: CursorComponent,
    foreground: GaugeComponent,

    anchor: Anchor,
    /// Pixel offset added after anchoring.
    offset: IVec2,
    /// Radians.
    rotation: f32,
    target: SuccessTarget,
    common_event_id: u32,
    map_event_id: u32,
    /// Variable receiving the result code; 0 stores nothing.
    result_variable_id: u32,
    fade_out_speed: i32,
    pause_before_fade_out: u32,
    wait_to_finish: bool,
    /// Source for no-action percent-chance draws.
    rng: StdRng,

    // Per-run state, cleared by `start`.
    result: GaugeResult,
    attached: bool,
    positioned: bool,
    finished: bool,
    opacity: i32,
    pause_counter: u32,
    /// Absolute top-left corner, resolved during setup.
    position: IVec2,
    /// Bounding box size, computed during setup.
    size: IVec2,
}

impl GaugeContainer {
    /// Create a gauge with default settings.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: ActionKind::Fill,
            background: GaugeComponent::new(),
            lifetime: LifetimeComponent::new(),
            fill: FillComponent::new(),
            cursor: CursorComponent::new(),
            foreground: GaugeComponent::new(),
            anchor: Anchor::default(),
            offset: IVec2::ZERO,
            rotation: 0.0,
            target: SuccessTarget::default(),
            common_event_id: 0,
            map_event_id: 0,
            result_variable_id: 0,
            fade_out_speed: DEFAULT_FADE_OUT_SPEED,
            pause_before_fade_out: DEFAULT_PAUSE_BEFORE_FADE_OUT,
            wait_to_finish: false,
            rng: StdRng::from_entropy(),
            result: GaugeResult::None,
            attached: false,
            positioned: false,
            finished: false,
            opacity: FULL_OPACITY,
            pause_counter: 0,
            position: IVec2::ZERO,
            size: IVec2::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Pictures
    // ------------------------------------------------------------------

    /// Fill picture and its offset from the gauge origin.
    pub fn fill(&mut self, image: impl Into<String>, x: i32, y: i32) -> &mut Self {
        self.fill_image(image).fill_offset(x, y)
    }

    /// Fill picture.
    pub fn fill_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.fill.base_mut().set_image(Some(image.into()));
        self
    }

    /// Fill offset from the gauge origin.
    pub fn fill_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.fill.base_mut().set_offset(IVec2::new(x, y));
        self
    }

    /// Cursor picture and the success point, in percent of the fill width.
    pub fn cursor(&mut self, image: impl Into<String>, point: u32) -> &mut Self {
        self.cursor_image(image).success_point(point)
    }

    /// Cursor picture.
    pub fn cursor_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.cursor.base_mut().set_image(Some(image.into()));
        self
    }

    /// Extra cursor offset, applied after the cursor is placed on the fill.
    pub fn cursor_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.cursor.base_mut().set_offset(IVec2::new(x, y));
        self
    }

    /// Lifetime picture and budget in frames.
    pub fn lifetime(&mut self, image: impl Into<String>, frames: u32) -> &mut Self {
        self.lifetime_image(image).lifetime_value(frames)
    }

    /// Lifetime picture.
    pub fn lifetime_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.lifetime.base_mut().set_image(Some(image.into()));
        self
    }

    /// Lifetime offset from the gauge origin.
    pub fn lifetime_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.lifetime.base_mut().set_offset(IVec2::new(x, y));
        self
    }

    /// Background picture, drawn first. Its size becomes the gauge size.
    pub fn background(&mut self, image: impl Into<String>) -> &mut Self {
        self.background.set_image(Some(image.into()));
        self
    }

    /// Background offset from the gauge origin.
    pub fn background_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.background.set_offset(IVec2::new(x, y));
        self
    }

    /// Foreground picture, drawn last.
    pub fn foreground(&mut self, image: impl Into<String>) -> &mut Self {
        self.foreground.set_image(Some(image.into()));
        self
    }

    /// Foreground offset from the gauge origin.
    pub fn foreground_offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.foreground.set_offset(IVec2::new(x, y));
        self
    }

    // ------------------------------------------------------------------
    // Action
    // ------------------------------------------------------------------

    /// Select the action kind directly.
    pub fn action(&mut self, action: ActionKind) -> &mut Self {
        self.action = action;
        self
    }

    /// Hold-to-fill action (the default).
    pub fn fill_action(&mut self) -> &mut Self {
        self.action(ActionKind::Fill)
    }

    /// Lifetime only: no input, no cancel, no movement lock. The success
    /// point becomes a percent chance.
    pub fn no_action(&mut self) -> &mut Self {
        self.action(ActionKind::None)
    }

    /// Pixels filled per frame while confirm is held.
    pub fn fill_speed(&mut self, speed: u32) -> &mut Self {
        self.fill.set_fill_speed(speed);
        self
    }

    /// Pixels emptied per frame while confirm is released (`0` = fill speed).
    pub fn empty_speed(&mut self, speed: u32) -> &mut Self {
        self.fill.set_empty_speed(speed);
        self
    }

    /// Wrap the fill to zero when it overflows instead of holding at max.
    pub fn reset_fill(&mut self, reset: bool) -> &mut Self {
        self.fill.set_reset_on_max(reset);
        self
    }

    /// Moving-cursor action: the cursor patrols at `speed` pixels per frame
    /// and confirm stops it.
    pub fn moving_cursor(&mut self, speed: u32) -> &mut Self {
        self.cursor.set_speed(speed);
        self.action(ActionKind::Cursor)
    }

    /// Bounce at the ends of the track (`true`) or wrap around (`false`).
    pub fn cursor_bounce(&mut self, bounce: bool) -> &mut Self {
        self.cursor.set_bounce(bounce);
        self
    }

    /// End of the track a moving cursor starts from.
    pub fn cursor_start(&mut self, start: CursorStart) -> &mut Self {
        self.cursor.set_start(start);
        self
    }

    // ------------------------------------------------------------------
    // Lifetime
    // ------------------------------------------------------------------

    /// Frame budget of a run.
    pub fn lifetime_value(&mut self, frames: u32) -> &mut Self {
        self.lifetime.set_total(frames);
        self
    }

    /// Never expire. The run then only ends by cancel or press-to-stop.
    pub fn eternal(&mut self, eternal: bool) -> &mut Self {
        self.lifetime.set_eternal(eternal);
        self
    }

    /// Draw the lifetime bar growing or shrinking.
    pub fn lifetime_direction(&mut self, direction: CountDirection) -> &mut Self {
        self.lifetime.set_direction(direction);
        self
    }

    // ------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------

    /// Place the gauge in a cell of the screen grid.
    pub fn gauge_position(&mut self, position: GridPosition) -> &mut Self {
        self.anchor = Anchor::Grid(position);
        self
    }

    pub fn upper_left(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::UpperLeft)
    }

    pub fn upper_center(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::UpperCenter)
    }

    pub fn upper_right(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::UpperRight)
    }

    pub fn center_left(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::CenterLeft)
    }

    pub fn center_center(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::CenterCenter)
    }

    pub fn center_right(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::CenterRight)
    }

    pub fn lower_left(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::LowerLeft)
    }

    pub fn lower_center(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::LowerCenter)
    }

    pub fn lower_right(&mut self) -> &mut Self {
        self.gauge_position(GridPosition::LowerRight)
    }

    /// Center the gauge above the player.
    pub fn above_player(&mut self) -> &mut Self {
        self.anchor = Anchor::AbovePlayer;
        self
    }

    /// Center the gauge below the player.
    pub fn below_player(&mut self) -> &mut Self {
        self.anchor = Anchor::BelowPlayer;
        self
    }

    /// Center the gauge above map event `id`.
    pub fn above_event(&mut self, id: u32) -> &mut Self {
        self.anchor = Anchor::AboveEvent(id);
        self
    }

    /// Center the gauge below map event `id`.
    pub fn below_event(&mut self, id: u32) -> &mut Self {
        self.anchor = Anchor::BelowEvent(id);
        self
    }

    /// Select the anchor directly.
    pub fn anchor(&mut self, anchor: Anchor) -> &mut Self {
        self.anchor = anchor;
        self
    }

    /// Pixel offset added after anchoring.
    pub fn offset(&mut self, x: i32, y: i32) -> &mut Self {
        self.offset = IVec2::new(x, y);
        self
    }

    /// Rotation of the whole gauge, in radians.
    pub fn rotation(&mut self, radians: f32) -> &mut Self {
        self.rotation = radians;
        self
    }

    // ------------------------------------------------------------------
    // Success
    // ------------------------------------------------------------------

    /// Success point in percent of the fill width (or percent chance for
    /// no-action gauges). Values above 100 are capped at 100.
    pub fn success_point(&mut self, point: u32) -> &mut Self {
        self.target.point = point.min(100);
        self
    }

    /// Explicit success range in percent of the fill width, each bound
    /// capped at 100. A range with `min >= max` is ignored.
    pub fn success_range(&mut self, min: u32, max: u32) -> &mut Self {
        self.target.range = Some(PercentRange {
            min: min.min(100),
            max: max.min(100),
        });
        self
    }

    /// Drop the explicit success range.
    pub fn clear_success_range(&mut self) -> &mut Self {
        self.target.range = None;
        self
    }

    /// Success from the success point to the end of the bar.
    pub fn success_above(&mut self) -> &mut Self {
        self.success_bias(SuccessBias::Above)
    }

    /// Success from the start of the bar to the success point.
    pub fn success_below(&mut self) -> &mut Self {
        self.success_bias(SuccessBias::Below)
    }

    pub fn success_bias(&mut self, bias: SuccessBias) -> &mut Self {
        self.target.bias = bias;
        self
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Common event reserved when the gauge finishes. Takes priority over
    /// the map event.
    pub fn common_event_id(&mut self, id: u32) -> &mut Self {
        self.common_event_id = id;
        self
    }

    /// Map event started when the gauge finishes.
    pub fn map_event_id(&mut self, id: u32) -> &mut Self {
        self.map_event_id = id;
        self
    }

    /// Variable receiving the result code (1 success, 2 failure, 3 cancel).
    pub fn result_variable_id(&mut self, id: u32) -> &mut Self {
        self.result_variable_id = id;
        self
    }

    /// Opacity removed per frame while fading out. Speeds below 1 fade at 1
    /// per frame, so a finished gauge always detaches eventually.
    pub fn fade_out_speed(&mut self, speed: i32) -> &mut Self {
        self.fade_out_speed = speed;
        self
    }

    /// Frames to hold the final state before fading.
    pub fn pause_before_fade_out(&mut self, frames: u32) -> &mut Self {
        self.pause_before_fade_out = frames;
        self
    }

    /// Hold the calling event script until the gauge finishes.
    pub fn wait_to_finish(&mut self, wait: bool) -> &mut Self {
        self.wait_to_finish = wait;
        self
    }

    /// Seed the percent-chance draw, for reproducible runs.
    pub fn random_seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin a run.
    ///
    /// Loads any newly configured pictures, clears all per-run state,
    /// attaches the gauge to the scene and takes the movement lock (unless
    /// the gauge takes no action). Starting a gauge that is still attached
    /// restarts it in place without a second attachment.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H, lock: &mut MovementLock) {
        for part in self.parts_mut() {
            part.base_mut().load(host);
            part.reset();
        }
        self.fill.set_moving(self.action == ActionKind::Fill);
        self.cursor.set_moving(self.action == ActionKind::Cursor);

        self.result = GaugeResult::None;
        self.positioned = false;
        self.finished = false;
        self.opacity = FULL_OPACITY;
        self.pause_counter = 0;

        if self.attached {
            debug!(gauge = %self.id, "restarting attached gauge");
        } else {
            host.attach(&self.id);
            self.attached = true;
        }

        if self.action.is_actionable() {
            lock.engage_movement(&self.id);
        } else {
            lock.release_movement(&self.id);
        }
        if self.wait_to_finish {
            lock.engage_wait(&self.id);
        } else {
            lock.release_wait(&self.id);
        }

        info!(
            gauge = %self.id,
            action = ?self.action,
            lifetime = self.lifetime.total(),
            "gauge started"
        );
    }

    /// Advance one frame. Does nothing while detached.
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, lock: &mut MovementLock) {
        if !self.attached {
            return;
        }

        if !self.positioned {
            if !self.required_parts_ready() {
                return;
            }
            self.position_components(host);
        }

        if self.action.is_actionable() && !self.lifetime.is_dead() && host.cancel_triggered() {
            self.result = GaugeResult::Cancel;
            self.lifetime.kill();
            info!(gauge = %self.id, "gauge cancelled");
        }

        if self.lifetime.is_dead() {
            self.update_fade_out(host, lock);
            return;
        }

        match self.action {
            ActionKind::Cursor => {
                if host.confirm_triggered() {
                    self.lifetime.kill();
                } else {
                    self.cursor.handle_movement();
                }
            }
            ActionKind::Fill => {
                if host.confirm_pressed() {
                    self.fill.handle_filling();
                } else {
                    self.fill.handle_emptying();
                }
            }
            ActionKind::None => {}
        }

        self.lifetime.handle_lifetime();

        if self.lifetime.is_dead() && !self.result.is_decided() {
            self.result = self.determine_result();
            debug!(gauge = %self.id, result = ?self.result, "gauge lifetime over");
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Registry key and scene node id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Configured action kind.
    #[must_use]
    pub fn action_kind(&self) -> ActionKind {
        self.action
    }

    /// Result of the current (or last) run.
    #[must_use]
    pub fn result(&self) -> GaugeResult {
        self.result
    }

    /// Started and the lifetime is not over yet.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.attached && !self.lifetime.is_dead()
    }

    /// The lifetime is over (naturally, by cancel, or by press-to-stop).
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.lifetime.is_dead()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result == GaugeResult::Success
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.result == GaugeResult::Failure
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.result == GaugeResult::Cancel
    }

    /// Attached to the scene (started and not yet faded out).
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Setup finished: pictures decoded and parts laid out.
    #[must_use]
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Returns `true` once the finish action of the current run has fired.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current opacity, 0 to 255.
    #[must_use]
    pub fn opacity(&self) -> i32 {
        self.opacity
    }

    /// Absolute top-left corner, valid once positioned.
    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Bounding box size, valid once positioned.
    #[must_use]
    pub fn size(&self) -> IVec2 {
        self.size
    }

    #[must_use]
    pub fn success_target(&self) -> &SuccessTarget {
        &self.target
    }

    #[must_use]
    pub fn fill_part(&self) -> &FillComponent {
        &self.fill
    }

    #[must_use]
    pub fn cursor_part(&self) -> &CursorComponent {
        &self.cursor
    }

    #[must_use]
    pub fn lifetime_part(&self) -> &LifetimeComponent {
        &self.lifetime
    }

    /// What to draw this frame, bottom to top. Empty until positioned.
    #[must_use]
    pub fn layers(&self) -> Vec<RenderLayer> {
        if !self.attached || !self.positioned {
            return Vec::new();
        }
        let opacity = self.opacity.clamp(0, FULL_OPACITY) as u8;
        [
            &self.background,
            self.lifetime.base(),
            self.fill.base(),
            self.cursor.base(),
            &self.foreground,
        ]
        .into_iter()
        .filter(|part| part.is_ready())
        .filter_map(|part| {
            Some(RenderLayer {
                image: part.image_name()?.to_string(),
                position: self.position + part.position(),
                frame: part.frame(),
                opacity,
                rotation: self.rotation,
            })
        })
        .collect()
    }

    /// Stop the run immediately: detach and release the lock without firing
    /// the finish action.
    pub fn abort<S: Scene + ?Sized>(&mut self, scene: &mut S, lock: &mut MovementLock) {
        lock.release_all(&self.id);
        if self.attached {
            scene.detach(&self.id);
            self.attached = false;
            debug!(gauge = %self.id, "gauge aborted");
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn parts_mut(&mut self) -> [&mut dyn Component; 5] {
        [
            &mut self.background,
            &mut self.lifetime,
            &mut self.fill,
            &mut self.cursor,
            &mut self.foreground,
        ]
    }

    /// Pictures the action kind cannot do without.
    fn required_parts_ready(&self) -> bool {
        match self.action {
            ActionKind::Fill | ActionKind::Cursor => self.fill.is_ready() && self.cursor.is_ready(),
            ActionKind::None => self.lifetime.is_ready(),
        }
    }

    fn position_components<H: Host + ?Sized>(&mut self, host: &H) {
        self.size = if self.background.is_ready() {
            self.background.size().as_ivec2()
        } else {
            self.fill
                .base()
                .size()
                .max(self.cursor.base().size())
                .max(self.lifetime.base().size())
                .as_ivec2()
        };

        self.position = match self.anchor.resolve(host, self.size, self.offset) {
            Some(position) => position,
            None => {
                warn!(gauge = %self.id, anchor = ?self.anchor, "anchor unresolved, using offset only");
                self.offset
            }
        };

        let parts: [&mut dyn Component; 4] = [
            &mut self.background,
            &mut self.lifetime,
            &mut self.fill,
            &mut self.foreground,
        ];
        for part in parts {
            part.base_mut().set_position(IVec2::ZERO);
            part.update_offset_position();
        }

        // Cursor: vertically centered on the fill, horizontally on the
        // success point (or at its starting end when it patrols), never
        // hanging past the fill.
        let fill = self.fill.base().bounds();
        let track = Span::new(fill.x, fill.right());
        let cursor_width = self.cursor.base().width();
        let cursor_height = self.cursor.base().height();
        self.cursor.set_bounds(track);
        let x = if self.action == ActionKind::Cursor {
            let travel = self.cursor.travel();
            match self.cursor.start() {
                CursorStart::Left => travel.start,
                CursorStart::Right => travel.end,
            }
        } else {
            let max_x = (fill.right() - cursor_width).max(fill.x);
            (self.target.point_x(track) - cursor_width / 2).clamp(fill.x, max_x)
        };
        let y = fill.y + (fill.height - cursor_height) / 2;
        self.cursor.base_mut().set_position(IVec2::new(x, y));
        self.cursor.update_offset_position();
        if self.action == ActionKind::Cursor {
            let x = self.cursor.travel().clamp(self.cursor.base().x());
            self.cursor.base_mut().set_x(x);
        }

        self.positioned = true;
        debug!(
            gauge = %self.id,
            x = self.position.x,
            y = self.position.y,
            width = self.size.x,
            height = self.size.y,
            rotation = self.rotation,
            "gauge positioned"
        );
    }

    fn determine_result(&mut self) -> GaugeResult {
        let fill = self.fill.base().bounds();
        let track = Span::new(fill.x, fill.right());
        let (scored, window) = match self.action {
            ActionKind::None => {
                if self.target.point == 0 {
                    return GaugeResult::None;
                }
                let draw: u32 = self.rng.gen_range(1..=100);
                return if self.target.point >= draw {
                    GaugeResult::Success
                } else {
                    GaugeResult::Failure
                };
            }
            ActionKind::Fill => {
                let cursor = self.cursor.base().bounds();
                let marker = Span::new(cursor.x, cursor.right());
                (fill.x + self.fill.visual_width(), self.target.window(track, marker))
            }
            ActionKind::Cursor => {
                let width = self.cursor.base().width();
                let left = self.target.point_x(track) - width / 2;
                let marker = Span::new(left, left + width);
                (self.cursor.center_x(), self.target.window(track, marker))
            }
        };
        debug!(
            gauge = %self.id,
            scored,
            window_start = window.start,
            window_end = window.end,
            "scoring gauge"
        );
        if window.contains(scored) {
            GaugeResult::Success
        } else {
            GaugeResult::Failure
        }
    }

    fn update_fade_out<H: Host + ?Sized>(&mut self, host: &mut H, lock: &mut MovementLock) {
        self.pause_counter = self.pause_counter.saturating_add(1);
        if self.pause_counter < self.pause_before_fade_out {
            return;
        }
        self.opacity -= self.fade_out_speed.max(1);
        if self.opacity <= 0 {
            self.opacity = 0;
            self.finish(host, lock);
        }
    }

    fn finish<H: Host + ?Sized>(&mut self, host: &mut H, lock: &mut MovementLock) {
        if self.finished {
            return;
        }
        self.finished = true;

        if self.result_variable_id != 0 {
            host.set_variable(self.result_variable_id, self.result.code());
        }
        if self.common_event_id != 0 {
            host.reserve_common_event(self.common_event_id);
        } else if self.map_event_id != 0 {
            host.start_map_event(self.map_event_id);
        }

        lock.release_all(&self.id);
        if self.attached {
            host.detach(&self.id);
            self.attached = false;
        }

        info!(gauge = %self.id, result = ?self.result, "gauge finished");
    }
}
