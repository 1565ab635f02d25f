//! # gauge_host
//!
//! The seams between the gauge engine and the game engine that hosts it.
//!
//! The gauge core never touches bitmaps, the scene graph, raw input or game
//! variables directly. It talks to the host through these traits:
//!
//! - [`raster`]: [`Raster`] image handles and the [`ImageLoader`].
//! - [`scene`]: [`Scene`] attachment of rendered nodes.
//! - [`input`]: [`Input`] button and touch queries.
//! - [`events`]: [`EventSink`] for common/map events and game variables.
//! - [`viewport`]: [`Viewport`] screen and character geometry.
//! - [`headless`]: [`HeadlessHost`], an in-memory host for tests and the
//!   scenario runner.
//!
//! [`Host`] bundles every collaborator and is implemented automatically for
//! any type that implements all of them.

pub mod events;
pub mod headless;
pub mod input;
pub mod raster;
pub mod scene;
pub mod viewport;

pub use events::{EventSink, HostEvent};
pub use headless::{HeadlessHost, HeadlessRaster};
pub use input::{Button, Input};
pub use raster::{ImageLoader, Raster};
pub use scene::Scene;
pub use viewport::Viewport;

/// Everything the gauge engine needs from its host, in one bound.
pub trait Host: ImageLoader + Scene + Input + EventSink + Viewport {}

impl<T> Host for T where T: ImageLoader + Scene + Input + EventSink + Viewport {}
