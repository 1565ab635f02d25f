//! # gauge_system
//!
//! The gauge action minigame: a per-frame state machine that runs a skill
//! check and reports success, failure or cancellation.
//!
//! This crate provides:
//!
//! - [`GaugeContainer`]: one gauge: its parts, its configuration and its
//!   setup → running → fading → idle lifecycle.
//! - [`GaugeRegistry`]: identifier → gauge map, created lazily, owned by
//!   whoever drives the frame tick.
//! - [`GaugeHandle`]: fluent configuration access plus `start`.
//! - [`MovementLock`]: the flags the host consults before letting the
//!   player move, opening the menu or advancing a script.
//! - [`GaugeConfig`]: a serialisable description of a gauge.
//!
//! ## Usage
//!
//! ```rust
//! use gauge_host::{Button, HeadlessHost};
//! use gauge_system::GaugeRegistry;
//!
//! let mut host = HeadlessHost::new()
//!     .with_picture("Fill", 200, 24)
//!     .with_picture("Cursor", 20, 24);
//! let mut registry = GaugeRegistry::new();
//!
//! let mut gauge = registry.get("fishing");
//! gauge
//!     .fill("Fill", 0, 0)
//!     .fill_speed(25)
//!     .cursor("Cursor", 50)
//!     .lifetime_value(10)
//!     .result_variable_id(4);
//! gauge.start(&mut host);
//!
//! host.press(Button::Ok);
//! for _ in 0..20 {
//!     registry.update(&mut host);
//!     host.end_frame();
//! }
//! assert!(registry.find("fishing").unwrap().is_failed());
//! ```

pub mod anchor;
pub mod config;
pub mod container;
pub mod error;
pub mod layer;
pub mod lock;
pub mod registry;
pub mod result;
pub mod success;

pub use anchor::{Anchor, GridPosition};
pub use config::{GaugeConfig, PartConfig};
pub use container::GaugeContainer;
pub use error::GaugeError;
pub use layer::RenderLayer;
pub use lock::MovementLock;
pub use registry::{GaugeHandle, GaugeRegistry};
pub use result::{ActionKind, GaugeResult};
pub use success::{PercentRange, SuccessBias, SuccessTarget};

// Re-export the part types so callers configuring gauges need one import.
pub use gauge_component::{CountDirection, CursorStart};
