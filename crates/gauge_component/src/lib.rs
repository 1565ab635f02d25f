//! # gauge_component
//!
//! The visual parts a gauge is assembled from.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract every gauge part satisfies.
//! - [`GaugeComponent`]: a positioned, offset-aware image. Used as-is for
//!   background and foreground decorations and embedded by the others.
//! - [`FillComponent`]: the bar that fills while confirm is held.
//! - [`CursorComponent`]: the marker, optionally patrolling left/right.
//! - [`LifetimeComponent`]: the countdown that ends a run.

pub mod component;
pub mod cursor;
pub mod fill;
pub mod lifetime;

pub use component::{Component, GaugeComponent};
pub use cursor::{CursorComponent, CursorStart, UNMOVED};
pub use fill::FillComponent;
pub use lifetime::{CountDirection, LifetimeComponent};
