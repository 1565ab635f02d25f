//! Event and variable sink.

use serde::{Deserialize, Serialize};

/// Receiver for the gauge's completion side effects.
///
/// Invoking an id that does not exist is the host's concern.
pub trait EventSink {
    /// Queue a common event to run.
    fn reserve_common_event(&mut self, id: u32);

    /// Start the map event with the given id.
    fn start_map_event(&mut self, id: u32);

    /// Store `value` into game variable `id`.
    fn set_variable(&mut self, id: u32, value: i32);
}

/// A recorded side effect, as captured by [`HeadlessHost`](crate::HeadlessHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    /// A common event was reserved.
    CommonEvent { id: u32 },
    /// A map event was started.
    MapEvent { id: u32 },
    /// A variable was written.
    Variable { id: u32, value: i32 },
}
