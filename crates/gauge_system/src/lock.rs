//! Movement lock.
//!
//! While a gauge that takes player input is running, the player character
//! must not walk away and the menu must stay closed. Gauges configured to
//! wait also hold the event script at the current instruction until they
//! finish. The host consults [`MovementLock`] for all three.
//!
//! Holders are tracked per gauge identifier, so engaging twice for the same
//! gauge is a no-op and one gauge finishing never releases another's hold.

use std::collections::BTreeSet;

use tracing::debug;

/// Flags the host reads before moving the player, opening the menu or
/// advancing an event script.
#[derive(Debug, Default)]
pub struct MovementLock {
    /// Gauges currently suppressing player movement and the menu.
    movement: BTreeSet<String>,
    /// Gauges currently holding the event script.
    waiting: BTreeSet<String>,
    /// Number of times a movement hold was newly taken.
    engagements: u64,
}

impl MovementLock {
    /// Create an unlocked state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress player movement on behalf of gauge `id`.
    ///
    /// Returns `true` if this took a new hold.
    pub fn engage_movement(&mut self, id: &str) -> bool {
        let taken = self.movement.insert(id.to_string());
        if taken {
            self.engagements += 1;
            debug!(gauge = id, "movement lock engaged");
        }
        taken
    }

    /// Drop gauge `id`'s movement hold.
    ///
    /// Returns `true` if a hold was released.
    pub fn release_movement(&mut self, id: &str) -> bool {
        let released = self.movement.remove(id);
        if released {
            debug!(gauge = id, "movement lock released");
        }
        released
    }

    /// Hold the event script on behalf of gauge `id`.
    pub fn engage_wait(&mut self, id: &str) -> bool {
        self.waiting.insert(id.to_string())
    }

    /// Drop gauge `id`'s script hold.
    pub fn release_wait(&mut self, id: &str) -> bool {
        self.waiting.remove(id)
    }

    /// Drop every hold gauge `id` has.
    pub fn release_all(&mut self, id: &str) {
        self.release_movement(id);
        self.release_wait(id);
    }

    /// Is a gauge that takes player input running?
    #[must_use]
    pub fn is_gauge_action_running(&self) -> bool {
        !self.movement.is_empty()
    }

    /// Should the menu be disabled? Same condition as the movement lock.
    #[must_use]
    pub fn is_menu_disabled(&self) -> bool {
        self.is_gauge_action_running()
    }

    /// Should the event script stay on its current instruction?
    #[must_use]
    pub fn should_wait(&self) -> bool {
        !self.waiting.is_empty()
    }

    /// Combine the host's own movement check with the lock.
    #[must_use]
    pub fn can_player_move(&self, host_allows: bool) -> bool {
        host_allows && !self.is_gauge_action_running()
    }

    /// Gauges currently holding the movement lock.
    pub fn holders(&self) -> impl Iterator<Item = &str> {
        self.movement.iter().map(String::as_str)
    }

    /// Number of times a movement hold was newly taken.
    #[must_use]
    pub fn engagement_count(&self) -> u64 {
        self.engagements
    }
}
