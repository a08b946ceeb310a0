//! Deferred Respawn Scheduling
//!
//! Collections queue a respawn due at `collection time + delay`. The frame
//! scheduler drains due entries at the start of each frame, before any
//! collision pass reads the slots, and each replacement swaps the slot's
//! occupant in a single assignment.

use std::time::Duration;

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::pickup::spawn_pickup;
use crate::game::state::GameState;
use crate::scene::Scene;

/// A queued respawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRespawn {
    /// Slot to refill
    pub slot: usize,
    /// Elapsed time at which it fires
    pub due: Duration,
}

/// Queue of pending respawns ordered by due time, then scheduling order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RespawnScheduler {
    queue: Vec<PendingRespawn>,
}

impl RespawnScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a respawn. Entries with equal `due` keep scheduling order.
    pub fn schedule(&mut self, slot: usize, due: Duration) {
        let idx = self.queue.partition_point(|p| p.due <= due);
        self.queue.insert(idx, PendingRespawn { slot, due });
    }

    /// Remove and return every entry due at or before `now`.
    pub fn drain_due(&mut self, now: Duration) -> Vec<PendingRespawn> {
        let split = self.queue.partition_point(|p| p.due <= now);
        self.queue.drain(..split).collect()
    }

    /// Is a respawn queued for `slot`?
    pub fn is_pending(&self, slot: usize) -> bool {
        self.queue.iter().any(|p| p.slot == slot)
    }

    /// Pending entries in firing order.
    pub fn pending(&self) -> &[PendingRespawn] {
        &self.queue
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Nothing pending?
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Replace every retired pickup whose respawn is due.
pub fn apply_due_respawns(
    state: &mut GameState,
    now: Duration,
    config: &GameConfig,
    scene: &mut impl Scene,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for pending in state.respawns.drain_due(now) {
        let Some(retired) = state.pickups.get(pending.slot) else {
            warn!(slot = pending.slot, "respawn for missing slot dropped");
            continue;
        };
        let stale = retired.entity;
        let color = retired.color;

        scene.despawn(stale);
        let replacement = spawn_pickup(scene, &mut state.rng, color, config);
        let position = replacement.base_position;
        state.pickups[pending.slot] = replacement;

        debug!(frame = state.frame, slot = pending.slot, x = position.x, z = position.z, "pickup respawned");

        events.push(GameEvent::pickup_respawned(state.frame, pending.slot, color, position));
    }

    events
}
