//! Game Events
//!
//! Events generated during a frame, for the HUD, logs and replay checks.

use glam::Vec3;
use serde::{Serialize, Deserialize};

use crate::scene::Color;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Avatar touched an active pickup
    PickupCollected {
        slot: usize,
        color: Color,
        points: u32,
        new_score: u32,
    },

    /// A retired slot received its replacement pickup
    PickupRespawned {
        slot: usize,
        color: Color,
        position: Vec3,
    },

    /// Avatar left the ground
    AvatarJumped,

    /// Avatar touched down after a jump
    AvatarLanded,
}

/// A game event stamped with its frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame when event occurred
    pub frame: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create pickup collected event.
    pub fn pickup_collected(frame: u64, slot: usize, color: Color, points: u32, new_score: u32) -> Self {
        Self::new(frame, GameEventData::PickupCollected { slot, color, points, new_score })
    }

    /// Create pickup respawned event.
    pub fn pickup_respawned(frame: u64, slot: usize, color: Color, position: Vec3) -> Self {
        Self::new(frame, GameEventData::PickupRespawned { slot, color, position })
    }

    /// Slot this event concerns, if any.
    pub fn slot(&self) -> Option<usize> {
        match self.data {
            GameEventData::PickupCollected { slot, .. }
            | GameEventData::PickupRespawned { slot, .. } => Some(slot),
            GameEventData::AvatarJumped | GameEventData::AvatarLanded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_accessor() {
        let collected = GameEvent::pickup_collected(3, 7, Color(0xff0000), 10, 10);
        assert_eq!(collected.slot(), Some(7));
        assert_eq!(GameEvent::new(3, GameEventData::AvatarJumped).slot(), None);
    }

    #[test]
    fn test_event_serializes() {
        let event = GameEvent::pickup_respawned(9, 2, Color(0x00ffff), Vec3::new(1.0, 0.2, -3.0));
        let json = serde_json::to_string(&event).expect("serializable");
        let back: GameEvent = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, event);
    }
}
