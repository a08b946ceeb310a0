//! Collision Detection
//!
//! Point-vs-pickup distance tests only. There is no general solver.

use glam::Vec3;

use crate::game::config::GameConfig;
use crate::game::state::{AvatarState, GameState, Pickup};

/// Strictly closer than `reach`?
#[inline]
pub fn within_reach(a: Vec3, b: Vec3, reach: f32) -> bool {
    a.distance_squared(b) < reach * reach
}

/// Can the avatar collect this pickup right now?
///
/// Uses the pickup's live animated position, not its anchor.
pub fn check_pickup_collision(avatar: &AvatarState, pickup: &Pickup, config: &GameConfig) -> bool {
    if pickup.collected {
        return false;
    }

    within_reach(avatar.position, pickup.position, config.collection_radius())
}

/// Slots the avatar touches this frame, in slot order.
pub fn check_all_pickup_collisions(state: &GameState, config: &GameConfig) -> Vec<usize> {
    state
        .pickups
        .iter()
        .enumerate()
        .filter(|(_, pickup)| check_pickup_collision(&state.avatar, pickup, config))
        .map(|(slot, _)| slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Color, EntityHandle};

    fn avatar_at(position: Vec3) -> AvatarState {
        let mut avatar = AvatarState::new(EntityHandle::from_raw(0), 0.5);
        avatar.position = position;
        avatar
    }

    #[test]
    fn test_within_reach_is_strict() {
        assert!(within_reach(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), 0.9));
        assert!(!within_reach(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 0.9));
        assert!(!within_reach(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_pickup_collision_threshold() {
        let config = GameConfig::default();
        let avatar = avatar_at(Vec3::new(0.0, 0.5, 0.0));

        let near = Pickup::new(EntityHandle::from_raw(1), Vec3::new(0.85, 0.5, 0.0), Color(1));
        let far = Pickup::new(EntityHandle::from_raw(2), Vec3::new(0.95, 0.5, 0.0), Color(1));
        assert!(check_pickup_collision(&avatar, &near, &config));
        assert!(!check_pickup_collision(&avatar, &far, &config));
    }

    #[test]
    fn test_collected_pickup_never_collides() {
        let config = GameConfig::default();
        let avatar = avatar_at(Vec3::new(0.0, 0.5, 0.0));
        let mut pickup = Pickup::new(EntityHandle::from_raw(1), avatar.position, Color(1));
        pickup.collected = true;
        assert!(!check_pickup_collision(&avatar, &pickup, &config));
    }

    #[test]
    fn test_uses_animated_position() {
        let config = GameConfig::default();
        let avatar = avatar_at(Vec3::new(0.0, 0.5, 0.0));
        let mut pickup = Pickup::new(EntityHandle::from_raw(1), Vec3::new(0.0, 0.5, 0.0), Color(1));
        // Anchor overlaps, but the pickup has floated out of reach.
        pickup.position.y = 2.0;
        assert!(!check_pickup_collision(&avatar, &pickup, &config));
    }
}
