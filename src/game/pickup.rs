//! Pickup Spawning, Animation and Collection
//!
//! Pickups spawn on a ring around the origin, bob and spin while active,
//! and on collection are retired in place until their respawn fires.

use std::time::Duration;

use glam::Vec3;
use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::state::{GameState, Pickup};
use crate::scene::{Color, Scene, Shape, Transform};

/// Cosmetic pickup spin per frame (Euler radians).
pub const PICKUP_SPIN: Vec3 = Vec3::new(0.01, 0.01, 0.0);

/// Random anchor in the spawn band: uniform angle, uniform radial distance.
pub fn random_spawn_position(rng: &mut DeterministicRng, config: &GameConfig) -> Vec3 {
    let angle = rng.next_angle();
    let (min, max) = config.spawn_band();
    let distance = rng.next_f32_range(min, max);
    Vec3::new(angle.cos() * distance, config.pickup_rest_height(), angle.sin() * distance)
}

/// Create a pickup entity in the scene at a fresh random anchor.
pub fn spawn_pickup(
    scene: &mut impl Scene,
    rng: &mut DeterministicRng,
    color: Color,
    config: &GameConfig,
) -> Pickup {
    let base_position = random_spawn_position(rng, config);
    let entity = scene.spawn(
        Shape::Cube { size: config.cube_size },
        color,
        Transform::at(base_position),
    );
    Pickup::new(entity, base_position, color)
}

/// Fill every slot at game start.
pub fn spawn_initial_pickups(
    scene: &mut impl Scene,
    rng: &mut DeterministicRng,
    config: &GameConfig,
) -> Vec<Pickup> {
    (0..config.num_cubes)
        .map(|slot| spawn_pickup(scene, rng, config.slot_color(slot), config))
        .collect()
}

/// Bob and spin every active pickup.
///
/// The phase is offset by slot index so pickups drift out of sync.
pub fn animate_pickups(state: &mut GameState, elapsed: Duration, config: &GameConfig) {
    let t = elapsed.as_secs_f64() * config.float_rate as f64;

    for (slot, pickup) in state.pickups.iter_mut().enumerate() {
        if pickup.collected {
            continue;
        }
        let phase = (t + slot as f64) as f32;
        pickup.position = pickup.base_position;
        pickup.position.y = pickup.base_position.y + phase.sin() * config.float_amplitude;
        pickup.rotation += PICKUP_SPIN;
    }
}

/// Collect the pickup in `slot`.
///
/// Returns `None` for an already-retired slot: a second touch before the
/// respawn neither scores nor reschedules.
pub fn collect_pickup(
    state: &mut GameState,
    slot: usize,
    elapsed: Duration,
    config: &GameConfig,
    scene: &mut impl Scene,
) -> Option<GameEvent> {
    let pickup = state.pickups.get_mut(slot)?;
    if pickup.collected {
        return None;
    }

    // Mark as collected
    pickup.collected = true;
    let entity = pickup.entity;
    let color = pickup.color;

    let points = config.score_per_pickup;
    let new_score = state.add_score(points);

    scene.despawn(entity);
    scene.score_changed(new_score);

    let due = elapsed + config.respawn_delay();
    state.respawns.schedule(slot, due);

    debug!(frame = state.frame, slot, points, new_score, "pickup collected");

    Some(GameEvent::pickup_collected(state.frame, slot, color, points, new_score))
}
