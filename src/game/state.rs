//! Game State Definitions
//!
//! All mutable simulation state lives in one [`GameState`] value that the
//! frame scheduler passes to each step. There are no globals.

use glam::Vec3;
use serde::{Serialize, Deserialize};

use crate::core::rng::DeterministicRng;
use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::camera::CameraState;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::pickup::spawn_initial_pickups;
use crate::game::respawn::RespawnScheduler;
use crate::scene::{Color, EntityHandle, Scene, Shape, Transform};

// =============================================================================
// AVATAR
// =============================================================================

/// Vertical motion state gating jump eligibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalState {
    /// Resting on the ground; may jump
    Grounded,
    /// In a jump; must land first
    Airborne,
}

/// The player-controlled avatar.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvatarState {
    /// Renderable handle
    pub entity: EntityHandle,

    /// World-space center
    pub position: Vec3,

    /// Velocity; only `y` is driven by physics
    pub velocity: Vec3,

    /// Set by a jump, cleared on landing
    pub is_jumping: bool,

    /// Cosmetic spin (Euler radians)
    pub rotation: Vec3,
}

impl AvatarState {
    /// Grounded avatar at the origin.
    pub fn new(entity: EntityHandle, resting_height: f32) -> Self {
        Self {
            entity,
            position: Vec3::new(0.0, resting_height, 0.0),
            velocity: Vec3::ZERO,
            is_jumping: false,
            rotation: Vec3::ZERO,
        }
    }

    /// Current vertical motion state.
    #[inline]
    pub fn vertical_state(&self) -> VerticalState {
        if self.is_jumping {
            VerticalState::Airborne
        } else {
            VerticalState::Grounded
        }
    }

    /// Transform to push to the scene.
    pub fn transform(&self) -> Transform {
        Transform { position: self.position, rotation: self.rotation }
    }
}

// =============================================================================
// PICKUP
// =============================================================================

/// A collectible occupying one slot.
///
/// Once `collected` is set the pickup is retired: it stays in its slot,
/// ignored by collision, until the respawn scheduler replaces it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pickup {
    /// Renderable handle
    pub entity: EntityHandle,

    /// Anchor position; `y` is the height the bob oscillates around
    pub base_position: Vec3,

    /// Live animated position (what collision tests against)
    pub position: Vec3,

    /// Cosmetic spin (Euler radians)
    pub rotation: Vec3,

    /// Material color, preserved across respawns
    pub color: Color,

    /// Has this pickup been collected?
    pub collected: bool,
}

impl Pickup {
    /// Create an active pickup at its anchor.
    pub fn new(entity: EntityHandle, base_position: Vec3, color: Color) -> Self {
        Self {
            entity,
            base_position,
            position: base_position,
            rotation: Vec3::ZERO,
            color,
            collected: false,
        }
    }

    /// Transform to push to the scene.
    pub fn transform(&self) -> Transform {
        Transform { position: self.position, rotation: self.rotation }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete simulation state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Frames simulated so far
    pub frame: u64,

    /// Never decreases
    pub score: u32,

    /// Display-only; the simulation never changes it
    pub health: u32,

    /// The player's avatar
    pub avatar: AvatarState,

    /// Fixed-size slot collection; index is identity
    pub pickups: Vec<Pickup>,

    /// Camera pose
    pub camera: CameraState,

    /// Pending deferred respawns
    pub respawns: RespawnScheduler,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// Events generated this frame (cleared each frame)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create the avatar and every pickup slot in `scene`.
    pub fn new(config: &GameConfig, rng_seed: u64, scene: &mut impl Scene) -> Self {
        let mut rng = DeterministicRng::new(rng_seed);

        let avatar_entity = scene.spawn(
            Shape::Sphere { radius: config.player_size },
            config.avatar_color,
            Transform::at(Vec3::new(0.0, config.resting_height(), 0.0)),
        );
        let avatar = AvatarState::new(avatar_entity, config.resting_height());
        let pickups = spawn_initial_pickups(scene, &mut rng, config);
        let camera = CameraState::new(avatar.position, config);

        Self {
            frame: 0,
            score: 0,
            health: config.starting_health,
            avatar,
            pickups,
            camera,
            respawns: RespawnScheduler::new(),
            rng_seed,
            rng,
            pending_events: Vec::new(),
        }
    }

    /// Number of pickup slots.
    pub fn slot_count(&self) -> usize {
        self.pickups.len()
    }

    /// Number of slots holding an uncollected pickup.
    pub fn active_pickup_count(&self) -> usize {
        self.pickups.iter().filter(|p| !p.collected).count()
    }

    /// Add points and return the new score.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.frame, self.rng_seed, |hasher| {
            hasher.update_u32(self.score);
            hasher.update_u32(self.health);

            hasher.update_vec3(self.avatar.position);
            hasher.update_vec3(self.avatar.velocity);
            hasher.update_bool(self.avatar.is_jumping);

            for pickup in &self.pickups {
                hasher.update_u64(pickup.entity.raw());
                hasher.update_vec3(pickup.base_position);
                hasher.update_vec3(pickup.position);
                hasher.update_u32(pickup.color.0);
                hasher.update_bool(pickup.collected);
            }

            for pending in self.respawns.pending() {
                hasher.update_u64(pending.slot as u64);
                hasher.update_u64(pending.due.as_millis() as u64);
            }

            hasher.update_vec3(self.camera.position);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeadlessScene;

    #[test]
    fn test_new_state_layout() {
        let config = GameConfig::default();
        let mut scene = HeadlessScene::new();
        let state = GameState::new(&config, 12345, &mut scene);

        assert_eq!(state.score, 0);
        assert_eq!(state.health, 100);
        assert_eq!(state.slot_count(), config.num_cubes);
        assert_eq!(state.active_pickup_count(), config.num_cubes);
        assert_eq!(state.avatar.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(state.avatar.vertical_state(), VerticalState::Grounded);
        // Avatar + one entity per slot.
        assert_eq!(scene.entity_count(), config.num_cubes + 1);
    }

    #[test]
    fn test_slot_colors_round_robin() {
        let config = GameConfig::default();
        let mut scene = HeadlessScene::new();
        let state = GameState::new(&config, 1, &mut scene);

        for (slot, pickup) in state.pickups.iter().enumerate() {
            assert_eq!(pickup.color, Color::PALETTE[slot % Color::PALETTE.len()]);
        }
    }

    #[test]
    fn test_avatar_uses_configured_color() {
        let config = GameConfig { avatar_color: Color(0x123456), ..GameConfig::default() };
        let mut scene = HeadlessScene::new();
        let state = GameState::new(&config, 1, &mut scene);
        let avatar = scene.entity(state.avatar.entity).expect("avatar spawned");
        assert_eq!(avatar.color, Color(0x123456));
    }

    #[test]
    fn test_unvalidated_empty_palette_does_not_panic() {
        let config = GameConfig { palette: Vec::new(), ..GameConfig::default() };
        let state = GameState::new(&config, 1, &mut HeadlessScene::new());
        assert_eq!(state.pickups[0].color, Color::PALETTE[0]);
    }

    #[test]
    fn test_state_determinism() {
        let config = GameConfig::default();
        let state1 = GameState::new(&config, 777, &mut HeadlessScene::new());
        let state2 = GameState::new(&config, 777, &mut HeadlessScene::new());

        for (a, b) in state1.pickups.iter().zip(&state2.pickups) {
            assert_eq!(a.base_position, b.base_position);
        }
        assert_eq!(state1.compute_hash(), state2.compute_hash());

        let state3 = GameState::new(&config, 778, &mut HeadlessScene::new());
        assert_ne!(state1.compute_hash(), state3.compute_hash());
    }

    #[test]
    fn test_score_saturates() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1, &mut HeadlessScene::new());
        state.score = u32::MAX - 5;
        assert_eq!(state.add_score(10), u32::MAX);
    }
}
