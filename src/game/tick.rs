//! Frame Simulation
//!
//! One call to [`frame`] is one display refresh. The steps run in a fixed
//! order: respawns due since the last frame, avatar physics, pickup
//! animation and collection, camera, render.

use std::time::Duration;

#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::game::camera::update_camera;
use crate::game::collision::check_all_pickup_collisions;
use crate::game::config::{ConfigError, GameConfig};
use crate::game::events::{GameEvent, GameEventData};
use crate::game::input::{InputFrame, InputRecording};
use crate::game::physics::integrate_avatar;
use crate::game::pickup::{animate_pickups, collect_pickup};
use crate::game::respawn::apply_due_respawns;
use crate::game::state::GameState;
use crate::scene::Scene;

/// Result of a frame.
#[derive(Debug, Default)]
pub struct FrameResult {
    /// Events generated this frame
    pub events: Vec<GameEvent>,
    /// Score after the frame
    pub score: u32,
    /// Did the score change this frame?
    pub score_changed: bool,
}

impl FrameResult {
    /// Number of pickups collected this frame.
    pub fn collections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::PickupCollected { .. }))
            .count()
    }
}

/// Run one simulation frame.
///
/// # Arguments
///
/// * `state` - The game state (will be mutated)
/// * `input` - Input sampled for this frame
/// * `elapsed` - Monotonic time since the session started
/// * `config` - Game configuration
/// * `scene` - Render surface to mirror state into
pub fn frame(
    state: &mut GameState,
    input: &InputFrame,
    elapsed: Duration,
    config: &GameConfig,
    scene: &mut impl Scene,
) -> FrameResult {
    let score_before = state.score;

    // 0. Advance frame counter
    state.frame += 1;

    // 1. Deferred respawns that came due between frames
    for event in apply_due_respawns(state, elapsed, config, scene) {
        state.push_event(event);
    }

    // 2. Avatar physics
    let outcome = integrate_avatar(&mut state.avatar, input, config);
    scene.set_transform(state.avatar.entity, state.avatar.transform());
    if outcome.jumped {
        state.push_event(GameEvent::new(state.frame, GameEventData::AvatarJumped));
    }
    if outcome.landed {
        state.push_event(GameEvent::new(state.frame, GameEventData::AvatarLanded));
    }

    // 3. Pickup animation, then collection against the live positions
    animate_pickups(state, elapsed, config);
    for pickup in state.pickups.iter().filter(|p| !p.collected) {
        scene.set_transform(pickup.entity, pickup.transform());
    }
    for slot in check_all_pickup_collisions(state, config) {
        if let Some(event) = collect_pickup(state, slot, elapsed, config, scene) {
            state.push_event(event);
        }
    }

    // 4. Camera follows the post-physics avatar
    update_camera(&mut state.camera, state.avatar.position, elapsed, config);

    // 5. Render
    scene.render(&state.camera);

    #[cfg(feature = "debug-tracing")]
    trace!(
        frame = state.frame,
        x = state.avatar.position.x,
        y = state.avatar.position.y,
        z = state.avatar.position.z,
        score = state.score,
        "frame"
    );

    FrameResult {
        events: state.take_events(),
        score: state.score,
        score_changed: state.score != score_before,
    }
}

/// Synthetic elapsed time of frame `n` on a fixed-interval clock.
///
/// Saturates at `u64::MAX` nanoseconds.
pub fn elapsed_at(frame_interval: Duration, n: u64) -> Duration {
    let nanos = frame_interval.as_nanos().saturating_mul(n as u128);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Replay a session from recorded inputs.
///
/// Frame `n` runs at `n * frame_interval` of synthetic elapsed time.
/// Returns the final state and every event, or the validation error if
/// `config` is unusable.
pub fn replay(
    config: &GameConfig,
    recording: &InputRecording,
    frame_interval: Duration,
    scene: &mut impl Scene,
) -> Result<(GameState, Vec<GameEvent>), ConfigError> {
    config.validate()?;

    let mut state = GameState::new(config, recording.rng_seed, scene);
    let mut all_events = Vec::new();

    for (n, input) in recording.replay_iter() {
        let elapsed = elapsed_at(frame_interval, n);
        let result = frame(&mut state, &input, elapsed, config, scene);
        all_events.extend(result.events);
    }

    Ok((state, all_events))
}
