//! Avatar Movement Integration
//!
//! Runs once per frame whether or not there was input. Order matters:
//! jump, horizontal move, gravity, vertical move, ground clamp, bounds
//! clamp, cosmetic spin.

use glam::Vec3;

use crate::game::config::GameConfig;
use crate::game::input::InputFrame;
use crate::game::state::AvatarState;

/// Cosmetic avatar spin per frame (Euler radians).
pub const AVATAR_SPIN: Vec3 = Vec3::new(0.005, 0.0, 0.003);

/// Vertical transitions that happened during integration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhysicsOutcome {
    /// Grounded → Airborne this frame
    pub jumped: bool,
    /// Airborne → Grounded this frame
    pub landed: bool,
}

/// Advance the avatar by one frame.
pub fn integrate_avatar(
    avatar: &mut AvatarState,
    input: &InputFrame,
    config: &GameConfig,
) -> PhysicsOutcome {
    let mut outcome = PhysicsOutcome::default();
    let was_jumping = avatar.is_jumping;

    // 1. Jump (only from the ground)
    if input.jump_pressed() && !avatar.is_jumping {
        avatar.velocity.y = config.jump_velocity;
        avatar.is_jumping = true;
        outcome.jumped = true;
    }

    // 2. Horizontal movement (intent is zero or unit length)
    let intent = input.move_direction();
    avatar.position.x += intent.x * config.player_speed;
    avatar.position.z += intent.y * config.player_speed;

    // 3. Gravity, unconditionally; the ground clamp undoes it while resting
    avatar.velocity.y -= config.gravity;

    // 4. Vertical movement
    avatar.position.y += avatar.velocity.y;

    // 5. Ground clamp: the only way back to Grounded
    let resting = config.resting_height();
    if avatar.position.y <= resting {
        avatar.position.y = resting;
        avatar.velocity.y = 0.0;
        avatar.is_jumping = false;
        outcome.landed = was_jumping || outcome.jumped;
    }

    // 6. World bounds
    let bound = config.world_size;
    avatar.position.x = avatar.position.x.clamp(-bound, bound);
    avatar.position.z = avatar.position.z.clamp(-bound, bound);

    // 7. Cosmetic spin
    avatar.rotation += AVATAR_SPIN;

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::VerticalState;
    use crate::scene::EntityHandle;
    use std::f32::consts::FRAC_1_SQRT_2;

    fn grounded() -> (AvatarState, GameConfig) {
        let config = GameConfig::default();
        (AvatarState::new(EntityHandle::from_raw(0), config.resting_height()), config)
    }

    #[test]
    fn test_idle_avatar_stays_grounded() {
        let (mut avatar, config) = grounded();
        for _ in 0..100 {
            let outcome = integrate_avatar(&mut avatar, &InputFrame::new(), &config);
            assert_eq!(outcome, PhysicsOutcome::default());
        }
        assert_eq!(avatar.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(avatar.velocity.y, 0.0);
        assert_eq!(avatar.vertical_state(), VerticalState::Grounded);
    }

    #[test]
    fn test_straight_move_uses_full_speed() {
        let (mut avatar, config) = grounded();
        integrate_avatar(&mut avatar, &InputFrame::with_movement(1, 0), &config);
        assert!((avatar.position.x - 0.15).abs() < 1e-6);
        assert_eq!(avatar.position.z, 0.0);
    }

    #[test]
    fn test_diagonal_move_is_scaled() {
        let (mut avatar, config) = grounded();
        integrate_avatar(&mut avatar, &InputFrame::with_movement(1, -1), &config);
        let expected = 0.15 * FRAC_1_SQRT_2;
        assert!((avatar.position.x - expected).abs() < 1e-6);
        assert!((avatar.position.z + expected).abs() < 1e-6);
    }

    #[test]
    fn test_jump_launches_and_lands() {
        let (mut avatar, config) = grounded();
        let outcome = integrate_avatar(&mut avatar, &InputFrame::new().jumping(), &config);
        assert!(outcome.jumped);
        assert!(avatar.is_jumping);
        // Launch then one frame of gravity.
        assert!((avatar.velocity.y - 0.24).abs() < 1e-6);
        assert!((avatar.position.y - 0.74).abs() < 1e-6);

        let mut frames = 1;
        loop {
            let outcome = integrate_avatar(&mut avatar, &InputFrame::new(), &config);
            frames += 1;
            if outcome.landed {
                break;
            }
            assert!(frames < 100, "never landed");
        }
        assert_eq!(avatar.vertical_state(), VerticalState::Grounded);
        assert_eq!(avatar.position.y, config.resting_height());
        // Exact arithmetic lands on frame 49 precisely at resting height;
        // float rounding may push it one frame later.
        assert!((49..=50).contains(&frames), "landed after {frames} frames");
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let (mut avatar, config) = grounded();
        integrate_avatar(&mut avatar, &InputFrame::new().jumping(), &config);
        let vy = avatar.velocity.y;

        let outcome = integrate_avatar(&mut avatar, &InputFrame::new().jumping(), &config);
        assert!(!outcome.jumped);
        assert!((avatar.velocity.y - (vy - config.gravity)).abs() < 1e-6);
    }

    #[test]
    fn test_free_fall_frame_count() {
        let (mut avatar, config) = grounded();
        avatar.position.y = 5.5;

        // y_n = 5.5 - 0.01 * n(n+1)/2 first reaches 0.5 at n = 32.
        let mut frames = 0;
        loop {
            integrate_avatar(&mut avatar, &InputFrame::new(), &config);
            frames += 1;
            if avatar.position.y == config.resting_height() {
                break;
            }
            assert!(frames < 100, "never landed");
        }
        assert_eq!(frames, 32);
        assert_eq!(avatar.position.y, 0.5);
    }

    #[test]
    fn test_world_bounds_clamp() {
        let (mut avatar, config) = grounded();
        avatar.position.x = 49.95;
        avatar.position.z = -49.95;
        integrate_avatar(&mut avatar, &InputFrame::with_movement(1, -1), &config);
        assert_eq!(avatar.position.x, 50.0);
        assert_eq!(avatar.position.z, -50.0);
    }

    #[test]
    fn test_spin_accumulates() {
        let (mut avatar, config) = grounded();
        for _ in 0..10 {
            integrate_avatar(&mut avatar, &InputFrame::new(), &config);
        }
        assert!(avatar.rotation.abs_diff_eq(AVATAR_SPIN * 10.0, 1e-6));
    }
}
