//! Camera Tracking
//!
//! A trailing camera that slowly orbits the avatar. The orbit angle comes
//! from elapsed time, the position eases toward its target by a fixed
//! fraction each frame, and the view always aims at the avatar itself.

use std::time::Duration;

use glam::Vec3;
use serde::{Serialize, Deserialize};

use super::config::GameConfig;

/// Rendered camera pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Smoothed camera position
    pub position: Vec3,
    /// Point the camera aims at (the avatar's current position)
    pub look_at: Vec3,
}

impl CameraState {
    /// Camera already settled on its t = 0 target.
    pub fn new(avatar_position: Vec3, config: &GameConfig) -> Self {
        Self {
            position: avatar_position + orbital_offset(Duration::ZERO, config),
            look_at: avatar_position,
        }
    }
}

/// Offset from the avatar to the camera's target at `elapsed`.
pub fn orbital_offset(elapsed: Duration, config: &GameConfig) -> Vec3 {
    let angle = (elapsed.as_secs_f64() * config.camera_orbit_rate as f64) as f32;
    Vec3::new(
        angle.sin() * config.camera_distance,
        config.camera_height,
        angle.cos() * config.camera_distance,
    )
}

/// Ease the camera toward the orbit target and aim it at the avatar.
pub fn update_camera(
    camera: &mut CameraState,
    avatar_position: Vec3,
    elapsed: Duration,
    config: &GameConfig,
) {
    let target = avatar_position + orbital_offset(elapsed, config);
    camera.position = camera.position.lerp(target, config.camera_smoothing);
    camera.look_at = avatar_position;
}
