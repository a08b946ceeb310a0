//! Render Surface Seam
//!
//! The simulation never touches meshes, materials or a GPU. It asks a
//! [`Scene`] to create, move and remove entities and to draw a frame, and
//! pushes score changes to it for the HUD.
//!
//! - `headless`: in-memory implementation used by the binary, tests and benches

pub mod headless;

use glam::Vec3;
use serde::{Serialize, Deserialize};

use crate::game::camera::CameraState;

pub use headless::{HeadlessEntity, HeadlessScene};

/// Opaque reference to a renderable entity owned by the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityHandle(u64);

impl EntityHandle {
    /// Wrap a scene-assigned id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Scene-assigned id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// 24-bit RGB color (0xRRGGBB).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Avatar body color.
    pub const AVATAR: Color = Color(0x00ff00);

    /// Pickup palette, assigned to slots round-robin.
    pub const PALETTE: [Color; 6] = [
        Color(0xff0000),
        Color(0x00ff00),
        Color(0x0000ff),
        Color(0xffff00),
        Color(0xff00ff),
        Color(0x00ffff),
    ];
}

/// Geometry the scene should build for an entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// The avatar's sphere.
    Sphere { radius: f32 },
    /// A pickup cube.
    Cube { size: f32 },
}

/// World-space position and Euler rotation (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position
    pub position: Vec3,
    /// Euler rotation (x, y, z)
    pub rotation: Vec3,
}

impl Transform {
    /// Transform at `position` with no rotation.
    pub const fn at(position: Vec3) -> Self {
        Self { position, rotation: Vec3::ZERO }
    }
}

/// Services the rendering collaborator provides to the simulation.
///
/// Calls are made from the single frame thread only.
pub trait Scene {
    /// Create an entity and return its handle.
    fn spawn(&mut self, shape: Shape, color: Color, transform: Transform) -> EntityHandle;

    /// Remove an entity. Unknown or already-removed handles are ignored.
    fn despawn(&mut self, handle: EntityHandle);

    /// Move/rotate an entity.
    fn set_transform(&mut self, handle: EntityHandle, transform: Transform);

    /// Draw the current scene from `camera`.
    fn render(&mut self, camera: &CameraState);

    /// Score display hook, called once per change.
    fn score_changed(&mut self, _score: u32) {}
}
