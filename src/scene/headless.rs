//! Headless Scene
//!
//! Keeps entities in a sorted map and records what the simulation asked
//! for, so tests can assert on removals, spawns, renders and score pushes.

use std::collections::BTreeMap;

use tracing::trace;

use super::{Color, EntityHandle, Scene, Shape, Transform};
use crate::game::camera::CameraState;

/// An entity as the headless scene stores it.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessEntity {
    /// Geometry
    pub shape: Shape,
    /// Material color
    pub color: Color,
    /// Latest transform
    pub transform: Transform,
}

/// In-memory [`Scene`].
#[derive(Debug, Default)]
pub struct HeadlessScene {
    entities: BTreeMap<EntityHandle, HeadlessEntity>,
    next_id: u64,
    spawned: u64,
    despawned: Vec<EntityHandle>,
    frames_rendered: u64,
    last_camera: Option<CameraState>,
    score_log: Vec<u32>,
}

impl HeadlessScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live entity.
    pub fn entity(&self, handle: EntityHandle) -> Option<&HeadlessEntity> {
        self.entities.get(&handle)
    }

    /// Is the handle still live?
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.contains_key(&handle)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Total spawns since creation.
    pub fn spawn_count(&self) -> u64 {
        self.spawned
    }

    /// Handles actually removed, in order.
    pub fn despawned(&self) -> &[EntityHandle] {
        &self.despawned
    }

    /// Number of `render` calls.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Camera passed to the most recent `render`.
    pub fn last_camera(&self) -> Option<&CameraState> {
        self.last_camera.as_ref()
    }

    /// Every score pushed, in order.
    pub fn score_log(&self) -> &[u32] {
        &self.score_log
    }
}

impl Scene for HeadlessScene {
    fn spawn(&mut self, shape: Shape, color: Color, transform: Transform) -> EntityHandle {
        let handle = EntityHandle::from_raw(self.next_id);
        self.next_id += 1;
        self.spawned += 1;
        self.entities.insert(handle, HeadlessEntity { shape, color, transform });
        handle
    }

    fn despawn(&mut self, handle: EntityHandle) {
        if self.entities.remove(&handle).is_some() {
            self.despawned.push(handle);
        } else {
            trace!(handle = handle.raw(), "despawn of unknown entity ignored");
        }
    }

    fn set_transform(&mut self, handle: EntityHandle, transform: Transform) {
        if let Some(entity) = self.entities.get_mut(&handle) {
            entity.transform = transform;
        }
    }

    fn render(&mut self, camera: &CameraState) {
        self.frames_rendered += 1;
        self.last_camera = Some(*camera);
    }

    fn score_changed(&mut self, score: u32) {
        self.score_log.push(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_spawn_assigns_unique_handles() {
        let mut scene = HeadlessScene::new();
        let a = scene.spawn(Shape::Cube { size: 0.4 }, Color(1), Transform::default());
        let b = scene.spawn(Shape::Cube { size: 0.4 }, Color(2), Transform::default());
        assert_ne!(a, b);
        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.entity(b).map(|e| e.color), Some(Color(2)));
    }

    #[test]
    fn test_despawn_twice_is_noop() {
        let mut scene = HeadlessScene::new();
        let a = scene.spawn(Shape::Sphere { radius: 0.5 }, Color::AVATAR, Transform::default());
        scene.despawn(a);
        scene.despawn(a);
        assert!(!scene.contains(a));
        assert_eq!(scene.despawned(), &[a]);
    }

    #[test]
    fn test_set_transform_on_removed_entity_ignored() {
        let mut scene = HeadlessScene::new();
        let a = scene.spawn(Shape::Cube { size: 0.4 }, Color(1), Transform::default());
        scene.despawn(a);
        scene.set_transform(a, Transform::at(Vec3::ONE));
        assert!(scene.entity(a).is_none());
    }
}
