//! Scene graph node types
//!
//! Node IDs, local transforms, and the two components the tour toggles:
//! renderers and colliders.

use glam::{Mat4, Quat, Vec3};

use crate::math::Aabb;
use super::layer::Layer;

/// Unique identifier for a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneNodeId(pub u64);

/// Local transform relative to the parent node.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    /// Identity transform (no translation, rotation, or scaling).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.position,
        )
    }
}

/// Draws the node's geometry while enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Renderer {
    pub enabled: bool,
}

/// Box collider in the node's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub bounds: Aabb,
    pub enabled: bool,
    /// Triggers are hit by raycasts but never block movement.
    pub is_trigger: bool,
}

impl Collider {
    pub fn solid(bounds: Aabb) -> Self {
        Self { bounds, enabled: true, is_trigger: false }
    }

    pub fn trigger(bounds: Aabb) -> Self {
        Self { bounds, enabled: true, is_trigger: true }
    }
}

/// A single node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub name: String,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,
    pub local_transform: LocalTransform,
    pub layer: Layer,
    /// Inactive nodes and their descendants are skipped by queries.
    pub active: bool,
    pub renderer: Option<Renderer>,
    pub collider: Option<Collider>,
}

impl SceneNode {
    /// Create a new, empty, active scene node.
    pub fn new(id: SceneNodeId, name: impl Into<String>, layer: Layer) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform: LocalTransform::identity(),
            layer,
            active: true,
            renderer: None,
            collider: None,
        }
    }
}
