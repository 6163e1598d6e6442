//! Scene graph: the node hierarchy rooms, doors and the tourist live in.
//!
//! Nodes carry a local transform relative to their parent; world transforms are
//! composed on demand, so a write is visible to the very next read.
//!
//! Nodes are never removed, so a `SceneNodeId` handed out by `add_child` stays
//! valid for the life of the graph. Accessors given an unknown ID read as the
//! identity transform and setters ignore it.

use std::collections::{HashMap, VecDeque};

use glam::{Mat4, Quat, Vec3};

use crate::math::rotation;
use super::layer::Layer;
use super::node::{Collider, LocalTransform, Renderer, SceneNode, SceneNodeId};

/// CPU-side scene graph of rooms, doors and the tourist rig.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
}

impl SceneGraph {
    /// Create a new scene graph with a root node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", Layer::DEFAULT);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: Layer,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, layer);
        node.parent = Some(parent);

        self.nodes.insert(id, node);

        // Register as child of parent
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        id
    }

    /// Get an immutable reference to a node.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node.
    pub fn get_mut(&mut self, id: SceneNodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Name of a node, empty for unknown IDs.
    pub fn name(&self, id: SceneNodeId) -> &str {
        self.nodes.get(&id).map(|n| n.name.as_str()).unwrap_or("")
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Hierarchy
    // ------------------------------------------------------------------

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// The `index`-th child of a node.
    pub fn child(&self, id: SceneNodeId, index: usize) -> Option<SceneNodeId> {
        self.nodes.get(&id)?.children.get(index).copied()
    }

    pub fn parent(&self, id: SceneNodeId) -> Option<SceneNodeId> {
        self.nodes.get(&id)?.parent
    }

    /// Walk `levels` parents up. `ancestor(id, 0)` is `id` itself.
    pub fn ancestor(&self, id: SceneNodeId, levels: usize) -> Option<SceneNodeId> {
        let mut current = id;
        for _ in 0..levels {
            current = self.parent(current)?;
        }
        Some(current)
    }

    /// Breadth-first search from the root for the first active node with this name.
    pub fn find(&self, name: &str) -> Option<SceneNodeId> {
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            let node = self.nodes.get(&id)?;
            if !node.active {
                continue;
            }
            if node.name == name {
                return Some(id);
            }
            queue.extend(node.children.iter().copied());
        }
        None
    }

    /// `id` and all its descendants, parents before children.
    pub fn subtree(&self, id: SceneNodeId) -> Vec<SceneNodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(&id) {
            return out;
        }
        out.push(id);
        let mut i = 0;
        while i < out.len() {
            out.extend(self.children(out[i]));
            i += 1;
        }
        out
    }

    /// True if `id` is `ancestor` or lies beneath it.
    pub fn is_descendant_of(&self, id: SceneNodeId, ancestor: SceneNodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }

    // ------------------------------------------------------------------
    // Activation and components
    // ------------------------------------------------------------------

    pub fn set_active(&mut self, id: SceneNodeId, active: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.active = active;
        }
    }

    /// Active itself and every ancestor active.
    pub fn is_active_in_hierarchy(&self, id: SceneNodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            match self.nodes.get(&c) {
                Some(node) if node.active => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn set_renderer(&mut self, id: SceneNodeId, renderer: Renderer) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.renderer = Some(renderer);
        }
    }

    pub fn set_collider(&mut self, id: SceneNodeId, collider: Collider) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.collider = Some(collider);
        }
    }

    /// Enable or disable the node's renderer if it has one.
    pub fn set_renderer_enabled(&mut self, id: SceneNodeId, enabled: bool) {
        if let Some(renderer) = self.nodes.get_mut(&id).and_then(|n| n.renderer.as_mut()) {
            renderer.enabled = enabled;
        }
    }

    /// Enable or disable the node's collider if it has one.
    pub fn set_collider_enabled(&mut self, id: SceneNodeId, enabled: bool) {
        if let Some(collider) = self.nodes.get_mut(&id).and_then(|n| n.collider.as_mut()) {
            collider.enabled = enabled;
        }
    }

    /// `None` when the node has no renderer.
    pub fn renderer_enabled(&self, id: SceneNodeId) -> Option<bool> {
        self.nodes.get(&id)?.renderer.map(|r| r.enabled)
    }

    /// `None` when the node has no collider.
    pub fn collider_enabled(&self, id: SceneNodeId) -> Option<bool> {
        self.nodes.get(&id)?.collider.map(|c| c.enabled)
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Set the local transform of a node.
    pub fn set_transform(&mut self, id: SceneNodeId, transform: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
        }
    }

    pub fn local_transform(&self, id: SceneNodeId) -> LocalTransform {
        self.nodes
            .get(&id)
            .map(|n| n.local_transform.clone())
            .unwrap_or_default()
    }

    pub fn set_local_position(&mut self, id: SceneNodeId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform.position = position;
        }
    }

    pub fn set_local_rotation(&mut self, id: SceneNodeId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform.rotation = rotation;
        }
    }

    /// Local-to-world matrix composed from the root down.
    pub fn world_matrix(&self, id: SceneNodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            matrix = node.local_transform.to_mat4() * matrix;
            current = node.parent.and_then(|p| self.nodes.get(&p));
        }
        matrix
    }

    pub fn world_position(&self, id: SceneNodeId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }

    pub fn world_rotation(&self, id: SceneNodeId) -> Quat {
        let mut rotation = Quat::IDENTITY;
        let mut current = self.nodes.get(&id);
        while let Some(node) = current {
            rotation = node.local_transform.rotation * rotation;
            current = node.parent.and_then(|p| self.nodes.get(&p));
        }
        rotation.normalize()
    }

    /// World-space forward (+Z) of a node.
    pub fn forward(&self, id: SceneNodeId) -> Vec3 {
        self.world_rotation(id) * rotation::FORWARD
    }

    fn parent_matrix(&self, id: SceneNodeId) -> Mat4 {
        self.parent(id)
            .map(|p| self.world_matrix(p))
            .unwrap_or(Mat4::IDENTITY)
    }

    fn parent_rotation(&self, id: SceneNodeId) -> Quat {
        self.parent(id)
            .map(|p| self.world_rotation(p))
            .unwrap_or(Quat::IDENTITY)
    }

    /// Place a node at a world position, keeping its rotation.
    pub fn set_world_position(&mut self, id: SceneNodeId, position: Vec3) {
        let local = self.parent_matrix(id).inverse().transform_point3(position);
        self.set_local_position(id, local);
    }

    /// Give a node a world rotation, keeping its position.
    pub fn set_world_rotation(&mut self, id: SceneNodeId, rotation: Quat) {
        let local = self.parent_rotation(id).inverse() * rotation;
        self.set_local_rotation(id, local.normalize());
    }

    /// Move a node by a world-space offset.
    pub fn translate_world(&mut self, id: SceneNodeId, offset: Vec3) {
        let position = self.world_position(id) + offset;
        self.set_world_position(id, position);
    }

    /// Apply a rotation in the node's own frame (post-multiplied).
    pub fn rotate_local(&mut self, id: SceneNodeId, rotation: Quat) {
        let current = self.local_transform(id).rotation;
        self.set_local_rotation(id, (current * rotation).normalize());
    }

    /// Rotate a node about a world-space pivot and axis, moving it around the pivot.
    pub fn rotate_around(&mut self, id: SceneNodeId, pivot: Vec3, axis: Vec3, degrees: f32) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let q = Quat::from_axis_angle(axis, degrees.to_radians());
        let position = pivot + q * (self.world_position(id) - pivot);
        let rotation = q * self.world_rotation(id);
        self.set_world_position(id, position);
        self.set_world_rotation(id, rotation);
    }

    /// Turn a node so its forward points at `target`, world up kept up.
    pub fn look_at(&mut self, id: SceneNodeId, target: Vec3) {
        let direction = target - self.world_position(id);
        if let Some(rotation) = rotation::look_rotation(direction, Vec3::Y) {
            self.set_world_rotation(id, rotation);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
