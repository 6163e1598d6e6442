//! Capsule-based character movement.
//!
//! The capsule is approximated by its bounding box and moved one axis at a
//! time (X, Z, then Y), stopping flush against any solid collider in the way.
//! Horizontal velocity comes from the caller; vertical motion is gravity only.

use glam::Vec3;

use crate::math::Aabb;
use crate::scene::{Capsule, SceneGraph, SceneNodeId};

/// Gap left between the capsule and a blocking surface.
const CONTACT_OFFSET: f32 = 1e-3;

/// Movement primitive for the tourist body.
#[derive(Clone, Debug)]
pub struct CharacterController {
    pub capsule: Capsule,
    /// Downward acceleration in units/s²
    pub gravity: f32,
    vertical_speed: f32,
    grounded: bool,
}

impl CharacterController {
    pub fn new(capsule: Capsule, gravity: f32) -> Self {
        Self {
            capsule,
            gravity,
            vertical_speed: 0.0,
            grounded: false,
        }
    }

    pub fn height(&self) -> f32 {
        self.capsule.height
    }

    /// Whether the last move ended standing on something.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn half_extent(&self) -> Vec3 {
        Vec3::new(self.capsule.radius, self.capsule.height / 2.0, self.capsule.radius)
    }

    /// Move `body` (capsule center) with a horizontal `velocity` in units/s for
    /// `dt` seconds, under gravity. The Y component of `velocity` is ignored.
    /// Returns whether the body is grounded afterwards.
    pub fn simple_move(
        &mut self,
        scene: &mut SceneGraph,
        body: SceneNodeId,
        velocity: Vec3,
        dt: f32,
    ) -> bool {
        let half = self.half_extent();
        let start = scene.world_position(body);
        let mut position = start;
        let mut obstacles = solid_colliders(scene, body);

        // Stand on anything penetrated below the capsule center
        let start_box = Aabb::from_center_half_extent(start, half);
        let standing_on = obstacles
            .iter()
            .filter(|o| o.overlaps(&start_box) && o.max.y <= start.y)
            .map(|o| o.max.y + half.y + CONTACT_OFFSET)
            .reduce(f32::max);
        let mut blocked_below = false;
        if let Some(y) = standing_on {
            position.y = y;
            self.vertical_speed = 0.0;
            blocked_below = true;
        }

        // Whatever still overlaps (walls the body was dropped into) is
        // ignored so the body can walk out of it
        let resolved_box = Aabb::from_center_half_extent(position, half);
        obstacles.retain(|o| !o.overlaps(&resolved_box));

        self.vertical_speed -= self.gravity * dt;
        let delta = Vec3::new(velocity.x * dt, self.vertical_speed * dt, velocity.z * dt);

        for axis in [0usize, 2, 1] {
            let d = delta[axis];
            if d == 0.0 {
                continue;
            }
            let mut target = position;
            target[axis] += d;
            // Sweep covers the whole step so thin walls cannot be skipped
            let moved = Aabb::from_center_half_extent(position, half)
                .merged(&Aabb::from_center_half_extent(target, half));

            for obstacle in obstacles.iter().filter(|o| o.overlaps(&moved)) {
                if d > 0.0 {
                    target[axis] = target[axis].min(obstacle.min[axis] - half[axis] - CONTACT_OFFSET);
                } else {
                    target[axis] = target[axis].max(obstacle.max[axis] + half[axis] + CONTACT_OFFSET);
                    if axis == 1 {
                        blocked_below = true;
                    }
                }
            }
            position = target;
        }

        if blocked_below {
            self.vertical_speed = 0.0;
        }
        self.grounded = blocked_below;

        if position != start {
            scene.set_world_position(body, position);
        }
        self.grounded
    }
}

/// World bounds of every enabled, non-trigger collider outside the body's own subtree.
fn solid_colliders(scene: &SceneGraph, body: SceneNodeId) -> Vec<Aabb> {
    scene
        .subtree(scene.root())
        .into_iter()
        .filter(|id| !scene.is_descendant_of(*id, body))
        .filter_map(|id| {
            let collider = scene.get(id)?.collider?;
            (collider.enabled && !collider.is_trigger && scene.is_active_in_hierarchy(id))
                .then(|| collider.bounds.transformed(&scene.world_matrix(id)))
        })
        .collect()
}
