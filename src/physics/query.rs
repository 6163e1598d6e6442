//! Ray queries against scene colliders

use glam::Vec3;

use crate::math::Ray;
use crate::scene::{LayerMask, SceneGraph, SceneNodeId};

/// Nearest intersection found by a ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub node: SceneNodeId,
    pub point: Vec3,
    pub distance: f32,
}

/// Ray-cast service. Implementations report the nearest enabled collider on an
/// active node whose layer is in `mask`, within `max_distance` of the ray origin.
pub trait PhysicsQuery {
    fn raycast(
        &self,
        scene: &SceneGraph,
        ray: &Ray,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;
}

/// Brute-force raycaster over every collider in the graph. Rooms hold a few
/// hundred boxes at most, so there is no acceleration structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColliderRaycaster;

impl PhysicsQuery for ColliderRaycaster {
    fn raycast(
        &self,
        scene: &SceneGraph,
        ray: &Ray,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let mut best: Option<RaycastHit> = None;

        for id in scene.subtree(scene.root()) {
            let Some(node) = scene.get(id) else { continue };
            let Some(collider) = node.collider else { continue };
            if !collider.enabled || !mask.contains(node.layer) {
                continue;
            }
            if !scene.is_active_in_hierarchy(id) {
                continue;
            }

            let bounds = collider.bounds.transformed(&scene.world_matrix(id));
            // Colliders enclosing the origin are not hit
            if bounds.contains_point(ray.origin) {
                continue;
            }
            let Some((t_near, _)) = ray.intersects_aabb(&bounds) else { continue };
            if t_near > max_distance {
                continue;
            }
            if best.is_none_or(|b| t_near < b.distance) {
                best = Some(RaycastHit {
                    node: id,
                    point: ray.at(t_near),
                    distance: t_near,
                });
            }
        }

        best
    }
}
