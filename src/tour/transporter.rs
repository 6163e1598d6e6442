//! Doors that move the tourist between rooms.
//!
//! Each door node carries one [`Transporter`]. Rooms are shown and hidden by
//! toggling every renderer and collider in their subtree, except renderers on
//! the reserved layers, which belong to the tourist controller (door
//! highlights and bounds markers).

use std::collections::HashMap;

use glam::Vec3;

use crate::config::HubConfig;
use crate::core::{Error, Result};
use crate::math::rotation;
use crate::scene::description::ENTRANCES_GROUP;
use crate::scene::{DoorSetup, SceneGraph, SceneNodeId};

use super::tourist::TouristController;

/// A completed room change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportEvent {
    pub door: SceneNodeId,
    pub from: SceneNodeId,
    pub to: SceneNodeId,
}

/// Per-door room change behavior.
#[derive(Clone, Debug)]
pub struct Transporter {
    door: SceneNodeId,
    target: SceneNodeId,
    offset: Vec3,
    yaw: f32,
    room: SceneNodeId,
}

impl Transporter {
    /// Resolve a door's target and owning room, then hide the owning room
    /// unless it is the hub.
    ///
    /// An empty target falls back to the hub arrival in `hub`. Fails with
    /// [`Error::MissingComponent`] if the door node cannot be pointed at or
    /// highlighted, [`Error::RoomNotFound`] if the target names no room and
    /// [`Error::InvalidRoomParent`] if the owning room is not one of `rooms`.
    pub fn new(
        scene: &mut SceneGraph,
        setup: &DoorSetup,
        rooms: &[SceneNodeId],
        hub: &HubConfig,
    ) -> Result<Self> {
        require_components(scene, setup.node)?;

        let (target_name, offset, yaw) = if setup.target.is_empty() {
            (hub.room.as_str(), hub.arrival_offset(), hub.arrival_yaw)
        } else {
            (setup.target.as_str(), setup.offset, setup.yaw)
        };

        let target = scene
            .find(target_name)
            .filter(|id| rooms.contains(id))
            .ok_or_else(|| Error::RoomNotFound(target_name.to_string()))?;
        let room = owning_room(scene, setup, rooms)?;

        if scene.name(room) != hub.room {
            set_visibility(scene, room, false);
        }

        log::debug!(
            "Door '{}' in '{}' leads to '{}'",
            scene.name(setup.node),
            scene.name(room),
            target_name
        );

        Ok(Self { door: setup.node, target, offset, yaw, room })
    }

    pub fn door(&self) -> SceneNodeId {
        self.door
    }

    /// Room this door leads to.
    pub fn target(&self) -> SceneNodeId {
        self.target
    }

    /// Room this door sits in.
    pub fn room(&self) -> SceneNodeId {
        self.room
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Move the tourist into the target room and hide the room it leaves.
    pub fn transport(&self, scene: &mut SceneGraph, tourist: &mut TouristController) -> TransportEvent {
        set_visibility(scene, self.target, true);

        let lift = Vec3::new(0.0, tourist.capsule_height() / 2.0, 0.0);
        let position = scene.world_position(self.target) + self.offset + lift;
        scene.set_world_position(tourist.body(), position);
        tourist.set_current_room(Some(self.target));

        let head_yaw = tourist.head_yaw();
        let euler = rotation::to_euler_degrees(scene.world_rotation(head_yaw));
        scene.set_world_rotation(
            head_yaw,
            rotation::from_euler_degrees(Vec3::new(euler.x, self.yaw, euler.z)),
        );

        // A door back into its own room must not hide the arrival
        if self.room != self.target {
            set_visibility(scene, self.room, false);
        }

        log::info!(
            "Transported from '{}' to '{}' via '{}'",
            scene.name(self.room),
            scene.name(self.target),
            scene.name(self.door)
        );

        TransportEvent { door: self.door, from: self.room, to: self.target }
    }
}

/// Show or hide a room. Renderers on reserved layers are left as they are.
pub fn set_visibility(scene: &mut SceneGraph, room: SceneNodeId, visible: bool) {
    for id in scene.subtree(room) {
        let reserved = scene.get(id).is_some_and(|node| node.layer.is_reserved());
        if !reserved {
            scene.set_renderer_enabled(id, visible);
        }
        scene.set_collider_enabled(id, visible);
    }
}

/// Whether every toggled component of a room is enabled.
pub fn is_visible(scene: &SceneGraph, room: SceneNodeId) -> bool {
    scene.subtree(room).into_iter().all(|id| {
        let Some(node) = scene.get(id) else {
            return true;
        };
        let renderer_on = node.layer.is_reserved() || node.renderer.is_none_or(|r| r.enabled);
        renderer_on && node.collider.is_none_or(|c| c.enabled)
    })
}

/// Whether every toggled component of a room is disabled.
pub fn is_hidden(scene: &SceneGraph, room: SceneNodeId) -> bool {
    scene.subtree(room).into_iter().all(|id| {
        let Some(node) = scene.get(id) else {
            return true;
        };
        let renderer_off = node.layer.is_reserved() || node.renderer.is_none_or(|r| !r.enabled);
        renderer_off && node.collider.is_none_or(|c| !c.enabled)
    })
}

/// A door needs a collider to be hit and a renderer to be highlighted.
fn require_components(scene: &SceneGraph, door: SceneNodeId) -> Result<()> {
    let node = scene
        .get(door)
        .ok_or_else(|| Error::MissingNode(format!("door node {door:?}")))?;
    let missing = |component| Error::MissingComponent { node: node.name.clone(), component };
    if node.collider.is_none() {
        return Err(missing("collider"));
    }
    if node.renderer.is_none() {
        return Err(missing("renderer"));
    }
    Ok(())
}

/// The room a door belongs to: the explicit `room` of its description, or the
/// ancestor two levels up (three under an `Entrances` group).
fn owning_room(scene: &SceneGraph, setup: &DoorSetup, rooms: &[SceneNodeId]) -> Result<SceneNodeId> {
    let door_name = scene.name(setup.node).to_string();
    let invalid = |found: String| Error::InvalidRoomParent { door: door_name.clone(), found };

    let candidate = match &setup.room {
        Some(name) => scene.find(name).ok_or_else(|| invalid(name.clone()))?,
        None => {
            let ancestor = scene
                .ancestor(setup.node, 2)
                .ok_or_else(|| invalid("<none>".to_string()))?;
            if scene.name(ancestor) == ENTRANCES_GROUP {
                scene
                    .parent(ancestor)
                    .ok_or_else(|| invalid(ENTRANCES_GROUP.to_string()))?
            } else {
                ancestor
            }
        }
    };

    if rooms.contains(&candidate) {
        Ok(candidate)
    } else {
        Err(invalid(scene.name(candidate).to_string()))
    }
}

/// Transporters keyed by their door node.
#[derive(Clone, Debug, Default)]
pub struct DoorRegistry {
    doors: HashMap<SceneNodeId, Transporter>,
}

impl DoorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transporter for every door setup.
    pub fn build(
        scene: &mut SceneGraph,
        setups: &[DoorSetup],
        rooms: &[SceneNodeId],
        hub: &HubConfig,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for setup in setups {
            registry.insert(Transporter::new(scene, setup, rooms, hub)?);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, transporter: Transporter) {
        self.doors.insert(transporter.door(), transporter);
    }

    pub fn get(&self, door: SceneNodeId) -> Option<&Transporter> {
        self.doors.get(&door)
    }

    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transporter> {
        self.doors.values()
    }
}
