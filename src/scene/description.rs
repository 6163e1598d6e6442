//! Scene descriptions authored as JSON and the loader that turns them into a
//! [`SceneGraph`] plus the node handles the tour needs.
//!
//! Rooms are laid out as
//!
//! ```text
//! <Room>
//!   <prop>...
//!   <doorway>            ordinary doorway
//!     <door>
//!   Entrances            only when a doorway is marked `entrance`
//!     <doorway>
//!       <door>
//! Tourist
//!   Head Yaw
//!     Head Pitch
//!       Camera
//!         Laser Pointer
//! ```
//!
//! which is the nesting the owning-room inference of doors expects.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::math::{rotation, Aabb};
use super::graph::SceneGraph;
use super::layer::Layer;
use super::node::{Collider, LocalTransform, Renderer, SceneNodeId};

/// Name of the grouping node that holds entrance doorways.
pub const ENTRANCES_GROUP: &str = "Entrances";

fn yes() -> bool {
    true
}

fn default_door_size() -> [f32; 3] {
    [1.0, 2.0, 0.1]
}

fn default_capsule_height() -> f32 {
    2.0
}

fn default_capsule_radius() -> f32 {
    0.5
}

fn default_pointer_offset() -> [f32; 3] {
    [0.15, -0.2, 0.1]
}

/// Whole scene file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDescription {
    pub rooms: Vec<RoomDesc>,
    #[serde(default)]
    pub tourist: TouristDesc,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoomDesc {
    pub name: String,
    /// World position of the room origin
    #[serde(default)]
    pub origin: [f32; 3],
    /// Room yaw in degrees
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub props: Vec<PropDesc>,
    #[serde(default)]
    pub doorways: Vec<DoorwayDesc>,
}

/// A box of room content: furniture, walls, floors, bounds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropDesc {
    pub name: String,
    /// Center, relative to the room origin
    #[serde(default)]
    pub position: [f32; 3],
    pub size: [f32; 3],
    #[serde(default)]
    pub layer: Layer,
    #[serde(default = "yes")]
    pub renderer: bool,
    #[serde(default = "yes")]
    pub collider: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoorwayDesc {
    pub name: String,
    /// Entrance doorways sit under the room's `Entrances` group.
    #[serde(default)]
    pub entrance: bool,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub doors: Vec<DoorDesc>,
}

/// A selectable door and where it sends the tourist.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoorDesc {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_door_size")]
    pub size: [f32; 3],
    /// Target room name; empty means the hub starting spot.
    #[serde(default)]
    pub target: String,
    /// Arrival point relative to the target room origin
    #[serde(default)]
    pub offset: [f32; 3],
    /// Facing after arrival, degrees
    #[serde(default)]
    pub yaw: f32,
    /// Owning room, when it should not be inferred from the nesting.
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TouristDesc {
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_capsule_height")]
    pub capsule_height: f32,
    #[serde(default = "default_capsule_radius")]
    pub capsule_radius: f32,
    /// Laser pointer origin relative to the camera
    #[serde(default = "default_pointer_offset")]
    pub pointer_offset: [f32; 3],
}

impl Default for TouristDesc {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            capsule_height: default_capsule_height(),
            capsule_radius: default_capsule_radius(),
            pointer_offset: default_pointer_offset(),
        }
    }
}

/// Door node plus the authored transport settings, handed to a transporter.
#[derive(Clone, Debug, PartialEq)]
pub struct DoorSetup {
    pub node: SceneNodeId,
    pub target: String,
    pub offset: Vec3,
    pub yaw: f32,
    pub room: Option<String>,
}

/// Capsule dimensions of the tourist's movement primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub height: f32,
    pub radius: f32,
}

/// Result of building a scene: the graph and the handles resolved while building it.
pub struct LoadedScene {
    pub graph: SceneGraph,
    pub rooms: Vec<SceneNodeId>,
    pub doors: Vec<DoorSetup>,
    pub tourist: SceneNodeId,
    pub capsule: Capsule,
}

impl SceneDescription {
    /// Load from file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Build the scene graph.
    pub fn build(&self) -> Result<LoadedScene> {
        let mut names = HashSet::new();
        for room in &self.rooms {
            if !names.insert(room.name.as_str()) {
                return Err(Error::Config(format!("duplicate room name '{}'", room.name)));
            }
        }
        if self.tourist.capsule_height <= 0.0 || self.tourist.capsule_radius <= 0.0 {
            return Err(Error::Config("tourist capsule must have positive size".into()));
        }

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut rooms = Vec::with_capacity(self.rooms.len());
        let mut doors = Vec::new();

        for room in &self.rooms {
            let room_id = graph.add_child(root, room.name.as_str(), Layer::DEFAULT);
            graph.set_transform(
                room_id,
                LocalTransform::from_position_rotation(
                    Vec3::from(room.origin),
                    rotation::yaw_rotation(room.yaw),
                ),
            );
            rooms.push(room_id);

            for prop in &room.props {
                add_prop(&mut graph, room_id, prop);
            }

            let mut entrances = None;
            for doorway in &room.doorways {
                let parent = if doorway.entrance {
                    *entrances.get_or_insert_with(|| {
                        graph.add_child(room_id, ENTRANCES_GROUP, Layer::DEFAULT)
                    })
                } else {
                    room_id
                };
                let doorway_id = graph.add_child(parent, doorway.name.as_str(), Layer::DEFAULT);
                graph.set_transform(
                    doorway_id,
                    LocalTransform::from_position_rotation(
                        Vec3::from(doorway.position),
                        rotation::yaw_rotation(doorway.yaw),
                    ),
                );

                for door in &doorway.doors {
                    doors.push(add_door(&mut graph, doorway_id, door));
                }
            }
        }

        let capsule = Capsule {
            height: self.tourist.capsule_height,
            radius: self.tourist.capsule_radius,
        };
        let tourist = add_tourist_rig(&mut graph, &self.tourist);

        log::info!(
            "Scene built: {} rooms, {} doors, {} nodes",
            rooms.len(),
            doors.len(),
            graph.node_count()
        );

        Ok(LoadedScene { graph, rooms, doors, tourist, capsule })
    }
}

fn add_prop(graph: &mut SceneGraph, room: SceneNodeId, prop: &PropDesc) -> SceneNodeId {
    let id = graph.add_child(room, prop.name.as_str(), prop.layer);
    graph.set_local_position(id, Vec3::from(prop.position));
    if prop.renderer {
        graph.set_renderer(id, Renderer { enabled: true });
    }
    if prop.collider {
        graph.set_collider(id, Collider::solid(Aabb::from_size(Vec3::from(prop.size))));
    }
    id
}

fn add_door(graph: &mut SceneGraph, doorway: SceneNodeId, door: &DoorDesc) -> DoorSetup {
    let id = graph.add_child(doorway, door.name.as_str(), Layer::TRANSPORT);
    graph.set_local_position(id, Vec3::from(door.position));
    // The renderer is the highlight, off until pointed at
    graph.set_renderer(id, Renderer { enabled: false });
    graph.set_collider(id, Collider::trigger(Aabb::from_size(Vec3::from(door.size))));

    DoorSetup {
        node: id,
        target: door.target.clone(),
        offset: Vec3::from(door.offset),
        yaw: door.yaw,
        room: door.room.clone(),
    }
}

fn add_tourist_rig(graph: &mut SceneGraph, desc: &TouristDesc) -> SceneNodeId {
    let root = graph.root();
    let tourist = graph.add_child(root, "Tourist", Layer::IGNORE_RAYCAST);
    graph.set_local_position(tourist, Vec3::from(desc.position));

    let head_yaw = graph.add_child(tourist, "Head Yaw", Layer::IGNORE_RAYCAST);
    graph.set_local_position(head_yaw, Vec3::new(0.0, desc.capsule_height / 2.0, 0.0));
    let head_pitch = graph.add_child(head_yaw, "Head Pitch", Layer::IGNORE_RAYCAST);
    let camera = graph.add_child(head_pitch, "Camera", Layer::IGNORE_RAYCAST);

    let pointer = graph.add_child(camera, "Laser Pointer", Layer::IGNORE_RAYCAST);
    graph.set_local_position(pointer, Vec3::from(desc.pointer_offset));
    graph.set_renderer(pointer, Renderer { enabled: true });
    graph.set_active(pointer, false);

    tourist
}
