//! Scene graph, layers, and scene loading

pub mod description;
pub mod graph;
pub mod layer;
pub mod node;

pub use description::{Capsule, DoorSetup, LoadedScene, SceneDescription};
pub use graph::SceneGraph;
pub use layer::{Layer, LayerMask};
pub use node::{Collider, LocalTransform, Renderer, SceneNode, SceneNodeId};
