//! Error types for the tour

use thiserror::Error;

/// Main error type for the tour.
///
/// Everything here is an authoring or setup failure surfaced while loading a
/// scene or initializing components. Nothing is raised from the per-frame path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Door '{door}' resolved to '{found}', which is not a room")]
    InvalidRoomParent { door: String, found: String },

    #[error("Missing node: {0}")]
    MissingNode(String),

    #[error("Node '{node}' has no {component}")]
    MissingComponent { node: String, component: &'static str },

    #[error("Config error: {0}")]
    Config(String),
}
