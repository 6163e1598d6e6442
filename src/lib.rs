//! Dormtour - a room-by-room walkthrough of a building
//!
//! Rooms are subtrees of a [`scene::SceneGraph`]; only the room the tourist
//! stands in is shown. Doors carry a [`tour::Transporter`] that moves the
//! tourist into another room, and the [`tour::TouristController`] turns
//! look, movement and pointer input into head motion, capsule movement and
//! door selection.

pub mod config;
pub mod core;
pub mod math;
pub mod physics;
pub mod scene;
pub mod tour;
