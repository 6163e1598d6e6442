//! Core types and utilities shared by the scene, physics and tour modules

pub mod types;
pub mod error;
pub mod logging;
pub mod time;
pub mod input;

pub use types::*;
pub use error::Error;
