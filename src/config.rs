//! Tour tuning loaded from JSON. Every field has a default, so a config file
//! only needs the values it changes.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Movement tuning of the tourist controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Digital yaw step in degrees
    pub yaw_step: f32,
    /// Analog look speed multiplier
    pub look_speed: f32,
    /// Movement speed multiplier
    pub move_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            yaw_step: 30.0,
            look_speed: 0.5,
            move_speed: 0.7,
        }
    }
}

/// Where an unconfigured door sends the tourist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Name of the starting room
    pub room: String,
    /// Arrival offset from the hub origin
    pub arrival_offset: [f32; 3],
    /// Facing after arrival, degrees
    pub arrival_yaw: f32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            room: "Hub".to_string(),
            arrival_offset: [0.0, -0.6, 3.0],
            arrival_yaw: 180.0,
        }
    }
}

impl HubConfig {
    pub fn arrival_offset(&self) -> Vec3 {
        Vec3::from(self.arrival_offset)
    }
}

/// Full tour configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub movement: MovementConfig,
    pub hub: HubConfig,
    /// VR oversampling factor
    pub render_scale: f32,
    /// Laser pointer reach in world units
    pub pointer_range: f32,
    /// Downward acceleration applied to the tourist, units/s²
    pub gravity: f32,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            hub: HubConfig::default(),
            render_scale: 2.0,
            pointer_range: 30.0,
            gravity: 9.81,
        }
    }
}

impl TourConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the tour unusable.
    pub fn validate(&self) -> Result<()> {
        if self.hub.room.is_empty() {
            return Err(Error::Config("hub room name is empty".into()));
        }
        if !(self.render_scale > 0.0) {
            return Err(Error::Config(format!("render_scale must be positive, got {}", self.render_scale)));
        }
        if !(self.pointer_range > 0.0) {
            return Err(Error::Config(format!("pointer_range must be positive, got {}", self.pointer_range)));
        }
        Ok(())
    }
}
