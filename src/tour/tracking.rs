//! VR tracking service.
//!
//! While tracking is enabled the camera node's local pose belongs to the
//! headset: the tour copies [`Tracking::head_pose`] into it at the start of
//! every frame and never writes it otherwise.

use glam::{Quat, Vec3};

use crate::math::rotation;

/// Tracked head pose relative to the tracking origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for HeadPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

pub trait Tracking {
    /// Whether a headset is driving the camera.
    fn is_enabled(&self) -> bool;

    /// Eye-buffer oversampling factor.
    fn set_render_scale(&mut self, scale: f32);

    fn render_scale(&self) -> f32;

    /// Make the current head position and facing the new tracking origin.
    fn recenter(&mut self);

    /// Latest pose, `None` while disabled.
    fn head_pose(&self) -> Option<HeadPose>;
}

/// No headset: mouse look drives the head nodes.
#[derive(Clone, Debug)]
pub struct DesktopTracking {
    render_scale: f32,
}

impl DesktopTracking {
    pub fn new() -> Self {
        Self { render_scale: 1.0 }
    }
}

impl Default for DesktopTracking {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracking for DesktopTracking {
    fn is_enabled(&self) -> bool {
        false
    }

    fn set_render_scale(&mut self, scale: f32) {
        self.render_scale = scale;
    }

    fn render_scale(&self) -> f32 {
        self.render_scale
    }

    fn recenter(&mut self) {}

    fn head_pose(&self) -> Option<HeadPose> {
        None
    }
}

/// Headset stand-in with a pose set by the caller.
#[derive(Clone, Debug)]
pub struct SimulatedHeadset {
    raw: HeadPose,
    center_position: Vec3,
    center_yaw: f32,
    render_scale: f32,
    recenter_count: u32,
}

impl SimulatedHeadset {
    pub fn new() -> Self {
        Self {
            raw: HeadPose::default(),
            center_position: Vec3::ZERO,
            center_yaw: 0.0,
            render_scale: 1.0,
            recenter_count: 0,
        }
    }

    /// Pose as the device reports it, before recentering.
    pub fn set_raw_pose(&mut self, pose: HeadPose) {
        self.raw = pose;
    }

    pub fn recenter_count(&self) -> u32 {
        self.recenter_count
    }
}

impl Default for SimulatedHeadset {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracking for SimulatedHeadset {
    fn is_enabled(&self) -> bool {
        true
    }

    fn set_render_scale(&mut self, scale: f32) {
        self.render_scale = scale;
    }

    fn render_scale(&self) -> f32 {
        self.render_scale
    }

    fn recenter(&mut self) {
        self.center_position = self.raw.position;
        self.center_yaw = rotation::yaw_degrees(self.raw.rotation);
        self.recenter_count += 1;
        log::debug!(
            "Tracking recentered at {:?}, yaw {:.1}",
            self.center_position,
            self.center_yaw
        );
    }

    fn head_pose(&self) -> Option<HeadPose> {
        let undo_yaw = rotation::yaw_rotation(-self.center_yaw);
        Some(HeadPose {
            position: undo_yaw * (self.raw.position - self.center_position),
            rotation: (undo_yaw * self.raw.rotation).normalize(),
        })
    }
}
