//! Rotation helpers in the tour's axis convention: +Y up, +Z forward, +X right.
//! Euler angles are degrees applied yaw (Y), then pitch (X), then roll (Z).

use crate::core::types::{EulerRot, Mat3, Quat, Vec3};

/// World forward for an identity rotation.
pub const FORWARD: Vec3 = Vec3::Z;
/// World right for an identity rotation.
pub const RIGHT: Vec3 = Vec3::X;

/// Euler angles in degrees as (pitch, yaw, roll).
pub fn to_euler_degrees(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Inverse of [`to_euler_degrees`].
pub fn from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Yaw of a rotation in degrees, ignoring pitch and roll.
pub fn yaw_degrees(rotation: Quat) -> f32 {
    to_euler_degrees(rotation).y
}

/// Rotation about world up.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Rotation whose forward points along `direction` with `up` kept as close to
/// world up as possible. Returns `None` for a zero direction.
pub fn look_rotation(direction: Vec3, up: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    match up.cross(forward).try_normalize() {
        Some(right) => {
            let up = forward.cross(right);
            Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)).normalize())
        }
        // Looking straight up or down
        None => Some(Quat::from_rotation_arc(FORWARD, forward)),
    }
}
