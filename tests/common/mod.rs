//! Shared campus scene and frame helpers for the integration tests.

#![allow(dead_code)]

use dormtour::config::TourConfig;
use dormtour::core::input::InputState;
use dormtour::math::rotation;
use dormtour::scene::{SceneDescription, SceneNodeId};
use dormtour::tour::{DesktopTracking, FrameOutcome, Tour, Tracking};
use glam::{Quat, Vec3};

pub const DT: f32 = 1.0 / 60.0;

/// Hub with two entrance doors and a statue, plus a library and a gym.
///
/// The tourist spawns at the hub origin with the camera at y = 2, looking
/// down +Z at the library door (x = 0, z = 5). The gym door sits at x = 3,
/// z = 5 and the statue at x = -3, z = 4.
pub const CAMPUS: &str = r#"{
    "rooms": [
        {
            "name": "Hub",
            "props": [
                { "name": "Floor", "position": [0, -0.5, 0], "size": [30, 1, 30] },
                { "name": "Statue", "position": [-3, 2, 4], "size": [1, 1, 1] },
                { "name": "North Bounds", "position": [0, 2, -9], "size": [20, 4, 0.1], "layer": 9, "renderer": false }
            ],
            "doorways": [
                { "name": "Library Entrance", "entrance": true, "position": [0, 2, 5],
                  "doors": [ { "name": "To Library", "target": "Library", "offset": [1, 0, 2], "yaw": 90 } ] },
                { "name": "Gym Entrance", "entrance": true, "position": [3, 2, 5],
                  "doors": [ { "name": "To Gym", "target": "Gym", "offset": [0, 0, 1], "yaw": -90 } ] }
            ]
        },
        {
            "name": "Library",
            "origin": [50, 0, 0],
            "props": [
                { "name": "Floor", "position": [0, -0.5, 0], "size": [20, 1, 20] },
                { "name": "Shelf", "position": [-4, 1, 0], "size": [1, 2, 4] }
            ],
            "doorways": [
                { "name": "Exit", "position": [0, 2, -5], "doors": [ { "name": "Back", "target": "" } ] }
            ]
        },
        {
            "name": "Gym",
            "origin": [-50, 0, 0],
            "props": [
                { "name": "Floor", "position": [0, -0.5, 0], "size": [20, 1, 20] }
            ],
            "doorways": [
                { "name": "Exit", "position": [0, 2, -5],
                  "doors": [ { "name": "Back To Hub", "target": "Hub", "offset": [0, 0, -2], "yaw": 0 } ] }
            ]
        }
    ],
    "tourist": { "position": [0, 1, 0] }
}"#;

pub fn campus_tour_with<T: Tracking>(tracking: T) -> Tour<T> {
    let scene = SceneDescription::from_json(CAMPUS).unwrap().build().unwrap();
    Tour::new(scene, TourConfig::default(), tracking).unwrap()
}

pub fn campus_tour() -> Tour {
    campus_tour_with(DesktopTracking::new())
}

/// Run one frame and clear the input edges, as a window loop would.
pub fn step<T: Tracking>(tour: &mut Tour<T>, input: &mut InputState) -> FrameOutcome {
    let outcome = tour.update(DT, input);
    input.end_frame();
    outcome
}

/// Turn the tourist's head to a world yaw and pitch, in degrees.
pub fn face<T: Tracking>(tour: &mut Tour<T>, yaw: f32, pitch: f32) {
    let head_yaw = tour.tourist().head_yaw();
    let head_pitch = tour.tourist().head_pitch();
    tour.scene_mut().set_local_rotation(head_yaw, rotation::yaw_rotation(yaw));
    tour.scene_mut()
        .set_local_rotation(head_pitch, Quat::from_rotation_x(pitch.to_radians()));
}

/// Yaw in degrees that points the camera from the hub spawn at `(x, z)`.
pub fn yaw_toward(x: f32, z: f32) -> f32 {
    x.atan2(z).to_degrees()
}

pub fn node<T: Tracking>(tour: &Tour<T>, name: &str) -> SceneNodeId {
    tour.scene().find(name).unwrap()
}

pub fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-3
}
