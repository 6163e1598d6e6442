//! Walkthrough runtime: rooms, doors, and the tourist moving between them.
//!
//! [`Tour`] owns the scene and every behavior attached to it and is driven
//! by the caller once per frame:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use dormtour::config::TourConfig;
//! use dormtour::core::input::InputState;
//! use dormtour::scene::SceneDescription;
//! use dormtour::tour::{DesktopTracking, Tour};
//!
//! let scene = SceneDescription::load(Path::new("campus.json"))?.build()?;
//! let mut tour = Tour::new(scene, TourConfig::default(), DesktopTracking::new())?;
//! let mut input = InputState::new();
//! loop {
//!     tour.update(1.0 / 60.0, &input);
//!     input.end_frame();
//! #   break;
//! }
//! # Ok::<(), dormtour::core::Error>(())
//! ```

pub mod selection;
pub mod tourist;
pub mod tracking;
pub mod transporter;

pub use selection::{DoorSelector, HighlightChange, SelectionState};
pub use tourist::{FrameContext, FrameOutcome, TouristController, TouristRig};
pub use tracking::{DesktopTracking, HeadPose, SimulatedHeadset, Tracking};
pub use transporter::{DoorRegistry, TransportEvent, Transporter};

use crate::config::TourConfig;
use crate::core::Result;
use crate::core::input::InputState;
use crate::physics::{ColliderRaycaster, PhysicsQuery};
use crate::scene::{LoadedScene, LocalTransform, SceneGraph, SceneNodeId};

/// A loaded scene with its doors and tourist, ready to run.
pub struct Tour<T: Tracking = DesktopTracking> {
    scene: SceneGraph,
    rooms: Vec<SceneNodeId>,
    doors: DoorRegistry,
    tourist: TouristController,
    physics: Box<dyn PhysicsQuery>,
    tracking: T,
    config: TourConfig,
}

impl<T: Tracking> Tour<T> {
    /// Wire up transporters and the tourist. Every room except the hub ends
    /// up hidden.
    pub fn new(loaded: LoadedScene, config: TourConfig, mut tracking: T) -> Result<Self> {
        config.validate()?;
        let LoadedScene { graph: mut scene, rooms, doors, tourist, capsule } = loaded;

        let doors = DoorRegistry::build(&mut scene, &doors, &rooms, &config.hub)?;
        // Rooms without doors get no transporter to hide them
        for &room in &rooms {
            if scene.name(room) != config.hub.room {
                transporter::set_visibility(&mut scene, room, false);
            }
        }
        let tourist = TouristController::new(&scene, tourist, capsule, &config, &mut tracking)?;

        log::info!(
            "Tour ready: {} rooms, {} doors, starting in '{}'",
            rooms.len(),
            doors.len(),
            tourist.current_room().map_or("<none>", |room| scene.name(room))
        );

        Ok(Self {
            scene,
            rooms,
            doors,
            tourist,
            physics: Box::new(ColliderRaycaster),
            tracking,
            config,
        })
    }

    /// Replace the physics query used for pointing.
    pub fn with_physics(mut self, physics: Box<dyn PhysicsQuery>) -> Self {
        self.physics = physics;
        self
    }

    /// Advance one frame. With tracking enabled the head pose is copied into
    /// the camera first.
    pub fn update(&mut self, dt: f32, input: &InputState) -> FrameOutcome {
        if let Some(pose) = self.tracking.head_pose() {
            self.scene.set_transform(
                self.tourist.camera(),
                LocalTransform::from_position_rotation(pose.position, pose.rotation),
            );
        }

        self.tourist.update(
            dt,
            input,
            FrameContext {
                scene: &mut self.scene,
                physics: self.physics.as_ref(),
                tracking: &mut self.tracking,
                doors: &self.doors,
            },
        )
    }

    /// Fire a door directly, as if it had been selected.
    pub fn transport_via(&mut self, door: SceneNodeId) -> Option<TransportEvent> {
        let transporter = self.doors.get(door)?;
        Some(transporter.transport(&mut self.scene, &mut self.tourist))
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn tourist(&self) -> &TouristController {
        &self.tourist
    }

    pub fn tourist_mut(&mut self) -> &mut TouristController {
        &mut self.tourist
    }

    pub fn doors(&self) -> &DoorRegistry {
        &self.doors
    }

    pub fn rooms(&self) -> &[SceneNodeId] {
        &self.rooms
    }

    pub fn tracking(&self) -> &T {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        &mut self.tracking
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Room node with this name, if it is one of the tour's rooms.
    pub fn room(&self, name: &str) -> Option<SceneNodeId> {
        self.rooms.iter().copied().find(|&room| self.scene.name(room) == name)
    }

    /// Name of the tourist's current room.
    pub fn current_room_name(&self) -> Option<&str> {
        self.tourist.current_room().map(|room| self.scene.name(room))
    }

    /// Name of the highlighted door.
    pub fn highlighted_door_name(&self) -> Option<&str> {
        self.tourist.highlighted_door().map(|door| self.scene.name(door))
    }

    /// Whether a room is shown.
    pub fn is_room_visible(&self, room: SceneNodeId) -> bool {
        transporter::is_visible(&self.scene, room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Button;
    use crate::math::Ray;
    use crate::physics::RaycastHit;
    use crate::scene::{LayerMask, SceneDescription};

    /// Reports the same door under the pointer whatever the ray.
    struct FixedHit(SceneNodeId);

    impl PhysicsQuery for FixedHit {
        fn raycast(&self, _: &SceneGraph, ray: &Ray, _: f32, _: LayerMask) -> Option<RaycastHit> {
            Some(RaycastHit { node: self.0, point: ray.origin + ray.direction, distance: 1.0 })
        }
    }

    const SCENE: &str = r#"{
        "rooms": [
            { "name": "Hub", "props": [ { "name": "Floor", "position": [0, -0.5, 0], "size": [20, 1, 20] } ],
              "doorways": [ { "name": "Gym Entrance", "entrance": true, "position": [0, 1, 5],
                              "doors": [ { "name": "Gym Door", "target": "Gym" } ] } ] },
            { "name": "Gym", "origin": [100, 0, 0],
              "props": [ { "name": "Floor", "position": [0, -0.5, 0], "size": [20, 1, 20] } ],
              "doorways": [ { "name": "Exit", "position": [0, 1, -5], "doors": [ { "name": "Hub Door" } ] } ] },
            { "name": "Closet", "origin": [0, 0, 200],
              "props": [ { "name": "Box", "position": [0, 0.5, 0], "size": [1, 1, 1] } ] }
        ],
        "tourist": { "position": [0, 1, 0] }
    }"#;

    fn tour() -> Tour {
        let loaded = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        Tour::new(loaded, TourConfig::default(), DesktopTracking::new()).unwrap()
    }

    #[test]
    fn test_only_hub_visible_at_start() {
        let tour = tour();
        let hub = tour.room("Hub").unwrap();
        let gym = tour.room("Gym").unwrap();
        assert!(tour.is_room_visible(hub));
        assert!(transporter::is_hidden(tour.scene(), gym));
        assert_eq!(tour.current_room_name(), Some("Hub"));
        assert_eq!(tour.doors().len(), 2);
    }

    #[test]
    fn test_doorless_room_hidden_at_start() {
        let tour = tour();
        let closet = tour.room("Closet").unwrap();
        assert!(transporter::is_hidden(tour.scene(), closet));
        assert_eq!(tour.scene().renderer_enabled(tour.scene().find("Box").unwrap()), Some(false));
    }

    #[test]
    fn test_custom_physics_drives_pointing() {
        let tour = tour();
        let door = tour.scene().find("Gym Door").unwrap();
        let mut tour = tour.with_physics(Box::new(FixedHit(door)));
        let mut input = InputState::new();

        // Looking away from the door, the injected query still reports it
        input.press(Button::Point);
        tour.update(1.0 / 60.0, &input);
        input.end_frame();
        assert_eq!(tour.highlighted_door_name(), Some("Gym Door"));

        input.press(Button::Select);
        let outcome = tour.update(1.0 / 60.0, &input);
        assert_eq!(outcome.transported.map(|event| event.door), Some(door));
        assert_eq!(tour.current_room_name(), Some("Gym"));
    }

    #[test]
    fn test_transport_via_door() {
        let mut tour = tour();
        let door = tour.scene().find("Gym Door").unwrap();
        let event = tour.transport_via(door).unwrap();
        assert_eq!(event.to, tour.room("Gym").unwrap());
        assert_eq!(tour.current_room_name(), Some("Gym"));
        assert!(!tour.is_room_visible(tour.room("Hub").unwrap()));

        // Not a door
        let floor = tour.scene().find("Floor").unwrap();
        assert!(tour.transport_via(floor).is_none());
    }

    #[test]
    fn test_render_scale_configured() {
        let tour = tour();
        assert_eq!(tour.tracking().render_scale(), 2.0);
    }
}
