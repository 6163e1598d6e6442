//! The tourist: head rig, movement, and door pointing.

use glam::{Quat, Vec2, Vec3};

use crate::config::{MovementConfig, TourConfig};
use crate::core::input::{Axis, Button, InputState};
use crate::core::{Error, Result};
use crate::math::{Ray, rotation};
use crate::physics::{CharacterController, PhysicsQuery};
use crate::scene::{Capsule, LayerMask, SceneGraph, SceneNodeId};

use super::selection::{DoorSelector, SelectionState};
use super::tracking::Tracking;
use super::transporter::{DoorRegistry, TransportEvent};

/// Nodes of the tourist rig, resolved once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouristRig {
    pub body: SceneNodeId,
    pub head_yaw: SceneNodeId,
    pub head_pitch: SceneNodeId,
    pub camera: SceneNodeId,
    pub laser_pointer: SceneNodeId,
}

impl TouristRig {
    /// Follow the first child from `body` down: head yaw, head pitch, camera,
    /// laser pointer.
    pub fn resolve(scene: &SceneGraph, body: SceneNodeId) -> Result<Self> {
        let first_child = |parent: SceneNodeId, what: &str| {
            scene.child(parent, 0).ok_or_else(|| {
                Error::MissingNode(format!("{what} under '{}'", scene.name(parent)))
            })
        };
        if scene.get(body).is_none() {
            return Err(Error::MissingNode("tourist body".into()));
        }
        let head_yaw = first_child(body, "head yaw")?;
        let head_pitch = first_child(head_yaw, "head pitch")?;
        let camera = first_child(head_pitch, "camera")?;
        let laser_pointer = first_child(camera, "laser pointer")?;
        Ok(Self { body, head_yaw, head_pitch, camera, laser_pointer })
    }
}

/// Services the tourist reads or drives during a frame.
pub struct FrameContext<'a> {
    pub scene: &'a mut SceneGraph,
    pub physics: &'a dyn PhysicsQuery,
    pub tracking: &'a mut dyn Tracking,
    pub doors: &'a DoorRegistry,
}

/// What happened during one tourist update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub transported: Option<TransportEvent>,
    /// Where the laser pointer is aimed, if it hit anything
    pub pointer_target: Option<Vec3>,
    pub grounded: bool,
}

pub struct TouristController {
    rig: TouristRig,
    character: CharacterController,
    /// Movement tuning, adjustable at runtime
    pub movement: MovementConfig,
    pointer_range: f32,
    selector: DoorSelector,
    yaw_axis_pushed: bool,
    room: Option<SceneNodeId>,
    room_tourist_offset: Vec3,
}

impl TouristController {
    /// Resolve the rig under `body`, configure tracking, and start in the hub
    /// room if the scene has one.
    pub fn new(
        scene: &SceneGraph,
        body: SceneNodeId,
        capsule: Capsule,
        config: &TourConfig,
        tracking: &mut dyn Tracking,
    ) -> Result<Self> {
        let rig = TouristRig::resolve(scene, body)?;
        tracking.set_render_scale(config.render_scale);

        let room = scene.find(&config.hub.room);
        if room.is_none() {
            log::warn!("No '{}' room, tourist starts without a current room", config.hub.room);
        }

        Ok(Self {
            rig,
            character: CharacterController::new(capsule, config.gravity),
            movement: config.movement.clone(),
            pointer_range: config.pointer_range,
            selector: DoorSelector::new(),
            yaw_axis_pushed: false,
            room,
            room_tourist_offset: Vec3::ZERO,
        })
    }

    pub fn rig(&self) -> &TouristRig {
        &self.rig
    }

    pub fn body(&self) -> SceneNodeId {
        self.rig.body
    }

    pub fn head_yaw(&self) -> SceneNodeId {
        self.rig.head_yaw
    }

    pub fn head_pitch(&self) -> SceneNodeId {
        self.rig.head_pitch
    }

    pub fn camera(&self) -> SceneNodeId {
        self.rig.camera
    }

    pub fn laser_pointer(&self) -> SceneNodeId {
        self.rig.laser_pointer
    }

    pub fn capsule_height(&self) -> f32 {
        self.character.height()
    }

    pub fn current_room(&self) -> Option<SceneNodeId> {
        self.room
    }

    /// Replace the current room. Called by transporters mid-transport.
    pub fn set_current_room(&mut self, room: Option<SceneNodeId>) {
        self.room = room;
    }

    /// Feet position relative to the current room origin, as of the last update.
    pub fn room_tourist_offset(&self) -> Vec3 {
        self.room_tourist_offset
    }

    pub fn selection(&self) -> SelectionState {
        self.selector.state()
    }

    pub fn highlighted_door(&self) -> Option<SceneNodeId> {
        self.selector.highlighted()
    }

    pub fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }

    fn lift(&self) -> Vec3 {
        Vec3::new(0.0, self.capsule_height() / 2.0, 0.0)
    }

    /// Run one frame of tourist behavior.
    pub fn update(&mut self, dt: f32, input: &InputState, ctx: FrameContext<'_>) -> FrameOutcome {
        let FrameContext { scene, physics, tracking, doors } = ctx;
        let mut outcome = FrameOutcome::default();

        if let Some(room) = self.room {
            self.room_tourist_offset =
                scene.world_position(self.rig.body) - scene.world_position(room) - self.lift();
        }

        if input.is_button_just_pressed(Button::Reset) {
            self.recenter(scene, tracking, true);
        }

        if !tracking.is_enabled() {
            self.apply_look(scene, input);
        }
        self.apply_digital_yaw(scene, tracking, input);
        outcome.grounded = self.apply_movement(scene, input, dt);

        if input.is_button_just_pressed(Button::Point) {
            scene.set_active(self.rig.laser_pointer, true);
            log::debug!("Laser pointer on");
        }
        if input.is_button_down(Button::Point) {
            let (target, transported) = self.point(scene, physics, doors, input);
            outcome.pointer_target = target;
            outcome.transported = transported;
        }
        if input.is_button_just_released(Button::Point) {
            self.selector.stop_pointing(scene);
            scene.set_active(self.rig.laser_pointer, false);
            log::debug!("Laser pointer off");
        }

        outcome
    }

    fn apply_look(&self, scene: &mut SceneGraph, input: &InputState) {
        let yaw = input.axis(Axis::XLook) * self.movement.look_speed;
        let pitch = -(input.axis(Axis::YLook) * self.movement.look_speed);
        if yaw != 0.0 {
            let pivot = scene.world_position(self.rig.camera);
            scene.rotate_around(self.rig.head_yaw, pivot, Vec3::Y, yaw);
        }
        if pitch != 0.0 {
            scene.rotate_local(self.rig.head_pitch, Quat::from_rotation_x(pitch.to_radians()));
        }
    }

    fn apply_digital_yaw(&mut self, scene: &mut SceneGraph, tracking: &mut dyn Tracking, input: &InputState) {
        let value = input.axis(Axis::DigitalYaw);
        if self.yaw_axis_pushed {
            if value == 0.0 {
                self.yaw_axis_pushed = false;
            }
            return;
        }
        if value != 0.0 {
            self.recenter(scene, tracking, false);
            let pivot = scene.world_position(self.rig.camera);
            scene.rotate_around(self.rig.head_yaw, pivot, Vec3::Y, self.movement.yaw_step * value);
            self.yaw_axis_pushed = true;
        }
    }

    fn apply_movement(&mut self, scene: &mut SceneGraph, input: &InputState, dt: f32) -> bool {
        let stick = Vec2::new(input.axis(Axis::XMove), input.axis(Axis::YMove)).normalize_or_zero()
            * self.movement.move_speed;
        let facing = rotation::yaw_rotation(rotation::yaw_degrees(scene.world_rotation(self.rig.camera)));
        let velocity = facing * rotation::FORWARD * stick.y + facing * rotation::RIGHT * stick.x;
        self.character.simple_move(scene, self.rig.body, velocity, dt)
    }

    /// Cast the pointer ray, update the highlight and fire the door on select.
    fn point(
        &mut self,
        scene: &mut SceneGraph,
        physics: &dyn PhysicsQuery,
        doors: &DoorRegistry,
        input: &InputState,
    ) -> (Option<Vec3>, Option<TransportEvent>) {
        let ray = Ray::new(scene.world_position(self.rig.camera), scene.forward(self.rig.camera));
        let hit = physics.raycast(scene, &ray, self.pointer_range, LayerMask::door_query());

        let door_hit = hit.and_then(|hit| doors.get(hit.node).map(|door| (hit, door)));
        if let Some((hit, door)) = door_hit {
            scene.look_at(self.rig.laser_pointer, hit.point);
            self.selector.point_at_door(scene, hit.node);
            let transported = if input.is_button_just_pressed(Button::Select) {
                Some(door.transport(scene, self))
            } else {
                None
            };
            return (Some(hit.point), transported);
        }

        if let Some(hit) = hit {
            log::warn!("Pointer blocked by '{}', not a door", scene.name(hit.node));
        }
        self.selector.point_at_nothing(scene);

        let fallback = physics.raycast(scene, &ray, self.pointer_range, LayerMask::bounds_query());
        if let Some(hit) = fallback {
            scene.look_at(self.rig.laser_pointer, hit.point);
        }
        (fallback.map(|hit| hit.point), None)
    }

    /// Full: put the head back above the body and, in VR, recenter tracking.
    /// Partial: slide the head in X/Z so the camera is above the body again.
    pub fn recenter(&self, scene: &mut SceneGraph, tracking: &mut dyn Tracking, full: bool) {
        if full {
            scene.set_local_position(self.rig.head_yaw, self.lift());
            if tracking.is_enabled() {
                tracking.recenter();
            }
            log::debug!("Full recenter");
        } else {
            let body = scene.world_position(self.rig.body);
            let camera = scene.world_position(self.rig.camera);
            scene.translate_world(self.rig.head_yaw, Vec3::new(body.x - camera.x, 0.0, body.z - camera.z));
        }
    }
}
