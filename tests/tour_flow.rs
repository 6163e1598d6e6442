//! Frame-by-frame walkthroughs of the campus scene: visibility, pointing,
//! selection and room changes.

mod common;

use common::{CAMPUS, campus_tour, close, face, node, step, yaw_toward};
use dormtour::config::TourConfig;
use dormtour::core::input::{Button, InputState};
use dormtour::math::rotation;
use dormtour::scene::SceneDescription;
use dormtour::tour::transporter::{is_hidden, is_visible};
use dormtour::tour::{DesktopTracking, SelectionState, Tour};
use glam::Vec3;
use winit::keyboard::KeyCode;

#[test]
fn only_hub_is_visible_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campus.json");
    std::fs::write(&path, CAMPUS).unwrap();

    let scene = SceneDescription::load(&path).unwrap().build().unwrap();
    let tour = Tour::new(scene, TourConfig::default(), DesktopTracking::new()).unwrap();

    let hub = tour.room("Hub").unwrap();
    assert!(is_visible(tour.scene(), hub));
    for name in ["Library", "Gym"] {
        assert!(is_hidden(tour.scene(), tour.room(name).unwrap()), "{name} should start hidden");
    }
    assert_eq!(tour.current_room_name(), Some("Hub"));
    assert!(!tour.scene().is_active_in_hierarchy(tour.tourist().laser_pointer()));
}

#[test]
fn pointing_at_door_highlights_it() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let door = node(&tour, "To Library");

    input.press(Button::Point);
    let outcome = step(&mut tour, &mut input);

    assert_eq!(tour.tourist().selection(), SelectionState::PointingOnDoor(door));
    assert_eq!(tour.scene().renderer_enabled(door), Some(true));
    assert!(tour.scene().is_active_in_hierarchy(tour.tourist().laser_pointer()));
    let target = outcome.pointer_target.unwrap();
    assert!((target.z - 4.95).abs() < 1e-2);
    assert!(outcome.transported.is_none());

    // The laser pointer aims at the hit point
    let pointer = tour.tourist().laser_pointer();
    let aim = (target - tour.scene().world_position(pointer)).normalize();
    assert!(close(tour.scene().forward(pointer), aim));
}

#[test]
fn switching_doors_swaps_the_highlight() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let library_door = node(&tour, "To Library");
    let gym_door = node(&tour, "To Gym");

    input.press(Button::Point);
    step(&mut tour, &mut input);
    assert_eq!(tour.highlighted_door_name(), Some("To Library"));

    face(&mut tour, yaw_toward(3.0, 5.0), 0.0);
    step(&mut tour, &mut input);

    assert_eq!(tour.scene().renderer_enabled(library_door), Some(false));
    assert_eq!(tour.scene().renderer_enabled(gym_door), Some(true));
    assert_eq!(tour.tourist().selection(), SelectionState::PointingOnDoor(gym_door));
}

#[test]
fn releasing_point_clears_highlight_and_pointer() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let door = node(&tour, "To Library");

    input.press(Button::Point);
    step(&mut tour, &mut input);
    input.release(Button::Point);
    step(&mut tour, &mut input);

    assert_eq!(tour.scene().renderer_enabled(door), Some(false));
    assert_eq!(tour.tourist().selection(), SelectionState::Idle);
    assert!(!tour.scene().is_active_in_hierarchy(tour.tourist().laser_pointer()));
}

#[test]
fn selecting_a_door_transports_the_tourist() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    // Looking slightly down still hits the door
    face(&mut tour, 0.0, 10.0);

    input.press(Button::Point);
    step(&mut tour, &mut input);
    input.press(Button::Select);
    let outcome = step(&mut tour, &mut input);

    let library = tour.room("Library").unwrap();
    let hub = tour.room("Hub").unwrap();
    let event = outcome.transported.unwrap();
    assert_eq!(event.from, hub);
    assert_eq!(event.to, library);

    // Origin + offset + half the capsule height
    let body = tour.scene().world_position(tour.tourist().body());
    assert!(close(body, Vec3::new(51.0, 1.0, 2.0)));
    assert_eq!(tour.current_room_name(), Some("Library"));

    // Yaw replaced, head pitch untouched
    let camera = rotation::to_euler_degrees(tour.scene().world_rotation(tour.tourist().camera()));
    assert!((camera.y - 90.0).abs() < 1e-2);
    assert!((camera.x - 10.0).abs() < 1e-2);
    assert!(camera.z.abs() < 1e-2);

    assert!(is_visible(tour.scene(), library));
    assert!(is_hidden(tour.scene(), hub));
}

#[test]
fn room_offset_tracks_the_arrival_point() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let door = node(&tour, "To Gym");
    tour.transport_via(door).unwrap();

    step(&mut tour, &mut input);
    assert!(close(tour.tourist().room_tourist_offset(), Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn highlight_clears_once_the_old_room_is_hidden() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let door = node(&tour, "To Library");

    input.press(Button::Point);
    step(&mut tour, &mut input);
    input.press(Button::Select);
    step(&mut tour, &mut input);
    input.release(Button::Select);

    // Still pointing; the hub door is no longer hittable
    step(&mut tour, &mut input);
    assert_eq!(tour.scene().renderer_enabled(door), Some(false));
    assert_eq!(tour.tourist().highlighted_door(), None);
}

#[test]
fn empty_target_returns_to_hub_arrival() {
    let mut tour = campus_tour();
    tour.transport_via(node(&tour, "To Library")).unwrap();

    let back = node(&tour, "Back");
    let transporter = tour.doors().get(back).unwrap();
    assert_eq!(transporter.offset(), Vec3::new(0.0, -0.6, 3.0));
    assert_eq!(transporter.yaw(), 180.0);

    let event = tour.transport_via(back).unwrap();
    assert_eq!(event.to, tour.room("Hub").unwrap());
    let body = tour.scene().world_position(tour.tourist().body());
    assert!(close(body, Vec3::new(0.0, 0.4, 3.0)));
    // Yaw 180 faces back down -Z
    assert!(close(tour.scene().forward(tour.tourist().head_yaw()), Vec3::NEG_Z));
    assert!(is_hidden(tour.scene(), tour.room("Library").unwrap()));
}

#[test]
fn tourist_settles_on_hub_floor_after_returning() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    tour.transport_via(node(&tour, "To Library")).unwrap();
    tour.transport_via(node(&tour, "Back")).unwrap();

    // Hub arrival sinks the capsule 0.6 into the floor
    step(&mut tour, &mut input);
    assert!(tour.tourist().is_grounded());
    let settled = tour.scene().world_position(tour.tourist().body()).y;
    assert!((settled - 1.0).abs() < 0.01);

    for _ in 0..120 {
        step(&mut tour, &mut input);
    }
    assert!(tour.tourist().is_grounded());
    let body = tour.scene().world_position(tour.tourist().body());
    assert!((body.y - settled).abs() < 1e-4);
    assert!((body.z - 3.0).abs() < 1e-3);
}

#[test]
fn tourist_stays_grounded_after_arriving_in_a_room() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    tour.transport_via(node(&tour, "To Gym")).unwrap();

    for _ in 0..120 {
        step(&mut tour, &mut input);
    }
    assert!(tour.tourist().is_grounded());
    let body = tour.scene().world_position(tour.tourist().body());
    assert!((body.y - 1.0).abs() < 0.01);
    assert!((body.x + 50.0).abs() < 1e-3);

    // And can still walk on the new floor
    input.press_key(KeyCode::KeyW);
    for _ in 0..30 {
        step(&mut tour, &mut input);
    }
    assert!(tour.tourist().is_grounded());
    assert!((tour.scene().world_position(tour.tourist().body()).y - 1.0).abs() < 0.01);
}

#[test]
fn select_without_a_door_does_nothing() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    face(&mut tour, 180.0, 0.0);

    input.press(Button::Point);
    step(&mut tour, &mut input);
    input.press(Button::Select);
    let outcome = step(&mut tour, &mut input);

    assert!(outcome.transported.is_none());
    assert_eq!(tour.current_room_name(), Some("Hub"));
    assert_eq!(tour.tourist().selection(), SelectionState::PointingNoHit);
    assert!(is_visible(tour.scene(), tour.room("Hub").unwrap()));
}

#[test]
fn select_without_pointing_does_nothing() {
    let mut tour = campus_tour();
    let mut input = InputState::new();

    input.press(Button::Select);
    let outcome = step(&mut tour, &mut input);

    assert!(outcome.transported.is_none());
    assert_eq!(tour.tourist().selection(), SelectionState::Idle);
    assert_eq!(tour.current_room_name(), Some("Hub"));
}

#[test]
fn miss_aims_pointer_at_bounds() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    face(&mut tour, 180.0, 0.0);

    input.press(Button::Point);
    let outcome = step(&mut tour, &mut input);

    // The first pass ignores bounds, the fallback pass finds them
    let target = outcome.pointer_target.unwrap();
    assert!((target.z + 8.95).abs() < 1e-2);
    assert_eq!(tour.tourist().highlighted_door(), None);
}

#[test]
fn furniture_in_the_way_is_not_a_door() {
    let mut tour = campus_tour();
    let mut input = InputState::new();

    input.press(Button::Point);
    step(&mut tour, &mut input);
    assert!(tour.tourist().highlighted_door().is_some());

    face(&mut tour, yaw_toward(-3.0, 4.0), 0.0);
    let outcome = step(&mut tour, &mut input);

    assert_eq!(tour.tourist().highlighted_door(), None);
    assert_eq!(tour.scene().renderer_enabled(node(&tour, "To Library")), Some(false));
    assert_eq!(tour.tourist().selection(), SelectionState::PointingNoHit);
    assert!(outcome.pointer_target.is_some());
}

#[test]
fn digital_yaw_steps_once_per_press() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    let head_yaw = tour.tourist().head_yaw();
    let yaw = |tour: &Tour| rotation::yaw_degrees(tour.scene().world_rotation(head_yaw));

    input.press_key(KeyCode::KeyE);
    for _ in 0..10 {
        step(&mut tour, &mut input);
    }
    assert!((yaw(&tour) - 30.0).abs() < 1e-2);

    input.release_key(KeyCode::KeyE);
    step(&mut tour, &mut input);
    input.press_key(KeyCode::KeyE);
    step(&mut tour, &mut input);
    assert!((yaw(&tour) - 60.0).abs() < 1e-2);

    input.release_key(KeyCode::KeyE);
    step(&mut tour, &mut input);
    input.press_key(KeyCode::KeyQ);
    step(&mut tour, &mut input);
    assert!((yaw(&tour) - 30.0).abs() < 1e-2);
}

#[test]
fn walking_forward_follows_the_view() {
    let mut tour = campus_tour();
    let mut input = InputState::new();
    face(&mut tour, -90.0, 30.0);

    input.press_key(KeyCode::KeyW);
    for _ in 0..60 {
        step(&mut tour, &mut input);
    }

    let body = tour.scene().world_position(tour.tourist().body());
    assert!((body.x + 0.7).abs() < 1e-2);
    assert!(body.z.abs() < 1e-3);
    assert!(tour.tourist().is_grounded());
}

#[test]
fn unknown_target_fails_startup() {
    let json = CAMPUS.replace(r#""target": "Gym""#, r#""target": "Pool""#);
    let scene = SceneDescription::from_json(&json).unwrap().build().unwrap();
    let result = Tour::new(scene, TourConfig::default(), DesktopTracking::new());
    assert!(matches!(result, Err(dormtour::core::Error::RoomNotFound(name)) if name == "Pool"));
}
