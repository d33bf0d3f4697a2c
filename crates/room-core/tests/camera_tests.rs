// Host-side tests for viewport breakpoints and the damped orbit.

mod common;

use common::*;
use glam::Vec3;
use room_core::constants::*;
use room_core::*;

fn settle(controls: &mut OrbitControls, camera: &mut Camera) {
    for _ in 0..400 {
        controls.update(camera);
    }
}

#[test]
fn narrow_viewport_starts_on_the_mobile_pose() {
    let phone = Viewport::new(375.0, 667.0, 3.0);
    assert_eq!(phone.layout(), LayoutClass::Mobile);
    let camera = Camera::new(&phone);
    assert_eq!(camera.position, MOBILE_CAMERA_POSITION);
    assert_eq!(camera.target, MOBILE_CAMERA_TARGET);

    let camera = Camera::new(&desktop());
    assert_eq!(camera.position, DESKTOP_CAMERA_POSITION);
    assert_eq!(camera.target, DESKTOP_CAMERA_TARGET);
    assert!((camera.fov_y - 35f32.to_radians()).abs() < 1e-6);
}

#[test]
fn breakpoint_is_exclusive() {
    assert_eq!(LayoutClass::for_width(767.0), LayoutClass::Mobile);
    assert_eq!(LayoutClass::for_width(768.0), LayoutClass::Desktop);
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(Viewport::new(375.0, 667.0, 3.0).physical_size(), (750, 1334));
    assert_eq!(Viewport::new(800.0, 600.0, 0.5).pixel_ratio(), 1.0);
    assert_eq!(Viewport::new(0.0, 0.0, 1.0).physical_size(), (1, 1));
    assert_eq!(Viewport::new(100.0, 0.0, 1.0).aspect(), 1.0);
}

#[test]
fn crossing_the_breakpoint_resets_the_pose() {
    let mut room = Room::new(RoomParams::default(), desktop());
    room.camera.position = Vec3::new(1.0, 2.0, 3.0);

    let mut effects = Vec::new();
    room.resize(Viewport::new(1280.0, 720.0, 1.0), &mut effects);
    assert_eq!(room.camera.position, Vec3::new(1.0, 2.0, 3.0));
    assert!((room.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);

    room.resize(Viewport::new(375.0, 667.0, 2.0), &mut effects);
    assert_eq!(room.camera.position, MOBILE_CAMERA_POSITION);
    assert_eq!(
        effects,
        vec![
            Effect::Resized {
                width: 1280,
                height: 720
            },
            Effect::Resized {
                width: 750,
                height: 1334
            },
        ]
    );
}

#[test]
fn orbit_azimuth_is_clamped_to_the_quarter() {
    let mut camera = Camera::new(&desktop());
    let mut controls = OrbitControls::default();
    controls.rotate(10.0, 0.0);
    settle(&mut controls, &mut camera);
    let offset = camera.position - camera.target;
    assert!(offset.x.abs() < 1e-3, "{:?}", offset);
    assert!(offset.z > 0.0);

    controls.rotate(-10.0, 0.0);
    settle(&mut controls, &mut camera);
    let offset = camera.position - camera.target;
    assert!(offset.z.abs() < 1e-3, "{:?}", offset);
    assert!(offset.x > 0.0);
}

#[test]
fn orbit_never_dips_below_the_floor() {
    let mut camera = Camera::new(&desktop());
    let mut controls = OrbitControls::default();
    controls.rotate(0.0, -10.0);
    settle(&mut controls, &mut camera);
    let offset = camera.position - camera.target;
    assert!(offset.y.abs() < 1e-3, "{:?}", offset);
}

#[test]
fn zoom_is_clamped_to_the_distance_range() {
    let mut camera = Camera::new(&desktop());
    let mut controls = OrbitControls::default();
    controls.zoom(200.0);
    controls.update(&mut camera);
    let distance = (camera.position - camera.target).length();
    assert!((distance - ORBIT_MAX_DISTANCE).abs() < 1e-3);

    controls.zoom(-400.0);
    controls.update(&mut camera);
    let distance = (camera.position - camera.target).length();
    assert!((distance - ORBIT_MIN_DISTANCE).abs() < 1e-3);
}

#[test]
fn disabled_controls_ignore_input() {
    let mut camera = Camera::new(&desktop());
    let start = camera.position;
    let mut controls = OrbitControls::default();
    controls.enabled = false;
    controls.rotate(1.0, 1.0);
    controls.zoom(5.0);
    settle(&mut controls, &mut camera);
    assert!((camera.position - start).length() < 1e-3);
}

#[test]
fn stop_drops_the_glide() {
    let mut camera = Camera::new(&desktop());
    let start = camera.position;
    let mut controls = OrbitControls::default();
    controls.rotate(0.2, 0.0);
    controls.stop();
    settle(&mut controls, &mut camera);
    assert!((camera.position - start).length() < 1e-3);
}
