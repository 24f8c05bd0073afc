// Host-side tests for the orbit camera.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod camera {
    include!("../src/camera.rs");
}

use camera::OrbitCamera;
use glam::{Vec3, Vec4};

fn start_camera() -> OrbitCamera {
    OrbitCamera::looking_at(Vec3::new(0.0, 800.0, 1500.0), Vec3::ZERO, 75.0, 0.1, 10_000.0)
}

#[test]
fn looking_at_reproduces_the_eye() {
    let cam = start_camera();
    assert!(cam.eye().abs_diff_eq(Vec3::new(0.0, 800.0, 1500.0), 1e-2));
    assert!((cam.distance - 1700.0).abs() < 1e-2);
}

#[test]
fn target_projects_to_screen_centre() {
    let cam = start_camera();
    let clip = cam.view_proj(16.0 / 9.0) * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn undamped_orbit_applies_at_once() {
    let mut cam = start_camera();
    let d = cam.distance;
    cam.orbit(std::f32::consts::FRAC_PI_2, 0.0);
    cam.update();
    assert!(!cam.is_moving());
    let eye = cam.eye();
    assert!(eye.z.abs() < 1e-2, "{eye:?}");
    assert!(((eye - cam.target).length() - d).abs() < 1e-2);
}

#[test]
fn damping_eases_toward_the_requested_rotation() {
    let mut cam = start_camera().with_damping(0.05);
    let yaw0 = cam.yaw;
    cam.orbit(1.0, 0.0);
    cam.update();
    assert!(((cam.yaw - yaw0) - 0.05).abs() < 1e-5);
    assert!(cam.is_moving());
    for _ in 0..400 {
        cam.update();
    }
    assert!(((cam.yaw - yaw0) - 1.0).abs() < 1e-3);
}

#[test]
fn pitch_is_clamped_below_the_pole() {
    let mut cam = start_camera().with_pitch_limit(1.55);
    cam.orbit(0.0, 10.0);
    cam.update();
    assert!((cam.pitch - 1.55).abs() < 1e-6);
    assert!(cam.view().is_finite());
}

#[test]
fn zoom_respects_distance_limits() {
    let mut cam = start_camera().with_distance_limits(50.0, 8_000.0);
    cam.zoom(-100.0);
    cam.update();
    assert_eq!(cam.distance, 50.0);
    cam.zoom(100.0);
    cam.update();
    assert_eq!(cam.distance, 8_000.0);
}
