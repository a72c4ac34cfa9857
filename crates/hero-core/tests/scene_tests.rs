// Host-side tests for scene composition and the per-frame step.

use glam::Vec2;
use hero_core::camera::camera_distance;
use hero_core::labels::LabelField;
use hero_core::model::RetryPolicy;
use hero_core::rotator::target_rotation;
use hero_core::scene::{Light, Scene};

const FRAME: f32 = 1.0 / 60.0;

fn make_scene(compact: bool) -> Scene {
    Scene::compose(16.0 / 9.0, compact, LabelField::default(), RetryPolicy::FailOpen)
}

#[test]
fn camera_distance_follows_viewport_class() {
    assert_eq!(camera_distance(true), 8.0);
    assert_eq!(camera_distance(false), 6.0);
    assert_eq!(make_scene(true).camera.eye.z, 8.0);
    assert_eq!(make_scene(false).camera.eye.z, 6.0);
}

#[test]
fn light_rig_inventory() {
    let scene = make_scene(false);
    let mut ambient = 0;
    let mut spots = 0;
    let mut shadow_spots = 0;
    let mut points = 0;
    for light in &scene.lights {
        match light {
            Light::Ambient { intensity, .. } => {
                ambient += 1;
                assert!((intensity - 0.3).abs() < 1e-6);
            }
            Light::Spot { cast_shadows, .. } => {
                spots += 1;
                if *cast_shadows {
                    shadow_spots += 1;
                }
            }
            Light::Point { .. } => points += 1,
        }
    }
    assert_eq!(ambient, 1);
    assert_eq!(spots, 2);
    assert_eq!(shadow_spots, 1);
    assert_eq!(points, 2);
}

#[test]
fn advance_reports_placeholder_until_loaded() {
    let mut scene = make_scene(false);
    let state = scene.advance(Vec2::ZERO, FRAME);
    assert!(state.show_placeholder);
    assert_eq!(state.label_poses.len(), scene.labels.len());
}

#[test]
fn centered_pointer_settles_to_zero_rotation() {
    // Mount with the pointer at (0,0): rotation stays at the origin.
    let mut scene = make_scene(false);
    for _ in 0..300 {
        scene.advance(Vec2::ZERO, FRAME);
    }
    assert!(scene.model_rotation().length() < 1e-6);
}

#[test]
fn deflected_pointer_converges_to_its_target() {
    let pointer = Vec2::new(0.5, -0.5);
    let target = target_rotation(pointer);
    let mut scene = make_scene(false);
    let mut state = scene.advance(pointer, FRAME);
    for _ in 0..3000 {
        state = scene.advance(pointer, FRAME);
    }
    assert!(
        (state.model_rotation - target).length() < 1e-4,
        "rotation {:?} vs target {target:?}",
        state.model_rotation
    );
}

#[test]
fn elapsed_time_accumulates() {
    let mut scene = make_scene(false);
    for _ in 0..60 {
        scene.advance(Vec2::ZERO, FRAME);
    }
    assert!((scene.elapsed() - 1.0).abs() < 1e-4);
}

#[test]
fn aspect_updates_but_rejects_degenerate_values() {
    let mut scene = make_scene(false);
    scene.set_aspect(2.0);
    assert_eq!(scene.camera.aspect, 2.0);
    scene.set_aspect(0.0);
    assert_eq!(scene.camera.aspect, 2.0);
    scene.set_aspect(f32::NAN);
    assert_eq!(scene.camera.aspect, 2.0);
}

#[test]
fn backdrop_matches_the_page_theme() {
    let scene = make_scene(false);
    assert_eq!(scene.backdrop.fog_near, 5.0);
    assert_eq!(scene.backdrop.fog_far, 20.0);
    // #080E1A
    assert!((scene.backdrop.background[0] - 8.0 / 255.0).abs() < 1e-6);
    assert!((scene.backdrop.background[2] - 26.0 / 255.0).abs() < 1e-6);
}
