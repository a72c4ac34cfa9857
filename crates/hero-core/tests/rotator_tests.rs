// Host-side tests for the pointer-eased rotation step.

use glam::Vec2;
use hero_core::constants::{ROTATION_LERP_PER_FRAME, ROTATION_RANGE};
use hero_core::rotator::{ease_toward, smoothing_alpha, target_rotation, PointerRotator};

const FRAME: f32 = 1.0 / 60.0;

#[test]
fn target_is_exactly_pointer_times_pi_over_ten() {
    for &(x, y) in &[
        (0.0, 0.0),
        (1.0, 1.0),
        (-1.0, -1.0),
        (0.5, -0.25),
        (-0.73, 0.12),
    ] {
        let t = target_rotation(Vec2::new(x, y));
        assert!((t.x - x * ROTATION_RANGE).abs() < 1e-7, "yaw for x={x}");
        assert!((t.y - y * ROTATION_RANGE).abs() < 1e-7, "pitch for y={y}");
    }
}

#[test]
fn alpha_matches_reference_rate() {
    // One 60 Hz frame closes exactly the configured per-frame fraction.
    let alpha = smoothing_alpha(FRAME);
    assert!(
        (alpha - ROTATION_LERP_PER_FRAME).abs() < 1e-6,
        "alpha at 1/60s was {alpha}"
    );
}

#[test]
fn alpha_is_frame_rate_independent() {
    // Two 120 Hz steps must equal one 60 Hz step.
    let start = Vec2::new(0.3, -0.2);
    let pointer = Vec2::new(1.0, 1.0);
    let one = ease_toward(start, pointer, FRAME);
    let two = ease_toward(ease_toward(start, pointer, FRAME / 2.0), pointer, FRAME / 2.0);
    assert!((one - two).length() < 1e-5, "one={one:?} two={two:?}");
}

#[test]
fn convergence_is_monotonic_for_constant_pointer() {
    let pointer = Vec2::new(0.8, -0.6);
    let target = target_rotation(pointer);
    let mut rot = PointerRotator::default();
    let initial_dist = (rot.rotation() - target).length();
    let mut prev_dist = initial_dist;
    for frame in 0..600 {
        let cur = rot.step(pointer, FRAME);
        let dist = (cur - target).length();
        // Never grows; strictly shrinks until float resolution is reached.
        assert!(
            dist <= prev_dist,
            "distance grew at frame {frame}: {prev_dist} -> {dist}"
        );
        prev_dist = dist;
    }
    assert!(
        prev_dist < initial_dist * 1e-6,
        "no meaningful convergence: {initial_dist} -> {prev_dist}"
    );
}

#[test]
fn no_overshoot_past_target() {
    let pointer = Vec2::new(1.0, 0.0);
    let target = target_rotation(pointer);
    let mut rot = PointerRotator::default();
    for _ in 0..2000 {
        let cur = rot.step(pointer, FRAME);
        assert!(cur.x <= target.x + 1e-7, "yaw overshot: {} > {}", cur.x, target.x);
    }
}

#[test]
fn settles_to_zero_for_centered_pointer() {
    // Mount with the pointer at the origin: rotation converges to (0, 0).
    let mut rot = PointerRotator::default();
    let mut cur = rot.step(Vec2::new(1.0, -1.0), FRAME);
    // Deflect first so there is something to unwind.
    for _ in 0..120 {
        cur = rot.step(Vec2::new(1.0, -1.0), FRAME);
    }
    assert!(cur.length() > 0.0);
    for _ in 0..3000 {
        cur = rot.step(Vec2::ZERO, FRAME);
    }
    assert!(cur.length() < 1e-4, "did not settle: {cur:?}");
}

#[test]
fn zero_or_negative_dt_is_a_no_op() {
    let cur = Vec2::new(0.1, 0.2);
    assert_eq!(ease_toward(cur, Vec2::ONE, 0.0), cur);
    assert_eq!(ease_toward(cur, Vec2::ONE, -FRAME), cur);
}
