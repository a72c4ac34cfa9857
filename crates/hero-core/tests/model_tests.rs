// Host-side tests for the load gate, retry policy and tuning pass.

use glam::{Quat, Vec3};
use hero_core::asset::{decode_glb, AssetError, MaterialParams, MeshData, ModelData};
use hero_core::constants::{TUNED_ENV_INTENSITY, TUNED_METALNESS, TUNED_ROUGHNESS};
use hero_core::model::{tune_model, LoadPhase, ModelSlot, RetryPolicy};

fn make_model() -> ModelData {
    ModelData {
        meshes: vec![MeshData {
            name: "logo".to_string(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
            material: MaterialParams {
                base_color: [1.0, 1.0, 1.0, 1.0],
                roughness: 0.8,
                metalness: 0.2,
                env_map_intensity: 1.0,
            },
            cast_shadow: false,
            receive_shadow: false,
        }],
        scale: Vec3::splat(2.5),
        rotation: Quat::from_rotation_y(1.0),
    }
}

#[test]
fn placeholder_and_model_are_mutually_exclusive() {
    let mut slot = ModelSlot::default();
    assert_eq!(slot.phase(), LoadPhase::Loading);
    assert!(slot.shows_placeholder());
    assert!(slot.model().is_none());

    slot.resolve(make_model());
    assert_eq!(slot.phase(), LoadPhase::Loaded);
    assert!(!slot.shows_placeholder());
    assert!(slot.model().is_some());
}

#[test]
fn resolve_happens_at_most_once() {
    let mut slot = ModelSlot::default();
    slot.resolve(make_model());

    let mut second = make_model();
    second.meshes.clear();
    slot.resolve(second);
    // First resolution wins; the empty duplicate was ignored.
    assert_eq!(slot.model().unwrap().meshes.len(), 1);
}

#[test]
fn loaded_is_terminal() {
    let mut slot = ModelSlot::new(RetryPolicy::Retry { max_attempts: 3 });
    slot.resolve(make_model());
    assert!(!slot.fail("late network error"));
    assert_eq!(slot.phase(), LoadPhase::Loaded);
}

#[test]
fn fail_open_keeps_placeholder_forever() {
    let mut slot = ModelSlot::new(RetryPolicy::FailOpen);
    assert!(!slot.fail("http 404"));
    assert_eq!(slot.phase(), LoadPhase::Failed);
    assert!(slot.shows_placeholder());

    // A resolution after permanent failure is ignored.
    slot.resolve(make_model());
    assert_eq!(slot.phase(), LoadPhase::Failed);
    assert!(slot.model().is_none());
}

#[test]
fn retry_policy_consumes_its_budget() {
    let mut slot = ModelSlot::new(RetryPolicy::Retry { max_attempts: 3 });
    assert!(slot.fail("attempt 1"));
    assert_eq!(slot.phase(), LoadPhase::Loading);
    assert!(slot.fail("attempt 2"));
    assert_eq!(slot.phase(), LoadPhase::Loading);
    // Third failure exhausts the budget.
    assert!(!slot.fail("attempt 3"));
    assert_eq!(slot.phase(), LoadPhase::Failed);
    assert_eq!(slot.attempts(), 3);
}

#[test]
fn retry_can_still_resolve() {
    let mut slot = ModelSlot::new(RetryPolicy::Retry { max_attempts: 3 });
    assert!(slot.fail("flaky network"));
    slot.resolve(make_model());
    assert_eq!(slot.phase(), LoadPhase::Loaded);
}

#[test]
fn tuning_clamps_materials_and_sets_shadow_flags() {
    let mut model = make_model();
    tune_model(&mut model);
    for mesh in &model.meshes {
        assert!(mesh.cast_shadow && mesh.receive_shadow);
        assert_eq!(mesh.material.roughness, TUNED_ROUGHNESS);
        assert_eq!(mesh.material.metalness, TUNED_METALNESS);
        assert_eq!(mesh.material.env_map_intensity, TUNED_ENV_INTENSITY);
    }
}

#[test]
fn tuning_normalizes_the_root_transform() {
    let mut model = make_model();
    tune_model(&mut model);
    assert_eq!(model.scale, Vec3::ONE);
    assert_eq!(model.rotation, Quat::IDENTITY);
}

#[test]
fn resolve_applies_tuning() {
    let mut slot = ModelSlot::default();
    slot.resolve(make_model());
    let model = slot.model().unwrap();
    assert_eq!(model.scale, Vec3::ONE);
    assert_eq!(model.meshes[0].material.roughness, TUNED_ROUGHNESS);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_glb(b"not a gltf document").unwrap_err();
    assert!(matches!(err, AssetError::Parse(_)), "got {err:?}");
}

#[test]
fn decode_rejects_truncated_glb_header() {
    // Valid magic, nothing else.
    let err = decode_glb(b"glTF").unwrap_err();
    assert!(matches!(err, AssetError::Parse(_)), "got {err:?}");
}
