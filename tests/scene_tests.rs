// Host-side tests for the scene model: resize, pointer light and the
// scroll-driven frame update.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene_core {
    pub mod background {
        include!("../src/core/background.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod plane {
        include!("../src/core/plane.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod scroll {
        include!("../src/core/scroll.rs");
    }
}

use scene_core::constants::*;
use scene_core::params::SceneParams;
use scene_core::scene::*;
use glam::Vec3;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn loaded_scene() -> (Scene<()>, SceneParams) {
    let params = SceneParams::default();
    let mut scene = Scene::new(1920.0, 1080.0);
    scene.mesh_loaded((), &params.material);
    (scene, params)
}

fn transform(scene: &Scene<()>) -> MeshTransform {
    scene.mesh.loaded().map(|m| m.transform).unwrap()
}

#[test]
fn full_hd_viewport_sizes_camera_and_plane() {
    let mut scene: Scene<()> = Scene::new(800.0, 800.0);
    scene.resize(1920.0, 1080.0);
    assert!(approx(scene.camera.aspect, 1.7778, 1e-3));
    assert!(approx(scene.plane.width, 26.667, 1e-2));
    assert_eq!(scene.plane.height, 15.0);
    assert_eq!(scene.resolution.to_array(), [1920.0, 1080.0]);
    assert_eq!(scene.plane_generation, 1);
}

#[test]
fn plane_tracks_aspect_on_every_resize() {
    let mut scene: Scene<()> = Scene::new(1920.0, 1080.0);
    for (w, h) in [(1280.0, 720.0), (600.0, 900.0), (3000.0, 1000.0)] {
        scene.resize(w, h);
        assert!(approx(scene.camera.aspect, w / h, 1e-6));
        assert!(approx(scene.plane.width, 15.0 * w / h, 1e-4));
        assert_eq!(scene.plane.height, 15.0);
    }
    assert_eq!(scene.plane_generation, 3);
}

#[test]
fn zero_sized_viewport_is_ignored() {
    let mut scene: Scene<()> = Scene::new(1920.0, 1080.0);
    let before = scene.camera.aspect;
    scene.resize(0.0, 1080.0);
    scene.resize(1920.0, 0.0);
    assert_eq!(scene.camera.aspect, before);
    assert_eq!(scene.plane_generation, 0);
}

#[test]
fn pointer_at_centre_puts_light_on_forward_axis() {
    let mut scene: Scene<()> = Scene::new(1920.0, 1080.0);
    scene.pointer_moved(960.0, 540.0);
    let eye = Vec3::from(CAMERA_EYE);
    // distance = -eye.z / dir.z - offset, with dir = -Z
    let expected = eye + Vec3::NEG_Z * (eye.z - LIGHT_DEPTH_OFFSET);
    assert!(scene.spot_position.abs_diff_eq(expected, 1e-4), "{:?}", scene.spot_position);
    assert_eq!(scene.pointer.to_array(), [960.0, 540.0]);
}

#[test]
fn pointer_off_centre_moves_light_sideways() {
    let mut scene: Scene<()> = Scene::new(1920.0, 1080.0);
    scene.pointer_moved(1920.0, 0.0);
    let eye = Vec3::from(CAMERA_EYE);
    assert!(scene.spot_position.x > eye.x);
    assert!(scene.spot_position.y > eye.y);
}

#[test]
fn tick_before_load_only_advances_time() {
    let params = SceneParams::default();
    let mut scene: Scene<()> = Scene::new(1920.0, 1080.0);
    scene.tick(&params, 1000.0, 6000.0);
    scene.tick(&params, 2000.0, 9000.0);
    assert!(scene.mesh.loaded().is_none());
    assert!(approx(scene.shader_time, 3.0, 1e-6));
    assert!(approx(scene.shader_frame().time, 3.0, 1e-6));
}

#[test]
fn first_frame_after_load_eases_from_rest() {
    let (mut scene, params) = loaded_scene();
    scene.tick(&params, 0.0, 16.0);
    let t = transform(&scene);
    assert!(approx(t.position_y, -MESH_REST_OFFSET * MESH_LERP, 1e-6));
}

#[test]
fn position_and_rotation_stay_coupled() {
    let (mut scene, params) = loaded_scene();
    for (i, scroll) in [0.0, 250.0, 900.0, 1400.0, 300.0].iter().enumerate() {
        for frame in 0..40 {
            scene.tick(&params, *scroll, (i * 40 + frame) as f64 * 16.0);
            let t = transform(&scene);
            assert_eq!(t.position_y, t.rotation_y);
        }
    }
}

#[test]
fn mesh_converges_without_overshoot() {
    let (mut scene, params) = loaded_scene();
    let target = (1000.0 * SCROLL_TO_WORLD) as f32 - MESH_REST_OFFSET;
    let mut prev = 0.0;
    for frame in 0..600 {
        scene.tick(&params, 1000.0, frame as f64 * 16.0);
        let y = transform(&scene).position_y;
        assert!(y >= prev && y <= target + 1e-6);
        prev = y;
    }
    assert!(approx(prev, target, 1e-4));
}

#[test]
fn ior_follows_eased_offset() {
    let (mut scene, params) = loaded_scene();
    for frame in 0..600 {
        scene.tick(&params, 1000.0, frame as f64 * 16.0);
    }
    let mesh = scene.mesh.loaded().unwrap();
    let eased = mesh.transform.position_y;
    assert!(approx(mesh.material.ior, params.material.ior + eased * IOR_SCROLL_GAIN, 1e-6));
    // base 1.5, eased -> 2.1 - 0.5
    assert!(approx(mesh.material.ior, 1.5 + 1.6 * 0.5, 1e-3));
    assert!(mesh.material.needs_update);
}

#[test]
fn zero_base_ior_is_left_alone() {
    let (mut scene, mut params) = loaded_scene();
    params.material.ior = 0.0;
    for frame in 0..10 {
        scene.tick(&params, 800.0, frame as f64 * 16.0);
    }
    assert_eq!(scene.mesh.loaded().unwrap().material.ior, 0.0);
}

#[test]
fn panel_material_edits_reach_the_mesh() {
    let (mut scene, mut params) = loaded_scene();
    params.material.roughness = 0.25;
    params.material.flat_shading = true;
    scene.tick(&params, 0.0, 0.0);
    let m = &scene.mesh.loaded().unwrap().material;
    assert_eq!(m.roughness, 0.25);
    assert!(m.flat_shading);
    assert!(m.needs_update);
}

#[test]
fn model_matrix_translates_then_rotates() {
    let t = MeshTransform {
        position_y: 0.5,
        rotation_y: std::f32::consts::FRAC_PI_2,
    };
    let p = t.model_matrix().transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(0.0, 0.5, -1.0), 1e-5), "{p:?}");
}
