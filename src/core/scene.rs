// Renderable scene state and the per-frame update.
//
// Platform-free: the web front-end feeds it viewport sizes, pointer positions,
// the scroll offset and the clock, and the renderer reads it back. `G` is the
// GPU payload attached to the mesh once it has loaded.

use super::background::ShaderFrame;
use super::camera::{pointer_ndc, Camera};
use super::constants::{
    IOR_SCROLL_GAIN, MESH_LERP, MESH_REST_OFFSET, SCROLL_TO_WORLD, SPOT_INITIAL_POSITION,
    TIME_DIVISOR_MS,
};
use super::params::{MaterialParams, SceneParams};
use super::plane::BackgroundPlane;
use super::scroll::ease;
use glam::{Mat4, Vec2, Vec3};

/// Scroll-driven placement of the mesh. Translation and rotation share the
/// same eased value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshTransform {
    pub position_y: f32,
    pub rotation_y: f32,
}

impl MeshTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.position_y, 0.0))
            * Mat4::from_rotation_y(self.rotation_y)
    }
}

/// Live material values as uploaded to the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialState {
    pub ior: f32,
    pub transmission: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub flat_shading: bool,
    /// Set whenever a value changed; the renderer clears it after uploading.
    pub needs_update: bool,
}

impl MaterialState {
    pub fn from_params(params: &MaterialParams) -> Self {
        Self {
            ior: params.ior,
            transmission: params.transmission,
            roughness: params.roughness,
            metalness: params.metalness,
            env_map_intensity: params.env_map_intensity,
            flat_shading: params.flat_shading,
            needs_update: true,
        }
    }

    /// Copy panel-editable values (everything but the modulated ior).
    fn apply_params(&mut self, params: &MaterialParams) {
        let before = (
            self.transmission,
            self.roughness,
            self.metalness,
            self.env_map_intensity,
            self.flat_shading,
        );
        self.transmission = params.transmission;
        self.roughness = params.roughness;
        self.metalness = params.metalness;
        self.env_map_intensity = params.env_map_intensity;
        self.flat_shading = params.flat_shading;
        let after = (
            self.transmission,
            self.roughness,
            self.metalness,
            self.env_map_intensity,
            self.flat_shading,
        );
        if before != after {
            self.needs_update = true;
        }
    }
}

pub struct LoadedMesh<G> {
    pub gpu: G,
    pub transform: MeshTransform,
    pub material: MaterialState,
}

/// The mesh arrives asynchronously; until then every consumer sees `Unloaded`.
pub enum MeshSlot<G> {
    Unloaded,
    Loaded(LoadedMesh<G>),
}

impl<G> MeshSlot<G> {
    pub fn loaded(&self) -> Option<&LoadedMesh<G>> {
        match self {
            MeshSlot::Loaded(m) => Some(m),
            MeshSlot::Unloaded => None,
        }
    }
}

pub struct Scene<G> {
    pub camera: Camera,
    pub plane: BackgroundPlane,
    /// Bumped whenever `plane` is rebuilt so the renderer can re-upload it.
    pub plane_generation: u64,
    /// Viewport size in CSS pixels.
    pub resolution: Vec2,
    /// Last pointer position in CSS pixels.
    pub pointer: Vec2,
    pub spot_position: Vec3,
    pub shader_time: f32,
    pub mesh: MeshSlot<G>,
}

impl<G> Scene<G> {
    pub fn new(width: f32, height: f32) -> Self {
        let aspect = if width > 0.0 && height > 0.0 {
            width / height
        } else {
            1.0
        };
        Self {
            camera: Camera::scene(aspect),
            plane: BackgroundPlane::for_aspect(aspect),
            plane_generation: 0,
            resolution: Vec2::new(width.max(1.0), height.max(1.0)),
            pointer: Vec2::ZERO,
            spot_position: Vec3::from(SPOT_INITIAL_POSITION),
            shader_time: 0.0,
            mesh: MeshSlot::Unloaded,
        }
    }

    pub fn shader_frame(&self) -> ShaderFrame {
        ShaderFrame {
            time: self.shader_time,
            resolution: self.resolution,
        }
    }

    /// Viewport resize: camera aspect, shader resolution and a fresh plane.
    /// Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        let aspect = width / height;
        self.camera.set_aspect(aspect);
        self.resolution = Vec2::new(width, height);
        self.plane = BackgroundPlane::for_aspect(aspect);
        self.plane_generation += 1;
    }

    /// Pointer move in CSS pixels against the current viewport.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
        let ndc = pointer_ndc(x, y, self.resolution.x, self.resolution.y);
        if let Some(p) = self.camera.pointer_light_position(ndc) {
            self.spot_position = p;
        }
    }

    /// Install the loaded mesh with a material seeded from the current params.
    pub fn mesh_loaded(&mut self, gpu: G, params: &MaterialParams) {
        self.mesh = MeshSlot::Loaded(LoadedMesh {
            gpu,
            transform: MeshTransform::default(),
            material: MaterialState::from_params(params),
        });
    }

    /// One animation frame: clock, scroll-driven mesh motion and material.
    pub fn tick(&mut self, params: &SceneParams, scroll: f64, elapsed_ms: f64) {
        self.shader_time = (elapsed_ms / TIME_DIVISOR_MS) as f32;
        let scaled = (scroll * SCROLL_TO_WORLD) as f32;

        if let MeshSlot::Loaded(mesh) = &mut self.mesh {
            let target = scaled - MESH_REST_OFFSET;
            let eased = ease(
                mesh.transform.position_y as f64,
                target as f64,
                MESH_LERP as f64,
            ) as f32;
            mesh.transform.position_y = eased;
            mesh.transform.rotation_y = eased;

            mesh.material.apply_params(&params.material);
            let base_ior = params.material.ior;
            if base_ior != 0.0 {
                mesh.material.ior = base_ior + eased * IOR_SCROLL_GAIN;
                mesh.material.needs_update = true;
            } else if mesh.material.ior != base_ior {
                mesh.material.ior = base_ior;
                mesh.material.needs_update = true;
            }
        }
    }
}
