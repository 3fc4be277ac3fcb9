// Tunable scene parameters: the single source of truth the panel edits and the
// renderer reads every frame.

use super::color::hex_to_linear;

/// Spot light that follows the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct SpotLightParams {
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
    /// Cut-off distance; 0 disables the range limit.
    pub distance: f32,
    /// Half-angle of the cone in radians.
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    /// Fraction of the cone covered by the shadow frustum.
    pub shadow_focus: f32,
    pub shadows: bool,
}

impl Default for SpotLightParams {
    fn default() -> Self {
        Self {
            color: hex_to_linear(0x031a6b),
            intensity: 5.0,
            distance: 1.0,
            angle: std::f32::consts::PI,
            penumbra: 1.0,
            decay: 2.0,
            shadow_focus: 1.0,
            shadows: true,
        }
    }
}

/// Uniform inputs of the procedural background that are not time/resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundParams {
    /// Number of rectangles; fractional values are honoured by the loop bound.
    pub total: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub y_distribution: f32,
    pub noise_intensity: f32,
    pub noise_definition: f32,
    pub glow_pos: [f32; 2],
    /// Raw shader components (no colour management).
    pub bg_color: [f32; 3],
    pub rect_color: [f32; 3],
}

impl Default for BackgroundParams {
    fn default() -> Self {
        Self {
            total: 60.0,
            min_size: 0.03,
            max_size: 0.08,
            y_distribution: 0.5,
            noise_intensity: 2.8,
            noise_definition: 0.6,
            glow_pos: [-2.0, 0.0],
            bg_color: [0.01, 0.16, 0.42],
            rect_color: [0.01, 0.26, 0.57],
        }
    }
}

/// Base values of the mesh's physically based material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    /// Base index of refraction; the frame loop layers the scroll offset on top.
    pub ior: f32,
    pub transmission: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub flat_shading: bool,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            // reflectivity 0.5 is applied after ior 1.2 and wins
            ior: ior_from_reflectivity(0.5),
            transmission: 0.141,
            roughness: 0.8,
            metalness: 0.1,
            env_map_intensity: 1.0,
            flat_shading: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneParams {
    pub light: SpotLightParams,
    pub background: BackgroundParams,
    pub material: MaterialParams,
}

/// Index of refraction implied by a 0..1 reflectivity.
pub fn ior_from_reflectivity(reflectivity: f32) -> f32 {
    let r = reflectivity.clamp(0.0, 1.0) * 0.4;
    (1.0 + r) / (1.0 - r)
}
