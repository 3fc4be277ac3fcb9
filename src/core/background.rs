// CPU mirror of `shaders/background.wgsl`.
//
// Keeps the colour field testable on the host and gives the page a matching
// backdrop colour before the GPU surface is up. Every function here must stay
// in lockstep with its WGSL counterpart.

use super::params::BackgroundParams;
use glam::{Mat2, Vec2, Vec3};

const RECT_BLUR_MIN: f32 = 1e-4; // also floors the size divisor

/// Per-frame inputs supplied by the host rather than the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderFrame {
    pub time: f32,
    pub resolution: Vec2,
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Hash in [0, 1).
#[inline]
pub fn random(co: Vec2) -> f32 {
    fract((co.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.5453)
}

/// Value noise over unit cells, smoothstep-interpolated.
pub fn noise(p: Vec2, intensity: f32) -> f32 {
    let p = p * intensity;
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    let a = random(i);
    let b = random(i + Vec2::new(1.0, 0.0));
    let c = random(i + Vec2::new(0.0, 1.0));
    let d = random(i + Vec2::new(1.0, 1.0));
    let bottom = a + (b - a) * u.x;
    let top = c + (d - c) * u.x;
    bottom + (top - bottom) * u.y
}

/// Four octaves of [`noise`], remapped to [0.5, 1).
pub fn fbm(uv: Vec2, intensity: f32) -> f32 {
    let m = Mat2::from_cols(Vec2::new(1.6, 1.2), Vec2::new(-1.2, 1.6));
    let mut uv = uv * 5.0;
    let mut f = 0.0;
    for weight in [0.5, 0.25, 0.125, 0.0625] {
        f += weight * noise(uv, intensity);
        uv = m * uv;
    }
    0.5 + 0.5 * f
}

/// The glowing noise field behind the rectangles.
pub fn background_color(uv: Vec2, time: f32, params: &BackgroundParams) -> Vec3 {
    let velocity = time / 1.6;
    let intensity = (uv.x * 3.0 + velocity * 2.0).sin() * 1.1 + 1.5;
    let mut uv = uv;
    uv.y -= 2.0;
    let bp = uv + Vec2::from(params.glow_pos);
    uv *= params.noise_definition;

    let rb = fbm(
        Vec2::new(uv.x * 0.5 - velocity * 0.03, uv.y),
        params.noise_intensity,
    ) * 0.1;
    uv += Vec2::splat(rb);

    let mut rz = fbm(
        uv * 0.9 + Vec2::new(velocity * 0.35, 0.0),
        params.noise_intensity,
    );
    rz *= (bp * intensity).dot(bp) + 1.2;

    let col = Vec3::from(params.bg_color) / (0.1 - rz);
    col.abs().powf(0.5)
}

/// Soft-edged axis-aligned rectangle mask.
pub fn rectangle(uv: Vec2, pos: Vec2, width: f32, height: f32, blur: f32) -> f32 {
    let blur = blur.max(RECT_BLUR_MIN);
    let d = (Vec2::new(width, height) + 0.01) / 2.0 - (uv - pos).abs();
    smoothstep(0.0, blur, d.x) * smoothstep(0.0, blur, d.y)
}

/// Column-major 2D rotation, matching the shader's `rotate2d`.
pub fn rotate2d(angle: f32) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::from_cols(Vec2::new(c, -s), Vec2::new(s, c))
}

/// Final colour at plane uv `v_uv` (0..1 on both axes).
pub fn shade(v_uv: Vec2, frame: &ShaderFrame, params: &BackgroundParams) -> Vec3 {
    let res = frame.resolution.max(Vec2::ONE);
    let mut uv = v_uv * 2.0 - Vec2::ONE;
    uv.x *= res.x / res.y;

    let mut color = background_color(uv, frame.time, params) * (2.0 - (uv.y * 2.0).abs());

    let t = frame.time;
    let vel_x = -t / 8.0;
    let vel_y = t / 10.0;
    let rect_color = Vec3::from(params.rect_color);
    let mut i = 0.0_f32;
    while i < params.total {
        let index = i / params.total;
        let rnd = random(Vec2::splat(index));
        let pos = Vec2::new(
            fract(vel_x * rnd + index) * 4.0 - 2.0,
            (index * rnd * 1000.0 + vel_y).sin() * params.y_distribution,
        );
        let size = params.max_size * rnd + params.min_size;
        let mut uv_rot = uv - pos + Vec2::splat(size / 2.0);
        uv_rot = rotate2d(i + t / 2.0) * uv_rot;
        uv_rot += pos + Vec2::splat(size / 2.0);
        let blur = (params.max_size + params.min_size - size) / 2.0;
        let rect = rectangle(uv_rot, pos, size, size, blur);
        color += rect_color * rect * size / params.max_size.max(RECT_BLUR_MIN);
        i += 1.0;
    }
    color
}
