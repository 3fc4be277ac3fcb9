use super::constants::{
    CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, LIGHT_DEPTH_OFFSET, POINTER_UNPROJECT_Z,
    SHADOW_FAR, SHADOW_MAX_FOV_DEG, SHADOW_NEAR,
};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The scene camera: fixed eye, looking straight down -Z.
    pub fn scene(aspect: f32) -> Self {
        let eye = Vec3::from(CAMERA_EYE);
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Map a normalized-device-coordinate point back into world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        let inv = self.view_projection().inverse();
        let p = inv * Vec4::new(ndc.x, ndc.y, ndc.z, 1.0);
        p.truncate() / p.w
    }

    /// World-space position for the spot light given the pointer in NDC.
    ///
    /// Casts the pointer ray from the eye and stops `LIGHT_DEPTH_OFFSET` short
    /// of the point where it would reach the eye's distance along Z. Returns
    /// `None` when the ray runs parallel to the z = 0 plane.
    pub fn pointer_light_position(&self, ndc: Vec2) -> Option<Vec3> {
        let p = self.unproject(Vec3::new(ndc.x, ndc.y, POINTER_UNPROJECT_Z));
        let dir = (p - self.eye).normalize_or_zero();
        if dir.z.abs() < 1e-6 {
            return None;
        }
        let distance = -self.eye.z / dir.z - LIGHT_DEPTH_OFFSET;
        Some(self.eye + dir * distance)
    }
}

/// Pointer pixel coordinates to NDC, y up.
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
}

/// Vertical field of view of the spot light's shadow camera.
pub fn shadow_fov(angle: f32, focus: f32) -> f32 {
    let fov = 2.0 * angle * focus.clamp(0.0, 1.0);
    fov.clamp(1f32.to_radians(), SHADOW_MAX_FOV_DEG.to_radians())
}

/// View-projection of the spot light's shadow camera, looking from `position`
/// at `target`.
pub fn spot_shadow_matrix(position: Vec3, target: Vec3, angle: f32, focus: f32) -> Mat4 {
    let mut dir = (target - position).normalize_or_zero();
    if dir == Vec3::ZERO {
        dir = Vec3::NEG_Y;
    }
    // look_at degenerates when the view direction is parallel to up
    let up = if dir.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let proj = Mat4::perspective_rh(shadow_fov(angle, focus), 1.0, SHADOW_NEAR, SHADOW_FAR);
    proj * Mat4::look_to_rh(position, dir, up)
}
