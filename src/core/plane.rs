// Background plane geometry. Rebuilt whole on every resize so it always covers
// the camera frustum at its depth.

use super::constants::{PLANE_CENTER, PLANE_HEIGHT};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

pub const PLANE_INDICES: [u16; 6] = [0, 2, 1, 2, 3, 1];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundPlane {
    pub width: f32,
    pub height: f32,
    pub center: [f32; 3],
}

impl BackgroundPlane {
    pub fn for_aspect(aspect: f32) -> Self {
        Self {
            width: PLANE_HEIGHT * aspect,
            height: PLANE_HEIGHT,
            center: PLANE_CENTER,
        }
    }

    /// Four corners in world space, top row first, uv origin bottom-left.
    pub fn vertices(&self) -> [PlaneVertex; 4] {
        let hw = self.width * 0.5;
        let hh = self.height * 0.5;
        let [cx, cy, cz] = self.center;
        [
            PlaneVertex {
                position: [cx - hw, cy + hh, cz],
                uv: [0.0, 1.0],
            },
            PlaneVertex {
                position: [cx + hw, cy + hh, cz],
                uv: [1.0, 1.0],
            },
            PlaneVertex {
                position: [cx - hw, cy - hh, cz],
                uv: [0.0, 0.0],
            },
            PlaneVertex {
                position: [cx + hw, cy - hh, cz],
                uv: [1.0, 0.0],
            },
        ]
    }
}
