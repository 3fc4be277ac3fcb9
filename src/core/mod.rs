pub mod background;
pub mod camera;
pub mod color;
pub mod constants;
pub mod controls;
pub mod mesh;
pub mod params;
pub mod plane;
pub mod ply;
pub mod scene;
pub mod scroll;

pub use constants::*;
pub use params::*;
pub use scene::*;

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static MESH_WGSL: &str = include_str!("../../shaders/mesh.wgsl");
pub static SHADOW_WGSL: &str = include_str!("../../shaders/shadow.wgsl");
