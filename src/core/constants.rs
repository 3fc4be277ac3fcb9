// Shared scene tuning constants.
//
// Designer defaults for the scene live here and in `params.rs`; nothing is read
// from the environment or from files at runtime.

// Camera
pub const CAMERA_FOV_DEG: f32 = 40.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: [f32; 3] = [-0.5, 2.5, 2.0];

// Background plane
pub const PLANE_HEIGHT: f32 = 15.0; // width is PLANE_HEIGHT * aspect
pub const PLANE_CENTER: [f32; 3] = [0.0, 2.5, -15.0];

// Smooth scroll
pub const SCROLL_LERP: f64 = 0.03; // fraction of remaining distance per tick
pub const SCROLL_SNAP_EPSILON: f64 = 0.5; // px; below this the offset snaps to target
pub const SCROLL_HINT_THRESHOLD: f64 = 100.0; // hint hidden above this offset
pub const WHEEL_LINE_HEIGHT_PX: f64 = 16.0;

// Per-frame animation
pub const TIME_DIVISOR_MS: f64 = 3000.0; // shader time = elapsed ms / divisor
pub const SCROLL_TO_WORLD: f64 = 0.0021; // scroll px -> world units
pub const MESH_REST_OFFSET: f32 = 0.5; // target = scaled scroll - offset
pub const MESH_LERP: f32 = 0.05;
pub const IOR_SCROLL_GAIN: f32 = 0.5;

// Pointer-driven light
pub const POINTER_UNPROJECT_Z: f32 = 0.5;
pub const LIGHT_DEPTH_OFFSET: f32 = 1.0; // distance subtracted from the eye-to-z=0 ray length
pub const SPOT_INITIAL_POSITION: [f32; 3] = [0.0, 1.0, 0.0];

// Shadows
pub const SHADOW_MAP_SIZE: u32 = 1024;
pub const SHADOW_NEAR: f32 = 1.0;
pub const SHADOW_FAR: f32 = 10.0;
pub const SHADOW_MAX_FOV_DEG: f32 = 170.0; // wider cones are clamped for the shadow frustum
pub const SHADOW_DEPTH_BIAS: f32 = 0.0005; // subtracted from the compare depth

// Hemisphere fill light
pub const HEMI_SKY_HEX: u32 = 0xffffff;
pub const HEMI_GROUND_HEX: u32 = 0x8d8d8d;
pub const HEMI_INTENSITY: f32 = 0.15;

// Mesh asset
pub const MESH_URL: &str = "/models/ply/binary/Lucy100k.ply";
pub const MESH_SCALE: f32 = 0.0024;

// Textures
pub const TEXTURE_BASE_URL: &str = "/textures/";
pub const TEXTURE_FILES: [&str; 5] = [
    "disturb.jpg",
    "colors.png",
    "uv_grid_opengl.jpg",
    "material_244.webp",
    "material_297.webp",
];
pub const ENV_MAP_TEXTURE: &str = "disturb.jpg";

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;
