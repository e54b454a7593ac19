pub const WINDOW_WIDTH: i32 = 960;            // Initial window width (pixels)
pub const WINDOW_HEIGHT: i32 = 540;           // Initial window height (pixels)
pub const WINDOW_TITLE: &str = "Click 3D Image Stack";
pub const BACKGROUND_COLOR: &str = "#050C0C"; // Clear color behind the stack
pub const FPS: u32 = 60;                      // Target frames per second

pub const IMAGE_ASPECT_RATIO: f32 = 16.0 / 9.0; // Assumed width/height of every stack image
pub const FADE_DURATION_MS: u64 = 400;          // Cross-fade duration (milliseconds)
pub const LAYER_SPACING: f32 = 0.0;             // Depth between stack layers (0 = flat stack)

pub const CAMERA_Z: f32 = 7.0;                // Camera distance from the z = 0 plane
pub const CAMERA_FOV: f32 = 60.0;             // Vertical field of view (degrees)

pub const OVERLAY_DEPTH_OFFSET: f32 = 0.01;   // Overlay sits this far in front of layer 0
pub const OVERLAY_DRAW_ORDER_MARGIN: i32 = 10; // Overlay hint above the highest stack hint
