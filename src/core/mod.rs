pub use show_core::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../../shaders/points.wgsl");
