/// Browser-side tuning constants: camera, point sprites and DOM ids.
///
/// Engine tunables live in `show_core::constants`; these only concern how
/// the show is presented.
// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 800.0, 1500.0]; // initial eye, looking at the origin
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10_000.0;
pub const CAMERA_DAMPING: f32 = 0.05; // fraction of pending orbit applied per frame

// Orbit interaction
pub const ORBIT_RADIANS_PER_PX: f32 = 0.005;
pub const ZOOM_PER_WHEEL_UNIT: f32 = 0.001; // wheel delta -> log-distance change
pub const CAMERA_MIN_DISTANCE: f32 = 50.0;
pub const CAMERA_MAX_DISTANCE: f32 = 8_000.0;
pub const CAMERA_PITCH_LIMIT: f32 = 1.55; // just under pi/2

// Point sprites
pub const POINT_SIZE: f32 = 4.0; // world units, attenuated by distance
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

// Audio
pub const SOUNDS_DIR: &str = "sounds";

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const FLICKER_BUTTON_ID: &str = "flicker";
pub const SPEED_SLIDER_ID: &str = "speed";
pub const TOGGLE_SOUND_ID: &str = "toggleSound";
pub const TOGGLE_MUSIC_ID: &str = "toggleMusic";
pub const VOLUME_SLIDER_ID: &str = "volume";
pub const AUDIO_TOGGLE_ID: &str = "audio-toggle";
pub const STATUS_ID: &str = "status";

// Status line refresh period in frames
pub const STATUS_EVERY_FRAMES: u32 = 30;
