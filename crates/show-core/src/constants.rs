// Shared show tuning constants used by the web and native drivers.

// Fleet
pub const DRONE_COUNT: usize = 10_000;
pub const GRID_SPACING: f32 = 8.0; // ground grid pitch before takeoff

// Formation geometry
pub const MIN_HEIGHT: f32 = 300.0; // altitude floor for airborne formations
pub const FORMATION_SIZE: f32 = 600.0; // overall span used by every formation

// Motion
pub const ARRIVAL_EPSILON: f32 = 0.01; // per-axis arrival tolerance
pub const INITIAL_SPEED_MIN: f32 = 0.01;
pub const INITIAL_SPEED_MAX: f32 = 0.04;
pub const SWITCH_SPEED_MIN: f32 = 0.01;
pub const SWITCH_SPEED_MAX: f32 = 0.03;
pub const INITIAL_DELAY_MS: u32 = 2000; // exclusive upper bound
pub const SWITCH_DELAY_MS: u32 = 1000; // exclusive upper bound
pub const DEFAULT_GLOBAL_SPEED: f32 = 1.0;

// Frame-rate independent easing
pub const REFERENCE_FPS: f32 = 60.0; // rate at which both easing modes agree
pub const MAX_TICK_DT_SEC: f32 = 0.25; // clamp for long stalls (tab in background)

// Flicker: 0.7 + 0.2*sin(phase) + 0.3*sin(..)
pub const FLICKER_BASE: f32 = 0.7;
pub const FLICKER_PHASE_AMP: f32 = 0.2;
pub const FLICKER_DRIFT_AMP: f32 = 0.3;
pub const FLICKER_MIN: f32 = FLICKER_BASE - FLICKER_PHASE_AMP - FLICKER_DRIFT_AMP;
pub const FLICKER_MAX: f32 = FLICKER_BASE + FLICKER_PHASE_AMP + FLICKER_DRIFT_AMP;

pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
