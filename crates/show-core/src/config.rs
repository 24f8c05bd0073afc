use crate::constants::*;
use crate::error::{Result, ShowError};
use crate::formation::Dimensions;
use std::ops::Range;

/// How the per-particle easing rate is applied on each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingMode {
    /// Close a fixed fraction of the remaining distance per tick, whatever
    /// the time since the previous tick. Motion speed follows refresh rate.
    #[default]
    PerFrame,
    /// Scale the fraction by elapsed time so that a 30 Hz and a 144 Hz
    /// display fly the show at the same pace. Identical to `PerFrame` at
    /// [`REFERENCE_FPS`].
    FrameRateIndependent,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub particle_count: usize,
    pub grid_spacing: f32,
    pub dimensions: Dimensions,
    pub arrival_epsilon: f32,
    /// Speed range sampled once at startup.
    pub initial_speed_range: Range<f32>,
    /// Speed range sampled on each formation switch.
    pub switch_speed_range: Range<f32>,
    /// Exclusive upper bound of the startup trigger delay, in ms.
    pub initial_delay_ms: u32,
    /// Exclusive upper bound of the per-switch trigger delay, in ms.
    pub switch_delay_ms: u32,
    pub global_speed_factor: f32,
    pub flicker_enabled: bool,
    pub easing: EasingMode,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: DRONE_COUNT,
            grid_spacing: GRID_SPACING,
            dimensions: Dimensions::default(),
            arrival_epsilon: ARRIVAL_EPSILON,
            initial_speed_range: INITIAL_SPEED_MIN..INITIAL_SPEED_MAX,
            switch_speed_range: SWITCH_SPEED_MIN..SWITCH_SPEED_MAX,
            initial_delay_ms: INITIAL_DELAY_MS,
            switch_delay_ms: SWITCH_DELAY_MS,
            global_speed_factor: DEFAULT_GLOBAL_SPEED,
            flicker_enabled: true,
            easing: EasingMode::PerFrame,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_global_speed(mut self, factor: f32) -> Self {
        self.global_speed_factor = factor;
        self
    }

    pub fn with_flicker(mut self, enabled: bool) -> Self {
        self.flicker_enabled = enabled;
        self
    }

    pub fn with_easing(mut self, easing: EasingMode) -> Self {
        self.easing = easing;
        self
    }

    /// Launch every particle immediately, both at startup and on switches.
    pub fn without_trigger_delay(mut self) -> Self {
        self.initial_delay_ms = 0;
        self.switch_delay_ms = 0;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(ShowError::InvalidConfig("particle_count must be at least 1"));
        }
        if !(self.grid_spacing.is_finite() && self.grid_spacing > 0.0) {
            return Err(ShowError::InvalidConfig("grid_spacing must be positive"));
        }
        if !(self.arrival_epsilon.is_finite() && self.arrival_epsilon > 0.0) {
            return Err(ShowError::InvalidConfig("arrival_epsilon must be positive"));
        }
        let Dimensions {
            min_height,
            formation_size,
        } = self.dimensions;
        if !(min_height.is_finite() && min_height >= 0.0) {
            return Err(ShowError::InvalidConfig("min_height must be non-negative"));
        }
        if !(formation_size.is_finite() && formation_size > 0.0) {
            return Err(ShowError::InvalidConfig("formation_size must be positive"));
        }
        check_speed_range(&self.initial_speed_range)?;
        check_speed_range(&self.switch_speed_range)?;
        if !self.global_speed_factor.is_finite() {
            return Err(ShowError::InvalidConfig("global_speed_factor must be finite"));
        }
        Ok(())
    }
}

fn check_speed_range(range: &Range<f32>) -> Result<()> {
    if !(range.start.is_finite() && range.end.is_finite()) {
        return Err(ShowError::InvalidConfig("speed range must be finite"));
    }
    if range.start <= 0.0 || range.end > 1.0 {
        return Err(ShowError::InvalidConfig("speed range must lie within (0, 1]"));
    }
    if range.start > range.end {
        return Err(ShowError::InvalidConfig("speed range is inverted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_fleet() {
        let cfg = EngineConfig::default().with_particle_count(0);
        assert!(matches!(cfg.validate(), Err(ShowError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let cfg = EngineConfig {
            switch_speed_range: 0.03..0.01,
            ..EngineConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ShowError::InvalidConfig("speed range is inverted"))
        );
    }

    #[test]
    fn rejects_non_positive_epsilon() {
        let cfg = EngineConfig {
            arrival_epsilon: 0.0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_width_speed_range_is_allowed() {
        let cfg = EngineConfig {
            switch_speed_range: 0.02..0.02,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
