use anyhow::{bail, Result};
use clap::Parser;
use show_core::{EasingMode, EngineConfig, DRONE_COUNT};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "drone-show-sim",
    version,
    about = "Fly the drone show headless and report how each formation settles"
)]
pub struct Args {
    /// Formations to fly, in order.
    #[arg(default_values_t = ["takeoff".to_string(), "heart".to_string(), "dragon".to_string(), "fireworks".to_string(), "landing".to_string()])]
    pub formations: Vec<String>,

    #[arg(long, default_value_t = DRONE_COUNT)]
    pub count: usize,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Global speed factor applied to every drone.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f32,

    #[arg(long, default_value_t = false)]
    pub no_flicker: bool,

    /// Scale easing by elapsed time instead of applying it once per frame.
    #[arg(long, default_value_t = false)]
    pub frame_rate_independent: bool,

    /// Give up on a formation after this much simulated time.
    #[arg(long, default_value_t = 60.0)]
    pub max_seconds: f64,
}

impl Args {
    /// Reject timing flags that would stall or never end the simulation.
    pub fn validate(&self) -> Result<()> {
        if !(self.fps > 0.0 && self.fps.is_finite()) {
            bail!("--fps must be a positive number, got {}", self.fps);
        }
        if !(self.max_seconds > 0.0 && self.max_seconds.is_finite()) {
            bail!("--max-seconds must be a positive number, got {}", self.max_seconds);
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        let easing = if self.frame_rate_independent {
            EasingMode::FrameRateIndependent
        } else {
            EasingMode::PerFrame
        };
        let mut cfg = EngineConfig::default()
            .with_particle_count(self.count)
            .with_global_speed(self.speed)
            .with_flicker(!self.no_flicker)
            .with_easing(easing);
        cfg.seed = self.seed;
        cfg
    }
}
