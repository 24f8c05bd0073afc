//! Transition controller and frame updater.
//!
//! `ShowEngine` owns the particle store plus the operator-facing knobs
//! (global speed, flicker). A formation request rewrites every target in one
//! pass; `tick` then eases particles toward those targets once per frame.

use crate::config::{EasingMode, EngineConfig};
use crate::constants::{MAX_TICK_DT_SEC, REFERENCE_FPS, WHITE};
use crate::cue::AudioCue;
use crate::error::Result;
use crate::flicker::flicker_factor;
use crate::formation::{generate, Formation};
use crate::particles::ParticleStore;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;
use std::ops::Range;

/// Where a particle sits in its motion cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// Parked on the startup grid; no formation has been requested yet.
    GroundedIdle,
    /// Switch requested, still inside its trigger delay.
    Waiting,
    Flying,
    Arrived,
}

/// Fleet-wide counts at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowStats {
    pub total: usize,
    pub waiting: usize,
    pub flying: usize,
    pub idle: usize,
    pub grounded: usize,
}

pub struct ShowEngine {
    store: ParticleStore,
    config: EngineConfig,
    rng: StdRng,
    formation: Option<Formation>,
    switch_count: u64,
    pending_cues: SmallVec<[AudioCue; 4]>,
    last_tick_ms: Option<f64>,
    settled_reported: bool,
}

impl ShowEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut store = ParticleStore::on_ground_grid(
            config.particle_count,
            config.grid_spacing,
            Vec3::from_array(WHITE),
        );
        for i in 0..store.len() {
            store.speeds[i] = sample_speed(&mut rng, &config.initial_speed_range);
            store.trigger_delays_ms[i] = sample_delay(&mut rng, config.initial_delay_ms);
        }
        log::info!(
            "[show] fleet ready: {} particles, easing={:?}, seed={:?}",
            store.len(),
            config.easing,
            config.seed
        );
        Ok(Self {
            store,
            config,
            rng,
            formation: None,
            switch_count: 0,
            pending_cues: SmallVec::new(),
            last_tick_ms: None,
            settled_reported: false,
        })
    }

    /// Point every particle at `formation`, restarting its flight.
    ///
    /// Targets, base colors and per-particle timing are all rewritten before
    /// this returns, so the next tick never mixes two formations.
    pub fn request_formation(&mut self, formation: Formation, now_ms: f64) {
        let Self {
            store, config, rng, ..
        } = self;
        let count = store.len();
        let grounded = formation.grounded();
        for i in 0..count {
            let pt = generate(formation, &config.dimensions, i, count, now_ms);
            store.targets[i] = pt.position;
            store.base_colors[i] = pt.color;
            store.switch_start_ms[i] = now_ms;
            store.flying[i] = true;
            store.grounded[i] = grounded;
            store.trigger_delays_ms[i] = sample_delay(rng, config.switch_delay_ms);
            store.speeds[i] = sample_speed(rng, &config.switch_speed_range);
        }
        self.formation = Some(formation);
        self.switch_count += 1;
        self.settled_reported = false;
        self.pending_cues.push(formation.cue());
        log::info!("[show] formation -> {} ({} particles)", formation, count);
    }

    /// Parse `name` and request it. Unknown names leave the engine untouched.
    pub fn request_formation_by_name(&mut self, name: &str, now_ms: f64) -> Result<Formation> {
        let formation = name.parse::<Formation>()?;
        self.request_formation(formation, now_ms);
        Ok(formation)
    }

    /// Advance one display frame.
    pub fn tick(&mut self, now_ms: f64) {
        let frames = match self.config.easing {
            EasingMode::PerFrame => 1.0,
            EasingMode::FrameRateIndependent => {
                let dt = match self.last_tick_ms {
                    Some(prev) => ((now_ms - prev) * 0.001) as f32,
                    None => 1.0 / REFERENCE_FPS,
                };
                dt.clamp(0.0, MAX_TICK_DT_SEC) * REFERENCE_FPS
            }
        };
        self.last_tick_ms = Some(now_ms);

        let eps = self.config.arrival_epsilon;
        let global = self.config.global_speed_factor;
        let flicker = self.config.flicker_enabled;
        let store = &mut self.store;
        let mut still_flying = 0usize;

        for i in 0..store.len() {
            if store.flying[i] && now_ms >= store.release_time_ms(i) {
                let delta = store.targets[i] - store.positions[i];
                if delta.abs().max_element() > eps {
                    let alpha = ease_fraction(store.speeds[i] * global, frames);
                    store.positions[i] += delta * alpha;
                } else {
                    store.flying[i] = false;
                }
            }
            if store.flying[i] {
                still_flying += 1;
            }

            let base = store.base_colors[i];
            store.display_colors[i] = if flicker {
                base * flicker_factor(now_ms, i)
            } else {
                base
            };
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("[show] tick t={:.0} flying={}", now_ms, still_flying);
        }
        if still_flying == 0 && self.switch_count > 0 && !self.settled_reported {
            self.settled_reported = true;
            if let Some(f) = self.formation {
                log::info!("[show] formation {} settled", f);
            }
        }
    }

    /// Drain audio cues queued by formation requests since the last call.
    pub fn take_cues(&mut self) -> SmallVec<[AudioCue; 4]> {
        std::mem::take(&mut self.pending_cues)
    }

    pub fn set_global_speed_factor(&mut self, factor: f32) {
        self.config.global_speed_factor = factor;
    }

    pub fn global_speed_factor(&self) -> f32 {
        self.config.global_speed_factor
    }

    pub fn set_flicker_enabled(&mut self, enabled: bool) {
        self.config.flicker_enabled = enabled;
    }

    pub fn flicker_enabled(&self) -> bool {
        self.config.flicker_enabled
    }

    /// Flip flicker and return the new setting.
    pub fn toggle_flicker(&mut self) -> bool {
        self.config.flicker_enabled = !self.config.flicker_enabled;
        self.config.flicker_enabled
    }

    pub fn set_easing(&mut self, easing: EasingMode) {
        self.config.easing = easing;
    }

    pub fn easing(&self) -> EasingMode {
        self.config.easing
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Most recently requested formation.
    pub fn formation(&self) -> Option<Formation> {
        self.formation
    }

    pub fn switch_count(&self) -> u64 {
        self.switch_count
    }

    pub fn positions(&self) -> &[Vec3] {
        self.store.positions()
    }

    pub fn display_colors(&self) -> &[Vec3] {
        self.store.display_colors()
    }

    pub fn positions_flat(&self) -> &[f32] {
        self.store.positions_flat()
    }

    pub fn display_colors_flat(&self) -> &[f32] {
        self.store.display_colors_flat()
    }

    pub fn is_flying(&self, index: usize) -> bool {
        self.store.is_flying(index)
    }

    pub fn is_grounded(&self, index: usize) -> bool {
        self.store.is_grounded(index)
    }

    /// No particle is still flying toward its target.
    pub fn is_settled(&self) -> bool {
        !self.store.flying.iter().any(|&f| f)
    }

    pub fn motion_state(&self, index: usize, now_ms: f64) -> MotionState {
        if self.store.flying[index] {
            if now_ms < self.store.release_time_ms(index) {
                MotionState::Waiting
            } else {
                MotionState::Flying
            }
        } else if self.switch_count == 0 {
            MotionState::GroundedIdle
        } else {
            MotionState::Arrived
        }
    }

    pub fn stats(&self, now_ms: f64) -> ShowStats {
        let mut stats = ShowStats {
            total: self.len(),
            ..ShowStats::default()
        };
        for i in 0..self.len() {
            match self.motion_state(i, now_ms) {
                MotionState::Waiting => stats.waiting += 1,
                MotionState::Flying => stats.flying += 1,
                MotionState::GroundedIdle | MotionState::Arrived => stats.idle += 1,
            }
            if self.store.grounded[i] {
                stats.grounded += 1;
            }
        }
        stats
    }
}

/// Fraction of the remaining distance to close this tick.
///
/// `frames` is the tick length in reference frames; at exactly one frame
/// this is just `k`. A tick with no elapsed time closes nothing, whatever
/// the speed.
#[inline]
fn ease_fraction(k: f32, frames: f32) -> f32 {
    if frames <= 0.0 {
        0.0
    } else if frames == 1.0 {
        k
    } else if k >= 1.0 {
        1.0
    } else if k <= 0.0 {
        k * frames
    } else {
        1.0 - (1.0 - k).powf(frames)
    }
}

fn sample_speed(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.start < range.end {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

fn sample_delay(rng: &mut StdRng, max_ms: u32) -> u32 {
    if max_ms == 0 {
        0
    } else {
        rng.gen_range(0..max_ms)
    }
}
