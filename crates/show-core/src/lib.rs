//! Drone light show engine.
//!
//! Platform-independent core shared by the web and native drivers: the
//! formation generator, the per-particle store, and the engine that moves the
//! fleet between formations one display frame at a time.

pub mod config;
pub mod constants;
pub mod cue;
pub mod engine;
pub mod error;
pub mod flicker;
pub mod formation;
pub mod particles;

pub use config::*;
pub use constants::*;
pub use cue::AudioCue;
pub use engine::*;
pub use error::{Result, ShowError};
pub use flicker::flicker_factor;
pub use formation::*;
pub use particles::ParticleStore;
