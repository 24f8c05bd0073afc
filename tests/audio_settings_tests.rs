// Host-side tests for audio playback settings.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod settings {
    include!("../src/audio/settings.rs");
}

use settings::*;
use show_core::AudioCue;

#[test]
fn defaults_play_everything_at_half_volume() {
    let s = AudioSettings::default();
    assert!(s.sound_enabled && s.music_enabled);
    assert_eq!(s.volume(), DEFAULT_VOLUME);
    assert!(AudioCue::ALL.iter().all(|&c| s.plays_cue(c)));
}

#[test]
fn volume_is_clamped() {
    let mut s = AudioSettings::default();
    s.set_volume(1.7);
    assert_eq!(s.volume(), 1.0);
    s.set_volume(-0.2);
    assert_eq!(s.volume(), 0.0);
    assert!(!s.plays_cue(AudioCue::Transform));
    s.set_volume(f32::NAN);
    assert_eq!(s.volume(), 0.0);
}

#[test]
fn toggles_flip_independently() {
    let mut s = AudioSettings::default();
    assert!(!s.toggle_sound());
    assert!(!s.plays_cue(AudioCue::Takeoff));
    assert!(s.music_enabled);
    assert!(!s.toggle_music());
    assert!(!s.any_enabled());
    assert!(s.toggle_sound());
}

#[test]
fn master_toggle_brings_both_into_line() {
    let mut s = AudioSettings::default();
    s.toggle_music();
    // sound still on, so the master switch turns everything off
    assert!(!s.toggle_all());
    assert!(!s.sound_enabled && !s.music_enabled);
    assert!(s.toggle_all());
    assert!(s.sound_enabled && s.music_enabled);
}

#[test]
fn cue_files_follow_cue_names() {
    assert_eq!(cue_path("sounds", AudioCue::Takeoff), "sounds/takeoff.mp3");
    assert_eq!(cue_path("sounds", AudioCue::Landing), "sounds/landing.mp3");
    assert_eq!(cue_path("sounds", AudioCue::Transform), "sounds/transform.mp3");
    assert_eq!(music_path("sounds"), "sounds/background.mp3");
    assert_eq!(on_off(true), "on");
}
