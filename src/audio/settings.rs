use show_core::AudioCue;

pub const DEFAULT_VOLUME: f32 = 0.5;

/// Playback switches and volume shared by cue sounds and background music.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioSettings {
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Clamped to [0, 1]; NaN leaves the volume unchanged.
    pub fn set_volume(&mut self, volume: f32) {
        if !volume.is_nan() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Master switch. Anything on turns everything off, otherwise everything
    /// comes back on. Returns the new state.
    pub fn toggle_all(&mut self) -> bool {
        let on = !self.any_enabled();
        self.sound_enabled = on;
        self.music_enabled = on;
        on
    }

    pub fn any_enabled(&self) -> bool {
        self.sound_enabled || self.music_enabled
    }

    pub fn plays_cue(&self, _cue: AudioCue) -> bool {
        self.sound_enabled && self.volume > 0.0
    }
}

pub fn cue_path(dir: &str, cue: AudioCue) -> String {
    format!("{dir}/{}.mp3", cue.name())
}

pub fn music_path(dir: &str) -> String {
    format!("{dir}/background.mp3")
}

pub fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
