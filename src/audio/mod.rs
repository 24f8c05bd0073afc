pub mod settings;

use crate::core::AudioCue;
use settings::{cue_path, music_path, AudioSettings};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Cue sounds and looping background music played through `<audio>`
/// elements. Playback is fire-and-forget: the show never waits on it.
pub struct AudioManager {
    settings: AudioSettings,
    cues: Vec<(AudioCue, web::HtmlAudioElement)>,
    music: Option<web::HtmlAudioElement>,
}

impl AudioManager {
    pub fn new(sounds_dir: &str, settings: AudioSettings) -> Self {
        let cues = AudioCue::ALL
            .iter()
            .filter_map(|&cue| create_audio(&cue_path(sounds_dir, cue), false).map(|el| (cue, el)))
            .collect();
        let music = create_audio(&music_path(sounds_dir), true);
        let mut manager = Self {
            settings,
            cues,
            music,
        };
        manager.apply_volume();
        manager
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Restart the cue from the beginning at the current volume.
    pub fn play_cue(&self, cue: AudioCue) {
        if !self.settings.plays_cue(cue) {
            return;
        }
        if let Some((_, el)) = self.cues.iter().find(|(c, _)| *c == cue) {
            el.set_current_time(0.0);
            el.set_volume(self.settings.volume() as f64);
            play(el, cue.name());
        }
    }

    pub fn play_music(&self) {
        if !self.settings.music_enabled {
            return;
        }
        if let Some(el) = &self.music {
            el.set_volume(self.settings.volume() as f64);
            play(el, "background");
        }
    }

    /// Start the music if it should be playing but is not, e.g. because the
    /// browser blocked autoplay before the first click.
    pub fn ensure_music(&self) {
        if let Some(el) = &self.music {
            if self.settings.music_enabled && el.paused() {
                self.play_music();
            }
        }
    }

    pub fn pause_music(&self) {
        if let Some(el) = &self.music {
            _ = el.pause();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
        self.apply_volume();
    }

    pub fn toggle_sound(&mut self) -> bool {
        let on = self.settings.toggle_sound();
        log::info!("[audio] sound effects {}", settings::on_off(on));
        on
    }

    pub fn toggle_music(&mut self) -> bool {
        let on = self.settings.toggle_music();
        self.sync_music();
        log::info!("[audio] music {}", settings::on_off(on));
        on
    }

    pub fn toggle_all(&mut self) -> bool {
        let on = self.settings.toggle_all();
        self.sync_music();
        log::info!("[audio] all audio {}", settings::on_off(on));
        on
    }

    fn sync_music(&self) {
        if self.settings.music_enabled {
            self.play_music();
        } else {
            self.pause_music();
        }
    }

    fn apply_volume(&mut self) {
        let v = self.settings.volume() as f64;
        for (_, el) in &self.cues {
            el.set_volume(v);
        }
        if let Some(el) = &self.music {
            el.set_volume(v);
        }
    }
}

fn create_audio(src: &str, looping: bool) -> Option<web::HtmlAudioElement> {
    match web::HtmlAudioElement::new_with_src(src) {
        Ok(el) => {
            el.set_loop(looping);
            Some(el)
        }
        Err(e) => {
            log::warn!("[audio] cannot create element for {}: {:?}", src, e);
            None
        }
    }
}

// Browsers reject play() until the page has seen a user gesture.
fn play(el: &web::HtmlAudioElement, label: &'static str) {
    match el.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] {} playback failed: {:?}", label, e);
            }
        }),
        Err(e) => log::warn!("[audio] {} playback failed: {:?}", label, e),
    }
}
