use std::fmt;

/// Outbound notification emitted when a formation switch is requested.
///
/// The engine never waits on playback; drivers drain the queue with
/// [`ShowEngine::take_cues`](crate::ShowEngine::take_cues) and hand each cue to
/// whatever plays sounds on their platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Takeoff,
    Landing,
    Transform,
}

impl AudioCue {
    pub const ALL: [AudioCue; 3] = [AudioCue::Takeoff, AudioCue::Landing, AudioCue::Transform];

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Takeoff => "takeoff",
            AudioCue::Landing => "landing",
            AudioCue::Transform => "transform",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
