use std::fmt;

use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    AteRegular,
    AteGold,
    GameOver,
    NewHighScore,
    BodyCut,
    HeadShot,
    Explosion,
    GoldWarningBeep,
}

impl AudioCue {
    pub const ALL: [AudioCue; 8] = [
        AudioCue::AteRegular,
        AudioCue::AteGold,
        AudioCue::GameOver,
        AudioCue::NewHighScore,
        AudioCue::BodyCut,
        AudioCue::HeadShot,
        AudioCue::Explosion,
        AudioCue::GoldWarningBeep,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::AteRegular => "ATE_REGULAR",
            AudioCue::AteGold => "ATE_GOLD",
            AudioCue::GameOver => "GAME_OVER",
            AudioCue::NewHighScore => "NEW_HIGH_SCORE",
            AudioCue::BodyCut => "BODY_CUT",
            AudioCue::HeadShot => "HEAD_SHOT",
            AudioCue::Explosion => "EXPLOSION",
            AudioCue::GoldWarningBeep => "GOLD_WARNING_BEEP",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CueEvent {
    Play(AudioCue),
    Stop(AudioCue),
}

/// Plays cues. Fire-and-forget: nothing the game does depends on playback.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);

    fn stop(&mut self, _cue: AudioCue) {}

    fn dispatch(&mut self, event: CueEvent) {
        match event {
            CueEvent::Play(cue) => self.play(cue),
            CueEvent::Stop(cue) => self.stop(cue),
        }
    }
}

/// Stand-in used when no sound can be played; cues only show up in the log.
#[derive(Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        debug!("[SOUND] {}", cue);
    }

    fn stop(&mut self, cue: AudioCue) {
        debug!("[SOUND] stop {}", cue);
    }
}

/// Keeps every event; lets callers inspect what a frame asked for.
impl AudioSink for Vec<CueEvent> {
    fn play(&mut self, cue: AudioCue) {
        self.push(CueEvent::Play(cue));
    }

    fn stop(&mut self, cue: AudioCue) {
        self.push(CueEvent::Stop(cue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<&str> = AudioCue::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), AudioCue::ALL.len());
    }

    #[test]
    fn test_dispatch_routes_stop() {
        let mut sink: Vec<CueEvent> = Vec::new();
        sink.dispatch(CueEvent::Stop(AudioCue::GoldWarningBeep));
        sink.dispatch(CueEvent::Play(AudioCue::AteGold));
        assert_eq!(
            sink,
            vec![CueEvent::Stop(AudioCue::GoldWarningBeep), CueEvent::Play(AudioCue::AteGold)]
        );
    }
}
