use std::collections::HashMap;

use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use tracing::{info, warn};

use gold_snake::audio::{AudioCue, AudioSink, LogAudio};

// Simple WAV (PCM16 mono) generator for tones
fn generate_wav_sine(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let sample_rate: u32 = 44100;
    let num_samples: u32 = (duration_seconds * sample_rate as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2;
    let byte_rate: u32 = sample_rate * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude: f32 = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / sample_rate as f32;
        let sample = (amplitude * (std::f32::consts::TAU * frequency_hz * t).sin() * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

/// Pitch and length of the tone standing in for each cue.
fn tone(cue: AudioCue) -> (f32, f32) {
    match cue {
        AudioCue::AteRegular => (880.0, 0.08),
        AudioCue::AteGold => (1320.0, 0.15),
        AudioCue::GameOver => (110.0, 0.4),
        AudioCue::NewHighScore => (660.0, 0.5),
        AudioCue::BodyCut => (220.0, 0.15),
        AudioCue::HeadShot => (90.0, 0.35),
        AudioCue::Explosion => (60.0, 0.3),
        AudioCue::GoldWarningBeep => (1760.0, 0.05),
    }
}

pub struct ToneAudio {
    sounds: HashMap<AudioCue, Sound>,
    volume: f32,
}

impl AudioSink for ToneAudio {
    fn play(&mut self, cue: AudioCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            audio::play_sound(sound, PlaySoundParams { looped: false, volume: self.volume });
        }
    }

    fn stop(&mut self, cue: AudioCue) {
        if let Some(sound) = self.sounds.get(&cue) {
            audio::stop_sound(sound);
        }
    }
}

/// Synthesizes one tone per cue. Falls back to the logging stub when the
/// audio backend refuses any of them.
pub async fn load(volume: f32) -> Box<dyn AudioSink> {
    let mut sounds = HashMap::new();
    for cue in AudioCue::ALL {
        let (frequency, duration) = tone(cue);
        match load_sound_from_bytes(&generate_wav_sine(frequency, duration, 0.7)).await {
            Ok(sound) => {
                sounds.insert(cue, sound);
            }
            Err(e) => {
                warn!(%cue, error = ?e, "Sound unavailable, cues will only be logged");
                return Box::new(LogAudio);
            }
        }
    }
    info!(cues = sounds.len(), "Sounds ready");
    Box::new(ToneAudio { sounds, volume: volume.clamp(0.0, 1.0) })
}
