use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::grid::GridSize;

pub const DEFAULT_SETTINGS_PATH: &str = "gold_snake.json";

/// Tunables read from the settings file. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Ticks per second at run start.
    pub initial_speed: u32,
    /// Half-width of the blast square, in cells.
    pub blast_radius: i32,
    pub gold_duration_secs: f64,
    pub gold_interval_secs: f64,
    pub gold_warning_secs: f64,
    pub high_score_path: PathBuf,
    pub sound_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_speed: 10,
            blast_radius: 3,
            gold_duration_secs: 5.0,
            gold_interval_secs: 10.0,
            gold_warning_secs: 2.5,
            high_score_path: PathBuf::from("highscores.txt"),
            sound_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_width, self.grid_height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width < 1 || self.grid_height < 1 {
            return Err(Error::InvalidSettings(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_speed < 1 {
            return Err(Error::InvalidSettings("initial_speed must be at least 1".to_string()));
        }
        if self.blast_radius < 0 {
            return Err(Error::InvalidSettings("blast_radius must not be negative".to_string()));
        }
        if !(self.gold_duration_secs > 0.0 && self.gold_interval_secs > 0.0) {
            return Err(Error::InvalidSettings("gold timings must be positive".to_string()));
        }
        if self.gold_warning_secs < 0.0 {
            return Err(Error::InvalidSettings("gold_warning_secs must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.sound_volume) {
            return Err(Error::InvalidSettings(format!(
                "sound_volume must be within 0..=1, got {}",
                self.sound_volume
            )));
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads the settings file. A missing file yields the defaults and writes
    /// them out so they can be edited.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_json(&text)?;
                info!(path = %path.display(), "Loaded settings");
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let settings = Self::default();
                if let Err(e) = settings.save(path) {
                    warn!(error = %e, "Could not write default settings");
                }
                Ok(settings)
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| Error::io(path, e))
    }
}
