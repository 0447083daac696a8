//! Player preferences
//!
//! Kept in memory for the life of the process; hosts may seed them from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VOLUME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    /// Silence everything without forgetting the volume
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings, clamping anything out of range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.volume = sanitize_volume(settings.volume);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Set the volume. Raising it above zero while muted unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = sanitize_volume(volume);
        if self.volume > 0.0 && self.muted {
            self.muted = false;
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Gain the audio backend should settle at
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        DEFAULT_VOLUME
    }
}
