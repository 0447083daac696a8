//! Difficulty curve: obstacle speed and spawn interval as functions of score

use serde::{Deserialize, Serialize};

/// Linear ramp with a hard floor on the spawn interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    /// Scroll speed at score 0 (units per tick)
    pub base_speed: f32,
    /// Added scroll speed per point
    pub speed_increment: f32,
    /// Obstacle spawn interval at score 0 (ms)
    pub base_spawn_interval_ms: f64,
    /// Interval never drops below this (ms)
    pub min_spawn_interval_ms: f64,
    /// Interval reduction per point (ms)
    pub spawn_decrement_ms: f64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            speed_increment: 0.15,
            base_spawn_interval_ms: 1500.0,
            min_spawn_interval_ms: 600.0,
            spawn_decrement_ms: 25.0,
        }
    }
}

impl DifficultyCurve {
    /// Effective obstacle scroll speed for this score and boost multiplier
    pub fn speed(&self, score: u32, boost_multiplier: f32) -> f32 {
        (self.base_speed + score as f32 * self.speed_increment) * boost_multiplier
    }

    /// Effective obstacle spawn interval (ms)
    pub fn spawn_interval_ms(&self, score: u32, boost_multiplier: f32) -> f64 {
        let ramped = self.base_spawn_interval_ms - score as f64 * self.spawn_decrement_ms;
        (ramped / boost_multiplier as f64).max(self.min_spawn_interval_ms)
    }
}
