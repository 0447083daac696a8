//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel; hosts may override any subset from
//! JSON (missing fields keep their defaults).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::DifficultyCurve;

/// Errors raised while loading tuning overrides
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Boost power-up parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostParams {
    /// Countdown length in ticks (~2 s at 60 fps)
    pub duration_ticks: u32,
    /// Scroll speed multiplier (and spawn interval divisor) while active
    pub speed_multiplier: f32,
    /// Points awarded per star
    pub score_bonus: u32,
}

impl Default for BoostParams {
    fn default() -> Self {
        Self {
            duration_ticks: 120,
            speed_multiplier: 2.5,
            score_bonus: 10,
        }
    }
}

/// All tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulty: DifficultyCurve,
    pub boost: BoostParams,
    /// Background cloud spawn interval (ms), divided by the boost multiplier
    pub cloud_spawn_interval_ms: f64,
    /// Craft movement per tick while an arrow key is held
    pub keyboard_step: f32,
    /// Fraction of the remaining distance to the pointer covered each tick
    pub pointer_smoothing: f32,
    /// Degrees of tilt per unit of vertical movement in a tick
    pub tilt_factor: f32,
    /// Tilt limit in degrees (symmetric)
    pub max_tilt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty: DifficultyCurve::default(),
            boost: BoostParams::default(),
            cloud_spawn_interval_ms: 2000.0,
            keyboard_step: 7.0,
            pointer_smoothing: 0.15,
            tilt_factor: 3.5,
            max_tilt: 25.0,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let d = &self.difficulty;
        check("difficulty.base_speed", d.base_speed as f64, |v| v > 0.0)?;
        check("difficulty.speed_increment", d.speed_increment as f64, |v| v >= 0.0)?;
        check("difficulty.min_spawn_interval_ms", d.min_spawn_interval_ms, |v| v > 0.0)?;
        check("difficulty.base_spawn_interval_ms", d.base_spawn_interval_ms, |v| {
            v >= d.min_spawn_interval_ms
        })?;
        check("difficulty.spawn_decrement_ms", d.spawn_decrement_ms, |v| v >= 0.0)?;
        check("boost.speed_multiplier", self.boost.speed_multiplier as f64, |v| v >= 1.0)?;
        check("cloud_spawn_interval_ms", self.cloud_spawn_interval_ms, |v| v > 0.0)?;
        check("keyboard_step", self.keyboard_step as f64, |v| v >= 0.0)?;
        check("pointer_smoothing", self.pointer_smoothing as f64, |v| v > 0.0 && v <= 1.0)?;
        check("tilt_factor", self.tilt_factor as f64, |v| v >= 0.0)?;
        check("max_tilt", self.max_tilt as f64, |v| v > 0.0)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, ok: impl Fn(f64) -> bool) -> Result<(), TuningError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "keyboard_step": 9.0, "boost": { "score_bonus": 25 } }"#)
            .expect("valid overrides");
        assert_eq!(tuning.keyboard_step, 9.0);
        assert_eq!(tuning.boost.score_bonus, 25);
        assert_eq!(tuning.boost.duration_ticks, 120);
        assert_eq!(tuning.difficulty, DifficultyCurve::default());
    }

    #[test]
    fn test_rejects_boost_below_one() {
        let err = Tuning::from_json(r#"{ "boost": { "speed_multiplier": 0.5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::OutOfRange {
                field: "boost.speed_multiplier",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_floor_above_base_interval() {
        let err = Tuning::from_json(
            r#"{ "difficulty": { "base_spawn_interval_ms": 500.0, "min_spawn_interval_ms": 600.0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("base_spawn_interval_ms"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }
}
