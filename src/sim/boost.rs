//! Boost power-up countdown
//!
//! The countdown is frame-counted: a boost lasts `duration_ticks` ticks no
//! matter how far apart the host schedules them.

use serde::{Deserialize, Serialize};

use super::tuning::BoostParams;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTimer {
    remaining_ticks: u32,
}

impl BoostTimer {
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Start or refresh the boost. Re-collection resets the countdown rather
    /// than stacking. Returns true if a boost was already running.
    pub fn activate(&mut self, params: &BoostParams) -> bool {
        let was_active = self.is_active();
        self.remaining_ticks = params.duration_ticks;
        was_active
    }

    /// Advance one tick. Returns true on the tick the boost runs out.
    pub fn tick(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        self.remaining_ticks == 0
    }

    pub fn multiplier(&self, params: &BoostParams) -> f32 {
        if self.is_active() {
            params.speed_multiplier
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.remaining_ticks = 0;
    }
}
