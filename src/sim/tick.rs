//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one host frame.

use super::collision::resolve_collisions;
use super::motion::advance_all;
use super::rng::RandomSource;
use super::session::end_run;
use super::spawn::run_spawners;
use super::state::{Craft, GameState};
use super::tuning::Tuning;
use crate::clamp_craft_y;
use crate::consts::*;

/// Input sampled once at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Up arrow held
    pub up: bool,
    /// Down arrow held
    pub down: bool,
    /// Pointer target for the craft's top edge (already clamped by the latch)
    pub pointer_y: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            up: false,
            down: false,
            pointer_y: INITIAL_CRAFT_Y,
        }
    }
}

/// Whether the host should schedule another tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Move the craft toward its input target and derive tilt from the motion.
///
/// Keys step at a fixed rate (up wins if both are held); otherwise the craft
/// closes a fixed fraction of the gap to the pointer each tick.
pub fn steer_craft(craft: &mut Craft, input: &TickInput, tuning: &Tuning) {
    let mut target = craft.y;
    if input.up {
        target -= tuning.keyboard_step;
    } else if input.down {
        target += tuning.keyboard_step;
    } else {
        target += (input.pointer_y - target) * tuning.pointer_smoothing;
    }
    let target = clamp_craft_y(target);

    let dy = target - craft.y;
    craft.tilt = (dy * tuning.tilt_factor).clamp(-tuning.max_tilt, tuning.max_tilt);
    craft.y = target;
}

/// Advance the game state by one frame at host time `now_ms`.
///
/// A no-op returning `Stop` unless a run is in progress. Returns `Stop` on
/// the tick that ends the run.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: f64,
    rng: &mut dyn RandomSource,
) -> LoopControl {
    if !state.is_playing() {
        return LoopControl::Stop;
    }

    state.time_ticks += 1;

    // Boost countdown (frame-counted)
    if state.boost.tick() {
        log::debug!("boost expired at tick {}", state.time_ticks);
    }
    let boosting = state.is_boosting();
    let boost_mult = state.boost_multiplier();

    let curve = state.tuning.difficulty;
    let speed = curve.speed(state.score, boost_mult);
    let spawn_interval = curve.spawn_interval_ms(state.score, boost_mult);

    steer_craft(&mut state.craft, input, &state.tuning);

    run_spawners(state, now_ms, spawn_interval, boost_mult, rng);

    advance_all(state, speed, boost_mult, now_ms, rng);

    let report = resolve_collisions(state, boosting);
    if report.shielded_hits > 0 {
        log::trace!("boost absorbed {} hit(s)", report.shielded_hits);
    }

    if report.terminated {
        end_run(state);
        return LoopControl::Stop;
    }

    LoopControl::Continue
}
