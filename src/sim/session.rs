//! Run lifecycle: the status state machine, run reset and high score

use super::state::{Craft, GameEvent, GameState, GameStatus};

/// Things that can move the status machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTrigger {
    /// Start or restart action from the host
    Start,
    /// Unboosted harmful contact
    Crash,
}

impl GameStatus {
    /// Transition table. `None` means the trigger is not valid here.
    pub fn on(self, trigger: StatusTrigger) -> Option<GameStatus> {
        match (self, trigger) {
            (GameStatus::Start | GameStatus::GameOver, StatusTrigger::Start) => {
                Some(GameStatus::Playing)
            }
            (GameStatus::Playing, StatusTrigger::Crash) => Some(GameStatus::GameOver),
            _ => None,
        }
    }
}

/// Begin a fresh run at host time `now_ms`.
///
/// Resets score, entities, craft, boost and spawn watermarks; the high score
/// survives. Returns false (and changes nothing) while a run is in progress.
pub fn start_run(state: &mut GameState, now_ms: f64) -> bool {
    let Some(next) = state.status.on(StatusTrigger::Start) else {
        log::warn!("ignoring start while {:?}", state.status);
        return false;
    };

    state.status = next;
    state.score = 0;
    state.craft = Craft::default();
    state.boost.reset();
    state.entities.clear();
    state.clouds.clear();
    state.last_obstacle_spawn_ms = now_ms;
    state.last_cloud_spawn_ms = now_ms;
    state.time_ticks = 0;
    state.boosts_collected = 0;
    state.events.clear();

    log::info!("run started (best so far: {})", state.high_score);
    true
}

/// End the current run. Returns false if no run was in progress.
pub fn end_run(state: &mut GameState) -> bool {
    let Some(next) = state.status.on(StatusTrigger::Crash) else {
        log::warn!("ignoring crash while {:?}", state.status);
        return false;
    };

    state.status = next;
    state.events.push(GameEvent::Crash);

    if state.score > state.high_score {
        log::info!(
            "new high score: {} (previous {})",
            state.score,
            state.high_score
        );
        state.high_score = state.score;
    }
    log::info!(
        "run over: score {} after {} ticks",
        state.score,
        state.time_ticks
    );
    true
}
