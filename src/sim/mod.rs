//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - One tick per host frame, driven from outside
//! - Randomness only through an injected `RandomSource`
//! - Motion before collision, collision before publication

pub mod autopilot;
pub mod boost;
pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tuning;

pub use boost::BoostTimer;
pub use collision::{CollisionReport, Rect, craft_hitbox, entity_hitbox, resolve_collisions};
pub use difficulty::DifficultyCurve;
pub use rng::{RandomSource, SequenceSource, unseeded_rng};
pub use session::{StatusTrigger, end_run, start_run};
pub use snapshot::Snapshot;
pub use state::{
    BackgroundCloud, Craft, EntityKind, EntityTag, GameEvent, GameState, GameStatus, MovingEntity,
};
pub use tick::{LoopControl, TickInput, tick};
pub use tuning::{BoostParams, Tuning, TuningError};
