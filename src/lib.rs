//! Sky High Flyer - a side-scrolling sky avoidance game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (spawning, motion, collisions, run status)
//! - `game`: Host-facing orchestrator wiring input, audio and scores to the sim
//! - `platform`: Frame scheduling abstraction
//! - `audio`: Sound trigger boundary and Web Audio backend
//! - `settings`: Player preferences
//! - `highscores`: In-process leaderboard
//! - `input`: Input latch sampled once per tick

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 500.0;

    /// Craft geometry. The craft never moves horizontally.
    pub const CRAFT_WIDTH: f32 = 60.0;
    pub const CRAFT_HEIGHT: f32 = 40.0;
    pub const CRAFT_X: f32 = 100.0;
    pub const INITIAL_CRAFT_Y: f32 = 250.0;

    /// Hitbox insets (craft is more forgiving than entities)
    pub const CRAFT_COLLISION_PADDING: f32 = 12.0;
    pub const ENTITY_COLLISION_PADDING: f32 = 5.0;

    /// Off-screen margins used by the removal pass
    pub const ENTITY_DESPAWN_MARGIN: f32 = 150.0;
    pub const CLOUD_DESPAWN_X: f32 = -200.0;

    /// Balloon bob
    pub const BALLOON_AMPLITUDE: f32 = 50.0;
    pub const BALLOON_ANGULAR_RATE: f32 = 2.0;
    /// Balloons spawn at least this far from the top edge...
    pub const BALLOON_SPAWN_MARGIN: f32 = 30.0;
    /// ...inside a band this much shorter than the playfield
    pub const BALLOON_SPAWN_BAND_INSET: f32 = 120.0;

    /// Satellite fall speed (units per tick)
    pub const SATELLITE_FALL_SPEED: f32 = 1.5;

    /// Per-type scroll multipliers
    pub const FAST_BIRD_SPEED_MULT: f32 = 2.0;
    pub const STATIC_CLOUD_SPEED_MULT: f32 = 0.7;

    /// Bomb lateral jitter half-width
    pub const BOMB_JITTER: f32 = 1.0;

    /// Background cloud band (clouds stay above the bottom 60 units)
    pub const CLOUD_BAND_INSET: f32 = 60.0;

    /// Nominal host refresh rate
    pub const NOMINAL_FPS: u32 = 60;

    /// Default master volume
    pub const DEFAULT_VOLUME: f32 = 0.3;
}

/// Highest y the craft's top edge may take
#[inline]
pub fn max_craft_y() -> f32 {
    consts::GAME_HEIGHT - consts::CRAFT_HEIGHT
}

/// Clamp a craft top-edge y into the playfield
#[inline]
pub fn clamp_craft_y(y: f32) -> f32 {
    y.clamp(0.0, max_craft_y())
}
