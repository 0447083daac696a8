//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`, which the host
//! owns and hands to `tick` by mutable reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boost::BoostTimer;
use super::tuning::Tuning;
use crate::consts::*;

/// Run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for the first start action
    #[default]
    Start,
    /// Active run, ticks advance the simulation
    Playing,
    /// Run ended by a crash, waiting for restart
    GameOver,
}

/// Plain type tag for a moving entity (what renderers and logs see)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    StaticCloud,
    OscillatingBalloon,
    FallingSatellite,
    Bomb,
    FastBird,
    BoostStar,
}

impl EntityTag {
    /// Fixed size per type (width, height)
    pub fn size(self) -> Vec2 {
        match self {
            EntityTag::StaticCloud => Vec2::new(120.0, 70.0),
            EntityTag::OscillatingBalloon => Vec2::new(40.0, 60.0),
            EntityTag::FallingSatellite => Vec2::new(75.0, 75.0),
            EntityTag::Bomb => Vec2::new(50.0, 50.0),
            EntityTag::FastBird => Vec2::new(30.0, 30.0),
            EntityTag::BoostStar => Vec2::new(40.0, 40.0),
        }
    }

    /// Everything except the boost star ends an unboosted run on contact
    pub fn is_harmful(self) -> bool {
        self != EntityTag::BoostStar
    }

    /// Scroll speed relative to the current obstacle speed
    pub fn speed_multiplier(self) -> f32 {
        match self {
            EntityTag::FastBird => FAST_BIRD_SPEED_MULT,
            EntityTag::StaticCloud => STATIC_CLOUD_SPEED_MULT,
            _ => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityTag::StaticCloud => "static_cloud",
            EntityTag::OscillatingBalloon => "oscillating_balloon",
            EntityTag::FallingSatellite => "falling_satellite",
            EntityTag::Bomb => "bomb",
            EntityTag::FastBird => "fast_bird",
            EntityTag::BoostStar => "boost_star",
        }
    }
}

/// Entity variant with the parameters its motion rule needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    StaticCloud,
    /// Bobs around `initial_y` with the given phase offset
    OscillatingBalloon { initial_y: f32, phase: f32 },
    /// Falls at a constant per-tick speed
    FallingSatellite { vertical_speed: f32 },
    Bomb,
    FastBird,
    BoostStar,
}

impl EntityKind {
    pub fn tag(&self) -> EntityTag {
        match self {
            EntityKind::StaticCloud => EntityTag::StaticCloud,
            EntityKind::OscillatingBalloon { .. } => EntityTag::OscillatingBalloon,
            EntityKind::FallingSatellite { .. } => EntityTag::FallingSatellite,
            EntityKind::Bomb => EntityTag::Bomb,
            EntityKind::FastBird => EntityTag::FastBird,
            EntityKind::BoostStar => EntityTag::BoostStar,
        }
    }
}

/// A scrolling obstacle or pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingEntity {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EntityKind,
    /// Set once the entity scrolls behind the craft
    pub passed: bool,
    /// Host timestamp (ms) at spawn
    pub spawn_ms: f64,
}

impl MovingEntity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, spawn_ms: f64) -> Self {
        Self {
            id,
            pos,
            size: kind.tag().size(),
            kind,
            passed: false,
            spawn_ms,
        }
    }

    pub fn tag(&self) -> EntityTag {
        self.kind.tag()
    }

    /// True once the outer margins of the playfield are fully cleared
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= -ENTITY_DESPAWN_MARGIN || self.pos.y >= GAME_HEIGHT + ENTITY_DESPAWN_MARGIN
    }
}

/// Decorative parallax cloud, no gameplay role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundCloud {
    pub id: u32,
    pub pos: Vec2,
    pub scale: f32,
    /// Scroll speed in units per tick before boost
    pub speed: f32,
}

impl BackgroundCloud {
    pub fn is_off_screen(&self) -> bool {
        self.pos.x <= CLOUD_DESPAWN_X
    }
}

/// The player's craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Craft {
    /// Top edge, always within [0, GAME_HEIGHT - CRAFT_HEIGHT]
    pub y: f32,
    /// Degrees, positive when descending
    pub tilt: f32,
}

impl Default for Craft {
    fn default() -> Self {
        Self {
            y: INITIAL_CRAFT_Y,
            tilt: 0.0,
        }
    }
}

/// One-shot notifications raised during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An entity scrolled past the craft
    Score,
    /// A boost star was collected
    Boost,
    /// The run ended
    Crash,
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    /// Best score this process has seen
    pub high_score: u32,
    pub craft: Craft,
    pub boost: BoostTimer,
    /// Live obstacles and pickups, in spawn order
    pub entities: Vec<MovingEntity>,
    /// Decorative clouds, in spawn order
    pub clouds: Vec<BackgroundCloud>,
    /// Host timestamp of the last obstacle spawn
    pub last_obstacle_spawn_ms: f64,
    /// Host timestamp of the last cloud spawn
    pub last_cloud_spawn_ms: f64,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Boost stars collected in the current run
    pub boosts_collected: u32,
    /// Balance parameters
    pub tuning: Tuning,
    /// Events raised since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            status: GameStatus::Start,
            score: 0,
            high_score: 0,
            craft: Craft::default(),
            boost: BoostTimer::default(),
            entities: Vec::new(),
            clouds: Vec::new(),
            last_obstacle_spawn_ms: 0.0,
            last_cloud_spawn_ms: 0.0,
            time_ticks: 0,
            boosts_collected: 0,
            tuning,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_boosting(&self) -> bool {
        self.boost.is_active()
    }

    /// Current scroll/spawn multiplier
    pub fn boost_multiplier(&self) -> f32 {
        self.boost.multiplier(&self.tuning.boost)
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Test/host helper: place an entity directly into the live collection
    pub fn insert_entity(&mut self, kind: EntityKind, pos: Vec2, spawn_ms: f64) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(MovingEntity::new(id, kind, pos, spawn_ms));
        id
    }
}
