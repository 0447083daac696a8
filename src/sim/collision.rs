//! Collision detection and response
//!
//! Axis-aligned boxes only. Both sides are inset before testing: the craft by
//! a generous padding, entities by a smaller one, so grazes are forgiven.

use serde::{Deserialize, Serialize};

use super::state::{EntityTag, GameEvent, GameState, MovingEntity};
use crate::consts::*;

/// Axis-aligned rectangle (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    /// Rectangle from a top-left corner and size, shrunk by `inset` per side
    pub fn inset(x: f32, y: f32, width: f32, height: f32, inset: f32) -> Self {
        Self {
            left: x + inset,
            right: x + width - inset,
            top: y + inset,
            bottom: y + height - inset,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Craft hitbox for a craft whose top edge is at `craft_y`
pub fn craft_hitbox(craft_y: f32) -> Rect {
    Rect::inset(
        CRAFT_X,
        craft_y,
        CRAFT_WIDTH,
        CRAFT_HEIGHT,
        CRAFT_COLLISION_PADDING,
    )
}

pub fn entity_hitbox(entity: &MovingEntity) -> Rect {
    Rect::inset(
        entity.pos.x,
        entity.pos.y,
        entity.size.x,
        entity.size.y,
        ENTITY_COLLISION_PADDING,
    )
}

/// What one collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Boost stars picked up (and removed)
    pub stars_collected: u32,
    /// Entities that scrolled behind the craft this pass
    pub pass_points: u32,
    /// Harmful contacts absorbed by an active boost
    pub shielded_hits: u32,
    /// A harmful contact happened without boost
    pub terminated: bool,
}

/// Resolve craft/entity contacts and pass scoring for every live entity.
///
/// `boosting` is the boost state this tick started with. Consumed entities
/// are removed only after every entity has been examined. Termination is
/// reported, not applied; the caller ends the run.
pub fn resolve_collisions(state: &mut GameState, boosting: bool) -> CollisionReport {
    let mut report = CollisionReport::default();
    let craft = craft_hitbox(state.craft.y);
    let mut consumed: Vec<u32> = Vec::new();

    for entity in state.entities.iter_mut() {
        if craft.overlaps(&entity_hitbox(entity)) {
            if entity.tag() == EntityTag::BoostStar {
                state.score += state.tuning.boost.score_bonus;
                let refreshed = state.boost.activate(&state.tuning.boost);
                state.boosts_collected += 1;
                state.events.push(GameEvent::Boost);
                log::debug!(
                    "boost star #{} collected ({})",
                    entity.id,
                    if refreshed { "refreshed" } else { "activated" }
                );
                report.stars_collected += 1;
                consumed.push(entity.id);
                continue;
            } else if boosting {
                report.shielded_hits += 1;
            } else {
                report.terminated = true;
            }
        }

        if !entity.passed && entity.pos.x < CRAFT_X {
            entity.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Score);
            report.pass_points += 1;
        }
    }

    if !consumed.is_empty() {
        state.entities.retain(|e| !consumed.contains(&e.id));
    }

    report
}
