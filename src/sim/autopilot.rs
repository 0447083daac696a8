//! Idle/demo mode steering
//!
//! Produces a pointer target from the current state so hosts can run the
//! game unattended. It dodges the nearest threat ahead and grabs stars
//! when nothing is in the way.

use super::state::{GameState, MovingEntity};
use crate::consts::*;
use crate::{clamp_craft_y, max_craft_y};

/// How far ahead of the craft's nose entities are considered
const LOOKAHEAD: f32 = 260.0;
/// Extra vertical room kept around a threat
const CLEARANCE: f32 = 12.0;

fn is_ahead(e: &MovingEntity) -> bool {
    e.pos.x + e.size.x > CRAFT_X && e.pos.x < CRAFT_X + CRAFT_WIDTH + LOOKAHEAD
}

fn blocks_lane(e: &MovingEntity, craft_y: f32) -> bool {
    e.pos.y < craft_y + CRAFT_HEIGHT + CLEARANCE && e.pos.y + e.size.y > craft_y - CLEARANCE
}

/// Pointer y the demo pilot would aim for this tick
pub fn steer(state: &GameState) -> f32 {
    let craft_y = state.craft.y;

    let threat = state
        .entities
        .iter()
        .filter(|e| e.tag().is_harmful() && is_ahead(e) && blocks_lane(e, craft_y))
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(threat) = threat {
        // Under boost the pilot simply holds course
        if state.is_boosting() {
            return craft_y;
        }
        let above = threat.pos.y - CRAFT_HEIGHT - CLEARANCE;
        let below = threat.pos.y + threat.size.y + CLEARANCE;
        let above_ok = above >= 0.0;
        let below_ok = below <= max_craft_y();
        let target = match (above_ok, below_ok) {
            (true, true) => {
                if (craft_y - above).abs() <= (below - craft_y).abs() {
                    above
                } else {
                    below
                }
            }
            (true, false) => above,
            (false, true) => below,
            (false, false) => craft_y,
        };
        return clamp_craft_y(target);
    }

    let star = state
        .entities
        .iter()
        .filter(|e| !e.tag().is_harmful() && is_ahead(e))
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    match star {
        Some(star) => clamp_craft_y(star.pos.y + star.size.y / 2.0 - CRAFT_HEIGHT / 2.0),
        None => craft_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::start_run;
    use crate::sim::state::EntityKind;
    use glam::Vec2;

    fn playing() -> GameState {
        let mut state = GameState::default();
        start_run(&mut state, 0.0);
        state
    }

    #[test]
    fn test_holds_course_when_clear() {
        let state = playing();
        assert_eq!(steer(&state), state.craft.y);
    }

    #[test]
    fn test_dodges_threat_in_lane() {
        let mut state = playing();
        state.insert_entity(EntityKind::Bomb, Vec2::new(250.0, 240.0), 0.0);
        let target = steer(&state);
        // Either fully above or fully below the bomb with clearance
        assert!(target + CRAFT_HEIGHT <= 240.0 || target >= 290.0);
    }

    #[test]
    fn test_ignores_threats_behind() {
        let mut state = playing();
        state.insert_entity(EntityKind::Bomb, Vec2::new(20.0, 240.0), 0.0);
        assert_eq!(steer(&state), state.craft.y);
    }

    #[test]
    fn test_goes_for_star() {
        let mut state = playing();
        state.insert_entity(EntityKind::BoostStar, Vec2::new(300.0, 100.0), 0.0);
        assert_eq!(steer(&state), 100.0);
    }

    #[test]
    fn test_target_always_in_bounds() {
        let mut state = playing();
        state.craft.y = 0.0;
        state.insert_entity(EntityKind::StaticCloud, Vec2::new(200.0, 0.0), 0.0);
        let target = steer(&state);
        assert!((0.0..=max_craft_y()).contains(&target));
    }
}
