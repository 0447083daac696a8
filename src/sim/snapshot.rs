//! Read-only view of a tick's outcome for renderers and audio

use serde::{Deserialize, Serialize};

use super::state::{EntityTag, GameState, GameStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftView {
    pub x: f32,
    pub y: f32,
    pub tilt: f32,
    pub boosting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: EntityTag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Everything a presentation layer needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub score: u32,
    pub high_score: u32,
    pub craft: CraftView,
    /// In spawn order
    pub entities: Vec<EntityView>,
    /// In spawn order
    pub clouds: Vec<CloudView>,
    /// HUD hint: a difficulty step was just reached
    pub danger_rising: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let boosting = state.is_boosting();
        Self {
            status: state.status,
            score: state.score,
            high_score: state.high_score,
            craft: CraftView {
                x: crate::consts::CRAFT_X,
                y: state.craft.y,
                tilt: state.craft.tilt,
                boosting,
            },
            entities: state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    width: e.size.x,
                    height: e.size.y,
                    kind: e.tag(),
                })
                .collect(),
            clouds: state
                .clouds
                .iter()
                .map(|c| CloudView {
                    id: c.id,
                    x: c.pos.x,
                    y: c.pos.y,
                    scale: c.scale,
                })
                .collect(),
            danger_rising: state.is_playing()
                && !boosting
                && state.score > 0
                && state.score % 10 == 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session::start_run;
    use crate::sim::state::EntityKind;
    use glam::Vec2;

    #[test]
    fn test_capture_preserves_order_and_fields() {
        let mut state = GameState::default();
        start_run(&mut state, 0.0);
        let a = state.insert_entity(EntityKind::Bomb, Vec2::new(500.0, 20.0), 0.0);
        let b = state.insert_entity(EntityKind::BoostStar, Vec2::new(600.0, 40.0), 0.0);

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.status, GameStatus::Playing);
        assert_eq!(snap.entities.len(), 2);
        assert_eq!(snap.entities[0].id, a);
        assert_eq!(snap.entities[0].kind, EntityTag::Bomb);
        assert_eq!(snap.entities[0].width, 50.0);
        assert_eq!(snap.entities[1].id, b);
        assert!(!snap.craft.boosting);
    }

    #[test]
    fn test_danger_hint() {
        let mut state = GameState::default();
        start_run(&mut state, 0.0);
        assert!(!Snapshot::capture(&state).danger_rising);
        state.score = 20;
        assert!(Snapshot::capture(&state).danger_rising);
        let params = state.tuning.boost;
        state.boost.activate(&params);
        assert!(!Snapshot::capture(&state).danger_rising);
    }

    #[test]
    fn test_json_uses_plain_kind_names() {
        let mut state = GameState::default();
        state.insert_entity(EntityKind::FastBird, Vec2::new(1.0, 2.0), 0.0);
        let json = Snapshot::capture(&state).to_json().expect("serializes");
        assert!(json.contains("\"FastBird\""));
        assert!(json.contains("\"status\":\"Start\""));
    }
}
