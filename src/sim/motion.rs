//! Per-tick entity motion and off-screen culling

use super::rng::RandomSource;
use super::state::{BackgroundCloud, EntityKind, GameState, MovingEntity};
use crate::consts::*;

/// Move one entity for this tick.
///
/// Horizontal scroll is per tick; the balloon bob follows host time since
/// spawn so it stays smooth when ticks arrive unevenly.
pub fn advance_entity(
    entity: &mut MovingEntity,
    speed: f32,
    now_ms: f64,
    rng: &mut dyn RandomSource,
) {
    entity.pos.x -= speed * entity.tag().speed_multiplier();

    match entity.kind {
        EntityKind::Bomb => {
            entity.pos.x += rng.range(-BOMB_JITTER, BOMB_JITTER);
        }
        EntityKind::OscillatingBalloon { initial_y, phase } => {
            let elapsed_secs = ((now_ms - entity.spawn_ms) / 1000.0) as f32;
            entity.pos.y =
                initial_y + (elapsed_secs * BALLOON_ANGULAR_RATE + phase).sin() * BALLOON_AMPLITUDE;
        }
        EntityKind::FallingSatellite { vertical_speed } => {
            entity.pos.y += vertical_speed;
        }
        EntityKind::StaticCloud | EntityKind::FastBird | EntityKind::BoostStar => {}
    }
}

pub fn advance_cloud(cloud: &mut BackgroundCloud, boost_multiplier: f32) {
    cloud.pos.x -= cloud.speed * boost_multiplier;
}

/// Move everything, then drop whatever left the playfield
pub fn advance_all(
    state: &mut GameState,
    speed: f32,
    boost_multiplier: f32,
    now_ms: f64,
    rng: &mut dyn RandomSource,
) {
    for entity in &mut state.entities {
        advance_entity(entity, speed, now_ms, rng);
    }
    state.entities.retain(|e| !e.is_off_screen());

    for cloud in &mut state.clouds {
        advance_cloud(cloud, boost_multiplier);
    }
    state.clouds.retain(|c| !c.is_off_screen());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;
    use glam::Vec2;

    fn entity(kind: EntityKind, x: f32, y: f32) -> MovingEntity {
        MovingEntity::new(1, kind, Vec2::new(x, y), 0.0)
    }

    #[test]
    fn test_scroll_multipliers() {
        let mut rng = SequenceSource::constant(0.5);
        let mut bird = entity(EntityKind::FastBird, 400.0, 100.0);
        let mut cloud = entity(EntityKind::StaticCloud, 400.0, 100.0);
        let mut star = entity(EntityKind::BoostStar, 400.0, 100.0);
        advance_entity(&mut bird, 10.0, 16.0, &mut rng);
        advance_entity(&mut cloud, 10.0, 16.0, &mut rng);
        advance_entity(&mut star, 10.0, 16.0, &mut rng);
        assert_eq!(bird.pos.x, 380.0);
        assert!((cloud.pos.x - 393.0).abs() < 1e-4);
        assert_eq!(star.pos, Vec2::new(390.0, 100.0));
    }

    #[test]
    fn test_bomb_jitter_is_bounded() {
        let mut low = SequenceSource::constant(0.0);
        let mut bomb = entity(EntityKind::Bomb, 400.0, 100.0);
        advance_entity(&mut bomb, 5.0, 16.0, &mut low);
        assert_eq!(bomb.pos.x, 394.0);

        let mut mid = SequenceSource::constant(0.5);
        let mut bomb = entity(EntityKind::Bomb, 400.0, 100.0);
        advance_entity(&mut bomb, 5.0, 16.0, &mut mid);
        assert_eq!(bomb.pos.x, 395.0);
    }

    #[test]
    fn test_balloon_follows_sine_of_elapsed_time() {
        let mut rng = SequenceSource::constant(0.0);
        let mut balloon = entity(
            EntityKind::OscillatingBalloon {
                initial_y: 200.0,
                phase: 0.0,
            },
            400.0,
            200.0,
        );
        // sin(0.25 * 2) * 50
        advance_entity(&mut balloon, 5.0, 250.0, &mut rng);
        let expected = 200.0 + (0.5f32).sin() * 50.0;
        assert!((balloon.pos.y - expected).abs() < 1e-3);

        // Same host time gives same y regardless of tick count
        advance_entity(&mut balloon, 5.0, 250.0, &mut rng);
        assert!((balloon.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_satellite_falls_at_constant_rate() {
        let mut rng = SequenceSource::constant(0.0);
        let mut sat = entity(
            EntityKind::FallingSatellite {
                vertical_speed: 1.5,
            },
            400.0,
            -75.0,
        );
        for _ in 0..10 {
            advance_entity(&mut sat, 5.0, 0.0, &mut rng);
        }
        assert!((sat.pos.y - -60.0).abs() < 1e-4);
    }

    #[test]
    fn test_removal_threshold() {
        let mut state = GameState::default();
        let mut rng = SequenceSource::constant(0.0);
        // After a zero-speed pass: -151 and -150 go, -149 stays
        state.insert_entity(EntityKind::StaticCloud, Vec2::new(-151.0, 10.0), 0.0);
        state.insert_entity(EntityKind::StaticCloud, Vec2::new(-150.0, 10.0), 0.0);
        let kept = state.insert_entity(EntityKind::StaticCloud, Vec2::new(-149.0, 10.0), 0.0);
        advance_all(&mut state, 0.0, 1.0, 0.0, &mut rng);
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].id, kept);
    }

    #[test]
    fn test_fallen_entities_are_removed() {
        let mut state = GameState::default();
        let mut rng = SequenceSource::constant(0.0);
        state.insert_entity(
            EntityKind::FallingSatellite {
                vertical_speed: 1.5,
            },
            Vec2::new(300.0, GAME_HEIGHT + 149.0),
            0.0,
        );
        advance_all(&mut state, 0.0, 1.0, 0.0, &mut rng);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_clouds_scroll_with_boost_and_cull() {
        let mut state = GameState::default();
        let mut rng = SequenceSource::constant(0.0);
        state.clouds.push(BackgroundCloud {
            id: 1,
            pos: Vec2::new(100.0, 50.0),
            scale: 1.0,
            speed: 2.0,
        });
        state.clouds.push(BackgroundCloud {
            id: 2,
            pos: Vec2::new(-198.0, 50.0),
            scale: 1.0,
            speed: 2.0,
        });
        advance_all(&mut state, 5.0, 2.5, 0.0, &mut rng);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.clouds[0].pos.x, 95.0);
    }
}
