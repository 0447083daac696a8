//! Procedural spawning of obstacles, pickups and background clouds

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{BackgroundCloud, EntityKind, EntityTag, GameState, MovingEntity};
use crate::consts::*;

/// Cumulative spawn weights, checked in order against one uniform sample
const SPAWN_TABLE: [(f32, EntityTag); 6] = [
    (0.30, EntityTag::StaticCloud),
    (0.50, EntityTag::OscillatingBalloon),
    (0.65, EntityTag::FallingSatellite),
    (0.80, EntityTag::Bomb),
    (0.90, EntityTag::BoostStar),
    (1.00, EntityTag::FastBird),
];

/// Pick an entity type from a uniform sample in [0, 1)
pub fn choose_tag(roll: f32) -> EntityTag {
    SPAWN_TABLE
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, tag)| *tag)
        .unwrap_or(EntityTag::FastBird)
}

/// Build a new entity just off the right edge
pub fn spawn_entity(id: u32, now_ms: f64, rng: &mut dyn RandomSource) -> MovingEntity {
    let tag = choose_tag(rng.next_unit());
    let size = tag.size();
    let phase = rng.range(0.0, std::f32::consts::TAU);

    let (kind, y) = match tag {
        EntityTag::OscillatingBalloon => {
            let band = GAME_HEIGHT - BALLOON_SPAWN_BAND_INSET;
            let initial_y = rng.next_unit() * band + BALLOON_SPAWN_MARGIN;
            (EntityKind::OscillatingBalloon { initial_y, phase }, initial_y)
        }
        EntityTag::FallingSatellite => (
            EntityKind::FallingSatellite {
                vertical_speed: SATELLITE_FALL_SPEED,
            },
            -size.y,
        ),
        EntityTag::StaticCloud => (EntityKind::StaticCloud, rng.next_unit() * (GAME_HEIGHT - size.y)),
        EntityTag::Bomb => (EntityKind::Bomb, rng.next_unit() * (GAME_HEIGHT - size.y)),
        EntityTag::BoostStar => (EntityKind::BoostStar, rng.next_unit() * (GAME_HEIGHT - size.y)),
        EntityTag::FastBird => (EntityKind::FastBird, rng.next_unit() * (GAME_HEIGHT - size.y)),
    };

    MovingEntity::new(id, kind, Vec2::new(GAME_WIDTH, y), now_ms)
}

/// Build a new background cloud just off the right edge
pub fn spawn_cloud(id: u32, rng: &mut dyn RandomSource) -> BackgroundCloud {
    let y = rng.next_unit() * (GAME_HEIGHT - CLOUD_BAND_INSET);
    let scale = 0.5 + rng.next_unit();
    let speed = rng.range(1.0, 3.0);
    BackgroundCloud {
        id,
        pos: Vec2::new(GAME_WIDTH, y),
        scale,
        speed,
    }
}

/// Spawn an obstacle and/or a cloud if their watermarks have aged past the
/// current intervals
pub fn run_spawners(
    state: &mut GameState,
    now_ms: f64,
    spawn_interval_ms: f64,
    boost_multiplier: f32,
    rng: &mut dyn RandomSource,
) {
    if now_ms - state.last_obstacle_spawn_ms > spawn_interval_ms {
        let id = state.next_entity_id();
        let entity = spawn_entity(id, now_ms, rng);
        log::debug!(
            "spawned {} #{} at y={:.1}",
            entity.tag().as_str(),
            entity.id,
            entity.pos.y
        );
        state.entities.push(entity);
        state.last_obstacle_spawn_ms = now_ms;
    }

    let cloud_interval = state.tuning.cloud_spawn_interval_ms / boost_multiplier as f64;
    if now_ms - state.last_cloud_spawn_ms > cloud_interval {
        let id = state.next_entity_id();
        state.clouds.push(spawn_cloud(id, rng));
        state.last_cloud_spawn_ms = now_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceSource;
    use std::collections::HashMap;

    #[test]
    fn test_weight_boundaries() {
        assert_eq!(choose_tag(0.0), EntityTag::StaticCloud);
        assert_eq!(choose_tag(0.2999), EntityTag::StaticCloud);
        assert_eq!(choose_tag(0.30), EntityTag::OscillatingBalloon);
        assert_eq!(choose_tag(0.50), EntityTag::FallingSatellite);
        assert_eq!(choose_tag(0.65), EntityTag::Bomb);
        assert_eq!(choose_tag(0.80), EntityTag::BoostStar);
        assert_eq!(choose_tag(0.90), EntityTag::FastBird);
        assert_eq!(choose_tag(0.9999), EntityTag::FastBird);
    }

    #[test]
    fn test_distribution_matches_weights() {
        let mut counts: HashMap<EntityTag, u32> = HashMap::new();
        for i in 0..1000 {
            *counts.entry(choose_tag(i as f32 / 1000.0)).or_default() += 1;
        }
        assert_eq!(counts[&EntityTag::StaticCloud], 300);
        assert_eq!(counts[&EntityTag::OscillatingBalloon], 200);
        assert_eq!(counts[&EntityTag::FallingSatellite], 150);
        assert_eq!(counts[&EntityTag::Bomb], 150);
        assert_eq!(counts[&EntityTag::BoostStar], 100);
        assert_eq!(counts[&EntityTag::FastBird], 100);
    }

    #[test]
    fn test_satellite_starts_above_playfield() {
        // roll, phase, (no y draw for satellites)
        let mut rng = SequenceSource::new(vec![0.55, 0.0]);
        let e = spawn_entity(1, 42.0, &mut rng);
        assert_eq!(e.tag(), EntityTag::FallingSatellite);
        assert_eq!(e.pos, Vec2::new(GAME_WIDTH, -75.0));
        assert_eq!(e.spawn_ms, 42.0);
        assert!(matches!(
            e.kind,
            EntityKind::FallingSatellite { vertical_speed } if vertical_speed == SATELLITE_FALL_SPEED
        ));
    }

    #[test]
    fn test_balloon_spawns_inside_margin_band() {
        for y_roll in [0.0, 0.5, 0.999] {
            let mut rng = SequenceSource::new(vec![0.4, 0.25, y_roll]);
            let e = spawn_entity(1, 0.0, &mut rng);
            let EntityKind::OscillatingBalloon { initial_y, phase } = e.kind else {
                panic!("expected balloon, got {:?}", e.kind);
            };
            assert!((phase - 0.25 * std::f32::consts::TAU).abs() < 1e-4);
            assert!(initial_y >= BALLOON_SPAWN_MARGIN);
            assert!(initial_y + e.size.y <= GAME_HEIGHT - BALLOON_SPAWN_MARGIN + 1e-3);
        }
    }

    #[test]
    fn test_uniform_y_fits_inside_playfield() {
        let mut rng = SequenceSource::new(vec![0.7, 0.0, 0.999]);
        let e = spawn_entity(1, 0.0, &mut rng);
        assert_eq!(e.tag(), EntityTag::Bomb);
        assert!(e.pos.y >= 0.0);
        assert!(e.pos.y + e.size.y <= GAME_HEIGHT);
        assert!(!e.passed);
    }

    #[test]
    fn test_cloud_ranges() {
        let mut rng = SequenceSource::new(vec![0.999, 0.999, 0.999]);
        let cloud = spawn_cloud(3, &mut rng);
        assert!(cloud.pos.y <= GAME_HEIGHT - CLOUD_BAND_INSET);
        assert!(cloud.scale < 1.5);
        assert!(cloud.speed < 3.0 && cloud.speed >= 1.0);
    }

    #[test]
    fn test_spawners_respect_watermarks() {
        let mut state = GameState::default();
        let mut rng = SequenceSource::constant(0.1);
        run_spawners(&mut state, 1000.0, 1500.0, 1.0, &mut rng);
        assert!(state.entities.is_empty());
        assert!(state.clouds.is_empty());

        run_spawners(&mut state, 1501.0, 1500.0, 1.0, &mut rng);
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.last_obstacle_spawn_ms, 1501.0);
        assert!(state.clouds.is_empty());

        // Boost shortens the cloud interval: 2000 / 2.5 = 800
        run_spawners(&mut state, 1600.0, 1500.0, 2.5, &mut rng);
        assert_eq!(state.clouds.len(), 1);
        assert_eq!(state.entities.len(), 1);
    }
}
