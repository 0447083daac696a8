//! Host-facing game wrapper
//!
//! Owns everything a host needs between frames and wires the simulation's
//! events to the audio manager and the leaderboard. Hosts feed it input,
//! call `frame` once per scheduled frame and read `snapshot` to draw.

use crate::audio::AudioManager;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::input::{InputState, Key};
use crate::platform::FrameScheduler;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GameState, LoopControl, RandomSource, Snapshot, Tuning, autopilot, start_run, tick,
    unseeded_rng,
};

pub struct Game {
    pub state: GameState,
    pub input: InputState,
    pub audio: AudioManager,
    pub settings: Settings,
    pub leaderboard: HighScores,
    /// Let the demo pilot steer instead of the player
    pub autopilot: bool,
    rng: Box<dyn RandomSource>,
    last_frame_ms: Option<f64>,
}

impl Game {
    pub fn new(settings: Settings, tuning: Tuning) -> Self {
        Self::with_rng(settings, tuning, Box::new(unseeded_rng()))
    }

    /// Build with an explicit random source (tests, replays)
    pub fn with_rng(settings: Settings, tuning: Tuning, rng: Box<dyn RandomSource>) -> Self {
        Self {
            state: GameState::new(tuning),
            input: InputState::default(),
            audio: AudioManager::new(&settings),
            settings,
            leaderboard: HighScores::new(),
            autopilot: false,
            rng,
            last_frame_ms: None,
        }
    }

    /// Start or restart a run at host time `now_ms`. Returns false while a
    /// run is already in progress.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !start_run(&mut self.state, now_ms) {
            return false;
        }
        self.input.reset_pointer();
        self.last_frame_ms = Some(now_ms);
        self.audio.resume();
        self.audio.apply_settings(&self.settings);
        true
    }

    /// Simulate one host frame and dispatch its events
    pub fn frame(&mut self, now_ms: f64) -> LoopControl {
        if self.autopilot && self.state.is_playing() {
            let target = autopilot::steer(&self.state);
            self.input.set_pointer_target(target);
        }

        let input = self.input.sample();
        let control = tick(&mut self.state, &input, now_ms, self.rng.as_mut());

        for event in self.state.drain_events() {
            self.audio.play(event.into());
            if event == GameEvent::Crash {
                self.record_run(now_ms);
            }
        }
        self.audio
            .update_engine(self.state.is_boosting(), self.state.craft.tilt);

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(last) = self.last_frame_ms {
            self.audio.advance((now_ms - last) / 1000.0);
        }
        self.last_frame_ms = Some(now_ms);

        control
    }

    fn record_run(&mut self, now_ms: f64) {
        let entry = HighScoreEntry {
            score: self.state.score,
            ticks: self.state.time_ticks,
            boosts: self.state.boosts_collected,
            timestamp_ms: now_ms,
        };
        if let Some(rank) = self.leaderboard.add_score(entry) {
            log::info!("leaderboard rank #{} with {}", rank, self.state.score);
        }
    }

    /// Drive frames from `scheduler` until the run ends
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> u64 {
        scheduler.run(&mut |now_ms: f64| self.frame(now_ms))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.set_key(key, true);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.set_key(key, false);
    }

    /// Pointer moved; `play_area_y` is relative to the top of the play area
    pub fn pointer_moved(&mut self, play_area_y: f32) {
        self.input.set_pointer(play_area_y);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
        self.audio.apply_settings(&self.settings);
    }

    pub fn toggle_mute(&mut self) {
        self.settings.toggle_mute();
        self.audio.apply_settings(&self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::*;
    use crate::platform::SteppingScheduler;
    use crate::sim::{EntityKind, GameStatus, SequenceSource};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn quiet_game() -> Game {
        // Spawners stay idle for the first second of a run anyway
        Game::with_rng(
            Settings::default(),
            Tuning::default(),
            Box::new(SequenceSource::constant(0.5)),
        )
    }

    #[test]
    fn test_frame_before_start_stops() {
        let mut game = quiet_game();
        assert_eq!(game.frame(FRAME_MS), LoopControl::Stop);
        assert_eq!(game.state.status, GameStatus::Start);
    }

    #[test]
    fn test_crash_plays_sound_and_records_run() {
        let mut game = quiet_game();
        assert!(game.start(0.0));
        game.state.score = 7;
        game.state
            .insert_entity(EntityKind::Bomb, Vec2::new(130.0, INITIAL_CRAFT_Y), 0.0);

        assert_eq!(game.frame(FRAME_MS), LoopControl::Stop);
        assert_eq!(game.state.status, GameStatus::GameOver);
        assert_eq!(game.audio.take_played(), vec![SoundEffect::Crash]);
        assert_eq!(game.leaderboard.top_score(), Some(7));
        assert_eq!(game.state.high_score, 7);
    }

    #[test]
    fn test_start_ignored_mid_run() {
        let mut game = quiet_game();
        assert!(game.start(0.0));
        game.state.score = 3;
        assert!(!game.start(10.0));
        assert_eq!(game.state.score, 3);
    }

    #[test]
    fn test_keys_reach_the_craft() {
        let mut game = quiet_game();
        game.start(0.0);
        game.key_down(Key::Up);
        game.frame(FRAME_MS);
        assert_eq!(game.state.craft.y, INITIAL_CRAFT_Y - 7.0);
        game.key_up(Key::Up);
        game.pointer_moved(INITIAL_CRAFT_Y + CRAFT_HEIGHT / 2.0);
        game.frame(FRAME_MS * 2.0);
        assert!(game.state.craft.y > INITIAL_CRAFT_Y - 7.0);
    }

    #[test]
    fn test_mute_follows_player_settings_only() {
        let mut game = quiet_game();
        game.toggle_mute();
        assert!(game.settings.muted);
        game.start(0.0);
        game.state
            .insert_entity(EntityKind::Bomb, Vec2::new(130.0, INITIAL_CRAFT_Y), 0.0);
        game.frame(FRAME_MS);
        assert!(game.audio.take_played().is_empty());

        // Raising the volume unmutes
        game.set_volume(0.5);
        assert!(!game.settings.muted);
        assert_eq!(game.settings.effective_volume(), 0.5);
    }

    #[test]
    fn test_autopilot_run_terminates_cleanly() {
        let mut game = Game::with_rng(
            Settings::default(),
            Tuning::default(),
            Box::new(rand_pcg::Pcg32::new(0xcafe_f00d, 0xa02b_dbf7)),
        );
        game.autopilot = true;
        game.start(0.0);

        let mut sched = SteppingScheduler::at_60hz(0.0, 5_000);
        let frames = game.run(&mut sched);
        assert!(frames > 0);
        assert!(frames <= 5_000);
        let craft_y = game.state.craft.y;
        assert!((0.0..=GAME_HEIGHT - CRAFT_HEIGHT).contains(&craft_y));
        if game.state.status == GameStatus::GameOver {
            assert_eq!(frames, game.state.time_ticks);
        }
    }
}
