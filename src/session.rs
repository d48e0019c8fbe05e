//! Session state machine
//!
//! Idle -> Running -> Ended -> (restart) -> Running. Commands that make no
//! sense in the current phase are ignored rather than rejected.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::best_score::BestScore;
use crate::clock::{ClockHandle, Frame, Pacer};
use crate::persistence::{JsonFileStore, MemoryStore, ScoreStore};
use crate::settings::Settings;
use crate::sim::{StepEvent, TickInput, WorldSnapshot, WorldState, tick};
use crate::tuning::Tuning;

pub use crate::sim::SessionPhase;

/// One player's run of rounds, sharing a best score and RNG stream
pub struct Session {
    phase: SessionPhase,
    world: WorldState,
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    best: BestScore,
    clock: ClockHandle,
    pacer: Pacer,
}

impl Session {
    pub fn new(settings: &Settings, store: Box<dyn ScoreStore>, clock: ClockHandle) -> Self {
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        log::info!("New session (seed {}, timestep {:?})", seed, settings.timestep);
        Self {
            phase: SessionPhase::Idle,
            world: WorldState::new(settings.tuning.player_x),
            tuning: settings.tuning.clone(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            best: BestScore::load(store),
            clock,
            pacer: Pacer::new(settings.timestep),
        }
    }

    /// Session whose best score goes to `settings.best_score_path`, or memory
    pub fn from_settings(settings: &Settings, clock: ClockHandle) -> Self {
        let store: Box<dyn ScoreStore> = match &settings.best_score_path {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        };
        Self::new(settings, store, clock)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn best_score(&self) -> u64 {
        self.best.get()
    }

    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world, self.phase, self.best.get())
    }

    /// Begin a fresh round. Returns false (no-op) while already running.
    pub fn start(&mut self) -> bool {
        if self.phase == SessionPhase::Running {
            log::debug!("start ignored: already running");
            return false;
        }
        self.world = WorldState::new(self.tuning.player_x);
        self.world.running = true;
        self.phase = SessionPhase::Running;
        self.pacer.reset();
        self.clock.start();
        log::info!("Round started");
        true
    }

    /// Jump if running and grounded. Returns whether a jump started.
    pub fn request_jump(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            log::debug!("jump ignored in {:?}", self.phase);
            return false;
        }
        self.world.player.try_jump(self.tuning.jump_power)
    }

    /// The single "activate" gesture: start when idle, jump when running,
    /// restart when ended.
    pub fn activate(&mut self) {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Ended => {
                self.start();
            }
            SessionPhase::Running => {
                self.request_jump();
            }
        }
    }

    /// Leave the game-over screen without starting a new round
    pub fn reset(&mut self) -> bool {
        if self.phase != SessionPhase::Ended {
            log::debug!("reset ignored in {:?}", self.phase);
            return false;
        }
        self.world = WorldState::new(self.tuning.player_x);
        self.phase = SessionPhase::Idle;
        true
    }

    /// End the round: freeze the world, stop the clock, fold in the score
    pub fn on_collision(&mut self, obstacle_id: u32) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Ended;
        self.world.running = false;
        self.clock.stop();

        let score = self.world.score;
        let new_best = self.best.record(score);
        log::info!(
            "Round over: hit obstacle #{} at score {}{}",
            obstacle_id,
            score,
            if new_best { " (new best)" } else { "" }
        );
    }

    /// Run the simulation steps for one frame. Returns whether the round is
    /// still running afterwards.
    pub fn advance_frame(&mut self, frame_delta_ms: f64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        let steps = self.pacer.steps(frame_delta_ms);
        let input = TickInput {
            elapsed_ms: steps.dt_ms,
        };
        for _ in 0..steps.count {
            if let StepEvent::Collision { obstacle_id } =
                tick(&mut self.world, &input, &self.tuning, &mut self.rng)
            {
                self.on_collision(obstacle_id);
                break;
            }
        }
        self.phase == SessionPhase::Running
    }

    /// Scheduler callback
    pub fn on_frame(&mut self, frame: Frame) {
        self.advance_frame(frame.delta_ms());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedFrames, Scheduler};
    use crate::settings::Timestep;
    use crate::sim::{Obstacle, ObstacleKind};
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn quiet_settings() -> Settings {
        // No automatic spawns; tests place obstacles by hand
        let mut settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        settings.tuning.spawn_floor_ms = 1e12;
        settings
    }

    fn session(settings: &Settings) -> Session {
        Session::new(settings, Box::new(MemoryStore::new()), ClockHandle::new())
    }

    fn place_cactus(session: &mut Session, x: f32) {
        session.world.obstacles.push(Obstacle {
            id: 900,
            x,
            kind: ObstacleKind::Cactus,
            height: 0.0,
            scale: 1.0,
        });
    }

    /// Play until the given score is reached, then crash into a cactus
    fn play_round(session: &mut Session, score: u64) {
        session.start();
        while session.world.score + 1 < score {
            assert!(session.advance_frame(FRAME_MS));
        }
        // One tick from now it sits on the player
        let x = session.tuning.player_x + session.tuning.game_speed;
        place_cactus(session, x);
        assert!(!session.advance_frame(FRAME_MS));
        assert_eq!(session.world.score, score);
    }

    #[test]
    fn test_starts_idle() {
        let s = session(&quiet_settings());
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.clock().is_running());
        assert!(!s.world().running);
    }

    #[test]
    fn test_start_arms_clock() {
        let mut s = session(&quiet_settings());
        assert!(s.start());
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.clock().is_running());
        assert!(s.world().running);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut s = session(&quiet_settings());
        s.start();
        s.advance_frame(FRAME_MS);
        s.advance_frame(FRAME_MS);
        assert!(!s.start());
        assert_eq!(s.world().score, 2);
    }

    #[test]
    fn test_jump_only_while_running() {
        let mut s = session(&quiet_settings());
        assert!(!s.request_jump());
        assert!(!s.world().player.airborne);

        s.start();
        assert!(s.request_jump());
        assert!(s.world().player.airborne);
        assert!(!s.request_jump());
    }

    #[test]
    fn test_idle_frames_do_nothing() {
        let mut s = session(&quiet_settings());
        assert!(!s.advance_frame(FRAME_MS));
        assert_eq!(s.world().score, 0);
    }

    #[test]
    fn test_collision_ends_round() {
        let mut s = session(&quiet_settings());
        play_round(&mut s, 25);

        assert_eq!(s.phase(), SessionPhase::Ended);
        assert!(!s.clock().is_running());
        assert!(!s.world().running);
        assert_eq!(s.best_score(), 25);

        // Frozen until the next start
        let frozen = s.snapshot();
        assert!(!s.advance_frame(FRAME_MS));
        assert!(!s.request_jump());
        assert_eq!(s.snapshot(), frozen);
        assert_eq!(frozen.obstacles.len(), 1);
    }

    #[test]
    fn test_restart_clears_world() {
        let mut s = session(&quiet_settings());
        play_round(&mut s, 10);
        assert!(s.start());
        assert_eq!(s.world().score, 0);
        assert!(s.world().obstacles.is_empty());
        assert!(!s.world().player.airborne);
        assert_eq!(s.best_score(), 10);
    }

    #[test]
    fn test_activate_cycle() {
        let mut s = session(&quiet_settings());
        s.activate();
        assert_eq!(s.phase(), SessionPhase::Running);

        s.activate();
        assert!(s.world().player.airborne);

        s.on_collision(0);
        assert_eq!(s.phase(), SessionPhase::Ended);

        s.activate();
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(!s.world().player.airborne);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut s = session(&quiet_settings());
        assert!(!s.reset());
        play_round(&mut s, 5);
        assert!(s.reset());
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.world().score, 0);
        assert_eq!(s.best_score(), 5);
    }

    #[test]
    fn test_scheduler_stops_on_collision() {
        let settings = Settings {
            seed: Some(77),
            ..Default::default()
        };
        let clock = ClockHandle::new();
        let mut s = Session::new(&settings, Box::new(MemoryStore::new()), clock.clone());
        let mut scheduler = Scheduler::new(FixedFrames::from_hz(60), clock);

        s.start();
        // Never jumps, so the first obstacle ends the round
        let frames = scheduler.run(|frame| s.on_frame(frame));

        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(frames, s.world().score);
        assert_eq!(s.best_score(), s.world().score);
    }

    #[test]
    fn test_fixed_timestep_runs_substeps() {
        let mut settings = quiet_settings();
        settings.timestep = Timestep::Fixed { hz: 120 };
        let mut s = session(&settings);
        s.start();
        // 120 Hz sim on a 60 Hz display: two ticks per frame
        s.advance_frame(FRAME_MS + 0.01);
        assert_eq!(s.world().score, 2);
    }

    #[test]
    fn test_same_seed_same_world() {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        let mut a = session(&settings);
        let mut b = session(&settings);
        a.start();
        b.start();
        for _ in 0..200 {
            a.advance_frame(FRAME_MS);
            b.advance_frame(FRAME_MS);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_zero_gravity_file_still_lands_jumps() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{ "tuning": { "gravity": 0.0 } }"#).unwrap();

        let mut settings = Settings::load_or_default(Some(&path));
        assert_eq!(settings.tuning.gravity, crate::consts::GRAVITY);
        settings.tuning.spawn_floor_ms = 1e12;

        let mut s = session(&settings);
        s.start();
        assert!(s.request_jump());
        for _ in 0..60 {
            assert!(s.advance_frame(FRAME_MS));
        }
        assert!(!s.world().player.airborne);
        assert_eq!(s.world().player.y, 0.0);
    }

    #[test]
    fn test_best_score_file_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = quiet_settings();
        settings.best_score_path = Some(tmp.path().join("best.json"));

        let mut first = Session::from_settings(&settings, ClockHandle::new());
        assert_eq!(first.best_score(), 0);
        play_round(&mut first, 30);
        assert_eq!(first.best_score(), 30);
        drop(first);

        let mut second = Session::from_settings(&settings, ClockHandle::new());
        assert_eq!(second.best_score(), 30);
        // A lower round leaves the stored best alone
        play_round(&mut second, 12);
        let third = Session::from_settings(&settings, ClockHandle::new());
        assert_eq!(third.best_score(), 30);
    }

    proptest! {
        #[test]
        fn prop_best_is_max_of_rounds(scores in prop::collection::vec(1u64..80, 1..6)) {
            let mut s = session(&quiet_settings());
            for &score in &scores {
                play_round(&mut s, score);
            }
            prop_assert_eq!(s.best_score(), scores.iter().copied().max().unwrap());
        }
    }
}
