//! Frame driver for one game
//!
//! Owns a game controller, its persisted profile and the storage backend.
//! Wall-clock frame deltas go through a fixed-step accumulator; events from
//! each tick are persisted before the next tick runs.

use crate::audio::{SoundEffect, cues_for};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::{GameKind, Profile};
use crate::platform::storage::KeyValueStore;
use crate::platform::time::now_ms;
use crate::sim::{FrameInput, Game, GameEvent, GamePhase, Snapshot};

/// Name recorded on the leaderboard when the host never sets one
pub const DEFAULT_PLAYER_NAME: &str = "Player";

pub struct Session<G: Game, S: KeyValueStore> {
    game: G,
    store: S,
    profile: Profile,
    input: G::Input,
    accumulator: f32,
    player_name: String,
    /// Events for the presentation layer, oldest first
    outbox: Vec<GameEvent>,
    cues: Vec<SoundEffect>,
    disposed: bool,
}

impl<G: Game, S: KeyValueStore> Session<G, S> {
    /// Read the profile from `store` and seed the game's high score
    pub fn new(kind: GameKind, mut game: G, store: S) -> Self {
        let profile = Profile::load(kind, &store);
        game.restore_high_score(profile.high_score);
        Self {
            game,
            store,
            profile,
            input: G::Input::default(),
            accumulator: 0.0,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            outbox: Vec::new(),
            cues: Vec::new(),
            disposed: false,
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Pending input for the next tick
    pub fn input_mut(&mut self) -> &mut G::Input {
        &mut self.input
    }

    /// Start or restart the run
    pub fn start(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        let started = self.game.start();
        if started {
            self.accumulator = 0.0;
            self.input.clear_one_shots();
        }
        self.process_events();
        started
    }

    /// Feed one display frame. Returns how many ticks ran.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if self.disposed {
            return 0;
        }
        if self.game.phase() != GamePhase::Playing {
            self.teardown();
            return 0;
        }

        // NaN would poison the accumulator for the rest of the run
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.game.phase() != GamePhase::Playing {
                self.teardown();
                break;
            }
        }
        substeps
    }

    /// Run exactly one tick with the pending input, then persist its events
    pub fn step(&mut self) {
        if self.disposed {
            return;
        }
        self.game.tick(&self.input);
        self.input.clear_one_shots();
        self.process_events();
    }

    /// Detach for good (host view unmounted). No further mutation or writes.
    pub fn dispose(&mut self) {
        self.teardown();
        self.disposed = true;
        log::debug!("Session disposed");
    }

    pub fn toggle_sound(&mut self) {
        self.profile.settings.toggle_sound();
        self.profile.save_settings(&mut self.store);
    }

    pub fn toggle_music(&mut self) {
        self.profile.settings.toggle_music();
        self.profile.save_settings(&mut self.store);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Events since the last drain, for toasts and the game-over screen
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Sounds the page should play
    pub fn drain_cues(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.cues)
    }

    /// Drop timing state and queued input once play stops
    fn teardown(&mut self) {
        self.accumulator = 0.0;
        self.input.clear_one_shots();
    }

    fn process_events(&mut self) {
        for event in self.game.drain_events() {
            match &event {
                GameEvent::NewHighScore { score } => {
                    self.profile.record_high_score(*score, &mut self.store);
                }
                GameEvent::GameOver { score } => {
                    self.profile
                        .record_run(*score, &self.player_name, now_ms(), &mut self.store);
                }
                _ => {}
            }
            self.cues.extend(cues_for(&event, &self.profile.settings));
            self.outbox.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::{MemoryStore, UnavailableStore};
    use crate::sim::{Achievement, Direction, RunnerGame, StackerGame};
    use glam::Vec2;

    fn tower_session(store: MemoryStore) -> Session<StackerGame, MemoryStore> {
        Session::new(GameKind::Tower, StackerGame::new(11), store)
    }

    fn drop_at(session: &mut Session<StackerGame, MemoryStore>, x: f32, z: f32) {
        session.input_mut().place = Some(Vec2::new(x, z));
        session.step();
    }

    #[test]
    fn test_high_score_written_before_frame_returns() {
        let mut session = tower_session(MemoryStore::new());
        assert_eq!(session.game().ledger().high_score, 0);
        session.start();

        for _ in 0..5 {
            session.input_mut().place = Some(Vec2::ZERO);
            assert_eq!(session.update(SIM_DT), 1);
        }
        assert_eq!(session.game().ledger().score, 50);
        assert_eq!(
            session.store().get_item("skillTowerHighScore").unwrap().as_deref(),
            Some("50")
        );
        assert_eq!(session.profile().high_score, 50);
    }

    #[test]
    fn test_high_score_restored_from_store() {
        let mut store = MemoryStore::new();
        store.set_item("skillTowerHighScore", "300").unwrap();
        let mut session = tower_session(store);
        assert_eq!(session.game().ledger().high_score, 300);

        session.start();
        drop_at(&mut session, 0.0, 0.0);
        assert_eq!(
            session.store().get_item("skillTowerHighScore").unwrap().as_deref(),
            Some("300")
        );
    }

    #[test]
    fn test_game_over_records_leaderboard() {
        let mut session = tower_session(MemoryStore::new());
        session.set_player_name("Ada");
        session.start();
        drop_at(&mut session, 0.0, 0.0);
        drop_at(&mut session, 3.0, 3.0);
        assert_eq!(session.phase(), GamePhase::GameOver);

        let board = &session.profile().leaderboard;
        assert_eq!(board.top_score(), Some(10));
        assert_eq!(board.entries[0].name, "Ada");
        let stored = session.store().get_item("skillTowerLeaderboard").unwrap();
        assert!(stored.is_some_and(|json| json.contains("Ada")));

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 10 }));
        assert!(session.drain_cues().contains(&SoundEffect::GameOver));
    }

    #[test]
    fn test_input_dropped_after_game_over() {
        let mut session = tower_session(MemoryStore::new());
        session.start();
        drop_at(&mut session, 0.0, 0.0);
        drop_at(&mut session, 3.0, 3.0);

        session.input_mut().place = Some(Vec2::ZERO);
        assert_eq!(session.update(SIM_DT), 0);
        assert!(session.input_mut().place.is_none());
        assert_eq!(session.game().tower().len(), 2);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut session = tower_session(MemoryStore::new());
        session.start();
        drop_at(&mut session, 0.0, 0.0);
        drop_at(&mut session, 3.0, 3.0);
        assert!(session.start());
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.game().ledger().score, 0);
        assert_eq!(session.game().ledger().high_score, 10);
        assert!(session.game().tower().is_empty());
    }

    #[test]
    fn test_dispose_stops_everything() {
        let mut session = tower_session(MemoryStore::new());
        session.start();
        session.dispose();

        session.input_mut().place = Some(Vec2::ZERO);
        assert_eq!(session.update(SIM_DT), 0);
        session.step();
        assert!(!session.start());
        assert!(session.game().tower().is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_unavailable_storage_keeps_playing() {
        let mut session = Session::new(GameKind::Tower, StackerGame::new(3), UnavailableStore);
        session.start();
        for _ in 0..5 {
            session.input_mut().place = Some(Vec2::ZERO);
            session.step();
        }
        assert_eq!(session.game().ledger().score, 50);
        assert_eq!(session.profile().high_score, 50);
        assert!(!session.profile().is_persistent());
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::AchievementUnlocked(Achievement::FirstFoundation))
        );
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut session = Session::new(GameKind::Runner, RunnerGame::new(8), MemoryStore::new());
        assert_eq!(session.update(1.0), 0);
        session.start();
        let ticks = session.update(10.0);
        assert!((5..=6).contains(&ticks), "ran {ticks} ticks");
        assert!(ticks <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_non_finite_frame_delta_ignored() {
        let mut session = Session::new(GameKind::Runner, RunnerGame::new(8), MemoryStore::new());
        session.start();
        assert_eq!(session.update(f32::NAN), 0);
        assert_eq!(session.update(f32::INFINITY), 0);
        assert_eq!(session.update(-1.0), 0);

        let ticks: u32 = (0..60).map(|_| session.update(SIM_DT)).sum();
        assert_eq!(ticks, 60);
        assert_eq!(session.game().time_ticks(), 60);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_start_while_playing_keeps_queued_input() {
        let mut session = Session::new(GameKind::Runner, RunnerGame::new(8), MemoryStore::new());
        assert!(session.start());
        session.input_mut().moves.push(Direction::Left);
        assert!(!session.start());
        assert_eq!(session.input_mut().moves, vec![Direction::Left]);

        session.step();
        assert_eq!(session.game().player().x, -0.5);
    }

    #[test]
    fn test_runner_moves_are_one_shot() {
        let mut session = Session::new(GameKind::Runner, RunnerGame::new(8), MemoryStore::new());
        session.start();
        session.input_mut().moves.push(Direction::Right);
        session.step();
        session.step();
        assert_eq!(session.game().player().x, 0.5);
    }

    #[test]
    fn test_settings_toggle_persists() {
        let mut session = Session::new(GameKind::Runner, RunnerGame::new(8), MemoryStore::new());
        session.toggle_sound();
        assert!(!session.profile().settings.sound_enabled);
        let json = session.store().get_item("skillRunnerSettings").unwrap();
        assert_eq!(json.as_deref(), Some(r#"{"soundEnabled":false,"musicEnabled":true}"#));
    }
}
