//! Skill Tower controller
//!
//! Discrete stacker: the player drops the block in hand somewhere on the
//! ground plane. Close enough to the block below and the tower grows; too far
//! and the block topples, ending the game.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::achievements::tower_milestones;
use super::entity::{Entity, IdAllocator, Skill};
use super::interaction::is_stable;
use super::ledger::Ledger;
use super::spawner::spawn_block;
use super::state::{GameEvent, GamePhase, Snapshot};
use super::{FrameInput, Game};
use crate::tuning::StackerTuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct StackerInput {
    /// Ground-plane (x, z) drop point from a click/tap
    pub place: Option<Vec2>,
}

impl FrameInput for StackerInput {
    fn clear_one_shots(&mut self) {
        self.place = None;
    }
}

/// Result of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Stable,
    Toppled,
    /// Not playing, or nothing in hand
    Ignored,
}

#[derive(Debug, Clone)]
pub struct StackerGame {
    pub tuning: StackerTuning,
    phase: GamePhase,
    ledger: Ledger,
    tower: Vec<Entity>,
    current: Option<Entity>,
    next: Option<Entity>,
    rng: Pcg32,
    ids: IdAllocator,
    events: Vec<GameEvent>,
}

impl StackerGame {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, StackerTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: StackerTuning) -> Self {
        let tuning = tuning.validated();
        Self {
            tuning,
            phase: GamePhase::NotStarted,
            ledger: Ledger::new(1.0),
            tower: Vec::new(),
            current: None,
            next: None,
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
            events: Vec::new(),
        }
    }

    pub fn tower(&self) -> &[Entity] {
        &self.tower
    }

    pub fn current(&self) -> Option<&Entity> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Entity> {
        self.next.as_ref()
    }

    /// Begin a run from NotStarted or GameOver. Ignored while playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start() ignored: tower in progress");
            return false;
        }
        self.ledger.reset(1.0);
        self.tower.clear();
        self.current = Some(spawn_block(&mut self.rng, &mut self.ids));
        self.next = Some(spawn_block(&mut self.rng, &mut self.ids));
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Skill Tower started (high score {})", self.ledger.high_score);
        true
    }

    /// Drop the block in hand at ground coordinates (x, z)
    pub fn place(&mut self, x: f32, z: f32) -> Placement {
        if self.phase != GamePhase::Playing {
            return Placement::Ignored;
        }
        let Some(mut block) = self.current.take() else {
            return Placement::Ignored;
        };

        let height = self.tower.len() as f32 * self.tuning.slot_height;
        block.position = Vec3::new(x, height, z);
        block.resolve();
        let skill = block.kind.skill().unwrap_or(Skill::React);
        let id = block.id;

        let stable = is_stable(&self.tower, block.position, self.tuning.stability_tolerance);
        self.tower.push(block);
        self.events.push(GameEvent::BlockPlaced { id, skill, stable });

        if !stable {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.ledger.score,
            });
            log::info!(
                "Skill Tower toppled at height {} (score {})",
                self.tower.len(),
                self.ledger.score
            );
            return Placement::Toppled;
        }

        self.ledger
            .record_placement(skill, &self.tuning, &mut self.events);
        for achievement in tower_milestones(self.tower.len(), self.ledger.score) {
            log::debug!("Achievement unlocked: {}", achievement.message());
            self.events.push(GameEvent::AchievementUnlocked(achievement));
        }

        self.current = self.next.take();
        self.next = Some(spawn_block(&mut self.rng, &mut self.ids));
        Placement::Stable
    }
}

impl Game for StackerGame {
    type Input = StackerInput;

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn restore_high_score(&mut self, high_score: u64) {
        self.ledger.restore_high_score(high_score);
    }

    fn start(&mut self) -> bool {
        StackerGame::start(self)
    }

    fn tick(&mut self, input: &StackerInput) {
        if let Some(point) = input.place {
            self.place(point.x, point.y);
        }
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.ledger.score,
            high_score: self.ledger.high_score,
            combo: self.ledger.combo,
            level: self.ledger.level,
            speed: self.ledger.speed,
            entities: self.tower.clone(),
            player: Vec3::ZERO,
            current: self.current.clone(),
            next: self.next.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Achievement;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_zero_divisor_tuning_is_repaired() {
        let tuning: StackerTuning = serde_json::from_str(r#"{"level_divisor": 0}"#).unwrap();
        let mut game = StackerGame::with_tuning(4, tuning);
        assert_eq!(game.tuning.level_divisor, 1);
        game.start();
        assert_eq!(game.place(0.0, 0.0), Placement::Stable);
        assert_eq!(game.ledger().level, 11);
    }

    #[test]
    fn test_first_block_always_stable() {
        let mut game = StackerGame::new(1);
        game.start();
        assert_eq!(game.place(3.5, -3.5), Placement::Stable);
        assert_eq!(game.tower().len(), 1);
        assert_eq!(game.ledger().score, 10);
    }

    #[test]
    fn test_unstable_second_block_ends_game() {
        let mut game = StackerGame::new(2);
        game.start();
        assert_eq!(game.place(0.0, 0.0), Placement::Stable);
        assert_eq!(game.ledger().score, 10);

        assert_eq!(game.place(0.9, 0.0), Placement::Toppled);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.tower().len(), 2);
        assert_eq!(game.ledger().score, 10);
        assert_eq!(game.tower()[1].position.y, 0.5);

        // Nothing happens after the topple
        assert_eq!(game.place(0.0, 0.0), Placement::Ignored);
        assert_eq!(game.tower().len(), 2);
    }

    #[test]
    fn test_exact_tolerance_is_unstable() {
        let mut game = StackerGame::new(3);
        game.start();
        game.place(0.0, 0.0);
        assert_eq!(game.place(0.0, 0.8), Placement::Toppled);
    }

    #[test]
    fn test_stable_placement_promotes_next() {
        let mut game = StackerGame::new(4);
        game.start();
        let next_id = game.next().map(|b| b.id);
        game.place(0.0, 0.0);
        assert_eq!(game.current().map(|b| b.id), next_id);
        assert!(game.next().is_some());
        assert_ne!(game.next().map(|b| b.id), next_id);
        assert!(game.tower()[0].is_resolved());
    }

    #[test]
    fn test_placement_before_start_is_ignored() {
        let mut game = StackerGame::new(5);
        assert_eq!(game.place(0.0, 0.0), Placement::Ignored);
        assert!(game.tower().is_empty());
    }

    #[test]
    fn test_level_and_achievements() {
        let mut game = StackerGame::new(6);
        game.start();
        game.drain_events();
        for _ in 0..5 {
            game.place(0.1, 0.1);
        }
        assert_eq!(game.ledger().score, 50);
        assert_eq!(game.ledger().level, 2);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::AchievementUnlocked(Achievement::FirstFoundation)));
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut game = StackerGame::new(7);
        game.start();
        game.place(0.0, 0.0);
        game.place(0.2, 0.0);
        game.place(2.0, 2.0);
        assert_eq!(game.phase(), GamePhase::GameOver);

        assert!(game.start());
        assert!(game.tower().is_empty());
        assert_eq!(game.ledger().score, 0);
        assert_eq!(game.ledger().level, 1);
        assert_eq!(game.ledger().high_score, 20);
        assert!(game.current().is_some());
    }

    #[test]
    fn test_tick_applies_placement() {
        let mut game = StackerGame::new(8);
        game.start();
        game.tick(&StackerInput::default());
        assert!(game.tower().is_empty());
        game.tick(&StackerInput {
            place: Some(Vec2::new(0.0, 0.0)),
        });
        assert_eq!(game.tower().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_tower_invariants(seed in any::<u64>(), drops in prop::collection::vec((-4.0f32..4.0, -4.0f32..4.0), 1..60)) {
            let mut game = StackerGame::new(seed);
            game.start();
            let mut last_score = 0;
            for (x, z) in drops {
                let height = game.tower().len();
                let outcome = game.place(x, z);
                prop_assert!(game.ledger().score >= last_score);
                last_score = game.ledger().score;
                match outcome {
                    Placement::Stable => {
                        prop_assert_eq!(game.tower().len(), height + 1);
                        prop_assert_eq!(game.ledger().score, 10 * game.tower().len() as u64);
                    }
                    Placement::Toppled => {
                        prop_assert_eq!(game.tower().len(), height + 1);
                        prop_assert_eq!(game.phase(), GamePhase::GameOver);
                    }
                    Placement::Ignored => prop_assert_eq!(game.tower().len(), height),
                }
            }
            let ids: HashSet<_> = game.tower().iter().map(|b| b.id).collect();
            prop_assert_eq!(ids.len(), game.tower().len());
        }
    }
}
