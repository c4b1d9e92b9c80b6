//! Score and progression ledger
//!
//! Owns score, combo, level, speed and the high score. Each mutation pushes
//! the events it causes; the owning controller drains them.

use serde::{Deserialize, Serialize};

use super::entity::Skill;
use super::state::GameEvent;
use crate::tuning::{RunnerTuning, StackerTuning};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub score: u64,
    pub combo: u32,
    pub level: u32,
    /// Best score seen, including previous sessions. Never decreases.
    pub high_score: u64,
    /// Runner scroll speed multiplier (unused by the tower)
    pub speed: f32,
    /// Collected tokens / stacked blocks, oldest first
    pub history: Vec<Skill>,
}

impl Ledger {
    pub fn new(start_speed: f32) -> Self {
        Self {
            score: 0,
            combo: 0,
            level: 1,
            high_score: 0,
            speed: start_speed,
            history: Vec::new(),
        }
    }

    /// Reset for a new run, keeping the high score
    pub fn reset(&mut self, start_speed: f32) {
        let high_score = self.high_score;
        *self = Self::new(start_speed);
        self.high_score = high_score;
    }

    /// Seed the high score from the persistence cache
    pub fn restore_high_score(&mut self, high_score: u64) {
        self.high_score = self.high_score.max(high_score);
    }

    /// Score a collected runner token
    pub fn record_collection(
        &mut self,
        skill: Skill,
        tuning: &RunnerTuning,
        events: &mut Vec<GameEvent>,
    ) {
        let base = self.score + tuning.token_points;
        self.combo += 1;
        let combo_bonus = if self.combo > tuning.combo_threshold {
            self.combo as u64 * tuning.combo_bonus
        } else {
            0
        };
        let level_bonus = (base / tuning.level_divisor.max(1)) * tuning.level_bonus;

        self.set_score(base + combo_bonus + level_bonus, tuning.level_divisor, events);
        self.history.push(skill);
        self.speed = (self.speed + tuning.speed_increment).min(tuning.max_speed);
    }

    /// Break the combo after an obstacle hit. Score and history stay for display.
    pub fn record_collision(&mut self) {
        self.combo = 0;
    }

    /// Score a stable tower placement
    pub fn record_placement(
        &mut self,
        skill: Skill,
        tuning: &StackerTuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.set_score(self.score + tuning.block_points, tuning.level_divisor, events);
        self.history.push(skill);
    }

    fn set_score(&mut self, score: u64, level_divisor: u64, events: &mut Vec<GameEvent>) {
        debug_assert!(score >= self.score);
        self.score = score;

        let level = (score / level_divisor.max(1)) as u32 + 1;
        if level > self.level {
            events.push(GameEvent::LevelUp { level });
        }
        self.level = level;

        if self.score > self.high_score {
            self.high_score = self.score;
            events.push(GameEvent::NewHighScore { score: self.score });
        }
    }
}
