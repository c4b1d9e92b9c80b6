//! Skill Runner controller
//!
//! Endless runner: tokens and firewalls scroll toward the player, who steers
//! in the x/y plane to collect tokens and avoid firewalls.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, IdAllocator};
use super::interaction::{collect_within, find_collision};
use super::ledger::Ledger;
use super::motion::{advance, retire};
use super::spawner::{replenish, spawn_initial_wave};
use super::state::{GameEvent, GamePhase, Snapshot};
use super::{FrameInput, Game};
use crate::tuning::RunnerTuning;

/// Directional move from keyboard or swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn delta(self, step: f32) -> Vec3 {
        match self {
            Direction::Left => Vec3::new(-step, 0.0, 0.0),
            Direction::Right => Vec3::new(step, 0.0, 0.0),
            Direction::Up => Vec3::new(0.0, step, 0.0),
            Direction::Down => Vec3::new(0.0, -step, 0.0),
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Moves queued since the last tick, oldest first
    pub moves: Vec<Direction>,
    /// Explicit collect (click/tap)
    pub collect: bool,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

impl FrameInput for TickInput {
    fn clear_one_shots(&mut self) {
        self.moves.clear();
        self.collect = false;
    }
}

/// Autopilot only steers every few ticks so it reads like a person
const AUTOPILOT_INTERVAL: u64 = 4;

#[derive(Debug, Clone)]
pub struct RunnerGame {
    pub tuning: RunnerTuning,
    phase: GamePhase,
    ledger: Ledger,
    player: Vec3,
    tokens: Vec<Entity>,
    obstacles: Vec<Entity>,
    rng: Pcg32,
    ids: IdAllocator,
    time_ticks: u64,
    events: Vec<GameEvent>,
}

impl RunnerGame {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, RunnerTuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: RunnerTuning) -> Self {
        let tuning = tuning.validated();
        Self {
            phase: GamePhase::NotStarted,
            ledger: Ledger::new(tuning.start_speed),
            player: Vec3::ZERO,
            tokens: Vec::new(),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn player(&self) -> Vec3 {
        self.player
    }

    pub fn tokens(&self) -> &[Entity] {
        &self.tokens
    }

    pub fn obstacles(&self) -> &[Entity] {
        &self.obstacles
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Begin a run from NotStarted or GameOver. Ignored while playing.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start() ignored: run already in progress");
            return false;
        }

        self.ledger.reset(self.tuning.start_speed);
        self.player = Vec3::ZERO;
        self.tokens.clear();
        self.obstacles.clear();
        self.time_ticks = 0;
        spawn_initial_wave(
            &mut self.rng,
            &mut self.ids,
            &self.tuning,
            &mut self.tokens,
            &mut self.obstacles,
        );
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Skill Runner started (high score {})", self.ledger.high_score);
        true
    }

    /// Shift the player one step, clamped to the corridor
    pub fn move_player(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let moved = self.player + direction.delta(self.tuning.move_step);
        self.player = moved.clamp(self.tuning.player_min, self.tuning.player_max);
    }

    /// Collect every token within the pickup radius of the player
    pub fn collect(&mut self) -> Vec<EntityId> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let collected = collect_within(&mut self.tokens, self.player, self.tuning.pickup_radius);
        for &id in &collected {
            self.score_token(id);
        }
        collected
    }

    /// Teleport the player (clamped). Used by tests and pointer steering.
    pub fn set_player(&mut self, position: Vec3) {
        self.player = position.clamp(self.tuning.player_min, self.tuning.player_max);
    }

    fn score_token(&mut self, id: EntityId) {
        let Some(skill) = self
            .tokens
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.kind.skill())
        else {
            return;
        };
        self.ledger
            .record_collection(skill, &self.tuning, &mut self.events);
        log::debug!("Collected {} (combo {})", skill.name(), self.ledger.combo);
        self.events.push(GameEvent::TokenCollected {
            id,
            skill,
            combo: self.ledger.combo,
        });
    }

    fn collide(&mut self, id: EntityId) {
        self.ledger.record_collision();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::ObstacleHit { id });
        self.events.push(GameEvent::GameOver {
            score: self.ledger.score,
        });
        log::info!(
            "Skill Runner over: score {}, {} skills collected",
            self.ledger.score,
            self.ledger.history.len()
        );
    }

    /// Advance one fixed step.
    ///
    /// Order: input, explicit collect, motion, retirement, collection,
    /// collision, spawning. An explicit collect sees the positions the player
    /// clicked on. Entities spawned here are first evaluated on the following tick.
    pub fn tick(&mut self, input: &TickInput) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.time_ticks += 1;

        for &direction in &input.moves {
            self.move_player(direction);
        }
        if input.idle_mode && self.time_ticks.is_multiple_of(AUTOPILOT_INTERVAL) {
            if let Some(direction) = self.autopilot() {
                self.move_player(direction);
            }
        }

        if input.collect {
            self.collect();
        }

        let distance = self.ledger.speed * self.tuning.depth_step;
        advance(&mut self.tokens, distance);
        advance(&mut self.obstacles, distance);
        retire(&mut self.tokens, self.tuning.retire_depth);
        retire(&mut self.obstacles, self.tuning.retire_depth);

        self.collect();

        if let Some(id) = find_collision(&self.obstacles, self.player, self.tuning.collision_radius)
        {
            self.collide(id);
            return;
        }

        replenish(
            &mut self.rng,
            &mut self.ids,
            &self.tuning,
            &mut self.tokens,
            &mut self.obstacles,
        );
    }

    /// Pick a move: dodge a close firewall, otherwise chase the nearest token
    pub fn autopilot(&self) -> Option<Direction> {
        let threat = self
            .obstacles
            .iter()
            .filter(|o| o.position.z > 0.0 && o.position.z < 4.0)
            .find(|o| {
                (o.position.x - self.player.x).abs() < 1.2
                    && (o.position.y - self.player.y).abs() < 1.2
            });
        if let Some(obstacle) = threat {
            let dodge_left = obstacle.position.x >= self.player.x;
            let at_wall = if dodge_left {
                self.player.x <= self.tuning.player_min.x
            } else {
                self.player.x >= self.tuning.player_max.x
            };
            return Some(match (dodge_left, at_wall) {
                (true, false) | (false, true) => Direction::Left,
                (false, false) | (true, true) => Direction::Right,
            });
        }

        let target = self
            .tokens
            .iter()
            .filter(|t| !t.is_resolved() && t.position.z > 0.0)
            .min_by(|a, b| {
                a.position
                    .z
                    .partial_cmp(&b.position.z)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;

        let dx = target.position.x - self.player.x;
        let dy = target.position.y - self.player.y;
        let half_step = self.tuning.move_step / 2.0;
        if dx.abs() >= dy.abs() && dx.abs() > half_step {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else if dy.abs() > half_step {
            Some(if dy > 0.0 { Direction::Up } else { Direction::Down })
        } else {
            None
        }
    }
}

impl Game for RunnerGame {
    type Input = TickInput;

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
        RunnerGame::start(self)
    }

    fn tick(&mut self, input: &TickInput) {
        RunnerGame::tick(self, input)
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
            entities: self
                .tokens
                .iter()
                .chain(self.obstacles.iter())
                .cloned()
                .collect(),
            player: self.player,
            current: None,
            next: None,
        }
    }
}
