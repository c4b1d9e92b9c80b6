//! Phase, events and the presentation snapshot shared by both games

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Skill};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended; only `start()` leaves this phase
    GameOver,
}

/// One-off unlocks shown as toasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Achievement {
    FirstFoundation,
    TowerRising,
    Skyscraper,
    CenturyScore,
    MasterBuilder,
}

impl Achievement {
    pub fn message(&self) -> &'static str {
        match self {
            Achievement::FirstFoundation => "First Foundation!",
            Achievement::TowerRising => "Tower Rising!",
            Achievement::Skyscraper => "Skyscraper!",
            Achievement::CenturyScore => "Century Score!",
            Achievement::MasterBuilder => "Master Builder!",
        }
    }
}

/// Discrete things that happened during a tick or input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    TokenCollected { id: EntityId, skill: Skill, combo: u32 },
    ObstacleHit { id: EntityId },
    BlockPlaced { id: EntityId, skill: Skill, stable: bool },
    LevelUp { level: u32 },
    NewHighScore { score: u64 },
    AchievementUnlocked(Achievement),
    GameOver { score: u64 },
}

/// Read-only view handed to the renderer every frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub level: u32,
    pub speed: f32,
    /// Runner: live tokens and obstacles. Tower: placed blocks, bottom first.
    pub entities: Vec<Entity>,
    /// Runner player position (origin for the tower)
    pub player: Vec3,
    /// Tower block in hand
    pub current: Option<Entity>,
    /// Tower block queued after `current`
    pub next: Option<Entity>,
}
