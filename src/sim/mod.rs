//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage, or platform dependencies

pub mod achievements;
pub mod entity;
pub mod interaction;
pub mod ledger;
pub mod motion;
pub mod runner;
pub mod spawner;
pub mod stacker;
pub mod state;

pub use entity::{Entity, EntityId, EntityKind, Skill};
pub use ledger::Ledger;
pub use runner::{Direction, RunnerGame, TickInput};
pub use stacker::{StackerGame, StackerInput};
pub use state::{Achievement, GameEvent, GamePhase, Snapshot};

/// Per-tick input that carries one-shot commands
pub trait FrameInput: Default + Clone {
    /// Drop commands that must only apply to one tick, keep sticky toggles
    fn clear_one_shots(&mut self);
}

/// A game controller the session can drive
pub trait Game {
    type Input: FrameInput;

    fn phase(&self) -> GamePhase;

    fn ledger(&self) -> &Ledger;

    /// Seed the high score read from the persistence cache
    fn restore_high_score(&mut self, high_score: u64);

    /// NotStarted/GameOver -> Playing. Returns false if already playing.
    fn start(&mut self) -> bool;

    /// Advance one fixed step
    fn tick(&mut self, input: &Self::Input);

    fn drain_events(&mut self) -> Vec<GameEvent>;

    fn snapshot(&self) -> Snapshot;
}
