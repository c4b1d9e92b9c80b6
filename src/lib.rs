//! Skill Arcade - simulation core for the portfolio mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (Skill Runner, Skill Tower, scoring)
//! - `session`: Fixed-step frame driver with write-through persistence
//! - `platform`: Input mapping, storage backends, wall clock
//! - `persistence`: Per-game profile (high score, leaderboard, settings)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::Leaderboard;
pub use persistence::{GameKind, Profile};
pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Frame clock constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Distance between two points on the ground plane, ignoring height.
///
/// Used by the tower: blocks are compared on (x, z) only.
#[inline]
pub fn planar_distance(a: glam::Vec3, b: glam::Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}
