//! Per-game profile persistence
//!
//! Features:
//! - One key each for high score, leaderboard and settings
//! - Missing keys fall back to {0, [], {true, true}}
//! - Malformed values are discarded, never propagated
//! - Write-through saves; the first failure switches to memory-only

use crate::highscores::Leaderboard;
use crate::platform::storage::{KeyValueStore, StorageError};
use crate::settings::Settings;

/// Which game a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Runner,
    Tower,
}

impl GameKind {
    fn prefix(&self) -> &'static str {
        match self {
            GameKind::Runner => "skillRunner",
            GameKind::Tower => "skillTower",
        }
    }

    pub fn high_score_key(&self) -> String {
        format!("{}HighScore", self.prefix())
    }

    pub fn leaderboard_key(&self) -> String {
        format!("{}Leaderboard", self.prefix())
    }

    pub fn settings_key(&self) -> String {
        format!("{}Settings", self.prefix())
    }
}

/// Everything persisted for one game
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub kind: GameKind,
    pub high_score: u64,
    pub leaderboard: Leaderboard,
    pub settings: Settings,
    /// False once a write failed; later saves are skipped
    persist: bool,
}

impl Profile {
    /// Defaults, not backed by anything yet
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            high_score: 0,
            leaderboard: Leaderboard::new(),
            settings: Settings::default(),
            persist: true,
        }
    }

    /// Read the profile once at session start
    pub fn load(kind: GameKind, store: &impl KeyValueStore) -> Self {
        let mut profile = Self::new(kind);

        match store.get_item(&kind.high_score_key()) {
            Ok(Some(text)) => match text.trim().parse::<u64>() {
                Ok(score) => profile.high_score = score,
                Err(_) => log::warn!("Discarding malformed high score {text:?}"),
            },
            Ok(None) => {}
            Err(e) => {
                log::warn!("Storage unavailable, scores kept in memory only: {e}");
                profile.persist = false;
                return profile;
            }
        }

        if let Ok(Some(json)) = store.get_item(&kind.leaderboard_key()) {
            profile.leaderboard = Leaderboard::from_json_lenient(&json);
        }
        if let Ok(Some(json)) = store.get_item(&kind.settings_key()) {
            profile.settings = Settings::from_json_lenient(&json);
        }

        log::info!(
            "Loaded {:?} profile: high score {}, {} leaderboard entries",
            kind,
            profile.high_score,
            profile.leaderboard.entries.len()
        );
        profile
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// Raise the high score and write it through. Lower scores are ignored.
    pub fn record_high_score(&mut self, score: u64, store: &mut impl KeyValueStore) {
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        let key = self.kind.high_score_key();
        self.write(store, |s| s.set_item(&key, &score.to_string()));
    }

    /// Add a finished run to the leaderboard; saves if it placed
    pub fn record_run(
        &mut self,
        score: u64,
        name: &str,
        timestamp: f64,
        store: &mut impl KeyValueStore,
    ) -> Option<usize> {
        let rank = self.leaderboard.add_score(score, name, timestamp)?;
        log::info!("Run of {score} placed #{rank} on the leaderboard");
        let key = self.kind.leaderboard_key();
        match self.leaderboard.to_json() {
            Ok(json) => self.write(store, |s| s.set_item(&key, &json)),
            Err(e) => log::warn!("Failed to encode leaderboard: {e}"),
        }
        Some(rank)
    }

    pub fn save_settings(&mut self, store: &mut impl KeyValueStore) {
        let key = self.kind.settings_key();
        match self.settings.to_json() {
            Ok(json) => self.write(store, |s| s.set_item(&key, &json)),
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }

    fn write<S, F>(&mut self, store: &mut S, op: F)
    where
        S: KeyValueStore,
        F: FnOnce(&mut S) -> Result<(), StorageError>,
    {
        if !self.persist {
            return;
        }
        if let Err(e) = op(store) {
            log::warn!("Storage write failed, continuing in memory: {e}");
            self.persist = false;
        }
    }
}
