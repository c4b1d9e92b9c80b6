//! Sound cue selection
//!
//! Maps game events to the sound effects the page should play. Playback
//! itself belongs to the host page.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Combo above which a collect also plays the combo sting
pub const COMBO_STING_THRESHOLD: u32 = 2;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Token collected
    Collect,
    /// Collected while on a combo streak
    Combo,
    /// Block landed on the tower
    Place,
    /// Run ended
    GameOver,
    /// Start the synthwave loop
    Music,
}

impl SoundEffect {
    /// Asset path served by the site
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::Collect => "/sounds/collect.mp3",
            SoundEffect::Combo => "/sounds/combo.mp3",
            SoundEffect::Place => "/sounds/collect.mp3",
            SoundEffect::GameOver => "/sounds/gameover.mp3",
            SoundEffect::Music => "/sounds/synthwave.mp3",
        }
    }

    /// Playback volume (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        match self {
            SoundEffect::Collect | SoundEffect::Place => 0.3,
            SoundEffect::Combo => 0.4,
            SoundEffect::GameOver => 0.5,
            SoundEffect::Music => 0.2,
        }
    }
}

/// Sounds for one event, respecting the player's toggles
pub fn cues_for(event: &GameEvent, settings: &Settings) -> Vec<SoundEffect> {
    let mut cues = Vec::new();
    match event {
        GameEvent::Started if settings.music_enabled => cues.push(SoundEffect::Music),
        _ if !settings.sound_enabled => {}
        GameEvent::TokenCollected { combo, .. } => {
            cues.push(SoundEffect::Collect);
            if *combo > COMBO_STING_THRESHOLD {
                cues.push(SoundEffect::Combo);
            }
        }
        GameEvent::BlockPlaced { stable: true, .. } => cues.push(SoundEffect::Place),
        GameEvent::GameOver { .. } => cues.push(SoundEffect::GameOver),
        _ => {}
    }
    cues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityId, Skill};

    fn collected(combo: u32) -> GameEvent {
        GameEvent::TokenCollected {
            id: EntityId(1),
            skill: Skill::Rust,
            combo,
        }
    }

    #[test]
    fn test_combo_sting() {
        let settings = Settings::default();
        assert_eq!(cues_for(&collected(1), &settings), vec![SoundEffect::Collect]);
        assert_eq!(
            cues_for(&collected(3), &settings),
            vec![SoundEffect::Collect, SoundEffect::Combo]
        );
    }

    #[test]
    fn test_toggles_respected() {
        let mut settings = Settings::default();
        settings.toggle_sound();
        assert!(cues_for(&collected(5), &settings).is_empty());
        assert_eq!(cues_for(&GameEvent::Started, &settings), vec![SoundEffect::Music]);

        settings.toggle_music();
        assert!(cues_for(&GameEvent::Started, &settings).is_empty());
    }

    #[test]
    fn test_game_over_sound() {
        let cues = cues_for(&GameEvent::GameOver { score: 5 }, &Settings::default());
        assert_eq!(cues, vec![SoundEffect::GameOver]);
        assert_eq!(SoundEffect::GameOver.asset(), "/sounds/gameover.mp3");
    }
}
