//! Tower milestones

use super::state::Achievement;

/// Milestones reached by a stable placement that produced `tower_height` and `score`
pub fn tower_milestones(tower_height: usize, score: u64) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    match tower_height {
        5 => unlocked.push(Achievement::FirstFoundation),
        10 => unlocked.push(Achievement::TowerRising),
        20 => unlocked.push(Achievement::Skyscraper),
        _ => {}
    }
    match score {
        100 => unlocked.push(Achievement::CenturyScore),
        500 => unlocked.push(Achievement::MasterBuilder),
        _ => {}
    }
    unlocked
}
