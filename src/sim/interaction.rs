//! Interaction resolver
//!
//! Runner: proximity between the player and live entities.
//! Tower: planar alignment between a placement and the block below.

use glam::Vec3;

use super::entity::{Entity, EntityId};
use crate::planar_distance;

/// Collect every unresolved token within `radius` of `player`.
///
/// Each hit is flagged resolved before being returned, so a token is reported
/// at most once over its lifetime.
pub fn collect_within(tokens: &mut [Entity], player: Vec3, radius: f32) -> Vec<EntityId> {
    let mut collected = Vec::new();
    for token in tokens.iter_mut() {
        if token.is_resolved() || token.kind.is_obstacle() {
            continue;
        }
        if token.position.distance(player) < radius && token.resolve() {
            collected.push(token.id);
        }
    }
    collected
}

/// First obstacle within `radius` of `player`. Obstacles are never consumed.
pub fn find_collision(obstacles: &[Entity], player: Vec3, radius: f32) -> Option<EntityId> {
    obstacles
        .iter()
        .find(|o| o.position.distance(player) < radius)
        .map(|o| o.id)
}

/// Whether a block at `position` sits stably on the tower.
///
/// An empty tower always accepts. Otherwise the planar offset from the top
/// block must be strictly less than `tolerance`.
pub fn is_stable(tower: &[Entity], position: Vec3, tolerance: f32) -> bool {
    match tower.last() {
        None => true,
        Some(top) => planar_distance(position, top.position) < tolerance,
    }
}
