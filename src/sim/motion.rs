//! Runner motion and lifecycle
//!
//! Everything scrolls toward the player along -z. Entities past the near
//! boundary are retired whether or not they were collected.

use super::entity::Entity;

/// Move every entity toward the player by `distance`
pub fn advance(entities: &mut [Entity], distance: f32) {
    for entity in entities {
        entity.position.z -= distance;
    }
}

/// Drop entities at or past `retire_depth`. Returns the number retired.
pub fn retire(entities: &mut Vec<Entity>, retire_depth: f32) -> usize {
    let before = entities.len();
    entities.retain(|e| e.position.z > retire_depth);
    before - entities.len()
}
