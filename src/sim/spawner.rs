//! Entity spawning
//!
//! Spawns never look at existing positions: two entities can land on the same
//! spot. Uniform kind choice, uniform lateral offset.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, IdAllocator, Skill};
use crate::tuning::RunnerTuning;

fn random_skill(rng: &mut Pcg32, pool: &[Skill]) -> Skill {
    *pool.choose(rng).unwrap_or(&Skill::React)
}

fn token_at(rng: &mut Pcg32, ids: &mut IdAllocator, tuning: &RunnerTuning, z: f32) -> Entity {
    let skill = random_skill(rng, &Skill::ALL);
    let x = rng.random_range(-tuning.token_half_width..tuning.token_half_width);
    let y = tuning.token_y_min + rng.random::<f32>() * tuning.token_y_span;
    Entity::new(ids.next_id(), EntityKind::Token(skill), Vec3::new(x, y, z))
}

fn obstacle_at(rng: &mut Pcg32, ids: &mut IdAllocator, tuning: &RunnerTuning, z: f32) -> Entity {
    let x = rng.random_range(-tuning.obstacle_half_width..tuning.obstacle_half_width);
    let y = tuning.obstacle_y_min + rng.random::<f32>() * tuning.obstacle_y_span;
    Entity::new(ids.next_id(), EntityKind::Obstacle, Vec3::new(x, y, z))
}

/// Opening wave: tokens and obstacles scattered over the initial depth range
pub fn spawn_initial_wave(
    rng: &mut Pcg32,
    ids: &mut IdAllocator,
    tuning: &RunnerTuning,
    tokens: &mut Vec<Entity>,
    obstacles: &mut Vec<Entity>,
) {
    for _ in 0..tuning.initial_tokens {
        let z = tuning.initial_depth_min + rng.random::<f32>() * tuning.initial_depth_span;
        tokens.push(token_at(rng, ids, tuning, z));
    }
    for _ in 0..tuning.initial_obstacles {
        let z = tuning.initial_depth_min + rng.random::<f32>() * tuning.initial_depth_span;
        obstacles.push(obstacle_at(rng, ids, tuning, z));
    }
}

/// Top both collections back up to their minimum at the far boundary.
///
/// Returns how many entities were added.
pub fn replenish(
    rng: &mut Pcg32,
    ids: &mut IdAllocator,
    tuning: &RunnerTuning,
    tokens: &mut Vec<Entity>,
    obstacles: &mut Vec<Entity>,
) -> usize {
    let mut added = 0;
    while tokens.len() < tuning.min_tokens {
        tokens.push(token_at(rng, ids, tuning, tuning.spawn_depth));
        added += 1;
    }
    while obstacles.len() < tuning.min_obstacles {
        obstacles.push(obstacle_at(rng, ids, tuning, tuning.spawn_depth));
        added += 1;
    }
    added
}

/// A fresh tower block, held at the origin until placed
pub fn spawn_block(rng: &mut Pcg32, ids: &mut IdAllocator) -> Entity {
    let skill = random_skill(rng, &Skill::TOWER);
    Entity::new(ids.next_id(), EntityKind::Block(skill), Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_initial_wave_counts_and_bounds() {
        let tuning = RunnerTuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ids = IdAllocator::default();
        let (mut tokens, mut obstacles) = (Vec::new(), Vec::new());

        spawn_initial_wave(&mut rng, &mut ids, &tuning, &mut tokens, &mut obstacles);

        assert_eq!(tokens.len(), 5);
        assert_eq!(obstacles.len(), 3);
        for t in &tokens {
            assert!(matches!(t.kind, EntityKind::Token(_)));
            assert!(t.position.x >= -3.0 && t.position.x < 3.0);
            assert!(t.position.y >= 1.0 && t.position.y <= 3.0);
            assert!(t.position.z >= 10.0 && t.position.z <= 25.0);
        }
        for o in &obstacles {
            assert!(o.kind.is_obstacle());
            assert!(o.position.x >= -2.0 && o.position.x < 2.0);
        }
    }

    #[test]
    fn test_replenish_only_fills_to_minimum() {
        let tuning = RunnerTuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ids = IdAllocator::default();
        let (mut tokens, mut obstacles) = (Vec::new(), Vec::new());

        assert_eq!(replenish(&mut rng, &mut ids, &tuning, &mut tokens, &mut obstacles), 3);
        assert_eq!(tokens.len(), 2);
        assert_eq!(obstacles.len(), 1);
        assert!(tokens.iter().all(|t| t.position.z == tuning.spawn_depth));

        let before: Vec<_> = tokens.clone();
        assert_eq!(replenish(&mut rng, &mut ids, &tuning, &mut tokens, &mut obstacles), 0);
        assert_eq!(tokens, before);
    }

    #[test]
    fn test_block_skills_come_from_tower_set() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ids = IdAllocator::default();
        for _ in 0..50 {
            let block = spawn_block(&mut rng, &mut ids);
            match block.kind {
                EntityKind::Block(skill) => assert!(Skill::TOWER.contains(&skill)),
                other => panic!("unexpected kind {other:?}"),
            }
        }
    }
}
