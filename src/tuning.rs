//! Data-driven game balance
//!
//! Every gameplay constant lives here so the controllers stay free of magic
//! numbers. `Default` reproduces the shipped balance.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Balance for the endless runner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerTuning {
    /// Depth travelled per tick at speed 1.0
    pub depth_step: f32,
    /// Speed at game start
    pub start_speed: f32,
    /// Speed gained per collected token
    pub speed_increment: f32,
    /// Speed ceiling
    pub max_speed: f32,

    /// Depth at which new entities appear
    pub spawn_depth: f32,
    /// Entities at or below this depth are retired
    pub retire_depth: f32,
    /// Depth range of the opening wave
    pub initial_depth_min: f32,
    pub initial_depth_span: f32,
    /// Opening wave size
    pub initial_tokens: usize,
    pub initial_obstacles: usize,
    /// Live-entity floor maintained by the spawner
    pub min_tokens: usize,
    pub min_obstacles: usize,

    /// Token lateral placement: x in [-half_width, half_width), y in [y_min, y_min + y_span)
    pub token_half_width: f32,
    pub token_y_min: f32,
    pub token_y_span: f32,
    /// Obstacle lateral placement
    pub obstacle_half_width: f32,
    pub obstacle_y_min: f32,
    pub obstacle_y_span: f32,

    /// Pickup distance, per tick and on click/tap
    pub pickup_radius: f32,
    /// Obstacle hit distance
    pub collision_radius: f32,

    /// Player movement per input event
    pub move_step: f32,
    /// Player bounds (x, y); z is fixed at 0
    pub player_min: Vec3,
    pub player_max: Vec3,

    /// Points per token
    pub token_points: u64,
    /// Combo bonus kicks in above this combo
    pub combo_threshold: u32,
    /// Bonus points per combo step once above the threshold
    pub combo_bonus: u64,
    /// Score per level
    pub level_divisor: u64,
    /// Bonus points per completed level divisor
    pub level_bonus: u64,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            depth_step: 0.1,
            start_speed: 1.0,
            speed_increment: 0.1,
            max_speed: 8.0,

            spawn_depth: 20.0,
            retire_depth: -5.0,
            initial_depth_min: 10.0,
            initial_depth_span: 15.0,
            initial_tokens: 5,
            initial_obstacles: 3,
            min_tokens: 2,
            min_obstacles: 1,

            token_half_width: 3.0,
            token_y_min: 1.0,
            token_y_span: 2.0,
            obstacle_half_width: 2.0,
            obstacle_y_min: 0.5,
            obstacle_y_span: 1.5,

            pickup_radius: 1.0,
            collision_radius: 1.0,

            move_step: 0.5,
            player_min: Vec3::new(-3.0, -1.0, 0.0),
            player_max: Vec3::new(3.0, 3.0, 0.0),

            token_points: 10,
            combo_threshold: 3,
            combo_bonus: 5,
            level_divisor: 100,
            level_bonus: 10,
        }
    }
}

impl RunnerTuning {
    /// Repair values that would break the simulation (zero divisor, inverted ranges)
    pub fn validated(mut self) -> Self {
        self.level_divisor = self.level_divisor.max(1);
        self.max_speed = self.max_speed.max(self.start_speed);
        let (min, max) = (self.player_min, self.player_max);
        self.player_min = min.min(max);
        self.player_max = min.max(max);
        self
    }
}

/// Balance for the tower stacker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackerTuning {
    /// Maximum planar offset from the block below (exclusive)
    pub stability_tolerance: f32,
    /// Height of one tower slot
    pub slot_height: f32,
    /// Points per stable placement
    pub block_points: u64,
    /// Score per level
    pub level_divisor: u64,
    /// Half extent of the placement area in world units
    pub placement_extent: f32,
}

impl Default for StackerTuning {
    fn default() -> Self {
        Self {
            stability_tolerance: 0.8,
            slot_height: 0.5,
            block_points: 10,
            level_divisor: 50,
            placement_extent: 4.0,
        }
    }
}

impl StackerTuning {
    /// Repair values that would break the simulation
    pub fn validated(mut self) -> Self {
        self.level_divisor = self.level_divisor.max(1);
        self
    }
}
