//! Raw input to game commands

use glam::Vec2;

use crate::sim::Direction;

/// Minimum swipe travel in pixels before it counts as a move
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// Map a `KeyboardEvent.key` value to a move (WASD or arrows, any case)
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key.to_lowercase().as_str() {
        "a" | "arrowleft" => Some(Direction::Left),
        "d" | "arrowright" => Some(Direction::Right),
        "w" | "arrowup" => Some(Direction::Up),
        "s" | "arrowdown" => Some(Direction::Down),
        _ => None,
    }
}

/// Turns a touchstart/touchend pair into a move along the dominant axis
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.start = Some(Vec2::new(x, y));
    }

    pub fn touch_end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let start = self.start.take()?;
        let delta = Vec2::new(x, y) - start;

        if delta.x.abs() > delta.y.abs() {
            if delta.x > SWIPE_THRESHOLD {
                Some(Direction::Right)
            } else if delta.x < -SWIPE_THRESHOLD {
                Some(Direction::Left)
            } else {
                None
            }
        } else if delta.y > SWIPE_THRESHOLD {
            // Screen y grows downward
            Some(Direction::Down)
        } else if delta.y < -SWIPE_THRESHOLD {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

/// Map a click inside a `width` x `height` canvas to ground-plane (x, z)
/// within `[-extent, extent]`
pub fn canvas_to_ground(px: f32, py: f32, width: f32, height: f32, extent: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let nx = (px / width) * 2.0 - 1.0;
    let nz = (py / height) * 2.0 - 1.0;
    Vec2::new(nx, nz).clamp(Vec2::splat(-1.0), Vec2::splat(1.0)) * extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(direction_for_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(direction_for_key("D"), Some(Direction::Right));
        assert_eq!(direction_for_key("w"), Some(Direction::Up));
        assert_eq!(direction_for_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(direction_for_key(" "), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let mut swipe = SwipeTracker::default();
        swipe.touch_start(100.0, 100.0);
        assert_eq!(swipe.touch_end(180.0, 130.0), Some(Direction::Right));

        swipe.touch_start(100.0, 100.0);
        assert_eq!(swipe.touch_end(90.0, 20.0), Some(Direction::Up));

        swipe.touch_start(100.0, 100.0);
        assert_eq!(swipe.touch_end(130.0, 110.0), None);

        // No matching touchstart
        assert_eq!(swipe.touch_end(500.0, 100.0), None);
    }

    #[test]
    fn test_canvas_mapping() {
        assert_eq!(canvas_to_ground(400.0, 300.0, 800.0, 600.0, 4.0), Vec2::ZERO);
        assert_eq!(canvas_to_ground(0.0, 600.0, 800.0, 600.0, 4.0), Vec2::new(-4.0, 4.0));
        assert_eq!(canvas_to_ground(10.0, 10.0, 0.0, 600.0, 4.0), Vec2::ZERO);
    }
}
