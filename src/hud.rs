//! HUD text helpers shared by both games

/// Score as shown on the HUD: six digits, zero padded
pub fn format_score(score: u64) -> String {
    format!("{score:06}")
}

/// Points needed to reach the next level
pub fn points_to_next_level(score: u64, level_divisor: u64) -> u64 {
    let divisor = level_divisor.max(1);
    divisor - score % divisor
}

/// Progress through the current level (0.0 - 1.0)
pub fn level_progress(score: u64, level_divisor: u64) -> f32 {
    let divisor = level_divisor.max(1);
    (score % divisor) as f32 / divisor as f32
}

/// Tower stability readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityLabel {
    Safe,
    Stable,
    Risky,
}

impl StabilityLabel {
    pub fn for_height(height: usize) -> Self {
        if height > 10 {
            StabilityLabel::Risky
        } else if height > 5 {
            StabilityLabel::Stable
        } else {
            StabilityLabel::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLabel::Safe => "SAFE",
            StabilityLabel::Stable => "STABLE",
            StabilityLabel::Risky => "RISKY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "000000");
        assert_eq!(format_score(1234), "001234");
        assert_eq!(format_score(12_345_678), "12345678");
    }

    #[test]
    fn test_level_progress() {
        assert_eq!(points_to_next_level(0, 50), 50);
        assert_eq!(points_to_next_level(70, 50), 30);
        assert_eq!(level_progress(75, 50), 0.5);
        assert_eq!(points_to_next_level(7, 0), 1);
        assert_eq!(level_progress(7, 0), 0.0);
    }

    #[test]
    fn test_stability_label() {
        assert_eq!(StabilityLabel::for_height(5).as_str(), "SAFE");
        assert_eq!(StabilityLabel::for_height(6), StabilityLabel::Stable);
        assert_eq!(StabilityLabel::for_height(11), StabilityLabel::Risky);
    }
}
