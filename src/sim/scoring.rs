//! Score and level progression

use serde::{Deserialize, Serialize};

use super::levels::{LevelConfig, MAX_LEVEL, level_config};

/// What a single pass-through changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    /// Score after the increment
    pub score: u32,
    /// New level, if this point unlocked one
    pub level_up: Option<u32>,
}

/// Score counter and active level for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    score: u32,
    level: u32,
}

impl Progression {
    /// Fresh run starting at `level` (clamped into 1..=10)
    pub fn new(level: u32) -> Self {
        Self {
            score: 0,
            level: level.clamp(1, MAX_LEVEL),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Parameters of the active level
    pub fn config(&self) -> &'static LevelConfig {
        level_config(self.level)
    }

    /// Count one cleared obstacle, advancing at most one level
    pub fn record_pass(&mut self) -> ScoreOutcome {
        self.score = self.score.saturating_add(1);

        let level_up = if self.score >= self.config().score_to_advance && self.level < MAX_LEVEL {
            self.level += 1;
            log::info!("Level up: {} (score {})", self.level, self.score);
            Some(self.level)
        } else {
            None
        };

        ScoreOutcome {
            score: self.score,
            level_up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_threshold() {
        let mut p = Progression::new(1);
        for expected in 1..=4 {
            let out = p.record_pass();
            assert_eq!(out.score, expected);
            assert_eq!(out.level_up, None);
        }
        let out = p.record_pass();
        assert_eq!(out.score, 5);
        assert_eq!(out.level_up, Some(2));
        assert_eq!(p.config().speed, 350.0);
        assert_eq!(p.config().gap, 190.0);
    }

    #[test]
    fn test_max_level_is_sticky() {
        let mut p = Progression::new(10);
        for _ in 0..100 {
            assert_eq!(p.record_pass().level_up, None);
        }
        assert_eq!(p.level(), MAX_LEVEL);
        assert_eq!(p.score(), 100);
    }

    #[test]
    fn test_selected_start_level_catches_up_one_step_at_a_time() {
        // Starting at level 3 (threshold 15) with a fresh score
        let mut p = Progression::new(3);
        for _ in 0..14 {
            p.record_pass();
        }
        assert_eq!(p.level(), 3);
        assert_eq!(p.record_pass().level_up, Some(4));
    }

    #[test]
    fn test_new_clamps_level() {
        assert_eq!(Progression::new(0).level(), 1);
        assert_eq!(Progression::new(99).level(), MAX_LEVEL);
    }

    proptest! {
        #[test]
        fn prop_level_monotonic_and_bounded(start in 1u32..=10, passes in 0usize..200) {
            let mut p = Progression::new(start);
            let mut last_level = p.level();
            for i in 0..passes {
                let threshold = p.config().score_to_advance;
                let before = p.level();
                let out = p.record_pass();
                prop_assert_eq!(out.score as usize, i + 1);
                prop_assert!(p.level() >= last_level);
                prop_assert!(p.level() <= MAX_LEVEL);
                if let Some(l) = out.level_up {
                    prop_assert_eq!(l, before + 1);
                    prop_assert!(out.score >= threshold);
                }
                last_level = p.level();
            }
        }
    }
}
