//! Level table
//!
//! Static difficulty curve: each level scrolls faster, narrows the gap and
//! asks for a higher score before the next one unlocks.

use serde::{Deserialize, Serialize};

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Difficulty parameters for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level number (1-based)
    pub level: u32,
    /// Horizontal obstacle velocity (units/s)
    pub speed: f32,
    /// Vertical opening between obstacle segments
    pub gap: f32,
    /// Score at which the next level unlocks
    pub score_to_advance: u32,
}

const fn entry(level: u32, speed: f32, gap: f32, score_to_advance: u32) -> LevelConfig {
    LevelConfig {
        level,
        speed,
        gap,
        score_to_advance,
    }
}

/// Levels 1..=10, indexed by `level - 1`
pub const LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    entry(1, 300.0, 200.0, 5),
    entry(2, 350.0, 190.0, 10),
    entry(3, 400.0, 180.0, 15),
    entry(4, 450.0, 170.0, 20),
    entry(5, 500.0, 160.0, 25),
    entry(6, 550.0, 150.0, 30),
    entry(7, 600.0, 140.0, 35),
    entry(8, 650.0, 130.0, 40),
    entry(9, 700.0, 120.0, 45),
    entry(10, 800.0, 110.0, 50),
];

/// Look up a level, clamping out-of-range numbers into 1..=10
pub fn level_config(level: u32) -> &'static LevelConfig {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    &LEVELS[idx]
}
