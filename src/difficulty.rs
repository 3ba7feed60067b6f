use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::heuristics::Strategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

/// Tuning bundle for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Informational only; movement cadence comes from the delays below.
    pub ghost_speed: f32,
    pub frightened_ticks: u32,
    /// In `[0, 1]`. Lowers the chance of random detours and stretches the
    /// ambusher's lookahead.
    pub aggressiveness: f64,
    pub player_delay: u32,
    pub ghost_delay: u32,
}

const EASY: DifficultyProfile = DifficultyProfile {
    ghost_speed: 0.6,
    frightened_ticks: 360,
    aggressiveness: 0.5,
    player_delay: 6,
    ghost_delay: 6,
};

// Same ghost delay as easy; hard only speeds up the player.
const HARD: DifficultyProfile = DifficultyProfile {
    ghost_speed: 0.6,
    frightened_ticks: 240,
    aggressiveness: 1.0,
    player_delay: 4,
    ghost_delay: 6,
};

impl Difficulty {
    pub fn profile(self) -> &'static DifficultyProfile {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Hard => &HARD,
        }
    }

    /// One strategy per ghost slot.
    pub fn strategies(self) -> [Strategy; 3] {
        match self {
            Difficulty::Easy => [Strategy::Chaser, Strategy::Forager, Strategy::WallHugger],
            Difficulty::Hard => [Strategy::Ambusher, Strategy::Confuser, Strategy::Predator],
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected `easy` or `hard`)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}
