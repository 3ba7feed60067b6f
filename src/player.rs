use crate::components::{Cadence, Dir, Pos};
use crate::difficulty::DifficultyProfile;
use crate::maze::Maze;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_SCORE: u32 = 50;
pub const STARTING_LIVES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) pos: Pos,
    pub(crate) facing: Option<Dir>,
    pub(crate) intent: Option<Dir>,
    pub(crate) lives: u32,
    pub(crate) score: u32,
    pub(crate) power_ticks: u32,
    pub(crate) cadence: Cadence,
}

impl Player {
    pub fn new(spawn: Pos) -> Self {
        Self {
            pos: spawn,
            facing: None,
            intent: None,
            lives: STARTING_LIVES,
            score: 0,
            power_ticks: 0,
            cadence: Cadence::default(),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn facing(&self) -> Option<Dir> {
        self.facing
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn power_ticks(&self) -> u32 {
        self.power_ticks
    }

    pub fn is_powered(&self) -> bool {
        self.power_ticks > 0
    }

    /// Buffers a turn; the latest call wins.
    pub fn set_intent(&mut self, dir: Dir) {
        self.intent = Some(dir);
    }

    pub fn tick(&mut self, maze: &mut Maze, profile: &DifficultyProfile) {
        if !self.cadence.ready(profile.player_delay) {
            return;
        }

        if let Some(dir) = self.intent {
            if !maze.is_wall(self.pos.step(dir)) {
                self.facing = Some(dir);
            }
        }
        if let Some(dir) = self.facing {
            let ahead = self.pos.step(dir);
            if !maze.is_wall(ahead) {
                self.pos = ahead;
            }
        }

        if maze.consume_pellet(self.pos) {
            self.score += PELLET_SCORE;
        }
        if maze.consume_power_item(self.pos) {
            self.score += POWER_SCORE;
            self.power_ticks = profile.frightened_ticks;
        }
        if self.power_ticks > 0 {
            self.power_ticks -= 1;
        }
    }

    /// Back to `spawn` with movement and power cleared. Score and lives stay.
    pub fn respawn(&mut self, spawn: Pos) {
        self.pos = spawn;
        self.facing = None;
        self.intent = None;
        self.power_ticks = 0;
        self.cadence.reset();
    }

    /// Moves to `spawn` without touching heading, buffered turn or power.
    pub fn relocate(&mut self, spawn: Pos) {
        self.pos = spawn;
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }
}
