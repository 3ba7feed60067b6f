//! Session controller: owns the maze, the player and the three ghosts and
//! advances them in a fixed order once per tick.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::components::Dir;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::ghost::{update_ghost, Ghost};
use crate::level::{GHOST_HOMES, GHOST_NAMES, MAZE_VARIANTS, PLAYER_SPAWN};
use crate::maze::Maze;
use crate::player::Player;

/// Ticks between chase/scatter flips.
pub const SCATTER_INTERVAL: u32 = 420;
pub const GHOST_CAPTURE_SCORE: u32 = 200;
pub const GAME_OVER_MESSAGE: &str = "GAME OVER - PRESS SPACE TO RESTART";

pub struct Game<R = ChaCha8Rng> {
    initial_difficulty: Difficulty,
    difficulty: Difficulty,
    maze_idx: usize,
    level: u32,
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    scatter_timer: u32,
    message: Option<String>,
    rng: R,
}

/// Read-only view handed to the renderer after each tick.
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub ghosts: &'a [Ghost],
    pub level: u32,
    pub maze_variant: usize,
    pub difficulty: Difficulty,
    pub message: Option<&'a str>,
    pub game_over: bool,
}

impl Game<ChaCha8Rng> {
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::new(difficulty, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Game {
            initial_difficulty: difficulty,
            difficulty,
            maze_idx: 0,
            level: 1,
            maze: Maze::from_layout(MAZE_VARIANTS[0]),
            player: Player::new(PLAYER_SPAWN),
            ghosts: build_ghosts(difficulty),
            scatter_timer: SCATTER_INTERVAL,
            message: None,
            rng,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn maze_variant(&self) -> usize {
        self.maze_idx
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &'static DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_over(&self) -> bool {
        self.player.lives() == 0
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: &self.player,
            ghosts: &self.ghosts,
            level: self.level,
            maze_variant: self.maze_idx,
            difficulty: self.difficulty,
            message: self.message(),
            game_over: self.is_over(),
        }
    }

    pub fn set_intent(&mut self, dir: Dir) {
        self.player.set_intent(dir);
    }

    /// Swaps the ghost roster for the other difficulty. Player and maze are
    /// left alone; a powered player keeps the new roster frightened.
    pub fn toggle_difficulty(&mut self) {
        self.difficulty = self.difficulty.toggled();
        self.ghosts = build_ghosts(self.difficulty);
        for ghost in &mut self.ghosts {
            ghost.resolve_mode(self.player.is_powered());
        }
        self.message = Some(format!("Difficulty: {}", self.difficulty));
        info!(difficulty = %self.difficulty, "difficulty changed");
    }

    pub fn next_maze(&mut self) {
        self.maze_idx = (self.maze_idx + 1) % MAZE_VARIANTS.len();
        self.reset_level();
        self.message = Some(format!("Maze: {}", self.maze_idx + 1));
        info!(variant = self.maze_idx + 1, "maze changed");
    }

    /// Fresh copy of the current maze with everyone back on their spawn
    /// tiles. Score and lives carry over.
    pub fn reset_level(&mut self) {
        self.maze = Maze::from_layout(MAZE_VARIANTS[self.maze_idx]);
        self.player.respawn(PLAYER_SPAWN);
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.scatter_timer = SCATTER_INTERVAL;
    }

    pub fn restart(&mut self) {
        self.difficulty = self.initial_difficulty;
        self.maze_idx = 0;
        self.level = 1;
        self.maze = Maze::from_layout(MAZE_VARIANTS[0]);
        self.player = Player::new(PLAYER_SPAWN);
        self.ghosts = build_ghosts(self.difficulty);
        self.scatter_timer = SCATTER_INTERVAL;
        self.message = None;
        info!(difficulty = %self.difficulty, "session restarted");
    }

    pub fn tick(&mut self) {
        if self.is_over() {
            return;
        }
        let profile = self.difficulty.profile();

        self.player.tick(&mut self.maze, profile);
        self.advance_scatter_timer();
        for idx in 0..self.ghosts.len() {
            update_ghost(
                &mut self.ghosts,
                idx,
                &self.maze,
                &self.player,
                profile,
                &mut self.rng,
            );
        }

        if self.resolve_collisions() {
            return;
        }

        if self.maze.is_cleared() {
            self.level += 1;
            self.maze_idx = (self.maze_idx + 1) % MAZE_VARIANTS.len();
            self.reset_level();
            info!(
                level = self.level,
                variant = self.maze_idx + 1,
                score = self.player.score(),
                "level cleared"
            );
        }
    }

    fn advance_scatter_timer(&mut self) {
        self.scatter_timer = self.scatter_timer.saturating_sub(1);
        if self.scatter_timer > 0 {
            return;
        }
        for ghost in &mut self.ghosts {
            ghost.toggle_scatter();
        }
        self.scatter_timer = SCATTER_INTERVAL;
        debug!("scatter/chase flipped");
    }

    /// Returns true when the player lost a life this tick.
    fn resolve_collisions(&mut self) -> bool {
        let player_pos = self.player.pos();
        for idx in 0..self.ghosts.len() {
            let ghost = &mut self.ghosts[idx];
            if !ghost.is_alive() || ghost.pos() != player_pos {
                continue;
            }
            if ghost.is_frightened() {
                ghost.capture();
                self.player.add_score(GHOST_CAPTURE_SCORE);
                debug!(ghost = ghost.name(), at = %player_pos, "ghost captured");
                continue;
            }

            let culprit = ghost.name();
            self.player.lose_life();
            let lives = self.player.lives();
            if lives == 0 {
                self.message = Some(GAME_OVER_MESSAGE.to_string());
                info!(score = self.player.score(), ghost = culprit, "game over");
            } else {
                self.message = Some(format!("Lives left: {lives}"));
                self.player.relocate(PLAYER_SPAWN);
                for ghost in &mut self.ghosts {
                    ghost.reset();
                }
                info!(lives, ghost = culprit, "life lost");
            }
            return true;
        }
        false
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut Maze, &mut Player, &mut Vec<Ghost>) {
        (&mut self.maze, &mut self.player, &mut self.ghosts)
    }
}

fn build_ghosts(difficulty: Difficulty) -> Vec<Ghost> {
    difficulty
        .strategies()
        .into_iter()
        .enumerate()
        .map(|(i, strategy)| Ghost::new(GHOST_NAMES[i], GHOST_HOMES[i], i, strategy))
        .collect()
}
