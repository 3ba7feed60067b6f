use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::components::{Cadence, Pos};
use crate::difficulty::DifficultyProfile;
use crate::heuristics::{Strategy, TargetContext};
use crate::maze::Maze;
use crate::pathfinding::next_step;
use crate::player::Player;

/// Move ticks a captured ghost spends off the board.
pub const RESPAWN_TICKS: u32 = 240;
const FRIGHTENED_FORAGE_CHANCE: f64 = 0.15;
const BASE_DISTRACTION: f64 = 0.25;
const DISTRACTION_PER_AGGRESSION: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GhostMode {
    Chase,
    Scatter,
    Frightened,
    Respawning,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub(crate) name: &'static str,
    pub(crate) pos: Pos,
    pub(crate) home: Pos,
    pub(crate) color_index: usize,
    pub(crate) strategy: Strategy,
    pub(crate) mode: GhostMode,
    pub(crate) respawn_ticks: u32,
    pub(crate) cadence: Cadence,
}

impl Ghost {
    pub fn new(name: &'static str, home: Pos, color_index: usize, strategy: Strategy) -> Self {
        Self {
            name,
            pos: home,
            home,
            color_index,
            strategy,
            mode: GhostMode::Chase,
            respawn_ticks: 0,
            cadence: Cadence::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn home(&self) -> Pos {
        self.home
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn respawn_ticks(&self) -> u32 {
        self.respawn_ticks
    }

    pub fn is_alive(&self) -> bool {
        self.mode != GhostMode::Respawning
    }

    pub fn is_frightened(&self) -> bool {
        self.mode == GhostMode::Frightened
    }

    /// Home tile, chasing, nothing pending.
    pub fn reset(&mut self) {
        self.pos = self.home;
        self.mode = GhostMode::Chase;
        self.respawn_ticks = 0;
    }

    /// Power overrides chase and scatter; losing it drops straight to chase.
    pub fn resolve_mode(&mut self, player_powered: bool) {
        match self.mode {
            GhostMode::Respawning => {}
            _ if player_powered => self.mode = GhostMode::Frightened,
            GhostMode::Frightened => self.mode = GhostMode::Chase,
            _ => {}
        }
    }

    pub fn toggle_scatter(&mut self) {
        self.mode = match self.mode {
            GhostMode::Chase => GhostMode::Scatter,
            GhostMode::Scatter => GhostMode::Chase,
            other => other,
        };
    }

    pub fn capture(&mut self) {
        self.mode = GhostMode::Respawning;
        self.respawn_ticks = RESPAWN_TICKS;
    }
}

fn distraction_chance(profile: &DifficultyProfile) -> f64 {
    (BASE_DISTRACTION - DISTRACTION_PER_AGGRESSION * profile.aggressiveness).max(0.0)
}

fn wander(maze: &Maze, from: Pos, rng: &mut impl Rng) -> Option<Pos> {
    maze.open_neighbors(from).choose(rng).copied()
}

/// Advances ghost `idx` by one controller tick.
///
/// Mode follows the player's power every tick; movement only happens when the
/// ghost's own cadence fires. Other ghosts are visible to the strategy in
/// their already-updated positions.
pub fn update_ghost(
    ghosts: &mut [Ghost],
    idx: usize,
    maze: &Maze,
    player: &Player,
    profile: &DifficultyProfile,
    rng: &mut impl Rng,
) {
    let ghost = &mut ghosts[idx];
    ghost.resolve_mode(player.is_powered());
    if !ghost.cadence.ready(profile.ghost_delay) {
        return;
    }

    let mode = ghost.mode;
    let next = match mode {
        GhostMode::Respawning => {
            ghost.respawn_ticks = ghost.respawn_ticks.saturating_sub(1);
            if ghost.respawn_ticks == 0 {
                ghost.reset();
                ghost.resolve_mode(player.is_powered());
                debug!(ghost = ghost.name, home = %ghost.home, "ghost respawned");
            }
            return;
        }
        GhostMode::Frightened => frightened_step(maze, ghost.pos, rng),
        GhostMode::Chase | GhostMode::Scatter => {
            let ctx = TargetContext {
                me: idx,
                maze,
                player,
                ghosts: &*ghosts,
                profile,
            };
            pursuit_step(&ctx, rng)
        }
    };

    if let Some(next) = next {
        ghosts[idx].pos = next;
    }
}

fn frightened_step(maze: &Maze, from: Pos, rng: &mut impl Rng) -> Option<Pos> {
    let choices = maze.open_neighbors(from);
    if choices.is_empty() {
        return None;
    }
    if !maze.pellets().is_empty() && rng.gen::<f64>() < FRIGHTENED_FORAGE_CHANCE {
        if let Some(step) = maze.nearest_pellet(from).and_then(|p| next_step(maze, from, p)) {
            return Some(step);
        }
    }
    choices.choose(rng).copied()
}

fn pursuit_step(ctx: &TargetContext<'_>, rng: &mut impl Rng) -> Option<Pos> {
    let ghost = &ctx.ghosts[ctx.me];
    let target = ghost.strategy.target(ctx, rng);
    let step = next_step(ctx.maze, ghost.pos, target);
    trace!(
        ghost = ghost.name,
        strategy = ghost.strategy.name(),
        target = %target,
        "ghost target chosen"
    );
    match step {
        Some(step) if rng.gen::<f64>() >= distraction_chance(ctx.profile) => Some(step),
        _ => wander(ctx.maze, ghost.pos, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::test_rng::{lucky, steady};

    fn room() -> Maze {
        Maze::from_rows(7, 5, &["1111111", "1     1", "1     1", "1     1", "1111111"])
    }

    fn ready_ghost(home: Pos, strategy: Strategy, profile: &DifficultyProfile) -> Ghost {
        let mut ghost = Ghost::new("G1", home, 0, strategy);
        ghost.cadence = Cadence::primed(profile.ghost_delay);
        ghost
    }

    #[test]
    fn mode_follows_power() {
        let mut ghost = Ghost::new("G1", Pos::new(1, 1), 0, Strategy::Chaser);
        ghost.toggle_scatter();
        assert_eq!(ghost.mode(), GhostMode::Scatter);
        ghost.resolve_mode(true);
        assert_eq!(ghost.mode(), GhostMode::Frightened);
        ghost.toggle_scatter();
        assert_eq!(ghost.mode(), GhostMode::Frightened);
        ghost.resolve_mode(false);
        assert_eq!(ghost.mode(), GhostMode::Chase);

        ghost.capture();
        ghost.resolve_mode(true);
        assert_eq!(ghost.mode(), GhostMode::Respawning);
        assert!(!ghost.is_alive());
    }

    #[test]
    fn chasing_ghost_steps_along_the_shortest_path() {
        let profile = Difficulty::Easy.profile();
        let maze = room();
        let player = Player::new(Pos::new(5, 3));
        let mut ghosts = vec![ready_ghost(Pos::new(1, 1), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        // Down is explored before Right.
        assert_eq!(ghosts[0].pos(), Pos::new(1, 2));
    }

    #[test]
    fn distracted_ghost_wanders_instead() {
        let profile = Difficulty::Easy.profile();
        let maze = room();
        let player = Player::new(Pos::new(1, 3));
        let mut ghosts = vec![ready_ghost(Pos::new(2, 2), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut lucky());
        // The path would go down; the distraction roll sends it to the first open neighbour.
        assert_eq!(ghosts[0].pos(), Pos::new(2, 1));
    }

    #[test]
    fn ghost_waits_for_its_cadence() {
        let profile = Difficulty::Hard.profile();
        let maze = room();
        let player = Player::new(Pos::new(5, 3));
        let mut ghosts = vec![Ghost::new("G1", Pos::new(1, 1), 0, Strategy::Chaser)];
        for _ in 0..profile.ghost_delay - 1 {
            update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
            assert_eq!(ghosts[0].pos(), Pos::new(1, 1));
        }
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        assert_ne!(ghosts[0].pos(), Pos::new(1, 1));
    }

    #[test]
    fn frightened_ghost_can_forage_toward_pellets() {
        let profile = Difficulty::Easy.profile();
        let maze = Maze::from_rows(7, 3, &["1111111", "1    .1", "1111111"]);
        let mut player = Player::new(Pos::new(1, 1));
        player.power_ticks = 50;
        let mut ghosts = vec![ready_ghost(Pos::new(3, 1), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut lucky());
        assert_eq!(ghosts[0].mode(), GhostMode::Frightened);
        assert_eq!(ghosts[0].pos(), Pos::new(4, 1));
    }

    #[test]
    fn frightened_ghost_otherwise_walks_randomly() {
        let profile = Difficulty::Easy.profile();
        let maze = Maze::from_rows(7, 3, &["1111111", "1    .1", "1111111"]);
        let mut player = Player::new(Pos::new(1, 1));
        player.power_ticks = 50;
        let mut ghosts = vec![ready_ghost(Pos::new(3, 1), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        // Forage roll fails; first open neighbour is to the left.
        assert_eq!(ghosts[0].pos(), Pos::new(2, 1));
    }

    #[test]
    fn sealed_pellet_sends_frightened_ghost_wandering() {
        let profile = Difficulty::Easy.profile();
        let maze = Maze::from_rows(7, 3, &["1111111", "1  1.11", "1111111"]);
        let mut player = Player::new(Pos::new(1, 1));
        player.power_ticks = 50;
        let mut ghosts = vec![ready_ghost(Pos::new(2, 1), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut lucky());
        // Forage roll succeeds but (4,1) is walled off; first open neighbour is left.
        assert_eq!(ghosts[0].mode(), GhostMode::Frightened);
        assert_eq!(ghosts[0].pos(), Pos::new(1, 1));
    }

    #[test]
    fn boxed_in_ghost_stays_put() {
        let profile = Difficulty::Easy.profile();
        let maze = Maze::from_rows(3, 3, &["111", "1 1", "111"]);
        let player = Player::new(Pos::new(1, 1));
        let mut ghosts = vec![ready_ghost(Pos::new(1, 1), Strategy::Predator, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut lucky());
        assert_eq!(ghosts[0].pos(), Pos::new(1, 1));
    }

    #[test]
    fn unreachable_target_falls_back_to_wandering() {
        let profile = Difficulty::Easy.profile();
        let maze = Maze::from_rows(7, 3, &["1111111", "1  1  1", "1111111"]);
        let player = Player::new(Pos::new(5, 1));
        let mut ghosts = vec![ready_ghost(Pos::new(2, 1), Strategy::Chaser, profile)];
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        assert_eq!(ghosts[0].pos(), Pos::new(1, 1));
    }

    #[test]
    fn captured_ghost_respawns_at_home_after_countdown() {
        let profile = Difficulty::Easy.profile();
        let maze = room();
        let player = Player::new(Pos::new(5, 3));
        let mut ghosts = vec![Ghost::new("G1", Pos::new(1, 1), 0, Strategy::Chaser)];
        ghosts[0].pos = Pos::new(4, 3);
        ghosts[0].capture();
        assert_eq!(ghosts[0].respawn_ticks(), RESPAWN_TICKS);

        let ticks = RESPAWN_TICKS * profile.ghost_delay;
        for _ in 0..ticks - 1 {
            update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        }
        assert_eq!(ghosts[0].mode(), GhostMode::Respawning);
        assert_eq!(ghosts[0].pos(), Pos::new(4, 3));
        update_ghost(&mut ghosts, 0, &maze, &player, profile, &mut steady());
        assert_eq!(ghosts[0].mode(), GhostMode::Chase);
        assert_eq!(ghosts[0].pos(), Pos::new(1, 1));
    }

    #[test]
    fn distraction_shrinks_with_aggressiveness() {
        let easy = distraction_chance(Difficulty::Easy.profile());
        let hard = distraction_chance(Difficulty::Hard.profile());
        assert!((easy - 0.175).abs() < 1e-9);
        assert!((hard - 0.10).abs() < 1e-9);
    }
}
