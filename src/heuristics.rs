//! Target selection for ghosts in chase and scatter mode.
//!
//! Each [`Strategy`] maps the current world to a destination tile. The
//! result is always a walkable in-bounds tile: anything else collapses to
//! the player's tile.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::Pos;
use crate::difficulty::DifficultyProfile;
use crate::ghost::Ghost;
use crate::maze::Maze;
use crate::player::Player;

const FORAGE_CHANCE: f64 = 0.6;
const FORAGER_NOTICE_RANGE: i32 = 4;
const FORAGER_CHASE_CHANCE: f64 = 0.8;
const WALL_HUGGER_RADIUS: i32 = 6;
const PREDATOR_RADIUS: i32 = 5;
const AMBUSH_BASE_STEPS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Heads straight for the player.
    Chaser,
    /// Mostly eats pellets; chases only when the player is close.
    Forager,
    /// Lurks on the most enclosed tile near the player.
    WallHugger,
    /// Aims ahead of the player along its heading.
    Ambusher,
    /// Mirrors the player through another ghost to cut off the escape.
    Confuser,
    /// Trades closeness for narrow corridors around the player.
    Predator,
}

/// Everything a strategy may look at. `me` indexes into `ghosts`.
pub struct TargetContext<'a> {
    pub me: usize,
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub ghosts: &'a [Ghost],
    pub profile: &'a DifficultyProfile,
}

impl TargetContext<'_> {
    fn my_pos(&self) -> Pos {
        self.ghosts[self.me].pos()
    }
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Chaser => "chaser",
            Strategy::Forager => "forager",
            Strategy::WallHugger => "wall-hugger",
            Strategy::Ambusher => "ambusher",
            Strategy::Confuser => "confuser",
            Strategy::Predator => "predator",
        }
    }

    pub fn target(self, ctx: &TargetContext<'_>, rng: &mut impl Rng) -> Pos {
        let player = ctx.player.pos();
        let target = match self {
            Strategy::Chaser => Some(player),
            Strategy::Forager => forager(ctx, rng),
            Strategy::WallHugger => wall_hugger(ctx),
            Strategy::Ambusher => ambusher(ctx),
            Strategy::Confuser => confuser(ctx),
            Strategy::Predator => predator(ctx),
        };
        match target {
            Some(t) if !ctx.maze.is_wall(t) => t,
            _ => player,
        }
    }
}

fn forager(ctx: &TargetContext<'_>, rng: &mut impl Rng) -> Option<Pos> {
    let me = ctx.my_pos();
    let player = ctx.player.pos();
    if !ctx.maze.pellets().is_empty() && rng.gen::<f64>() < FORAGE_CHANCE {
        return ctx.maze.nearest_pellet(me);
    }
    if me.manhattan(player) <= FORAGER_NOTICE_RANGE && rng.gen::<f64>() < FORAGER_CHASE_CHANCE {
        return Some(player);
    }
    let w = ctx.maze.width() as i32;
    let h = ctx.maze.height() as i32;
    let corners = [
        Pos::new(1, 1),
        Pos::new(w - 2, 1),
        Pos::new(1, h - 2),
        Pos::new(w - 2, h - 2),
    ];
    corners.choose(rng).copied()
}

fn wall_hugger(ctx: &TargetContext<'_>) -> Option<Pos> {
    let center = ctx.player.pos();
    let mut best = None;
    let mut best_walls = 0;
    for pos in window(center, WALL_HUGGER_RADIUS) {
        if ctx.maze.is_wall(pos) {
            continue;
        }
        let walls = ctx.maze.wall_neighbors(pos);
        if best.is_none() || walls > best_walls {
            best = Some(pos);
            best_walls = walls;
        }
    }
    best
}

fn ambusher(ctx: &TargetContext<'_>) -> Option<Pos> {
    let dir = ctx.player.facing()?;
    let steps = AMBUSH_BASE_STEPS + (2.0 * ctx.profile.aggressiveness).round() as i32;
    Some(ctx.player.pos().offset(dir, steps))
}

fn confuser(ctx: &TargetContext<'_>) -> Option<Pos> {
    let leader = ctx
        .ghosts
        .iter()
        .enumerate()
        .find(|(idx, g)| *idx != ctx.me && g.is_alive())
        .map(|(_, g)| g.pos())?;
    let player = ctx.player.pos();
    Some(Pos::new(2 * leader.x - player.x, 2 * leader.y - player.y))
}

fn predator(ctx: &TargetContext<'_>) -> Option<Pos> {
    let me = ctx.my_pos();
    let mut best = None;
    let mut best_score = i32::MAX;
    for pos in window(ctx.player.pos(), PREDATOR_RADIUS) {
        if ctx.maze.is_wall(pos) {
            continue;
        }
        // distance - 1.5 * corridor, doubled to stay in integers. The half
        // point is kept: a dead end one step away beats standing still.
        let corridor = ctx.maze.wall_neighbors(pos) as i32;
        let score = 2 * me.manhattan(pos) - 3 * corridor;
        if score < best_score {
            best_score = score;
            best = Some(pos);
        }
    }
    best
}

/// Square window of side `2 * radius + 1` around `center`, row-major.
fn window(center: Pos, radius: i32) -> impl Iterator<Item = Pos> {
    (-radius..=radius)
        .flat_map(move |dy| (-radius..=radius).map(move |dx| Pos::new(center.x + dx, center.y + dy)))
}
