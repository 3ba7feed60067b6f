use std::fmt;

/// A tile coordinate. Signed so that extrapolated targets can fall outside
/// the grid and be rejected by bounds checks instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Dir) -> Pos {
        self.offset(dir, 1)
    }

    pub fn offset(self, dir: Dir, tiles: i32) -> Pos {
        let (dx, dy) = dir.delta();
        Pos {
            x: self.x + dx * tiles,
            y: self.y + dy * tiles,
        }
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Neighbour visit order. Pathfinding tie-breaks depend on it.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Per-agent movement rate limiter: an agent acts once every `delay` ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cadence {
    ticks: u32,
}

impl Cadence {
    pub fn ready(&mut self, delay: u32) -> bool {
        self.ticks += 1;
        if self.ticks < delay {
            return false;
        }
        self.ticks = 0;
        true
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    #[cfg(test)]
    pub(crate) fn primed(delay: u32) -> Self {
        Self {
            ticks: delay.saturating_sub(1),
        }
    }
}
