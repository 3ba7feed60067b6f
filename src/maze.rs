use std::collections::BTreeSet;

use crate::components::{Dir, Pos};
use crate::level::{GRID_H, GRID_W};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Floor,
}

/// Walkability grid plus the collectibles still on the board.
///
/// Wall geometry is fixed once parsed. Pellets and power items only ever
/// leave the board through `consume_pellet` / `consume_power_item`; a new
/// level builds a new `Maze`.
#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    pellets: BTreeSet<Pos>,
    power: BTreeSet<Pos>,
}

impl Maze {
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Self {
        Self::from_rows(GRID_W, GRID_H, rows)
    }

    /// Parses one character per tile: `1` wall, `.` pellet, `o` power item.
    /// Anything else, including cells missing from short rows, is floor.
    /// Characters past `width`/`height` are dropped.
    pub fn from_rows<S: AsRef<str>>(width: usize, height: usize, rows: &[S]) -> Self {
        let mut grid = vec![vec![Tile::Floor; width]; height];
        let mut pellets = BTreeSet::new();
        let mut power = BTreeSet::new();

        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, ch) in row.as_ref().chars().take(width).enumerate() {
                let pos = Pos::new(x as i32, y as i32);
                match ch {
                    '1' => grid[y][x] = Tile::Wall,
                    '.' => {
                        pellets.insert(pos);
                    }
                    'o' => {
                        power.insert(pos);
                    }
                    _ => {}
                }
            }
        }

        Maze {
            width,
            height,
            grid,
            pellets,
            power,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        if !self.in_bounds(pos) {
            return true;
        }
        self.grid[pos.y as usize][pos.x as usize] == Tile::Wall
    }

    pub fn has_pellet(&self, pos: Pos) -> bool {
        self.pellets.contains(&pos)
    }

    pub fn has_power_item(&self, pos: Pos) -> bool {
        self.power.contains(&pos)
    }

    pub fn consume_pellet(&mut self, pos: Pos) -> bool {
        self.pellets.remove(&pos)
    }

    pub fn consume_power_item(&mut self, pos: Pos) -> bool {
        self.power.remove(&pos)
    }

    pub fn pellets(&self) -> &BTreeSet<Pos> {
        &self.pellets
    }

    pub fn power_items(&self) -> &BTreeSet<Pos> {
        &self.power
    }

    pub fn remaining_count(&self) -> usize {
        self.pellets.len() + self.power.len()
    }

    pub fn is_cleared(&self) -> bool {
        self.pellets.is_empty() && self.power.is_empty()
    }

    /// Non-wall neighbours in `Dir::ALL` order.
    pub fn open_neighbors(&self, pos: Pos) -> Vec<Pos> {
        Dir::ALL
            .iter()
            .map(|&dir| pos.step(dir))
            .filter(|&next| !self.is_wall(next))
            .collect()
    }

    pub fn wall_neighbors(&self, pos: Pos) -> usize {
        Dir::ALL
            .iter()
            .filter(|&&dir| self.is_wall(pos.step(dir)))
            .count()
    }

    /// Closest remaining pellet by Manhattan distance; the smallest `(x, y)`
    /// wins a tie.
    pub fn nearest_pellet(&self, from: Pos) -> Option<Pos> {
        self.pellets.iter().copied().min_by_key(|p| p.manhattan(from))
    }

    pub fn open_tiles(&self) -> Vec<Pos> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.grid[y][x] != Tile::Wall {
                    cells.push(Pos::new(x as i32, y as i32));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::MAZE_VARIANTS;

    fn small() -> Maze {
        Maze::from_rows(5, 4, &["11111", "1.o 1", "1x.", "11111"])
    }

    #[test]
    fn parses_walls_items_and_normalises_unknown_chars() {
        let maze = small();
        assert!(maze.is_wall(Pos::new(0, 0)));
        assert!(maze.has_pellet(Pos::new(1, 1)));
        assert!(maze.has_power_item(Pos::new(2, 1)));
        assert!(!maze.is_wall(Pos::new(3, 1)));
        // 'x' is unknown, so floor.
        assert!(!maze.is_wall(Pos::new(1, 2)));
        assert!(!maze.has_pellet(Pos::new(1, 2)));
        // Row 2 is short: the missing cells are floor.
        assert!(!maze.is_wall(Pos::new(3, 2)));
        assert!(!maze.is_wall(Pos::new(4, 2)));
        assert_eq!(maze.remaining_count(), 3);
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let maze = small();
        assert!(maze.is_wall(Pos::new(-1, 1)));
        assert!(maze.is_wall(Pos::new(5, 1)));
        assert!(maze.is_wall(Pos::new(1, 4)));
    }

    #[test]
    fn long_rows_and_extra_rows_are_truncated() {
        let maze = Maze::from_rows(3, 1, &["..1.", "..."]);
        assert_eq!(maze.pellets().len(), 2);
        assert!(maze.is_wall(Pos::new(2, 0)));
        assert!(maze.is_wall(Pos::new(3, 0)));
    }

    #[test]
    fn consumption_is_idempotent() {
        let mut maze = small();
        assert!(maze.consume_pellet(Pos::new(1, 1)));
        assert!(!maze.consume_pellet(Pos::new(1, 1)));
        assert!(!maze.consume_pellet(Pos::new(3, 1)));
        assert!(maze.consume_power_item(Pos::new(2, 1)));
        assert!(!maze.consume_power_item(Pos::new(2, 1)));
        assert_eq!(maze.remaining_count(), 1);
        assert!(!maze.is_cleared());
        assert!(maze.consume_pellet(Pos::new(2, 2)));
        assert!(maze.is_cleared());
    }

    #[test]
    fn neighbours_follow_canonical_order() {
        let maze = Maze::from_rows(3, 3, &["   ", "   ", "   "]);
        assert_eq!(
            maze.open_neighbors(Pos::new(1, 1)),
            vec![Pos::new(1, 0), Pos::new(1, 2), Pos::new(0, 1), Pos::new(2, 1)]
        );
        assert_eq!(maze.wall_neighbors(Pos::new(0, 0)), 2);
        assert_eq!(maze.wall_neighbors(Pos::new(1, 1)), 0);
    }

    #[test]
    fn nearest_pellet_breaks_ties_by_position() {
        let maze = Maze::from_rows(5, 1, &[". . ."]);
        assert_eq!(maze.nearest_pellet(Pos::new(1, 0)), Some(Pos::new(0, 0)));
        assert_eq!(maze.nearest_pellet(Pos::new(3, 0)), Some(Pos::new(2, 0)));
        let empty = Maze::from_rows(2, 1, &["  "]);
        assert_eq!(empty.nearest_pellet(Pos::new(0, 0)), None);
    }

    #[test]
    fn builtin_layouts_keep_items_off_walls() {
        for layout in MAZE_VARIANTS {
            let maze = Maze::from_layout(layout);
            assert_eq!(maze.width(), GRID_W);
            assert_eq!(maze.height(), GRID_H);
            assert!(maze.pellets().iter().all(|&p| !maze.is_wall(p)));
            assert!(maze.power_items().iter().all(|&p| !maze.is_wall(p)));
            assert!(!maze.is_cleared());
        }
    }
}
