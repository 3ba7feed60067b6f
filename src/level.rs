//! Built-in maze layouts and the fixed spawn tiles that go with them.
//!
//! One character per tile: `1` wall, `.` pellet, `o` power item, anything
//! else floor. Rows longer than `GRID_W` are cut by the parser, which is why
//! a few rows of the second variant carry a trailing pellet that never
//! reaches the board.

use crate::components::Pos;

pub const GRID_W: usize = 29;
pub const GRID_H: usize = 31;

pub const PLAYER_SPAWN: Pos = Pos::new(14, 23);
pub const GHOST_HOMES: [Pos; 3] = [Pos::new(13, 11), Pos::new(14, 11), Pos::new(12, 13)];
pub const GHOST_NAMES: [&str; 3] = ["G1", "G2", "G3"];

const MAZE_1: [&str; GRID_H] = [
    "11111111111111111111111111111",
    "1...........................1",
    "1.111.11111.11.11111.111.11.1",
    "1o111.11111.11.11111.111.11.1",
    "1.111.11111.11.11111.111.11.1",
    "1...........................1",
    "1.111.11.1111111111.11.1111.1",
    "1.111.11.1111111111.11.1111.1",
    "1......1.....11.....1.......1",
    "111111.11111 11 11111.1111111",
    "     1.11111 11 11111.1      ",
    "     1.11          11.1      ",
    "     1.11 111--111 11.1      ",
    "111111.11 1      1 11.1111111",
    "      .   1      1   .       ",
    "111111.11 1      1 11.1111111",
    "     1.11 11111111 11.1      ",
    "     1.11          11.1      ",
    "     1.11 11111111 11.1      ",
    "111111.11 11111111 11.1111111",
    "1...........................1",
    "1.111.11111111.11111.111.11.1",
    "1.o...11111111.11111.11..o..1",
    "1111.11....          11.11111",
    "1.......1...................1",
    "1.11111111.11.11.1111111111.1",
    "1.11111111.11.11.1111111111.1",
    "1...........................1",
    "11111111111111111111111111111",
    "11111111111111111111111111111",
    "11111111111111111111111111111",
];

const MAZE_2: [&str; GRID_H] = [
    "11111111111111111111111111111",
    "1..............11............1",
    "1.111111111111.11.1111111111.1",
    "1.111111111111.11.1111111111.1",
    "1.111111111111.11.1111111111.1",
    "1............................1",
    "1.111.11.111111111111.11.111.1",
    "1.111.11.111111111111.11.111.1",
    "1......1.....11..............1",
    "111111.11111 11 11111.1111111",
    "     1.11111 11 11111.1      ",
    "     1.11          11.1      ",
    "     1.11 111--111 11.1      ",
    "111111.11 1      1 11.1111111",
    "      .   1      1   .       ",
    "111111.11 1      1 11.1111111",
    "     1.11 11111111 11.1      ",
    "     1.11          11.1      ",
    "     1.11 11111111 11.1      ",
    "111111.11 11111111 11.1111111",
    "1...............o...........1",
    "1.111111111111.11111.111111.1",
    "1.o........................o1",
    "111111111111          1111111",
    "1...........................1",
    "1.111111111.11.11.111111111.1",
    "1.111111111.11.11.111111111.1",
    "1...........................1",
    "11111111111111111111111111111",
    "11111111111111111111111111111",
    "11111111111111111111111111111",
];

pub const MAZE_VARIANTS: [&[&str]; 2] = [&MAZE_1, &MAZE_2];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    #[test]
    fn spawn_tiles_are_open_in_every_variant() {
        for layout in MAZE_VARIANTS {
            let maze = Maze::from_layout(layout);
            assert!(!maze.is_wall(PLAYER_SPAWN));
            for home in GHOST_HOMES {
                assert!(!maze.is_wall(home), "ghost home {home} is a wall");
            }
        }
    }
}
