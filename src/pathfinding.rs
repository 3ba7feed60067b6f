use std::collections::VecDeque;

use crate::components::{Dir, Pos};
use crate::maze::Maze;

/// First step of a shortest path from `start` to `goal`.
///
/// Returns `Some(start)` when already there and `None` when `goal` cannot be
/// reached. Among several shortest paths the one discovered first while
/// visiting neighbours in `Dir::ALL` order wins, so the result is stable for
/// a given maze.
pub fn next_step(maze: &Maze, start: Pos, goal: Pos) -> Option<Pos> {
    if start == goal {
        return Some(start);
    }
    if maze.is_wall(goal) || !maze.in_bounds(start) {
        return None;
    }

    let width = maze.width();
    let index = |p: Pos| p.y as usize * width + p.x as usize;
    let mut prev: Vec<Option<Pos>> = vec![None; width * maze.height()];
    let mut seen = vec![false; width * maze.height()];
    let mut q = VecDeque::new();
    seen[index(start)] = true;
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        if pos == goal {
            break;
        }
        for dir in Dir::ALL {
            let next = pos.step(dir);
            if maze.is_wall(next) || seen[index(next)] {
                continue;
            }
            seen[index(next)] = true;
            prev[index(next)] = Some(pos);
            q.push_back(next);
        }
    }

    if !seen[index(goal)] {
        return None;
    }
    let mut cur = goal;
    while let Some(p) = prev[index(cur)] {
        if p == start {
            return Some(cur);
        }
        cur = p;
    }
    None
}

/// BFS distance from `origin` to every tile, `-1` where unreachable.
pub fn distance_map(maze: &Maze, origin: Pos) -> Vec<Vec<i32>> {
    let mut dist = vec![vec![-1; maze.width()]; maze.height()];
    if maze.is_wall(origin) {
        return dist;
    }
    let mut q = VecDeque::new();
    dist[origin.y as usize][origin.x as usize] = 0;
    q.push_back(origin);

    while let Some(pos) = q.pop_front() {
        let base = dist[pos.y as usize][pos.x as usize];
        for next in maze.open_neighbors(pos) {
            if dist[next.y as usize][next.x as usize] == -1 {
                dist[next.y as usize][next.x as usize] = base + 1;
                q.push_back(next);
            }
        }
    }
    dist
}
