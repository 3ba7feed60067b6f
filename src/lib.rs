//! Pac-Man simulation core with heuristic ghosts.
//!
//! The crate has no notion of rendering or input devices: a front end feeds
//! intents and commands into [`Game`], calls [`Game::tick`] once per frame and
//! draws from [`Game::snapshot`].

pub mod components;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod ghost;
pub mod heuristics;
pub mod level;
pub mod maze;
pub mod pathfinding;
pub mod player;

pub use components::{Dir, Pos};
pub use config::{ConfigError, GameConfig};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use game::{Game, Snapshot};
pub use ghost::{Ghost, GhostMode};
pub use heuristics::Strategy;
pub use maze::Maze;
pub use player::Player;
