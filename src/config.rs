//! Runtime settings for the terminal front end, read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::difficulty::{Difficulty, UnknownDifficulty};

const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 120;
const DEFAULT_SPLASH_TICKS: u32 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got `{value}`")]
    NotPositive { key: &'static str, value: String },

    #[error("{key} is not a valid number: `{value}`")]
    NotANumber { key: &'static str, value: String },

    #[error("PACMAN_DIFFICULTY: {0}")]
    Difficulty(#[from] UnknownDifficulty),
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_ms: u64,
    pub render_fps: u64,
    /// `None` seeds from the clock.
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    /// Ticks the board is shown before the simulation starts.
    pub splash_ticks: u32,
    pub log_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            render_fps: DEFAULT_RENDER_FPS,
            seed: None,
            difficulty: Difficulty::Easy,
            splash_ticks: DEFAULT_SPLASH_TICKS,
            log_dir: env::temp_dir(),
        }
    }
}

impl GameConfig {
    /// Environment variables:
    /// - `PACMAN_TICK_MS` - simulation tick length (default: 16)
    /// - `PACMAN_FPS` - render frame cap (default: 120)
    /// - `PACMAN_SEED` - RNG seed (default: clock)
    /// - `PACMAN_DIFFICULTY` - `easy` or `hard` (default: easy)
    /// - `PACMAN_SPLASH_TICKS` - ticks before play starts (default: 120)
    /// - `PACMAN_LOG_DIR` - where `pacman.log` goes (default: temp dir)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("PACMAN_TICK_MS") {
            config.tick_ms = parse_positive("PACMAN_TICK_MS", &v)?;
        }
        if let Some(v) = lookup("PACMAN_FPS") {
            config.render_fps = parse_positive("PACMAN_FPS", &v)?;
        }
        if let Some(v) = lookup("PACMAN_SEED") {
            config.seed = Some(parse_number("PACMAN_SEED", &v)?);
        }
        if let Some(v) = lookup("PACMAN_DIFFICULTY") {
            config.difficulty = v.parse()?;
        }
        if let Some(v) = lookup("PACMAN_SPLASH_TICKS") {
            config.splash_ticks = parse_number("PACMAN_SPLASH_TICKS", &v)?;
        }
        if let Some(v) = lookup("PACMAN_LOG_DIR") {
            config.log_dir = PathBuf::from(v);
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: value.to_string(),
    })
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match parse_number::<u64>(key, value)? {
        0 => Err(ConfigError::NotPositive {
            key,
            value: value.to_string(),
        }),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = GameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(config.render_fps, DEFAULT_RENDER_FPS);
        assert_eq!(config.seed, None);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.splash_ticks, DEFAULT_SPLASH_TICKS);
    }

    #[test]
    fn reads_every_variable() {
        let config = GameConfig::from_lookup(lookup(&[
            ("PACMAN_TICK_MS", "20"),
            ("PACMAN_FPS", "30"),
            ("PACMAN_SEED", "42"),
            ("PACMAN_DIFFICULTY", "hard"),
            ("PACMAN_SPLASH_TICKS", "0"),
            ("PACMAN_LOG_DIR", "/var/log/pacman"),
        ]))
        .unwrap();
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.render_fps, 30);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.splash_ticks, 0);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/pacman"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_lookup(lookup(&[("PACMAN_TICK_MS", "0")])),
            Err(ConfigError::NotPositive { key: "PACMAN_TICK_MS", .. })
        ));
        assert!(matches!(
            GameConfig::from_lookup(lookup(&[("PACMAN_SEED", "abc")])),
            Err(ConfigError::NotANumber { key: "PACMAN_SEED", .. })
        ));
        assert!(matches!(
            GameConfig::from_lookup(lookup(&[("PACMAN_DIFFICULTY", "insane")])),
            Err(ConfigError::Difficulty(_))
        ));
    }
}
