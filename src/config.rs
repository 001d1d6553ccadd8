//! Runtime configuration for the terminal game, read from the environment.

use std::path::PathBuf;

use tracing::Level;

pub const DEFAULT_SCORES_PATH: &str = "blockfall-scores.json";
pub const DEFAULT_PLAYER: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed seed for the piece stream; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub scores_path: PathBuf,
    pub player: String,
    /// File logging is enabled only when this is set.
    pub log_path: Option<PathBuf>,
    pub log_level: Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            player: DEFAULT_PLAYER.to_string(),
            log_path: None,
            log_level: Level::INFO,
        }
    }
}

impl AppConfig {
    /// Read `BLOCKFALL_*` variables, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let seed = non_empty("BLOCKFALL_SEED").and_then(|s| s.parse().ok());

        let scores_path = non_empty("BLOCKFALL_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.scores_path);

        let player = non_empty("BLOCKFALL_PLAYER")
            .or_else(|| non_empty("USER"))
            .unwrap_or(defaults.player);

        let log_path = non_empty("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let log_level = non_empty("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            seed,
            scores_path,
            player,
            log_path,
            log_level,
        }
    }
}
