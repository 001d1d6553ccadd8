//! Durable leaderboard stores.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::Leaderboard;

/// Where the frontend keeps its leaderboard between runs.
pub trait ScoreStore {
    fn load(&self) -> Result<Leaderboard>;
    fn save(&mut self, board: &Leaderboard) -> Result<()>;
}

/// Leaderboard persisted as a JSON file.
///
/// A missing file loads as an empty leaderboard.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is staged in before it replaces `path`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Leaderboard> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no leaderboard file yet");
                return Ok(Leaderboard::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading leaderboard {}", self.path.display()))
            }
        };

        let board: Leaderboard = serde_json::from_str(&text)
            .with_context(|| format!("parsing leaderboard {}", self.path.display()))?;
        // The file may have been edited by hand.
        Ok(Leaderboard::from_records(board.records().to_vec()))
    }

    fn save(&mut self, board: &Leaderboard) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating leaderboard directory {}", dir.display()))?;
        }

        let json = serde_json::to_string_pretty(board).context("encoding leaderboard")?;
        // Readers see either the old file or the new one, never a partial write.
        let staging = self.staging_path();
        fs::write(&staging, json)
            .with_context(|| format!("writing leaderboard {}", staging.display()))?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(e)
                .with_context(|| format!("replacing leaderboard {}", self.path.display()));
        }
        debug!(path = %self.path.display(), entries = board.len(), "leaderboard saved");
        Ok(())
    }
}

/// In-memory store, for tests and for running without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    board: Leaderboard,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Leaderboard> {
        Ok(self.board.clone())
    }

    fn save(&mut self, board: &Leaderboard) -> Result<()> {
        self.board = board.clone();
        Ok(())
    }
}
