//! Leaderboard bookkeeping for a running frontend.

use tracing::{info, warn};

use crate::store::ScoreStore;
use crate::{Leaderboard, ScoreRecord};

/// The loaded leaderboard, the store it came from and the player's name.
///
/// If the initial load fails, play continues against an empty board but
/// nothing is written back, so the unreadable file is left for the player to
/// repair instead of being replaced by a one-entry leaderboard.
#[derive(Debug)]
pub struct ScoreKeeper<S> {
    store: S,
    leaderboard: Leaderboard,
    last_rank: Option<usize>,
    player: String,
    persist: bool,
}

impl<S: ScoreStore> ScoreKeeper<S> {
    pub fn open(store: S, player: impl Into<String>) -> Self {
        let (leaderboard, persist) = match store.load() {
            Ok(board) => (board, true),
            Err(e) => {
                warn!(
                    error = %format!("{e:#}"),
                    "leaderboard unreadable, scores from this run will not be saved"
                );
                (Leaderboard::new(), false)
            }
        };
        Self {
            store,
            leaderboard,
            last_rank: None,
            player: player.into(),
            persist,
        }
    }

    /// Insert a finished game and save if it ranked.
    ///
    /// Returns the 0-based rank. Save errors are logged, not returned.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        self.last_rank = self
            .leaderboard
            .insert(ScoreRecord::new(self.player.as_str(), score));
        let Some(rank) = self.last_rank else {
            info!(score, "score did not make the leaderboard");
            return None;
        };
        info!(score, rank = rank + 1, "new leaderboard entry");
        if self.persist {
            if let Err(e) = self.store.save(&self.leaderboard) {
                warn!(error = %format!("{e:#}"), "failed to save leaderboard");
            }
        }
        Some(rank)
    }

    /// Forget the highlighted rank when a new game starts.
    pub fn clear_last_rank(&mut self) {
        self.last_rank = None;
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    /// Whether records are written back to the store
    pub fn persists(&self) -> bool {
        self.persist
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
