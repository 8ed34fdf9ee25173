//! The leaderboard store.
//!
//! Completed runs are recorded as [`LeaderboardEntry`] values in
//! `leaderboard.json`, kept sorted by score descending and capped at a
//! configurable size. Ties keep insertion order (stable sort), so an
//! earlier run outranks a later one with the same score.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use echochamber_types::LeaderboardEntry;

use crate::error::StoreError;
use crate::persist::{load_json, store_json};

/// In-memory leaderboard with write-through persistence to
/// `leaderboard.json`.
#[derive(Debug)]
pub struct LeaderboardStore {
    path: Option<PathBuf>,
    cap: usize,
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl LeaderboardStore {
    /// Open the leaderboard at `path`, keeping at most `cap` entries.
    ///
    /// The loaded list is re-sorted and re-capped, so a hand-edited or
    /// pre-cap file is normalized on the next append.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] when
    /// the file exists but cannot be read or parsed.
    pub fn open(path: &Path, cap: usize) -> Result<Self, StoreError> {
        let mut entries: Vec<LeaderboardEntry> = load_json(path)?.unwrap_or_default();
        sort_and_cap(&mut entries, cap);
        tracing::info!(entries = entries.len(), path = %path.display(), "leaderboard loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            cap,
            entries: RwLock::new(entries),
        })
    }

    /// An in-memory leaderboard that never touches disk.
    #[must_use]
    pub fn ephemeral(cap: usize) -> Self {
        Self {
            path: None,
            cap,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record a completed run.
    ///
    /// The entry is inserted, the list re-sorted by score descending,
    /// and anything past the cap dropped. An entry below the cut simply
    /// disappears.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write-back fails.
    pub async fn append(&self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        tracing::info!(score = entry.score, ending = %entry.ending, "run recorded");
        entries.push(entry);
        sort_and_cap(&mut entries, self.cap);
        store_json(self.path.as_deref(), &*entries)?;
        Ok(())
    }

    /// The top `n` entries, highest score first.
    pub async fn top_n(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.entries.read().await.iter().take(n).cloned().collect()
    }

    /// Number of retained entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether no runs have been recorded.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Sort by score descending and drop everything past the cap.
fn sort_and_cap(entries: &mut Vec<LeaderboardEntry>, cap: usize) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(cap);
}
