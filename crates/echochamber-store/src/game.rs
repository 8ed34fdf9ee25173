//! The single-run game state store.
//!
//! There is exactly one active run at a time, stored as one JSON object
//! in `game-state.json`. Reads hand out clones; mutations go through
//! [`GameStore::begin_update`], which holds the write lock across the
//! whole read-compute-persist cycle so two concurrent actions can never
//! interleave and double-apply.
//!
//! Missing or damaged metric fields are repaired to their defaults when
//! the file is read (the type layer's deserializers do the patching);
//! the repaired form is written back on the next mutation.

use std::path::{Path, PathBuf};

use tokio::sync::{RwLock, RwLockWriteGuard};

use echochamber_types::GameState;

use crate::error::StoreError;
use crate::persist::{load_json, store_json};

/// In-memory run state with write-through persistence to
/// `game-state.json`.
#[derive(Debug)]
pub struct GameStore {
    path: Option<PathBuf>,
    state: RwLock<GameState>,
}

impl GameStore {
    /// Open the run state at `path`, starting a fresh run if the file is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] when
    /// the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let state: GameState = load_json(path)?.unwrap_or_default();
        tracing::info!(
            status = ?state.game_status,
            cursor = state.current_post_index,
            path = %path.display(),
            "run state loaded"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            state: RwLock::new(state),
        })
    }

    /// An in-memory store that never touches disk, starting a fresh run.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            state: RwLock::new(GameState::new_run()),
        }
    }

    /// A snapshot of the current run state.
    pub async fn load(&self) -> GameState {
        self.state.read().await.clone()
    }

    /// Begin an exclusive read-compute-persist cycle.
    ///
    /// The returned guard holds the write lock; read the current state
    /// through it, compute the successor, then [`GameUpdate::commit`].
    /// Dropping the guard without committing leaves the state untouched.
    pub async fn begin_update(&self) -> GameUpdate<'_> {
        GameUpdate {
            guard: self.state.write().await,
            path: self.path.as_deref(),
        }
    }

    /// Replace the run state wholesale and persist it.
    ///
    /// This is the admin override path; the action endpoint goes
    /// through [`Self::begin_update`] instead.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write-back fails.
    pub async fn store(&self, state: GameState) -> Result<(), StoreError> {
        self.begin_update().await.commit(state)
    }

    /// Replace the run with a fresh one and persist it.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write-back fails.
    pub async fn reset(&self) -> Result<GameState, StoreError> {
        let update = self.begin_update().await;
        let fresh = GameState::new_run();
        update.commit(fresh.clone())?;
        tracing::info!("run state reset");
        Ok(fresh)
    }
}

/// An exclusive handle on the run state, held for the duration of one
/// state transition.
#[derive(Debug)]
pub struct GameUpdate<'a> {
    guard: RwLockWriteGuard<'a, GameState>,
    path: Option<&'a Path>,
}

impl GameUpdate<'_> {
    /// The state the transition starts from.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.guard
    }

    /// Persist `next` and install it as the current state.
    ///
    /// The file write happens before the in-memory swap, so a failed
    /// write leaves the previous state in effect.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write-back fails.
    pub fn commit(mut self, next: GameState) -> Result<(), StoreError> {
        store_json(self.path, &next)?;
        *self.guard = next;
        Ok(())
    }
}
