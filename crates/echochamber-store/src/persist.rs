//! Shared load/save helpers for the flat-file stores.
//!
//! Every store keeps its working set in memory and writes the whole file
//! back after each mutation (the files are small: one run state, one deck,
//! one capped leaderboard, one user list). Writes go through a temp file
//! in the same directory followed by a rename, so a crash mid-write never
//! leaves a half-written JSON file behind.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Read and parse a JSON file, or return `None` if it does not exist.
///
/// A missing file is the normal first-run case for every store; a present
/// but unparseable file is an error, not something to silently discard.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

/// Serialize `value` and atomically replace the file at `path`.
///
/// When `path` is `None` the store is ephemeral (in-memory only, used by
/// tests) and this is a no-op.
pub(crate) fn store_json<T: Serialize>(path: Option<&Path>, value: &T) -> Result<(), StoreError> {
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
