//! The user registry store.
//!
//! Accounts live in `users.json`. Registration enforces the original
//! rules: usernames are trimmed, must be at least 3 characters and
//! unique; passwords must be at least 4 characters. Passwords are stored
//! and compared in plaintext because this login is deliberately not a
//! security boundary (see [`echochamber_types::User`]).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use echochamber_types::User;

use crate::error::StoreError;
use crate::persist::{load_json, store_json};

/// Minimum username length after trimming.
const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length.
const MIN_PASSWORD_LEN: usize = 4;

/// In-memory user registry with write-through persistence to
/// `users.json`.
#[derive(Debug)]
pub struct UserStore {
    path: Option<PathBuf>,
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Open the registry at `path`, starting empty if the file is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] when
    /// the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let users: Vec<User> = load_json(path)?.unwrap_or_default();
        tracing::info!(users = users.len(), path = %path.display(), "user registry loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            users: RwLock::new(users),
        })
    }

    /// An in-memory registry that never touches disk.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            users: RwLock::new(Vec::new()),
        }
    }

    /// Create an account.
    ///
    /// The username is trimmed before every check, so `" abc "` and
    /// `"abc"` are the same account. Character counts use `chars()`, so
    /// a 3-character Korean username is valid.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when the username or password
    /// is too short, [`StoreError::Conflict`] when the username is
    /// taken, or a persistence error if the write-back fails.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<User, StoreError> {
        let username = username.trim();
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(StoreError::Validation(format!(
                "username must be at least {MIN_USERNAME_LEN} characters"
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(StoreError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!(
                "username already taken: {username}"
            )));
        }

        let id = users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let user = User {
            id,
            username: username.to_owned(),
            password: password.to_owned(),
            created_at: now,
        };
        users.push(user.clone());
        store_json(self.path.as_deref(), &*users)?;
        tracing::info!(id, username, "user registered");
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// Returns the matching account, or `None` when either the username
    /// is unknown or the password is wrong (callers must not distinguish
    /// the two in their responses).
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let username = username.trim();
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
    }

    /// Look up an account by username.
    pub async fn find(&self, username: &str) -> Option<User> {
        let username = username.trim();
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Number of registered accounts.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no accounts exist.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
