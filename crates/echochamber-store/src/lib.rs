//! Flat-file persistence for the EchoChamber moderation game.
//!
//! All durable data is plain JSON under one data directory, matching the
//! original deployment format byte-for-byte so existing files load
//! unchanged:
//!
//! ```text
//! data/
//!   posts.json        the post deck               (PostStore)
//!   game-state.json   the single active run       (GameStore)
//!   leaderboard.json  completed runs, capped      (LeaderboardStore)
//!   users.json        registered accounts         (UserStore)
//! ```
//!
//! Each store keeps its working set in memory behind a [`tokio`] `RwLock`
//! and writes the whole file back after every mutation (temp file +
//! rename, so readers never see a torn file). Every store also has an
//! ephemeral constructor that skips disk entirely, which is what the API
//! tests use.
//!
//! # Modules
//!
//! - [`posts`] -- Deck CRUD with id assignment and admin validation
//! - [`game`] -- The single run state, with an exclusive update guard
//! - [`leaderboard`] -- Completed-run records, sorted and capped
//! - [`users`] -- Registration and plaintext credential checks
//! - [`error`] -- Shared error types

pub mod error;
pub mod game;
pub mod leaderboard;
mod persist;
pub mod posts;
pub mod users;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use game::{GameStore, GameUpdate};
pub use leaderboard::LeaderboardStore;
pub use posts::{PostDraft, PostStore, PostUpdate};
pub use users::UserStore;
