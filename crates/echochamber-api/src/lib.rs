//! HTTP API for the EchoChamber moderation game.
//!
//! Serves the player-facing game flow, the admin deck editor, the
//! leaderboard, and the account endpoints over one Axum router. All
//! state lives in the flat-file stores bundled into [`state::AppState`];
//! the transition engine itself is pure and lives in
//! [`echochamber_core::engine`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/game-state` | Current run state |
//! | `POST` | `/api/game-state` | Raw override of the run state |
//! | `POST` | `/api/action` | Apply one moderation action |
//! | `POST` | `/api/reset` | Start a fresh run |
//! | `GET`  | `/api/posts` | Full deck |
//! | `POST` | `/api/posts/create` | Add a deck entry |
//! | `POST` | `/api/posts/update` | Edit a deck entry |
//! | `POST` | `/api/posts/delete` | Remove a deck entry |
//! | `GET`  | `/api/leaderboard` | Top completed runs |
//! | `POST` | `/api/auth/register` | Create an account |
//! | `POST` | `/api/auth/login` | Check credentials |
//! | `GET`  | `/api/auth/check` | Session stub |
//!
//! # Modules
//!
//! - [`router`] -- Route table assembly with CORS + request tracing
//! - [`handlers`] -- Game flow handlers
//! - [`admin`] -- Deck CRUD handlers
//! - [`auth`] -- Account handlers
//! - [`state`] -- Shared [`state::AppState`]
//! - [`server`] -- Bind-and-serve lifecycle
//! - [`error`] -- [`error::ApiError`] with its `IntoResponse` mapping

pub mod admin;
pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
