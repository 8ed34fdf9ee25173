//! Account endpoint handlers.
//!
//! Registration and login against the flat-file user registry. There is
//! no session state: the frontend keeps the logged-in user client-side,
//! and `/api/auth/check` exists only so that page can keep calling it.
//! Passwords never appear in responses.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/auth/register` | Create an account |
//! | `POST` | `/api/auth/login` | Check credentials |
//! | `GET`  | `/api/auth/check` | Session stub, always unauthenticated |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/auth/register` and `POST /api/auth/login`.
#[derive(Debug, serde::Deserialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

// ---------------------------------------------------------------------------
// POST /api/auth/register -- create an account
// ---------------------------------------------------------------------------

/// Create an account.
///
/// Usernames are trimmed and must be unique and at least 3 characters;
/// passwords at least 4. A taken username is a 409, a too-short field a
/// 400.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .register(&credentials.username, &credentials.password, Utc::now())
        .await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "user": user.summary(),
    })))
}

// ---------------------------------------------------------------------------
// POST /api/auth/login -- check credentials
// ---------------------------------------------------------------------------

/// Check a username/password pair.
///
/// A wrong password and an unknown username both return the same 401,
/// so the endpoint does not leak which usernames exist.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .authenticate(&credentials.username, &credentials.password)
        .await
        .ok_or(ApiError::Unauthorized)?;
    tracing::info!(username = %user.username, "login");
    Ok(Json(serde_json::json!({
        "success": true,
        "user": user.summary(),
    })))
}

// ---------------------------------------------------------------------------
// GET /api/auth/check -- session stub
// ---------------------------------------------------------------------------

/// Report the (absent) session.
///
/// Always `authenticated: false`; kept for frontend compatibility.
#[allow(clippy::unused_async)] // axum handlers must be async
pub async fn check() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "authenticated": false,
    }))
}
