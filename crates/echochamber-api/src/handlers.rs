//! Game endpoint handlers.
//!
//! The player-facing flow: read the run state, submit an action, reset,
//! and read the leaderboard. Admin deck management lives in
//! [`crate::admin`]; account endpoints in [`crate::auth`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/game-state` | Current run state |
//! | `POST` | `/api/game-state` | Raw override of the run state |
//! | `POST` | `/api/action` | Apply one moderation action |
//! | `POST` | `/api/reset` | Start a fresh run |
//! | `GET`  | `/api/leaderboard` | Top completed runs |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use echochamber_core::engine::apply_action;
use echochamber_types::{GameState, ModerationAction};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/action`.
///
/// `action` is a strict enum: anything other than `approve`, `warn`, or
/// `delete` is rejected at deserialization with a 422, never coerced to
/// a default action.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// The deck entry being moderated.
    pub post_id: u64,
    /// The chosen moderation action.
    pub action: ModerationAction,
}

// ---------------------------------------------------------------------------
// GET /api/game-state -- current run state
// ---------------------------------------------------------------------------

/// Return the current run state.
///
/// Missing or damaged metric fields were already repaired to their
/// defaults when the state file was loaded.
pub async fn get_game_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game_state = state.game.load().await;
    Json(serde_json::json!({
        "success": true,
        "gameState": game_state,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/game-state -- raw override
// ---------------------------------------------------------------------------

/// Replace the run state wholesale.
///
/// The body is a full state blob; absent fields take their defaults
/// (metrics 50, `playing`, empty histories), so a partial blob is
/// repaired rather than rejected.
pub async fn put_game_state(
    State(state): State<Arc<AppState>>,
    Json(game_state): Json<GameState>,
) -> Result<impl IntoResponse, ApiError> {
    state.game.store(game_state.clone()).await?;
    tracing::info!(cursor = game_state.current_post_index, "run state overridden");
    Ok(Json(serde_json::json!({
        "success": true,
        "gameState": game_state,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/action -- apply one moderation action
// ---------------------------------------------------------------------------

/// Apply a moderation action to the current run.
///
/// Holds the run state's write lock across the whole read-compute-persist
/// cycle, so two concurrent submissions serialize instead of
/// double-applying. On the transition that ends the run, the leaderboard
/// entry is recorded before the response is built.
pub async fn post_action(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let update = state.game.begin_update().await;
    let post = state.posts.get(request.post_id).await?;
    let deck_len = state.posts.len().await;

    let transition = apply_action(
        update.state(),
        &post,
        request.action,
        deck_len,
        Utc::now(),
    )?;

    update.commit(transition.state.clone())?;

    if let Some(entry) = transition.completed {
        state.leaderboard.append(entry).await?;
    }

    tracing::info!(
        post_id = request.post_id,
        action = request.action.as_str(),
        cursor = transition.state.current_post_index,
        ended = transition.state.game_status.is_ended(),
        "action applied"
    );

    let ending = transition.state.endings.last().cloned();
    Ok(Json(serde_json::json!({
        "success": true,
        "gameState": transition.state,
        "ending": ending,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/reset -- start a fresh run
// ---------------------------------------------------------------------------

/// Discard the current run and start a fresh one.
pub async fn post_reset(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let fresh = state.game.reset().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "gameState": fresh,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/leaderboard -- top completed runs
// ---------------------------------------------------------------------------

/// Return the top completed runs, highest score first.
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = state.leaderboard.top_n(state.leaderboard_top_n).await;
    Json(serde_json::json!({
        "success": true,
        "leaderboard": entries,
    }))
}
