//! Admin deck management handlers.
//!
//! The original admin page drives these with POST bodies (ids in the
//! body, not the path), so the routes keep that shape instead of the
//! usual REST verbs.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/posts` | Full deck in order |
//! | `POST` | `/api/posts/create` | Add a deck entry |
//! | `POST` | `/api/posts/update` | Edit a deck entry |
//! | `POST` | `/api/posts/delete` | Remove a deck entry |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use echochamber_store::{PostDraft, PostUpdate};

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /api/posts/update`: the target id plus the changed
/// fields.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateRequest {
    /// The post to edit.
    pub id: u64,
    /// The fields to change; absent fields keep their current value.
    #[serde(flatten)]
    pub update: PostUpdate,
}

/// Body of `POST /api/posts/delete`.
#[derive(Debug, serde::Deserialize)]
pub struct DeleteRequest {
    /// The post to remove.
    pub id: u64,
}

// ---------------------------------------------------------------------------
// GET /api/posts -- full deck
// ---------------------------------------------------------------------------

/// Return the full deck in order.
///
/// Legacy scalar impact fields were normalized to triples when the deck
/// file was loaded, so clients only ever see the canonical form.
pub async fn list_posts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state.posts.list().await;
    Json(serde_json::json!({
        "success": true,
        "posts": posts,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/posts/create -- add a deck entry
// ---------------------------------------------------------------------------

/// Add a new post to the end of the deck.
///
/// Impact fields must be 3-element numeric arrays; the legacy scalar
/// shorthand is not accepted here. Blank text fields are rejected with
/// a 400.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<PostDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.create(draft).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "post": post,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/posts/update -- edit a deck entry
// ---------------------------------------------------------------------------

/// Apply a partial edit to an existing post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.update(request.id, request.update).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "post": post,
    })))
}

// ---------------------------------------------------------------------------
// POST /api/posts/delete -- remove a deck entry
// ---------------------------------------------------------------------------

/// Remove a post from the deck.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.delete(request.id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
    })))
}
