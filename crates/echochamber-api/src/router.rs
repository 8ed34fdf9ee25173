//! Axum router construction for the EchoChamber API.
//!
//! Assembles the game, admin, and auth routes into a single [`Router`]
//! with CORS middleware enabled for the browser frontend.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{admin, auth, handlers};

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /api/game-state` -- current run state
/// - `POST /api/game-state` -- raw state override
/// - `POST /api/action` -- apply one moderation action
/// - `POST /api/reset` -- start a fresh run
/// - `GET /api/posts` -- full deck
/// - `POST /api/posts/create` -- add a deck entry
/// - `POST /api/posts/update` -- edit a deck entry
/// - `POST /api/posts/delete` -- remove a deck entry
/// - `GET /api/leaderboard` -- top completed runs
/// - `POST /api/auth/register` -- create an account
/// - `POST /api/auth/login` -- check credentials
/// - `GET /api/auth/check` -- session stub
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Game
        .route(
            "/api/game-state",
            get(handlers::get_game_state).post(handlers::put_game_state),
        )
        .route("/api/action", post(handlers::post_action))
        .route("/api/reset", post(handlers::post_reset))
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        // Deck admin
        .route("/api/posts", get(admin::list_posts))
        .route("/api/posts/create", post(admin::create_post))
        .route("/api/posts/update", post(admin::update_post))
        .route("/api/posts/delete", post(admin::delete_post))
        // Accounts
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/check", get(auth::check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
