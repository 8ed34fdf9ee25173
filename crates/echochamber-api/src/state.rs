//! Shared application state for the API server.
//!
//! [`AppState`] bundles the four flat-file stores and the leaderboard
//! display size. Wrapped in [`Arc`](std::sync::Arc) and injected via
//! Axum's `State` extractor; each store carries its own lock, so there
//! is no outer lock here.

use echochamber_store::{GameStore, LeaderboardStore, PostStore, UserStore};

/// Default number of entries the public leaderboard endpoint returns.
pub const DEFAULT_LEADERBOARD_TOP_N: usize = 10;

/// Shared state for the Axum application.
pub struct AppState {
    /// The post deck.
    pub posts: PostStore,
    /// The single active run.
    pub game: GameStore,
    /// Completed-run records.
    pub leaderboard: LeaderboardStore,
    /// Registered accounts.
    pub users: UserStore,
    /// How many entries `GET /api/leaderboard` returns.
    pub leaderboard_top_n: usize,
}

impl AppState {
    /// Bundle the stores with the default display size.
    #[must_use]
    pub const fn new(
        posts: PostStore,
        game: GameStore,
        leaderboard: LeaderboardStore,
        users: UserStore,
    ) -> Self {
        Self {
            posts,
            game,
            leaderboard,
            users,
            leaderboard_top_n: DEFAULT_LEADERBOARD_TOP_N,
        }
    }

    /// Override the leaderboard display size.
    #[must_use]
    pub const fn with_leaderboard_top_n(mut self, top_n: usize) -> Self {
        self.leaderboard_top_n = top_n;
        self
    }
}
