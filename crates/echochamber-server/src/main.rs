//! EchoChamber server binary.
//!
//! Wires the configuration, the flat-file stores, and the HTTP API
//! together and serves until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `echochamber-config.yaml`
//! 3. Open the four stores from the data directory
//! 4. Build the shared application state and router
//! 5. Serve

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use echochamber_api::server::{ServerConfig, start_server};
use echochamber_api::state::AppState;
use echochamber_core::config::AppConfig;
use echochamber_store::{GameStore, LeaderboardStore, PostStore, UserStore};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading, store opening, or the
/// server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("echochamber-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        data_dir = %config.data.dir.display(),
        leaderboard_cap = config.game.leaderboard_cap,
        "Configuration loaded"
    );

    // 3. Open the stores.
    let posts = PostStore::open(&config.data.posts_path())?;
    let game = GameStore::open(&config.data.game_state_path())?;
    let leaderboard = LeaderboardStore::open(
        &config.data.leaderboard_path(),
        config.game.leaderboard_cap,
    )?;
    let users = UserStore::open(&config.data.users_path())?;

    if posts.is_empty().await {
        tracing::warn!(
            path = %config.data.posts_path().display(),
            "post deck is empty, the game cannot be played until posts exist"
        );
    }

    // 4. Build the shared state and server config.
    let state = Arc::new(
        AppState::new(posts, game, leaderboard, users)
            .with_leaderboard_top_n(config.game.leaderboard_top_n),
    );
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    // 5. Serve until terminated.
    start_server(&server_config, state).await?;

    info!("echochamber-server shutdown complete");
    Ok(())
}

/// Load the configuration from `echochamber-config.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// falls back to defaults (plus env overrides) when it does not exist.
fn load_config() -> Result<AppConfig, echochamber_core::config::ConfigError> {
    let config_path = Path::new("echochamber-config.yaml");
    if !config_path.exists() {
        info!("Config file not found, using defaults");
    }
    AppConfig::load(config_path)
}
