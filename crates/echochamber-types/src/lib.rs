//! Shared type definitions for the EchoChamber moderation game.
//!
//! This crate is the single source of truth for all types used across the
//! EchoChamber workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the browser frontend.
//!
//! All serde field names match the JSON files and API payloads of the
//! original deployment (`camelCase`, Korean ending labels), so existing
//! data and the React frontend keep working unchanged.
//!
//! # Modules
//!
//! - [`enums`] -- Enumeration types (moderation actions, game status, endings)
//! - [`impact`] -- The per-metric impact vector with legacy normalization
//! - [`structs`] -- Core records (posts, game state, leaderboard, users)

pub mod enums;
pub mod impact;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EndingKind, GameStatus, ModerationAction};
pub use impact::Impact;
pub use structs::{
    Ending, GameState, LeaderboardEntry, Post, ProcessedPost, User, UserSummary,
};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // Enums
        let _ = crate::enums::ModerationAction::export_all();
        let _ = crate::enums::GameStatus::export_all();
        let _ = crate::enums::EndingKind::export_all();

        // Structs
        let _ = crate::structs::Post::export_all();
        let _ = crate::structs::ProcessedPost::export_all();
        let _ = crate::structs::Ending::export_all();
        let _ = crate::structs::GameState::export_all();
        let _ = crate::structs::LeaderboardEntry::export_all();
        let _ = crate::structs::UserSummary::export_all();
    }
}
