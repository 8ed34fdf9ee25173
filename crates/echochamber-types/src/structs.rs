//! Core records for the EchoChamber moderation game.
//!
//! Field names follow the original JSON files exactly (`camelCase`,
//! `type` for the post category) so that existing decks, saved runs, and
//! leaderboards load unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EndingKind, GameStatus, ModerationAction};
use crate::impact::Impact;

/// The value every metric starts at, and the value a missing or
/// non-numeric stored metric is repaired to on read.
pub const DEFAULT_METRIC: f64 = 50.0;

/// Inclusive lower bound of every community metric.
pub const METRIC_MIN: f64 = 0.0;

/// Inclusive upper bound of every community metric.
pub const METRIC_MAX: f64 = 100.0;

// ---------------------------------------------------------------------------
// Post (deck entry)
// ---------------------------------------------------------------------------

/// An immutable entry in the post deck.
///
/// The four impact fields are normalized to canonical `[approve, warn,
/// delete]` triples when the deck is read; see [`Impact`] for the legacy
/// scalar handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique integer identifier within the deck.
    pub id: u64,
    /// Post category shown to the player (e.g. "허위정보", "선동").
    #[serde(rename = "type")]
    pub post_type: String,
    /// Display title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Per-action deltas applied to the freedom metric.
    #[serde(default)]
    #[ts(as = "Vec<f64>")]
    pub freedom_impact: Impact,
    /// Per-action deltas applied to the order metric.
    #[serde(default)]
    #[ts(as = "Vec<f64>")]
    pub order_impact: Impact,
    /// Per-action deltas applied to the trust metric.
    #[serde(default)]
    #[ts(as = "Vec<f64>")]
    pub trust_impact: Impact,
    /// Per-action deltas applied to the diversity metric.
    #[serde(default)]
    #[ts(as = "Vec<f64>")]
    pub diversity_impact: Impact,
}

// ---------------------------------------------------------------------------
// Processed-action record
// ---------------------------------------------------------------------------

/// One entry in the append-only history of moderated posts.
///
/// Insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ProcessedPost {
    /// The deck entry that was moderated.
    pub post_id: u64,
    /// The action the player chose.
    pub action: ModerationAction,
    /// When the action was accepted.
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Ending record
// ---------------------------------------------------------------------------

/// A terminal event appended to a run when it ends.
///
/// The structure supports multiple entries but the modeled flow appends
/// at most one (the run-ending event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ending {
    /// Which ending fired.
    #[serde(rename = "type")]
    pub kind: EndingKind,
    /// The fixed display message for this ending.
    pub message: String,
}

impl From<EndingKind> for Ending {
    fn from(kind: EndingKind) -> Self {
        Self {
            kind,
            message: String::from(kind.message()),
        }
    }
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The mutable state of one play session.
///
/// Invariants:
/// - every metric stays within `0..=100` after every transition;
/// - `currentPostIndex` advances by exactly one per accepted action and
///   never exceeds the deck length;
/// - `gameStatus` is monotonic (`playing -> ended`, never back).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// In-game day counter, informational only.
    #[serde(default = "default_day")]
    pub day: u32,
    /// How freely the community can speak (0-100).
    #[serde(default = "default_metric", deserialize_with = "metric_or_default")]
    pub freedom: f64,
    /// How orderly the community is (0-100).
    #[serde(default = "default_metric", deserialize_with = "metric_or_default")]
    pub order: f64,
    /// How much users trust the platform (0-100).
    #[serde(default = "default_metric", deserialize_with = "metric_or_default")]
    pub trust: f64,
    /// How diverse the voices in the community are (0-100).
    #[serde(default = "default_metric", deserialize_with = "metric_or_default")]
    pub diversity: f64,
    /// Cursor into the post deck; the next post to review.
    #[serde(default)]
    pub current_post_index: u32,
    /// Append-only history of moderated posts, oldest first.
    #[serde(default)]
    pub processed_posts: Vec<ProcessedPost>,
    /// Whether the run is still accepting actions.
    #[serde(default = "default_status")]
    pub game_status: GameStatus,
    /// Append-only list of endings that fired (at most one in practice).
    #[serde(default)]
    pub endings: Vec<Ending>,
}

impl GameState {
    /// A fresh run: day 1, every metric at 50, empty histories, playing.
    ///
    /// This is the reset operation; it is a plain constructor and not
    /// part of the transition engine.
    pub const fn new_run() -> Self {
        Self {
            day: 1,
            freedom: DEFAULT_METRIC,
            order: DEFAULT_METRIC,
            trust: DEFAULT_METRIC,
            diversity: DEFAULT_METRIC,
            current_post_index: 0,
            processed_posts: Vec::new(),
            game_status: GameStatus::Playing,
            endings: Vec::new(),
        }
    }

    /// The run score: the sum of the four metrics.
    pub fn score(&self) -> f64 {
        self.freedom + self.order + self.trust + self.diversity
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_run()
    }
}

const fn default_day() -> u32 {
    1
}

const fn default_metric() -> f64 {
    DEFAULT_METRIC
}

const fn default_status() -> GameStatus {
    GameStatus::Playing
}

/// Read a stored metric, repairing non-numeric values to the default.
///
/// Old state files sometimes lack `trust`/`diversity` or carry junk in
/// them; the original server patched those to 50 on every read and this
/// deserializer preserves that behavior.
fn metric_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(DEFAULT_METRIC))
}

// ---------------------------------------------------------------------------
// LeaderboardEntry
// ---------------------------------------------------------------------------

/// A completed-run record, immutable once created.
///
/// Created exactly once, at the transition that ends a run. The
/// leaderboard keeps the 100 highest scores in descending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Sum of the four metrics at the moment the run ended.
    pub score: f64,
    /// Freedom at the moment the run ended.
    pub freedom: f64,
    /// Order at the moment the run ended.
    pub order: f64,
    /// Trust at the moment the run ended.
    pub trust: f64,
    /// Diversity at the moment the run ended.
    pub diversity: f64,
    /// The ending label (kept as a string so historic entries with
    /// retired ending names still load).
    pub ending: String,
    /// When the run completed.
    pub completed_at: DateTime<Utc>,
    /// How many posts were moderated during the run.
    pub processed_posts: u32,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered player account.
///
/// Passwords are stored and compared in plaintext by explicit design
/// choice of the original (this login is not a security boundary).
/// The password is never included in API responses; see [`UserSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique integer identifier.
    pub id: u64,
    /// Display name, unique, at least 3 characters.
    pub username: String,
    /// Plaintext password, at least 4 characters.
    pub password: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The password-free projection used in API responses.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// The public projection of a [`User`] (no password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UserSummary {
    /// Unique integer identifier.
    pub id: u64,
    /// Display name.
    pub username: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn new_run_matches_reset_contract_exactly() {
        let state = GameState::new_run();
        assert_eq!(state.day, 1);
        assert_eq!(state.freedom, 50.0);
        assert_eq!(state.order, 50.0);
        assert_eq!(state.trust, 50.0);
        assert_eq!(state.diversity, 50.0);
        assert_eq!(state.current_post_index, 0);
        assert!(state.processed_posts.is_empty());
        assert_eq!(state.game_status, GameStatus::Playing);
        assert!(state.endings.is_empty());
    }

    #[test]
    fn state_wire_names_are_camel_case() {
        let json = serde_json::to_value(GameState::new_run()).unwrap();
        assert!(json.get("currentPostIndex").is_some());
        assert!(json.get("processedPosts").is_some());
        assert_eq!(json.get("gameStatus").unwrap(), "playing");
    }

    #[test]
    fn missing_metrics_default_to_fifty() {
        // A minimal legacy blob without trust/diversity.
        let state: GameState = serde_json::from_str(
            r#"{"day": 3, "freedom": 20, "order": 70, "currentPostIndex": 4}"#,
        )
        .unwrap();
        assert_eq!(state.trust, 50.0);
        assert_eq!(state.diversity, 50.0);
        assert_eq!(state.freedom, 20.0);
        assert_eq!(state.current_post_index, 4);
    }

    #[test]
    fn non_numeric_metric_is_repaired_to_fifty() {
        let state: GameState =
            serde_json::from_str(r#"{"freedom": "broken", "order": null}"#).unwrap();
        assert_eq!(state.freedom, 50.0);
        assert_eq!(state.order, 50.0);
    }

    #[test]
    fn post_reads_legacy_scalar_impacts() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": 1,
                "type": "허위정보",
                "title": "t",
                "content": "c",
                "author": "a",
                "freedomImpact": 10,
                "orderImpact": [1, 2, 3],
                "trustImpact": [0, 0, 0],
                "diversityImpact": [0, 0, 0]
            }"#,
        )
        .unwrap();
        assert_eq!(post.freedom_impact.delta(ModerationAction::Warn), 5.0);
        assert_eq!(post.order_impact.delta(ModerationAction::Delete), 3.0);
    }

    #[test]
    fn ending_record_carries_fixed_message() {
        let ending = Ending::from(EndingKind::Anarchy);
        let json = serde_json::to_value(&ending).unwrap();
        assert_eq!(json.get("type").unwrap(), "무정부");
        assert_eq!(ending.message, EndingKind::Anarchy.message());
    }

    #[test]
    fn state_round_trips_with_same_field_set() {
        let mut state = GameState::new_run();
        state.processed_posts.push(ProcessedPost {
            post_id: 7,
            action: ModerationAction::Warn,
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn user_summary_never_carries_password() {
        let user = User {
            id: 1,
            username: String::from("player"),
            password: String::from("1234"),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.summary()).unwrap();
        assert!(json.get("password").is_none());
    }
}
