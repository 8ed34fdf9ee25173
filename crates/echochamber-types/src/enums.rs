//! Enumeration types for the EchoChamber moderation game.
//!
//! The serialized forms are fixed by the original data files: actions and
//! the game status serialize as lowercase English strings, ending kinds as
//! their Korean display labels.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Moderation actions
// ---------------------------------------------------------------------------

/// One of the three moderation decisions a player can take on a post.
///
/// The wire form is the lowercase action name (`"approve"`, `"warn"`,
/// `"delete"`). Anything else fails deserialization -- unrecognized action
/// strings are rejected at the API boundary rather than silently treated
/// as `approve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    /// Let the post stand as written.
    Approve,
    /// Keep the post but attach a warning to its author.
    Warn,
    /// Remove the post from the community.
    Delete,
}

impl ModerationAction {
    /// The position of this action within an impact vector
    /// (`[approve, warn, delete]`).
    pub const fn index(self) -> usize {
        match self {
            Self::Approve => 0,
            Self::Warn => 1,
            Self::Delete => 2,
        }
    }

    /// The lowercase wire name of this action.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Warn => "warn",
            Self::Delete => "delete",
        }
    }
}

// ---------------------------------------------------------------------------
// Game status
// ---------------------------------------------------------------------------

/// The two-state run lifecycle.
///
/// The transition is monotonic: a run goes `playing -> ended` exactly once
/// and never leaves `ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// The run is in progress and accepts actions.
    Playing,
    /// The run is finished; no further actions are accepted.
    Ended,
}

impl GameStatus {
    /// Whether the run is finished.
    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

/// A terminal classification of a completed run.
///
/// The serialized labels are the Korean display strings from the original
/// game data and must not change -- they are stored in `leaderboard.json`
/// and rendered directly by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EndingKind {
    /// Freedom collapsed to zero.
    #[serde(rename = "무정부")]
    Anarchy,
    /// Order collapsed to zero.
    #[serde(rename = "질서 붕괴")]
    OrderCollapse,
    /// Trust collapsed to zero.
    #[serde(rename = "신뢰 상실")]
    TrustLoss,
    /// Diversity collapsed to zero.
    #[serde(rename = "다양성 소멸")]
    DiversityExtinct,
    /// Every post was processed with all four metrics still above zero.
    #[serde(rename = "트루엔딩")]
    TrueEnding,
}

impl EndingKind {
    /// The Korean display label, identical to the serde form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anarchy => "무정부",
            Self::OrderCollapse => "질서 붕괴",
            Self::TrustLoss => "신뢰 상실",
            Self::DiversityExtinct => "다양성 소멸",
            Self::TrueEnding => "트루엔딩",
        }
    }

    /// The fixed display message shown when this ending fires.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Anarchy => {
                "자유가 완전히 사라졌습니다. 무정부 상태가 되었습니다. 커뮤니티가 혼란에 빠졌습니다."
            }
            Self::OrderCollapse => {
                "질서가 완전히 무너졌습니다. 커뮤니티가 혼란과 무질서에 빠졌습니다."
            }
            Self::TrustLoss => {
                "사용자들의 신뢰가 완전히 사라졌습니다. 커뮤니티는 더 이상 신뢰받지 못합니다."
            }
            Self::DiversityExtinct => {
                "다양성이 완전히 사라졌습니다. 모든 목소리가 같아져 커뮤니티가 메아리실(Echo Chamber)이 되었습니다."
            }
            Self::TrueEnding => {
                "모든 게시글을 처리하면서도 모든 지표를 유지했습니다. 이상적인 커뮤니티의 균형을 이루었습니다."
            }
        }
    }
}

impl core::fmt::Display for EndingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
