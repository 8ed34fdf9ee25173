//! The state transition engine.
//!
//! [`apply_action`] is the one nontrivial computation in the system: it
//! applies a post's impact deltas for a chosen action to the four bounded
//! community metrics, advances the deck cursor, records the action, and
//! evaluates the ending conditions in fixed priority order. It is pure --
//! the caller supplies the timestamp and persists the result.
//!
//! # Invariants
//!
//! - Every metric is clamped to `0..=100` after every transition.
//! - The cursor advances by exactly one per accepted action.
//! - At most one ending fires per transition, and once a run is ended
//!   the engine refuses further actions.
//! - Reaching 100 on a metric is a clamp, never a terminal condition.

use chrono::{DateTime, Utc};

use echochamber_types::structs::{METRIC_MAX, METRIC_MIN};
use echochamber_types::{
    Ending, EndingKind, GameState, GameStatus, LeaderboardEntry, ModerationAction, Post,
    ProcessedPost,
};

/// Errors the transition engine can report.
///
/// Given well-typed inputs the engine is total except for one guard: it
/// must never be invoked on a terminal state. Unknown posts and
/// unrecognized action strings are the caller's responsibility to reject
/// before the engine is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The run has already ended; the action was not applied.
    #[error("the run has already ended")]
    GameEnded,
}

/// The result of one accepted action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The state after the action.
    pub state: GameState,
    /// The leaderboard record to persist, present exactly when this
    /// transition ended the run.
    pub completed: Option<LeaderboardEntry>,
}

/// Apply a moderation action to the current run state.
///
/// Steps, in order:
/// 1. refuse if the run has already ended;
/// 2. apply the post's four impact deltas for `action`, clamping each
///    metric to `0..=100`;
/// 3. advance the deck cursor and append the processed-action record;
/// 4. evaluate ending conditions (freedom, order, trust, diversity
///    exhaustion, then deck exhaustion) and stop at the first match;
/// 5. on an ending, mark the run ended, append the ending record, and
///    build the leaderboard entry snapshot.
///
/// `deck_len` is the current length of the post deck; it decides the
/// all-posts-processed ending.
///
/// # Errors
///
/// Returns [`EngineError::GameEnded`] when `state` is already terminal.
pub fn apply_action(
    state: &GameState,
    post: &Post,
    action: ModerationAction,
    deck_len: usize,
    now: DateTime<Utc>,
) -> Result<Transition, EngineError> {
    if state.game_status.is_ended() {
        return Err(EngineError::GameEnded);
    }

    let mut next = state.clone();
    next.freedom = clamp_metric(next.freedom + post.freedom_impact.delta(action));
    next.order = clamp_metric(next.order + post.order_impact.delta(action));
    next.trust = clamp_metric(next.trust + post.trust_impact.delta(action));
    next.diversity = clamp_metric(next.diversity + post.diversity_impact.delta(action));

    next.current_post_index = next.current_post_index.saturating_add(1);
    next.processed_posts.push(ProcessedPost {
        post_id: post.id,
        action,
        timestamp: now,
    });

    let completed = evaluate_ending(&next, deck_len).map(|kind| {
        next.game_status = GameStatus::Ended;
        next.endings.push(Ending::from(kind));
        leaderboard_entry(&next, kind, now)
    });

    Ok(Transition {
        state: next,
        completed,
    })
}

/// Clamp a metric to its `0..=100` range.
fn clamp_metric(value: f64) -> f64 {
    value.clamp(METRIC_MIN, METRIC_MAX)
}

/// Evaluate the ending conditions against the post-transition state.
///
/// The priority order is fixed: a freedom collapse outranks an order
/// collapse, which outranks trust, which outranks diversity; only when
/// no metric is exhausted does processing the last post yield the true
/// ending. Only the first match fires.
fn evaluate_ending(state: &GameState, deck_len: usize) -> Option<EndingKind> {
    let cursor = usize::try_from(state.current_post_index).unwrap_or(usize::MAX);
    if state.freedom <= METRIC_MIN {
        Some(EndingKind::Anarchy)
    } else if state.order <= METRIC_MIN {
        Some(EndingKind::OrderCollapse)
    } else if state.trust <= METRIC_MIN {
        Some(EndingKind::TrustLoss)
    } else if state.diversity <= METRIC_MIN {
        Some(EndingKind::DiversityExtinct)
    } else if deck_len > 0 && cursor >= deck_len {
        Some(EndingKind::TrueEnding)
    } else {
        None
    }
}

/// Build the leaderboard snapshot for a run that just ended.
fn leaderboard_entry(state: &GameState, kind: EndingKind, now: DateTime<Utc>) -> LeaderboardEntry {
    LeaderboardEntry {
        score: state.score(),
        freedom: state.freedom,
        order: state.order,
        trust: state.trust,
        diversity: state.diversity,
        ending: String::from(kind.label()),
        completed_at: now,
        processed_posts: u32::try_from(state.processed_posts.len()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use echochamber_types::Impact;

    use super::*;

    /// A deck post whose four impacts are the same triple.
    fn post_with_uniform_impact(id: u64, impact: Impact) -> Post {
        Post {
            id,
            post_type: String::from("논쟁"),
            title: String::from("title"),
            content: String::from("content"),
            author: String::from("author"),
            freedom_impact: impact,
            order_impact: impact,
            trust_impact: impact,
            diversity_impact: impact,
        }
    }

    fn apply(
        state: &GameState,
        post: &Post,
        action: ModerationAction,
        deck_len: usize,
    ) -> Transition {
        apply_action(state, post, action, deck_len, Utc::now()).unwrap()
    }

    #[test]
    fn deltas_move_metrics_and_cursor_advances_once() {
        let state = GameState::new_run();
        let post = post_with_uniform_impact(1, Impact::new(5.0, 2.0, -3.0));

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.freedom, 55.0);
        assert_eq!(t.state.order, 55.0);
        assert_eq!(t.state.trust, 55.0);
        assert_eq!(t.state.diversity, 55.0);
        assert_eq!(t.state.current_post_index, 1);
        assert_eq!(t.state.processed_posts.len(), 1);
        assert_eq!(t.state.processed_posts.first().unwrap().post_id, 1);
        assert_eq!(
            t.state.processed_posts.first().unwrap().action,
            ModerationAction::Approve
        );
        assert_eq!(t.state.game_status, GameStatus::Playing);
        assert!(t.completed.is_none());
    }

    #[test]
    fn metrics_clamp_at_both_bounds() {
        let mut state = GameState::new_run();
        state.freedom = 95.0;
        state.order = 3.0;
        // freedom overshoots the top, order undershoots the bottom.
        let post = Post {
            order_impact: Impact::new(-203.0, 0.0, 0.0),
            ..post_with_uniform_impact(9, Impact::new(40.0, 0.0, 0.0))
        };

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.freedom, 100.0);
        assert_eq!(t.state.order, 0.0);
    }

    #[test]
    fn reaching_one_hundred_is_not_terminal() {
        let mut state = GameState::new_run();
        state.freedom = 99.0;
        let post = post_with_uniform_impact(2, Impact::new(50.0, 0.0, 0.0));

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.freedom, 100.0);
        assert_eq!(t.state.game_status, GameStatus::Playing);
        assert!(t.state.endings.is_empty());
        assert!(t.completed.is_none());
    }

    #[test]
    fn freedom_collapse_ends_the_run() {
        let mut state = GameState::new_run();
        state.freedom = 4.0;
        let post = post_with_uniform_impact(3, Impact::new(-10.0, 0.0, 0.0));

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.game_status, GameStatus::Ended);
        assert_eq!(t.state.endings.len(), 1);
        assert_eq!(
            t.state.endings.first().unwrap().kind,
            EndingKind::Anarchy
        );
        assert!(t.completed.is_some());
    }

    #[test]
    fn freedom_outranks_order_when_both_collapse() {
        let mut state = GameState::new_run();
        state.freedom = 2.0;
        state.order = 2.0;
        let post = post_with_uniform_impact(4, Impact::new(-10.0, 0.0, 0.0));

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.endings.len(), 1);
        assert_eq!(
            t.state.endings.first().unwrap().kind,
            EndingKind::Anarchy
        );
    }

    #[test]
    fn ending_priority_runs_freedom_order_trust_diversity() {
        // Collapse everything except freedom: order must win.
        let mut state = GameState::new_run();
        state.order = 1.0;
        state.trust = 1.0;
        state.diversity = 1.0;
        let post = post_with_uniform_impact(5, Impact::new(-10.0, 0.0, 0.0));
        let keep_freedom = Post {
            freedom_impact: Impact::ZERO,
            ..post
        };

        let t = apply(&state, &keep_freedom, ModerationAction::Approve, 30);
        assert_eq!(
            t.state.endings.first().unwrap().kind,
            EndingKind::OrderCollapse
        );
    }

    #[test]
    fn true_ending_after_last_post_with_interior_metrics() {
        let mild = post_with_uniform_impact(1, Impact::new(1.0, 0.0, -1.0));
        let deck_len = 3;

        let mut state = GameState::new_run();
        for _ in 0..2 {
            let t = apply(&state, &mild, ModerationAction::Approve, deck_len);
            assert_eq!(t.state.game_status, GameStatus::Playing);
            state = t.state;
        }

        let t = apply(&state, &mild, ModerationAction::Approve, deck_len);
        assert_eq!(t.state.game_status, GameStatus::Ended);
        assert_eq!(t.state.current_post_index, 3);
        assert_eq!(t.state.endings.len(), 1);
        assert_eq!(
            t.state.endings.first().unwrap().kind,
            EndingKind::TrueEnding
        );
        let entry = t.completed.unwrap();
        assert_eq!(entry.ending, "트루엔딩");
        assert_eq!(entry.processed_posts, 3);
    }

    #[test]
    fn legacy_scalar_impact_derives_warn_and_delete() {
        // freedomImpact = 10 in legacy scalar form.
        let post: Post = serde_json::from_str(
            r#"{
                "id": 1, "type": "허위정보", "title": "t", "content": "c",
                "author": "a",
                "freedomImpact": 10,
                "orderImpact": [0, 0, 0],
                "trustImpact": [0, 0, 0],
                "diversityImpact": [0, 0, 0]
            }"#,
        )
        .unwrap();
        let state = GameState::new_run();

        let warned = apply(&state, &post, ModerationAction::Warn, 30);
        assert_eq!(warned.state.freedom, 55.0);

        let deleted = apply(&state, &post, ModerationAction::Delete, 30);
        assert_eq!(deleted.state.freedom, 35.0);
    }

    #[test]
    fn score_is_sum_of_metrics_at_ending() {
        let mut state = GameState::new_run();
        state.freedom = 10.0;
        state.order = 20.0;
        state.trust = 30.0;
        state.diversity = 18.0;
        // Drop diversity by 3 to 15 and end via deck exhaustion.
        let post = Post {
            diversity_impact: Impact::new(-3.0, 0.0, 0.0),
            ..post_with_uniform_impact(1, Impact::ZERO)
        };

        let t = apply(&state, &post, ModerationAction::Approve, 1);
        let entry = t.completed.unwrap();
        assert_eq!(entry.score, 75.0);
        assert_eq!(entry.freedom, 10.0);
        assert_eq!(entry.diversity, 15.0);
    }

    #[test]
    fn ended_run_rejects_further_actions() {
        let mut state = GameState::new_run();
        state.trust = 1.0;
        let post = post_with_uniform_impact(6, Impact::new(-10.0, 0.0, 0.0));

        let t = apply(&state, &post, ModerationAction::Approve, 30);
        assert_eq!(t.state.game_status, GameStatus::Ended);

        // A second invocation must be refused: no duplicate ending, no
        // double-counted score.
        let again = apply_action(&t.state, &post, ModerationAction::Approve, 30, Utc::now());
        assert_eq!(again, Err(EngineError::GameEnded));
        assert_eq!(t.state.endings.len(), 1);
        assert_eq!(t.state.processed_posts.len(), 1);
    }

    #[test]
    fn cursor_never_exceeds_deck_length() {
        let mild = post_with_uniform_impact(1, Impact::ZERO);
        let deck_len = 2;

        let mut state = GameState::new_run();
        let t = apply(&state, &mild, ModerationAction::Warn, deck_len);
        state = t.state;
        let t = apply(&state, &mild, ModerationAction::Warn, deck_len);
        assert_eq!(t.state.current_post_index, 2);
        // The run is now ended; the cursor can no longer move.
        assert!(
            apply_action(&t.state, &mild, ModerationAction::Warn, deck_len, Utc::now()).is_err()
        );
    }
}
