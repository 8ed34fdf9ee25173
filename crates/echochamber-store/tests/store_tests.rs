//! Integration tests for the flat-file stores.
//!
//! Each test gets its own temp directory, so persistence is exercised
//! against real files including the reload path.

#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use chrono::Utc;
use tempfile::TempDir;

use echochamber_store::{
    GameStore, LeaderboardStore, PostDraft, PostStore, PostUpdate, StoreError, UserStore,
};
use echochamber_types::{GameState, GameStatus, LeaderboardEntry, ModerationAction};

fn draft(title: &str) -> PostDraft {
    PostDraft {
        post_type: "논쟁".to_owned(),
        title: title.to_owned(),
        content: "내용".to_owned(),
        author: "작성자".to_owned(),
        freedom_impact: [5.0, 2.0, -5.0],
        order_impact: [-3.0, 1.0, 4.0],
        trust_impact: [0.0, 0.0, 0.0],
        diversity_impact: [2.0, 0.0, -2.0],
    }
}

fn entry(score: f64) -> LeaderboardEntry {
    LeaderboardEntry {
        score,
        freedom: score / 4.0,
        order: score / 4.0,
        trust: score / 4.0,
        diversity: score / 4.0,
        ending: "트루엔딩".to_owned(),
        completed_at: Utc::now(),
        processed_posts: 30,
    }
}

// ---------------------------------------------------------------------------
// PostStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn post_crud_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posts.json");

    let store = PostStore::open(&path).unwrap();
    assert!(store.is_empty().await);

    let a = store.create(draft("first")).await.unwrap();
    let b = store.create(draft("second")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);

    store
        .update(
            a.id,
            PostUpdate {
                title: Some("edited".to_owned()),
                freedom_impact: Some([9.0, 4.5, -9.0]),
                ..PostUpdate::default()
            },
        )
        .await
        .unwrap();
    store.delete(b.id).await.unwrap();

    // Reopen from disk and check everything survived.
    let reopened = PostStore::open(&path).unwrap();
    let posts = reopened.list().await;
    assert_eq!(posts.len(), 1);
    let a = posts.first().unwrap();
    assert_eq!(a.title, "edited");
    assert_eq!(a.freedom_impact.delta(ModerationAction::Warn), 4.5);
    // The deleted id is not reused while the deck remembers id 1 only;
    // max+1 assignment gives the next create id 2 again.
    let c = reopened.create(draft("third")).await.unwrap();
    assert_eq!(c.id, 2);
}

#[tokio::test]
async fn post_ids_are_never_reused_below_the_max() {
    let store = PostStore::ephemeral(Vec::new());
    let a = store.create(draft("a")).await.unwrap();
    let b = store.create(draft("b")).await.unwrap();
    store.delete(a.id).await.unwrap();

    let c = store.create(draft("c")).await.unwrap();
    assert!(c.id > b.id);
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let store = PostStore::ephemeral(Vec::new());
    let mut bad = draft("ok");
    bad.title = "   ".to_owned();
    assert!(matches!(
        store.create(bad).await,
        Err(StoreError::Validation(_))
    ));

    let post = store.create(draft("ok")).await.unwrap();
    let err = store
        .update(
            post.id,
            PostUpdate {
                content: Some(String::new()),
                ..PostUpdate::default()
            },
        )
        .await;
    assert!(matches!(err, Err(StoreError::Validation(_))));
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let store = PostStore::ephemeral(Vec::new());
    assert!(matches!(
        store.get(99).await,
        Err(StoreError::NotFound { kind: "post", id: 99 })
    ));
    assert!(matches!(
        store.delete(99).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn legacy_scalar_deck_file_is_normalized_on_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posts.json");
    std::fs::write(
        &path,
        r#"[{
            "id": 1, "type": "허위정보", "title": "t", "content": "c",
            "author": "a",
            "freedomImpact": 10,
            "orderImpact": [1, 2, 3],
            "trustImpact": [0, 0, 0],
            "diversityImpact": [0, 0, 0]
        }]"#,
    )
    .unwrap();

    let store = PostStore::open(&path).unwrap();
    let post = store.get(1).await.unwrap();
    assert_eq!(post.freedom_impact.delta(ModerationAction::Delete), -15.0);
}

// ---------------------------------------------------------------------------
// GameStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn game_state_round_trips_through_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game-state.json");

    let store = GameStore::open(&path).unwrap();
    let update = store.begin_update().await;
    let mut next = update.state().clone();
    next.freedom = 62.0;
    next.current_post_index = 4;
    update.commit(next).unwrap();

    let reopened = GameStore::open(&path).unwrap();
    let state = reopened.load().await;
    assert_eq!(state.freedom, 62.0);
    assert_eq!(state.current_post_index, 4);
}

#[tokio::test]
async fn dropping_an_update_without_commit_changes_nothing() {
    let store = GameStore::ephemeral();
    {
        let update = store.begin_update().await;
        let mut next = update.state().clone();
        next.freedom = 1.0;
        drop(update);
    }
    assert_eq!(store.load().await.freedom, 50.0);
}

#[tokio::test]
async fn reset_restores_the_fresh_run() {
    let store = GameStore::ephemeral();
    let update = store.begin_update().await;
    let mut next = update.state().clone();
    next.game_status = GameStatus::Ended;
    next.trust = 0.0;
    update.commit(next).unwrap();

    let fresh = store.reset().await.unwrap();
    assert_eq!(fresh, GameState::new_run());
    assert_eq!(store.load().await, GameState::new_run());
}

#[tokio::test]
async fn damaged_state_file_is_repaired_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game-state.json");
    // trust is junk and diversity is missing entirely.
    std::fs::write(&path, r#"{"day": 2, "freedom": 30, "trust": "zzz"}"#).unwrap();

    let store = GameStore::open(&path).unwrap();
    let state = store.load().await;
    assert_eq!(state.freedom, 30.0);
    assert_eq!(state.trust, 50.0);
    assert_eq!(state.diversity, 50.0);
}

// ---------------------------------------------------------------------------
// LeaderboardStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn leaderboard_sorts_descending_and_caps() {
    let store = LeaderboardStore::ephemeral(3);
    for score in [120.0, 260.0, 180.0, 310.0] {
        store.append(entry(score)).await.unwrap();
    }

    assert_eq!(store.len().await, 3);
    let top: Vec<f64> = store.top_n(10).await.iter().map(|e| e.score).collect();
    assert_eq!(top, vec![310.0, 260.0, 180.0]);
}

#[tokio::test]
async fn lowest_entry_past_one_hundred_is_dropped() {
    let store = LeaderboardStore::ephemeral(100);
    for i in 1..=100_u32 {
        store.append(entry(f64::from(i) * 4.0)).await.unwrap();
    }
    // A 101st entry scoring below everything disappears.
    store.append(entry(1.0)).await.unwrap();

    assert_eq!(store.len().await, 100);
    let all = store.top_n(200).await;
    assert_eq!(all.first().unwrap().score, 400.0);
    assert_eq!(all.last().unwrap().score, 4.0);
}

#[tokio::test]
async fn leaderboard_top_n_limits_the_slice() {
    let store = LeaderboardStore::ephemeral(100);
    for score in [10.0, 20.0, 30.0] {
        store.append(entry(score)).await.unwrap();
    }
    assert_eq!(store.top_n(2).await.len(), 2);
    assert_eq!(store.top_n(0).await.len(), 0);
}

#[tokio::test]
async fn leaderboard_survives_reopen_sorted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leaderboard.json");

    let store = LeaderboardStore::open(&path, 100).unwrap();
    store.append(entry(50.0)).await.unwrap();
    store.append(entry(250.0)).await.unwrap();

    let reopened = LeaderboardStore::open(&path, 100).unwrap();
    let top = reopened.top_n(10).await;
    assert_eq!(top.first().unwrap().score, 250.0);
    assert_eq!(top.first().unwrap().ending, "트루엔딩");
}

// ---------------------------------------------------------------------------
// UserStore
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_and_authenticate() {
    let store = UserStore::ephemeral();
    let user = store
        .register("player1", "pass1234", Utc::now())
        .await
        .unwrap();
    assert_eq!(user.id, 1);

    assert!(store.authenticate("player1", "pass1234").await.is_some());
    assert!(store.authenticate("player1", "wrong").await.is_none());
    assert!(store.authenticate("nobody", "pass1234").await.is_none());
}

#[tokio::test]
async fn usernames_are_trimmed_and_unique() {
    let store = UserStore::ephemeral();
    store.register("  abc  ", "1234", Utc::now()).await.unwrap();

    // The trimmed form collides with the stored account.
    assert!(matches!(
        store.register("abc", "5678", Utc::now()).await,
        Err(StoreError::Conflict(_))
    ));
    // And authentication works against the trimmed name.
    assert!(store.authenticate("abc", "1234").await.is_some());
}

#[tokio::test]
async fn short_credentials_are_rejected() {
    let store = UserStore::ephemeral();
    assert!(matches!(
        store.register("ab", "1234", Utc::now()).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.register("abc", "123", Utc::now()).await,
        Err(StoreError::Validation(_))
    ));
    // Korean usernames count characters, not bytes.
    assert!(store.register("김철수", "1234", Utc::now()).await.is_ok());
}

#[tokio::test]
async fn users_persist_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.json");

    let store = UserStore::open(&path).unwrap();
    store.register("player1", "1234", Utc::now()).await.unwrap();

    let reopened = UserStore::open(&path).unwrap();
    assert_eq!(reopened.len().await, 1);
    let found = reopened.find("player1").await.unwrap();
    assert_eq!(found.id, 1);
}
