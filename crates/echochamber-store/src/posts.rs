//! The post deck store.
//!
//! The deck is an ordered list of [`Post`] records read from
//! `posts.json`. Players consume it front to back via the run state's
//! cursor; admins can append, edit, and remove entries between runs.
//! Legacy scalar impact fields are normalized to `[approve, warn,
//! delete]` triples when the file is read, and the canonical form is
//! written back on the next mutation.

use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use echochamber_types::{Impact, Post};

use crate::error::StoreError;
use crate::persist::{load_json, store_json};

/// Admin input for a new deck entry.
///
/// The id is assigned by the store. Impacts must already be the
/// canonical triple form; the legacy scalar shorthand is accepted only
/// when reading old data files, never from the admin API.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    /// Post category shown to the player.
    #[serde(rename = "type")]
    pub post_type: String,
    /// Display title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// `[approve, warn, delete]` deltas for the freedom metric.
    pub freedom_impact: [f64; 3],
    /// `[approve, warn, delete]` deltas for the order metric.
    pub order_impact: [f64; 3],
    /// `[approve, warn, delete]` deltas for the trust metric.
    pub trust_impact: [f64; 3],
    /// `[approve, warn, delete]` deltas for the diversity metric.
    pub diversity_impact: [f64; 3],
}

/// Admin input for editing an existing deck entry.
///
/// Every field is optional; absent fields keep their current value.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    /// New post category, if changing.
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    /// New title, if changing.
    pub title: Option<String>,
    /// New body text, if changing.
    pub content: Option<String>,
    /// New author display name, if changing.
    pub author: Option<String>,
    /// New freedom deltas, if changing.
    pub freedom_impact: Option<[f64; 3]>,
    /// New order deltas, if changing.
    pub order_impact: Option<[f64; 3]>,
    /// New trust deltas, if changing.
    pub trust_impact: Option<[f64; 3]>,
    /// New diversity deltas, if changing.
    pub diversity_impact: Option<[f64; 3]>,
}

/// In-memory deck with write-through persistence to `posts.json`.
#[derive(Debug)]
pub struct PostStore {
    path: Option<PathBuf>,
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    /// Open the deck at `path`, starting empty if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Serialization`] when
    /// the file exists but cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let posts: Vec<Post> = load_json(path)?.unwrap_or_default();
        tracing::info!(posts = posts.len(), path = %path.display(), "post deck loaded");
        Ok(Self {
            path: Some(path.to_path_buf()),
            posts: RwLock::new(posts),
        })
    }

    /// An in-memory deck that never touches disk, seeded with `posts`.
    #[must_use]
    pub fn ephemeral(posts: Vec<Post>) -> Self {
        Self {
            path: None,
            posts: RwLock::new(posts),
        }
    }

    /// The full deck in order.
    pub async fn list(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Number of posts in the deck.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Whether the deck has no posts.
    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Look up one post by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no post has that id.
    pub async fn get(&self, id: u64) -> Result<Post, StoreError> {
        self.posts
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "post", id })
    }

    /// Append a new post to the deck, assigning the next free id.
    ///
    /// Ids are `max(existing) + 1`, so deleting a post never causes an
    /// id to be reused while higher ids exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for blank text fields, or a
    /// persistence error if the write-back fails.
    pub async fn create(&self, draft: PostDraft) -> Result<Post, StoreError> {
        validate_text("type", &draft.post_type)?;
        validate_text("title", &draft.title)?;
        validate_text("content", &draft.content)?;
        validate_text("author", &draft.author)?;

        let mut posts = self.posts.write().await;
        let id = posts
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let post = Post {
            id,
            post_type: draft.post_type.trim().to_owned(),
            title: draft.title.trim().to_owned(),
            content: draft.content.trim().to_owned(),
            author: draft.author.trim().to_owned(),
            freedom_impact: Impact::from(draft.freedom_impact),
            order_impact: Impact::from(draft.order_impact),
            trust_impact: Impact::from(draft.trust_impact),
            diversity_impact: Impact::from(draft.diversity_impact),
        };
        posts.push(post.clone());
        store_json(self.path.as_deref(), &*posts)?;
        tracing::info!(id, "post created");
        Ok(post)
    }

    /// Apply a partial update to an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no post has that id,
    /// [`StoreError::Validation`] when a provided text field is blank,
    /// or a persistence error if the write-back fails.
    pub async fn update(&self, id: u64, update: PostUpdate) -> Result<Post, StoreError> {
        for (field, value) in [
            ("type", &update.post_type),
            ("title", &update.title),
            ("content", &update.content),
            ("author", &update.author),
        ] {
            if let Some(value) = value {
                validate_text(field, value)?;
            }
        }

        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { kind: "post", id })?;

        if let Some(post_type) = update.post_type {
            post.post_type = post_type.trim().to_owned();
        }
        if let Some(title) = update.title {
            post.title = title.trim().to_owned();
        }
        if let Some(content) = update.content {
            post.content = content.trim().to_owned();
        }
        if let Some(author) = update.author {
            post.author = author.trim().to_owned();
        }
        if let Some(impact) = update.freedom_impact {
            post.freedom_impact = Impact::from(impact);
        }
        if let Some(impact) = update.order_impact {
            post.order_impact = Impact::from(impact);
        }
        if let Some(impact) = update.trust_impact {
            post.trust_impact = Impact::from(impact);
        }
        if let Some(impact) = update.diversity_impact {
            post.diversity_impact = Impact::from(impact);
        }

        let updated = post.clone();
        store_json(self.path.as_deref(), &*posts)?;
        tracing::info!(id, "post updated");
        Ok(updated)
    }

    /// Remove a post from the deck.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no post has that id, or a
    /// persistence error if the write-back fails.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(StoreError::NotFound { kind: "post", id });
        }
        store_json(self.path.as_deref(), &*posts)?;
        tracing::info!(id, "post deleted");
        Ok(())
    }
}

/// Reject blank or whitespace-only text fields.
fn validate_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
