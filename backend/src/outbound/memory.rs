//! In-memory storage adapters.
//!
//! The site keeps its guestbook and profiles for the lifetime of the process;
//! durable persistence is explicitly out of scope. Both adapters are safe to
//! share across workers via `Arc`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{CommentRepository, ProfileRepository, StorageError};
use crate::domain::{Comment, UserId, UserProfile};

/// Lock-poisoning maps to a storage failure rather than a panic so one
/// crashed writer does not take the read path down with it.
fn poisoned(which: &str) -> StorageError {
    StorageError::operation(format!("{which} lock poisoned"))
}

/// Process-local comment store.
#[derive(Debug, Default)]
pub struct InMemoryComments {
    entries: RwLock<Vec<Comment>>,
}

impl InMemoryComments {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn append(&self, comment: Comment) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("comments"))?;
        entries.push(comment);
        Ok(())
    }

    async fn list_oldest_first(&self) -> Result<Vec<Comment>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned("comments"))?;
        let mut comments = entries.clone();
        // Stable sort keeps insertion order for equal timestamps.
        comments.sort_by_key(|comment| comment.timestamp_ms);
        Ok(comments)
    }
}

/// Process-local profile store.
#[derive(Debug, Default)]
pub struct InMemoryProfiles {
    entries: RwLock<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfiles {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn upsert(&self, profile: UserProfile) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("profiles"))?;
        entries.insert(profile.id, profile);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned("profiles"))?;
        Ok(entries.get(id).cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("profiles"))?;
        Ok(entries.remove(id).is_some())
    }
}
