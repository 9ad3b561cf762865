//! Ports the domain expects driven adapters to implement.
//!
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::comment::Comment;
use super::user::{UserId, UserProfile};

/// Failures raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store rejected or lost the operation.
    #[error("storage operation failed: {message}")]
    Operation {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl StorageError {
    /// Build an operation failure from any displayable cause.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }
}

/// Append-only comment store.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist one comment.
    async fn append(&self, comment: Comment) -> Result<(), StorageError>;

    /// All comments, sorted oldest first by posting time.
    async fn list_oldest_first(&self) -> Result<Vec<Comment>, StorageError>;
}

/// Keyed user-profile store.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace a profile.
    async fn upsert(&self, profile: UserProfile) -> Result<(), StorageError>;

    /// Fetch a profile by identity.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Remove a profile; returns whether one existed.
    async fn delete(&self, id: &UserId) -> Result<bool, StorageError>;
}
