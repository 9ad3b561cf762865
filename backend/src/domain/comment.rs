//! Guestbook comment types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::user::{DisplayName, UserId};

/// Validation failures for [`CommentText`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentTextError {
    /// Comment body is empty once trimmed.
    #[error("comment must not be empty")]
    Empty,
}

/// Non-empty comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct CommentText(String);

impl CommentText {
    /// Validate and construct a comment body.
    ///
    /// Leading and trailing whitespace is preserved; only fully blank input
    /// is rejected, matching the "empty comments aren't allowed" rule.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentTextError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CommentTextError::Empty);
        }
        Ok(Self(value))
    }

    /// Borrow the body as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CommentText {
    type Error = CommentTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

/// Stored comment, keyed to its author by id.
///
/// The author's display name is joined in at read time so renames show up on
/// old comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Identity of the poster.
    pub author: UserId,
    /// Comment body.
    pub text: CommentText,
    /// Posting time in epoch milliseconds.
    pub timestamp_ms: i64,
}

/// Comment as served by `GET /data`: body, resolved author name, timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Comment body.
    pub comment_text: CommentText,
    /// Author display name at read time.
    pub author_name: DisplayName,
    /// Posting time in epoch milliseconds.
    pub timestamp_ms: i64,
}

impl CommentView {
    /// Join a stored comment with its author's current display name.
    pub fn from_comment(comment: Comment, author_name: DisplayName) -> Self {
        Self {
            comment_text: comment.text,
            author_name,
            timestamp_ms: comment.timestamp_ms,
        }
    }
}
