//! Comment loading and rendering.
//!
//! Comments arrive from `GET /data` already ordered; rendering appends one
//! block per comment to the comments region, preserving that order.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::{CommentBlock, PageSurface, ids};

/// Comment record as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment body.
    pub comment_text: String,
    /// Author display name.
    pub author_name: String,
    /// Posting time in epoch milliseconds.
    pub timestamp_ms: i64,
}

/// Failures while turning a comment into a rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Timestamp does not map to a calendar date.
    #[error("timestamp {0} ms is outside the representable date range")]
    TimestampOutOfRange(i64),
}

/// Format a comment's metadata line as `Author: M/D/YYYY H:MM`.
///
/// Months and days are 1-indexed and unpadded, hours unpadded, minutes
/// zero-padded; the timestamp is rendered in the supplied UTC offset.
pub fn metadata_line(
    author: &str,
    timestamp_ms: i64,
    offset: FixedOffset,
) -> Result<String, RenderError> {
    let posted: DateTime<FixedOffset> = DateTime::from_timestamp_millis(timestamp_ms)
        .ok_or(RenderError::TimestampOutOfRange(timestamp_ms))?
        .with_timezone(&offset);
    Ok(format!(
        "{}: {}/{}/{} {}:{:02}",
        author,
        posted.month(),
        posted.day(),
        posted.year(),
        posted.hour(),
        posted.minute(),
    ))
}

/// Append one block per comment to the comments region, in received order.
///
/// Returns the number of blocks appended. Fails without touching the surface
/// further if any timestamp is unrepresentable.
pub fn render_comments<S: PageSurface>(
    comments: &[Comment],
    surface: &mut S,
    offset: FixedOffset,
) -> Result<usize, RenderError> {
    for comment in comments {
        let metadata = metadata_line(&comment.author_name, comment.timestamp_ms, offset)?;
        surface.append_comment(
            ids::COMMENTS,
            CommentBlock {
                body: comment.comment_text.clone(),
                metadata,
            },
        );
    }
    Ok(comments.len())
}
