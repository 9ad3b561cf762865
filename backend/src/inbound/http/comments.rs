//! Guestbook comment endpoints.
//!
//! ```text
//! GET  /data                 -> JSON array of comments, oldest first
//! POST /data (comment-text)  -> store a comment, redirect to /index.html
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Comment, CommentText, CommentView, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /data`. The field name matches the historical page
/// markup.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewCommentForm {
    /// Raw comment body; blank means the form was submitted empty.
    #[serde(rename = "comment-text", default)]
    pub comment_text: String,
}

/// List all comments, oldest first, with author names resolved.
///
/// Comments whose author no longer has a profile are omitted rather than
/// served with a dangling name.
#[utoipa::path(
    get,
    path = "/data",
    responses(
        (status = 200, description = "Comments, oldest first", body = [CommentView]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments",
    security([])
)]
#[get("/data")]
pub async fn list_comments(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CommentView>>> {
    let comments = state.comments.list_oldest_first().await?;
    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        match state.profiles.find_by_id(&comment.author).await? {
            Some(profile) => views.push(CommentView::from_comment(comment, profile.display_name)),
            None => debug!(author = %comment.author, "skipping comment with deleted author"),
        }
    }
    Ok(web::Json(views))
}

/// Store a comment for the logged-in user and bounce back to the page.
///
/// Anonymous posters get 403: commenting requires a login. Blank bodies get
/// 400.
#[utoipa::path(
    post,
    path = "/data",
    responses(
        (status = 303, description = "Comment stored; redirect to /index.html"),
        (status = 400, description = "Blank comment", body = Error),
        (status = 403, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "postComment"
)]
#[post("/data")]
pub async fn post_comment(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<NewCommentForm>,
) -> ApiResult<HttpResponse> {
    let Some(author) = session.user_id()? else {
        return Err(Error::forbidden("login required to comment"));
    };
    let text = CommentText::new(form.into_inner().comment_text)
        .map_err(|error| Error::invalid_request(error.to_string()))?;

    state
        .comments
        .append(Comment {
            author,
            text,
            timestamp_ms: Utc::now().timestamp_millis(),
        })
        .await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/index.html"))
        .finish())
}
