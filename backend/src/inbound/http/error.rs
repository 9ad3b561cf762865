//! Mapping from domain errors to HTTP responses.
//!
//! Keeps the domain free of transport concerns: status codes and payload
//! redaction live here, next to the handlers that produce the errors.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            // Log the cause, return a redacted payload.
            error!(message = %self.message(), "internal error");
            return HttpResponse::build(self.status_code())
                .json(Error::internal("Internal server error"));
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("nope"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_expected_statuses(#[case] error: Error, #[case] status: StatusCode) {
        assert_eq!(error.status_code(), status);
    }

    #[actix_rt::test]
    async fn internal_errors_are_redacted() {
        let response = Error::internal("connection string leaked").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: Error = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(payload.message(), "Internal server error");
    }

    #[actix_rt::test]
    async fn client_errors_keep_their_message() {
        let response = Error::not_found("no such profile").error_response();
        let body = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: Error = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(payload.message(), "no such profile");
    }
}
