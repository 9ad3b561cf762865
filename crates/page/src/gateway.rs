//! Network gateway to the portfolio backend.
//!
//! The trait keeps the page runtime testable; [`HttpGateway`] is the real
//! implementation over `reqwest` with a request timeout and a cookie store so
//! a login carries into subsequent lookups.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::comments::Comment;

/// Profile of the logged-in visitor as served by `GET /userInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user id.
    pub id: String,
    /// Name shown on the page.
    pub display_name: String,
    /// Contact address.
    pub email: String,
}

/// Failures talking to the backend.
///
/// "Not logged in" is not an error: the user-info endpoint maps that case to
/// a `None` profile. These variants cover what must never be conflated with
/// it: unreachable backend, server failure, or an unreadable body.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Building the HTTP client failed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// Endpoint path did not resolve against the base URL.
    #[error("invalid endpoint URL for {endpoint}: {source}")]
    Endpoint {
        /// Endpoint being resolved.
        endpoint: &'static str,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The request never produced a response (connect failure, timeout).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint being called.
        endpoint: &'static str,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with an unexpected status.
    #[error("unexpected status {status} from {endpoint}")]
    Status {
        /// Endpoint being called.
        endpoint: &'static str,
        /// Status received.
        status: u16,
    },
    /// The response body did not decode as the expected shape.
    #[error("invalid response body from {endpoint}: {source}")]
    InvalidBody {
        /// Endpoint being called.
        endpoint: &'static str,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },
}

/// Backend operations the page runtime needs.
#[async_trait]
pub trait PortfolioGateway: Send + Sync {
    /// Fetch the ordered comment list from `GET /data`.
    async fn fetch_comments(&self) -> Result<Vec<Comment>, GatewayError>;

    /// Resolve the current visitor via `GET /userInfo`.
    ///
    /// A 4xx answer means "no session" and maps to `Ok(None)`; server
    /// failures and transport errors are returned as errors.
    async fn fetch_current_user(&self) -> Result<Option<UserProfile>, GatewayError>;
}

/// HTTP gateway against a running backend.
pub struct HttpGateway {
    client: reqwest::Client,
    base: Url,
}

impl HttpGateway {
    /// Build a gateway with the given base URL and per-request timeout.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|source| GatewayError::Client { source })?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, endpoint: &'static str) -> Result<Url, GatewayError> {
        self.base
            .join(endpoint)
            .map_err(|source| GatewayError::Endpoint { endpoint, source })
    }

    /// Establish a session so later `/userInfo` lookups resolve to a user.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), GatewayError> {
        const ENDPOINT: &str = "login";
        let url = self.endpoint(ENDPOINT)?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioGateway for HttpGateway {
    async fn fetch_comments(&self) -> Result<Vec<Comment>, GatewayError> {
        const ENDPOINT: &str = "data";
        let url = self.endpoint(ENDPOINT)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
            });
        }
        response
            .json::<Vec<Comment>>()
            .await
            .map_err(|source| GatewayError::InvalidBody {
                endpoint: ENDPOINT,
                source,
            })
    }

    async fn fetch_current_user(&self) -> Result<Option<UserProfile>, GatewayError> {
        const ENDPOINT: &str = "userInfo";
        let url = self.endpoint(ENDPOINT)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;
        let status = response.status();
        if status.is_client_error() {
            // Expected answer for anonymous visitors.
            debug!(status = status.as_u16(), "no session");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
            });
        }
        response
            .json::<UserProfile>()
            .await
            .map(Some)
            .map_err(|source| GatewayError::InvalidBody {
                endpoint: ENDPOINT,
                source,
            })
    }
}
