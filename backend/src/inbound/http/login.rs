//! Login, logout, and login-redirect endpoints.
//!
//! ```text
//! POST /login {"username":"ada","password":"..."}  -> establish session
//! GET  /login?destination-url=/index.html          -> redirect per login state
//! POST /logout                                     -> drop session
//! ```
//!
//! The site has no external identity provider: any well-formed credentials
//! are accepted and the user id is derived deterministically from the login
//! name, so returning visitors keep their identity and their profile.

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    DisplayName, Error, LoginCredentials, LoginValidationError, UserId, UserProfile,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path of the static login form page.
const LOGIN_FORM_PATH: &str = "/login.html";

/// Login request body for `POST /login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name; becomes the initial display name.
    pub username: String,
    /// Password; validated for shape only.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Query string for `GET /login`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct LoginRedirectQuery {
    /// Where to land after login; defaults to the site root.
    #[serde(rename = "destination-url")]
    pub destination_url: Option<String>,
}

/// Resolve validated credentials to a stable identity.
///
/// First-time logins get a default profile so `GET /userInfo` resolves
/// immediately after login.
async fn establish_identity(
    state: &HttpState,
    credentials: &LoginCredentials,
) -> Result<UserId, Error> {
    let user_id = UserId::from_username(credentials.username());
    if state.profiles.find_by_id(&user_id).await?.is_none() {
        let display_name = DisplayName::new(credentials.username())
            .map_err(|error| Error::invalid_request(error.to_string()))?;
        state
            .profiles
            .upsert(UserProfile {
                id: user_id,
                display_name,
                email: format!("{}@users.portfolio.example", credentials.username()),
            })
            .await?;
    }
    Ok(user_id)
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Malformed credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["login"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|error| Error::invalid_request(error.to_string()))?;
    let user_id = establish_identity(&state, &credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Redirect according to login state.
///
/// Logged-in callers go straight to the destination; anonymous callers are
/// sent to the login form with the destination preserved. Only site-relative
/// destinations are accepted.
#[utoipa::path(
    get,
    path = "/login",
    params(LoginRedirectQuery),
    responses(
        (status = 302, description = "Redirect to destination or login form"),
        (status = 400, description = "Destination is not site-relative", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["login"],
    operation_id = "loginRedirect",
    security([])
)]
#[get("/login")]
pub async fn login_redirect(
    session: SessionContext,
    query: web::Query<LoginRedirectQuery>,
) -> ApiResult<HttpResponse> {
    let destination = query
        .into_inner()
        .destination_url
        .unwrap_or_else(|| "/".to_owned());
    if !destination.starts_with('/') || destination.starts_with("//") {
        return Err(Error::invalid_request(
            "destination-url must be a site-relative path",
        ));
    }

    let target = if session.user_id()?.is_some() {
        destination
    } else {
        let encoded: String = url::form_urlencoded::byte_serialize(destination.as_bytes()).collect();
        format!("{LOGIN_FORM_PATH}?destination-url={encoded}")
    };

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, target))
        .finish())
}

/// Drop the session and bounce to the site root.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared; redirect to /")
    ),
    tags = ["login"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
