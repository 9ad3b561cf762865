//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: the
//! comment, user-info, login, and health endpoints plus their shared schemas.
//! Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{CommentText, CommentView, DisplayName, Error, ErrorCode, UserId, UserProfile};
use crate::inbound::http::login::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Portfolio backend API",
        description = "Guestbook comments, user profiles, and session login for the portfolio site."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::post_comment,
        crate::inbound::http::users::get_user_info,
        crate::inbound::http::users::upsert_user_info,
        crate::inbound::http::users::delete_user_info,
        crate::inbound::http::login::login,
        crate::inbound::http::login::login_redirect,
        crate::inbound::http::login::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CommentText,
        CommentView,
        DisplayName,
        UserId,
        UserProfile,
        LoginRequest,
    )),
    tags(
        (name = "comments", description = "Guestbook comments"),
        (name = "users", description = "User profiles"),
        (name = "login", description = "Session management"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
