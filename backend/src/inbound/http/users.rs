//! User-profile endpoints.
//!
//! ```text
//! GET    /userInfo[?user-id=…]             -> profile JSON
//! POST   /userInfo (displayName, email)    -> create or update own profile
//! DELETE /userInfo                         -> remove own profile
//! ```

use actix_web::{HttpResponse, delete, get, http::header, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DisplayName, Error, UserId, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /userInfo`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserInfoQuery {
    /// Explicit subject; defaults to the session user.
    #[serde(rename = "user-id")]
    pub user_id: Option<String>,
}

/// Form body for `POST /userInfo`. Field names match the historical page
/// markup; absent fields leave the stored value untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoForm {
    /// Replacement display name.
    pub display_name: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
}

/// Serve the profile of an explicit subject or the session user.
///
/// No explicit subject and no session is 400; a subject with no stored
/// profile is 404. Anonymous clients use the 4xx answer to conclude "not
/// logged in".
#[utoipa::path(
    get,
    path = "/userInfo",
    params(UserInfoQuery),
    responses(
        (status = 200, description = "Profile found", body = UserProfile),
        (status = 400, description = "No subject to look up", body = Error),
        (status = 404, description = "No profile stored", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserInfo",
    security([])
)]
#[get("/userInfo")]
pub async fn get_user_info(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<UserInfoQuery>,
) -> ApiResult<web::Json<UserProfile>> {
    let subject = match query.into_inner().user_id {
        Some(raw) => raw
            .parse::<UserId>()
            .map_err(|_| Error::invalid_request("user-id must be a valid id"))?,
        None => session
            .user_id()?
            .ok_or_else(|| Error::invalid_request("no user-id given and no session"))?,
    };

    let profile = state
        .profiles
        .find_by_id(&subject)
        .await?
        .ok_or_else(|| Error::not_found("no profile for that user"))?;
    Ok(web::Json(profile))
}

/// Create or update the session user's profile.
///
/// On first write the profile is created from the supplied fields; later
/// writes only touch the fields present in the form.
#[utoipa::path(
    post,
    path = "/userInfo",
    responses(
        (status = 303, description = "Profile stored; redirect to /"),
        (status = 400, description = "Invalid profile fields", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "upsertUserInfo"
)]
#[post("/userInfo")]
pub async fn upsert_user_info(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<UserInfoForm>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let form = form.into_inner();

    let updated = match state.profiles.find_by_id(&user_id).await? {
        Some(mut profile) => {
            if let Some(raw) = form.display_name {
                profile.display_name = parse_display_name(raw)?;
            }
            if let Some(email) = form.email {
                profile.email = email;
            }
            profile
        }
        None => UserProfile {
            id: user_id,
            display_name: parse_display_name(form.display_name.ok_or_else(|| {
                Error::invalid_request("displayName is required to create a profile")
            })?)?,
            email: form.email.unwrap_or_default(),
        },
    };
    state.profiles.upsert(updated).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

/// Delete the session user's profile.
#[utoipa::path(
    delete,
    path = "/userInfo",
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 404, description = "No profile stored", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUserInfo"
)]
#[delete("/userInfo")]
pub async fn delete_user_info(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    if state.profiles.delete(&user_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found("no profile to delete"))
    }
}

fn parse_display_name(raw: String) -> Result<DisplayName, Error> {
    DisplayName::new(raw).map_err(|error| Error::invalid_request(error.to_string()))
}
