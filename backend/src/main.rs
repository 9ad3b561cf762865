//! Backend entry-point: wires the comment, user-info, login, and health
//! endpoints behind cookie sessions and request tracing.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use mockable::DefaultEnv;
use std::env;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use portfolio_backend::Trace;
use portfolio_backend::config::ServerSettings;
#[cfg(debug_assertions)]
use portfolio_backend::doc::ApiDoc;
use portfolio_backend::inbound::http::comments::{list_comments, post_comment};
use portfolio_backend::inbound::http::health::{HealthState, live, ready};
use portfolio_backend::inbound::http::login::{login, login_redirect, logout};
use portfolio_backend::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings_from_env,
};
use portfolio_backend::inbound::http::state::HttpState;
use portfolio_backend::inbound::http::users::{delete_user_info, get_user_info, upsert_user_info};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
    } = session_settings_from_env(&DefaultEnv, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(HttpState::in_memory());
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness flip below still works.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
            same_site,
        )
    })
    .bind((settings.bind_addr(), settings.port()))?;

    health_state.mark_ready();
    server.run().await
}

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    #[allow(unused_mut)]
    let mut app = App::new()
        .app_data(state)
        .app_data(health_state)
        .wrap(session)
        .wrap(Trace)
        .service(list_comments)
        .service(post_comment)
        .service(get_user_info)
        .service(upsert_user_info)
        .service(delete_user_info)
        .service(login)
        .service(login_redirect)
        .service(logout)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
