//! Router Composition
//!
//! Mounts the auth, portfolio and contact routers under `/api`, the admin
//! page placeholders, and the health check, with the admin page guard over
//! everything.

use auth::domain::repository::AdminRepository;
use auth::{AuthAppState, auth_router_with_state, guard_admin_pages, require_admin_api};
use axum::extract::State;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use kernel::error::app_error::AppError;
use portfolio::domain::repository::{
    AvailabilityRepository, ContactRepository, MailRelay, ProjectRepository,
};
use portfolio::{contact_router, portfolio_router_generic};
use serde_json::json;
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::pages;

/// Build the full application router
pub fn build_router<A, P, M>(
    auth_state: AuthAppState<A>,
    portfolio_repo: P,
    mail: M,
    pool: PgPool,
) -> Router
where
    A: AdminRepository + Clone + Send + Sync + 'static,
    P: ProjectRepository
        + AvailabilityRepository
        + ContactRepository
        + Clone
        + Send
        + Sync
        + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    let guard = auth_state.guard_state();
    let admin_api_guard = from_fn_with_state(guard.clone(), require_admin_api);

    let api = Router::new()
        .nest("/auth", auth_router_with_state(auth_state))
        .merge(portfolio_router_generic(portfolio_repo.clone(), admin_api_guard))
        .merge(contact_router(portfolio_repo, mail))
        .route("/health", get(health).with_state(pool));

    Router::new()
        .nest("/api", api)
        .route("/admin/login", get(pages::admin_login))
        .route("/admin", get(pages::admin_page))
        .route("/admin/{*rest}", get(pages::admin_page))
        .layer(from_fn_with_state(guard, guard_admin_pages))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the frontend origins; credentials are allowed so the session
/// cookie travels with cross-origin API calls.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}

/// GET /api/health
async fn health(State(pool): State<PgPool>) -> Response {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            AppError::service_unavailable("Database unavailable").into_response()
        }
    }
}
