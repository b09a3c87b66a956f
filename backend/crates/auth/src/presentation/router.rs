//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::infra::postgres::PgAdminRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAdminRepository, config: AuthConfig) -> Router {
    auth_router_with_state(AuthAppState::new(repo, config))
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    auth_router_with_state(AuthAppState::new(repo, config))
}

/// Create the Auth router from prepared state.
///
/// Use this when the guards must share the state's token keys.
pub fn auth_router_with_state<R>(state: AuthAppState<R>) -> Router
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .with_state(state)
}
