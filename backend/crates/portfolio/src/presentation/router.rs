//! Portfolio Router
//!
//! Reads and the contact form are public. Writes run behind the admin guard
//! layer supplied by the caller, so this crate does not depend on how admins
//! authenticate.

use std::convert::Infallible;

use axum::Router;
use axum::extract::Request;
use axum::response::IntoResponse;
use axum::routing::{Route, delete, get, post, put};
use tower::{Layer, Service};

use crate::domain::repository::{
    AvailabilityRepository, ContactRepository, MailRelay, ProjectRepository,
};
use crate::infra::postgres::PgPortfolioRepository;
use crate::presentation::handlers::{self, ContactAppState, PortfolioAppState};

/// Create the Portfolio router with PostgreSQL repository
pub fn portfolio_router<L>(repo: PgPortfolioRepository, admin_guard: L) -> Router
where
    L: Layer<Route> + Clone + Send + Sync + 'static,
    L::Service: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
    <L::Service as Service<Request>>::Response: IntoResponse + 'static,
    <L::Service as Service<Request>>::Future: Send + 'static,
{
    portfolio_router_generic(repo, admin_guard)
}

/// Create a generic Portfolio router for any repository implementation
pub fn portfolio_router_generic<R, L>(repo: R, admin_guard: L) -> Router
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
    L: Layer<Route> + Clone + Send + Sync + 'static,
    L::Service: Service<Request, Error = Infallible> + Clone + Send + Sync + 'static,
    <L::Service as Service<Request>>::Response: IntoResponse + 'static,
    <L::Service as Service<Request>>::Future: Send + 'static,
{
    let state = PortfolioAppState::new(repo);

    Router::new()
        .route(
            "/projects",
            get(handlers::list_projects::<R>)
                .merge(post(handlers::create_project::<R>).route_layer(admin_guard.clone())),
        )
        .route(
            "/projects/{id}",
            put(handlers::update_project::<R>)
                .delete(handlers::delete_project::<R>)
                .route_layer(admin_guard.clone()),
        )
        .route(
            "/availability",
            get(handlers::get_availability::<R>)
                .merge(put(handlers::update_availability::<R>).route_layer(admin_guard)),
        )
        .with_state(state)
}

/// Public contact form endpoint
pub fn contact_router<R, M>(repo: R, mail: M) -> Router
where
    R: ContactRepository + Send + Sync + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    Router::new()
        .route("/contact", post(handlers::submit_contact::<R, M>))
        .with_state(ContactAppState::new(repo, mail))
}
