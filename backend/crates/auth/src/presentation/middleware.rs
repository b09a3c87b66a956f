//! Auth Middleware
//!
//! Two guards over the same session cookie:
//! - [`guard_admin_pages`] for browser pages, answers with a redirect to the
//!   login page
//! - [`require_admin_api`] for JSON endpoints, answers 401
//!
//! Both clear a cookie that is present but no longer verifies. Neither
//! touches the request on success.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use platform::cookie::{delete_cookie_header, extract_cookie};

use crate::application::config::AuthConfig;
use crate::application::{CheckSessionUseCase, SessionCheck, TokenService};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct GuardState {
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl GuardState {
    fn check(&self, req: &Request) -> SessionCheck {
        let token = extract_cookie(req.headers(), &self.config.cookie_name);
        CheckSessionUseCase::new(self.tokens.clone()).execute(token.as_deref())
    }

    fn clear_cookie(&self, response: &mut Response) {
        match delete_cookie_header(&self.config.cookie_config()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Cookie name is not a valid header value"),
        }
    }
}

/// Page guard for everything under the protected prefix except the login
/// page. Apply it to the whole app; other paths pass straight through.
pub async fn guard_admin_pages(
    State(state): State<GuardState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.config.is_protected_path(req.uri().path()) {
        return next.run(req).await;
    }

    match state.check(&req) {
        SessionCheck::Valid(_) => next.run(req).await,
        SessionCheck::NoToken => {
            tracing::debug!(path = %req.uri().path(), "No session, redirecting to login");
            Redirect::temporary(&state.config.login_path).into_response()
        }
        SessionCheck::Invalid(reason) => {
            tracing::info!(
                path = %req.uri().path(),
                reason = %reason,
                "Rejected session, redirecting to login"
            );
            let mut response = Redirect::temporary(&state.config.login_path).into_response();
            state.clear_cookie(&mut response);
            response
        }
    }
}

/// API guard: 401 JSON instead of a redirect
pub async fn require_admin_api(
    State(state): State<GuardState>,
    req: Request,
    next: Next,
) -> Response {
    match state.check(&req) {
        SessionCheck::Valid(_) => next.run(req).await,
        SessionCheck::NoToken => AuthError::Unauthenticated.into_response(),
        SessionCheck::Invalid(reason) => {
            let mut response = AuthError::Token(reason).into_response();
            state.clear_cookie(&mut response);
            response
        }
    }
}
