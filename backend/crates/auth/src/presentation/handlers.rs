//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::net::SocketAddr;
use std::sync::Arc;

use platform::client::client_key;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};
use platform::rate_limit::InMemoryRateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, LoginInput, LoginUseCase, SessionCheck, TokenService,
};
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, SessionStatusResponse};
use crate::presentation::middleware::GuardState;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
    pub limiter: Arc<InMemoryRateLimitStore>,
}

impl<R> AuthAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenService::from_config(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            limiter: Arc::new(InMemoryRateLimitStore::new()),
        }
    }

    /// State for the route guards, sharing this state's config and keys
    pub fn guard_state(&self) -> GuardState {
        GuardState {
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected login body");
        AuthError::BadRequest("Username and password are required".to_string())
    })?;

    let peer_ip = connect_info.map(|Extension(ConnectInfo(addr))| addr.ip());

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.limiter.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
            client_key: client_key(&headers, peer_ip, &state.config.trusted_proxies),
        })
        .await?;

    let cookie = set_cookie_header(&state.config.cookie_config(), &output.token)
        .map_err(|e| AuthError::Internal(format!("Session cookie: {e}")))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            success: true,
            message: "Signed in".to_string(),
            username: output.admin_name,
            expires_at: output.expires_at,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Tokens are stateless, so this only tells the browser to drop the cookie.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> AuthResult<impl IntoResponse>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let cookie = delete_cookie_header(&state.config.cookie_config())
        .map_err(|e| AuthError::Internal(format!("Session cookie: {e}")))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.cookie_name);
    let check = CheckSessionUseCase::new(state.tokens.clone()).execute(token.as_deref());

    match check {
        SessionCheck::Valid(verified) => Json(SessionStatusResponse {
            authenticated: true,
            username: Some(verified.admin_name),
            expires_at: Some(verified.expires_at),
        }),
        SessionCheck::NoToken | SessionCheck::Invalid(_) => Json(SessionStatusResponse {
            authenticated: false,
            username: None,
            expires_at: None,
        }),
    }
}
