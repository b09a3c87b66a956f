//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shared by every credential failure
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed request input
    #[error("{0}")]
    BadRequest(String),

    /// Unknown admin name or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No valid session token
    #[error("Authentication required")]
    Unauthenticated,

    /// Login throttled for this client
    #[error("Too many login attempts")]
    TooManyAttempts { retry_after_secs: u64 },

    /// Admin name already exists
    #[error("Admin name already exists")]
    AdminNameTaken,

    /// Bootstrap refused because an admin is already configured
    #[error("An admin account already exists")]
    AdminAlreadyExists,

    /// New password rejected by the policy
    #[error("{0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Token could not be verified or signed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::BadRequest(_) | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::TooManyAttempts { .. } => ErrorKind::TooManyRequests,
            AuthError::AdminNameTaken | AuthError::AdminAlreadyExists => ErrorKind::Conflict,
            AuthError::Token(TokenError::Signing(_)) => ErrorKind::InternalServerError,
            AuthError::Token(_) => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError.
    ///
    /// Server-side failures get a generic message; their detail only goes
    /// to the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidCredentials => AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE),
            AuthError::Unauthenticated
            | AuthError::Token(TokenError::Expired)
            | AuthError::Token(TokenError::InvalidSignature) => {
                AppError::unauthorized("Authentication required")
                    .with_action("Please sign in again")
            }
            AuthError::TooManyAttempts { .. } => {
                AppError::too_many_requests("Too many login attempts")
                    .with_action("Please wait before trying again")
            }
            _ if self.kind().is_server_error() => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Token(TokenError::Signing(msg)) => {
                tracing::error!(message = %msg, "Token signing failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TooManyAttempts { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Login attempts throttled");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let retry_after = match &self {
            AuthError::TooManyAttempts { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        };

        let mut response = self.to_app_error().into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, secs.into());
        }
        response
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
