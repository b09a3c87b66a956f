//! Portfolio Error Types
//!
//! Portfolio-specific error variants that render through the unified
//! `kernel::error::AppError` body.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Portfolio-specific result type alias
pub type PortfolioResult<T> = Result<T, PortfolioError>;

#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Required project fields absent or empty
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Body could not be parsed
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid status. Must be: available, partially, or unavailable")]
    InvalidStatus,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Invalid email format")]
    InvalidEmail,

    /// Contact form field over its length limit
    #[error("Field too long: {0}")]
    FieldTooLong(&'static str),

    /// Notification mail could not be handed to the relay
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortfolioError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortfolioError::MissingFields(_)
            | PortfolioError::BadRequest(_)
            | PortfolioError::InvalidStatus
            | PortfolioError::InvalidEmail
            | PortfolioError::FieldTooLong(_) => ErrorKind::BadRequest,
            PortfolioError::ProjectNotFound => ErrorKind::NotFound,
            PortfolioError::Database(_)
            | PortfolioError::MailDelivery(_)
            | PortfolioError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            AppError::internal("Internal server error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PortfolioError::Database(e) => {
                tracing::error!(error = %e, "Portfolio database error");
            }
            PortfolioError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Contact mail delivery failed");
            }
            PortfolioError::Internal(msg) => {
                tracing::error!(message = %msg, "Portfolio internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Portfolio request rejected");
            }
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
