//! Check Session Use Case
//!
//! Classifies the session cookie of a request. Shared by the page guard,
//! the API guard and the session status endpoint.

use std::sync::Arc;

use crate::application::token::{TokenError, TokenService, VerifiedToken};

/// Outcome of checking a request's session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    /// No cookie (or an empty one)
    NoToken,
    /// Cookie present but rejected; it should be cleared
    Invalid(TokenError),
    Valid(VerifiedToken),
}

impl SessionCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionCheck::Valid(_))
    }
}

pub struct CheckSessionUseCase {
    tokens: Arc<TokenService>,
}

impl CheckSessionUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, token: Option<&str>) -> SessionCheck {
        match token {
            None => SessionCheck::NoToken,
            Some(token) => match self.tokens.verify(token) {
                Ok(verified) => SessionCheck::Valid(verified),
                Err(e) => SessionCheck::Invalid(e),
            },
        }
    }
}
