//! Login Use Case
//!
//! Checks admin credentials and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, verify_dummy};
use platform::rate_limit::RateLimitStore;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_name::AdminName;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Throttling key (client IP)
    pub client_key: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub admin_name: String,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<R, L>
where
    R: AdminRepository,
    L: RateLimitStore,
{
    admin_repo: Arc<R>,
    limiter: Arc<L>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<R, L> LoginUseCase<R, L>
where
    R: AdminRepository,
    L: RateLimitStore,
{
    pub fn new(
        admin_repo: Arc<R>,
        limiter: Arc<L>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            admin_repo,
            limiter,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Shape checks come first and don't spend the attempt budget
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::BadRequest(
                "Username and password are required".to_string(),
            ));
        }
        let password = ClearTextPassword::for_verification(input.password)
            .map_err(|_| AuthError::BadRequest("Username and password are required".to_string()))?;

        let budget = self
            .limiter
            .check_and_increment(&input.client_key, &self.config.login_rate_limit)
            .await;
        if !budget.allowed {
            return Err(AuthError::TooManyAttempts {
                retry_after_secs: budget.retry_after.as_secs().max(1),
            });
        }

        // A name that can't exist is treated exactly like an unknown one
        let admin = match AdminName::new(&input.username) {
            Ok(name) => self.admin_repo.find_by_name(&name).await?,
            Err(_) => None,
        };

        let Some(admin) = admin else {
            verify_dummy(&password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !admin.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(&admin.admin_id, admin.admin_name.as_str())?;

        self.limiter.reset(&input.client_key).await;

        tracing::info!(
            admin_id = %admin.admin_id,
            admin_name = %admin.admin_name,
            "Admin signed in"
        );

        Ok(LoginOutput {
            token: issued.token,
            admin_name: admin.admin_name.to_string(),
            expires_at: issued.expires_at,
        })
    }
}
