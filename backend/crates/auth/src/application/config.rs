//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only for the lifetime of the process.

use std::fmt;
use std::time::Duration;

use platform::client::TrustedProxies;
use platform::cookie::CookieConfig;
use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// HMAC-SHA256 signing secret for session tokens
    pub jwt_secret: Vec<u8>,
    /// Token lifetime, also used as cookie Max-Age
    pub token_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Where the page guard sends unauthenticated visitors
    pub login_path: String,
    /// Page prefix guarded by the session cookie
    pub protected_prefix: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Per-client login attempt budget
    pub login_rate_limit: RateLimitConfig,
    /// Reverse proxies allowed to report the client address
    pub trusted_proxies: TrustedProxies,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "admin_token".to_string(),
            jwt_secret: platform::crypto::random_secret(),
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            login_path: "/admin/login".to_string(),
            protected_prefix: "/admin".to_string(),
            password_pepper: None,
            login_rate_limit: RateLimitConfig::default(),
            trusted_proxies: TrustedProxies::default(),
        }
    }
}

impl AuthConfig {
    /// Production config signed with the given secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie, random secret)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Session cookie attributes
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::session(
                self.cookie_name.clone(),
                self.token_ttl.as_secs(),
                self.cookie_secure,
            )
        }
    }

    /// Whether the page guard applies to `path`.
    ///
    /// The prefix itself and everything below it, except the login page.
    pub fn is_protected_path(&self, path: &str) -> bool {
        if path == self.login_path {
            return false;
        }

        let prefix = self.protected_prefix.trim_end_matches('/');
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie_name", &self.cookie_name)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("login_path", &self.login_path)
            .field("protected_prefix", &self.protected_prefix)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("login_rate_limit", &self.login_rate_limit)
            .field("trusted_proxies", &self.trusted_proxies)
            .finish()
    }
}
