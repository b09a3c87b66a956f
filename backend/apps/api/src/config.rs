//! Environment Configuration
//!
//! Read once at startup. Secrets never appear in `Debug` output.

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::client::TrustedProxies;
use portfolio::SmtpSettings;
use portfolio::infra::mail::DEFAULT_SMTP_PORT;

/// Minimum accepted `JWT_SECRET` length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:4321,http://127.0.0.1:4321";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Debug builds default to development, release builds to production
    pub fn build_default() -> Self {
        if cfg!(debug_assertions) {
            AppEnv::Development
        } else {
            AppEnv::Production
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }
}

impl FromStr for AppEnv {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(AppEnv::Production),
            "development" | "dev" => Ok(AppEnv::Development),
            other => bail!("APP_ENV must be production or development, got {other:?}"),
        }
    }
}

#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub app_env: AppEnv,
    /// `None` only in development, where a per-process secret is used
    pub jwt_secret: Option<Vec<u8>>,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub database_max_connections: u32,
    /// Peers whose `X-Forwarded-For` is believed; empty means none
    pub trusted_proxies: TrustedProxies,
    /// `None` leaves contact notifications to the log
    pub mail: Option<SmtpSettings>,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:3000")?;

        let app_env = match var("APP_ENV") {
            Some(raw) => raw.parse()?,
            None => AppEnv::build_default(),
        };

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                bail!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes")
            }
            Some(secret) => Some(secret.into_bytes()),
            None if app_env.is_production() => bail!("JWT_SECRET must be set in production"),
            None => None,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let trusted_proxies = match var("TRUSTED_PROXIES") {
            Some(raw) => parse_trusted_proxies(&raw)?,
            None => TrustedProxies::default(),
        };

        Ok(Self {
            database_url,
            bind_addr,
            app_env,
            jwt_secret,
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_origins,
            database_max_connections,
            trusted_proxies,
            mail: smtp_settings()?,
        })
    }

    /// Auth settings derived from this environment.
    ///
    /// Cookies are `Secure` exactly in production.
    pub fn auth_config(&self) -> AuthConfig {
        let mut config = match &self.jwt_secret {
            Some(secret) => AuthConfig::with_secret(secret.clone()),
            None => {
                tracing::warn!(
                    "JWT_SECRET not set; using a random per-process secret, sessions end on restart"
                );
                AuthConfig::default()
            }
        };
        config.cookie_secure = self.app_env.is_production();
        config.password_pepper = self.password_pepper.clone();
        config.trusted_proxies = self.trusted_proxies.clone();
        config
    }
}

/// Comma-separated proxy addresses
fn parse_trusted_proxies(raw: &str) -> anyhow::Result<TrustedProxies> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpAddr>()
                .with_context(|| format!("TRUSTED_PROXIES entry {entry:?} is not an IP address"))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map(TrustedProxies::new)
}

/// SMTP relay settings, present only when `SMTP_HOST` is set
fn smtp_settings() -> anyhow::Result<Option<SmtpSettings>> {
    let Some(host) = var("SMTP_HOST") else {
        return Ok(None);
    };

    let port = match var("SMTP_PORT") {
        Some(raw) => raw.parse().context("SMTP_PORT must be a port number")?,
        None => DEFAULT_SMTP_PORT,
    };

    Ok(Some(SmtpSettings {
        host,
        port,
        username: var("SMTP_USERNAME"),
        password: var("SMTP_PASSWORD"),
        from: var("MAILER_FROM").context("MAILER_FROM must be set when SMTP_HOST is")?,
        to: var("MAILER_TO").context("MAILER_TO must be set when SMTP_HOST is")?,
    }))
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("database_url", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("app_env", &self.app_env)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("frontend_origins", &self.frontend_origins)
            .field("database_max_connections", &self.database_max_connections)
            .field("trusted_proxies", &self.trusted_proxies)
            .field("mail", &self.mail)
            .finish()
    }
}
