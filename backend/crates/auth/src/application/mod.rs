//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod login;
pub mod manage_admin;
pub mod token;

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionCheck};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use manage_admin::{ManageAdminUseCase, PasswordChange};
pub use token::{TokenError, TokenService, VerifiedToken};
