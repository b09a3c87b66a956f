//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin credential entity, value objects, repository trait
//! - `application/` - Token service, login, session check, admin management
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, route guards
//!
//! ## Features
//! - Admin sign-in with username + password
//! - Stateless HS256 session tokens carried in an HTTP-only cookie
//! - Page guard (redirect to login) and API guard (401) over that cookie
//! - Per-client login throttling
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown names and wrong passwords are answered identically, after
//!   the same amount of hashing work
//! - Tokens expire 24h after issue; rotating the signing secret revokes all

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAdminRepository, PgAdminRepository};
pub use presentation::{
    AuthAppState, GuardState, auth_router, auth_router_generic, auth_router_with_state,
    guard_admin_pages, require_admin_api,
};
