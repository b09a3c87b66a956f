//! Portfolio Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Project, availability and contact entities, repository and
//!   mail relay traits
//! - `application/` - Project CRUD, availability and contact use cases
//! - `infra/` - PostgreSQL and in-memory repositories, SMTP relay
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! Listing projects, reading the availability status and sending a contact
//! message are public. Every other write goes through the admin guard layer
//! handed to the router.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use domain::value_objects::{AvailabilityStatus, EmailAddress, LocalizedText};
pub use error::{PortfolioError, PortfolioResult};
pub use infra::{
    ConfiguredMailRelay, InMemoryPortfolioRepository, LoggingMailRelay, PgPortfolioRepository,
    SmtpMailRelay, SmtpSettings,
};
pub use presentation::{
    ContactAppState, PortfolioAppState, contact_router, portfolio_router,
    portfolio_router_generic,
};
