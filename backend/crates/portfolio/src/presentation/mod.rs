//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{ContactAppState, PortfolioAppState};
pub use router::{contact_router, portfolio_router, portfolio_router_generic};
