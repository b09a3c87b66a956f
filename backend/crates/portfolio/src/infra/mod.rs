//! Infrastructure Layer
//!
//! Database implementations and contact mail relays.

pub mod mail;
pub mod memory;
pub mod postgres;

pub use mail::{ConfiguredMailRelay, LoggingMailRelay, SmtpMailRelay, SmtpSettings};
pub use memory::InMemoryPortfolioRepository;
pub use postgres::PgPortfolioRepository;
