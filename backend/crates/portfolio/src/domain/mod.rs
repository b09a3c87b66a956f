//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Project, AvailabilityRecord, ContactMessage)
//! - Domain value objects (LocalizedText, AvailabilityStatus, EmailAddress)
//! - Repository and mail relay traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
