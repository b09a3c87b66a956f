//! Shared Kernel - Domain-crossing minimal core
//!
//! The smallest vocabulary shared by every backend crate:
//! - the unified error type and its HTTP rendering
//! - typed record identifiers
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
