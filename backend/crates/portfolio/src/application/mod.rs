//! Application Layer - Use Cases

pub mod availability;
pub mod contact;
pub mod projects;

pub use availability::AvailabilityUseCase;
pub use contact::{ContactInput, ContactUseCase};
pub use projects::{CreateProjectInput, ProjectUseCase, UpdateProjectInput};
