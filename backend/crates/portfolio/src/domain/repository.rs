//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::ProjectId;

use crate::domain::entities::{AvailabilityRecord, ContactMessage, Project};
use crate::error::PortfolioResult;

/// Project repository trait
#[trait_variant::make(ProjectRepository: Send)]
pub trait LocalProjectRepository {
    /// All projects, newest first
    async fn list(&self) -> PortfolioResult<Vec<Project>>;

    async fn find_by_id(&self, project_id: &ProjectId) -> PortfolioResult<Option<Project>>;

    async fn create(&self, project: &Project) -> PortfolioResult<()>;

    /// Overwrite a stored project. Returns false if it no longer exists.
    async fn update(&self, project: &Project) -> PortfolioResult<bool>;

    /// Returns false if nothing was deleted
    async fn delete(&self, project_id: &ProjectId) -> PortfolioResult<bool>;
}

/// Availability history repository trait
#[trait_variant::make(AvailabilityRepository: Send)]
pub trait LocalAvailabilityRepository {
    /// Most recent record, if any
    async fn latest(&self) -> PortfolioResult<Option<AvailabilityRecord>>;

    async fn append(&self, record: &AvailabilityRecord) -> PortfolioResult<()>;
}

/// Contact form inbox
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    async fn save(&self, message: &ContactMessage) -> PortfolioResult<()>;
}

/// Outbound notification of a new contact message
#[trait_variant::make(MailRelay: Send)]
pub trait LocalMailRelay {
    async fn relay(&self, message: &ContactMessage) -> PortfolioResult<()>;
}
