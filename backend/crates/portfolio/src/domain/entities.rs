//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::ProjectId;
use uuid::Uuid;

use super::value_objects::{AvailabilityStatus, EmailAddress, LocalizedText};

/// A portfolio project card
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: ProjectId,
    pub title: LocalizedText,
    pub description: LocalizedText,
    /// Image URL or public path
    pub image: String,
    pub technologies: Vec<String>,
    pub categories: Vec<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image: String,
    pub technologies: Vec<String>,
    pub categories: Vec<String>,
    pub link: Option<String>,
}

/// Partial update. `None` leaves a field unchanged; for `link`,
/// `Some(None)` removes it.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub link: Option<Option<String>>,
}

impl Project {
    pub fn new(input: NewProject) -> Self {
        let now = Utc::now();
        Self {
            project_id: ProjectId::new(),
            title: input.title,
            description: input.description,
            image: input.image,
            technologies: input.technologies,
            categories: input.categories,
            link: input.link,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(technologies) = patch.technologies {
            self.technologies = technologies;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        self.updated_at = Utc::now();
    }
}

/// One entry in the append-only availability history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub availability_id: Uuid,
    pub status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
}

impl AvailabilityRecord {
    pub fn new(status: AvailabilityStatus) -> Self {
        Self {
            availability_id: Uuid::new_v4(),
            status,
            created_at: Utc::now(),
        }
    }
}

/// A message left through the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub contact_id: Uuid,
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: EmailAddress, subject: String, message: String) -> Self {
        Self {
            contact_id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            created_at: Utc::now(),
        }
    }
}
