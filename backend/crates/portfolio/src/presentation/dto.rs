//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::application::{ContactInput, CreateProjectInput, UpdateProjectInput};
use crate::domain::entities::Project;
use crate::domain::value_objects::{AvailabilityStatus, LocalizedText};

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image: String,
    pub technologies: Vec<String>,
    pub categories: Vec<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(project: Project) -> Self {
        Self {
            id: project.project_id.to_string(),
            title: project.title,
            description: project.description,
            image: project.image,
            technologies: project.technologies,
            categories: project.categories,
            link: project.link,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResponse {
    pub member: Vec<ProjectDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub link: Option<String>,
}

impl From<CreateProjectRequest> for CreateProjectInput {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image: req.image,
            technologies: req.technologies,
            categories: req.categories,
            link: req.link,
        }
    }
}

/// Partial update; `"link": null` removes the link while an absent
/// `link` keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub link: Option<Option<String>>,
}

impl From<UpdateProjectRequest> for UpdateProjectInput {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            image: req.image,
            technologies: req.technologies,
            categories: req.categories,
            link: req.link,
        }
    }
}

/// Wraps any present value, null included, in `Some`
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ============================================================================
// Availability
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub status: AvailabilityStatus,
}

/// Kept as text so that unknown values get a domain error, not a body
/// rejection
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAvailabilityResponse {
    pub message: String,
    pub status: AvailabilityStatus,
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<ContactRequest> for ContactInput {
    fn from(req: ContactRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            subject: req.subject,
            message: req.message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_link() {
        let absent: UpdateProjectRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.link, None);

        let null: UpdateProjectRequest = serde_json::from_str(r#"{"link":null}"#).unwrap();
        assert_eq!(null.link, Some(None));

        let set: UpdateProjectRequest =
            serde_json::from_str(r#"{"link":"https://example.com"}"#).unwrap();
        assert_eq!(set.link, Some(Some("https://example.com".to_string())));
    }

    #[test]
    fn test_create_request_accepts_partial_body() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"title":{"fr":"Titre","en":"Title"}}"#).unwrap();
        assert!(req.title.is_some());
        assert!(req.technologies.is_none());
    }

    #[test]
    fn test_project_dto_shape() {
        let project = Project::new(crate::domain::entities::NewProject {
            title: LocalizedText::new("Titre", "Title"),
            description: LocalizedText::new("Desc", "Desc"),
            image: "/img.png".to_string(),
            technologies: vec!["Rust".to_string()],
            categories: vec![],
            link: None,
        });
        let id = project.project_id.to_string();

        let body = serde_json::to_value(ProjectDto::from(project)).unwrap();

        assert_eq!(body["id"], id);
        assert_eq!(body["title"]["en"], "Title");
        assert_eq!(body["link"], serde_json::Value::Null);
        assert!(body.get("createdAt").is_some());
    }
}
