//! Project Use Cases
//!
//! Listing is public; create, update and delete are reached only through
//! the admin API guard.

use std::sync::Arc;

use kernel::id::ProjectId;

use crate::domain::entities::{NewProject, Project, ProjectPatch};
use crate::domain::repository::ProjectRepository;
use crate::domain::value_objects::LocalizedText;
use crate::error::{PortfolioError, PortfolioResult};

/// Unvalidated create input, as received
#[derive(Debug, Clone, Default)]
pub struct CreateProjectInput {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub link: Option<String>,
}

impl CreateProjectInput {
    /// Title, description, technologies and image are required; an empty
    /// string or an all-blank translation counts as missing.
    pub fn validate(self) -> PortfolioResult<NewProject> {
        let title = self.title.filter(|t| !t.is_blank());
        let description = self.description.filter(|d| !d.is_blank());
        let image = non_empty(self.image);
        let technologies = self.technologies.map(clean_tags);

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title");
        }
        if description.is_none() {
            missing.push("description");
        }
        if technologies.is_none() {
            missing.push("technologies");
        }
        if image.is_none() {
            missing.push("image");
        }

        match (title, description, technologies, image) {
            (Some(title), Some(description), Some(technologies), Some(image)) => Ok(NewProject {
                title,
                description,
                image,
                technologies,
                categories: self.categories.map(clean_tags).unwrap_or_default(),
                link: non_empty(self.link),
            }),
            _ => Err(PortfolioError::MissingFields(missing)),
        }
    }
}

/// Unvalidated update input. Empty values leave the field unchanged,
/// except `link`, where an explicit null or empty string removes it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectInput {
    pub title: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub link: Option<Option<String>>,
}

impl UpdateProjectInput {
    pub fn into_patch(self) -> ProjectPatch {
        ProjectPatch {
            title: self.title.filter(|t| !t.is_blank()),
            description: self.description.filter(|d| !d.is_blank()),
            image: non_empty(self.image),
            technologies: self.technologies.map(clean_tags),
            categories: self.categories.map(clean_tags),
            link: self.link.map(non_empty),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub struct ProjectUseCase<R>
where
    R: ProjectRepository,
{
    repo: Arc<R>,
}

impl<R> ProjectUseCase<R>
where
    R: ProjectRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> PortfolioResult<Vec<Project>> {
        self.repo.list().await
    }

    pub async fn create(&self, input: CreateProjectInput) -> PortfolioResult<Project> {
        let project = Project::new(input.validate()?);
        self.repo.create(&project).await?;

        tracing::info!(project_id = %project.project_id, "Project created");
        Ok(project)
    }

    pub async fn update(
        &self,
        project_id: &ProjectId,
        input: UpdateProjectInput,
    ) -> PortfolioResult<Project> {
        let mut project = self
            .repo
            .find_by_id(project_id)
            .await?
            .ok_or(PortfolioError::ProjectNotFound)?;

        project.apply(input.into_patch());

        if !self.repo.update(&project).await? {
            return Err(PortfolioError::ProjectNotFound);
        }

        tracing::info!(project_id = %project.project_id, "Project updated");
        Ok(project)
    }

    pub async fn delete(&self, project_id: &ProjectId) -> PortfolioResult<()> {
        if !self.repo.delete(project_id).await? {
            return Err(PortfolioError::ProjectNotFound);
        }

        tracing::info!(project_id = %project_id, "Project deleted");
        Ok(())
    }
}
