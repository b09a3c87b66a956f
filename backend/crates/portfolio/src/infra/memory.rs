//! In-Memory Repository
//!
//! Process-local portfolio and contact store for tests and database-less
//! runs.

use std::sync::Arc;

use kernel::id::ProjectId;
use tokio::sync::RwLock;

use crate::domain::entities::{AvailabilityRecord, ContactMessage, Project};
use crate::domain::repository::{AvailabilityRepository, ContactRepository, ProjectRepository};
use crate::error::PortfolioResult;

#[derive(Default)]
struct Store {
    /// Insertion order
    projects: Vec<Project>,
    availability: Vec<AvailabilityRecord>,
    contact_messages: Vec<ContactMessage>,
}

#[derive(Clone, Default)]
pub struct InMemoryPortfolioRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored contact messages, oldest first
    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        self.store.read().await.contact_messages.clone()
    }
}

impl ProjectRepository for InMemoryPortfolioRepository {
    async fn list(&self) -> PortfolioResult<Vec<Project>> {
        let store = self.store.read().await;
        // Later inserts win ties on created_at
        let mut projects: Vec<Project> = store.projects.iter().rev().cloned().collect();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    async fn find_by_id(&self, project_id: &ProjectId) -> PortfolioResult<Option<Project>> {
        let store = self.store.read().await;
        Ok(store
            .projects
            .iter()
            .find(|p| &p.project_id == project_id)
            .cloned())
    }

    async fn create(&self, project: &Project) -> PortfolioResult<()> {
        self.store.write().await.projects.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> PortfolioResult<bool> {
        let mut store = self.store.write().await;
        match store
            .projects
            .iter_mut()
            .find(|p| p.project_id == project.project_id)
        {
            Some(stored) => {
                *stored = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, project_id: &ProjectId) -> PortfolioResult<bool> {
        let mut store = self.store.write().await;
        let before = store.projects.len();
        store.projects.retain(|p| &p.project_id != project_id);
        Ok(store.projects.len() != before)
    }
}

impl AvailabilityRepository for InMemoryPortfolioRepository {
    async fn latest(&self) -> PortfolioResult<Option<AvailabilityRecord>> {
        Ok(self.store.read().await.availability.last().cloned())
    }

    async fn append(&self, record: &AvailabilityRecord) -> PortfolioResult<()> {
        self.store.write().await.availability.push(record.clone());
        Ok(())
    }
}

impl ContactRepository for InMemoryPortfolioRepository {
    async fn save(&self, message: &ContactMessage) -> PortfolioResult<()> {
        self.store
            .write()
            .await
            .contact_messages
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewProject;
    use crate::domain::value_objects::LocalizedText;

    fn project(title: &str) -> Project {
        Project::new(NewProject {
            title: LocalizedText::new(title, title),
            description: LocalizedText::new("d", "d"),
            image: "/img.png".to_string(),
            technologies: vec![],
            categories: vec![],
            link: None,
        })
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryPortfolioRepository::new();
        repo.create(&project("first")).await.unwrap();
        repo.create(&project("second")).await.unwrap();

        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title.en)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryPortfolioRepository::new();
        let ghost = project("ghost");

        assert!(!repo.update(&ghost).await.unwrap());
        assert!(!repo.delete(&ghost.project_id).await.unwrap());
    }
}
