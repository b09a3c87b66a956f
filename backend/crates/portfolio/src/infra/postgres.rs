//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::ProjectId;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entities::{AvailabilityRecord, ContactMessage, Project};
use crate::domain::repository::{AvailabilityRepository, ContactRepository, ProjectRepository};
use crate::domain::value_objects::{AvailabilityStatus, LocalizedText};
use crate::error::{PortfolioError, PortfolioResult};

/// PostgreSQL-backed project, availability and contact store
#[derive(Clone)]
pub struct PgPortfolioRepository {
    pool: PgPool,
}

impl PgPortfolioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProjectRepository for PgPortfolioRepository {
    async fn list(&self) -> PortfolioResult<Vec<Project>> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT
                project_id,
                title,
                description,
                image,
                technologies,
                categories,
                link,
                created_at,
                updated_at
            FROM projects
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProjectRow::into_project).collect())
    }

    async fn find_by_id(&self, project_id: &ProjectId) -> PortfolioResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT
                project_id,
                title,
                description,
                image,
                technologies,
                categories,
                link,
                created_at,
                updated_at
            FROM projects
            WHERE project_id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProjectRow::into_project))
    }

    async fn create(&self, project: &Project) -> PortfolioResult<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (
                project_id,
                title,
                description,
                image,
                technologies,
                categories,
                link,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(project.project_id.as_uuid())
        .bind(Json(&project.title))
        .bind(Json(&project.description))
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.categories)
        .bind(project.link.as_deref())
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, project: &Project) -> PortfolioResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET title = $2,
                description = $3,
                image = $4,
                technologies = $5,
                categories = $6,
                link = $7,
                updated_at = $8
            WHERE project_id = $1
            "#,
        )
        .bind(project.project_id.as_uuid())
        .bind(Json(&project.title))
        .bind(Json(&project.description))
        .bind(&project.image)
        .bind(&project.technologies)
        .bind(&project.categories)
        .bind(project.link.as_deref())
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, project_id: &ProjectId) -> PortfolioResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE project_id = $1")
            .bind(project_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl AvailabilityRepository for PgPortfolioRepository {
    async fn latest(&self) -> PortfolioResult<Option<AvailabilityRecord>> {
        let row = sqlx::query_as::<_, AvailabilityRow>(
            r#"
            SELECT availability_id, status, created_at
            FROM availability
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(AvailabilityRow::into_record).transpose()
    }

    async fn append(&self, record: &AvailabilityRecord) -> PortfolioResult<()> {
        sqlx::query(
            r#"
            INSERT INTO availability (availability_id, status, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(record.availability_id)
        .bind(record.status.as_str())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl ContactRepository for PgPortfolioRepository {
    async fn save(&self, message: &ContactMessage) -> PortfolioResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contact_messages (contact_id, name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.contact_id)
        .bind(&message.name)
        .bind(message.email.as_str())
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProjectRow {
    project_id: Uuid,
    title: Json<LocalizedText>,
    description: Json<LocalizedText>,
    image: String,
    technologies: Vec<String>,
    categories: Vec<String>,
    link: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self) -> Project {
        Project {
            project_id: ProjectId::from_uuid(self.project_id),
            title: self.title.0,
            description: self.description.0,
            image: self.image,
            technologies: self.technologies,
            categories: self.categories,
            link: self.link,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    availability_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl AvailabilityRow {
    fn into_record(self) -> PortfolioResult<AvailabilityRecord> {
        let status = self
            .status
            .parse::<AvailabilityStatus>()
            .map_err(|e| PortfolioError::Internal(format!("Invalid stored status: {}", e)))?;

        Ok(AvailabilityRecord {
            availability_id: self.availability_id,
            status,
            created_at: self.created_at,
        })
    }
}
