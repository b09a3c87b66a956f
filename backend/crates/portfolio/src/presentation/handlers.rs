//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::ProjectId;
use std::sync::Arc;

use crate::application::{AvailabilityUseCase, ContactUseCase, ProjectUseCase};
use crate::domain::repository::{
    AvailabilityRepository, ContactRepository, MailRelay, ProjectRepository,
};
use crate::error::{PortfolioError, PortfolioResult};
use crate::presentation::dto::{
    AvailabilityResponse, ContactRequest, ContactResponse, CreateProjectRequest, ProjectDto,
    ProjectListResponse, UpdateAvailabilityRequest, UpdateAvailabilityResponse,
    UpdateProjectRequest,
};

/// Shared state for portfolio handlers
#[derive(Clone)]
pub struct PortfolioAppState<R>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> PortfolioAppState<R>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Shared state for the contact form handler
pub struct ContactAppState<R, M>
where
    R: ContactRepository + Send + Sync + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mail: Arc<M>,
}

impl<R, M> Clone for ContactAppState<R, M>
where
    R: ContactRepository + Send + Sync + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mail: self.mail.clone(),
        }
    }
}

impl<R, M> ContactAppState<R, M>
where
    R: ContactRepository + Send + Sync + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    pub fn new(repo: R, mail: M) -> Self {
        Self {
            repo: Arc::new(repo),
            mail: Arc::new(mail),
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> PortfolioResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        PortfolioError::BadRequest("Invalid request body".to_string())
    })
}

/// Ids that do not parse cannot name a stored project
fn parse_project_id(raw: &str) -> PortfolioResult<ProjectId> {
    raw.parse().map_err(|_| PortfolioError::ProjectNotFound)
}

// ============================================================================
// Projects
// ============================================================================

/// GET /api/projects
pub async fn list_projects<R>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<Json<ProjectListResponse>>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let projects = ProjectUseCase::new(state.repo.clone()).list().await?;

    Ok(Json(ProjectListResponse {
        member: projects.into_iter().map(ProjectDto::from).collect(),
    }))
}

/// POST /api/projects
pub async fn create_project<R>(
    State(state): State<PortfolioAppState<R>>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> PortfolioResult<impl IntoResponse>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let req = body(payload)?;
    let project = ProjectUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectDto::from(project))))
}

/// PUT /api/projects/{id}
pub async fn update_project<R>(
    State(state): State<PortfolioAppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProjectRequest>, JsonRejection>,
) -> PortfolioResult<Json<ProjectDto>>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let project_id = parse_project_id(&id)?;
    let req = body(payload)?;

    let project = ProjectUseCase::new(state.repo.clone())
        .update(&project_id, req.into())
        .await?;

    Ok(Json(ProjectDto::from(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project<R>(
    State(state): State<PortfolioAppState<R>>,
    Path(id): Path<String>,
) -> PortfolioResult<StatusCode>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let project_id = parse_project_id(&id)?;
    ProjectUseCase::new(state.repo.clone())
        .delete(&project_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Availability
// ============================================================================

/// GET /api/availability
pub async fn get_availability<R>(
    State(state): State<PortfolioAppState<R>>,
) -> PortfolioResult<Json<AvailabilityResponse>>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let status = AvailabilityUseCase::new(state.repo.clone()).current().await?;

    Ok(Json(AvailabilityResponse { status }))
}

/// PUT /api/availability
pub async fn update_availability<R>(
    State(state): State<PortfolioAppState<R>>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> PortfolioResult<Json<UpdateAvailabilityResponse>>
where
    R: ProjectRepository + AvailabilityRepository + Clone + Send + Sync + 'static,
{
    let req = body(payload)?;
    let status = AvailabilityUseCase::new(state.repo.clone())
        .set(&req.status)
        .await?;

    Ok(Json(UpdateAvailabilityResponse {
        message: "Availability status updated successfully".to_string(),
        status,
    }))
}

// ============================================================================
// Contact
// ============================================================================

/// POST /api/contact
pub async fn submit_contact<R, M>(
    State(state): State<ContactAppState<R, M>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> PortfolioResult<Json<ContactResponse>>
where
    R: ContactRepository + Send + Sync + 'static,
    M: MailRelay + Send + Sync + 'static,
{
    let req = body(payload)?;
    ContactUseCase::new(state.repo.clone(), state.mail.clone())
        .submit(req.into())
        .await?;

    Ok(Json(ContactResponse { success: true }))
}
