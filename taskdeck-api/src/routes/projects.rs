/// Project endpoints
///
/// All project management is admin-only, including reads.
///
/// # Endpoints (under `/api/teams/:team_id/projects`)
///
/// - `POST /` - Create a project
/// - `GET /` - List the team's projects
/// - `GET /:project_id` - Show a project with its sections and tasks
/// - `PATCH /:project_id` - Update a project
/// - `DELETE /:project_id` - Delete a project

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{non_empty, MessageResponse},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::{
        authorization::{authorize, TeamAction},
        middleware::AuthContext,
    },
    chain,
    models::{
        project::{CreateProject, Project, UpdateProject},
        section::Section,
        task::Task,
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create-project request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Update-project request body
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    /// New name; omitted or empty leaves the stored name
    pub name: Option<String>,
}

/// Project payload with its full subtree, returned by show
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    /// The project itself
    #[serde(flatten)]
    pub project: Project,

    /// Sections under the project, each with its tasks
    pub sections: Vec<SectionDetail>,
}

/// Section payload with its tasks
#[derive(Debug, Serialize)]
pub struct SectionDetail {
    /// The section itself
    #[serde(flatten)]
    pub section: Section,

    /// Tasks under the section
    pub tasks: Vec<Task>,
}

/// Creates a project under a team
///
/// The persisted `team_id` comes from the resolved team, never from the
/// request body.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageProjects)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a project on this team")
        })?;

    let project = Project::create(
        &state.db,
        CreateProject {
            team_id: team.id,
            name: req.name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// Lists all projects of a team
pub async fn get_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Project>>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageProjects)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a project on this team")
        })?;

    let projects = Project::list_by_team(&state.db, team.id).await?;

    Ok(Json(projects))
}

/// Shows a project with its sections and their tasks
pub async fn show_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<ProjectDetail>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageProjects)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a project on this team")
        })?;

    let project = chain::project_in_team(&state.db, &team, project_id).await?;

    let mut sections = Vec::new();
    for section in Section::list_by_project(&state.db, project.id).await? {
        let tasks = Task::list_by_section(&state.db, section.id).await?;
        sections.push(SectionDetail { section, tasks });
    }

    Ok(Json(ProjectDetail { project, sections }))
}

/// Updates a project's name
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageProjects)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can update a project on this team")
        })?;

    let project = chain::project_in_team(&state.db, &team, project_id).await?;

    let update = UpdateProject {
        name: non_empty(req.name),
    };

    let project = Project::update(&state.db, project.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(Json(project))
}

/// Deletes a project and everything below it
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageProjects)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can delete a project on this team")
        })?;

    let project = chain::project_in_team(&state.db, &team, project_id).await?;

    Project::delete(&state.db, project.id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Project was successfully deleted")),
    ))
}
