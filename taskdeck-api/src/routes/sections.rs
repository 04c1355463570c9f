/// Section endpoints
///
/// All section management is admin-only.
///
/// # Endpoints (under `/api/teams/:team_id/projects/:project_id/sections`)
///
/// - `POST /` - Create a section
/// - `GET /` - List the project's sections
/// - `PATCH /:section_id` - Update a section
/// - `DELETE /:section_id` - Delete a section

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
use serde::Deserialize;
use taskdeck_shared::{
    auth::{
        authorization::{authorize, TeamAction},
        middleware::AuthContext,
    },
    chain,
    models::section::{CreateSection, Section, UpdateSection},
};
use uuid::Uuid;
use validator::Validate;

/// Create-section request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSectionRequest {
    /// Section name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Update-section request body
#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    /// New name; omitted or empty leaves the stored name
    pub name: Option<String>,
}

/// Creates a section under a project
///
/// The persisted `project_id` comes from the resolved project, never
/// from the request body.
pub async fn create_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<CreateSectionRequest>,
) -> ApiResult<(StatusCode, Json<Section>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageSections)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a section on this team")
        })?;

    let project = chain::project_in_team(&state.db, &team, project_id).await?;

    let section = Section::create(
        &state.db,
        CreateSection {
            project_id: project.id,
            name: req.name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(section)))
}

/// Lists all sections of a project
pub async fn get_sections(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Vec<Section>>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageSections)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a section on this team")
        })?;

    let project = chain::project_in_team(&state.db, &team, project_id).await?;

    let sections = Section::list_by_project(&state.db, project.id).await?;

    Ok(Json(sections))
}

/// Updates a section's name
pub async fn update_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(req): Json<UpdateSectionRequest>,
) -> ApiResult<Json<Section>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageSections)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a section on this team")
        })?;

    let path = chain::section_path(&state.db, &team, project_id, section_id).await?;

    let update = UpdateSection {
        name: non_empty(req.name),
    };

    let section = Section::update(&state.db, path.section.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Section not found".to_string()))?;

    Ok(Json(section))
}

/// Deletes a section and its tasks
pub async fn delete_section(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id)): Path<(Uuid, Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageSections)
        .await
        .map_err(|e| {
            ApiError::denied(e, "Only administrators can create a section on this team")
        })?;

    let path = chain::section_path(&state.db, &team, project_id, section_id).await?;

    Section::delete(&state.db, path.section.id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Section successfully deleted")),
    ))
}
