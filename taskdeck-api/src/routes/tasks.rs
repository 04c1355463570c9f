/// Task endpoints
///
/// Task work is open to any access record on the team, admin or member.
///
/// # Endpoints (under
/// `/api/teams/:team_id/projects/:project_id/sections/:section_id/tasks`)
///
/// - `POST /` - Create a task
/// - `GET /:task_id` - Get a task
/// - `PATCH /:task_id` - Update a task
/// - `DELETE /:task_id` - Delete a task

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
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Denial message for every task operation
const TASK_DENIED: &str = "You are not allowed to do this action";

/// Create-task request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Task description
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: String,

    /// Optional blocking task reference, stored as supplied
    pub dependency_task_id: Option<Uuid>,
}

/// Update-task request body
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New title; omitted or empty leaves the stored title
    pub title: Option<String>,

    /// New description; omitted or empty leaves the stored description
    pub description: Option<String>,

    /// Move the task to another section
    pub section_id: Option<Uuid>,

    /// New blocking task reference
    pub dependency_task_id: Option<Uuid>,
}

/// Creates a task under a section
///
/// The persisted `section_id` comes from the resolved section, never
/// from the request body.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::WorkOnTasks)
        .await
        .map_err(|e| ApiError::denied(e, TASK_DENIED))?;

    let path = chain::section_path(&state.db, &team, project_id, section_id).await?;

    let task = Task::create(
        &state.db,
        CreateTask {
            section_id: path.section.id,
            dependency_task_id: req.dependency_task_id,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Gets a task by its full path
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id, task_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> ApiResult<Json<Task>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::WorkOnTasks)
        .await
        .map_err(|e| ApiError::denied(e, TASK_DENIED))?;

    let path = chain::task_path(&state.db, &team, project_id, section_id, task_id).await?;

    Ok(Json(path.task))
}

/// Updates a task's attributes
///
/// A supplied `section_id` moves the task; a supplied
/// `dependency_task_id` replaces the blocking reference.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id, task_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::WorkOnTasks)
        .await
        .map_err(|e| ApiError::denied(e, TASK_DENIED))?;

    let path = chain::task_path(&state.db, &team, project_id, section_id, task_id).await?;

    let update = UpdateTask {
        title: non_empty(req.title),
        description: non_empty(req.description),
        section_id: req.section_id,
        dependency_task_id: req.dependency_task_id,
    };

    let task = Task::update(&state.db, path.task.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok((StatusCode::ACCEPTED, Json(task)))
}

/// Deletes a task
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, project_id, section_id, task_id)): Path<(Uuid, Uuid, Uuid, Uuid)>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::WorkOnTasks)
        .await
        .map_err(|e| ApiError::denied(e, TASK_DENIED))?;

    let path = chain::task_path(&state.db, &team, project_id, section_id, task_id).await?;

    Task::delete(&state.db, path.task.id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Task was successfully deleted")),
    ))
}
