/// Team endpoints
///
/// # Endpoints
///
/// - `POST /api/teams` - Create a team (creator becomes admin)
/// - `PATCH /api/teams/:team_id` - Update a team (admin only)
/// - `DELETE /api/teams/:team_id` - Delete a team (admin only)

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
    models::{
        access::{Access, AccessRole, CreateAccess},
        team::{CreateTeam, Team, UpdateTeam},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create-team request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Display color (e.g. "#ff0000")
    #[validate(length(min = 1, max = 32, message = "Color must be 1-32 characters"))]
    pub color: String,
}

/// Update-team request body
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    /// New name; omitted or empty leaves the stored name
    pub name: Option<String>,

    /// New color; omitted or empty leaves the stored color
    pub color: Option<String>,
}

/// Creates a team and grants the creator an admin access record
///
/// No authorization check applies: any authenticated user may create a
/// team, and becomes its first admin.
pub async fn create_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<Team>)> {
    req.validate().map_err(ApiError::from_validation)?;

    // TODO: wrap in a transaction so a failed access insert can't leave
    // an orphaned team
    let team = Team::create(
        &state.db,
        CreateTeam {
            name: req.name,
            color: req.color,
        },
    )
    .await?;

    Access::create(
        &state.db,
        CreateAccess {
            team_id: team.id,
            user_id: auth.user_id,
            role: AccessRole::Admin,
            is_active: true,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Updates a team's name and color
pub async fn update_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> ApiResult<Json<Team>> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageTeam)
        .await
        .map_err(|e| ApiError::denied(e, "Only administrators can update this team"))?;

    let update = UpdateTeam {
        name: non_empty(req.name),
        color: non_empty(req.color),
    };

    let team = Team::update(&state.db, team.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team not found".to_string()))?;

    Ok(Json(team))
}

/// Deletes a team and everything below it
pub async fn delete_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let team = chain::team(&state.db, team_id).await?;

    authorize(&state.db, team.id, auth.user_id, TeamAction::ManageTeam)
        .await
        .map_err(|e| ApiError::denied(e, "Only administrators can delete this team"))?;

    Team::delete(&state.db, team.id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Team was successfully deleted")),
    ))
}
