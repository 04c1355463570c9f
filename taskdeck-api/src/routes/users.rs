/// Authenticated user self-service
///
/// # Endpoints
///
/// - `PATCH /api/users` - Update the acting user's own profile

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::non_empty,
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_shared::{
    auth::middleware::AuthContext,
    models::user::{UpdateUser, User},
};
use uuid::Uuid;

/// User payload returned by the API
///
/// Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Display name
    pub name: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Update-user request body
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name; omitted or empty leaves the stored name
    pub name: Option<String>,
}

/// Updates the acting user's own profile
///
/// The target is always the authenticated user; no user id is accepted
/// in the path or body.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let update = UpdateUser {
        name: non_empty(req.name),
    };

    let user = User::update(&state.db, auth.user_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok((StatusCode::ACCEPTED, Json(UserResponse::from(user))))
}
