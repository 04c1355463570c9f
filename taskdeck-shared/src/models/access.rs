/// Access model and database operations
///
/// This module provides the Access model for user-team relationships.
/// It implements a many-to-many relationship between users and teams with
/// role-based access control: a user's capability on a team is fully
/// determined by the existence and role of their access record for that
/// team, and the absence of a record means no access at all.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE access_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE accesses (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role access_role NOT NULL DEFAULT 'member',
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (team_id, user_id)
/// );
/// ```
///
/// # Roles
///
/// - **admin**: manages the team itself and its projects and sections
/// - **member**: works on tasks anywhere in the team's tree
///
/// There is no numeric hierarchy; `admin` is a capability flag compared
/// by equality, not a level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role carried by an access record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "access_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// Manages the team, its projects and its sections
    Admin,

    /// Works on tasks within the team
    Member,
}

impl AccessRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRole::Admin => "admin",
            AccessRole::Member => "member",
        }
    }

    /// Whether this role grants team management rights
    pub fn is_admin(&self) -> bool {
        matches!(self, AccessRole::Admin)
    }
}

/// Access record linking a user to a team with a role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Access {
    /// Unique access record ID
    pub id: Uuid,

    /// Team the record grants access to
    pub team_id: Uuid,

    /// User holding the access
    pub user_id: Uuid,

    /// Role within the team
    pub role: AccessRole,

    /// Whether the access is currently active
    pub is_active: bool,

    /// When the access was granted
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new access record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccess {
    /// Team ID
    pub team_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign
    pub role: AccessRole,

    /// Active flag
    pub is_active: bool,
}

impl Access {
    /// Creates a new access record (adds a user to a team)
    ///
    /// # Errors
    ///
    /// Returns an error if the (team, user) pair already has a record
    /// (unique constraint), either side doesn't exist (foreign key), or
    /// the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateAccess) -> Result<Self, sqlx::Error> {
        let access = sqlx::query_as::<_, Access>(
            r#"
            INSERT INTO accesses (team_id, user_id, role, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, team_id, user_id, role, is_active, created_at
            "#,
        )
        .bind(data.team_id)
        .bind(data.user_id)
        .bind(data.role)
        .bind(data.is_active)
        .fetch_one(pool)
        .await?;

        Ok(access)
    }

    /// Resolves a user's membership on a team
    ///
    /// At most one record exists per (team, user) pair; this returns it,
    /// or None when the user has no access to the team.
    pub async fn find(
        pool: &PgPool,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let access = sqlx::query_as::<_, Access>(
            r#"
            SELECT id, team_id, user_id, role, is_active, created_at
            FROM accesses
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(access)
    }
}
