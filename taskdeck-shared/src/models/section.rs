/// Section model and database operations
///
/// Sections belong to exactly one project and own tasks.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sections (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     name VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Section model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    /// Unique section ID (UUID v4)
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Section name
    pub name: String,

    /// When the section was created
    pub created_at: DateTime<Utc>,

    /// When the section was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSection {
    /// Owning project (taken from the resolved chain, never from the body)
    pub project_id: Uuid,

    /// Section name
    pub name: String,
}

/// Input for updating an existing section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSection {
    /// New name
    pub name: Option<String>,
}

impl Section {
    /// Creates a new section under a project
    pub async fn create(pool: &PgPool, data: CreateSection) -> Result<Self, sqlx::Error> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            INSERT INTO sections (project_id, name)
            VALUES ($1, $2)
            RETURNING id, project_id, name, created_at, updated_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(section)
    }

    /// Finds a section by ID, scoped to its owning project
    pub async fn find_in_project(
        pool: &PgPool,
        id: Uuid,
        project_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            SELECT id, project_id, name, created_at, updated_at
            FROM sections
            WHERE id = $1 AND project_id = $2
            "#,
        )
        .bind(id)
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

        Ok(section)
    }

    /// Lists all sections of a project
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sections = sqlx::query_as::<_, Section>(
            r#"
            SELECT id, project_id, name, created_at, updated_at
            FROM sections
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(sections)
    }

    /// Updates an existing section
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateSection,
    ) -> Result<Option<Self>, sqlx::Error> {
        let section = sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections
            SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .fetch_optional(pool)
        .await?;

        Ok(section)
    }

    /// Deletes a section by ID
    ///
    /// Cascades to all tasks under the section.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
