/// Task model and database operations
///
/// Tasks belong to exactly one section and may reference another task as
/// a dependency for ordering/blocking semantics. The dependency reference
/// is stored as supplied; no existence or cycle validation happens here.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     section_id UUID NOT NULL REFERENCES sections(id) ON DELETE CASCADE,
///     dependency_task_id UUID REFERENCES tasks(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{CreateTask, Task};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, section_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     section_id,
///     dependency_task_id: None,
///     title: "Bake a cake".to_string(),
///     description: "Need to buy an oven first".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Owning section
    pub section_id: Uuid,

    /// Optional task this task is blocked by
    pub dependency_task_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning section (taken from the resolved chain, never from the body)
    pub section_id: Uuid,

    /// Optional blocking task reference, stored as supplied
    pub dependency_task_id: Option<Uuid>,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,
}

/// Input for updating an existing task
///
/// Only non-None fields are written; everything else keeps its stored
/// value. A task can be moved to another section by supplying
/// `section_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// Move the task to another section
    pub section_id: Option<Uuid>,

    /// New blocking task reference
    pub dependency_task_id: Option<Uuid>,
}

impl Task {
    /// Creates a new task under a section
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (section_id, dependency_task_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, section_id, dependency_task_id, title, description,
                      created_at, updated_at
            "#,
        )
        .bind(data.section_id)
        .bind(data.dependency_task_id)
        .bind(data.title)
        .bind(data.description)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owning section
    pub async fn find_in_section(
        pool: &PgPool,
        id: Uuid,
        section_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, section_id, dependency_task_id, title, description,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1 AND section_id = $2
            "#,
        )
        .bind(id)
        .bind(section_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks of a section
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, section_id, dependency_task_id, title, description,
                   created_at, updated_at
            FROM tasks
            WHERE section_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(section_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates an existing task
    ///
    /// Only the supplied fields are written. The SET clause is built
    /// dynamically so that omitted fields never appear in the statement.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.section_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", section_id = ${}", bind_count));
        }
        if data.dependency_task_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", dependency_task_id = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, section_id, dependency_task_id, title, description, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(section_id) = data.section_id {
            q = q.bind(section_id);
        }
        if let Some(dependency_task_id) = data.dependency_task_id {
            q = q.bind(dependency_task_id);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default() {
        let update = UpdateTask::default();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert!(update.section_id.is_none());
        assert!(update.dependency_task_id.is_none());
    }
}
