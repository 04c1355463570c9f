/// Resource chain resolution
///
/// Every resource below a team is addressed by the full path of its
/// ancestors (team → project → section → task). This module walks that
/// path with one scoped lookup per link, verifying at each step that the
/// child belongs to the parent resolved just before it. Resolution is
/// strictly left-to-right and stops at the first broken link: once an
/// ancestor check fails, deeper identifiers are never touched, so a
/// request can't probe for the existence of resources it couldn't reach.
///
/// A child that exists under a *different* parent resolves exactly like
/// one that doesn't exist at all — the scoped queries filter on both ids
/// at once, there is no lookup-then-compare step anywhere.
///
/// Descent functions take the resolved parent by reference, so the type
/// system enforces that a child lookup can only happen under a parent
/// that was actually fetched.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::chain;
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(
/// #     pool: PgPool,
/// #     team_id: Uuid,
/// #     project_id: Uuid,
/// #     section_id: Uuid,
/// #     task_id: Uuid,
/// # ) -> Result<(), chain::ChainError> {
/// let team = chain::team(&pool, team_id).await?;
/// let path = chain::task_path(&pool, &team, project_id, section_id, task_id).await?;
/// println!("{} / {} / {}", path.project.name, path.section.name, path.task.title);
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::Project;
use crate::models::section::Section;
use crate::models::task::Task;
use crate::models::team::Team;

/// A broken link in the resource chain, or a store failure
///
/// Each link variant maps outward to the same NOT_FOUND shape; callers
/// learn which message to show but a missing child and a child under a
/// foreign parent are indistinguishable.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The team at the root of the path does not exist
    #[error("Team not found")]
    TeamNotFound,

    /// No such project under the resolved team
    #[error("Project not found")]
    ProjectNotFound,

    /// No such section under the resolved project
    #[error("Section not found")]
    SectionNotFound,

    /// No such task under the resolved section
    #[error("Task not found")]
    TaskNotFound,

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A fully resolved team → project → section path
#[derive(Debug, Clone)]
pub struct SectionPath {
    /// Resolved project
    pub project: Project,

    /// Resolved section, verified to belong to `project`
    pub section: Section,
}

/// A fully resolved team → project → section → task path
#[derive(Debug, Clone)]
pub struct TaskPath {
    /// Resolved project
    pub project: Project,

    /// Resolved section, verified to belong to `project`
    pub section: Section,

    /// Resolved task, verified to belong to `section`
    pub task: Task,
}

/// Resolves the team at the root of a path
pub async fn team(pool: &PgPool, team_id: Uuid) -> Result<Team, ChainError> {
    Team::find_by_id(pool, team_id)
        .await?
        .ok_or(ChainError::TeamNotFound)
}

/// Resolves a project under an already-resolved team
pub async fn project_in_team(
    pool: &PgPool,
    team: &Team,
    project_id: Uuid,
) -> Result<Project, ChainError> {
    Project::find_in_team(pool, project_id, team.id)
        .await?
        .ok_or(ChainError::ProjectNotFound)
}

/// Resolves a section under an already-resolved project
pub async fn section_in_project(
    pool: &PgPool,
    project: &Project,
    section_id: Uuid,
) -> Result<Section, ChainError> {
    Section::find_in_project(pool, section_id, project.id)
        .await?
        .ok_or(ChainError::SectionNotFound)
}

/// Resolves a task under an already-resolved section
pub async fn task_in_section(
    pool: &PgPool,
    section: &Section,
    task_id: Uuid,
) -> Result<Task, ChainError> {
    Task::find_in_section(pool, task_id, section.id)
        .await?
        .ok_or(ChainError::TaskNotFound)
}

/// Resolves a project and section below a team, left-to-right
///
/// Stops at the first broken link; the section id is never looked at
/// when the project link fails.
pub async fn section_path(
    pool: &PgPool,
    team: &Team,
    project_id: Uuid,
    section_id: Uuid,
) -> Result<SectionPath, ChainError> {
    let project = project_in_team(pool, team, project_id).await?;
    let section = section_in_project(pool, &project, section_id).await?;

    Ok(SectionPath { project, section })
}

/// Resolves a project, section and task below a team, left-to-right
///
/// Stops at the first broken link. On success the whole path is returned
/// so handlers never re-fetch an ancestor.
pub async fn task_path(
    pool: &PgPool,
    team: &Team,
    project_id: Uuid,
    section_id: Uuid,
    task_id: Uuid,
) -> Result<TaskPath, ChainError> {
    let SectionPath { project, section } = section_path(pool, team, project_id, section_id).await?;
    let task = task_in_section(pool, &section, task_id).await?;

    Ok(TaskPath {
        project,
        section,
        task,
    })
}
