/// Database models for Taskdeck
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts and authentication
/// - `team`: Top-level grouping that owns projects
/// - `access`: User-team join records with roles (the membership model)
/// - `project`: Projects owned by a team
/// - `section`: Sections owned by a project
/// - `task`: Tasks owned by a section, optionally blocked by another task
///
/// Every model below `team` carries a parent foreign key and exposes a
/// scoped finder (`find_in_*`) that filters by both its own id and the
/// parent id in a single query. The chain resolver builds on those
/// finders; nothing in the crate looks a child up by id alone and then
/// compares parents afterwards.

pub mod access;
pub mod project;
pub mod section;
pub mod task;
pub mod team;
pub mod user;
