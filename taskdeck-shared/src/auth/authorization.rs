/// Team-scoped authorization policy
///
/// Taskdeck authorizes every operation against the *team* at the root of
/// the resource path, regardless of which entity the operation targets.
/// The policy is keyed by team and action class only; once a user holds
/// the required access on a team, they may act on any project, section or
/// task in that team's tree.
///
/// # Policy
///
/// | Action class | Required access |
/// |---|---|
/// | `ManageTeam` (update/delete team) | admin |
/// | `ManageProjects` (create/update/delete/list/show project) | admin |
/// | `ManageSections` (create/update/delete/list section) | admin |
/// | `WorkOnTasks` (create/get/update/delete task) | any record |
///
/// Callers must confirm the team exists *before* authorizing, and must
/// authorize *before* resolving anything below the team. A non-member is
/// denied without learning whether a deeper resource exists.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::authorization::{authorize, TeamAction};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, team_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let access = authorize(&pool, team_id, user_id, TeamAction::ManageProjects).await?;
/// println!("acting as {}", access.role.as_str());
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::access::Access;

/// Error type for authorization checks
///
/// `NoAccess` and `AdminRequired` are distinguished here for logging;
/// the HTTP layer collapses both into one generic denial so callers
/// cannot tell a non-member from an under-privileged member.
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// User has no access record on the team
    #[error("no access to team {0}")]
    NoAccess(Uuid),

    /// User has an access record but not the admin role
    #[error("admin role required on team {0}")]
    AdminRequired(Uuid),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Action classes the policy decides over
///
/// Operations are grouped by the capability they require, not by the
/// entity they target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    /// Update or delete the team itself
    ManageTeam,

    /// Create, update, delete, list or show projects
    ManageProjects,

    /// Create, update, delete or list sections
    ManageSections,

    /// Create, get, update or delete tasks
    WorkOnTasks,
}

impl TeamAction {
    /// Whether this action class requires the admin role
    ///
    /// Task work is open to any access record; everything else is
    /// admin-only.
    pub fn requires_admin(&self) -> bool {
        !matches!(self, TeamAction::WorkOnTasks)
    }
}

/// Decides whether a user may perform an action class on a team
///
/// Resolves the user's membership and checks it against the action's
/// required role. The team's existence must already be confirmed by the
/// caller.
///
/// # Returns
///
/// The user's access record on allow, so handlers don't re-fetch it
///
/// # Errors
///
/// - `AuthzError::NoAccess` if the user holds no record on the team
/// - `AuthzError::AdminRequired` if the action needs admin and the user
///   is a plain member
pub async fn authorize(
    pool: &PgPool,
    team_id: Uuid,
    user_id: Uuid,
    action: TeamAction,
) -> Result<Access, AuthzError> {
    let access = Access::find(pool, team_id, user_id)
        .await?
        .ok_or(AuthzError::NoAccess(team_id))?;

    if action.requires_admin() && !access.role.is_admin() {
        return Err(AuthzError::AdminRequired(team_id));
    }

    Ok(access)
}
