/// Integration tests for the authorization and resource-scoping model
///
/// These verify the end-to-end behavior of the core:
/// - Chain resolution scopes every child to its verified ancestors
/// - Authorization is decided before any descendant resolution
/// - Create operations take foreign keys from the resolved chain
/// - Partial updates leave omitted and empty fields unchanged
///
/// Requires a PostgreSQL instance via `DATABASE_URL` and a `JWT_SECRET`.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_project, create_section, create_task, create_team, grant_access, send, TestContext,
};
use serde_json::json;
use taskdeck_shared::models::access::AccessRole;
use taskdeck_shared::models::task::Task;
use uuid::Uuid;

/// Creating a team grants the creator an admin access record, and the
/// full chain built under it resolves through the exact path
#[tokio::test]
async fn test_round_trip_through_full_path() {
    let ctx = TestContext::new().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Launch").await;
    let section_id = create_section(&ctx, team_id, project_id, "Backlog").await;
    let task_id = create_task(&ctx, team_id, project_id, section_id, "Bake a cake").await;

    // Fetch through the correct path
    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks/{}",
            team_id, project_id, section_id, task_id
        ),
        Some(&ctx.jwt_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], task_id.to_string());
    assert_eq!(body["title"], "Bake a cake");

    // The same task through a sibling section is not found
    let other_section = create_section(&ctx, team_id, project_id, "Done").await;
    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks/{}",
            team_id, project_id, other_section, task_id
        ),
        Some(&ctx.jwt_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found");

    ctx.cleanup().await.unwrap();
}

/// A project that exists but belongs to a different team resolves as
/// not found under the wrong team
#[tokio::test]
async fn test_cross_team_project_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let team_a = create_team(&ctx, "Team A").await;
    let team_b = create_team(&ctx, "Team B").await;
    let project_id = create_project(&ctx, team_a, "Belongs to A").await;

    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!("/api/teams/{}/projects/{}", team_b, project_id),
        Some(&ctx.jwt_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Project not found");

    // Under its own team the project is visible
    let (status, _) = send(
        &ctx,
        Method::GET,
        &format!("/api/teams/{}/projects/{}", team_a, project_id),
        Some(&ctx.jwt_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// A plain member is denied admin actions before any descendant lookup:
/// asking for a nonexistent project still yields 401, not 404
#[tokio::test]
async fn test_member_denied_before_descendant_existence() {
    let ctx = TestContext::new().await.unwrap();
    let (member, member_token) = ctx.other_user().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    grant_access(&ctx.db, team_id, member.id, AccessRole::Member)
        .await
        .unwrap();

    let bogus_project = Uuid::new_v4();

    let (status, body) = send(
        &ctx,
        Method::PATCH,
        &format!("/api/teams/{}/projects/{}", team_id, bogus_project),
        Some(&member_token),
        Some(json!({ "name": "renamed" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Only administrators can update a project on this team"
    );

    // Creating a project is equally denied
    let (status, _) = send(
        &ctx,
        Method::POST,
        &format!("/api/teams/{}/projects", team_id),
        Some(&member_token),
        Some(json!({ "name": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// A user with no access record at all is denied, even for reads of
/// resources that exist
#[tokio::test]
async fn test_outsider_denied() {
    let ctx = TestContext::new().await.unwrap();
    let (_outsider, outsider_token) = ctx.other_user().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Secret").await;

    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!("/api/teams/{}/projects/{}", team_id, project_id),
        Some(&outsider_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Only administrators can create a project on this team"
    );

    let (status, _) = send(
        &ctx,
        Method::POST,
        &format!("/api/teams/{}/projects", team_id),
        Some(&outsider_token),
        Some(json!({ "name": "intrusion" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Any access record is enough for task work; members are not admins
/// but can create and read tasks
#[tokio::test]
async fn test_member_can_work_on_tasks() {
    let ctx = TestContext::new().await.unwrap();
    let (member, member_token) = ctx.other_user().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Launch").await;
    let section_id = create_section(&ctx, team_id, project_id, "Backlog").await;
    grant_access(&ctx.db, team_id, member.id, AccessRole::Member)
        .await
        .unwrap();

    let (status, body) = send(
        &ctx,
        Method::POST,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks",
            team_id, project_id, section_id
        ),
        Some(&member_token),
        Some(json!({ "title": "Member task", "description": "allowed" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "member create failed: {}", body);

    let task_id = body["id"].as_str().unwrap().to_string();
    let (status, _) = send(
        &ctx,
        Method::GET,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks/{}",
            team_id, project_id, section_id, task_id
        ),
        Some(&member_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// The persisted parent foreign key comes from the resolved chain; a
/// conflicting id in the body is ignored
#[tokio::test]
async fn test_create_task_takes_section_from_path() {
    let ctx = TestContext::new().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Launch").await;
    let section_id = create_section(&ctx, team_id, project_id, "Backlog").await;
    let decoy_section = create_section(&ctx, team_id, project_id, "Decoy").await;

    let (status, body) = send(
        &ctx,
        Method::POST,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks",
            team_id, project_id, section_id
        ),
        Some(&ctx.jwt_token),
        Some(json!({
            "title": "Pinned",
            "description": "fk from path",
            "section_id": decoy_section,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    assert_eq!(body["section_id"], section_id.to_string());

    let task_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let stored = Task::find_in_section(&ctx.db, task_id, section_id)
        .await
        .unwrap();
    assert!(stored.is_some());

    ctx.cleanup().await.unwrap();
}

/// An update with everything omitted or empty changes nothing and still
/// succeeds
#[tokio::test]
async fn test_empty_partial_update_is_idempotent() {
    let ctx = TestContext::new().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;

    // Entirely empty body
    let (status, body) = send(
        &ctx,
        Method::PATCH,
        &format!("/api/teams/{}", team_id),
        Some(&ctx.jwt_token),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["color"], "#ff0000");

    // Empty strings count as "not supplied"
    let (status, body) = send(
        &ctx,
        Method::PATCH,
        &format!("/api/teams/{}", team_id),
        Some(&ctx.jwt_token),
        Some(json!({ "name": "", "color": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["color"], "#ff0000");

    // A supplied value does overwrite
    let (status, body) = send(
        &ctx,
        Method::PATCH,
        &format!("/api/teams/{}", team_id),
        Some(&ctx.jwt_token),
        Some(json!({ "name": "Acme Corp" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme Corp");
    assert_eq!(body["color"], "#ff0000");

    ctx.cleanup().await.unwrap();
}

/// Task update applies the same partial semantics with a 202 outcome
#[tokio::test]
async fn test_task_partial_update() {
    let ctx = TestContext::new().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Launch").await;
    let section_id = create_section(&ctx, team_id, project_id, "Backlog").await;
    let task_id = create_task(&ctx, team_id, project_id, section_id, "Original").await;

    let uri = format!(
        "/api/teams/{}/projects/{}/sections/{}/tasks/{}",
        team_id, project_id, section_id, task_id
    );

    let (status, body) = send(
        &ctx,
        Method::PATCH,
        &uri,
        Some(&ctx.jwt_token),
        Some(json!({ "title": "", "description": "updated" })),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["title"], "Original");
    assert_eq!(body["description"], "updated");

    ctx.cleanup().await.unwrap();
}

/// Deleting a section makes its tasks unreachable through the old path
#[tokio::test]
async fn test_deleted_section_tasks_unreachable() {
    let ctx = TestContext::new().await.unwrap();

    let team_id = create_team(&ctx, "Acme").await;
    let project_id = create_project(&ctx, team_id, "Launch").await;
    let section_id = create_section(&ctx, team_id, project_id, "Doomed").await;
    let task_id = create_task(&ctx, team_id, project_id, section_id, "Orphan").await;

    let (status, _) = send(
        &ctx,
        Method::DELETE,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}",
            team_id, project_id, section_id
        ),
        Some(&ctx.jwt_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks/{}",
            team_id, project_id, section_id, task_id
        ),
        Some(&ctx.jwt_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Section not found");

    ctx.cleanup().await.unwrap();
}

/// Requests without a token never reach the handlers
#[tokio::test]
async fn test_authentication_required() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = send(
        &ctx,
        Method::POST,
        "/api/teams",
        None,
        Some(json!({ "name": "Acme", "color": "#ff0000" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// A missing team reports 404 before anything else is considered
#[tokio::test]
async fn test_missing_team_is_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = send(
        &ctx,
        Method::GET,
        &format!("/api/teams/{}/projects", Uuid::new_v4()),
        Some(&ctx.jwt_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Team not found");

    ctx.cleanup().await.unwrap();
}
