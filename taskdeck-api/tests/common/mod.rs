/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - Test database setup (migrations run on first connect)
/// - Test user creation and JWT token generation
/// - An in-process router and a request helper

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::auth::jwt::{create_token, Claims, TokenType};
use taskdeck_shared::db::migrations::run_migrations;
use taskdeck_shared::models::access::{Access, AccessRole, CreateAccess};
use taskdeck_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;
        run_migrations(&db).await?;

        let user = create_test_user(&db).await?;
        let jwt_token = token_for(&config, &user);

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Creates another user with their own token
    pub async fn other_user(&self) -> anyhow::Result<(User, String)> {
        let user = create_test_user(&self.db).await?;
        let token = token_for(&self.config, &user);
        Ok((user, token))
    }

    /// Cleans up the test user (cascades to their access records)
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Creates a user with a unique email
pub async fn create_test_user(db: &PgPool) -> anyhow::Result<User> {
    let user = User::create(
        db,
        CreateUser {
            email: format!("test-{}@example.com", Uuid::new_v4()),
            name: "Test User".to_string(),
            password_hash: "test_hash".to_string(),
        },
    )
    .await?;

    Ok(user)
}

/// Generates an access token for a user
pub fn token_for(config: &Config, user: &User) -> String {
    let claims = Claims::new(user.id, TokenType::Access);
    create_token(&claims, &config.jwt.secret).expect("token creation should succeed")
}

/// Grants a user an access record on a team
pub async fn grant_access(
    db: &PgPool,
    team_id: Uuid,
    user_id: Uuid,
    role: AccessRole,
) -> anyhow::Result<Access> {
    let access = Access::create(
        db,
        CreateAccess {
            team_id,
            user_id,
            role,
            is_active: true,
        },
    )
    .await?;

    Ok(access)
}

/// Sends a request through the in-process router
///
/// Returns the status code and the parsed JSON body (Null for empty
/// bodies).
pub async fn send(
    ctx: &TestContext,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Creates a team via the API as the context user, returning its id
pub async fn create_team(ctx: &TestContext, name: &str) -> Uuid {
    let (status, body) = send(
        ctx,
        Method::POST,
        "/api/teams",
        Some(&ctx.jwt_token),
        Some(serde_json::json!({ "name": name, "color": "#ff0000" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create team failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Creates a project via the API, returning its id
pub async fn create_project(ctx: &TestContext, team_id: Uuid, name: &str) -> Uuid {
    let (status, body) = send(
        ctx,
        Method::POST,
        &format!("/api/teams/{}/projects", team_id),
        Some(&ctx.jwt_token),
        Some(serde_json::json!({ "name": name })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create project failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Creates a section via the API, returning its id
pub async fn create_section(ctx: &TestContext, team_id: Uuid, project_id: Uuid, name: &str) -> Uuid {
    let (status, body) = send(
        ctx,
        Method::POST,
        &format!("/api/teams/{}/projects/{}/sections", team_id, project_id),
        Some(&ctx.jwt_token),
        Some(serde_json::json!({ "name": name })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create section failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}

/// Creates a task via the API, returning its id
pub async fn create_task(
    ctx: &TestContext,
    team_id: Uuid,
    project_id: Uuid,
    section_id: Uuid,
    title: &str,
) -> Uuid {
    let (status, body) = send(
        ctx,
        Method::POST,
        &format!(
            "/api/teams/{}/projects/{}/sections/{}/tasks",
            team_id, project_id, section_id
        ),
        Some(&ctx.jwt_token),
        Some(serde_json::json!({
            "title": title,
            "description": "a task description"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
    Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
}
