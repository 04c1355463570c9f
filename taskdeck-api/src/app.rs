/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with
/// all routes and middleware.
///
/// # Route tree
///
/// ```text
/// /
/// ├── /health                                   # public
/// └── /api/
///     ├── /users/
///     │   ├── POST /register                    # public
///     │   ├── POST /login                       # public
///     │   ├── POST /refresh                     # public
///     │   └── PATCH /                           # authenticated
///     └── /teams/                               # authenticated
///         ├── POST   /
///         ├── PATCH  /:team_id
///         ├── DELETE /:team_id
///         └── /:team_id/projects/
///             ├── GET    /        POST /
///             ├── GET    /:project_id  PATCH  DELETE
///             └── /:project_id/sections/
///                 ├── GET /       POST /
///                 ├── PATCH /:section_id   DELETE
///                 └── /:section_id/tasks/
///                     ├── POST /
///                     └── GET /:task_id  PATCH  DELETE
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::auth::middleware::{jwt_auth_middleware, AuthError};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public user routes
    let public_user_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Authenticated self-service user routes
    let protected_user_routes = Router::new()
        .route("/", patch(routes::users::update_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Tasks are nested below sections
    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route(
            "/:task_id",
            get(routes::tasks::get_task)
                .patch(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        );

    // Sections are nested below projects
    let section_routes = Router::new()
        .route(
            "/",
            get(routes::sections::get_sections).post(routes::sections::create_section),
        )
        .route(
            "/:section_id",
            patch(routes::sections::update_section).delete(routes::sections::delete_section),
        )
        .nest("/:section_id/tasks", task_routes);

    // Projects are nested below teams
    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::get_projects).post(routes::projects::create_project),
        )
        .route(
            "/:project_id",
            get(routes::projects::show_project)
                .patch(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .nest("/:project_id/sections", section_routes);

    // Team tree (all authenticated)
    let team_routes = Router::new()
        .route("/", post(routes::teams::create_team))
        .route(
            "/:team_id",
            patch(routes::teams::update_team).delete(routes::teams::delete_team),
        )
        .nest("/:team_id/projects", project_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/users", public_user_routes.merge(protected_user_routes))
        .nest("/teams", team_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Delegates to the shared middleware with the configured secret; on
/// success an `AuthContext` is injected into request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.config.jwt.secret.clone(), req, next).await
}
