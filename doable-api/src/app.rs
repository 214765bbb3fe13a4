/// Application state and router builder
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                       # Liveness probe (public)
/// ├── /users/                       # Account endpoints (public)
/// │   ├── POST /register
/// │   ├── GET  /verify/:token
/// │   └── POST /login
/// ├── /todos/                       # Todo endpoints (bearer)
/// │   ├── POST  /
/// │   ├── GET   /
/// │   └── PATCH /:id/completed
/// └── /categories/                  # Category endpoints (bearer)
///     ├── POST /
///     ├── POST /share
///     └── GET  /shared
/// ```
///
/// Protected routers carry the request-gate layer; public ones don't. The
/// gate is the only place identity enters a request.

use crate::{config::Config, error::ApiError, mailer::Mailer};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use doable_shared::auth::middleware::authenticate;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via axum's `State` extractor; the only state shared
/// between requests is the immutable config and the connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Outbound-mail collaborator
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }

    /// Gets the secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }
}

/// Builds the complete axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Account routes: public, identity is being established here
    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/verify/:token", get(routes::users::verify_email))
        .route("/login", post(routes::users::login));

    // Todo routes: every request passes the gate first
    let todo_routes = Router::new()
        .route(
            "/",
            post(routes::todos::create).get(routes::todos::list),
        )
        .route("/:id/completed", patch(routes::todos::mark_completed))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_gate,
        ));

    // Category routes, gated the same way
    let category_routes = Router::new()
        .route("/", post(routes::categories::create))
        .route("/share", post(routes::categories::share))
        .route("/shared", get(routes::categories::list_shared))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_gate,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/users", user_routes)
        .nest("/todos", todo_routes)
        .nest("/categories", category_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The request gate as an axum middleware layer
///
/// Verifies the bearer token and injects the resulting `AuthContext` into
/// request extensions. Handlers behind this layer extract it with
/// `Extension<AuthContext>` - the only channel by which they learn who is
/// asking.
async fn request_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = authenticate(req.headers(), state.jwt_secret())?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
