use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers::public as handlers;
use crate::state::AppState;

/// Build the full router with CORS and request tracing applied.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(legacy_auth_routes())
        .with_state(state)
        .layer(cors_layer(config));

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/session/identity", get(handlers::identity))
        .route("/session/username", get(handlers::username))
        .route("/session/tags", get(handlers::tags))
        .route("/session/logout", get(handlers::logout))
        .route("/users/:id/tags", put(handlers::append_tag))
}

/// Paths used by the existing snippet-manager frontend
fn legacy_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(handlers::register))
        .route("/auth/", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/loggedIn", get(handlers::identity))
        .route("/auth/userName", get(handlers::username))
        .route("/auth/userTags", get(handlers::tags))
        .route("/auth/addTag/:id", put(handlers::append_tag))
        .route("/auth/logOut", get(handlers::logout))
}

/// Credentialed CORS restricted to the configured origins
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "snippet-auth",
        "version": version,
        "description": "Authentication backend for the snippet manager",
        "endpoints": {
            "register": "POST /register",
            "login": "POST /login",
            "session": "GET /session/identity, /session/username, /session/tags",
            "logout": "GET /session/logout",
            "tags": "PUT /users/:id/tags",
            "health": "GET /health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
