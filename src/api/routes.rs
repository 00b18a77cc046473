//! API route definitions

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, ErrorResponse, HealthResponse, MessageResponse, StudentResponse,
};
use crate::error::{Error, Result};
use crate::store::StudentStore;
use crate::types::StudentFields;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Portal API",
        version = "0.1.0",
        description = "Student records CRUD API backed by MongoDB"
    ),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::list_students,
        handlers::get_student,
        handlers::create_student,
        handlers::update_student,
        handlers::delete_student,
        handlers::search_students,
    ),
    components(schemas(
        StudentFields,
        StudentResponse,
        HealthResponse,
        MessageResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StudentStore>,
}

/// Create the API router. Cross-origin requests are allowed from the single
/// configured origin only.
pub fn create_router(state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| Error::Config(format!("invalid allowed origin: {e}")))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    Ok(Router::new()
        // Students CRUD
        .route("/api/students", get(handlers::list_students))
        .route("/api/students", post(handlers::create_student))
        .route("/api/students/{id}", get(handlers::get_student))
        .route("/api/students/{id}", put(handlers::update_student))
        .route("/api/students/{id}", delete(handlers::delete_student))

        // Search (static segment, matched ahead of {id})
        .route("/api/students/search", get(handlers::search_students))

        // Health
        .route("/api/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
