//! HTTP API layer

mod handlers;
mod routes;

pub use handlers::{
    ErrorResponse, HealthResponse, MessageResponse, SearchParams, StudentResponse,
};
pub use routes::{create_router, ApiDoc, AppState};
