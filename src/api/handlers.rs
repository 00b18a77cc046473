//! API request handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::routes::AppState;
use crate::types::{Student, StudentFields, StudentUpdate};

// Query parameters

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Substring to match against firstName, lastName, email and studentId.
    /// Empty (or absent) matches every record.
    #[serde(default)]
    pub q: String,
}

// Response types

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    /// Store-assigned identifier, rendered as a hex string
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    #[schema(value_type = Object)]
    pub year: Option<serde_json::Value>,
    pub gpa: Option<f64>,
    pub status: Option<String>,
    /// ISO 8601 creation timestamp, set once at create
    pub created_at: Option<String>,
    /// ISO 8601 timestamp of the last update; absent until first update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.map(|id| id.to_hex()).unwrap_or_default(),
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            student_id: student.student_id,
            course: student.course,
            year: student.year,
            gpa: student.gpa,
            status: student.status,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable result message
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".into() })
}

/// List every student record
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All student records", body = [StudentResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let students = state.store.find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Get a single student by ID
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student document ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid student ID".into(),
            }),
        )
    })?;

    let student = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Student not found".into(),
                }),
            )
        })?;

    Ok(Json(student.into()))
}

/// Create a new student record
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentFields,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(fields): Json<StudentFields>,
) -> Result<(StatusCode, Json<StudentResponse>), (StatusCode, Json<ErrorResponse>)> {
    let mut student = Student::new_record(fields);

    let id = state.store.insert(&student).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    student.id = Some(id);

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Update a student record (full overwrite of all writable fields)
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student document ID")
    ),
    request_body = StudentFields,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<StudentFields>,
) -> Result<Json<StudentResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid student ID".into(),
            }),
        )
    })?;

    let update = StudentUpdate::from_fields(fields);
    let matched = state.store.replace_fields(id, &update).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    if matched == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Student not found".into(),
            }),
        ));
    }

    // Return the post-update record
    let student = state
        .store
        .find_by_id(id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Student not found".into(),
                }),
            )
        })?;

    Ok(Json(student.into()))
}

/// Delete a student record
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student document ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = ObjectId::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid student ID".into(),
            }),
        )
    })?;

    let deleted = state.store.delete_by_id(id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    if deleted == 0 {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Student not found".into(),
            }),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Student deleted successfully".into(),
    }))
}

/// Substring search across name, email and student number fields
#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching student records", body = [StudentResponse]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "students"
)]
pub async fn search_students(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StudentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let students = state.store.search(&params.q).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}
