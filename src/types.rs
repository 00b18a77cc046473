//! Core types for the student portal

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A student document as stored in the `students` collection.
///
/// All fields except `_id` are nullable; nothing beyond presence is validated.
/// `year` is deliberately untyped (clients send strings or numbers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    pub year: Option<serde_json::Value>,
    pub gpa: Option<f64>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Student {
    /// Build a new document from client-supplied fields. The store assigns
    /// `_id` at insert; `gpa` defaults to 0.0 and `status` to "active",
    /// `createdAt` is stamped here and never touched again.
    pub fn new_record(fields: StudentFields) -> Self {
        Self {
            id: None,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            student_id: fields.student_id,
            course: fields.course,
            year: fields.year,
            gpa: Some(fields.gpa.unwrap_or(0.0)),
            status: Some(fields.status.unwrap_or_else(|| "active".to_string())),
            created_at: Some(Utc::now().to_rfc3339()),
            updated_at: None,
        }
    }
}

/// The client-writable fields of a student record, shared by create and
/// update request bodies. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    #[schema(value_type = Object)]
    pub year: Option<serde_json::Value>,
    pub gpa: Option<f64>,
    pub status: Option<String>,
}

/// The `$set` payload for an update: every writable field, overwritten
/// whether supplied or not (omitted fields become null), plus `updatedAt`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    pub year: Option<serde_json::Value>,
    pub gpa: Option<f64>,
    pub status: Option<String>,
    pub updated_at: String,
}

impl StudentUpdate {
    pub fn from_fields(fields: StudentFields) -> Self {
        Self {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            student_id: fields.student_id,
            course: fields.course,
            year: fields.year,
            gpa: fields.gpa,
            status: fields.status,
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}
