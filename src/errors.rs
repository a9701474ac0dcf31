use axum::{Json, http::StatusCode};
use redis::RedisError;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Redis pool error: {0}")]
    RedisPoolError(String),

    #[error("Redis command error: {0}")]
    RedisCommandError(#[from] RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("{0}")]
    InvalidValue(String),

    #[error("Invalid JSON data: {0}")]
    MalformedPayload(String),

    #[error("You have already rated this blend")]
    DuplicateRating,

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn to_response(&self) -> (StatusCode, Json<Value>) {
        match self {
            AppError::RedisPoolError(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process rating", "details": details })),
            ),
            AppError::RedisCommandError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process rating", "details": e.to_string() })),
            ),
            AppError::Serialization(details) | AppError::Deserialization(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to process rating", "details": details })),
            ),
            AppError::MissingFields(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing required fields", "missingFields": fields })),
            ),
            AppError::InvalidValue(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
            }
            AppError::MalformedPayload(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid JSON data", "details": details })),
            ),
            AppError::DuplicateRating => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "You have already rated this blend",
                    "message": "You can only submit one rating per blend"
                })),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))),
        }
    }
}
