use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::notices::Notice;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("AI error: {0}")]
    Ai(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// The public failure taxonomy. Internal variants (database, storage, AI)
/// surface as `Unknown`; callers get the category, never the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Validation,
    Auth,
    NotFound,
    Unknown,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Auth(_) => ErrorKind::Auth,
            AppError::Database(_) | AppError::Storage(_) | AppError::Ai(_) => ErrorKind::Unknown,
            AppError::Internal(_) => ErrorKind::Unknown,
        }
    }

    /// Attaches the user-facing action label ("like content", "upload file")
    /// so the failure notice can name what failed without leaking the cause.
    pub fn for_action(self, action: &'static str) -> ActionError {
        ActionError {
            action,
            source: self,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
            AppError::Auth(_) => (StatusCode::BAD_GATEWAY, "AUTH_ERROR"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Ai(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AI_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Caller-input errors keep their message; infrastructure errors get a
    /// generic one and the detail goes to the log instead.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Network(_) => "An upstream service could not be reached".to_string(),
            AppError::Auth(_) => "An upstream service rejected our credentials".to_string(),
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Storage(_) => "A storage error occurred".to_string(),
            AppError::Ai(_) => "An AI processing error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::NotFound(_) | AppError::Validation(_) => {}
            other => tracing::error!("{other}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, code) = self.status_and_code();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.public_message()
            }
        }));
        (status, body).into_response()
    }
}

/// An `AppError` tied to the action the caller attempted. The response body
/// carries a dismissible failure notice naming that action ("Failed to like
/// content"), per the engagement/upload error contract.
#[derive(Debug)]
pub struct ActionError {
    action: &'static str,
    source: AppError,
}

impl ActionError {
    fn notice_message(&self) -> String {
        match &self.source {
            // Input errors are the caller's to fix; pass the reason through.
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            _ => format!("Failed to {}", self.action),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        self.source.log();
        let (status, code) = self.source.status_and_code();
        let message = self.notice_message();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            },
            "notice": Notice::failure(&message)
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_kinds_collapse_to_unknown() {
        assert_eq!(
            AppError::Storage("bucket gone".into()).kind(),
            ErrorKind::Unknown
        );
        assert_eq!(AppError::Ai("boom".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn taxonomy_kinds_are_preserved() {
        assert_eq!(
            AppError::Network("timed out".into()).kind(),
            ErrorKind::Network
        );
        assert_eq!(AppError::Auth("401".into()).kind(), ErrorKind::Auth);
        assert_eq!(
            AppError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(AppError::NotFound("gone".into()).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn action_notice_masks_infrastructure_detail() {
        let err = AppError::Network("connect refused to 10.0.0.3:5432".into())
            .for_action("like content");
        assert_eq!(err.notice_message(), "Failed to like content");
    }

    #[test]
    fn action_notice_keeps_validation_reason() {
        let err =
            AppError::Validation("Comment text must not be empty".into()).for_action("add comment");
        assert_eq!(err.notice_message(), "Comment text must not be empty");
    }
}
