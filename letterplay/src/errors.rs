use crate::db::errors::DbError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use utoipa::ToSchema;

pub const REVIEW_NOT_FOUND: &str = "Avaliação não encontrada";
pub const NOT_REVIEW_AUTHOR: &str = "Acesso negado: Você não é o autor desta avaliação";

#[derive(ThisError, Debug)]
pub enum Error {
    /// Authentication required but not provided
    #[error("Not authenticated")]
    Unauthenticated { message: Option<String> },

    /// Authenticated user may not act on this resource
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{message}")]
    NotFound { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl Error {
    pub fn review_not_found() -> Self {
        Error::NotFound {
            message: REVIEW_NOT_FOUND.to_string(),
        }
    }

    pub fn not_review_author() -> Self {
        Error::Forbidden {
            message: NOT_REVIEW_AUTHOR.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Error::Forbidden { .. } => StatusCode::FORBIDDEN,
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::ForeignKeyViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthenticated { message } => message.clone().unwrap_or_else(|| "Authentication required".to_string()),
            Error::Forbidden { message } | Error::BadRequest { message } | Error::NotFound { message } => message.clone(),
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::NotFound => "Resource not found".to_string(),
                DbError::UniqueViolation { .. } => "Resource already exists".to_string(),
                DbError::ForeignKeyViolation { table, constraint, .. } => match (table.as_deref(), constraint.as_deref()) {
                    (Some("avaliacoes"), Some(c)) if c.contains("id_jogo") => "Jogo não encontrado".to_string(),
                    _ => "Invalid reference to related resource".to_string(),
                },
                DbError::CheckViolation { .. } => "Invalid data provided".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::Unauthenticated { .. } | Error::Forbidden { .. } => {
                tracing::info!("Authorization error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let body = ErrorBody {
            detail: self.user_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// A body that doesn't parse as the expected JSON still answers with `{"detail": ...}`
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: Error) -> (StatusCode, ErrorBody) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_review_errors_carry_wire_messages() {
        let (status, body) = body_of(Error::review_not_found()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "Avaliação não encontrada");

        let (status, body) = body_of(Error::not_review_author()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.detail, "Acesso negado: Você não é o autor desta avaliação");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (status, body) = body_of(Error::Other(anyhow::anyhow!("connection reset by peer"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Internal server error");

        let (status, body) = body_of(Error::Database(DbError::Other(anyhow::anyhow!("syntax error at or near")))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.detail, "Database error occurred");
    }

    #[test]
    fn test_database_error_status_codes() {
        let fk = Error::Database(DbError::ForeignKeyViolation {
            constraint: Some("avaliacoes_id_jogo_fkey".to_string()),
            table: Some("avaliacoes".to_string()),
            message: "violates foreign key constraint".to_string(),
        });
        assert_eq!(fk.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(fk.user_message(), "Jogo não encontrado");

        assert_eq!(Error::Database(DbError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Unauthenticated { message: None }.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(Error::Unauthenticated { message: None }.user_message(), "Authentication required");
    }
}
