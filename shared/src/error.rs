use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use thiserror::Error;

// SQLSTATE raised by PostgreSQL when a SERIALIZABLE transaction loses a race
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("transaction failed")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("{0}")]
    PathRejection(#[from] PathRejection),
    #[error("{0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("{0}")]
    FormRejection(#[from] FormRejection),
    #[error("authentication failed")]
    UnauthenticatedError,
    #[error("missing or malformed authorization header")]
    UnauthorizedError,
    #[error("operation not permitted")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("{0}")]
    CapacityExceeded(String),
    #[error("{0}")]
    ScheduleConflict(String),
    #[error("{0}")]
    DuplicateEnrollment(String),
    #[error("{0}")]
    VenueConflict(String),
    #[error("{0}")]
    EmailAlreadyRegistered(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::ConvertToUuidError(_)
            | AppError::JsonRejection(_)
            | AppError::PathRejection(_)
            | AppError::QueryRejection(_)
            | AppError::FormRejection(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::CapacityExceeded(_)
            | AppError::ScheduleConflict(_)
            | AppError::DuplicateEnrollment(_)
            | AppError::VenueConflict(_)
            | AppError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::TransactionError(e) | AppError::SpecificOperationError(e)
                if is_serialization_failure(e) =>
            {
                StatusCode::CONFLICT
            }
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // レスポンスボディの error に入れる種別
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_)
            | AppError::ConvertToUuidError(_)
            | AppError::JsonRejection(_)
            | AppError::PathRejection(_)
            | AppError::QueryRejection(_)
            | AppError::FormRejection(_) => "validation_error",
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                "authentication_error"
            }
            AppError::ForbiddenOperation => "authorization_error",
            AppError::EntityNotFound(_) => "not_found",
            AppError::CapacityExceeded(_) => "capacity_exceeded",
            AppError::ScheduleConflict(_) => "schedule_conflict",
            AppError::DuplicateEnrollment(_) => "duplicate_enrollment",
            AppError::VenueConflict(_) => "venue_conflict",
            AppError::EmailAlreadyRegistered(_) => "email_already_registered",
            AppError::UnprocessableEntity(_) => "unprocessable_entity",
            AppError::TransactionError(e) | AppError::SpecificOperationError(e)
                if is_serialization_failure(e) =>
            {
                "concurrent_modification"
            }
            _ => "internal_error",
        }
    }
}

fn is_serialization_failure(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == SERIALIZATION_FAILURE)
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "internal server error".to_string()
        } else if status_code == StatusCode::CONFLICT && self.kind() == "concurrent_modification" {
            "the request conflicted with a concurrent update, please retry".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: self.kind(),
            message,
        };
        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
