//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use guard_core::GuardError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Auth errors
    TokenExpired,
    TokenInvalid,
    Unauthorized,
    Forbidden,

    // Resource errors
    NotFound(String),

    // Validation errors
    ValidationError(String),

    // Guard rejections
    Guard(GuardError),

    // Generic errors
    InternalError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::TokenExpired | AppError::TokenInvalid | AppError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Guard(err) => guard_status(err),
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::TokenExpired => "token_expired",
            AppError::TokenInvalid => "token_invalid",
            AppError::Unauthorized => "unauthenticated",
            AppError::Forbidden => "forbidden",
            AppError::NotFound(_) => "not_found",
            AppError::ValidationError(_) => "validation_error",
            AppError::Guard(err) => err.code(),
            AppError::InternalError(_) => "internal_error",
        }
    }
}

fn guard_status(err: &GuardError) -> StatusCode {
    match err {
        GuardError::NotAuthorized | GuardError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        GuardError::InvalidScore(_) | GuardError::InvalidAmount | GuardError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        GuardError::ExceedsStake { .. }
        | GuardError::InsufficientBalance { .. }
        | GuardError::Overflow => StatusCode::UNPROCESSABLE_ENTITY,
        GuardError::ProtocolNotFound(_) => StatusCode::NOT_FOUND,
        GuardError::TransactionBlocked(_) => StatusCode::CONFLICT,
        GuardError::TransferFailed => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::TokenExpired => "Token has expired".to_string(),
            AppError::TokenInvalid => "Invalid token".to_string(),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Guard(err) => {
                tracing::debug!("Guard rejected request: {}", err);
                err.to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": self.code(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        AppError::Guard(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::TokenInvalid,
        }
    }
}
