use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Foreign key violation".into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Errors raised by the upload-authorization flow.
///
/// `ContentType` is the recoverable client-error class: a filename that maps
/// to no known type, or to a non-image type. It is answered with a bare
/// 400 and the detail stays server-side. Everything else rides through
/// `Unexpected` to the platform's 5xx handling untouched.
#[derive(Debug)]
pub enum UploadError {
    ContentType(String),
    Validation(Vec<FieldError>),
    Unexpected(AppError),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::ContentType(detail) => write!(f, "Content type error: {}", detail),
            UploadError::Validation(errors) => {
                let messages = errors
                    .iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            UploadError::Unexpected(inner) => write!(f, "{}", inner),
        }
    }
}

impl ResponseError for UploadError {
    fn error_response(&self) -> HttpResponse {
        match self {
            // Generic body on purpose: the rejection reason is logged, not leaked.
            UploadError::ContentType(detail) => {
                tracing::warn!("Rejected upload request: {}", detail);
                HttpResponse::BadRequest()
                    .insert_header(ContentType::json())
                    .json(serde_json::json!({"error": "Bad Request"}))
            }
            UploadError::Validation(errors) => HttpResponse::BadRequest()
                .insert_header(ContentType::json())
                .json(serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })),
            UploadError::Unexpected(inner) => inner.error_response(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::ContentType(_) => StatusCode::BAD_REQUEST,
            UploadError::Validation(_) => StatusCode::BAD_REQUEST,
            UploadError::Unexpected(inner) => inner.status_code(),
        }
    }
}

impl From<AppError> for UploadError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(errors) => UploadError::Validation(errors),
            other => UploadError::Unexpected(other),
        }
    }
}

impl From<ValidationErrors> for UploadError {
    fn from(errors: ValidationErrors) -> Self {
        UploadError::from(AppError::from(errors))
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Wrong credentials")]
    WrongCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Token expired")]
    TokenExpired,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Missing JWT service")]
    MissingJwtService,

    #[display("Invalid user ID")]
    InvalidUserId,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let error_message = match self {
            AuthError::TokenExpired => "Token has expired".to_string(),
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"error": error_message}))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::WrongCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MissingJwtService => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::InvalidUserId => StatusCode::BAD_REQUEST,
        }
    }
}

impl AuthError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(_: ValidationErrors) -> Self {
        AuthError::MissingCredentials
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_errors_map_to_bad_request() {
        let err = UploadError::ContentType("no type for 'notes'".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn content_type_response_hides_internal_detail() {
        let err = UploadError::ContentType("mime lookup failed for secret-file".into());
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body should resolve");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Bad Request"));
        assert!(!text.contains("secret-file"));
    }

    #[test]
    fn unexpected_errors_keep_their_status() {
        let err = UploadError::Unexpected(AppError::InternalError("signer down".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = UploadError::Unexpected(AppError::NotFound("user".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_split_out_of_unexpected() {
        let err = UploadError::from(AppError::ValidationError(vec![FieldError {
            field: "filename".into(),
            message: "too long".into(),
        }]));
        assert!(matches!(err, UploadError::Validation(_)));
    }
}
