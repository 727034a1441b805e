//! # Error Handling
//!
//! Every failure in the request path is an [`ApiError`] value. Services return
//! it, handlers propagate it with `?`, and it is turned into an HTTP response
//! exactly once, in its [`IntoResponse`] implementation:
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `NotFound` | 404 | error envelope |
//! | `AlreadyExists` | 403 | error envelope |
//! | `OperationNotSupported` | 405 | error envelope |
//! | `Database` | 500 | error envelope, sanitized |
//! | `Default` | 409 | plain text `"Error handler: \n<message>"` |
//!
//! Database errors are logged with `tracing` and never sent to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use std::fmt;

use crate::response::{ApiResponse, ErrorDetail};
use crate::service::Operation;

/// Typed failure of a CRUD operation.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - no entity stored under the requested key
    NotFound {
        /// Resource type (e.g. "Todo")
        resource: String,
        /// Key that was looked up
        id: Option<String>,
    },

    /// 403 Forbidden - a value-equal entity is already stored
    AlreadyExists {
        /// Resource type
        resource: String,
    },

    /// 405 Method Not Allowed - the verb is disabled for this entity type
    OperationNotSupported {
        /// Resource type
        resource: String,
        /// Rejected operation
        operation: Operation,
    },

    /// 500 Internal Server Error - store failure (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },

    /// 409 Conflict - uncategorized failure, answered with a plain-text body
    Default {
        /// Message appended to the body
        message: String,
    },
}

impl ApiError {
    /// Create a 404 Not Found error
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(ApiError::not_found("Todo", Some(id.to_string())));
    /// ```
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    /// Create a 403 error for a duplicate create
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Create a 405 error for a disabled verb
    pub fn operation_not_supported(resource: impl Into<String>, operation: Operation) -> Self {
        Self::OperationNotSupported {
            resource: resource.into(),
            operation,
        }
    }

    /// Create a 500 error from a store failure
    ///
    /// The database error details are logged but NOT sent to the user.
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Create an uncategorized error (409, plain-text body)
    pub fn default_error(message: impl Into<String>) -> Self {
        Self::Default {
            message: message.into(),
        }
    }

    /// Map a store error raised while saving `resource`.
    ///
    /// A uniqueness violation on insert or update is reported as
    /// `AlreadyExists` rather than a 500.
    pub fn from_save(resource: impl Into<String>, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::already_exists(resource),
            _ => Self::from(err),
        }
    }

    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::FORBIDDEN,
            Self::OperationNotSupported { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Default { .. } => StatusCode::CONFLICT,
        }
    }

    /// User-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => {
                if let Some(id) = id {
                    format!("{resource} with ID '{id}' not found")
                } else {
                    format!("{resource} not found")
                }
            }
            Self::AlreadyExists { resource } => format!("{resource} already exists"),
            Self::OperationNotSupported {
                resource,
                operation,
            } => format!("{operation} is not supported for {resource}"),
            Self::Database { message, .. } | Self::Default { message } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        match &self {
            Self::Default { message } => {
                (status, format!("Error handler: \n{message}")).into_response()
            }
            _ => {
                let body = ApiResponse::<()>::error(vec![ErrorDetail::entity(self.user_message())]);
                (status, Json(body)).into_response()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Database { internal, .. } => Some(internal),
            _ => None,
        }
    }
}

/// `DbErr::RecordNotFound` becomes 404, everything else a sanitized 500.
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(msg) => {
                let resource = msg.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::database(err),
        }
    }
}

/// Error raised while building the web layer from a [`crate::config::WebConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An origin that is not a valid header value
    InvalidOrigin(String),
    /// A method name that is not a valid HTTP method
    InvalidMethod(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrigin(origin) => write!(f, "invalid CORS origin '{origin}'"),
            Self::InvalidMethod(method) => write!(f, "invalid CORS method '{method}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_not_found_with_id() {
        let err = ApiError::not_found("Todo", Some("7".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Todo with ID '7' not found");
    }

    #[test]
    fn test_not_found_without_id() {
        let err = ApiError::not_found("Todo", None);
        assert_eq!(err.user_message(), "Todo not found");
    }

    #[test]
    fn test_already_exists_is_forbidden() {
        let err = ApiError::already_exists("Todo");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.user_message(), "Todo already exists");
    }

    #[test]
    fn test_operation_not_supported() {
        let err = ApiError::operation_not_supported("Todo", Operation::Delete);
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.user_message(), "delete is not supported for Todo");
    }

    #[test]
    fn test_default_is_conflict() {
        let err = ApiError::default_error("Default Error");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(format!("{err}"), "Default Error");
    }

    #[test]
    fn test_database_error_is_sanitized() {
        let err = ApiError::database(DbErr::Custom("disk on fire".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "A database error occurred");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_dberr_record_not_found_becomes_404() {
        let api_err: ApiError = DbErr::RecordNotFound("Todo not found".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(api_err.user_message(), "Todo not found");
    }

    #[test]
    fn test_all_other_dberr_become_500() {
        let test_cases = vec![
            DbErr::Custom("Any custom error".to_string()),
            DbErr::Type("Type error".to_string()),
            DbErr::Json("JSON error".to_string()),
        ];

        for db_err in test_cases {
            let api_err: ApiError = db_err.into();
            assert_eq!(api_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_from_save_without_sql_error_falls_back() {
        let err = ApiError::from_save("Todo", DbErr::Custom("boom".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_typed_errors_render_envelope() {
        let response = ApiError::not_found("Todo", Some("3".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ERROR");
        assert!(body.get("data").is_none());
        let errors = body["error"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["message"], "Todo with ID '3' not found");
        assert!(errors[0].get("field").is_none());
    }

    #[tokio::test]
    async fn test_default_renders_plain_text() {
        let response = ApiError::default_error("Default Error").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_string(response).await, "Error handler: \nDefault Error");
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidMethod("FE TCH".to_string()).to_string(),
            "invalid CORS method 'FE TCH'"
        );
    }
}
