//! Uniform response envelope.
//!
//! ```json
//! {"data": {"id": 1, "title": "Write docs"}, "status": "SUCCESS"}
//! {"status": "ERROR", "error": [{"message": "Todo with ID '9' not found"}]}
//! ```
//!
//! Fields that are `None` are left out of the JSON entirely.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Discriminator telling which branch of an [`ApiResponse`] is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Self::Success),
            "ERROR" => Ok(Self::Error),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// One error entry. `field` is `None` for entity-level errors.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub field: Option<String>,
    pub message: String,
}

impl ErrorDetail {
    /// Error about a single field of the payload
    #[must_use]
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Error about the entity as a whole
    #[must_use]
    pub fn entity(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Envelope holding either a payload (`SUCCESS`) or an error list (`ERROR`).
///
/// Build it with [`ApiResponse::success`] or [`ApiResponse::error`]; the
/// constructors keep `status` consistent with the populated branch.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub status: Status,
    pub error: Option<Vec<ErrorDetail>>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status: Status::Success,
            error: None,
        }
    }

    #[must_use]
    pub fn error(errors: Vec<ErrorDetail>) -> Self {
        Self {
            data: None,
            status: Status::Error,
            error: Some(errors),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Take the payload out, dropping the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Transform the payload, leaving status and errors untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            data: self.data.map(f),
            status: self.status,
            error: self.error,
        }
    }
}
