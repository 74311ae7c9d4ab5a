//! REST error taxonomy shared by every HTTP surface.
//!
//! Handlers return [`ApiResult`]; the single [`IntoResponse`] impl below turns
//! any [`ApiError`] into the `{ timestamp, message, errors }` envelope.

mod messages;

use std::sync::Arc;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use messages::{CatalogError, MessageCatalog, catalog, install_catalog};

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

/// A single failed constraint on one field of a request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub object: &'static str,
    pub field: &'static str,
    pub code: &'static str,
    pub argument: Option<String>,
    pub default_message: String,
}

impl Violation {
    pub fn new(
        object: &'static str,
        field: &'static str,
        code: &'static str,
        default_message: impl Into<String>,
    ) -> Self {
        Self {
            object,
            field,
            code,
            argument: None,
            default_message: default_message.into(),
        }
    }

    pub fn with_argument(mut self, argument: impl ToString) -> Self {
        self.argument = Some(argument.to_string());
        self
    }

    /// `"<field> : <message>"`, with the message looked up in `catalog` first.
    pub fn render(&self, catalog: &MessageCatalog) -> String {
        format!("{} : {}", self.field, catalog.resolve(self))
    }
}

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("The {resource}{{id={id}}} does not exist.")]
    NotFound { resource: &'static str, id: i64 },
    #[error("Validation error(s)")]
    ValidationFailed(Vec<Violation>),
    #[error("Malformed JSON request")]
    MalformedBody,
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,
    #[error("Invalid path parameter")]
    InvalidPath,
    #[error("Internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ValidationFailed(_) | ApiError::MalformedBody | ApiError::InvalidPath => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the client-facing envelope, resolving violation text through `catalog`.
    pub fn to_envelope(&self, catalog: &MessageCatalog) -> ErrorEnvelope {
        let errors = match self {
            ApiError::ValidationFailed(violations) => violations
                .iter()
                .map(|violation| violation.render(catalog))
                .collect(),
            _ => Vec::new(),
        };
        ErrorEnvelope {
            timestamp: Utc::now(),
            message: self.to_string(),
            errors,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            _ => ApiError::MalformedBody,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidPath
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }
        let status = self.status();
        (status, Json(self.to_envelope(catalog()))).into_response()
    }
}

/// JSON body of every error response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub errors: Vec<String>,
}
