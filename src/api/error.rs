//! Endpoint error taxonomy and its mapping onto HTTP responses.

use serde::Serialize;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::{CreateAuthorError, CreatePostError, FindPostError};

/// Everything an endpoint can fail with.
///
/// The `Display` output is what the client sees in `{"error": ...}`. For
/// [`ApiError::Internal`] that is a fixed generic message; the source is
/// logged and never serialized.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller-supplied input is structurally invalid.
    #[error("{0}")]
    Validation(&'static str),

    #[error("post not found")]
    PostNotFound,

    /// The author referenced by a new post does not exist.
    #[error("author not found")]
    AuthorNotFound,

    #[error("email already in use")]
    DuplicateEmail,

    #[error("internal server error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    pub fn internal(e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Internal(e.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::BadRequest,
            Self::PostNotFound | Self::AuthorNotFound => Status::NotFound,
            Self::DuplicateEmail => Status::Conflict,
            Self::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<FindPostError> for ApiError {
    fn from(e: FindPostError) -> Self {
        match e {
            FindPostError::NotFound { .. } => Self::PostNotFound,
            FindPostError::Other(e) => Self::internal(e),
        }
    }
}

impl From<CreatePostError> for ApiError {
    fn from(e: CreatePostError) -> Self {
        match e {
            CreatePostError::AuthorNotFound { .. } => Self::AuthorNotFound,
            CreatePostError::Other(e) => Self::internal(e),
        }
    }
}

impl From<CreateAuthorError> for ApiError {
    fn from(e: CreateAuthorError) -> Self {
        match e {
            CreateAuthorError::DuplicateEmail { .. } => Self::DuplicateEmail,
            CreateAuthorError::Other(e) => Self::internal(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(source) = &self {
            error!(error.message = %source, error.details = ?source, "request failed");
        }
        Response::builder()
            .status(self.status())
            .json_value(&ErrorBody { error: self.to_string() })
    }
}
