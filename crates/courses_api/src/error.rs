//! HTTP error mapping.
//!
//! # Invariants
//! - Every error body is JSON `{ "error": <CODE>, "message": <text> }`.
//! - Storage and worker failures map to 500 and are logged; everything else is
//!   a caller error and is not.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use courses_core::{RequestError, ServiceError};
use log::error;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    Request(RequestError),
    /// Body or query could not be deserialized.
    Payload(String),
    /// The blocking worker pool dropped the job.
    Worker,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl ApiError {
    /// Stable machine-readable code carried in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Service(ServiceError::NotFound { .. }) => "NOT_FOUND",
            Self::Service(ServiceError::Repo(_)) => "STORAGE_ERROR",
            Self::Service(err) => err.code().map_or("INTERNAL_ERROR", |code| code.as_str()),
            Self::Request(err) => err.code(),
            Self::Payload(_) => "INVALID_PAYLOAD",
            Self::Worker => "INTERNAL_ERROR",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Request(err) => write!(f, "{err}"),
            Self::Payload(message) => write!(f, "{message}"),
            Self::Worker => write!(f, "request worker was cancelled"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Request(err) => Some(err),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Validation(_)) => StatusCode::PRECONDITION_FAILED,
            Self::Service(ServiceError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            Self::Service(ServiceError::Repo(_)) | Self::Worker => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Request(_) | Self::Payload(_) => StatusCode::PRECONDITION_FAILED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                "event=http_request module=api status=error error_code={} error={}",
                self.code(),
                self
            );
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.code(),
            message: self.to_string(),
        })
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RequestError> for ApiError {
    fn from(value: RequestError) -> Self {
        Self::Request(value)
    }
}

impl From<BlockingError> for ApiError {
    fn from(_: BlockingError) -> Self {
        Self::Worker
    }
}
