use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

/// Error body sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultBody<T> {
    Found(T),
    Error(ApiError),
}

/// A pair (http-status, error-or-result) relayed verbatim by the handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResult<T> {
    pub status: StatusCode,
    pub body: ResultBody<T>,
}

impl<T> NormalizedResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: ResultBody::Found(value),
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ResultBody::Error(ApiError::new(message)),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The found value, if any.
    pub fn found(&self) -> Option<&T> {
        match &self.body {
            ResultBody::Found(value) => Some(value),
            ResultBody::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ResultBody::Found(_) => None,
            ResultBody::Error(err) => Some(err.message.as_str()),
        }
    }
}

impl<T: Serialize> NormalizedResult<T> {
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body)
    }
}
