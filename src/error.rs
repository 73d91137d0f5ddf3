use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::database::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid status")]
    InvalidStatus,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Store(#[source] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidStatus
            | Error::BadRequest(_)
            | Error::InvalidScore(_)
            | Error::MissingCredentials
            | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Config(_) | Error::Store(_) | Error::Token(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to API clients. Server-side failures never echo their cause.
    pub fn public_message(&self) -> String {
        match self {
            Error::NotFound(_)
            | Error::InvalidStatus
            | Error::BadRequest(_)
            | Error::InvalidScore(_)
            | Error::MissingCredentials
            | Error::InvalidCredentials
            | Error::Conflict(_) => self.to_string(),
            Error::Unauthorized(reason) => (*reason).to_string(),
            Error::Validation(err) => err.to_string(),
            Error::Config(_) | Error::Store(_) | Error::Token(_) | Error::Internal(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = Json(json!({ "success": false, "error": self.public_message() }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Error::Conflict(msg),
            other => Error::Store(other),
        }
    }
}
