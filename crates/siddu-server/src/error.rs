//! Error types, the JSON body extractor, and the axum `IntoResponse`
//! implementation.

use axum::{
  Json,
  extract::{FromRequest, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::token::AuthError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(String),
  #[error("{0}")]
  Unauthenticated(String),
  #[error("{0}")]
  Forbidden(String),
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Conflict(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  /// Password hashing, token signing and other non-store failures.
  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn not_found(what: &str) -> Self { Self::NotFound(format!("{what} not found")) }
}

impl From<siddu_core::Error> for Error {
  fn from(e: siddu_core::Error) -> Self { Self::Validation(e.to_string()) }
}

impl From<AuthError> for Error {
  fn from(e: AuthError) -> Self { Self::Unauthenticated(e.to_string()) }
}

impl From<JsonRejection> for Error {
  fn from(rejection: JsonRejection) -> Self {
    Self::Validation(rejection.body_text())
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      Error::Validation(m) => (StatusCode::BAD_REQUEST, m),
      Error::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, m),
      Error::Forbidden(m) => (StatusCode::FORBIDDEN, m),
      Error::NotFound(m) => (StatusCode::NOT_FOUND, m),
      Error::Conflict(m) => (StatusCode::CONFLICT, m),
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
      }
      Error::Internal(m) => {
        tracing::error!(error = %m, "internal failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

/// `axum::Json` with body rejections reported as a 400 `{"error"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);
