//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("validation failed: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<pricewatch_core::Error> for ApiError {
  fn from(e: pricewatch_core::Error) -> Self {
    match e {
      pricewatch_core::Error::InvalidDate(value) => {
        Self::BadRequest(format!("invalid date {value:?}: expected YYYY-MM-DD"))
      }
      pricewatch_core::Error::Validation(message) => Self::Validation(message),
    }
  }
}

impl From<pricewatch_analytics::Error> for ApiError {
  fn from(e: pricewatch_analytics::Error) -> Self {
    match e {
      pricewatch_analytics::Error::InvalidDate(value) => {
        Self::BadRequest(format!("invalid date {value:?}: expected YYYY-MM-DD"))
      }
      pricewatch_analytics::Error::Store(inner) => Self::Store(inner),
    }
  }
}
