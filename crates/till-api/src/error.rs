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
  /// Any failure during filter/sort/paginate execution. Surfaced to the
  /// caller as a generic message; the source is logged, never returned raw.
  #[error("query failed: {0}")]
  QueryFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a storage-layer error, logging the failing operation.
  pub fn query<E>(operation: &'static str, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!(operation, error = %source, "store query failed");
    Self::QueryFailed(Box::new(source))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let body = match &self {
      ApiError::QueryFailed(_) => json!({ "error": "failed to fetch transactions" }),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
  }
}
