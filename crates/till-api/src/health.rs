//! Handler for `GET /health`.
//!
//! A failing store yields a degraded payload rather than a 5xx — the store
//! being unavailable is exactly what this endpoint exists to report.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};
use till_core::store::TransactionStore;

/// `GET /health`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Value>
where
  S: TransactionStore,
{
  match store.record_count().await {
    Ok(count) => Json(json!({
      "status": "ok",
      "database": "connected",
      "recordCount": count,
    })),
    Err(e) => {
      tracing::warn!(error = %e, "health check could not reach the store");
      Json(json!({
        "status": "degraded",
        "database": "unavailable",
        "recordCount": 0,
      }))
    }
  }
}
