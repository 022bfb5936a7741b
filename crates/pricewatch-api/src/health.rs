//! Handler for `GET /health`.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Utc;
use pricewatch_core::store::CatalogStore;
use serde_json::{Value, json};

/// `GET /health` — probes the store and reports overall status.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Value>
where
  S: CatalogStore,
{
  let healthy = store.ping().await;
  Json(json!({
    "status": if healthy { "OK" } else { "ERROR" },
    "database": if healthy { "connected" } else { "disconnected" },
    "timestamp": Utc::now().to_rfc3339(),
  }))
}
