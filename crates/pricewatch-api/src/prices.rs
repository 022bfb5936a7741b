//! Handlers for `/prices` and the per-product price queries.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/prices` | Optional `?product_id=&sale_point_id=&date_id=&skip=&limit=` |
//! | `POST`   | `/prices` | Body: [`PriceFact`]; referents must exist; 201 |
//! | `GET`    | `/prices/{product_id}/{sale_point_id}/{date_id}` | 404 if not found |
//! | `DELETE` | `/prices/{product_id}/{sale_point_id}/{date_id}` | 204, or 404 |
//! | `GET`    | `/products/{id}/prices` | History: `?sale_point_id=&start_date=&end_date=` |
//! | `GET`    | `/products/{id}/price-comparison` | `?specific_date=` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pricewatch_analytics::{ComparisonRow, PricePoint, history};
use pricewatch_core::{
  entity::PriceFact,
  store::{CatalogStore, PriceFilter},
  validate,
};
use serde::Deserialize;

use crate::{error::ApiError, products::DEFAULT_PAGE_LIMIT};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub product_id:    Option<i64>,
  pub sale_point_id: Option<i64>,
  pub date_id:       Option<i64>,
  pub skip:          Option<u32>,
  pub limit:         Option<u32>,
}

/// `GET /prices[?product_id=&sale_point_id=&date_id=&skip=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<PriceFact>>, ApiError>
where
  S: CatalogStore,
{
  let filter = PriceFilter {
    product_id:    params.product_id,
    sale_point_id: params.sale_point_id,
    date_id:       params.date_id,
    limit:         Some(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
    offset:        params.skip,
  };
  let facts = store
    .list_prices(&filter)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(facts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /prices` — the referenced product, sale point, and date must all
/// exist; the price must be positive.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PriceFact>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  validate::price(&body)?;

  if store
    .get_product(body.product_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::NotFound(format!(
      "product {} not found",
      body.product_id
    )));
  }
  if store
    .get_sale_point(body.sale_point_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::NotFound(format!(
      "sale point {} not found",
      body.sale_point_id
    )));
  }
  if store
    .get_date(body.date_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("date {} not found", body.date_id)));
  }

  let fact = store
    .add_price(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(fact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /prices/{product_id}/{sale_point_id}/{date_id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path((product_id, sale_point_id, date_id)): Path<(i64, i64, i64)>,
) -> Result<Json<PriceFact>, ApiError>
where
  S: CatalogStore,
{
  let fact = store
    .get_price(product_id, sale_point_id, date_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "price not found for product {product_id}, sale point \
         {sale_point_id}, date {date_id}"
      ))
    })?;
  Ok(Json(fact))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /prices/{product_id}/{sale_point_id}/{date_id}` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path((product_id, sale_point_id, date_id)): Path<(i64, i64, i64)>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  let deleted = store
    .delete_price(product_id, sale_point_id, date_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!(
      "price not found for product {product_id}, sale point {sale_point_id}, \
       date {date_id}"
    )))
  }
}

// ─── Price history ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
  pub sale_point_id: Option<i64>,
  /// Inclusive lower bound, ISO `YYYY-MM-DD`.
  pub start_date:    Option<String>,
  /// Inclusive upper bound, ISO `YYYY-MM-DD`.
  pub end_date:      Option<String>,
}

/// `GET /products/{id}/prices` — chronological price history.
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<PricePoint>>, ApiError>
where
  S: CatalogStore,
{
  let points = history::price_history(
    store.as_ref(),
    id,
    params.sale_point_id,
    params.start_date.as_deref(),
    params.end_date.as_deref(),
  )
  .await?;
  Ok(Json(points))
}

// ─── Price comparison ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
  /// ISO `YYYY-MM-DD`; defaults to the latest observed date.
  pub specific_date: Option<String>,
}

/// `GET /products/{id}/price-comparison` — one row per sale point.
pub async fn comparison<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Query(params): Query<ComparisonParams>,
) -> Result<Json<Vec<ComparisonRow>>, ApiError>
where
  S: CatalogStore,
{
  let rows = history::price_comparison(
    store.as_ref(),
    id,
    params.specific_date.as_deref(),
  )
  .await?;
  Ok(Json(rows))
}
