//! Handlers for `/listings` endpoints — product / sale-point associations.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/listings` | Optional `?product_id=&sale_point_id=&skip=&limit=` |
//! | `POST`   | `/listings` | Body: [`Listing`]; referents must exist; 201 |
//! | `GET`    | `/listings/{product_id}/{sale_point_id}` | 404 if not found |
//! | `DELETE` | `/listings/{product_id}/{sale_point_id}` | 204, or 404 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pricewatch_core::{
  entity::Listing,
  store::{CatalogStore, ListingQuery},
};
use serde::Deserialize;

use crate::{error::ApiError, products::DEFAULT_PAGE_LIMIT};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub product_id:    Option<i64>,
  pub sale_point_id: Option<i64>,
  pub skip:          Option<u32>,
  pub limit:         Option<u32>,
}

/// `GET /listings[?product_id=&sale_point_id=&skip=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Listing>>, ApiError>
where
  S: CatalogStore,
{
  let query = ListingQuery {
    product_id:    params.product_id,
    sale_point_id: params.sale_point_id,
    limit:         Some(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
    offset:        params.skip,
  };
  let listings = store
    .list_listings(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(listings))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /listings` — the referenced product and sale point must exist.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Listing>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
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

  let listing = store
    .add_listing(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(listing)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /listings/{product_id}/{sale_point_id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path((product_id, sale_point_id)): Path<(i64, i64)>,
) -> Result<Json<Listing>, ApiError>
where
  S: CatalogStore,
{
  let listing = store
    .get_listing(product_id, sale_point_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "listing not found for product {product_id}, sale point {sale_point_id}"
      ))
    })?;
  Ok(Json(listing))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /listings/{product_id}/{sale_point_id}` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path((product_id, sale_point_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  let deleted = store
    .delete_listing(product_id, sale_point_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!(
      "listing not found for product {product_id}, sale point {sale_point_id}"
    )))
  }
}
