//! Handlers for `/sale-points` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/sale-points` | Optional `?city=&kind=&skip=&limit=` |
//! | `POST`   | `/sale-points` | Body: [`NewSalePoint`]; 201 + stored row |
//! | `GET`    | `/sale-points/{id}` | 404 if not found |
//! | `PUT`    | `/sale-points/{id}` | Full-field update |
//! | `DELETE` | `/sale-points/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pricewatch_core::{
  entity::{NewSalePoint, SalePoint, SalePointKind},
  store::{CatalogStore, SalePointQuery},
  validate,
};
use serde::Deserialize;

use crate::{error::ApiError, products::DEFAULT_PAGE_LIMIT};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub city:  Option<String>,
  pub kind:  Option<SalePointKind>,
  pub skip:  Option<u32>,
  pub limit: Option<u32>,
}

/// `GET /sale-points[?city=&kind=&skip=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SalePoint>>, ApiError>
where
  S: CatalogStore,
{
  let query = SalePointQuery {
    city:   params.city,
    kind:   params.kind,
    limit:  Some(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
    offset: params.skip,
  };
  let sale_points = store
    .list_sale_points(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(sale_points))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /sale-points`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewSalePoint>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let input = validate::sale_point(body)?;
  let sale_point = store
    .add_sale_point(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(sale_point)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sale-points/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<SalePoint>, ApiError>
where
  S: CatalogStore,
{
  let sale_point = store
    .get_sale_point(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("sale point {id} not found")))?;
  Ok(Json(sale_point))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /sale-points/{id}` — replaces every field.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewSalePoint>,
) -> Result<Json<SalePoint>, ApiError>
where
  S: CatalogStore,
{
  let input = validate::sale_point(body)?;
  let sale_point = store
    .update_sale_point(id, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("sale point {id} not found")))?;
  Ok(Json(sale_point))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /sale-points/{id}` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  let deleted = store
    .delete_sale_point(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("sale point {id} not found")))
  }
}
