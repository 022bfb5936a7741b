//! Handlers for `/products` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/products` | Optional `?skip=&limit=` (limit defaults to 100) |
//! | `POST`   | `/products` | Body: [`NewProduct`]; 201 + stored product |
//! | `GET`    | `/products/search` | `?title=&min_prices=` |
//! | `GET`    | `/products/{id}` | 404 if not found |
//! | `PUT`    | `/products/{id}` | Full-field update |
//! | `DELETE` | `/products/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pricewatch_core::{
  entity::{NewProduct, Product},
  store::{CatalogStore, ProductQuery, ProductSearch},
  validate,
};
use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_PAGE_LIMIT: u32 = 100;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub skip:  Option<u32>,
  pub limit: Option<u32>,
}

/// `GET /products[?skip=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: CatalogStore,
{
  let query = ProductQuery {
    limit:  Some(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
    offset: params.skip,
  };
  let products = store
    .list_products(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(products))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /products` — body: `{"title":"...","link":null}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewProduct>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let input = validate::product(body)?;
  let product = store
    .add_product(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(product)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /products/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError>
where
  S: CatalogStore,
{
  let product = store
    .get_product(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /products/{id}` — replaces every field.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
  Json(body): Json<NewProduct>,
) -> Result<Json<Product>, ApiError>
where
  S: CatalogStore,
{
  let input = validate::product(body)?;
  let product = store
    .update_product(id, input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /products/{id}` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  let deleted = store
    .delete_product(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("product {id} not found")))
  }
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  /// Case-insensitive substring match on the title.
  pub title:      Option<String>,
  /// Only products with at least this many recorded prices.
  pub min_prices: Option<u32>,
}

/// `GET /products/search[?title=&min_prices=]`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: CatalogStore,
{
  let search = ProductSearch {
    title:      params.title,
    min_prices: params.min_prices,
  };
  let products = store
    .search_products(&search)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(products))
}
