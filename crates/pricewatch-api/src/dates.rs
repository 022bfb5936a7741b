//! Handlers for `/dates` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/dates` | Optional `?year=&month=&skip=&limit=` |
//! | `POST`   | `/dates` | Body: [`NewDateRecord`]; 201 + stored row |
//! | `POST`   | `/dates/from-iso` | `?date=YYYY-MM-DD`; decomposes the day |
//! | `GET`    | `/dates/{id}` | 404 if not found |
//! | `DELETE` | `/dates/{id}` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Datelike;
use pricewatch_core::{
  date,
  entity::{DateRecord, NewDateRecord},
  store::{CatalogStore, DateQuery},
  validate,
};
use serde::Deserialize;

use crate::{error::ApiError, products::DEFAULT_PAGE_LIMIT};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub year:  Option<i32>,
  pub month: Option<u32>,
  pub skip:  Option<u32>,
  pub limit: Option<u32>,
}

/// `GET /dates[?year=&month=&skip=&limit=]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<DateRecord>>, ApiError>
where
  S: CatalogStore,
{
  let query = DateQuery {
    year:   params.year,
    month:  params.month,
    limit:  Some(params.limit.unwrap_or(DEFAULT_PAGE_LIMIT)),
    offset: params.skip,
  };
  let dates = store
    .list_dates(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(dates))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /dates` — body: `{"day":15,"month":3,"year":2024}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewDateRecord>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  validate::date(&body)?;
  let record = store
    .add_date(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Create from ISO ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IsoParams {
  pub date: String,
}

/// `POST /dates/from-iso?date=YYYY-MM-DD` — parses and decomposes the day.
pub async fn create_from_iso<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<IsoParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let day = date::parse_iso(&params.date)?;
  let input = NewDateRecord {
    day:   day.day(),
    month: day.month(),
    year:  day.year(),
  };
  validate::date(&input)?;
  let record = store
    .add_date(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /dates/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<DateRecord>, ApiError>
where
  S: CatalogStore,
{
  let record = store
    .get_date(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("date {id} not found")))?;
  Ok(Json(record))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /dates/{id}` — 204 on success.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
{
  let deleted = store
    .delete_date(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if deleted {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("date {id} not found")))
  }
}
