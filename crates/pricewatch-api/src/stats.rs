//! Handlers for `/stats` endpoints — thin wrappers over the query layer.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stats/products-with-prices-count` | Bare number |
//! | `GET`  | `/stats/products-by-sale-point` | Listing counts per name |
//! | `GET`  | `/stats/sale-points-by-city` | Counts per city |
//! | `GET`  | `/stats/sale-points-by-kind` | Counts per kind |
//! | `GET`  | `/stats/prices-by-month` | Count + mean per (year, month) |
//! | `GET`  | `/stats/average-prices-by-product` | Avg/min/max per title |
//! | `GET`  | `/stats/products/{id}/price-evolution` | Per-date avg/min/max |
//! | `GET`  | `/stats/products/{id}/city-comparison` | Latest price per city |
//! | `GET`  | `/stats/price-trends` | `?days=` (default 30) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use pricewatch_analytics::{
  CityComparison, EvolutionPoint, MonthlyPrices, ProductPriceSummary,
  ProductsBySalePoint, SalePointsByCity, SalePointsByKind, TrendRow, stats,
};
use pricewatch_core::store::CatalogStore;
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /stats/products-with-prices-count`
pub async fn products_with_prices_count<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<u64>, ApiError>
where
  S: CatalogStore,
{
  let count = stats::products_with_prices_count(store.as_ref()).await?;
  Ok(Json(count))
}

/// `GET /stats/products-by-sale-point`
pub async fn products_by_sale_point<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ProductsBySalePoint>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::products_by_sale_point(store.as_ref()).await?;
  Ok(Json(rows))
}

/// `GET /stats/sale-points-by-city`
pub async fn sale_points_by_city<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SalePointsByCity>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::sale_points_by_city(store.as_ref()).await?;
  Ok(Json(rows))
}

/// `GET /stats/sale-points-by-kind`
pub async fn sale_points_by_kind<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SalePointsByKind>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::sale_points_by_kind(store.as_ref()).await?;
  Ok(Json(rows))
}

/// `GET /stats/prices-by-month`
pub async fn prices_by_month<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<MonthlyPrices>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::prices_by_month(store.as_ref()).await?;
  Ok(Json(rows))
}

/// `GET /stats/average-prices-by-product`
pub async fn average_prices_by_product<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ProductPriceSummary>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::average_prices_by_product(store.as_ref()).await?;
  Ok(Json(rows))
}

/// `GET /stats/products/{id}/price-evolution`
pub async fn price_evolution<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<EvolutionPoint>>, ApiError>
where
  S: CatalogStore,
{
  let points = stats::price_evolution(store.as_ref(), id).await?;
  Ok(Json(points))
}

/// `GET /stats/products/{id}/city-comparison`
pub async fn city_comparison<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<CityComparison>>, ApiError>
where
  S: CatalogStore,
{
  let rows = stats::city_price_comparison(store.as_ref(), id).await?;
  Ok(Json(rows))
}

// ─── Trends ───────────────────────────────────────────────────────────────────

pub const DEFAULT_TREND_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct TrendParams {
  /// Lookback window in days, measured from today.
  pub days: Option<u32>,
}

/// `GET /stats/price-trends[?days=]`
pub async fn price_trends<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<TrendParams>,
) -> Result<Json<Vec<TrendRow>>, ApiError>
where
  S: CatalogStore,
{
  let days = params.days.unwrap_or(DEFAULT_TREND_DAYS);
  let rows = stats::price_trends(store.as_ref(), days, None).await?;
  Ok(Json(rows))
}
