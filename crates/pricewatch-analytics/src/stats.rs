//! Aggregate statistics: per-date evolution, city comparison, rolling-window
//! trends, and the descriptive group-by counts.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use pricewatch_core::{
  entity::SalePointKind,
  store::{CatalogStore, ListingQuery, PriceFilter},
};

use crate::{Error, Result, lookup, window};

// ─── Result types ────────────────────────────────────────────────────────────

/// Per-date price statistics for one product across all sale points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
  pub date_id:   i64,
  pub year:      i32,
  pub month:     u32,
  pub day:       u32,
  pub avg_price: f64,
  pub min_price: f64,
  pub max_price: f64,
}

/// Latest-price statistics for one product, aggregated per city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityComparison {
  /// `None` groups the sale points that have no city on record.
  pub city:      Option<String>,
  pub avg_price: f64,
  pub min_price: f64,
  pub max_price: f64,
}

/// Rolling-window price statistics for one product title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
  pub title:           String,
  pub avg_price:       f64,
  /// `max_price - min_price` over the window; never negative.
  pub price_variation: f64,
  pub max_price:       f64,
  pub min_price:       f64,
}

/// How many products a sale point carries (by listing, not by price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsBySalePoint {
  pub name:          String,
  pub product_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePointsByCity {
  pub city:             Option<String>,
  pub sale_point_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePointsByKind {
  pub kind:             Option<SalePointKind>,
  pub sale_point_count: u64,
}

/// Price observation count and mean for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrices {
  pub year:        i32,
  pub month:       u32,
  pub price_count: u64,
  pub avg_price:   f64,
}

/// All-time price statistics per product title. Products sharing a title
/// merge into a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPriceSummary {
  pub title:     String,
  pub avg_price: f64,
  pub min_price: f64,
  pub max_price: f64,
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
  values.iter().sum::<f64>() / values.len() as f64
}

fn min_of(values: &[f64]) -> f64 {
  values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_of(values: &[f64]) -> f64 {
  values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

// ─── Price evolution ─────────────────────────────────────────────────────────

/// Average/min/max price of `product_id` for every date it was observed,
/// ordered ascending by (year, month, day).
pub async fn price_evolution<S>(
  store: &S,
  product_id: i64,
) -> Result<Vec<EvolutionPoint>>
where
  S: CatalogStore,
{
  let filter = PriceFilter {
    product_id: Some(product_id),
    ..PriceFilter::default()
  };
  let facts = store.list_prices(&filter).await.map_err(Error::store)?;
  let dates = lookup::dates_by_id(store).await?;

  let mut by_date: HashMap<i64, Vec<f64>> = HashMap::new();
  for fact in &facts {
    by_date.entry(fact.date_id).or_default().push(fact.price);
  }

  let mut points: Vec<EvolutionPoint> = by_date
    .into_iter()
    .filter_map(|(date_id, prices)| {
      let record = dates.get(&date_id)?;
      Some(EvolutionPoint {
        date_id,
        year:      record.year,
        month:     record.month,
        day:       record.day,
        avg_price: mean(&prices),
        min_price: min_of(&prices),
        max_price: max_of(&prices),
      })
    })
    .collect();

  points.sort_by_key(|p| (p.year, p.month, p.day));
  Ok(points)
}

// ─── City comparison ─────────────────────────────────────────────────────────

/// Average/min/max of `product_id`'s latest price per sale point, grouped
/// by city.
///
/// "Latest" is the fact with the highest date id among each sale point's
/// observations — id-based recency, as in
/// [`price_comparison`](crate::history::price_comparison). Sale points
/// without a city aggregate under the `None` key.
pub async fn city_price_comparison<S>(
  store: &S,
  product_id: i64,
) -> Result<Vec<CityComparison>>
where
  S: CatalogStore,
{
  let filter = PriceFilter {
    product_id: Some(product_id),
    ..PriceFilter::default()
  };
  let facts = store.list_prices(&filter).await.map_err(Error::store)?;
  let sale_points = lookup::sale_points_by_id(store).await?;

  let mut latest_date: HashMap<i64, i64> = HashMap::new();
  for fact in &facts {
    latest_date
      .entry(fact.sale_point_id)
      .and_modify(|max| *max = (*max).max(fact.date_id))
      .or_insert(fact.date_id);
  }

  let mut by_city: BTreeMap<Option<String>, Vec<f64>> = BTreeMap::new();
  for fact in &facts {
    if latest_date.get(&fact.sale_point_id) != Some(&fact.date_id) {
      continue;
    }
    let Some(sale_point) = sale_points.get(&fact.sale_point_id) else {
      continue;
    };
    by_city
      .entry(sale_point.city.clone())
      .or_default()
      .push(fact.price);
  }

  Ok(
    by_city
      .into_iter()
      .map(|(city, prices)| CityComparison {
        city,
        avg_price: mean(&prices),
        min_price: min_of(&prices),
        max_price: max_of(&prices),
      })
      .collect(),
  )
}

// ─── Price trends ────────────────────────────────────────────────────────────

/// Per-title price statistics over the window `[as_of - days, as_of]`,
/// ordered descending by average price.
///
/// `as_of` defaults to today (UTC). Window bounds use the same
/// component-wise comparison as
/// [`price_history`](crate::history::price_history).
pub async fn price_trends<S>(
  store: &S,
  days: u32,
  as_of: Option<NaiveDate>,
) -> Result<Vec<TrendRow>>
where
  S: CatalogStore,
{
  let end = as_of.unwrap_or_else(|| Utc::now().date_naive());
  let start = end
    .checked_sub_days(Days::new(u64::from(days)))
    .unwrap_or(NaiveDate::MIN);

  let facts = store
    .list_prices(&PriceFilter::default())
    .await
    .map_err(Error::store)?;
  let dates = lookup::dates_by_id(store).await?;
  let products = lookup::products_by_id(store).await?;

  let mut by_title: BTreeMap<String, Vec<f64>> = BTreeMap::new();
  for fact in &facts {
    let Some(record) = dates.get(&fact.date_id) else { continue };
    if !window::within(record, Some(start), Some(end)) {
      continue;
    }
    let Some(product) = products.get(&fact.product_id) else { continue };
    by_title
      .entry(product.title.clone())
      .or_default()
      .push(fact.price);
  }

  let mut rows: Vec<TrendRow> = by_title
    .into_iter()
    .map(|(title, prices)| {
      let min_price = min_of(&prices);
      let max_price = max_of(&prices);
      TrendRow {
        title,
        avg_price: mean(&prices),
        price_variation: max_price - min_price,
        max_price,
        min_price,
      }
    })
    .collect();

  // Descending by average; title breaks ties so the order is stable.
  rows.sort_by(|a, b| {
    b.avg_price
      .partial_cmp(&a.avg_price)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.title.cmp(&b.title))
  });
  Ok(rows)
}

// ─── Descriptive statistics ──────────────────────────────────────────────────

/// Number of distinct products with at least one recorded price.
pub async fn products_with_prices_count<S>(store: &S) -> Result<u64>
where
  S: CatalogStore,
{
  let facts = store
    .list_prices(&PriceFilter::default())
    .await
    .map_err(Error::store)?;
  let distinct: HashSet<i64> = facts.iter().map(|f| f.product_id).collect();
  Ok(distinct.len() as u64)
}

/// Listing count per sale-point name. Sale points sharing a name merge.
pub async fn products_by_sale_point<S>(
  store: &S,
) -> Result<Vec<ProductsBySalePoint>>
where
  S: CatalogStore,
{
  let listings = store
    .list_listings(&ListingQuery::default())
    .await
    .map_err(Error::store)?;
  let sale_points = lookup::sale_points_by_id(store).await?;

  let mut counts: BTreeMap<String, u64> = BTreeMap::new();
  for listing in &listings {
    let Some(sale_point) = sale_points.get(&listing.sale_point_id) else {
      continue;
    };
    *counts.entry(sale_point.name.clone()).or_insert(0) += 1;
  }

  Ok(
    counts
      .into_iter()
      .map(|(name, product_count)| ProductsBySalePoint { name, product_count })
      .collect(),
  )
}

/// Sale-point count per city; `None` counts the city-less ones.
pub async fn sale_points_by_city<S>(store: &S) -> Result<Vec<SalePointsByCity>>
where
  S: CatalogStore,
{
  let sale_points = lookup::sale_points_by_id(store).await?;

  let mut counts: BTreeMap<Option<String>, u64> = BTreeMap::new();
  for sale_point in sale_points.values() {
    *counts.entry(sale_point.city.clone()).or_insert(0) += 1;
  }

  Ok(
    counts
      .into_iter()
      .map(|(city, sale_point_count)| SalePointsByCity {
        city,
        sale_point_count,
      })
      .collect(),
  )
}

/// Sale-point count per kind; `None` counts the unclassified ones.
pub async fn sale_points_by_kind<S>(store: &S) -> Result<Vec<SalePointsByKind>>
where
  S: CatalogStore,
{
  let sale_points = lookup::sale_points_by_id(store).await?;

  let mut counts: BTreeMap<Option<SalePointKind>, u64> = BTreeMap::new();
  for sale_point in sale_points.values() {
    *counts.entry(sale_point.kind).or_insert(0) += 1;
  }

  Ok(
    counts
      .into_iter()
      .map(|(kind, sale_point_count)| SalePointsByKind {
        kind,
        sale_point_count,
      })
      .collect(),
  )
}

/// Observation count and mean price per (year, month), ascending.
pub async fn prices_by_month<S>(store: &S) -> Result<Vec<MonthlyPrices>>
where
  S: CatalogStore,
{
  let facts = store
    .list_prices(&PriceFilter::default())
    .await
    .map_err(Error::store)?;
  let dates = lookup::dates_by_id(store).await?;

  let mut by_month: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
  for fact in &facts {
    let Some(record) = dates.get(&fact.date_id) else { continue };
    by_month
      .entry((record.year, record.month))
      .or_default()
      .push(fact.price);
  }

  Ok(
    by_month
      .into_iter()
      .map(|((year, month), prices)| MonthlyPrices {
        year,
        month,
        price_count: prices.len() as u64,
        avg_price: mean(&prices),
      })
      .collect(),
  )
}

/// All-time average/min/max price per product title. Two products with the
/// same title contribute to one merged row.
pub async fn average_prices_by_product<S>(
  store: &S,
) -> Result<Vec<ProductPriceSummary>>
where
  S: CatalogStore,
{
  let facts = store
    .list_prices(&PriceFilter::default())
    .await
    .map_err(Error::store)?;
  let products = lookup::products_by_id(store).await?;

  let mut by_title: BTreeMap<String, Vec<f64>> = BTreeMap::new();
  for fact in &facts {
    let Some(product) = products.get(&fact.product_id) else { continue };
    by_title
      .entry(product.title.clone())
      .or_default()
      .push(fact.price);
  }

  Ok(
    by_title
      .into_iter()
      .map(|(title, prices)| ProductPriceSummary {
        title,
        avg_price: mean(&prices),
        min_price: min_of(&prices),
        max_price: max_of(&prices),
      })
      .collect(),
  )
}
