//! Price history and cross-vendor comparison for a single product.

use serde::{Deserialize, Serialize};

use pricewatch_core::{
  date,
  entity::DateRecord,
  store::{CatalogStore, PriceFilter},
};

use crate::{Error, Result, lookup, window};

// ─── Result types ────────────────────────────────────────────────────────────

/// The slice of a sale point carried in history rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalePointRef {
  pub id:   i64,
  pub name: String,
}

/// One observed price, enriched with its resolved date and sale point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
  pub date:       DateRecord,
  pub price:      f64,
  pub sale_point: SalePointRef,
}

/// One sale point's price for a product on the comparison date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
  pub sale_point_id:   i64,
  pub sale_point_name: String,
  pub price:           f64,
  pub date_id:         i64,
}

// ─── Price history ───────────────────────────────────────────────────────────

/// Every price fact for `product_id`, optionally restricted to one sale
/// point and to an inclusive date window, ordered ascending by
/// (year, month, day).
///
/// `start_date` / `end_date` are ISO `YYYY-MM-DD` strings; they are parsed
/// before the store is touched and a bad string fails with
/// [`Error::InvalidDate`]. The window bounds are applied component-wise
/// (see [`window`]), not as calendar comparisons.
pub async fn price_history<S>(
  store: &S,
  product_id: i64,
  sale_point_id: Option<i64>,
  start_date: Option<&str>,
  end_date: Option<&str>,
) -> Result<Vec<PricePoint>>
where
  S: CatalogStore,
{
  let lower = start_date.map(date::parse_iso).transpose()?;
  let upper = end_date.map(date::parse_iso).transpose()?;

  let filter = PriceFilter {
    product_id: Some(product_id),
    sale_point_id,
    ..PriceFilter::default()
  };
  let facts = store.list_prices(&filter).await.map_err(Error::store)?;
  let dates = lookup::dates_by_id(store).await?;
  let sale_points = lookup::sale_points_by_id(store).await?;

  let mut points: Vec<PricePoint> = facts
    .iter()
    .filter_map(|fact| {
      let record = dates.get(&fact.date_id)?;
      let sale_point = sale_points.get(&fact.sale_point_id)?;
      window::within(record, lower, upper).then(|| PricePoint {
        date:       *record,
        price:      fact.price,
        sale_point: SalePointRef {
          id:   sale_point.id,
          name: sale_point.name.clone(),
        },
      })
    })
    .collect();

  points.sort_by_key(|p| p.date.ymd());
  Ok(points)
}

// ─── Price comparison ────────────────────────────────────────────────────────

/// The price of `product_id` at every sale point on the resolution date.
///
/// With `specific_date`, the resolution date is the first stored
/// [`DateRecord`] matching that exact (year, month, day); if none exists
/// the result is empty, not an error. Without it, the resolution date is
/// the one with the highest id among the product's facts — id-based
/// recency, which coincides with calendar recency only when ids were
/// assigned in chronological order.
pub async fn price_comparison<S>(
  store: &S,
  product_id: i64,
  specific_date: Option<&str>,
) -> Result<Vec<ComparisonRow>>
where
  S: CatalogStore,
{
  let wanted = specific_date.map(date::parse_iso).transpose()?;

  let filter = PriceFilter {
    product_id: Some(product_id),
    ..PriceFilter::default()
  };
  let facts = store.list_prices(&filter).await.map_err(Error::store)?;
  let dates = lookup::dates_by_id(store).await?;

  let resolved_date_id = match wanted {
    Some(day) => {
      use chrono::Datelike;
      let mut candidates: Vec<&DateRecord> = dates
        .values()
        .filter(|d| {
          d.year == day.year() && d.month == day.month() && d.day == day.day()
        })
        .collect();
      // Duplicate (day, month, year) rows are possible; take the earliest.
      candidates.sort_by_key(|d| d.id);
      match candidates.first() {
        Some(d) => d.id,
        None => return Ok(Vec::new()),
      }
    }
    None => match facts.iter().map(|f| f.date_id).max() {
      Some(id) => id,
      None => return Ok(Vec::new()),
    },
  };

  let sale_points = lookup::sale_points_by_id(store).await?;
  let rows = facts
    .iter()
    .filter(|fact| fact.date_id == resolved_date_id)
    .filter_map(|fact| {
      let sale_point = sale_points.get(&fact.sale_point_id)?;
      Some(ComparisonRow {
        sale_point_id:   sale_point.id,
        sale_point_name: sale_point.name.clone(),
        price:           fact.price,
        date_id:         fact.date_id,
      })
    })
    .collect();

  Ok(rows)
}
