//! Catalog entities — products, sale points, calendar dates, price facts.
//!
//! Identities are store-assigned `i64` rowids. Price facts carry no identity
//! of their own; they are keyed by the (product, sale point, date) triple.

use serde::{Deserialize, Serialize};

// ─── Products ────────────────────────────────────────────────────────────────

/// A product tracked by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id:    i64,
  pub title: String,
  /// Product page on the vendor's site, if known.
  pub link:  Option<String>,
}

/// Input to [`CatalogStore::add_product`](crate::store::CatalogStore::add_product)
/// and `update_product`. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub title: String,
  pub link:  Option<String>,
}

// ─── Sale points ─────────────────────────────────────────────────────────────

/// Category of a sale point.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SalePointKind {
  Supermarket,
  Electronics,
  Clothing,
  Online,
  Other,
}

impl SalePointKind {
  /// The string stored in the `kind` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Supermarket => "supermarket",
      Self::Electronics => "electronics",
      Self::Clothing => "clothing",
      Self::Online => "online",
      Self::Other => "other",
    }
  }
}

/// A vendor or store where product prices are observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalePoint {
  pub id:      i64,
  pub name:    String,
  pub city:    Option<String>,
  pub website: Option<String>,
  pub kind:    Option<SalePointKind>,
}

/// Input to `add_sale_point` and `update_sale_point`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSalePoint {
  pub name:    String,
  pub city:    Option<String>,
  pub website: Option<String>,
  pub kind:    Option<SalePointKind>,
}

// ─── Dates ───────────────────────────────────────────────────────────────────

/// A calendar day, stored decomposed. Multiple rows may carry the same
/// (day, month, year); nothing in the schema prevents it, so no reader may
/// assume uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
  pub id:    i64,
  pub day:   u32,
  pub month: u32,
  pub year:  i32,
}

impl DateRecord {
  /// Chronological sort key. Ordering is lexicographic on
  /// (year, month, day) — never on the row id.
  pub fn ymd(&self) -> (i32, u32, u32) { (self.year, self.month, self.day) }
}

/// Input to `add_date`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewDateRecord {
  pub day:   u32,
  pub month: u32,
  pub year:  i32,
}

// ─── Price facts ─────────────────────────────────────────────────────────────

/// One observed price: a product, at a sale point, on a date.
/// At most one fact exists per (product, sale point, date) triple.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceFact {
  pub product_id:    i64,
  pub sale_point_id: i64,
  pub date_id:       i64,
  pub price:         f64,
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// Records that a sale point carries a product, independent of any price
/// observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Listing {
  pub product_id:    i64,
  pub sale_point_id: i64,
}
