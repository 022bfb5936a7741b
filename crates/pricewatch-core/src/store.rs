//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `pricewatch-store-sqlite`). Higher layers (`pricewatch-analytics`,
//! `pricewatch-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::entity::{
  DateRecord, Listing, NewDateRecord, NewProduct, NewSalePoint, PriceFact,
  Product, SalePoint, SalePointKind,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Pagination for [`CatalogStore::list_products`]. `limit: None` means
/// unpaginated, which is what the query layer relies on.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
  pub limit:  Option<u32>,
  pub offset: Option<u32>,
}

/// Parameters for [`CatalogStore::search_products`].
#[derive(Debug, Clone, Default)]
pub struct ProductSearch {
  /// Case-insensitive substring match on the title.
  pub title:      Option<String>,
  /// Only products with at least this many recorded price facts.
  pub min_prices: Option<u32>,
}

/// Filters for [`CatalogStore::list_sale_points`] and
/// [`CatalogStore::count_sale_points`].
#[derive(Debug, Clone, Default)]
pub struct SalePointQuery {
  pub city:   Option<String>,
  pub kind:   Option<SalePointKind>,
  pub limit:  Option<u32>,
  pub offset: Option<u32>,
}

/// Filters for [`CatalogStore::list_dates`].
#[derive(Debug, Clone, Default)]
pub struct DateQuery {
  pub year:   Option<i32>,
  pub month:  Option<u32>,
  pub limit:  Option<u32>,
  pub offset: Option<u32>,
}

/// Filters for [`CatalogStore::list_prices`].
#[derive(Debug, Clone, Default)]
pub struct PriceFilter {
  pub product_id:    Option<i64>,
  pub sale_point_id: Option<i64>,
  pub date_id:       Option<i64>,
  pub limit:         Option<u32>,
  pub offset:        Option<u32>,
}

/// Filters for [`CatalogStore::list_listings`].
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
  pub product_id:    Option<i64>,
  pub sale_point_id: Option<i64>,
  pub limit:         Option<u32>,
  pub offset:        Option<u32>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a pricewatch catalog backend.
///
/// Reads by id return `None` for missing rows; deletions report whether a
/// row was removed. Referential checks (a price naming a real product, sale
/// point, and date) are the caller's job, not the store's.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Products ──────────────────────────────────────────────────────────

  fn add_product(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  fn get_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  fn list_products<'a>(
    &'a self,
    query: &'a ProductQuery,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  fn count_products(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Full-field update. Returns `None` if the product does not exist.
  fn update_product(
    &self,
    id: i64,
    input: NewProduct,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// Returns `true` if a row was deleted.
  fn delete_product(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn search_products<'a>(
    &'a self,
    search: &'a ProductSearch,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  // ── Sale points ───────────────────────────────────────────────────────

  fn add_sale_point(
    &self,
    input: NewSalePoint,
  ) -> impl Future<Output = Result<SalePoint, Self::Error>> + Send + '_;

  fn get_sale_point(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<SalePoint>, Self::Error>> + Send + '_;

  fn list_sale_points<'a>(
    &'a self,
    query: &'a SalePointQuery,
  ) -> impl Future<Output = Result<Vec<SalePoint>, Self::Error>> + Send + 'a;

  /// Count matching `query`'s city/kind filters; pagination is ignored.
  fn count_sale_points<'a>(
    &'a self,
    query: &'a SalePointQuery,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  fn update_sale_point(
    &self,
    id: i64,
    input: NewSalePoint,
  ) -> impl Future<Output = Result<Option<SalePoint>, Self::Error>> + Send + '_;

  fn delete_sale_point(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Dates ─────────────────────────────────────────────────────────────

  fn add_date(
    &self,
    input: NewDateRecord,
  ) -> impl Future<Output = Result<DateRecord, Self::Error>> + Send + '_;

  fn get_date(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<DateRecord>, Self::Error>> + Send + '_;

  fn list_dates<'a>(
    &'a self,
    query: &'a DateQuery,
  ) -> impl Future<Output = Result<Vec<DateRecord>, Self::Error>> + Send + 'a;

  fn delete_date(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Price facts ───────────────────────────────────────────────────────

  fn add_price(
    &self,
    fact: PriceFact,
  ) -> impl Future<Output = Result<PriceFact, Self::Error>> + Send + '_;

  fn get_price(
    &self,
    product_id: i64,
    sale_point_id: i64,
    date_id: i64,
  ) -> impl Future<Output = Result<Option<PriceFact>, Self::Error>> + Send + '_;

  fn list_prices<'a>(
    &'a self,
    filter: &'a PriceFilter,
  ) -> impl Future<Output = Result<Vec<PriceFact>, Self::Error>> + Send + 'a;

  fn count_prices(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn delete_price(
    &self,
    product_id: i64,
    sale_point_id: i64,
    date_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Listings ──────────────────────────────────────────────────────────

  fn add_listing(
    &self,
    listing: Listing,
  ) -> impl Future<Output = Result<Listing, Self::Error>> + Send + '_;

  fn get_listing(
    &self,
    product_id: i64,
    sale_point_id: i64,
  ) -> impl Future<Output = Result<Option<Listing>, Self::Error>> + Send + '_;

  fn list_listings<'a>(
    &'a self,
    query: &'a ListingQuery,
  ) -> impl Future<Output = Result<Vec<Listing>, Self::Error>> + Send + 'a;

  fn delete_listing(
    &self,
    product_id: i64,
    sale_point_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Health ────────────────────────────────────────────────────────────

  /// Cheap connectivity probe; `false` on any backend failure.
  fn ping(&self) -> impl Future<Output = bool> + Send + '_;
}
