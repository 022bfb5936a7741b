//! JSON REST API for the pricewatch catalog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`pricewatch_core::store::CatalogStore`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = pricewatch_api::api_router(store.clone());
//! axum::serve(listener, app).await?;
//! ```

pub mod dates;
pub mod error;
pub mod health;
pub mod listings;
pub mod prices;
pub mod products;
pub mod sale_points;
pub mod stats;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use pricewatch_core::store::CatalogStore;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `PRICEWATCH_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Health
    .route("/health", get(health::handler::<S>))
    // Products
    .route(
      "/products",
      get(products::list::<S>).post(products::create::<S>),
    )
    .route("/products/search", get(products::search::<S>))
    .route(
      "/products/{id}",
      get(products::get_one::<S>)
        .put(products::update_one::<S>)
        .delete(products::delete_one::<S>),
    )
    .route("/products/{id}/prices", get(prices::history::<S>))
    .route(
      "/products/{id}/price-comparison",
      get(prices::comparison::<S>),
    )
    // Sale points
    .route(
      "/sale-points",
      get(sale_points::list::<S>).post(sale_points::create::<S>),
    )
    .route(
      "/sale-points/{id}",
      get(sale_points::get_one::<S>)
        .put(sale_points::update_one::<S>)
        .delete(sale_points::delete_one::<S>),
    )
    // Dates
    .route("/dates", get(dates::list::<S>).post(dates::create::<S>))
    .route("/dates/from-iso", post(dates::create_from_iso::<S>))
    .route(
      "/dates/{id}",
      get(dates::get_one::<S>).delete(dates::delete_one::<S>),
    )
    // Prices
    .route("/prices", get(prices::list::<S>).post(prices::create::<S>))
    .route(
      "/prices/{product_id}/{sale_point_id}/{date_id}",
      get(prices::get_one::<S>).delete(prices::delete_one::<S>),
    )
    // Listings
    .route(
      "/listings",
      get(listings::list::<S>).post(listings::create::<S>),
    )
    .route(
      "/listings/{product_id}/{sale_point_id}",
      get(listings::get_one::<S>).delete(listings::delete_one::<S>),
    )
    // Statistics
    .route(
      "/stats/products-with-prices-count",
      get(stats::products_with_prices_count::<S>),
    )
    .route(
      "/stats/products-by-sale-point",
      get(stats::products_by_sale_point::<S>),
    )
    .route(
      "/stats/sale-points-by-city",
      get(stats::sale_points_by_city::<S>),
    )
    .route(
      "/stats/sale-points-by-kind",
      get(stats::sale_points_by_kind::<S>),
    )
    .route("/stats/prices-by-month", get(stats::prices_by_month::<S>))
    .route(
      "/stats/average-prices-by-product",
      get(stats::average_prices_by_product::<S>),
    )
    .route(
      "/stats/products/{id}/price-evolution",
      get(stats::price_evolution::<S>),
    )
    .route(
      "/stats/products/{id}/city-comparison",
      get(stats::city_comparison::<S>),
    )
    .route("/stats/price-trends", get(stats::price_trends::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
