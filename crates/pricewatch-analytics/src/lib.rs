//! Read-side query layer for the pricewatch catalog.
//!
//! Every function in this crate is a stateless read over a
//! [`CatalogStore`](pricewatch_core::store::CatalogStore): it pulls the rows
//! it needs, joins them in memory by foreign key, and reshapes them into one
//! explicit result record type per query. Queries never fail on missing
//! data — an unknown product or sale point yields an empty result, and a
//! price fact whose referent has been deleted is dropped from the join
//! rather than reported. The only error raised before hitting the store is
//! a malformed ISO date string.

pub mod error;
pub mod history;
pub mod stats;

mod lookup;
mod window;

pub use error::{Error, Result};
pub use history::{ComparisonRow, PricePoint, SalePointRef};
pub use stats::{
  CityComparison, EvolutionPoint, MonthlyPrices, ProductPriceSummary,
  ProductsBySalePoint, SalePointsByCity, SalePointsByKind, TrendRow,
};

#[cfg(test)]
mod tests;
