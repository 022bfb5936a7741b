//! In-memory join indexes over the store's reference tables.
//!
//! The aggregation queries join price facts against dates, sale points, and
//! products by foreign key. Each helper loads one table unpaginated and
//! indexes it by id.

use std::collections::HashMap;

use pricewatch_core::{
  entity::{DateRecord, Product, SalePoint},
  store::{CatalogStore, DateQuery, ProductQuery, SalePointQuery},
};

use crate::{Error, Result};

pub(crate) async fn dates_by_id<S>(store: &S) -> Result<HashMap<i64, DateRecord>>
where
  S: CatalogStore,
{
  let dates = store
    .list_dates(&DateQuery::default())
    .await
    .map_err(Error::store)?;
  Ok(dates.into_iter().map(|d| (d.id, d)).collect())
}

pub(crate) async fn sale_points_by_id<S>(
  store: &S,
) -> Result<HashMap<i64, SalePoint>>
where
  S: CatalogStore,
{
  let sale_points = store
    .list_sale_points(&SalePointQuery::default())
    .await
    .map_err(Error::store)?;
  Ok(sale_points.into_iter().map(|sp| (sp.id, sp)).collect())
}

pub(crate) async fn products_by_id<S>(
  store: &S,
) -> Result<HashMap<i64, Product>>
where
  S: CatalogStore,
{
  let products = store
    .list_products(&ProductQuery::default())
    .await
    .map_err(Error::store)?;
  Ok(products.into_iter().map(|p| (p.id, p)).collect())
}
