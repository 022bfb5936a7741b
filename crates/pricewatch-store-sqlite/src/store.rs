//! [`SqliteStore`] — the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, ToSql};

use pricewatch_core::{
  entity::{
    DateRecord, Listing, NewDateRecord, NewProduct, NewSalePoint, PriceFact,
    Product, SalePoint,
  },
  store::{
    CatalogStore, DateQuery, ListingQuery, PriceFilter, ProductQuery,
    ProductSearch, SalePointQuery,
  },
};

use crate::{
  Error, Result,
  encode::{RawSalePoint, encode_kind},
  schema::SCHEMA,
};

/// Map `limit`/`offset` options onto SQLite's `LIMIT ?` / `OFFSET ?`.
/// `LIMIT -1` means unbounded.
fn page(limit: Option<u32>, offset: Option<u32>) -> (i64, i64) {
  (limit.map_or(-1, i64::from), offset.map_or(0, i64::from))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A pricewatch catalog backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn add_product(&self, input: NewProduct) -> Result<Product> {
    let title = input.title.clone();
    let link = input.link.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO products (title, link) VALUES (?1, ?2)",
          rusqlite::params![input.title, input.link],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Product { id, title, link })
  }

  async fn get_product(&self, id: i64) -> Result<Option<Product>> {
    let product = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, title, link FROM products WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Product {
                  id:    row.get(0)?,
                  title: row.get(1)?,
                  link:  row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(product)
  }

  async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
    let (limit, offset) = page(query.limit, query.offset);

    let products = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT id, title, link FROM products LIMIT ?1 OFFSET ?2")?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], |row| {
            Ok(Product {
              id:    row.get(0)?,
              title: row.get(1)?,
              link:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(products)
  }

  async fn count_products(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn update_product(
    &self,
    id: i64,
    input: NewProduct,
  ) -> Result<Option<Product>> {
    let title = input.title.clone();
    let link = input.link.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE products SET title = ?1, link = ?2 WHERE id = ?3",
          rusqlite::params![input.title, input.link, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(Product { id, title, link }))
  }

  async fn delete_product(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM products WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn search_products(&self, search: &ProductSearch) -> Result<Vec<Product>> {
    let title_pattern = search.title.as_deref().map(|t| format!("%{t}%"));
    let min_prices = search.min_prices.map(i64::from);

    let products = self
      .conn
      .call(move |conn| {
        // LIKE is case-insensitive for ASCII in SQLite, matching the
        // case-insensitive search contract.
        let join = if min_prices.is_some() {
          "JOIN (SELECT product_id, COUNT(*) AS price_count
                 FROM prices GROUP BY product_id) pc ON pc.product_id = p.id"
        } else {
          ""
        };

        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(pattern) = title_pattern {
          conds.push("p.title LIKE ?");
          args.push(Box::new(pattern));
        }
        if let Some(min) = min_prices {
          conds.push("pc.price_count >= ?");
          args.push(Box::new(min));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql =
          format!("SELECT p.id, p.title, p.link FROM products p {join} {where_clause}");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
              Ok(Product {
                id:    row.get(0)?,
                title: row.get(1)?,
                link:  row.get(2)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(products)
  }

  // ── Sale points ───────────────────────────────────────────────────────────

  async fn add_sale_point(&self, input: NewSalePoint) -> Result<SalePoint> {
    let name = input.name.clone();
    let city = input.city.clone();
    let website = input.website.clone();
    let kind = input.kind;
    let kind_str = input.kind.map(encode_kind);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sale_points (name, city, website, kind)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.name, input.city, input.website, kind_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(SalePoint { id, name, city, website, kind })
  }

  async fn get_sale_point(&self, id: i64) -> Result<Option<SalePoint>> {
    let raw: Option<RawSalePoint> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, city, website, kind FROM sale_points WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawSalePoint {
                  id:      row.get(0)?,
                  name:    row.get(1)?,
                  city:    row.get(2)?,
                  website: row.get(3)?,
                  kind:    row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSalePoint::into_sale_point).transpose()
  }

  async fn list_sale_points(
    &self,
    query: &SalePointQuery,
  ) -> Result<Vec<SalePoint>> {
    let city = query.city.clone();
    let kind_str = query.kind.map(encode_kind);
    let (limit, offset) = page(query.limit, query.offset);

    let raws: Vec<RawSalePoint> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(city) = city {
          conds.push("city = ?");
          args.push(Box::new(city));
        }
        if let Some(kind) = kind_str {
          conds.push("kind = ?");
          args.push(Box::new(kind));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT id, name, city, website, kind FROM sale_points
           {where_clause} LIMIT ? OFFSET ?"
        );
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
              Ok(RawSalePoint {
                id:      row.get(0)?,
                name:    row.get(1)?,
                city:    row.get(2)?,
                website: row.get(3)?,
                kind:    row.get(4)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSalePoint::into_sale_point).collect()
  }

  async fn count_sale_points(&self, query: &SalePointQuery) -> Result<u64> {
    let city = query.city.clone();
    let kind_str = query.kind.map(encode_kind);

    let count: i64 = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(city) = city {
          conds.push("city = ?");
          args.push(Box::new(city));
        }
        if let Some(kind) = kind_str {
          conds.push("kind = ?");
          args.push(Box::new(kind));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!("SELECT COUNT(*) FROM sale_points {where_clause}");
        Ok(conn.query_row(
          &sql,
          rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
          |row| row.get(0),
        )?)
      })
      .await?;

    Ok(count as u64)
  }

  async fn update_sale_point(
    &self,
    id: i64,
    input: NewSalePoint,
  ) -> Result<Option<SalePoint>> {
    let name = input.name.clone();
    let city = input.city.clone();
    let website = input.website.clone();
    let kind = input.kind;
    let kind_str = input.kind.map(encode_kind);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE sale_points SET name = ?1, city = ?2, website = ?3, kind = ?4
           WHERE id = ?5",
          rusqlite::params![input.name, input.city, input.website, kind_str, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(SalePoint { id, name, city, website, kind }))
  }

  async fn delete_sale_point(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM sale_points WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Dates ─────────────────────────────────────────────────────────────────

  async fn add_date(&self, input: NewDateRecord) -> Result<DateRecord> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO dates (day, month, year) VALUES (?1, ?2, ?3)",
          rusqlite::params![input.day, input.month, input.year],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(DateRecord {
      id,
      day: input.day,
      month: input.month,
      year: input.year,
    })
  }

  async fn get_date(&self, id: i64) -> Result<Option<DateRecord>> {
    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, day, month, year FROM dates WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(DateRecord {
                  id:    row.get(0)?,
                  day:   row.get(1)?,
                  month: row.get(2)?,
                  year:  row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(record)
  }

  async fn list_dates(&self, query: &DateQuery) -> Result<Vec<DateRecord>> {
    let year = query.year;
    let month = query.month;
    let (limit, offset) = page(query.limit, query.offset);

    let dates = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(year) = year {
          conds.push("year = ?");
          args.push(Box::new(year));
        }
        if let Some(month) = month {
          conds.push("month = ?");
          args.push(Box::new(month));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT id, day, month, year FROM dates {where_clause} LIMIT ? OFFSET ?"
        );
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
              Ok(DateRecord {
                id:    row.get(0)?,
                day:   row.get(1)?,
                month: row.get(2)?,
                year:  row.get(3)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(dates)
  }

  async fn delete_date(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM dates WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Price facts ───────────────────────────────────────────────────────────

  async fn add_price(&self, fact: PriceFact) -> Result<PriceFact> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO prices (product_id, sale_point_id, date_id, price)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            fact.product_id,
            fact.sale_point_id,
            fact.date_id,
            fact.price,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(fact)
  }

  async fn get_price(
    &self,
    product_id: i64,
    sale_point_id: i64,
    date_id: i64,
  ) -> Result<Option<PriceFact>> {
    let fact = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT product_id, sale_point_id, date_id, price FROM prices
               WHERE product_id = ?1 AND sale_point_id = ?2 AND date_id = ?3",
              rusqlite::params![product_id, sale_point_id, date_id],
              |row| {
                Ok(PriceFact {
                  product_id:    row.get(0)?,
                  sale_point_id: row.get(1)?,
                  date_id:       row.get(2)?,
                  price:         row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(fact)
  }

  async fn list_prices(&self, filter: &PriceFilter) -> Result<Vec<PriceFact>> {
    let product_id = filter.product_id;
    let sale_point_id = filter.sale_point_id;
    let date_id = filter.date_id;
    let (limit, offset) = page(filter.limit, filter.offset);

    let facts = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(id) = product_id {
          conds.push("product_id = ?");
          args.push(Box::new(id));
        }
        if let Some(id) = sale_point_id {
          conds.push("sale_point_id = ?");
          args.push(Box::new(id));
        }
        if let Some(id) = date_id {
          conds.push("date_id = ?");
          args.push(Box::new(id));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT product_id, sale_point_id, date_id, price FROM prices
           {where_clause} LIMIT ? OFFSET ?"
        );
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
              Ok(PriceFact {
                product_id:    row.get(0)?,
                sale_point_id: row.get(1)?,
                date_id:       row.get(2)?,
                price:         row.get(3)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(facts)
  }

  async fn count_prices(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM prices", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn delete_price(
    &self,
    product_id: i64,
    sale_point_id: i64,
    date_id: i64,
  ) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM prices
           WHERE product_id = ?1 AND sale_point_id = ?2 AND date_id = ?3",
          rusqlite::params![product_id, sale_point_id, date_id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Listings ──────────────────────────────────────────────────────────────

  async fn add_listing(&self, listing: Listing) -> Result<Listing> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO product_sale_points (product_id, sale_point_id)
           VALUES (?1, ?2)",
          rusqlite::params![listing.product_id, listing.sale_point_id],
        )?;
        Ok(())
      })
      .await?;

    Ok(listing)
  }

  async fn get_listing(
    &self,
    product_id: i64,
    sale_point_id: i64,
  ) -> Result<Option<Listing>> {
    let listing = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT product_id, sale_point_id FROM product_sale_points
               WHERE product_id = ?1 AND sale_point_id = ?2",
              rusqlite::params![product_id, sale_point_id],
              |row| {
                Ok(Listing {
                  product_id:    row.get(0)?,
                  sale_point_id: row.get(1)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(listing)
  }

  async fn list_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
    let product_id = query.product_id;
    let sale_point_id = query.sale_point_id;
    let (limit, offset) = page(query.limit, query.offset);

    let listings = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        let mut args: Vec<Box<dyn ToSql>> = vec![];
        if let Some(id) = product_id {
          conds.push("product_id = ?");
          args.push(Box::new(id));
        }
        if let Some(id) = sale_point_id {
          conds.push("sale_point_id = ?");
          args.push(Box::new(id));
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT product_id, sale_point_id FROM product_sale_points
           {where_clause} LIMIT ? OFFSET ?"
        );
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
            |row| {
              Ok(Listing {
                product_id:    row.get(0)?,
                sale_point_id: row.get(1)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(listings)
  }

  async fn delete_listing(
    &self,
    product_id: i64,
    sale_point_id: i64,
  ) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM product_sale_points
           WHERE product_id = ?1 AND sale_point_id = ?2",
          rusqlite::params![product_id, sale_point_id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  // ── Health ────────────────────────────────────────────────────────────────

  async fn ping(&self) -> bool {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await
      .is_ok()
  }
}
