//! Query-layer tests against an in-memory `SqliteStore`.

use chrono::NaiveDate;
use pricewatch_core::{
  entity::{
    Listing, NewDateRecord, NewProduct, NewSalePoint, PriceFact, Product,
    SalePoint, SalePointKind,
  },
  store::CatalogStore,
};
use pricewatch_store_sqlite::SqliteStore;

use crate::{Error, history, stats};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn product(s: &SqliteStore, title: &str) -> Product {
  s.add_product(NewProduct {
    title: title.to_string(),
    link:  None,
  })
  .await
  .unwrap()
}

async fn sale_point(
  s: &SqliteStore,
  name: &str,
  city: Option<&str>,
) -> SalePoint {
  s.add_sale_point(NewSalePoint {
    name: name.to_string(),
    city: city.map(str::to_string),
    website: None,
    kind: None,
  })
  .await
  .unwrap()
}

async fn date(s: &SqliteStore, year: i32, month: u32, day: u32) -> i64 {
  s.add_date(NewDateRecord { day, month, year }).await.unwrap().id
}

async fn price(
  s: &SqliteStore,
  product_id: i64,
  sale_point_id: i64,
  date_id: i64,
  value: f64,
) {
  s.add_price(PriceFact {
    product_id,
    sale_point_id,
    date_id,
    price: value,
  })
  .await
  .unwrap();
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ─── Empty results, never errors ─────────────────────────────────────────────

#[tokio::test]
async fn queries_on_unknown_product_return_empty() {
  let s = store().await;

  assert!(history::price_history(&s, 42, None, None, None)
    .await
    .unwrap()
    .is_empty());
  assert!(history::price_comparison(&s, 42, None)
    .await
    .unwrap()
    .is_empty());
  assert!(stats::price_evolution(&s, 42).await.unwrap().is_empty());
  assert!(stats::city_price_comparison(&s, 42)
    .await
    .unwrap()
    .is_empty());
}

#[tokio::test]
async fn queries_on_product_without_facts_return_empty() {
  let s = store().await;
  let p = product(&s, "Unpriced").await;

  assert!(history::price_history(&s, p.id, None, None, None)
    .await
    .unwrap()
    .is_empty());
  assert!(history::price_comparison(&s, p.id, None)
    .await
    .unwrap()
    .is_empty());
  assert!(stats::price_evolution(&s, p.id).await.unwrap().is_empty());
  assert!(stats::city_price_comparison(&s, p.id)
    .await
    .unwrap()
    .is_empty());
}

// ─── Price history ───────────────────────────────────────────────────────────

#[tokio::test]
async fn history_is_ordered_by_calendar_not_insertion() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;

  // Inserted out of chronological order; row ids follow insertion.
  let feb = date(&s, 2024, 2, 5).await;
  let mar = date(&s, 2024, 3, 1).await;
  let jan = date(&s, 2024, 1, 10).await;
  price(&s, p.id, sp.id, feb, 12.0).await;
  price(&s, p.id, sp.id, mar, 13.0).await;
  price(&s, p.id, sp.id, jan, 11.0).await;

  let points = history::price_history(&s, p.id, None, None, None)
    .await
    .unwrap();
  let days: Vec<(u32, u32)> =
    points.iter().map(|pt| (pt.date.month, pt.date.day)).collect();
  assert_eq!(days, vec![(1, 10), (2, 5), (3, 1)]);
  assert_eq!(points[0].price, 11.0);
  assert_eq!(points[0].sale_point.name, "Store");
}

#[tokio::test]
async fn history_filters_by_sale_point() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp1 = sale_point(&s, "First", None).await;
  let sp2 = sale_point(&s, "Second", None).await;
  let d = date(&s, 2024, 1, 1).await;
  price(&s, p.id, sp1.id, d, 10.0).await;
  price(&s, p.id, sp2.id, d, 11.0).await;

  let all = history::price_history(&s, p.id, None, None, None)
    .await
    .unwrap();
  assert_eq!(all.len(), 2);

  let only_sp2 = history::price_history(&s, p.id, Some(sp2.id), None, None)
    .await
    .unwrap();
  assert_eq!(only_sp2.len(), 1);
  assert_eq!(only_sp2[0].sale_point.id, sp2.id);
}

#[tokio::test]
async fn history_window_is_component_wise() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;

  let included = date(&s, 2024, 3, 20).await;
  let later_month_smaller_day = date(&s, 2024, 4, 10).await;
  let later_year_earlier_month = date(&s, 2025, 1, 20).await;
  let plainly_before = date(&s, 2024, 1, 20).await;
  for (d, v) in [
    (included, 1.0),
    (later_month_smaller_day, 2.0),
    (later_year_earlier_month, 3.0),
    (plainly_before, 4.0),
  ] {
    price(&s, p.id, sp.id, d, v).await;
  }

  let points =
    history::price_history(&s, p.id, None, Some("2024-03-15"), None)
      .await
      .unwrap();

  // Each bound component is checked independently: 2024-04-10 fails on the
  // day, 2025-01-20 fails on the month.
  assert_eq!(points.len(), 1);
  assert_eq!((points[0].date.month, points[0].date.day), (3, 20));
}

#[tokio::test]
async fn history_upper_bound_is_component_wise_too() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;

  let inside = date(&s, 2024, 2, 10).await;
  let earlier_month_larger_day = date(&s, 2024, 2, 20).await;
  for (d, v) in [(inside, 1.0), (earlier_month_larger_day, 2.0)] {
    price(&s, p.id, sp.id, d, v).await;
  }

  let points =
    history::price_history(&s, p.id, None, None, Some("2024-03-15"))
      .await
      .unwrap();
  assert_eq!(points.len(), 1);
  assert_eq!(points[0].date.day, 10);
}

#[tokio::test]
async fn history_rejects_malformed_dates_before_touching_the_store() {
  let s = store().await;

  for bad in ["15/03/2024", "yesterday", "2024-3"] {
    let err = history::price_history(&s, 1, None, Some(bad), None)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::InvalidDate(ref v) if v == bad));
  }

  let err = history::price_history(&s, 1, None, None, Some("nope"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(_)));
}

#[tokio::test]
async fn repeated_reads_are_identical() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;
  for (m, d, v) in [(1, 10, 9.0), (2, 5, 8.5), (3, 1, 9.5)] {
    let id = date(&s, 2024, m, d).await;
    price(&s, p.id, sp.id, id, v).await;
  }

  let first = history::price_history(&s, p.id, None, None, None)
    .await
    .unwrap();
  let second = history::price_history(&s, p.id, None, None, None)
    .await
    .unwrap();
  assert_eq!(first, second);

  let trends_a = stats::price_trends(&s, 30, Some(ymd(2024, 3, 31)))
    .await
    .unwrap();
  let trends_b = stats::price_trends(&s, 30, Some(ymd(2024, 3, 31)))
    .await
    .unwrap();
  assert_eq!(trends_a, trends_b);
}

// ─── Price comparison ────────────────────────────────────────────────────────

#[tokio::test]
async fn comparison_resolves_highest_date_id() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp1 = sale_point(&s, "First", None).await;
  let sp2 = sale_point(&s, "Second", None).await;

  // Five date rows so the fact date ids are 3, 5, and 2.
  let mut ids = Vec::new();
  for day in 1..=5 {
    ids.push(date(&s, 2024, 1, day).await);
  }
  price(&s, p.id, sp1.id, ids[2], 10.0).await;
  price(&s, p.id, sp1.id, ids[4], 11.0).await;
  price(&s, p.id, sp1.id, ids[1], 12.0).await;
  price(&s, p.id, sp2.id, ids[4], 13.0).await;

  let rows = history::price_comparison(&s, p.id, None).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r.date_id == ids[4]));
  let mut prices: Vec<f64> = rows.iter().map(|r| r.price).collect();
  prices.sort_by(f64::total_cmp);
  assert_eq!(prices, vec![11.0, 13.0]);
}

#[tokio::test]
async fn comparison_with_specific_date() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp1 = sale_point(&s, "First", None).await;
  let sp2 = sale_point(&s, "Second", None).await;
  let jan = date(&s, 2024, 1, 10).await;
  let feb = date(&s, 2024, 2, 10).await;
  price(&s, p.id, sp1.id, jan, 10.0).await;
  price(&s, p.id, sp2.id, jan, 12.0).await;
  price(&s, p.id, sp1.id, feb, 11.0).await;

  let rows = history::price_comparison(&s, p.id, Some("2024-01-10"))
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);
  assert!(rows.iter().all(|r| r.date_id == jan));

  let names: Vec<&str> =
    rows.iter().map(|r| r.sale_point_name.as_str()).collect();
  assert!(names.contains(&"First") && names.contains(&"Second"));
}

#[tokio::test]
async fn comparison_with_unknown_date_is_empty_not_an_error() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;
  let d = date(&s, 2024, 1, 10).await;
  price(&s, p.id, sp.id, d, 10.0).await;

  let rows = history::price_comparison(&s, p.id, Some("1999-12-31"))
    .await
    .unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn comparison_rejects_malformed_date() {
  let s = store().await;
  let err = history::price_comparison(&s, 1, Some("bogus"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(ref v) if v == "bogus"));
}

// ─── Price evolution ─────────────────────────────────────────────────────────

#[tokio::test]
async fn evolution_averages_per_date_in_calendar_order() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp1 = sale_point(&s, "First", None).await;
  let sp2 = sale_point(&s, "Second", None).await;

  // February first so row-id order differs from calendar order.
  let feb = date(&s, 2024, 2, 5).await;
  let jan = date(&s, 2024, 1, 10).await;
  price(&s, p.id, sp1.id, feb, 30.0).await;
  price(&s, p.id, sp1.id, jan, 10.0).await;
  price(&s, p.id, sp2.id, jan, 20.0).await;

  let points = stats::price_evolution(&s, p.id).await.unwrap();
  assert_eq!(points.len(), 2);

  assert_eq!((points[0].month, points[0].day), (1, 10));
  assert_eq!(points[0].avg_price, 15.0);
  assert_eq!(points[0].min_price, 10.0);
  assert_eq!(points[0].max_price, 20.0);

  assert_eq!((points[1].month, points[1].day), (2, 5));
  assert_eq!(points[1].avg_price, 30.0);
}

// ─── City comparison ─────────────────────────────────────────────────────────

#[tokio::test]
async fn city_comparison_uses_latest_price_per_sale_point() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let lyon_a = sale_point(&s, "Lyon A", Some("Lyon")).await;
  let lyon_b = sale_point(&s, "Lyon B", Some("Lyon")).await;
  let paris = sale_point(&s, "Paris A", Some("Paris")).await;

  let old = date(&s, 2024, 1, 1).await;
  let new = date(&s, 2024, 1, 2).await;

  // Lyon A's older observation must be ignored.
  price(&s, p.id, lyon_a.id, old, 99.0).await;
  price(&s, p.id, lyon_a.id, new, 10.0).await;
  price(&s, p.id, lyon_b.id, new, 20.0).await;
  price(&s, p.id, paris.id, new, 15.0).await;

  let rows = stats::city_price_comparison(&s, p.id).await.unwrap();
  assert_eq!(rows.len(), 2);

  let lyon = &rows[0];
  assert_eq!(lyon.city.as_deref(), Some("Lyon"));
  assert_eq!(lyon.avg_price, 15.0);
  assert_eq!(lyon.min_price, 10.0);
  assert_eq!(lyon.max_price, 20.0);

  let paris_row = &rows[1];
  assert_eq!(paris_row.city.as_deref(), Some("Paris"));
  assert_eq!(paris_row.avg_price, 15.0);
  assert_eq!(paris_row.min_price, 15.0);
  assert_eq!(paris_row.max_price, 15.0);
}

#[tokio::test]
async fn city_comparison_keeps_the_null_city_group() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let nowhere = sale_point(&s, "Nowhere", None).await;
  let lyon = sale_point(&s, "Lyon A", Some("Lyon")).await;
  let d = date(&s, 2024, 1, 1).await;
  price(&s, p.id, nowhere.id, d, 7.0).await;
  price(&s, p.id, lyon.id, d, 9.0).await;

  let rows = stats::city_price_comparison(&s, p.id).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].city, None);
  assert_eq!(rows[0].avg_price, 7.0);
  assert_eq!(rows[1].city.as_deref(), Some("Lyon"));
}

// ─── Price trends ────────────────────────────────────────────────────────────

#[tokio::test]
async fn trends_order_by_average_descending() {
  let s = store().await;
  let cheap = product(&s, "Cheap Widget").await;
  let dear = product(&s, "Expensive Widget").await;
  let sp = sale_point(&s, "Store", None).await;

  let d1 = date(&s, 2024, 3, 10).await;
  let d2 = date(&s, 2024, 3, 20).await;
  price(&s, cheap.id, sp.id, d1, 9.0).await;
  price(&s, cheap.id, sp.id, d2, 11.0).await;
  price(&s, dear.id, sp.id, d1, 90.0).await;
  price(&s, dear.id, sp.id, d2, 110.0).await;

  let rows = stats::price_trends(&s, 30, Some(ymd(2024, 3, 31)))
    .await
    .unwrap();
  assert_eq!(rows.len(), 2);

  assert_eq!(rows[0].title, "Expensive Widget");
  assert_eq!(rows[0].avg_price, 100.0);
  assert_eq!(rows[0].price_variation, 20.0);
  assert_eq!(rows[0].max_price, 110.0);
  assert_eq!(rows[0].min_price, 90.0);

  assert_eq!(rows[1].title, "Cheap Widget");
  assert_eq!(rows[1].avg_price, 10.0);
  assert!(rows[1].price_variation >= 0.0);
}

#[tokio::test]
async fn trends_window_excludes_by_component() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;

  let inside = date(&s, 2024, 3, 10).await;
  let feb = date(&s, 2024, 2, 15).await;
  price(&s, p.id, sp.id, inside, 10.0).await;
  // Excluded: month 2 is below the window's starting month.
  price(&s, p.id, sp.id, feb, 50.0).await;

  let rows = stats::price_trends(&s, 30, Some(ymd(2024, 3, 31)))
    .await
    .unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].avg_price, 10.0);
  assert_eq!(rows[0].price_variation, 0.0);
}

// ─── Descriptive statistics ──────────────────────────────────────────────────

#[tokio::test]
async fn products_with_prices_counts_distinct_products() {
  let s = store().await;
  let a = product(&s, "A").await;
  let b = product(&s, "B").await;
  let _unpriced = product(&s, "C").await;
  let sp = sale_point(&s, "Store", None).await;
  let d1 = date(&s, 2024, 1, 1).await;
  let d2 = date(&s, 2024, 1, 2).await;

  price(&s, a.id, sp.id, d1, 1.0).await;
  price(&s, a.id, sp.id, d2, 2.0).await;
  price(&s, b.id, sp.id, d1, 3.0).await;

  assert_eq!(stats::products_with_prices_count(&s).await.unwrap(), 2);
}

#[tokio::test]
async fn products_by_sale_point_counts_listings() {
  let s = store().await;
  let a = product(&s, "A").await;
  let b = product(&s, "B").await;
  let sp1 = sale_point(&s, "Big Store", None).await;
  let sp2 = sale_point(&s, "Small Store", None).await;

  for (product_id, sale_point_id) in
    [(a.id, sp1.id), (b.id, sp1.id), (a.id, sp2.id)]
  {
    s.add_listing(Listing { product_id, sale_point_id }).await.unwrap();
  }

  let rows = stats::products_by_sale_point(&s).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].name, "Big Store");
  assert_eq!(rows[0].product_count, 2);
  assert_eq!(rows[1].name, "Small Store");
  assert_eq!(rows[1].product_count, 1);
}

#[tokio::test]
async fn sale_points_grouped_by_city_and_kind() {
  let s = store().await;
  s.add_sale_point(NewSalePoint {
    name: "A".into(),
    city: Some("Lyon".into()),
    website: None,
    kind: Some(SalePointKind::Supermarket),
  })
  .await
  .unwrap();
  s.add_sale_point(NewSalePoint {
    name: "B".into(),
    city: Some("Lyon".into()),
    website: None,
    kind: Some(SalePointKind::Online),
  })
  .await
  .unwrap();
  s.add_sale_point(NewSalePoint {
    name: "C".into(),
    city: None,
    website: None,
    kind: None,
  })
  .await
  .unwrap();

  let by_city = stats::sale_points_by_city(&s).await.unwrap();
  assert_eq!(by_city.len(), 2);
  assert_eq!(by_city[0].city, None);
  assert_eq!(by_city[0].sale_point_count, 1);
  assert_eq!(by_city[1].city.as_deref(), Some("Lyon"));
  assert_eq!(by_city[1].sale_point_count, 2);

  let by_kind = stats::sale_points_by_kind(&s).await.unwrap();
  assert_eq!(by_kind.len(), 3);
  assert_eq!(by_kind[0].kind, None);
  assert!(by_kind.iter().any(|row| {
    row.kind == Some(SalePointKind::Supermarket) && row.sale_point_count == 1
  }));
}

#[tokio::test]
async fn prices_by_month_counts_and_averages() {
  let s = store().await;
  let p = product(&s, "Widget").await;
  let sp = sale_point(&s, "Store", None).await;
  let jan_a = date(&s, 2024, 1, 5).await;
  let jan_b = date(&s, 2024, 1, 20).await;
  let feb = date(&s, 2024, 2, 1).await;

  price(&s, p.id, sp.id, jan_a, 10.0).await;
  price(&s, p.id, sp.id, jan_b, 20.0).await;
  price(&s, p.id, sp.id, feb, 30.0).await;

  let rows = stats::prices_by_month(&s).await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!((rows[0].year, rows[0].month), (2024, 1));
  assert_eq!(rows[0].price_count, 2);
  assert_eq!(rows[0].avg_price, 15.0);
  assert_eq!((rows[1].year, rows[1].month), (2024, 2));
  assert_eq!(rows[1].price_count, 1);
  assert_eq!(rows[1].avg_price, 30.0);
}

#[tokio::test]
async fn identical_titles_merge_into_one_summary_row() {
  let s = store().await;
  let first = product(&s, "Same Title").await;
  let second = product(&s, "Same Title").await;
  let sp = sale_point(&s, "Store", None).await;
  let d = date(&s, 2024, 1, 1).await;

  price(&s, first.id, sp.id, d, 10.0).await;
  price(&s, second.id, sp.id, d, 20.0).await;

  let rows = stats::average_prices_by_product(&s).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].title, "Same Title");
  assert_eq!(rows[0].avg_price, 15.0);
  assert_eq!(rows[0].min_price, 10.0);
  assert_eq!(rows[0].max_price, 20.0);
}
