//! Input rules applied by the API layer before anything reaches the store.
//!
//! Validators that normalise (trimming names) consume their input and return
//! the cleaned copy; pure checks borrow.

use crate::{
  Error, Result,
  date::days_in_month,
  entity::{NewDateRecord, NewProduct, NewSalePoint, PriceFact},
};

const NAME_MAX: usize = 255;
const CITY_MAX: usize = 100;
pub const YEAR_MIN: i32 = 1900;
pub const YEAR_MAX: i32 = 2100;

/// Trim and check a product title, and check the link shape.
pub fn product(input: NewProduct) -> Result<NewProduct> {
  let title = non_blank_name(&input.title, "product title")?;
  if let Some(link) = input.link.as_deref() {
    http_url(link, "product link")?;
  }
  Ok(NewProduct { title, link: input.link })
}

/// Trim and check a sale-point name, city length, and website shape.
pub fn sale_point(input: NewSalePoint) -> Result<NewSalePoint> {
  let name = non_blank_name(&input.name, "sale point name")?;
  if let Some(city) = input.city.as_deref()
    && city.len() > CITY_MAX
  {
    return Err(Error::Validation(format!(
      "city must not exceed {CITY_MAX} characters"
    )));
  }
  if let Some(website) = input.website.as_deref() {
    http_url(website, "sale point website")?;
  }
  Ok(NewSalePoint {
    name,
    city: input.city,
    website: input.website,
    kind: input.kind,
  })
}

/// Check date components: ranges, then the per-month day count
/// (February follows the leap-year rule).
pub fn date(input: &NewDateRecord) -> Result<()> {
  if !(1..=12).contains(&input.month) {
    return Err(Error::Validation("month must be between 1 and 12".into()));
  }
  if !(1..=31).contains(&input.day) {
    return Err(Error::Validation("day must be between 1 and 31".into()));
  }
  if !(YEAR_MIN..=YEAR_MAX).contains(&input.year) {
    return Err(Error::Validation(format!(
      "year must be between {YEAR_MIN} and {YEAR_MAX}"
    )));
  }
  if input.day > days_in_month(input.month, input.year) {
    return Err(Error::Validation(format!(
      "invalid day {} for month {}",
      input.day, input.month
    )));
  }
  Ok(())
}

/// A price must be strictly positive.
pub fn price(input: &PriceFact) -> Result<()> {
  if input.price > 0.0 {
    Ok(())
  } else {
    Err(Error::Validation("price must be greater than 0".into()))
  }
}

fn non_blank_name(value: &str, field: &str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.len() < 2 {
    return Err(Error::Validation(format!(
      "{field} must be at least 2 characters long"
    )));
  }
  if trimmed.len() > NAME_MAX {
    return Err(Error::Validation(format!(
      "{field} must not exceed {NAME_MAX} characters"
    )));
  }
  Ok(trimmed.to_string())
}

fn http_url(value: &str, field: &str) -> Result<()> {
  let rest = value
    .strip_prefix("http://")
    .or_else(|| value.strip_prefix("https://"));
  match rest {
    Some(r) if !r.is_empty() => Ok(()),
    _ => Err(Error::Validation(format!("{field} is not a valid URL"))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_product(title: &str, link: Option<&str>) -> NewProduct {
    NewProduct {
      title: title.to_string(),
      link:  link.map(str::to_string),
    }
  }

  #[test]
  fn product_title_is_trimmed() {
    let p = product(new_product("  Espresso Machine  ", None)).unwrap();
    assert_eq!(p.title, "Espresso Machine");
  }

  #[test]
  fn product_title_too_short_rejected() {
    assert!(product(new_product("x", None)).is_err());
    assert!(product(new_product("  a ", None)).is_err());
  }

  #[test]
  fn product_title_too_long_rejected() {
    assert!(product(new_product(&"x".repeat(256), None)).is_err());
    assert!(product(new_product(&"x".repeat(255), None)).is_ok());
  }

  #[test]
  fn product_link_must_be_http() {
    assert!(product(new_product("ok title", Some("ftp://example.com"))).is_err());
    assert!(product(new_product("ok title", Some("https://"))).is_err());
    assert!(product(new_product("ok title", Some("https://example.com"))).is_ok());
    assert!(product(new_product("ok title", Some("http://example.com"))).is_ok());
  }

  #[test]
  fn date_component_ranges() {
    assert!(date(&NewDateRecord { day: 1, month: 1, year: 2024 }).is_ok());
    assert!(date(&NewDateRecord { day: 0, month: 1, year: 2024 }).is_err());
    assert!(date(&NewDateRecord { day: 1, month: 13, year: 2024 }).is_err());
    assert!(date(&NewDateRecord { day: 1, month: 1, year: 1899 }).is_err());
    assert!(date(&NewDateRecord { day: 1, month: 1, year: 2101 }).is_err());
  }

  #[test]
  fn date_day_checked_against_month() {
    assert!(date(&NewDateRecord { day: 30, month: 2, year: 2024 }).is_err());
    assert!(date(&NewDateRecord { day: 29, month: 2, year: 2024 }).is_ok());
    assert!(date(&NewDateRecord { day: 29, month: 2, year: 2023 }).is_err());
    assert!(date(&NewDateRecord { day: 31, month: 4, year: 2024 }).is_err());
  }

  #[test]
  fn price_must_be_positive() {
    let fact = |p| PriceFact {
      product_id:    1,
      sale_point_id: 1,
      date_id:       1,
      price:         p,
    };
    assert!(price(&fact(9.99)).is_ok());
    assert!(price(&fact(0.0)).is_err());
    assert!(price(&fact(-1.0)).is_err());
  }
}
