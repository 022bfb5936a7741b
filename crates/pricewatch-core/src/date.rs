//! Calendar-date helpers shared by validation and the query layer.

use chrono::NaiveDate;

use crate::{Error, Result};

/// Parse an ISO `YYYY-MM-DD` string.
///
/// The offending input is carried in the error so callers can surface it.
pub fn parse_iso(value: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
    .map_err(|_| Error::InvalidDate(value.to_string()))
}

pub fn is_leap_year(year: i32) -> bool {
  year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`; 0 for an out-of-range month.
pub fn days_in_month(month: u32, year: i32) -> u32 {
  match month {
    1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
    4 | 6 | 9 | 11 => 30,
    2 if is_leap_year(year) => 29,
    2 => 28,
    _ => 0,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_iso_dates() {
    let d = parse_iso("2024-03-15").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
  }

  #[test]
  fn rejects_malformed_dates() {
    for bad in ["2024/03/15", "15-03-2024", "not-a-date", "2024-13-01"] {
      let err = parse_iso(bad).unwrap_err();
      assert!(matches!(err, Error::InvalidDate(ref v) if v == bad));
    }
  }

  #[test]
  fn february_depends_on_leap_year() {
    assert_eq!(days_in_month(2, 2024), 29);
    assert_eq!(days_in_month(2, 2023), 28);
    assert_eq!(days_in_month(2, 1900), 28); // divisible by 100, not by 400
    assert_eq!(days_in_month(2, 2000), 29);
  }
}
