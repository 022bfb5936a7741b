//! Date-window bounds for the history and trend queries.
//!
//! Bounds are applied component-wise: a record passes when its year, month,
//! and day each clear the corresponding bound component independently. This
//! is not a true calendar comparison — a record can be excluded even when it
//! lies chronologically inside the window (e.g. day 10 against a lower
//! bound on day 15 of an earlier month). Downstream consumers depend on the
//! filter behaving exactly this way.

use chrono::{Datelike, NaiveDate};
use pricewatch_core::entity::DateRecord;

pub(crate) fn passes_lower(record: &DateRecord, bound: NaiveDate) -> bool {
  record.year >= bound.year()
    && record.month >= bound.month()
    && record.day >= bound.day()
}

pub(crate) fn passes_upper(record: &DateRecord, bound: NaiveDate) -> bool {
  record.year <= bound.year()
    && record.month <= bound.month()
    && record.day <= bound.day()
}

pub(crate) fn within(
  record: &DateRecord,
  lower: Option<NaiveDate>,
  upper: Option<NaiveDate>,
) -> bool {
  lower.is_none_or(|b| passes_lower(record, b))
    && upper.is_none_or(|b| passes_upper(record, b))
}
