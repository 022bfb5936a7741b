//! Error types for `pricewatch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A date string that does not parse as an ISO calendar date.
  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  /// A field that fails the catalog's input rules.
  #[error("{0}")]
  Validation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
