//! Error type for `pricewatch-analytics`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A date string that does not parse as an ISO calendar date. Raised
  /// before any store access.
  #[error("invalid date {0:?}: expected YYYY-MM-DD")]
  InvalidDate(String),

  /// A failure surfaced by the backing store.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<pricewatch_core::Error> for Error {
  fn from(e: pricewatch_core::Error) -> Self {
    match e {
      pricewatch_core::Error::InvalidDate(v) => Self::InvalidDate(v),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
