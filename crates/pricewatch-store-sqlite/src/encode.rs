//! Encoding and decoding helpers between Rust domain types and the plain
//! column values stored in SQLite.
//!
//! Most columns map directly onto rusqlite's built-in conversions; only the
//! sale-point kind needs an explicit string round trip.

use pricewatch_core::entity::{SalePoint, SalePointKind};

use crate::{Error, Result};

// ─── SalePointKind ───────────────────────────────────────────────────────────

pub fn encode_kind(kind: SalePointKind) -> &'static str { kind.as_str() }

pub fn decode_kind(s: &str) -> Result<SalePointKind> {
  match s {
    "supermarket" => Ok(SalePointKind::Supermarket),
    "electronics" => Ok(SalePointKind::Electronics),
    "clothing" => Ok(SalePointKind::Clothing),
    "online" => Ok(SalePointKind::Online),
    "other" => Ok(SalePointKind::Other),
    other => Err(Error::Decode(format!("unknown sale point kind: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `sale_points` row.
pub struct RawSalePoint {
  pub id:      i64,
  pub name:    String,
  pub city:    Option<String>,
  pub website: Option<String>,
  pub kind:    Option<String>,
}

impl RawSalePoint {
  pub fn into_sale_point(self) -> Result<SalePoint> {
    let kind = self.kind.as_deref().map(decode_kind).transpose()?;
    Ok(SalePoint {
      id: self.id,
      name: self.name,
      city: self.city,
      website: self.website,
      kind,
    })
  }
}
