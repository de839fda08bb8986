use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Vendor identifier: an opaque 24 character hex string (ObjectId style).
/// Parsing normalizes to lowercase, which is how ids are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(AppError::BadRequest(
                "vendor_id must be a 24 character hex string".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VendorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Vendor {
    pub id: String,
    pub name: String,
}

/// One catalog entry ("parent product"). `name` encodes
/// `code - display name - color`; the aggregation engine decomposes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub vendor_id: String,
}

/// A purchase event with its cart lines. `payment_at` stays `None` until
/// payment completes.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: String,
    pub payment_at: Option<DateTime<Utc>>,
    pub lines: Vec<CartLine>,
}

/// One product entry within an order. `product_id` is a plain reference and
/// may dangle if the catalog entry was deleted; reports drop such lines.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: String,
    pub item_count: i64,
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_id_accepts_24_hex_chars() {
        let id = VendorId::parse("65a1b2c3d4e5f6a7b8c9d0e1").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn vendor_id_lowercases_input() {
        let id = VendorId::parse("65A1B2C3D4E5F6A7B8C9D0E1").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn vendor_id_rejects_wrong_length_and_non_hex() {
        assert!(VendorId::parse("65a1b2c3d4e5f6a7b8c9d0e").is_err());
        assert!(VendorId::parse("65a1b2c3d4e5f6a7b8c9d0e12").is_err());
        assert!(VendorId::parse("65a1b2c3d4e5f6a7b8c9d0ez").is_err());
        assert!(VendorId::parse("").is_err());
    }
}
