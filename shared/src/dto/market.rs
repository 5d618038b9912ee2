//! # Market Data Transfer Objects
//!
//! Listings and the value types they are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::short_address;

/// Account identity on the chain (player, seller, buyer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for list rows, e.g. `0x3f...b8c9`.
    pub fn short(&self) -> String {
        short_address(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a game entity that can be offered on the market.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price in the smallest unit of the market currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain-assigned listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(u64);

impl ListingId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of a listing. `Open` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Open,
    Filled,
    Cancelled,
}

impl ListingStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ListingStatus::Open)
    }

    pub fn label(self) -> &'static str {
        match self {
            ListingStatus::Open => "open",
            ListingStatus::Filled => "filled",
            ListingStatus::Cancelled => "cancelled",
        }
    }
}

/// One market offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub seller: Address,
    pub entity: EntityId,
    pub price: Price,
    pub created_at: DateTime<Utc>,
    pub status: ListingStatus,
    /// Set when the listing is filled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Address>,
}

impl Listing {
    /// A freshly confirmed listing.
    pub fn open(
        id: ListingId,
        seller: Address,
        entity: EntityId,
        price: Price,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            seller,
            entity,
            price,
            created_at,
            status: ListingStatus::Open,
            buyer: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == ListingStatus::Open
    }

    pub fn is_sold_by(&self, address: &Address) -> bool {
        &self.seller == address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_status_terminality() {
        assert!(!ListingStatus::Open.is_terminal());
        assert!(ListingStatus::Filled.is_terminal());
        assert!(ListingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_listing_serializes_lowercase_status_and_omits_buyer() {
        let listing = Listing::open(
            ListingId::new(7),
            Address::new("0xseller"),
            EntityId::new("0000a3b1"),
            Price::new(10),
            DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap(),
        );

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["id"], 7);
        assert_eq!(json["price"], 10);
        assert!(json.get("buyer").is_none());
    }

    #[test]
    fn test_listing_id_display() {
        assert_eq!(ListingId::new(42).to_string(), "#42");
    }
}
