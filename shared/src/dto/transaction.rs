//! # Transaction Data Transfer Objects
//!
//! Records of chain actions submitted by the panel and how they resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::market::{Address, EntityId, ListingId, Price};

/// Session-unique transaction identifier, allocated by the transaction log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(u64);

impl TxId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}

/// Opaque handle the chain returns for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a transaction is meant to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    CreateListing,
    CancelListing,
    AcceptListing,
}

impl TxKind {
    pub fn label(self) -> &'static str {
        match self {
            TxKind::CreateListing => "create listing",
            TxKind::CancelListing => "cancel listing",
            TxKind::AcceptListing => "accept listing",
        }
    }
}

/// Payload of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TxIntent {
    CreateListing { entity: EntityId, price: Price },
    CancelListing { listing_id: ListingId },
    AcceptListing { listing_id: ListingId },
}

impl TxIntent {
    pub fn kind(&self) -> TxKind {
        match self {
            TxIntent::CreateListing { .. } => TxKind::CreateListing,
            TxIntent::CancelListing { .. } => TxKind::CancelListing,
            TxIntent::AcceptListing { .. } => TxKind::AcceptListing,
        }
    }

    /// Listing the intent refers to. `None` for creations, whose id is not known until confirmation.
    pub fn target(&self) -> Option<ListingId> {
        match self {
            TxIntent::CreateListing { .. } => None,
            TxIntent::CancelListing { listing_id } | TxIntent::AcceptListing { listing_id } => {
                Some(*listing_id)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TxStatus::Pending)
    }

    pub fn label(self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Confirmed => "confirmed",
            TxStatus::Failed => "failed",
        }
    }
}

/// Proof of inclusion for a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub hash: TxHash,
    pub block: u64,
    pub confirmed_at: DateTime<Utc>,
    /// Chain-assigned id of the listing a `CreateListing` transaction produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<ListingId>,
}

/// How a pending transaction resolved on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum TxOutcome {
    Confirmed(Receipt),
    Failed(String),
}

/// One submitted chain action and its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub kind: TxKind,
    pub intent: TxIntent,
    pub hash: TxHash,
    /// Signer that authored the transaction.
    pub from: Address,
    pub submitted_at: DateTime<Utc>,
    pub status: TxStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Transaction {
    pub fn pending(
        id: TxId,
        intent: TxIntent,
        hash: TxHash,
        from: Address,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: intent.kind(),
            intent,
            hash,
            from,
            submitted_at,
            status: TxStatus::Pending,
            receipt: None,
            error: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TxStatus::Pending
    }

    /// Apply a chain outcome. Returns `false` and leaves the record untouched if it is already terminal.
    pub fn resolve(&mut self, outcome: TxOutcome) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        match outcome {
            TxOutcome::Confirmed(receipt) => {
                self.status = TxStatus::Confirmed;
                self.receipt = Some(receipt);
            }
            TxOutcome::Failed(detail) => {
                self.status = TxStatus::Failed;
                self.error = Some(detail);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_cancel() -> Transaction {
        Transaction::pending(
            TxId::new(1),
            TxIntent::CancelListing {
                listing_id: ListingId::new(3),
            },
            TxHash::new("0xabc"),
            Address::new("0xseller"),
            Utc::now(),
        )
    }

    #[test]
    fn test_intent_kind_and_target() {
        let create = TxIntent::CreateListing {
            entity: EntityId::new("planet-1"),
            price: Price::new(10),
        };
        assert_eq!(create.kind(), TxKind::CreateListing);
        assert_eq!(create.target(), None);

        let accept = TxIntent::AcceptListing {
            listing_id: ListingId::new(9),
        };
        assert_eq!(accept.kind(), TxKind::AcceptListing);
        assert_eq!(accept.target(), Some(ListingId::new(9)));
    }

    #[test]
    fn test_resolve_is_single_shot() {
        let mut tx = pending_cancel();
        assert!(tx.resolve(TxOutcome::Failed("reverted".to_string())));
        assert_eq!(tx.status, TxStatus::Failed);
        assert_eq!(tx.error.as_deref(), Some("reverted"));

        let receipt = Receipt {
            hash: TxHash::new("0xabc"),
            block: 12,
            confirmed_at: Utc::now(),
            listing_id: None,
        };
        assert!(!tx.resolve(TxOutcome::Confirmed(receipt)));
        assert_eq!(tx.status, TxStatus::Failed);
        assert!(tx.receipt.is_none());
    }

    #[test]
    fn test_intent_serializes_with_kind_tag() {
        let json = serde_json::to_value(TxIntent::CancelListing {
            listing_id: ListingId::new(3),
        })
        .unwrap();
        assert_eq!(json["kind"], "cancel_listing");
        assert_eq!(json["listing_id"], 3);
    }
}
