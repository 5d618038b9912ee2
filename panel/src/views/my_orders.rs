//! My Orders tab: this session's transactions authored by the signer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{ListingId, Transaction, TxId, TxKind, TxStatus};

use crate::core::error::Result;
use crate::providers::PanelContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub id: TxId,
    pub kind: TxKind,
    pub target: Option<ListingId>,
    pub status: TxStatus,
    /// `pending`, `confirmed` or `failed`
    pub badge: &'static str,
    pub error: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Transaction> for OrderRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind,
            target: tx
                .intent
                .target()
                .or_else(|| tx.receipt.as_ref().and_then(|r| r.listing_id)),
            status: tx.status,
            badge: tx.status.label(),
            error: tx.error.clone(),
            submitted_at: tx.submitted_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MyOrdersView {
    /// Newest first
    pub rows: Vec<OrderRow>,
}

impl MyOrdersView {
    pub fn build(context: &PanelContext) -> Result<Self> {
        let me = context.signer.get()?.address();
        let rows = context
            .transactions
            .list()
            .iter()
            .rev()
            .filter(|tx| tx.from == me)
            .map(OrderRow::from)
            .collect();
        Ok(Self { rows })
    }

    pub fn pending_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.status == TxStatus::Pending)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::*;
    use shared::{Address, EntityId, Price, TxHash, TxIntent, TxOutcome};

    #[test]
    fn test_newest_first_with_badges() {
        let m = mount(Some(ALICE), vec![listing(3, BOB, 10)]);
        let create = m
            .context
            .listings
            .create(EntityId::new("planet-1"), Price::new(10))
            .unwrap();
        let accept = m.context.listings.accept(ListingId::new(3)).unwrap();
        m.context
            .transactions
            .resolve(create.id, TxOutcome::Failed("reverted".to_string()));

        let view = MyOrdersView::build(&m.context).unwrap();
        let badges: Vec<(TxId, &str)> = view.rows.iter().map(|r| (r.id, r.badge)).collect();
        assert_eq!(badges, vec![(accept.id, "pending"), (create.id, "failed")]);
        assert_eq!(view.rows[0].target, Some(ListingId::new(3)));
        assert_eq!(view.rows[1].error.as_deref(), Some("reverted"));
        assert_eq!(view.pending_count(), 1);
    }

    #[test]
    fn test_excludes_other_authors() {
        let m = mount(Some(ALICE), Vec::new());
        m.context.transactions.submit(
            TxIntent::CancelListing {
                listing_id: ListingId::new(9),
            },
            TxHash::new("0xbob"),
            Address::new(BOB),
        );

        assert!(MyOrdersView::build(&m.context).unwrap().rows.is_empty());
    }
}
