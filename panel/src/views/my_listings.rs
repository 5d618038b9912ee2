//! My Listings tab: the signer's open listings.

use serde::Serialize;

use super::ListingRow;
use crate::core::error::Result;
use crate::providers::PanelContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MyListingsView {
    pub rows: Vec<ListingRow>,
}

impl MyListingsView {
    pub fn build(context: &PanelContext) -> Result<Self> {
        let me = context.signer.get()?.address();
        let rows = context
            .listings
            .active_listings()
            .iter()
            .filter(|listing| listing.is_sold_by(&me))
            .map(ListingRow::from)
            .collect();
        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PanelError;
    use crate::views::testing::*;
    use shared::{ListingId, TxOutcome};

    #[test]
    fn test_only_own_open_listings() {
        let m = mount(Some(ALICE), vec![listing(1, ALICE, 30), listing(3, BOB, 20)]);

        let view = MyListingsView::build(&m.context).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, ListingId::new(1));
    }

    #[test]
    fn test_cancelled_listing_disappears() {
        let m = mount(Some(ALICE), vec![listing(1, ALICE, 30)]);
        let tx = m.context.listings.cancel(ListingId::new(1)).unwrap();
        assert_eq!(MyListingsView::build(&m.context).unwrap().rows.len(), 1);

        let receipt = m.chain.confirm(&tx.hash).unwrap();
        let resolved = m
            .context
            .transactions
            .resolve(tx.id, TxOutcome::Confirmed(receipt))
            .unwrap();
        m.context.listings.apply_confirmation(&resolved);

        assert!(MyListingsView::build(&m.context).unwrap().rows.is_empty());
    }

    #[test]
    fn test_requires_signer() {
        let m = mount(None, Vec::new());
        assert_eq!(
            MyListingsView::build(&m.context),
            Err(PanelError::Unavailable("signer"))
        );
    }
}
