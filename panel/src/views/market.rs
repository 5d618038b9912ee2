//! Market tab: open listings the signer can buy.

use serde::Serialize;
use shared::Address;

use super::ListingRow;
use crate::providers::PanelContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketView {
    pub rows: Vec<ListingRow>,
}

impl MarketView {
    /// Active listings not sold by the signer, oldest first. Without a signer every
    /// active listing is shown.
    pub fn build(context: &PanelContext) -> Self {
        let me: Option<Address> = context.signer.try_get().map(|signer| signer.address());
        let rows = context
            .listings
            .active_listings()
            .iter()
            .filter(|listing| me.as_ref().map_or(true, |me| !listing.is_sold_by(me)))
            .map(ListingRow::from)
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::*;
    use shared::ListingId;

    #[test]
    fn test_hides_own_listings() {
        let m = mount(
            Some(ALICE),
            vec![listing(1, ALICE, 30), listing(3, BOB, 20), listing(4, BOB, 40)],
        );

        let ids: Vec<ListingId> = MarketView::build(&m.context).rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![ListingId::new(4), ListingId::new(3)]);
    }

    #[test]
    fn test_without_signer_shows_everything_active() {
        let m = mount(None, vec![listing(1, ALICE, 30), listing(3, BOB, 20)]);
        assert_eq!(MarketView::build(&m.context).rows.len(), 2);
    }
}
