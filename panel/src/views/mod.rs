//! # Views
//!
//! Read-models behind the five panel tabs. Each view is rebuilt from a
//! [`PanelContext`] snapshot; a [`Staleness`] flag tells the host when a rebuild is due.
//!
//! | Tab          | View                |
//! |--------------|---------------------|
//! | Market       | [`MarketView`]      |
//! | My Listings  | [`MyListingsView`]  |
//! | My Orders    | [`MyOrdersView`]    |
//! | My Planets   | [`MyPlanetsView`]   |
//! | Guide        | [`GuideView`]       |

pub mod guide;
pub mod market;
pub mod my_listings;
pub mod my_orders;
pub mod my_planets;

pub use guide::GuideView;
pub use market::MarketView;
pub use my_listings::MyListingsView;
pub use my_orders::{MyOrdersView, OrderRow};
pub use my_planets::{MyPlanetsView, PlanetRow};

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{Address, EntityId, Listing, ListingId, Price};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::providers::{PanelContext, Subscription};

/// One listing as the market tabs display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub id: ListingId,
    pub entity: EntityId,
    pub price: Price,
    pub seller: Address,
    /// Elided seller address
    pub seller_label: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            entity: listing.entity.clone(),
            price: listing.price,
            seller: listing.seller.clone(),
            seller_label: listing.seller.short(),
            created_at: listing.created_at,
        }
    }
}

/// Marks a view stale whenever the listing book or the transaction log changes.
///
/// Listening stops when the flag is dropped.
pub struct Staleness {
    dirty: Arc<AtomicBool>,
    _listings: Subscription,
    _transactions: Subscription,
}

impl Staleness {
    /// Starts clean.
    pub fn watch(context: &PanelContext) -> Self {
        let dirty = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&dirty);
        let listings = context
            .listings
            .subscribe(move |_| flag.store(true, Ordering::Release));
        let flag = Arc::clone(&dirty);
        let transactions = context
            .transactions
            .subscribe(move |_| flag.store(true, Ordering::Release));

        Self {
            dirty,
            _listings: listings,
            _transactions: transactions,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_staleness_tracks_changes_until_dropped() {
        let m = mount(Some(ALICE), Vec::new());
        let staleness = Staleness::watch(&m.context);
        assert!(!staleness.take());

        let tx = m
            .context
            .listings
            .create(EntityId::new("planet-1"), Price::new(10))
            .unwrap();
        assert!(staleness.take());
        assert!(!staleness.take());

        drop(staleness);
        m.context
            .transactions
            .resolve(tx.id, shared::TxOutcome::Failed("reverted".to_string()));
    }

    #[test]
    fn test_row_elides_seller() {
        let row = ListingRow::from(&listing(1, ALICE, 0));
        assert_eq!(row.seller_label, "0xa11c...0001");
        assert_eq!(row.price, Price::new(10));
    }
}
