//! # Panel Application Root
//!
//! [`App`] owns the composed [`PanelContext`], the single event queue and the tab
//! [`Navigation`].
//!
//! ## Event Loop
//!
//! Confirmation watchers run on Tokio tasks and post [`PanelEvent`]s to an unbounded
//! `async_channel`. The host drives the loop, either by polling [`App::on_tick`] once per
//! frame or by awaiting [`App::process_next_event`]. Events are applied one at a time, so
//! two resolutions never interleave.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use panel::app::App;
//! use panel::debug::DebugConfig;
//! use panel::providers::{ContractSet, PanelInit};
//! use panel::services::{signer::LocalSigner, sim::SimulatedChain};
//! use shared::Address;
//!
//! # async fn run() {
//! let chain = Arc::new(SimulatedChain::manual());
//! let init = PanelInit::new(
//!     chain.clone(),
//!     ContractSet::new(chain.clone(), chain),
//!     Arc::new(LocalSigner::new(Address::new("0xa11ce"))),
//! );
//! let mut app = App::new(init, &DebugConfig::default());
//!
//! loop {
//!     app.process_next_event().await;
//! }
//! # }
//! ```

mod event_handler;
pub mod events;
pub mod navigation;
pub(crate) mod tasks;

pub use events::PanelEvent;
pub use navigation::{Navigation, Tab};

use async_channel::Receiver;
use std::sync::Arc;

use crate::app::event_handler::PanelEventHandler;
use crate::debug::DebugConfig;
use crate::providers::{PanelContext, PanelInit};

pub struct App {
    context: Arc<PanelContext>,
    event_rx: Receiver<PanelEvent>,
    navigation: Navigation,
}

impl App {
    /// Mount the panel.
    ///
    /// Pending transactions restored through `init` get a fresh watcher.
    pub fn new(init: PanelInit, config: &DebugConfig) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();
        let context = Arc::new(PanelContext::new(
            init,
            event_tx,
            config.confirmation_overdue,
        ));

        for tx in context.transactions.pending() {
            if let Err(e) = context.transactions.observe(&tx) {
                tracing::warn!(tx_id = %tx.id, error = %e, "Restored transaction left unwatched");
            }
        }

        Self {
            context,
            event_rx,
            navigation: Navigation::default(),
        }
    }

    pub fn context(&self) -> &Arc<PanelContext> {
        &self.context
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn navigation_mut(&mut self) -> &mut Navigation {
        &mut self.navigation
    }

    /// Events waiting to be applied.
    pub fn queued_events(&self) -> usize {
        self.event_rx.len()
    }

    /// Apply every event already queued without waiting. Returns how many were applied.
    pub fn on_tick(&mut self) -> usize {
        let start = std::time::Instant::now();
        let mut events_processed = 0usize;

        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            events_processed += 1;
        }

        if events_processed > 0 {
            tracing::debug!(
                events_processed,
                processing_time_us = start.elapsed().as_micros() as u64,
                "Processed queued events"
            );
        }
        events_processed
    }

    /// Wait for the next event and apply it. Returns `false` once the queue is closed.
    pub async fn process_next_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Ok(event) => {
                self.handle_event(event);
                true
            }
            Err(_) => false,
        }
    }

    pub fn handle_event(&mut self, event: PanelEvent) {
        self.handle_event_impl(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::{MarketContract, Signer};
    use crate::providers::ContractSet;
    use crate::services::signer::LocalSigner;
    use crate::services::sim::SimulatedChain;
    use chrono::Utc;
    use shared::{
        Address, Entity, EntityId, Listing, ListingId, ListingStatus, Price, Transaction, TxId,
        TxIntent, TxStatus,
    };

    const ALICE: &str = "0xa11ce00000000000000000000000000000000001";
    const BOB: &str = "0xb0b0000000000000000000000000000000000002";

    fn bob_listing(id: u64) -> Listing {
        Listing::open(
            ListingId::new(id),
            Address::new(BOB),
            EntityId::new(format!("planet-{}", id)),
            Price::new(5),
            Utc::now(),
        )
    }

    fn mount(
        chain: &Arc<SimulatedChain>,
        signer: &str,
        listings: Vec<Listing>,
        transactions: Vec<Transaction>,
    ) -> App {
        let signer: Arc<dyn Signer> = Arc::new(LocalSigner::new(Address::new(signer)));
        let init = PanelInit::new(
            chain.clone(),
            ContractSet::new(chain.clone(), chain.clone()),
            signer,
        )
        .with_listings(listings)
        .with_transactions(transactions);
        App::new(init, &DebugConfig::default())
    }

    fn alice_chain() -> Arc<SimulatedChain> {
        let chain = Arc::new(SimulatedChain::manual().with_account(Address::new(ALICE)));
        chain.add_entity(Entity::new(
            EntityId::new("planet-a"),
            Address::new(ALICE),
            "Aurora",
            3,
        ));
        chain
    }

    #[tokio::test]
    async fn test_create_confirms_through_event_loop() {
        let chain = alice_chain();
        let mut app = mount(&chain, ALICE, Vec::new(), Vec::new());
        let context = Arc::clone(app.context());

        let tx = context
            .listings
            .create(EntityId::new("planet-a"), Price::new(10))
            .unwrap();
        assert!(context.listings.active_listings().is_empty());

        chain.confirm(&tx.hash).unwrap();
        assert!(app.process_next_event().await);

        assert_eq!(
            context.transactions.get(tx.id).unwrap().status,
            TxStatus::Confirmed
        );
        let active = context.listings.active_listings();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].entity, EntityId::new("planet-a"));
        assert_eq!(active[0].price, Price::new(10));
        assert_eq!(active[0].status, ListingStatus::Open);
    }

    #[tokio::test]
    async fn test_failed_cancel_records_error_and_keeps_listing() {
        let chain = alice_chain();
        let listing = Listing::open(
            ListingId::new(1),
            Address::new(ALICE),
            EntityId::new("planet-a"),
            Price::new(10),
            Utc::now(),
        );
        let mut app = mount(&chain, ALICE, vec![listing], Vec::new());
        let context = Arc::clone(app.context());

        let tx = context.listings.cancel(ListingId::new(1)).unwrap();
        chain.fail(&tx.hash, "reverted");
        app.process_next_event().await;

        let recorded = context.transactions.get(tx.id).unwrap();
        assert_eq!(recorded.status, TxStatus::Failed);
        assert_eq!(recorded.error.as_deref(), Some("reverted"));
        assert_eq!(
            context.listings.get(ListingId::new(1)).unwrap().status,
            ListingStatus::Open
        );
    }

    #[tokio::test]
    async fn test_on_tick_applies_every_queued_event() {
        let chain = alice_chain();
        let mut app = mount(&chain, ALICE, vec![bob_listing(1), bob_listing(2)], Vec::new());
        let context = Arc::clone(app.context());

        let first = context.listings.accept(ListingId::new(1)).unwrap();
        let second = context.listings.accept(ListingId::new(2)).unwrap();
        assert_eq!(app.on_tick(), 0);

        chain.confirm(&first.hash).unwrap();
        chain.confirm(&second.hash).unwrap();
        while app.queued_events() < 2 {
            tokio::task::yield_now().await;
        }

        assert_eq!(app.on_tick(), 2);
        assert!(context.listings.active_listings().is_empty());
        assert!(context.transactions.pending().is_empty());
    }

    #[tokio::test]
    async fn test_restored_pending_transaction_is_reobserved() {
        let chain = alice_chain();
        chain.seed_listing(bob_listing(3));
        let hash = chain.accept_listing(ListingId::new(3)).unwrap();
        let restored = Transaction::pending(
            TxId::new(0),
            TxIntent::AcceptListing {
                listing_id: ListingId::new(3),
            },
            hash.clone(),
            Address::new(ALICE),
            Utc::now(),
        );

        let mut app = mount(&chain, ALICE, vec![bob_listing(3)], vec![restored]);
        chain.confirm(&hash).unwrap();
        app.process_next_event().await;

        let listing = app.context().listings.get(ListingId::new(3)).unwrap();
        assert_eq!(listing.status, ListingStatus::Filled);
        assert_eq!(listing.buyer, Some(Address::new(ALICE)));
    }

    #[tokio::test]
    async fn test_duplicate_resolution_event_is_ignored() {
        let chain = alice_chain();
        let mut app = mount(&chain, ALICE, vec![bob_listing(1)], Vec::new());
        let context = Arc::clone(app.context());

        let tx = context.listings.accept(ListingId::new(1)).unwrap();
        chain.fail(&tx.hash, "reverted");
        app.process_next_event().await;

        app.handle_event(PanelEvent::TransactionResolved {
            id: tx.id,
            outcome: shared::TxOutcome::Failed("late duplicate".to_string()),
        });
        assert_eq!(
            context.transactions.get(tx.id).unwrap().error.as_deref(),
            Some("reverted")
        );
    }

    #[test]
    fn test_navigation_is_independent_of_state() {
        let chain = alice_chain();
        let mut app = mount(&chain, ALICE, Vec::new(), Vec::new());

        app.navigation_mut().select(Tab::MyPlanets);
        app.navigation_mut().next();
        assert_eq!(app.navigation().active(), Tab::Guide);
    }
}
