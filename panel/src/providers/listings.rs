//! # Listings Provider
//!
//! Owns the market listing book and the operations views use to change it.
//!
//! Mutations are two-phase. `create`, `cancel` and `accept` check their preconditions,
//! call the market contract and submit a transaction; the book itself only changes in
//! [`ListingsProvider::apply_confirmation`], once that transaction is confirmed. A
//! listing whose creation is still pending is therefore never shown as real, and a
//! failed cancellation leaves its listing open.

use parking_lot::RwLock;
use shared::{
    Address, EntityId, Listing, ListingId, ListingStatus, Price, Transaction, TxHash, TxId,
    TxIntent, TxKind, TxStatus,
};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::error::{PanelError, Result};
use crate::providers::contracts::ContractSet;
use crate::providers::observer::{Observers, Subscription};
use crate::providers::transactions::TransactionProvider;
use crate::providers::value::{ContractProvider, SignerProvider};

/// Committed change to the book, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingChange {
    Inserted(Listing),
    StatusChanged(Listing),
}

struct ListingBook {
    listings: BTreeMap<ListingId, Listing>,
    /// Transactions submitted through this provider (or adopted from a restored log).
    initiated: HashSet<TxId>,
    /// Confirmations already reconciled.
    applied: HashSet<TxId>,
}

pub struct ListingsProvider {
    book: RwLock<ListingBook>,
    transactions: Arc<TransactionProvider>,
    contracts: Arc<ContractProvider>,
    signer: Arc<SignerProvider>,
    observers: Observers<ListingChange>,
}

impl ListingsProvider {
    /// Build the provider around the listings known at mount time.
    ///
    /// Pending listing transactions already in the log are adopted so their
    /// confirmations are reconciled here.
    pub fn new(
        transactions: Arc<TransactionProvider>,
        contracts: Arc<ContractProvider>,
        signer: Arc<SignerProvider>,
        initial: Vec<Listing>,
    ) -> Self {
        let mut listings = BTreeMap::new();
        for listing in initial {
            if listings.contains_key(&listing.id) {
                warn!(listing_id = %listing.id, "Duplicate listing in initial set, keeping the first");
                continue;
            }
            listings.insert(listing.id, listing);
        }

        let initiated: HashSet<TxId> = transactions.pending().iter().map(|tx| tx.id).collect();
        debug!(
            listings = listings.len(),
            adopted_transactions = initiated.len(),
            "Listing book mounted"
        );

        Self {
            book: RwLock::new(ListingBook {
                listings,
                initiated,
                applied: HashSet::new(),
            }),
            transactions,
            contracts,
            signer,
            observers: Observers::new(),
        }
    }

    /// Offer `entity` for `price`. The listing appears once the transaction confirms.
    pub fn create(&self, entity: EntityId, price: Price) -> Result<Transaction> {
        let (me, contracts) = self.preflight()?;

        if price.is_zero() {
            return Err(self.reject(PanelError::invalid("price must be greater than zero")));
        }

        let owner = contracts
            .game()
            .owner_of(&entity)
            .map_err(|e| PanelError::State(format!("owner lookup for {} failed: {}", entity, e)))?;
        match owner {
            Some(owner) if owner == me => {}
            Some(owner) => {
                return Err(self.reject(PanelError::invalid(format!(
                    "{} belongs to {}",
                    entity,
                    owner.short()
                ))))
            }
            None => {
                return Err(self.reject(PanelError::invalid(format!("unknown entity {}", entity))))
            }
        }

        {
            let book = self.book.read();
            if let Some(listing) = book
                .listings
                .values()
                .find(|listing| listing.is_open() && listing.entity == entity)
            {
                return Err(self.reject(PanelError::invalid(format!(
                    "{} is already listed as {}",
                    entity, listing.id
                ))));
            }
        }
        let creating = self.transactions.pending().into_iter().any(|tx| {
            matches!(&tx.intent, TxIntent::CreateListing { entity: pending, .. } if *pending == entity)
        });
        if creating {
            return Err(self.reject(PanelError::invalid(format!(
                "a listing for {} is already being created",
                entity
            ))));
        }

        let hash = contracts.market().create_listing(&entity, price)?;
        Ok(self.submit_and_observe(TxIntent::CreateListing { entity, price }, hash, me))
    }

    /// Withdraw one of the signer's open listings.
    pub fn cancel(&self, listing_id: ListingId) -> Result<Transaction> {
        let (me, contracts) = self.preflight()?;

        let listing = self.open_listing(listing_id)?;
        if !listing.is_sold_by(&me) {
            return Err(self.reject(PanelError::invalid(format!(
                "{} is not yours to cancel",
                listing_id
            ))));
        }

        let hash = contracts.market().cancel_listing(listing_id)?;
        Ok(self.submit_and_observe(TxIntent::CancelListing { listing_id }, hash, me))
    }

    /// Buy someone else's open listing.
    pub fn accept(&self, listing_id: ListingId) -> Result<Transaction> {
        let (me, contracts) = self.preflight()?;

        let listing = self.open_listing(listing_id)?;
        if listing.is_sold_by(&me) {
            return Err(self.reject(PanelError::invalid(format!(
                "cannot accept your own listing {}",
                listing_id
            ))));
        }

        let hash = contracts.market().accept_listing(listing_id)?;
        Ok(self.submit_and_observe(TxIntent::AcceptListing { listing_id }, hash, me))
    }

    /// Reconcile a confirmed transaction this provider initiated.
    ///
    /// Only the transaction log's own record is trusted: `tx` identifies the
    /// transaction, the log decides whether it is confirmed and what it carries.
    ///
    /// Returns the inserted or updated listing; `None` when nothing changed (not
    /// confirmed in the log, not ours, already applied, or the target is missing or
    /// closed).
    pub fn apply_confirmation(&self, tx: &Transaction) -> Option<Listing> {
        let Some(record) = self.transactions.get(tx.id) else {
            debug!(tx_id = %tx.id, "Confirmation for a transaction missing from the log");
            return None;
        };
        if record.status != TxStatus::Confirmed {
            if tx.status != record.status {
                warn!(
                    tx_id = %tx.id,
                    claimed = tx.status.label(),
                    logged = record.status.label(),
                    "Ignoring confirmation that disagrees with the transaction log"
                );
            }
            return None;
        }
        let tx = &record;

        let change = {
            let mut book = self.book.write();
            if !book.initiated.contains(&tx.id) {
                debug!(tx_id = %tx.id, "Confirmation not initiated by the listing book");
                return None;
            }
            if !book.applied.insert(tx.id) {
                debug!(tx_id = %tx.id, "Confirmation already applied");
                return None;
            }

            match &tx.intent {
                TxIntent::CreateListing { entity, price } => {
                    let receipt = tx.receipt.as_ref()?;
                    let Some(listing_id) = receipt.listing_id else {
                        warn!(tx_id = %tx.id, "Create confirmation carries no listing id");
                        return None;
                    };
                    if book.listings.contains_key(&listing_id) {
                        warn!(tx_id = %tx.id, listing_id = %listing_id, "Listing id already present");
                        return None;
                    }
                    let listing = Listing::open(
                        listing_id,
                        tx.from.clone(),
                        entity.clone(),
                        *price,
                        receipt.confirmed_at,
                    );
                    book.listings.insert(listing_id, listing.clone());
                    ListingChange::Inserted(listing)
                }
                TxIntent::CancelListing { listing_id } => ListingChange::StatusChanged(
                    close(&mut book, tx, *listing_id, ListingStatus::Cancelled)?,
                ),
                TxIntent::AcceptListing { listing_id } => ListingChange::StatusChanged(
                    close(&mut book, tx, *listing_id, ListingStatus::Filled)?,
                ),
            }
        };

        let listing = match &change {
            ListingChange::Inserted(listing) | ListingChange::StatusChanged(listing) => listing.clone(),
        };
        info!(
            tx_id = %tx.id,
            kind = tx.kind.label(),
            listing_id = %listing.id,
            status = listing.status.label(),
            "Listing book updated"
        );
        self.observers.notify(&change);
        Some(listing)
    }

    /// Open listings ordered by creation time.
    pub fn active_listings(&self) -> Vec<Listing> {
        let mut active: Vec<Listing> = self
            .book
            .read()
            .listings
            .values()
            .filter(|listing| listing.is_open())
            .cloned()
            .collect();
        active.sort_by_key(|listing| (listing.created_at, listing.id));
        active
    }

    /// Every listing known to the panel, including filled and cancelled ones.
    pub fn all_listings(&self) -> Vec<Listing> {
        let mut all: Vec<Listing> = self.book.read().listings.values().cloned().collect();
        all.sort_by_key(|listing| (listing.created_at, listing.id));
        all
    }

    pub fn listings_by(&self, seller: &Address) -> Vec<Listing> {
        self.all_listings()
            .into_iter()
            .filter(|listing| listing.is_sold_by(seller))
            .collect()
    }

    pub fn get(&self, listing_id: ListingId) -> Option<Listing> {
        self.book.read().listings.get(&listing_id).cloned()
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ListingChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    fn preflight(&self) -> Result<(Address, Arc<ContractSet>)> {
        let signer = self.signer.get()?;
        let contracts = self.contracts.get()?;
        self.transactions.ensure_connected()?;
        Ok((signer.address(), contracts))
    }

    fn open_listing(&self, listing_id: ListingId) -> Result<Listing> {
        match self.get(listing_id) {
            Some(listing) if listing.is_open() => Ok(listing),
            Some(listing) => Err(self.reject(PanelError::invalid(format!(
                "{} is {}",
                listing_id,
                listing.status.label()
            )))),
            None => Err(self.reject(PanelError::invalid(format!("no listing {}", listing_id)))),
        }
    }

    fn submit_and_observe(&self, intent: TxIntent, hash: TxHash, from: Address) -> Transaction {
        let tx = self.transactions.submit(intent, hash, from);
        self.book.write().initiated.insert(tx.id);
        if let Err(e) = self.transactions.observe(&tx) {
            warn!(tx_id = %tx.id, error = %e, "Could not watch transaction");
        }
        tx
    }

    fn reject(&self, err: PanelError) -> PanelError {
        debug!(error = %err, "Listing operation rejected");
        err
    }
}

/// Move an open listing to a terminal status on behalf of `tx`.
fn close(
    book: &mut ListingBook,
    tx: &Transaction,
    listing_id: ListingId,
    status: ListingStatus,
) -> Option<Listing> {
    debug_assert!(matches!(tx.kind, TxKind::CancelListing | TxKind::AcceptListing));
    let Some(listing) = book.listings.get_mut(&listing_id) else {
        warn!(tx_id = %tx.id, listing_id = %listing_id, "Confirmation targets an unknown listing");
        return None;
    };
    if !listing.is_open() {
        warn!(
            tx_id = %tx.id,
            listing_id = %listing_id,
            status = listing.status.label(),
            "Confirmation targets a listing that is no longer open"
        );
        return None;
    }
    listing.status = status;
    if status == ListingStatus::Filled {
        listing.buyer = Some(tx.from.clone());
    }
    Some(listing.clone())
}
