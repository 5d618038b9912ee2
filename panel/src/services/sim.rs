//! # Simulated Chain
//!
//! In-memory stand-in for the game client's chain connection and contracts. The demo
//! binary runs it in auto-confirm mode; tests run it in manual mode and decide when and
//! how each transaction resolves.
//!
//! ## Modes
//!
//! - [`SimulatedChain::manual`]: transactions stay pending until [`SimulatedChain::confirm`]
//!   or [`SimulatedChain::fail`] is called for their hash.
//! - [`SimulatedChain::auto`]: every transaction confirms after a fixed delay, unless it
//!   was marked with [`SimulatedChain::fail_on_mine`].

use async_channel::{unbounded, Receiver, Sender};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use shared::{
    Address, Entity, EntityId, Listing, ListingId, ListingStatus, Price, Receipt, TxHash,
    TxIntent, TxOutcome,
};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::core::service::{ChainConnection, ContractError, GameContract, MarketContract};

const SIM_CHAIN_ID: u64 = 31337;
const DEFAULT_ACCOUNT: &str = "0xa11ce00000000000000000000000000000000001";

struct Broadcast {
    intent: TxIntent,
    from: Address,
}

struct SimState {
    entities: BTreeMap<EntityId, Entity>,
    listings: BTreeMap<ListingId, Listing>,
    mempool: HashMap<TxHash, Broadcast>,
    outcomes: HashMap<TxHash, (Sender<TxOutcome>, Receiver<TxOutcome>)>,
    doomed: HashMap<TxHash, String>,
    reject_next: Option<ContractError>,
    next_listing_id: u64,
    block: u64,
}

impl SimState {
    fn channel(&mut self, hash: &TxHash) -> (Sender<TxOutcome>, Receiver<TxOutcome>) {
        self.outcomes
            .entry(hash.clone())
            .or_insert_with(unbounded)
            .clone()
    }
}

pub struct SimulatedChain {
    account: Address,
    auto_confirm: Option<Duration>,
    state: Mutex<SimState>,
}

impl SimulatedChain {
    pub fn manual() -> Self {
        Self::with_mode(None)
    }

    pub fn auto(delay: Duration) -> Self {
        Self::with_mode(Some(delay))
    }

    fn with_mode(auto_confirm: Option<Duration>) -> Self {
        Self {
            account: Address::new(DEFAULT_ACCOUNT),
            auto_confirm,
            state: Mutex::new(SimState {
                entities: BTreeMap::new(),
                listings: BTreeMap::new(),
                mempool: HashMap::new(),
                outcomes: HashMap::new(),
                doomed: HashMap::new(),
                reject_next: None,
                next_listing_id: 1,
                block: 1,
            }),
        }
    }

    /// Account the connection and contract calls act as.
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = account;
        self
    }

    pub fn add_entity(&self, entity: Entity) {
        self.state.lock().entities.insert(entity.id.clone(), entity);
    }

    /// Register a listing that exists on chain before the panel mounts.
    pub fn seed_listing(&self, listing: Listing) {
        let mut state = self.state.lock();
        state.next_listing_id = state.next_listing_id.max(listing.id.value() + 1);
        state.listings.insert(listing.id, listing);
    }

    /// Make the next contract call fail before broadcast.
    pub fn reject_next(&self, err: ContractError) {
        self.state.lock().reject_next = Some(err);
    }

    /// In auto mode, revert `hash` with `detail` instead of confirming it.
    pub fn fail_on_mine(&self, hash: &TxHash, detail: impl Into<String>) {
        self.state.lock().doomed.insert(hash.clone(), detail.into());
    }

    /// Mine a broadcast transaction. Returns `None` for unknown or already mined hashes.
    pub fn confirm(&self, hash: &TxHash) -> Option<Receipt> {
        let mut state = self.state.lock();
        let broadcast = state.mempool.remove(hash)?;
        state.block += 1;

        let mut listing_id = None;
        match broadcast.intent {
            TxIntent::CreateListing { entity, price } => {
                let id = ListingId::new(state.next_listing_id);
                state.next_listing_id += 1;
                state.listings.insert(
                    id,
                    Listing::open(id, broadcast.from, entity, price, Utc::now()),
                );
                listing_id = Some(id);
            }
            TxIntent::CancelListing { listing_id: id } => {
                if let Some(listing) = state.listings.get_mut(&id) {
                    listing.status = ListingStatus::Cancelled;
                }
            }
            TxIntent::AcceptListing { listing_id: id } => {
                let sold = state.listings.get_mut(&id).map(|listing| {
                    listing.status = ListingStatus::Filled;
                    listing.buyer = Some(broadcast.from.clone());
                    listing.entity.clone()
                });
                if let Some(entity) = sold {
                    if let Some(entity) = state.entities.get_mut(&entity) {
                        entity.owner = broadcast.from;
                    }
                }
            }
        }

        let receipt = Receipt {
            hash: hash.clone(),
            block: state.block,
            confirmed_at: Utc::now(),
            listing_id,
        };
        let (tx, _) = state.channel(hash);
        let _ = tx.try_send(TxOutcome::Confirmed(receipt.clone()));
        debug!(hash = %hash, block = receipt.block, "Simulated transaction mined");
        Some(receipt)
    }

    /// Revert a broadcast transaction with `detail`.
    pub fn fail(&self, hash: &TxHash, detail: impl Into<String>) -> bool {
        let mut state = self.state.lock();
        if state.mempool.remove(hash).is_none() {
            return false;
        }
        let (tx, _) = state.channel(hash);
        let _ = tx.try_send(TxOutcome::Failed(detail.into()));
        true
    }

    pub fn pending_hashes(&self) -> Vec<TxHash> {
        self.state.lock().mempool.keys().cloned().collect()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.state.lock().listings.values().cloned().collect()
    }

    fn broadcast(&self, intent: TxIntent) -> Result<TxHash, ContractError> {
        let mut state = self.state.lock();
        if let Some(err) = state.reject_next.take() {
            return Err(err);
        }
        let hash = TxHash::new(format!("0x{}", Uuid::new_v4().simple()));
        debug!(hash = %hash, kind = intent.kind().label(), "Simulated transaction broadcast");
        state.mempool.insert(
            hash.clone(),
            Broadcast {
                intent,
                from: self.account.clone(),
            },
        );
        Ok(hash)
    }
}

#[async_trait]
impl ChainConnection for SimulatedChain {
    fn address(&self) -> Option<Address> {
        Some(self.account.clone())
    }

    fn chain_id(&self) -> u64 {
        SIM_CHAIN_ID
    }

    async fn wait_for_confirmation(&self, hash: &TxHash) -> TxOutcome {
        let (_, rx) = self.state.lock().channel(hash);

        if let Some(delay) = self.auto_confirm {
            tokio::time::sleep(delay).await;
            let doomed = self.state.lock().doomed.remove(hash);
            match doomed {
                Some(detail) => {
                    self.fail(hash, detail);
                }
                None => {
                    self.confirm(hash);
                }
            }
        }

        rx.recv()
            .await
            .unwrap_or_else(|_| TxOutcome::Failed("connection closed".to_string()))
    }
}

impl MarketContract for SimulatedChain {
    fn create_listing(&self, entity: &EntityId, price: Price) -> Result<TxHash, ContractError> {
        self.broadcast(TxIntent::CreateListing {
            entity: entity.clone(),
            price,
        })
    }

    fn cancel_listing(&self, listing_id: ListingId) -> Result<TxHash, ContractError> {
        self.broadcast(TxIntent::CancelListing { listing_id })
    }

    fn accept_listing(&self, listing_id: ListingId) -> Result<TxHash, ContractError> {
        self.broadcast(TxIntent::AcceptListing { listing_id })
    }
}

impl GameContract for SimulatedChain {
    fn owned_entities(&self, owner: &Address) -> Result<Vec<Entity>, ContractError> {
        Ok(self
            .state
            .lock()
            .entities
            .values()
            .filter(|entity| &entity.owner == owner)
            .cloned()
            .collect())
    }

    fn owner_of(&self, entity: &EntityId) -> Result<Option<Address>, ContractError> {
        Ok(self
            .state
            .lock()
            .entities
            .get(entity)
            .map(|entity| entity.owner.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_assigns_listing_ids() {
        let chain = SimulatedChain::manual();
        let hash = chain
            .create_listing(&EntityId::new("planet-a"), Price::new(10))
            .unwrap();

        let receipt = chain.confirm(&hash).unwrap();
        assert_eq!(receipt.listing_id, Some(ListingId::new(1)));
        assert!(chain.confirm(&hash).is_none());
        assert_eq!(chain.listings().len(), 1);
    }

    #[test]
    fn test_reject_next_applies_once() {
        let chain = SimulatedChain::manual();
        chain.reject_next(ContractError::Rejected("user denied".to_string()));

        assert!(chain.cancel_listing(ListingId::new(1)).is_err());
        assert!(chain.cancel_listing(ListingId::new(1)).is_ok());
    }

    #[test]
    fn test_accept_transfers_entity() {
        let chain = SimulatedChain::manual().with_account(Address::new("0xbuyer"));
        chain.add_entity(Entity::new(
            EntityId::new("planet-a"),
            Address::new("0xseller"),
            "Aurora",
            2,
        ));
        chain.seed_listing(Listing::open(
            ListingId::new(4),
            Address::new("0xseller"),
            EntityId::new("planet-a"),
            Price::new(10),
            Utc::now(),
        ));

        let hash = chain.accept_listing(ListingId::new(4)).unwrap();
        chain.confirm(&hash).unwrap();

        assert_eq!(
            chain.owner_of(&EntityId::new("planet-a")).unwrap(),
            Some(Address::new("0xbuyer"))
        );
    }

    #[tokio::test]
    async fn test_wait_resolves_after_manual_fail() {
        let chain = SimulatedChain::manual();
        let hash = chain.cancel_listing(ListingId::new(1)).unwrap();
        assert!(chain.fail(&hash, "reverted"));

        assert_eq!(
            chain.wait_for_confirmation(&hash).await,
            TxOutcome::Failed("reverted".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_mode_confirms_after_delay() {
        let chain = SimulatedChain::auto(Duration::from_millis(500));
        let hash = chain
            .create_listing(&EntityId::new("planet-a"), Price::new(3))
            .unwrap();

        let outcome = chain.wait_for_confirmation(&hash).await;
        assert!(matches!(outcome, TxOutcome::Confirmed(receipt) if receipt.listing_id.is_some()));
        assert!(chain.pending_hashes().is_empty());
    }
}
