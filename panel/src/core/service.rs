//! # Collaborator Traits
//!
//! The chain connection, the contracts and the signer are supplied to the panel, never
//! built by it. These traits are the whole surface the state layer relies on, which lets
//! the demo binary and the tests plug in [`crate::services::sim::SimulatedChain`].

use async_trait::async_trait;
use shared::{Address, Entity, EntityId, ListingId, Price, TxHash, TxOutcome};
use std::error::Error;
use std::fmt;

/// Reasons a contract call is refused before it yields a transaction handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The wallet or the user declined to sign
    Rejected(String),
    /// Not enough balance to cover price plus fees
    InsufficientFunds,
    /// Gas estimation reverted
    GasEstimation(String),
    /// Transport failure talking to the node
    Rpc(String),
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::Rejected(msg) => write!(f, "rejected: {}", msg),
            ContractError::InsufficientFunds => write!(f, "insufficient funds"),
            ContractError::GasEstimation(msg) => write!(f, "gas estimation failed: {}", msg),
            ContractError::Rpc(msg) => write!(f, "RPC error: {}", msg),
        }
    }
}

impl Error for ContractError {}

/// Handle to the network layer.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Account the connection is authenticated as, if any.
    fn address(&self) -> Option<Address>;

    /// Network identifier, for logs.
    fn chain_id(&self) -> u64;

    /// Resolve once the transaction is mined or dropped.
    async fn wait_for_confirmation(&self, hash: &TxHash) -> TxOutcome;
}

/// Market contract calls. Each returns as soon as the transaction is broadcast.
pub trait MarketContract: Send + Sync {
    fn create_listing(&self, entity: &EntityId, price: Price) -> Result<TxHash, ContractError>;

    fn cancel_listing(&self, listing_id: ListingId) -> Result<TxHash, ContractError>;

    fn accept_listing(&self, listing_id: ListingId) -> Result<TxHash, ContractError>;
}

/// Read access to game state.
pub trait GameContract: Send + Sync {
    fn owned_entities(&self, owner: &Address) -> Result<Vec<Entity>, ContractError>;

    fn owner_of(&self, entity: &EntityId) -> Result<Option<Address>, ContractError>;
}

/// Identity that authors outgoing transactions.
pub trait Signer: Send + Sync {
    fn address(&self) -> Address;
}
