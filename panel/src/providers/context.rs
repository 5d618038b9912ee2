//! # Panel Context
//!
//! The composed provider chain. Each provider receives the ones above it explicitly:
//!
//! ```text
//! ContractProvider ─┐
//! ConnectionProvider ─┼──► TransactionProvider ──► ListingsProvider
//! SignerProvider ────┘                         ▲
//!        └──────────────────────────────────────┘
//! ```
//!
//! Views and the [`App`](crate::app::App) hold an `Arc<PanelContext>`; nothing is looked
//! up implicitly.

use async_channel::Sender;
use shared::{Listing, Transaction};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::app::events::PanelEvent;
use crate::core::service::{ChainConnection, Signer};
use crate::providers::contracts::ContractSet;
use crate::providers::listings::ListingsProvider;
use crate::providers::transactions::TransactionProvider;
use crate::providers::value::{ConnectionProvider, ContractProvider, SignerProvider};

/// Everything the embedding game client hands the panel at mount time.
pub struct PanelInit {
    pub connection: Option<Arc<dyn ChainConnection>>,
    pub contracts: Option<ContractSet>,
    pub signer: Option<Arc<dyn Signer>>,
    /// Log restored from an earlier mount, already pruned.
    pub transactions: Vec<Transaction>,
    /// Listings known on chain when the panel mounts.
    pub listings: Vec<Listing>,
}

impl PanelInit {
    pub fn new(
        connection: Arc<dyn ChainConnection>,
        contracts: ContractSet,
        signer: Arc<dyn Signer>,
    ) -> Self {
        Self {
            connection: Some(connection),
            contracts: Some(contracts),
            signer: Some(signer),
            transactions: Vec::new(),
            listings: Vec::new(),
        }
    }

    pub fn with_transactions(mut self, transactions: Vec<Transaction>) -> Self {
        self.transactions = transactions;
        self
    }

    pub fn with_listings(mut self, listings: Vec<Listing>) -> Self {
        self.listings = listings;
        self
    }
}

pub struct PanelContext {
    pub contracts: Arc<ContractProvider>,
    pub connection: Arc<ConnectionProvider>,
    pub signer: Arc<SignerProvider>,
    pub transactions: Arc<TransactionProvider>,
    pub listings: Arc<ListingsProvider>,
}

impl PanelContext {
    /// Compose the chain in mount order: contracts, connection, signer, transactions,
    /// listings.
    pub fn new(
        init: PanelInit,
        event_tx: Sender<PanelEvent>,
        confirmation_overdue: Duration,
    ) -> Self {
        let contracts = Arc::new(match init.contracts {
            Some(set) => ContractProvider::new("contracts", Arc::new(set)),
            None => ContractProvider::empty("contracts"),
        });
        let connection = Arc::new(match init.connection {
            Some(connection) => ConnectionProvider::new("connection", connection),
            None => ConnectionProvider::empty("connection"),
        });
        let signer = Arc::new(match init.signer {
            Some(signer) => SignerProvider::new("signer", signer),
            None => SignerProvider::empty("signer"),
        });

        let transactions = Arc::new(TransactionProvider::new(
            Arc::clone(&connection),
            event_tx,
            confirmation_overdue,
            init.transactions,
        ));
        let listings = Arc::new(ListingsProvider::new(
            Arc::clone(&transactions),
            Arc::clone(&contracts),
            Arc::clone(&signer),
            init.listings,
        ));

        info!(
            contracts = contracts.is_provided(),
            connection = connection.is_provided(),
            signer = signer.is_provided(),
            restored_transactions = transactions.len(),
            "Panel context mounted"
        );

        Self {
            contracts,
            connection,
            signer,
            transactions,
            listings,
        }
    }
}
