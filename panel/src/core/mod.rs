//! # Core Abstractions
//!
//! Error types and the collaborator traits the providers are written against.
//!
//! - **[`error`]**: [`PanelError`] and the [`Result`] alias
//! - **[`service`]**: [`ChainConnection`], [`MarketContract`], [`GameContract`], [`Signer`]
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use panel::core::service::ChainConnection;
//! use panel::services::sim::SimulatedChain;
//!
//! // In production: the game client's connection object behind the trait.
//! // In tests and the demo binary: the in-memory chain.
//! let chain = Arc::new(SimulatedChain::manual());
//! let connection: Arc<dyn ChainConnection> = chain;
//! ```

pub mod error;
pub mod service;

pub use error::{PanelError, Result};
pub use service::{ChainConnection, ContractError, GameContract, MarketContract, Signer};
