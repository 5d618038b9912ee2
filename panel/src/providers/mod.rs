//! # Providers
//!
//! The panel's state layer, composed in mount order:
//!
//! 1. [`value`]: passthrough [`ContractProvider`], [`ConnectionProvider`], [`SignerProvider`]
//! 2. [`transactions`]: [`TransactionProvider`], the session's transaction log
//! 3. [`listings`]: [`ListingsProvider`], the market listing book
//!
//! [`context::PanelContext`] wires them together. [`observer`] carries change
//! notifications to subscribers with scoped lifetime.

pub mod context;
pub mod contracts;
pub mod listings;
pub mod observer;
pub mod transactions;
pub mod value;

pub use context::{PanelContext, PanelInit};
pub use contracts::{ContractHandle, ContractName, ContractSet};
pub use listings::{ListingChange, ListingsProvider};
pub use observer::{Observers, Subscription};
pub use transactions::{prune_for_restart, TransactionChange, TransactionProvider};
pub use value::{ConnectionProvider, ContractProvider, SignerProvider, ValueProvider};
