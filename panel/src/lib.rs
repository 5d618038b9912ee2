//! # Market Panel - Library Root
//!
//! State layer of a market plugin panel embedded in a game client. Players browse
//! their planets, list them for sale, buy other players' listings and follow the
//! transactions they sent.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ App                                                          │
//! │   PanelContext                                               │
//! │     ContractProvider ─ ConnectionProvider ─ SignerProvider   │
//! │            └────────────┬─────────────┘                      │
//! │                TransactionProvider ──► ListingsProvider      │
//! │   Navigation (Market │ My Listings │ My Orders │ ...)        │
//! │   event queue ◄── confirmation watchers (Tokio tasks)        │
//! └──────────────────────────────────────────────────────────────┘
//!          │ views::* read from the context
//!          ▼
//!     host UI (not part of this crate)
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] root, [`PanelEvent`] queue, tab navigation
//! - **core**: [`PanelError`] and the collaborator traits the game client implements
//! - **providers**: passthrough providers, transaction log, listing book
//! - **views**: read-models behind the five tabs
//! - **services**: [`LocalSigner`](services::signer::LocalSigner) and the in-memory
//!   [`SimulatedChain`](services::sim::SimulatedChain)
//! - **debug**: logging and environment configuration
//! - **utils**: runtime helpers
//!
//! ## Core Concepts
//!
//! ### Two-phase mutations
//!
//! `create`, `cancel` and `accept` validate, submit and return a pending
//! [`Transaction`](shared::Transaction) right away. The listing book changes only when
//! the confirmation arrives through the event queue and [`App`] applies it.
//!
//! ### Explicit wiring
//!
//! Every provider receives the providers it depends on at construction. A missing
//! collaborator is reported as [`PanelError::Unavailable`] by the operation that needed it.

pub mod app;
pub mod core;
pub mod debug;
pub mod providers;
pub mod services;
pub mod utils;
pub mod views;

pub use crate::app::{App, Navigation, PanelEvent, Tab};
pub use crate::core::error::{PanelError, Result};
pub use crate::providers::{PanelContext, PanelInit};
