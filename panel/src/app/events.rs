//! # Panel Events
//!
//! Messages posted by background watchers to the single event queue consumed by
//! [`App`](crate::app::App). Each one is applied on the event loop, one at a time.

use shared::{TxId, TxOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The chain reported a watched transaction as mined, reverted or dropped.
    TransactionResolved { id: TxId, outcome: TxOutcome },
}

impl PanelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PanelEvent::TransactionResolved { .. } => "TransactionResolved",
        }
    }
}
