//! # Event Handler
//!
//! Applies [`PanelEvent`]s posted by background watchers to the providers.
//!
//! A resolution runs in two steps, always in this order: the transaction log records the
//! terminal status, then the listing book reconciles the confirmation. Both happen here,
//! on the event loop, never inside the call that submitted the transaction.

use shared::{TxId, TxOutcome, TxStatus};

use crate::app::{App, PanelEvent};

/// Trait for event handling implementation
pub(crate) trait PanelEventHandler {
    fn handle_event_impl(&mut self, event: PanelEvent);
}

impl PanelEventHandler for App {
    fn handle_event_impl(&mut self, event: PanelEvent) {
        tracing::trace!(event = event.name(), "Handling panel event");

        match event {
            PanelEvent::TransactionResolved { id, outcome } => {
                self.handle_transaction_resolved(id, outcome);
            }
        }
    }
}

impl App {
    fn handle_transaction_resolved(&mut self, id: TxId, outcome: TxOutcome) {
        let Some(tx) = self.context.transactions.resolve(id, outcome) else {
            return;
        };

        if tx.status == TxStatus::Confirmed
            && self.context.listings.apply_confirmation(&tx).is_none()
        {
            tracing::debug!(tx_id = %tx.id, "Confirmation left the listing book unchanged");
        }
    }
}
