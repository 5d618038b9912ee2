//! # Confirmation Watchers
//!
//! One task per observed transaction: await the chain's confirmation signal and post
//! the outcome to the event queue.

use async_channel::Sender;
use shared::{TxHash, TxId, TxOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::app::events::PanelEvent;
use crate::core::service::ChainConnection;
use crate::utils::runtime;

/// Spawn a watcher for `hash`.
///
/// Only the chain decides the outcome. Past `overdue_after` the watcher logs a warning
/// and keeps waiting.
pub(crate) fn watch(
    connection: Arc<dyn ChainConnection>,
    id: TxId,
    hash: TxHash,
    overdue_after: Duration,
    event_tx: Sender<PanelEvent>,
) {
    debug!(
        tx_id = %id,
        hash = %hash,
        chain_id = connection.chain_id(),
        overdue_after_secs = overdue_after.as_secs(),
        "Watching transaction"
    );

    runtime::spawn(async move {
        let start = Instant::now();
        let mut confirmation = connection.wait_for_confirmation(&hash);
        let outcome = match tokio::time::timeout(overdue_after, &mut confirmation).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    tx_id = %id,
                    hash = %hash,
                    waited_secs = overdue_after.as_secs(),
                    "Confirmation overdue, still waiting"
                );
                confirmation.await
            }
        };

        debug!(
            tx_id = %id,
            confirmed = matches!(outcome, TxOutcome::Confirmed(_)),
            duration_ms = start.elapsed().as_millis(),
            "Confirmation signal received"
        );

        if event_tx
            .send(PanelEvent::TransactionResolved { id, outcome })
            .await
            .is_err()
        {
            warn!(tx_id = %id, "Event queue closed before the resolution could be delivered");
        }
    });
}
