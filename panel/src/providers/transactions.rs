//! # Transaction Provider
//!
//! Owns the append-only log of transactions submitted in this session.
//!
//! ## Lifecycle
//!
//! ```text
//! submit() ──► Pending ──observe()──► watcher task ──PanelEvent──► resolve()
//!                                                                    │
//!                                             Confirmed(receipt) ◄───┴───► Failed(detail)
//! ```
//!
//! - `submit` appends a `Pending` record and returns it at once.
//! - `observe` attaches a watcher to the chain confirmation signal. The watcher never
//!   touches the log; it posts [`PanelEvent::TransactionResolved`] to the event queue
//!   once the chain reports an outcome, however long that takes.
//! - `resolve` runs on the event loop and performs the single terminal transition.
//!   Unknown ids and records that are already terminal are left alone.
//!
//! Records are never removed during a session. [`prune_for_restart`] decides what a new
//! session keeps from the previous one.

use async_channel::Sender;
use chrono::Utc;
use parking_lot::RwLock;
use shared::{Address, Transaction, TxHash, TxId, TxIntent, TxOutcome, TxStatus};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::app::events::PanelEvent;
use crate::app::tasks;
use crate::core::error::Result;
use crate::providers::observer::{Observers, Subscription};
use crate::providers::value::ConnectionProvider;

/// Committed change to the log, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionChange {
    Submitted(Transaction),
    Resolved(Transaction),
}

struct TransactionLog {
    records: Vec<Transaction>,
    next_id: u64,
    /// Pending transactions that already have a watcher.
    watched: HashSet<TxId>,
}

impl TransactionLog {
    /// Next id not held by any record. Wraps at `u64::MAX`.
    fn allocate_id(&mut self) -> TxId {
        loop {
            let id = TxId::new(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.records.iter().any(|record| record.id == id) {
                return id;
            }
        }
    }
}

pub struct TransactionProvider {
    log: RwLock<TransactionLog>,
    connection: Arc<ConnectionProvider>,
    event_tx: Sender<PanelEvent>,
    confirmation_overdue: Duration,
    observers: Observers<TransactionChange>,
}

/// Records a new session keeps from the previous one: only those still pending, which
/// the new session re-observes. Resolved history is dropped.
pub fn prune_for_restart(records: Vec<Transaction>) -> Vec<Transaction> {
    let before = records.len();
    let kept: Vec<Transaction> = records.into_iter().filter(Transaction::is_pending).collect();
    debug!(before, kept = kept.len(), "Pruned transaction log for new session");
    kept
}

impl TransactionProvider {
    /// Build the provider around `initial`, a log restored from an earlier mount.
    ///
    /// Records are ordered by submission time; for a repeated id the earliest record is
    /// kept. New ids continue after the largest restored id.
    pub fn new(
        connection: Arc<ConnectionProvider>,
        event_tx: Sender<PanelEvent>,
        confirmation_overdue: Duration,
        mut initial: Vec<Transaction>,
    ) -> Self {
        initial.sort_by_key(|tx| (tx.submitted_at, tx.id));
        let mut seen = HashSet::new();
        let records: Vec<Transaction> = initial
            .into_iter()
            .filter(|tx| {
                let first = seen.insert(tx.id);
                if !first {
                    warn!(tx_id = %tx.id, hash = %tx.hash, "Duplicate id in restored log, keeping the earliest record");
                }
                first
            })
            .collect();
        let next_id = records
            .iter()
            .map(|tx| tx.id.value().wrapping_add(1))
            .max()
            .unwrap_or(0);

        Self {
            log: RwLock::new(TransactionLog {
                records,
                next_id,
                watched: HashSet::new(),
            }),
            connection,
            event_tx,
            confirmation_overdue,
            observers: Observers::new(),
        }
    }

    /// Append a pending record for a transaction the chain has accepted for broadcast.
    pub fn submit(&self, intent: TxIntent, hash: TxHash, from: Address) -> Transaction {
        let tx = {
            let mut log = self.log.write();
            let id = log.allocate_id();
            let tx = Transaction::pending(id, intent, hash, from, Utc::now());
            log.records.push(tx.clone());
            tx
        };

        info!(
            tx_id = %tx.id,
            kind = tx.kind.label(),
            hash = %tx.hash,
            "Transaction submitted"
        );
        self.observers.notify(&TransactionChange::Submitted(tx.clone()));
        tx
    }

    /// Attach a confirmation watcher to a pending transaction.
    ///
    /// No-op for terminal transactions and for ones already being watched.
    pub fn observe(&self, tx: &Transaction) -> Result<()> {
        {
            let mut log = self.log.write();
            let is_pending = log
                .records
                .iter()
                .find(|record| record.id == tx.id)
                .map(Transaction::is_pending)
                .unwrap_or(false);
            if !is_pending {
                debug!(tx_id = %tx.id, "observe: transaction not pending, nothing to watch");
                return Ok(());
            }
            if !log.watched.insert(tx.id) {
                debug!(tx_id = %tx.id, "observe: watcher already attached");
                return Ok(());
            }
        }

        let connection = match self.connection.get() {
            Ok(connection) => connection,
            Err(e) => {
                self.log.write().watched.remove(&tx.id);
                return Err(e);
            }
        };

        tasks::confirmation::watch(
            connection,
            tx.id,
            tx.hash.clone(),
            self.confirmation_overdue,
            self.event_tx.clone(),
        );
        Ok(())
    }

    /// Fails with `Unavailable` when no connection is provided, so callers can refuse to
    /// submit something that could never be observed.
    pub fn ensure_connected(&self) -> Result<()> {
        self.connection.get().map(|_| ())
    }

    /// Apply a chain outcome to a pending record. Returns the updated record, or `None`
    /// when the id is unknown or the record is already terminal.
    pub fn resolve(&self, id: TxId, outcome: TxOutcome) -> Option<Transaction> {
        let resolved = {
            let mut log = self.log.write();
            log.watched.remove(&id);
            let record = log.records.iter_mut().find(|record| record.id == id)?;
            if !record.resolve(outcome) {
                debug!(tx_id = %id, status = record.status.label(), "resolve: already terminal");
                return None;
            }
            record.clone()
        };

        match resolved.status {
            TxStatus::Failed => warn!(
                tx_id = %id,
                kind = resolved.kind.label(),
                error = resolved.error.as_deref().unwrap_or(""),
                "Transaction failed"
            ),
            _ => info!(
                tx_id = %id,
                kind = resolved.kind.label(),
                block = resolved.receipt.as_ref().map(|r| r.block),
                "Transaction confirmed"
            ),
        }
        self.observers.notify(&TransactionChange::Resolved(resolved.clone()));
        Some(resolved)
    }

    /// Snapshot of the log in submission order.
    pub fn list(&self) -> Vec<Transaction> {
        self.log.read().records.clone()
    }

    pub fn get(&self, id: TxId) -> Option<Transaction> {
        self.log.read().records.iter().find(|tx| tx.id == id).cloned()
    }

    pub fn pending(&self) -> Vec<Transaction> {
        self.log
            .read()
            .records
            .iter()
            .filter(|tx| tx.is_pending())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.log.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&TransactionChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }
}
