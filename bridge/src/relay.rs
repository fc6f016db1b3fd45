//! Bridge relay: accepts transfers and settles them after a delay.
//!
//! Each accepted transfer gets its own settlement task. Handles are kept
//! by transaction id so a settlement can be cancelled before it fires
//! (on [`BridgeRelay::discard`] or at shutdown). A settlement whose record
//! has disappeared does nothing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use umbra_store::DaoStore;
use umbra_types::{
    BridgePatch, BridgeStatus, BridgeTransaction, ChainId, Clock, EntityId, Sealed,
    WalletAddress,
};
use uuid::Uuid;

use crate::error::BridgeError;

/// How long a transfer stays pending before it confirms.
pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_secs(2);

/// A validated transfer request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransfer {
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub token: String,
    pub encrypted_amount: Sealed,
    pub sender: WalletAddress,
    pub recipient: WalletAddress,
}

/// A fresh opaque settlement hash: `0x` followed by 32 lowercase hex digits.
pub fn generate_tx_hash() -> String {
    format!("0x{}", hex::encode(Uuid::new_v4().as_bytes()))
}

type Timers = Arc<Mutex<HashMap<EntityId, JoinHandle<()>>>>;

pub struct BridgeRelay {
    store: Arc<dyn DaoStore>,
    clock: Arc<dyn Clock>,
    settlement_delay: Duration,
    timers: Timers,
}

impl BridgeRelay {
    pub fn new(store: Arc<dyn DaoStore>, clock: Arc<dyn Clock>, settlement_delay: Duration) -> Self {
        Self {
            store,
            clock,
            settlement_delay,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a pending transfer and schedule its settlement.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, req: NewTransfer) -> Result<BridgeTransaction, BridgeError> {
        if req.from_chain == req.to_chain {
            return Err(BridgeError::SameChain(req.from_chain));
        }

        let tx = BridgeTransaction {
            id: EntityId::generate(),
            from_chain: req.from_chain,
            to_chain: req.to_chain,
            token: req.token,
            encrypted_amount: req.encrypted_amount,
            sender: req.sender,
            recipient: req.recipient,
            status: BridgeStatus::Pending,
            tx_hash: None,
            created_at: self.clock.now(),
        };
        let stored = self.store.insert_bridge_transaction(tx)?;
        info!(
            id = %stored.id,
            from = %stored.from_chain,
            to = %stored.to_chain,
            token = %stored.token,
            "bridge transfer pending"
        );
        self.schedule_settlement(stored.id.clone());
        Ok(stored)
    }

    pub fn transaction(&self, id: &EntityId) -> Result<Option<BridgeTransaction>, BridgeError> {
        Ok(self.store.get_bridge_transaction(id)?)
    }

    /// Transfers newest first, optionally only those involving `address`.
    pub fn transactions(
        &self,
        involving: Option<&WalletAddress>,
    ) -> Result<Vec<BridgeTransaction>, BridgeError> {
        Ok(self.store.list_bridge_transactions(involving)?)
    }

    /// Cancel any pending settlement for `id` and remove the record.
    pub fn discard(&self, id: &EntityId) -> Result<Option<BridgeTransaction>, BridgeError> {
        self.cancel(id);
        let removed = self.store.remove_bridge_transaction(id)?;
        if removed.is_some() {
            info!(%id, "bridge transfer discarded");
        }
        Ok(removed)
    }

    /// Abort the settlement timer for `id`. Returns whether one was pending.
    pub fn cancel(&self, id: &EntityId) -> bool {
        match self.timers.lock().remove(id) {
            Some(handle) => {
                handle.abort();
                debug!(%id, "settlement cancelled");
                true
            }
            None => false,
        }
    }

    /// Abort every pending settlement timer. Returns how many were pending.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<JoinHandle<()>> = self.timers.lock().drain().map(|(_, h)| h).collect();
        for handle in &drained {
            handle.abort();
        }
        if !drained.is_empty() {
            info!(count = drained.len(), "pending settlements cancelled");
        }
        drained.len()
    }

    /// Number of settlement timers that have not fired yet.
    pub fn pending_settlements(&self) -> usize {
        self.timers.lock().len()
    }

    fn schedule_settlement(&self, id: EntityId) {
        let store = self.store.clone();
        let timers = self.timers.clone();
        let delay = self.settlement_delay;
        let task_id = id.clone();

        // Hold the lock across spawn + insert so a timer that fires at once
        // cannot remove its handle before it is recorded.
        let mut pending = self.timers.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            settle(store.as_ref(), &task_id);
            timers.lock().remove(&task_id);
        });
        pending.insert(id.clone(), handle);
        debug!(%id, delay_ms = delay.as_millis() as u64, "settlement scheduled");
    }
}

fn settle(store: &dyn DaoStore, id: &EntityId) {
    match store.update_bridge_transaction(id, BridgePatch::confirmed(generate_tx_hash())) {
        Ok(Some(tx)) => info!(
            %id,
            tx_hash = tx.tx_hash.as_deref().unwrap_or_default(),
            "bridge transfer confirmed"
        ),
        Ok(None) => debug!(%id, "settled transfer no longer stored"),
        Err(e) => error!(%id, error = %e, "failed to confirm bridge transfer"),
    }
}
