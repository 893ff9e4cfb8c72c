use crate::domain::ledger::Ledger;
use crate::domain::payment::{PaymentRecord, UserId};
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger store.
///
/// Wraps the pure [`Ledger`] in `Arc<RwLock<…>>` for shared concurrent
/// access. This is the only backend: the ledger is process-lifetime state,
/// empty at start and lost at stop.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryLedgerStore {
    /// Creates a new, empty in-memory ledger store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn record(&self, user: UserId, record: PaymentRecord) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.record(user, record);
        Ok(())
    }

    async fn payments_for(&self, user: UserId) -> Result<Vec<PaymentRecord>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.payments_for(user).to_vec())
    }

    async fn total_paid(&self, user: UserId) -> Result<u64> {
        let ledger = self.ledger.read().await;
        Ok(ledger.total_paid(user))
    }

    async fn pop_last(&self, user: UserId) -> Result<Option<PaymentRecord>> {
        let mut ledger = self.ledger.write().await;
        Ok(ledger.pop_last(user))
    }

    async fn restore_last(&self, user: UserId, record: PaymentRecord) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.restore_last(user, record);
        Ok(())
    }
}
