use super::payment::{PaymentId, PaymentRecord, UserId};
use crate::error::Result;
use async_trait::async_trait;

/// Storage boundary for the payment ledger.
///
/// Mirrors the operations of [`super::ledger::Ledger`] behind an async
/// trait so the service can run against any backend. Absent users are a
/// normal condition: `pop_last` returns `None`, never an error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn record(&self, user: UserId, record: PaymentRecord) -> Result<()>;
    async fn payments_for(&self, user: UserId) -> Result<Vec<PaymentRecord>>;
    async fn total_paid(&self, user: UserId) -> Result<u64>;
    async fn pop_last(&self, user: UserId) -> Result<Option<PaymentRecord>>;
    async fn restore_last(&self, user: UserId, record: PaymentRecord) -> Result<()>;
}

/// The external refund action of the payment processor.
#[async_trait]
pub trait RefundGateway: Send + Sync {
    /// Requests a refund of the payment identified by `charge_id`.
    ///
    /// An `Err` means the provider rejected or the call failed; the caller
    /// is responsible for rolling back any ledger mutation.
    async fn refund(&self, user: UserId, charge_id: &PaymentId) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
pub type RefundGatewayBox = Box<dyn RefundGateway>;
