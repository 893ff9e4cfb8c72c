use crate::domain::payment::{Amount, PaymentId, PaymentRecord, UserId};
use crate::domain::ports::{LedgerStoreBox, RefundGatewayBox};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Point-in-time answer to "has this user paid, how much, how many times".
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LedgerSummary {
    pub count: usize,
    pub total_stars: u64,
}

impl LedgerSummary {
    pub fn has_paid(&self) -> bool {
        self.count > 0
    }
}

/// The main entry point for payment bookkeeping.
///
/// `PaymentService` owns the ledger store and the refund gateway and
/// orchestrates the refund workflow: pop the newest record, call the
/// provider, restore the record if the provider rejects.
///
/// Handlers may run concurrently, so every mutating operation for a user
/// is serialized through that user's gate. A refund holds the gate across
/// the external call: the popped record is invisible to reads for that
/// window, but it can never be popped twice.
pub struct PaymentService {
    ledger: LedgerStoreBox,
    refunds: RefundGatewayBox,
    gates: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl PaymentService {
    /// Creates a new `PaymentService` instance.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The store for per-user payment records.
    /// * `refunds` - The external refund action of the payment processor.
    pub fn new(ledger: LedgerStoreBox, refunds: RefundGatewayBox) -> Self {
        Self {
            ledger,
            refunds,
            gates: Mutex::new(HashMap::new()),
        }
    }

    async fn gate(&self, user: UserId) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        Arc::clone(gates.entry(user).or_default())
    }

    /// Records a confirmed successful payment.
    pub async fn record_payment(
        &self,
        user: UserId,
        charge_id: PaymentId,
        amount: Amount,
        paid_at: DateTime<Utc>,
    ) -> Result<()> {
        let gate = self.gate(user).await;
        let _guard = gate.lock().await;

        info!(user, %charge_id, %amount, "recording successful payment");
        self.ledger
            .record(user, PaymentRecord::new(charge_id, amount, paid_at))
            .await
    }

    /// Answers a status query; absent users report zero/none.
    pub async fn status(&self, user: UserId) -> Result<LedgerSummary> {
        let count = self.ledger.payments_for(user).await?.len();
        let total_stars = self.ledger.total_paid(user).await?;
        Ok(LedgerSummary { count, total_stars })
    }

    /// Refunds the user's most recent payment.
    ///
    /// Pops the record before calling the provider so it never looks
    /// refundable twice; a provider failure restores it unchanged. Returns
    /// the refunded amount on success, `NothingToRefund` when the user has
    /// no payments (in which case no provider call is made).
    pub async fn refund_last(&self, user: UserId) -> Result<Amount> {
        let gate = self.gate(user).await;
        let _guard = gate.lock().await;

        let record = self
            .ledger
            .pop_last(user)
            .await?
            .ok_or(PaymentError::NothingToRefund(user))?;

        match self.refunds.refund(user, &record.charge_id).await {
            Ok(()) => {
                info!(user, charge_id = %record.charge_id, amount = %record.amount, "refund confirmed");
                Ok(record.amount)
            }
            Err(err) => {
                warn!(user, charge_id = %record.charge_id, %err, "refund failed, restoring record");
                self.ledger.restore_last(user, record).await?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RefundGateway;
    use crate::infrastructure::in_memory::InMemoryLedgerStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRefundGateway {
        reject: bool,
        calls: Arc<AtomicUsize>,
    }

    impl StubRefundGateway {
        fn accepting(calls: Arc<AtomicUsize>) -> Self {
            Self {
                reject: false,
                calls,
            }
        }

        fn rejecting(calls: Arc<AtomicUsize>) -> Self {
            Self {
                reject: true,
                calls,
            }
        }
    }

    #[async_trait]
    impl RefundGateway for StubRefundGateway {
        async fn refund(&self, _user: UserId, _charge_id: &PaymentId) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(PaymentError::RefundRejected("CHARGE_NOT_FOUND".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn service(reject: bool) -> (PaymentService, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let gateway = if reject {
            StubRefundGateway::rejecting(Arc::clone(&calls))
        } else {
            StubRefundGateway::accepting(Arc::clone(&calls))
        };
        let service = PaymentService::new(
            Box::new(InMemoryLedgerStore::new()),
            Box::new(gateway),
        );
        (service, calls)
    }

    async fn pay(service: &PaymentService, user: UserId, charge_id: &str, stars: u32) {
        service
            .record_payment(
                user,
                PaymentId::new(charge_id),
                Amount::new(stars).unwrap(),
                Utc::now(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_refund_success_destroys_record() {
        let (service, calls) = service(false);
        pay(&service, 1, "ch_1", 2).await;

        let refunded = service.refund_last(1).await.unwrap();
        assert_eq!(refunded, Amount::new(2).unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let status = service.status(1).await.unwrap();
        assert_eq!(status.count, 0);
        assert_eq!(status.total_stars, 0);
        assert!(!status.has_paid());
    }

    #[tokio::test]
    async fn test_refund_failure_restores_record() {
        let (service, _) = service(true);
        pay(&service, 1, "ch_1", 2).await;

        let result = service.refund_last(1).await;
        assert!(matches!(result, Err(PaymentError::RefundRejected(_))));

        let status = service.status(1).await.unwrap();
        assert_eq!(status.count, 1);
        assert_eq!(status.total_stars, 2);
    }

    #[tokio::test]
    async fn test_refund_without_payment_makes_no_provider_call() {
        let (service, calls) = service(false);

        let result = service.refund_last(7).await;
        assert!(matches!(result, Err(PaymentError::NothingToRefund(7))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_status_scenario() {
        let (service, _) = service(false);
        pay(&service, 1, "ch_1", 2).await;
        pay(&service, 1, "ch_2", 2).await;
        pay(&service, 1, "ch_3", 3).await;

        let status = service.status(1).await.unwrap();
        assert_eq!(status.count, 3);
        assert_eq!(status.total_stars, 7);

        service.refund_last(1).await.unwrap();

        let status = service.status(1).await.unwrap();
        assert_eq!(status.count, 2);
        assert_eq!(status.total_stars, 4);
    }

    #[tokio::test]
    async fn test_status_absent_user() {
        let (service, _) = service(false);
        let status = service.status(99).await.unwrap();
        assert_eq!(status, LedgerSummary { count: 0, total_stars: 0 });
    }
}
