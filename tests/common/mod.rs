use async_trait::async_trait;
use chrono::Utc;
use starledger::application::service::PaymentService;
use starledger::domain::payment::{Amount, PaymentId, UserId};
use starledger::domain::ports::RefundGateway;
use starledger::error::{PaymentError, Result};
use starledger::infrastructure::in_memory::InMemoryLedgerStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted stand-in for the payment processor's refund action.
///
/// Counts calls, optionally rejects every refund, and optionally sleeps
/// to widen the in-flight refund window for concurrency tests.
pub struct ScriptedRefundGateway {
    pub reject: bool,
    pub delay: Option<Duration>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedRefundGateway {
    pub fn accepting() -> Self {
        Self {
            reject: false,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::accepting()
        }
    }
}

#[async_trait]
impl RefundGateway for ScriptedRefundGateway {
    async fn refund(&self, _user: UserId, _charge_id: &PaymentId) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.reject {
            Err(PaymentError::RefundRejected("CHARGE_NOT_FOUND".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn service_with(gateway: ScriptedRefundGateway) -> PaymentService {
    PaymentService::new(Box::new(InMemoryLedgerStore::new()), Box::new(gateway))
}

pub async fn pay(service: &PaymentService, user: UserId, charge_id: &str, stars: u32) {
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
