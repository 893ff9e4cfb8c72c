use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque payer identifier supplied by the transport layer on every event.
pub type UserId = u64;

/// Charge token assigned by the payment processor for one completed payment.
///
/// Used verbatim when requesting a refund for exactly this payment. The
/// processor guarantees uniqueness; the ledger does not deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(charge_id: impl Into<String>) -> Self {
        Self(charge_id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A positive number of Stars (the smallest currency unit).
///
/// Ensures that payment amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u32);

impl Amount {
    pub fn new(value: u32) -> Result<Self, PaymentError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Amount {
    type Error = PaymentError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle tag for one payment record.
///
/// `Refunding` marks the window between popping the record and the
/// provider confirming the refund; a failed refund restores `Paid`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    #[default]
    Paid,
    Refunding,
}

/// One completed payment, as confirmed by the processor.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    /// Refund handle assigned by the processor.
    pub charge_id: PaymentId,
    /// Stars paid.
    pub amount: Amount,
    /// Capture time, informational only.
    pub paid_at: DateTime<Utc>,
    #[serde(skip, default)]
    pub state: PaymentState,
}

impl PaymentRecord {
    pub fn new(charge_id: PaymentId, amount: Amount, paid_at: DateTime<Utc>) -> Self {
        Self {
            charge_id,
            amount,
            paid_at,
            state: PaymentState::Paid,
        }
    }
}
