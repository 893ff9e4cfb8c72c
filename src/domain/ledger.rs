use super::payment::{PaymentRecord, PaymentState, UserId};
use std::collections::HashMap;

/// The in-memory record of who paid what, in payment order.
///
/// Maps each payer to the ordered sequence of their completed payments
/// (oldest first). A user present in the map always has at least one
/// record: the entry is removed the instant its sequence empties.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    entries: HashMap<UserId, Vec<PaymentRecord>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed payment to the user's sequence, creating the
    /// sequence if absent.
    pub fn record(&mut self, user: UserId, mut record: PaymentRecord) {
        record.state = PaymentState::Paid;
        self.entries.entry(user).or_default().push(record);
    }

    /// The user's payments in payment order; empty when the user never paid.
    pub fn payments_for(&self, user: UserId) -> &[PaymentRecord] {
        self.entries.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of Stars across the user's payments; 0 when the user never paid.
    pub fn total_paid(&self, user: UserId) -> u64 {
        self.payments_for(user)
            .iter()
            .map(|record| u64::from(record.amount.value()))
            .sum()
    }

    /// Removes and returns the most recent payment, tagged `Refunding`.
    ///
    /// Deletes the user's entry when this empties the sequence, so no
    /// zero-length entry ever persists. Returns `None` when the user has
    /// no recorded payments.
    pub fn pop_last(&mut self, user: UserId) -> Option<PaymentRecord> {
        let records = self.entries.get_mut(&user)?;
        let mut record = records.pop()?;
        if records.is_empty() {
            self.entries.remove(&user);
        }
        record.state = PaymentState::Refunding;
        Some(record)
    }

    /// Reinserts a popped record at the tail, back in the `Paid` state.
    ///
    /// Undoes `pop_last` when the downstream refund call fails: a record
    /// is only destroyed on confirmed refund success.
    pub fn restore_last(&mut self, user: UserId, mut record: PaymentRecord) {
        record.state = PaymentState::Paid;
        self.entries.entry(user).or_default().push(record);
    }
}
