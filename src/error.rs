use crate::domain::payment::UserId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("no payments on record for user {0}")]
    NothingToRefund(UserId),
    #[error("refund rejected by payment provider: {0}")]
    RefundRejected(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("configuration error: {0}")]
    ConfigError(String),
}
