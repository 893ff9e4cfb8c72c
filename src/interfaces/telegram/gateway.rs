use crate::domain::payment::{PaymentId, UserId};
use crate::domain::ports::RefundGateway;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use teloxide::prelude::*;

/// Refund gateway backed by the Bot API `refundStarPayment` call.
#[derive(Clone)]
pub struct StarRefundGateway {
    bot: Bot,
}

impl StarRefundGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl RefundGateway for StarRefundGateway {
    async fn refund(&self, user: UserId, charge_id: &PaymentId) -> Result<()> {
        self.bot
            .refund_star_payment(
                teloxide::types::UserId(user),
                teloxide::types::TelegramTransactionId(charge_id.as_str().to_owned()),
            )
            .await
            .map_err(|err| PaymentError::RefundRejected(err.to_string()))?;
        Ok(())
    }
}
