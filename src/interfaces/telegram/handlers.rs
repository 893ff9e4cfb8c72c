use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{LabeledPrice, Message, PreCheckoutQuery};
use tracing::{debug, error, info};

use super::commands::{self, Command};
use crate::application::service::PaymentService;
use crate::config::InvoiceSpec;
use crate::domain::payment::{Amount, PaymentId};
use crate::error::PaymentError;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub service: Arc<PaymentService>,
    pub invoice: Arc<InvoiceSpec>,
}

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Returns the handler tree wired into teloxide's `Dispatcher` in `main`.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_payment = deps.clone();
    let deps_commands = deps;

    dptree::entry()
        // Successful payment messages are not commands, match them first
        .branch(successful_payment_handler(deps_payment))
        .branch(command_handler(deps_commands))
        .branch(pre_checkout_handler())
}

/// Handler for bot commands (/start, /pay, /status, /refund)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_command::<Command>()
        .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                match cmd {
                    Command::Start => {
                        bot.send_message(msg.chat.id, commands::welcome_text())
                            .await?;
                    }
                    Command::Pay => {
                        let invoice = deps.invoice.as_ref();
                        bot.send_invoice(
                            msg.chat.id,
                            invoice.title.clone(),
                            invoice.description.clone(),
                            commands::invoice_payload(),
                            "XTR",
                            vec![LabeledPrice {
                                label: invoice.title.clone(),
                                amount: invoice.price.value() as _,
                            }],
                        )
                        .await?;
                    }
                    Command::Status => {
                        if let Some(user) = &msg.from {
                            let summary = deps.service.status(user.id.0).await?;
                            bot.send_message(msg.chat.id, commands::status_text(&summary))
                                .await?;
                        }
                    }
                    Command::Refund => {
                        if let Some(user) = &msg.from {
                            let result = deps.service.refund_last(user.id.0).await;
                            if let Err(err) = &result
                                && !matches!(err, PaymentError::NothingToRefund(_))
                            {
                                error!(user = user.id.0, %err, "refund workflow failed");
                            }
                            bot.send_message(msg.chat.id, commands::refund_reply(&result))
                                .await?;
                        }
                    }
                }
                Ok(())
            }
        })
}

/// Handler for successful payment messages from the payment processor
fn successful_payment_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.successful_payment().is_some())
        .endpoint(move |msg: Message| {
            let deps = deps.clone();
            async move {
                let (Some(user), Some(payment)) = (&msg.from, msg.successful_payment()) else {
                    debug!("dropping successful_payment update without payer");
                    return Ok(());
                };

                let stars = u32::try_from(payment.total_amount).unwrap_or_default();
                let Ok(amount) = Amount::new(stars) else {
                    debug!(user = user.id.0, "dropping malformed successful_payment");
                    return Ok(());
                };

                info!(
                    user = user.id.0,
                    charge_id = %payment.telegram_payment_charge_id,
                    stars = %amount,
                    "received successful_payment"
                );

                deps.service
                    .record_payment(
                        user.id.0,
                        PaymentId::new(payment.telegram_payment_charge_id.0.clone()),
                        amount,
                        msg.date,
                    )
                    .await?;
                Ok(())
            }
        })
}

/// Handler for pre-checkout queries; must be answered promptly or the
/// payment attempt times out on Telegram's side.
fn pre_checkout_handler() -> UpdateHandler<HandlerError> {
    Update::filter_pre_checkout_query().endpoint(|bot: Bot, query: PreCheckoutQuery| async move {
        let approve = commands::payload_is_supported(&query.invoice_payload);

        let answer = if approve {
            bot.answer_pre_checkout_query(query.id, true).await
        } else {
            bot.answer_pre_checkout_query(query.id, false)
                .error_message("This bot did not issue that invoice")
                .await
        };
        if let Err(err) = answer {
            error!(%err, "answerPreCheckoutQuery failed");
        }
        Ok(())
    })
}
