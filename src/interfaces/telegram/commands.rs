use crate::application::service::LedgerSummary;
use crate::domain::payment::Amount;
use crate::error::{PaymentError, Result};
use teloxide::utils::command::BotCommands;

/// Invoice payload tag; pre-checkout only approves invoices carrying it.
const INVOICE_KIND: &str = "stars-topup";

#[derive(BotCommands, Clone, Copy, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "show the available commands")]
    Start,
    #[command(description = "pay")]
    Pay,
    #[command(description = "check payment status")]
    Status,
    #[command(description = "refund payment")]
    Refund,
}

pub fn invoice_payload() -> String {
    serde_json::json!({ "kind": INVOICE_KIND }).to_string()
}

/// Whether a pre-checkout payload belongs to an invoice this bot issued.
pub fn payload_is_supported(payload: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(payload)
        .ok()
        .and_then(|value| {
            value
                .get("kind")
                .and_then(|kind| kind.as_str())
                .map(|kind| kind == INVOICE_KIND)
        })
        .unwrap_or(false)
}

pub fn welcome_text() -> String {
    "Welcome! I am a simple bot that can accept payments via Telegram Stars. \
     The following commands are available:\n\n\
     /pay - to pay\n\
     /status - to check payment status\n\
     /refund - to refund payment"
        .to_string()
}

pub fn status_text(summary: &LedgerSummary) -> String {
    if summary.has_paid() {
        format!(
            "You have paid {} time(s), {} Stars in total",
            summary.count, summary.total_stars
        )
    } else {
        "You have not paid yet".to_string()
    }
}

pub fn refund_reply(result: &Result<Amount>) -> String {
    match result {
        Ok(amount) => format!("Refund successful, {amount} Stars returned"),
        Err(PaymentError::NothingToRefund(_)) => {
            "You have not paid yet, there is nothing to refund".to_string()
        }
        Err(_) => "Refund failed".to_string(),
    }
}
