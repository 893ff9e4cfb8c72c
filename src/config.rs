use crate::domain::payment::Amount;
use crate::error::{PaymentError, Result};

/// What the `/pay` invoice offers.
#[derive(Debug, Clone)]
pub struct InvoiceSpec {
    pub title: String,
    pub description: String,
    pub price: Amount,
}

/// Process configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub invoice: InvoiceSpec,
}

impl Config {
    /// Loads the configuration from environment variables.
    ///
    /// `TELEGRAM_BOT_TOKEN` is required. The invoice can be customized via
    /// `STARS_INVOICE_TITLE`, `STARS_INVOICE_DESCRIPTION` and
    /// `STARS_INVOICE_PRICE` (a positive Stars count, default 1).
    pub fn from_env() -> Result<Self> {
        let telegram_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| PaymentError::ConfigError("TELEGRAM_BOT_TOKEN is not set".to_string()))?;

        let price = match std::env::var("STARS_INVOICE_PRICE") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| {
                    PaymentError::ConfigError(format!(
                        "STARS_INVOICE_PRICE must be a positive integer, got {raw:?}"
                    ))
                })
                .and_then(Amount::new)?,
            Err(_) => Amount::new(1)?,
        };

        Ok(Self {
            telegram_token,
            invoice: InvoiceSpec {
                title: env_or("STARS_INVOICE_TITLE", "Test Product"),
                description: env_or("STARS_INVOICE_DESCRIPTION", "Test description"),
                price,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
