use clap::Parser;
use miette::{IntoDiagnostic, Result};
use starledger::application::service::PaymentService;
use starledger::config::Config;
use starledger::infrastructure::in_memory::InMemoryLedgerStore;
use starledger::interfaces::telegram::gateway::StarRefundGateway;
use starledger::interfaces::telegram::handlers::{HandlerDeps, schema};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tracing filter, e.g. "info" or "starledger=debug"
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_filter).into_diagnostic()?)
        .init();

    let config = Config::from_env().into_diagnostic()?;

    let bot = Bot::new(config.telegram_token.clone());
    let service = Arc::new(PaymentService::new(
        Box::new(InMemoryLedgerStore::new()),
        Box::new(StarRefundGateway::new(bot.clone())),
    ));
    let deps = HandlerDeps {
        service,
        invoice: Arc::new(config.invoice),
    };

    info!("starting Stars payment bot");
    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
