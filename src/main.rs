#[macro_use]
extern crate tracing;

use clap::Parser;
use dns_propagation_watch::{
    config::{
        Args,
        Config,
    },
    dns::NameserverResolver,
    dns_check::{
        self,
        Outcome,
    },
    notify::TelegramNotifier,
    records::RecordType,
    tracker::Tracker,
};
use eyre::{
    bail,
    Result,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_args(Args::parse()).await?;
    debug!(?config.domain, %config.nameserver, ?config.interval, "configuration loaded");

    let resolver = NameserverResolver::new(config.nameserver);
    let notifier = TelegramNotifier::new(&config.bot_token, &config.chat_id)?;
    let tracker = Tracker::new(&config.domain, &resolver, &notifier);

    if config.once {
        dns_check::check_once(&tracker).await;
        return Ok(());
    }

    match dns_check::run(&tracker, config.interval, config.deadline, shutdown_signal()).await {
        Outcome::AllFound | Outcome::Interrupted { .. } => Ok(()),
        Outcome::DeadlineExceeded { missing } => {
            let missing = missing.iter().map(RecordType::as_str).collect::<Vec<_>>().join(", ");
            bail!("gave up waiting for {} records of {}", missing, config.domain)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
