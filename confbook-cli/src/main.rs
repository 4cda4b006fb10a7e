use anyhow::Context;
use confbook_cli::{BookingDesk, Console, ConsoleNotifier, Output};
use confbook_core::BookingRepository;
use confbook_store::{app_config::Config, DbClient, SqliteBookingRepository};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout belongs to the operator prompts, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confbook=warn,confbook_cli=warn,confbook_store=warn,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()
        .inspect_err(|e| tracing::error!("Error loading config: {}", e))
        .context("Failed to load config")?;
    tracing::info!(
        "Starting booking desk for {} with {} tickets",
        config.conference.name,
        config.conference.total_tickets
    );

    let db = DbClient::new(&config.database.url)
        .await
        .inspect_err(|e| tracing::error!("Error opening database: {}", e))
        .context("Failed to open booking store")?;

    let repository = Arc::new(SqliteBookingRepository::new(db.pool.clone()));
    repository
        .create_table()
        .await
        .inspect_err(|e| tracing::error!("Error creating table: {}", e))
        .context("Failed to create bookings table")?;

    let output = Output::stdout();
    let notifier = Arc::new(ConsoleNotifier::new(
        config.confirmation.delay(),
        output.clone(),
    ));
    let console = Console::new(BufReader::new(tokio::io::stdin()), output);

    let mut desk = BookingDesk::new(
        config.conference.name.clone(),
        config.conference.total_tickets,
        repository,
        notifier,
        console,
    );

    if config.conference.restore_inventory {
        desk.restore_from_store()
            .await
            .inspect_err(|e| tracing::error!("Error restoring bookings: {}", e))
            .context("Failed to restore bookings")?;
    }

    desk.run().await.context("Console input failed")?;

    db.close().await;
    Ok(())
}
