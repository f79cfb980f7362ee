//! GitHub Monitor - Webhook to Telegram Bridge
//!
//! A small service that receives GitHub webhook deliveries, classifies them
//! by event kind, and forwards formatted notifications to a Telegram chat.

use anyhow::Result;
use clap::Parser;
use github_monitor::{
    cli::Cli,
    config::Config,
    dispatch::Dispatcher,
    notification::telegram::TelegramClient,
    server::WebhookServer,
};
use log::{error, info};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load_from_cli(cli).unwrap_or_else(|err| {
        // Manually initialize logger for this specific error
        env_logger::init();
        error!("Failed to load configuration: {}", err);
        // Exit if configuration fails, as it's a critical step.
        std::process::exit(1);
    });

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("GitHub Monitor starting up...");

    // Log the loaded configuration settings for visibility
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Listen Address: {}", config.server.listen);
    info!("Telegram API Base: {}", config.telegram.api_base);
    info!("Telegram Chat ID: {}", config.telegram.chat_id);
    info!(
        "Bot Token Configured: {}",
        if config.has_bot_token() { "Yes" } else { "No" }
    );
    info!("-------------------------------------------------------");

    // =========================================================================
    // Create Shutdown Channel
    // =========================================================================
    let (shutdown_tx, shutdown_rx) = watch::channel(());

    // =========================================================================
    // Instantiate Services
    // =========================================================================
    let telegram = Arc::new(TelegramClient::from_config(&config.telegram));
    let dispatcher = Arc::new(Dispatcher::new(telegram));

    // =========================================================================
    // Start the Webhook Server
    // =========================================================================
    let listener = TcpListener::bind(&config.server.listen).await?;
    info!("Listening for webhooks on {}", listener.local_addr()?);

    let server = WebhookServer::new(listener, dispatcher, shutdown_rx);
    let server_task = tokio::spawn(server.run());

    info!("GitHub Monitor initialized successfully. Waiting for events...");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Shutting down gracefully...");

    // Send shutdown signal to all tasks
    shutdown_tx.send(()).expect("Failed to send shutdown signal");

    if let Err(e) = server_task.await {
        error!("Webhook server task panicked: {:?}", e);
    }

    info!("All tasks shut down. Exiting.");

    Ok(())
}
