use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use repetitor::core::{config, init_logger};
use repetitor::dialog::DialogStore;
use repetitor::storage::create_pool;
use repetitor::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    log::info!("Starting bot...");

    let bot = create_bot()?;

    let me = bot.get_me().await?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username, me.id);

    setup_bot_commands(&bot).await?;

    // Create database connection pool
    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );

    if config::admin::ADMIN_IDS.is_empty() {
        log::warn!("ADMIN_IDS is empty; leads and homework will be stored but nobody will be notified");
    }

    let dialogs = Arc::new(DialogStore::new());
    let handler_deps = HandlerDeps::new(Arc::clone(&db_pool), Arc::clone(&dialogs));
    let handler = schema(handler_deps);

    log::info!("Starting bot in long polling mode");

    // Polling listener that drops pending updates on start
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
