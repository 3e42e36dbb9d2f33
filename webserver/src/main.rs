//! Country catalog server entry point

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;

use catalog::LiveCatalog;
use shared::{component_info, logging, Component};
use webserver::{Args, WebServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));

    let config = args.catalog_config()?;
    let http_addr = args.bind_address()?;
    component_info!(
        Component::WebServer,
        "🌐 Starting country catalog on {} (base currency {})",
        http_addr,
        config.base_currency
    );

    let catalog = Arc::new(
        LiveCatalog::from_config(&config)
            .await
            .context("failed to initialize catalog")?,
    );

    let scheduler = config
        .refresh_interval
        .map(|every| Arc::clone(&catalog).spawn_scheduled_refresh(every));

    let webserver = WebServer::new(Arc::clone(&catalog));

    // Set up graceful shutdown
    let shutdown_sender = webserver.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(Component::WebServer, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(Component::WebServer, "Signal handling", &err);
            }
        }
    });

    webserver.run(http_addr).await?;

    if let Some(handle) = scheduler {
        handle.abort();
    }

    logging::log_success(Component::WebServer, "WebServer stopped gracefully");
    Ok(())
}
