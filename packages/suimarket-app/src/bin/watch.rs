//! Suimarket watch binary: a headless front-end that keeps the marketplace
//! views in sync and logs what it sees. Listings are polled every 6s, the
//! marketplace fee balance every 5s, matching the interactive front-end's
//! refresh cadence.

use std::sync::Arc;
use std::time::Duration;

use suimarket_app::views::{AdminPanel, AppHandle, MarketplaceView};
use suimarket_app::{ChainGateway, JsonRpcGateway, MarketConfig};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LISTING_POLL: Duration = Duration::from_secs(6);
const BALANCE_POLL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting suimarket watch");

    let config: MarketConfig = config::Config::builder()
        .add_source(config::File::with_name("suimarket").required(false))
        .add_source(config::Environment::with_prefix("SUIMARKET"))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|e| {
            // Fall back only when no config exists; parsing errors fail hard.
            let err_str = format!("{e}");
            if err_str.contains("not found") || err_str.contains("missing field") {
                warn!(error = %e, "No config file found, using defaults");
                MarketConfig::default()
            } else {
                error!(error = %e, "FATAL: Config error — fix env vars or suimarket.toml");
                std::process::exit(1);
            }
        });

    config.validate()?;
    info!(
        rpc = %config.rpc_url,
        package = %config.package_id,
        module = %config.module_name,
        marketplace = %config.marketplace_id,
        "Configuration loaded"
    );

    let gateway: Arc<dyn ChainGateway> = Arc::new(JsonRpcGateway::new(&config.rpc_url));
    let app = AppHandle::new(config, gateway);

    let mut marketplace = MarketplaceView::default();
    let mut admin = AdminPanel::default();

    let mut listing_tick = tokio::time::interval(LISTING_POLL);
    let mut balance_tick = tokio::time::interval(BALANCE_POLL);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = listing_tick.tick() => {
                marketplace.refresh(&app.synchronizer).await;
                if let Some(message) = marketplace.page.error() {
                    warn!(error = message, "Listing poll failed, keeping last page");
                } else if let Some(page) = marketplace.page.value() {
                    info!(
                        listings = page.items.len(),
                        has_more = page.next_cursor.is_some(),
                        "Listing page refreshed"
                    );
                    for listing in &page.items {
                        info!(
                            id = %listing.object_id.short(),
                            seller = %listing.seller.short(),
                            price_sui = %suimarket_app::views::price_display(listing),
                            name = %listing.nft.name,
                            "Listing"
                        );
                    }
                }
            }
            _ = balance_tick.tick() => {
                admin.refresh_balance(app.gateway.as_ref(), &app.config).await;
                if let Some(message) = admin.balance.error() {
                    warn!(error = message, "Marketplace balance poll failed");
                } else {
                    info!(fees_sui = %admin.balance_display(), "Marketplace fee balance");
                }
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    info!("Suimarket watch shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
