use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use domain::models::NotificationQuery;
use teamdesk_notify::api::NotificationApi;
use teamdesk_notify::config::ClientConfig;
use teamdesk_notify::feed::{Feed, FeedService};
use teamdesk_notify::logging;
use teamdesk_notify::poller::{FeedRefreshTask, Poller};
use teamdesk_notify::session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ClientConfig::load()?;

    // Initialize logging
    logging::init_logging(&config.logging);

    info!(
        "Starting TeamDesk notification watcher v{}",
        env!("CARGO_PKG_VERSION")
    );

    // The session is constructed once, here, and injected into the client.
    let session = match std::env::var(&config.api.token_env) {
        Ok(token) if !token.trim().is_empty() => Arc::new(Session::with_token(token)),
        _ => {
            warn!(
                token_env = %config.api.token_env,
                "No API token found; requests will be unauthenticated"
            );
            Arc::new(Session::anonymous())
        }
    };

    let api = NotificationApi::new(&config.api, Arc::clone(&session))?;
    let feed = Arc::new(Feed::new());
    let service = Arc::new(FeedService::new(api, Arc::clone(&feed)));

    // Initial load before the poller takes over.
    let query = NotificationQuery::default();
    match service.refresh(&query).await {
        Ok(count) => {
            let stats = service.stats().await.ok();
            info!(
                loaded = count,
                unread = feed.unread_count(),
                total = stats.map(|s| s.total).unwrap_or_default(),
                "Initial feed loaded"
            );
        }
        Err(e) => warn!(error = %e, "Initial feed load failed; the poller will retry"),
    }

    let mut poller = Poller::new(config.poll.clone());
    poller.start(FeedRefreshTask::new(Arc::clone(&service), query));

    // Run until interrupted.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    poller.shutdown();
    poller.wait_for_shutdown(Duration::from_secs(5)).await;

    info!(unread = feed.unread_count(), "Watcher stopped");
    Ok(())
}
