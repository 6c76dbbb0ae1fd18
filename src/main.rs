mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{KubeAdapter, SnapshotStore};
use application::{ActivityLog, OverviewService, RecommendationRegistry, Sampler};
use config::Config;
use interface::http::{create_router, AppState, ChatProxy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("opsdeck={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting OpsDeck v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Initialize the cluster inventory adapter. A missing or broken cluster
    // connection is not fatal: the dashboard keeps serving with
    // cluster-derived fields absent.
    let inventory: Option<Arc<dyn ports::InventorySource>> = match &config.kube_api_url {
        Some(api_url) => {
            match KubeAdapter::new(
                api_url.clone(),
                config.kube_token.clone(),
                Duration::from_secs(config.provider_timeout),
                config.kube_insecure_tls,
            ) {
                Ok(adapter) => {
                    info!("Cluster inventory adapter ready for {}", api_url);
                    Some(Arc::new(adapter))
                }
                Err(e) => {
                    warn!("Failed to initialize cluster adapter: {}. Cluster metrics disabled.", e);
                    None
                }
            }
        }
        None => {
            warn!("OPSDECK_KUBE_API_URL not set. Cluster metrics disabled.");
            None
        }
    };

    // Core state: snapshot store plus the in-memory registries.
    let store = Arc::new(SnapshotStore::new(config.history_size));
    let recommendations = Arc::new(RecommendationRegistry::seeded());
    let activity = Arc::new(ActivityLog::seeded());

    let overview = Arc::new(OverviewService::new(
        Arc::clone(&store),
        inventory.clone(),
        config.namespace.clone(),
    ));

    // Background sampler with graceful shutdown.
    let sampler = Sampler::new(
        Arc::clone(&store),
        inventory,
        config.namespace.clone(),
        Duration::from_secs(config.sample_interval),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sampler_handle = tokio::spawn(sampler.run(shutdown_rx));

    info!(
        "Sampler running every {}s, history capacity {}",
        config.sample_interval, config.history_size
    );

    let chat = Arc::new(ChatProxy::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout))
            .build()?,
        config.ai_engine_url.clone(),
    ));

    // Create HTTP server
    let state = AppState {
        store,
        overview,
        recommendations,
        activity,
        chat,
    };
    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("OpsDeck listening on {}", addr);
    info!("  API: http://localhost:{}/api/v1/overview", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    // Stop the sampler before exiting.
    let _ = shutdown_tx.send(true);
    let _ = sampler_handle.await;

    info!("Server exited");
    Ok(())
}
