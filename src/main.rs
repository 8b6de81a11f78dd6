use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use adaptive_content::adapters::ai::build_content_provider;
use adaptive_content::adapters::http::{build_router, AppState, Dependencies};
use adaptive_content::adapters::memory::{
    InMemoryCompletionRepository, InMemoryContentRepository, InMemoryUserProfileStore,
};
use adaptive_content::adapters::notification::{LoggingNotificationSink, WebhookNotificationSink};
use adaptive_content::adapters::research::SimulatedResearchSource;
use adaptive_content::adapters::RetryPolicy;
use adaptive_content::application::RefreshAll;
use adaptive_content::config::{AppConfig, NotificationConfig};
use adaptive_content::ports::NotificationSink;
use adaptive_content::telemetry;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!(error = %err, "fatal startup error");
        eprintln!("adaptive-content: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init_tracing(&config.server);

    let provider = build_content_provider(&config.ai)?;
    let deps = Dependencies {
        provider,
        profiles: Arc::new(InMemoryUserProfileStore::new()),
        contents: Arc::new(InMemoryContentRepository::new()),
        completions: Arc::new(InMemoryCompletionRepository::new()),
        research: Arc::new(SimulatedResearchSource::new()),
        notifier: notification_sink(&config.notification),
    };
    let state = AppState::new(deps, &config.pipeline);

    let scheduler = config
        .pipeline
        .refresh_interval()
        .map(|period| tokio::spawn(scheduled_refresh(state.refresh_all.clone(), period)));

    let app = build_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "adaptive-content listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped, initiating graceful shutdown sequence");
    if let Some(handle) = scheduler {
        handle.abort();
    }
    info!("Graceful shutdown complete");
    Ok(())
}

fn notification_sink(config: &NotificationConfig) -> Arc<dyn NotificationSink> {
    match config.webhook() {
        Some(url) => {
            info!("Posting refresh summaries to webhook");
            Arc::new(WebhookNotificationSink::new(
                url,
                RetryPolicy::new(config.max_attempts, config.retry_delay()),
            ))
        }
        None => Arc::new(LoggingNotificationSink),
    }
}

async fn scheduled_refresh(refresh_all: Arc<RefreshAll>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    // The first tick completes immediately; skip it so startup stays quiet.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        match refresh_all.run().await {
            Ok(summary) => info!(
                analyzed = summary.analyzed,
                updated = summary.updated,
                "Scheduled refresh finished"
            ),
            Err(err) => warn!(error = %err, "Scheduled refresh failed"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
