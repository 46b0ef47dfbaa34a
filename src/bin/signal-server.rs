//! Strikewise Signal Server
//!
//! Polls the option chain on a fixed schedule, evaluates the decision engine
//! each cycle and serves the latest record over HTTP (JSON API + dashboard).

use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use strikewise::config::Config;
use strikewise::core::http::{start_server, AppState, HealthStatus};
use strikewise::core::scheduler::{MarketDataSources, PollerConfig, SignalPoller};
use strikewise::logging;
use strikewise::metrics::Metrics;
use strikewise::services::{MarketHours, NseClient, YahooPriceProvider};
use strikewise::signals::engine::SignalEngine;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting Strikewise Signal Server");
    info!(environment = %config.environment, "Environment");
    info!(symbol = %config.symbol, ticker = %config.price_ticker, "Instrument");
    info!(
        interval = config.loop_seconds,
        "Signal Evaluation: every {} seconds", config.loop_seconds
    );

    let metrics = Arc::new(Metrics::new()?);

    let nse = NseClient::from_config(&config)?;
    if let Err(e) = nse.bootstrap_session().await {
        warn!(error = %e, "NSE session init failed, continuing without cookies");
    }

    let sources = MarketDataSources {
        chain: Arc::new(nse),
        prices: Arc::new(YahooPriceProvider::from_config(&config)?),
        session: Arc::new(MarketHours::from_config(&config)),
    };
    let poller_config = PollerConfig {
        interval_seconds: config.loop_seconds,
        price_symbol: config.price_ticker.clone(),
        price_lookback: config.price_lookback,
    };
    let (poller, latest) = SignalPoller::new(
        poller_config,
        sources,
        SignalEngine::new(config.decision),
        Some(metrics.clone()),
    )?;

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        latest,
        refresh_seconds: config.loop_seconds,
    };
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Publish immediately instead of waiting for the first tick
    poller.run_cycle().await;
    poller.start().await;

    info!("Signal server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down signal server...");
            poller.stop().await;
            info!("Signal server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
            poller.stop().await;
        }
    }

    Ok(())
}
