//! One-shot signal cycle
//!
//! Fetches the option chain and the underlying's candles once, evaluates the
//! decision engine and prints the result.

use dotenvy::dotenv;
use std::sync::Arc;
use strikewise::config::Config;
use strikewise::core::scheduler::{MarketDataSources, PollerConfig, SignalPoller};
use strikewise::logging;
use strikewise::models::signal::PublishedSignal;
use strikewise::services::{MarketHours, NseClient, YahooPriceProvider};
use strikewise::signals::engine::SignalEngine;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(environment = %config.environment, symbol = %config.symbol, "Running single signal cycle");

    let nse = NseClient::from_config(&config)?;
    if let Err(e) = nse.bootstrap_session().await {
        warn!(error = %e, "NSE session init failed");
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
    let (poller, _receiver) =
        SignalPoller::new(poller_config, sources, SignalEngine::new(config.decision), None)?;

    let published = poller.run_cycle().await;
    print_signal(&published);

    Ok(())
}

fn print_signal(published: &PublishedSignal) {
    let record = &published.record;
    println!("Last updated: {}", published.reported_time);
    println!("  Signal: {}", record.signal);
    println!(
        "  Votes: CALL {} | PUT {}",
        record.vote_tally.call_count, record.vote_tally.put_count
    );
    println!("  Reasons:");
    for (i, reason) in record.reasons.iter().enumerate() {
        println!("    {}. {}", i + 1, reason);
    }
}
