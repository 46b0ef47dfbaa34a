//! Cron-based polling loop that runs one decision cycle per tick
//!
//! Each cycle's record is published on a `watch` channel; presentation layers
//! hold receivers and read the latest value. Nothing else is shared.

use chrono::Utc;
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::metrics::Metrics;
use crate::models::chain::ChainSnapshot;
use crate::models::indicators::PriceSeries;
use crate::models::signal::PublishedSignal;
use crate::services::market_data::{OptionChainProvider, PriceSeriesProvider};
use crate::services::session::SessionCalendar;
use crate::signals::engine::SignalEngine;

pub type LatestSignal = Option<Arc<PublishedSignal>>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,
    #[error("interval of {interval_seconds}s cannot be expressed as an evenly spaced cron schedule")]
    UnsupportedInterval { interval_seconds: u64 },
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidSchedule { expr: String, reason: String },
}

/// Where one cycle's inputs come from
#[derive(Clone)]
pub struct MarketDataSources {
    pub chain: Arc<dyn OptionChainProvider>,
    pub prices: Arc<dyn PriceSeriesProvider>,
    pub session: Arc<dyn SessionCalendar>,
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval_seconds: u64,
    pub price_symbol: String,
    pub price_lookback: usize,
}

/// Runs cycles and publishes their records
struct CycleRunner {
    sources: MarketDataSources,
    engine: SignalEngine,
    metrics: Option<Arc<Metrics>>,
    publisher: watch::Sender<LatestSignal>,
    price_symbol: String,
    price_lookback: usize,
}

impl CycleRunner {
    async fn run_cycle(&self) -> Arc<PublishedSignal> {
        let start = Instant::now();
        let session_open = self.sources.session.is_open();

        let (snapshot, series) = if session_open {
            let (snapshot, series) = tokio::join!(
                self.sources.chain.fetch_chain_snapshot(),
                self.sources
                    .prices
                    .fetch_price_series(&self.price_symbol, self.price_lookback)
            );
            let snapshot = snapshot.unwrap_or_else(|| {
                warn!("SignalPoller: option chain unavailable, evaluating empty snapshot");
                if let Some(ref metrics) = self.metrics {
                    metrics.chain_fetch_failures_total.inc();
                }
                ChainSnapshot::empty()
            });
            (snapshot, series)
        } else {
            debug!("SignalPoller: session closed, skipping fetches");
            (ChainSnapshot::empty(), PriceSeries::empty())
        };

        let record = self.engine.evaluate(&snapshot, &series, session_open);

        info!(
            signal = %record.signal,
            directional = record.signal.is_directional(),
            call_votes = record.vote_tally.call_count,
            put_votes = record.vote_tally.put_count,
            chain_rows = snapshot.rows().len(),
            candles = series.len(),
            "SignalPoller: cycle complete - {}",
            record.signal
        );

        if let Some(ref metrics) = self.metrics {
            metrics.record_outcome(record.signal);
            metrics
                .signal_cycle_duration_seconds
                .observe(start.elapsed().as_secs_f64());
        }

        let published = Arc::new(PublishedSignal::new(
            record,
            Utc::now(),
            self.sources.session.venue_offset(),
        ));
        self.publisher.send_replace(Some(published.clone()));
        published
    }
}

/// Scheduler that runs a decision cycle on every cron tick
pub struct SignalPoller {
    runner: Arc<CycleRunner>,
    schedule: Schedule,
    interval_seconds: u64,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl SignalPoller {
    /// Create a poller and the receiver presentation layers read from
    pub fn new(
        config: PollerConfig,
        sources: MarketDataSources,
        engine: SignalEngine,
        metrics: Option<Arc<Metrics>>,
    ) -> Result<(Self, watch::Receiver<LatestSignal>), SchedulerError> {
        let schedule = schedule_for_interval(config.interval_seconds)?;
        let (publisher, receiver) = watch::channel(None);

        info!(
            interval = config.interval_seconds,
            symbol = %config.price_symbol,
            "SignalPoller: created with interval {}s",
            config.interval_seconds
        );

        let runner = CycleRunner {
            sources,
            engine,
            metrics,
            publisher,
            price_symbol: config.price_symbol,
            price_lookback: config.price_lookback,
        };

        Ok((
            Self {
                runner: Arc::new(runner),
                schedule,
                interval_seconds: config.interval_seconds,
                handle: Arc::new(RwLock::new(None)),
            },
            receiver,
        ))
    }

    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }

    /// Another receiver for the published records
    pub fn subscribe(&self) -> watch::Receiver<LatestSignal> {
        self.runner.publisher.subscribe()
    }

    /// Run and publish a single cycle now
    pub async fn run_cycle(&self) -> Arc<PublishedSignal> {
        self.runner.run_cycle().await
    }

    /// Start the polling loop
    pub async fn start(&self) {
        let runner = self.runner.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("SignalPoller: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                // Cycles are serialized: the next tick is computed after this one finishes
                runner.run_cycle().await;
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            previous.abort();
        }
        info!("SignalPoller: started successfully");
    }

    /// Stop the polling loop
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("SignalPoller: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}

/// Convert a polling interval into a 6-field cron expression
///
/// Only intervals that tick evenly are accepted: a divisor of a minute in
/// seconds, a divisor of an hour in whole minutes, or a divisor of a day in
/// whole hours. Anything else would drift at the minute, hour or day boundary.
pub fn cron_expression(interval_seconds: u64) -> Result<String, SchedulerError> {
    if interval_seconds == 0 {
        return Err(SchedulerError::Disabled);
    }
    let unsupported = SchedulerError::UnsupportedInterval { interval_seconds };

    if interval_seconds < 60 {
        return if 60 % interval_seconds == 0 {
            Ok(format!("*/{} * * * * *", interval_seconds))
        } else {
            Err(unsupported)
        };
    }
    if interval_seconds % 60 != 0 {
        return Err(unsupported);
    }

    let minutes = interval_seconds / 60;
    if minutes < 60 {
        return if 60 % minutes == 0 {
            Ok(format!("0 */{} * * * *", minutes))
        } else {
            Err(unsupported)
        };
    }
    if minutes % 60 != 0 {
        return Err(unsupported);
    }

    let hours = minutes / 60;
    if hours <= 24 && 24 % hours == 0 {
        Ok(format!("0 0 */{} * * *", hours))
    } else {
        Err(unsupported)
    }
}

pub fn schedule_for_interval(interval_seconds: u64) -> Result<Schedule, SchedulerError> {
    let expr = cron_expression(interval_seconds)?;
    Schedule::from_str(&expr).map_err(|e| SchedulerError::InvalidSchedule {
        reason: e.to_string(),
        expr,
    })
}
