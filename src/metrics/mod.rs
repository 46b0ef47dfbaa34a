//! Prometheus metrics for the polling loop and the HTTP layer

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::signal::Signal;

pub struct Metrics {
    registry: Registry,
    pub signal_cycles_total: IntCounter,
    pub signal_outcomes_total: IntCounterVec,
    pub chain_fetch_failures_total: IntCounter,
    pub signal_cycle_duration_seconds: Histogram,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let signal_cycles_total =
            IntCounter::new("signal_cycles_total", "Decision cycles completed")?;
        let signal_outcomes_total = IntCounterVec::new(
            Opts::new("signal_outcomes_total", "Decision cycles by resulting signal"),
            &["signal"],
        )?;
        let chain_fetch_failures_total = IntCounter::new(
            "chain_fetch_failures_total",
            "Cycles that ran with an unavailable option chain",
        )?;
        let signal_cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "signal_cycle_duration_seconds",
            "Wall time of one decision cycle including fetches",
        ))?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(signal_cycles_total.clone()))?;
        registry.register(Box::new(signal_outcomes_total.clone()))?;
        registry.register(Box::new(chain_fetch_failures_total.clone()))?;
        registry.register(Box::new(signal_cycle_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // Pre-create every label so all outcomes show up at zero
        for signal in Signal::ALL {
            signal_outcomes_total.with_label_values(&[outcome_label(signal)]);
        }

        Ok(Self {
            registry,
            signal_cycles_total,
            signal_outcomes_total,
            chain_fetch_failures_total,
            signal_cycle_duration_seconds,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    pub fn record_outcome(&self, signal: Signal) {
        self.signal_cycles_total.inc();
        self.signal_outcomes_total
            .with_label_values(&[outcome_label(signal)])
            .inc();
    }

    /// Render the registry in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn outcome_label(signal: Signal) -> &'static str {
    match signal {
        Signal::MarketClosed => "market_closed",
        Signal::NoData => "no_data",
        Signal::BuyCall => "buy_call",
        Signal::BuyPut => "buy_put",
        Signal::StrongBuyCall => "strong_buy_call",
        Signal::NoTrade => "no_trade",
    }
}
