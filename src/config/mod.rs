//! Environment-driven configuration
//!
//! Values come from the process environment (optionally seeded from `.env`
//! by the binaries). Anything unset falls back to the NIFTY defaults.

pub mod decision;

pub use decision::DecisionConfig;

use chrono::{NaiveDate, NaiveTime};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::core::scheduler::cron_expression;
use crate::services::retry::RetryPolicy;

pub const DEFAULT_SYMBOL: &str = "NIFTY";
pub const DEFAULT_PRICE_TICKER: &str = "^NSEI";
pub const DEFAULT_NSE_HOME_URL: &str = "https://www.nseindia.com";
pub const DEFAULT_YAHOO_CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Get the running environment (`ENVIRONMENT`, default `sandbox`)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub symbol: String,
    pub option_chain_url: String,
    pub nse_home_url: String,
    pub price_ticker: String,
    pub price_interval: String,
    pub price_range: String,
    pub price_lookback: usize,
    pub yahoo_chart_url: String,
    pub loop_seconds: u64,
    pub port: u16,
    pub http_timeout: Duration,
    pub retry: RetryPolicy,
    pub market_open: NaiveTime,
    pub market_close: NaiveTime,
    pub holidays: Vec<NaiveDate>,
    pub decision: DecisionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            option_chain_url: option_chain_url(DEFAULT_SYMBOL),
            nse_home_url: DEFAULT_NSE_HOME_URL.to_string(),
            price_ticker: DEFAULT_PRICE_TICKER.to_string(),
            price_interval: "5m".to_string(),
            price_range: "1d".to_string(),
            price_lookback: 100,
            yahoo_chart_url: DEFAULT_YAHOO_CHART_URL.to_string(),
            loop_seconds: 15,
            port: 8080,
            http_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
            market_open: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or(NaiveTime::MIN),
            market_close: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
            holidays: Vec::new(),
            decision: DecisionConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let symbol = lookup("SYMBOL").unwrap_or(defaults.symbol);
        let option_chain_url =
            lookup("OPTION_CHAIN_URL").unwrap_or_else(|| option_chain_url(&symbol));

        let retry = RetryPolicy {
            max_attempts: parse_or(&lookup, "FETCH_MAX_ATTEMPTS", defaults.retry.max_attempts)?,
            min_delay: Duration::from_millis(parse_or(
                &lookup,
                "FETCH_MIN_DELAY_MS",
                defaults.retry.min_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_or(
                &lookup,
                "FETCH_MAX_DELAY_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
        };
        if retry.max_attempts == 0 {
            return Err(invalid("FETCH_MAX_ATTEMPTS", "0", "at least one attempt is required"));
        }

        let loop_seconds = parse_or(&lookup, "LOOP_SECONDS", defaults.loop_seconds)?;
        if loop_seconds == 0 {
            return Err(invalid("LOOP_SECONDS", "0", "polling interval must be positive"));
        }
        if let Err(e) = cron_expression(loop_seconds) {
            return Err(invalid("LOOP_SECONDS", &loop_seconds.to_string(), &e.to_string()));
        }

        let decision = DecisionConfig {
            pcr_upper: parse_or(&lookup, "PCR_UPPER", defaults.decision.pcr_upper)?,
            pcr_lower: parse_or(&lookup, "PCR_LOWER", defaults.decision.pcr_lower)?,
            ..defaults.decision
        };
        if decision.pcr_lower > decision.pcr_upper {
            return Err(invalid(
                "PCR_LOWER",
                &decision.pcr_lower.to_string(),
                "must not exceed PCR_UPPER",
            ));
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            symbol,
            option_chain_url,
            nse_home_url: lookup("NSE_HOME_URL").unwrap_or(defaults.nse_home_url),
            price_ticker: lookup("PRICE_TICKER").unwrap_or(defaults.price_ticker),
            price_interval: lookup("PRICE_INTERVAL").unwrap_or(defaults.price_interval),
            price_range: lookup("PRICE_RANGE").unwrap_or(defaults.price_range),
            price_lookback: parse_or(&lookup, "PRICE_LOOKBACK", defaults.price_lookback)?,
            yahoo_chart_url: lookup("YAHOO_CHART_URL").unwrap_or(defaults.yahoo_chart_url),
            loop_seconds,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_TIMEOUT_SECONDS",
                defaults.http_timeout.as_secs(),
            )?),
            retry,
            market_open: parse_time(&lookup, "MARKET_OPEN", defaults.market_open)?,
            market_close: parse_time(&lookup, "MARKET_CLOSE", defaults.market_close)?,
            holidays: parse_holidays(&lookup)?,
            decision,
        })
    }

    pub fn is_production(&self) -> bool {
        is_production_environment(&self.environment)
    }
}

/// Whether an `ENVIRONMENT` value names production
pub fn is_production_environment(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

fn option_chain_url(symbol: &str) -> String {
    format!("https://www.nseindia.com/api/option-chain-indices?symbol={}", symbol)
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_time<F>(lookup: &F, key: &'static str, default: NaiveTime) -> Result<NaiveTime, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map_err(|e| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_holidays<F>(lookup: &F) -> Result<Vec<NaiveDate>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup("MARKET_HOLIDAYS") else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|day| !day.is_empty())
        .map(|day| {
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map_err(|e| invalid("MARKET_HOLIDAYS", day, &e.to_string()))
        })
        .collect()
}
