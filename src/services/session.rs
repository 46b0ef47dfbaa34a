//! Trading-session gate

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday};

use crate::config::Config;

/// UTC+05:30
pub const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

pub trait SessionCalendar: Send + Sync {
    fn is_open_at(&self, at: DateTime<Utc>) -> bool;

    fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    /// Offset used when reporting times to users
    fn venue_offset(&self) -> FixedOffset;
}

/// Weekday trading window in the venue's local time, minus holidays
#[derive(Debug, Clone, PartialEq)]
pub struct MarketHours {
    offset: FixedOffset,
    open: NaiveTime,
    close: NaiveTime,
    holidays: Vec<NaiveDate>,
}

impl MarketHours {
    pub fn new(offset: FixedOffset, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            offset,
            open,
            close,
            holidays: Vec::new(),
        }
    }

    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ist(), config.market_open, config.market_close)
            .with_holidays(config.holidays.clone())
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }
}

impl Default for MarketHours {
    /// NSE cash session, 09:15-15:30 IST
    fn default() -> Self {
        let defaults = Config::default();
        Self::new(ist(), defaults.market_open, defaults.market_close)
    }
}

impl SessionCalendar for MarketHours {
    fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        let local = at.with_timezone(&self.offset);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        if self.holidays.contains(&local.date_naive()) {
            return false;
        }

        let time = local.time();
        time >= self.open && time <= self.close
    }

    fn venue_offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Session gate with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct FixedSession {
    pub open: bool,
}

impl SessionCalendar for FixedSession {
    fn is_open_at(&self, _at: DateTime<Utc>) -> bool {
        self.open
    }

    fn venue_offset(&self) -> FixedOffset {
        ist()
    }
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix())
}
