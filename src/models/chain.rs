//! Option-chain snapshot models

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Option side at a strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionSide {
    Call,
    Put,
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Call => write!(f, "CALL"),
            OptionSide::Put => write!(f, "PUT"),
        }
    }
}

/// Structural violations of a chain snapshot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    #[error("duplicate {side} row at strike {strike}")]
    DuplicateStrike { side: OptionSide, strike: i64 },
    #[error("{field} on {side} row at strike {strike} is not a finite number")]
    NonFinite {
        field: &'static str,
        side: OptionSide,
        strike: i64,
    },
    #[error("{field} on {side} row at strike {strike} is negative")]
    Negative {
        field: &'static str,
        side: OptionSide,
        strike: i64,
    },
}

/// One side of one strike, flattened from a chain record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrikeRow {
    pub side: OptionSide,
    pub strike: i64,
    pub open_interest: f64,
    pub open_interest_change: f64,
    pub volume: f64,
    pub implied_volatility: f64,
}

impl StrikeRow {
    pub fn new(side: OptionSide, strike: i64) -> Self {
        Self {
            side,
            strike,
            open_interest: 0.0,
            open_interest_change: 0.0,
            volume: 0.0,
            implied_volatility: 0.0,
        }
    }

    pub fn with_open_interest(mut self, open_interest: f64) -> Self {
        self.open_interest = open_interest;
        self
    }

    pub fn with_open_interest_change(mut self, change: f64) -> Self {
        self.open_interest_change = change;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Absent IV is recorded as 0.
    pub fn with_implied_volatility(mut self, iv: Option<f64>) -> Self {
        self.implied_volatility = iv.unwrap_or(0.0);
        self
    }

    fn validate(&self) -> Result<(), ChainError> {
        let fields = [
            ("open_interest", self.open_interest, true),
            ("open_interest_change", self.open_interest_change, false),
            ("volume", self.volume, true),
            ("implied_volatility", self.implied_volatility, true),
        ];
        for (field, value, non_negative) in fields {
            if !value.is_finite() {
                return Err(ChainError::NonFinite {
                    field,
                    side: self.side,
                    strike: self.strike,
                });
            }
            if non_negative && value < 0.0 {
                return Err(ChainError::Negative {
                    field,
                    side: self.side,
                    strike: self.strike,
                });
            }
        }
        Ok(())
    }
}

/// All strike rows of one chain fetch plus the underlying's last value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChainSnapshot {
    rows: Vec<StrikeRow>,
    underlying_value: Option<f64>,
}

impl ChainSnapshot {
    /// Build a snapshot, rejecting a second row for the same side and strike.
    ///
    /// A non-finite underlying value is treated as absent.
    pub fn new(rows: Vec<StrikeRow>, underlying_value: Option<f64>) -> Result<Self, ChainError> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            row.validate()?;
            if !seen.insert((row.side, row.strike)) {
                return Err(ChainError::DuplicateStrike {
                    side: row.side,
                    strike: row.strike,
                });
            }
        }

        Ok(Self {
            rows,
            underlying_value: underlying_value.filter(|v| v.is_finite()),
        })
    }

    /// Snapshot standing in for an unavailable fetch
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[StrikeRow] {
        &self.rows
    }

    pub fn underlying_value(&self) -> Option<f64> {
        self.underlying_value
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, strike: i64, side: OptionSide) -> Option<&StrikeRow> {
        self.rows
            .iter()
            .find(|row| row.strike == strike && row.side == side)
    }
}
