//! At-the-money strike resolution

use serde::Serialize;

use crate::models::chain::{ChainSnapshot, OptionSide, StrikeRow};

/// Round the underlying to the nearest multiple of `step`, ties rounding up
///
/// Returns `None` when the strike does not fit in an `i64`.
pub fn atm_strike(underlying: f64, step: i64) -> Option<i64> {
    let step = step.max(1);
    let steps = ((underlying / step as f64) + 0.5).floor();
    if !steps.is_finite() || steps.abs() >= i64::MAX as f64 {
        return None;
    }
    (steps as i64).checked_mul(step)
}

/// The CALL and PUT rows at the ATM strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmPair {
    pub underlying: f64,
    pub strike: i64,
    pub call: StrikeRow,
    pub put: StrikeRow,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtmResolution {
    Resolved(AtmPair),
    NoUnderlying,
    MissingLeg {
        underlying: f64,
        strike: i64,
        side: OptionSide,
    },
}

/// Select the ATM CALL/PUT pair from a snapshot
pub fn resolve_atm(snapshot: &ChainSnapshot, step: i64) -> AtmResolution {
    let Some(underlying) = snapshot.underlying_value() else {
        return AtmResolution::NoUnderlying;
    };
    let Some(strike) = atm_strike(underlying, step) else {
        return AtmResolution::NoUnderlying;
    };

    let call = snapshot.row(strike, OptionSide::Call);
    let put = snapshot.row(strike, OptionSide::Put);

    match (call, put) {
        (Some(call), Some(put)) => AtmResolution::Resolved(AtmPair {
            underlying,
            strike,
            call: *call,
            put: *put,
        }),
        (None, _) => AtmResolution::MissingLeg {
            underlying,
            strike,
            side: OptionSide::Call,
        },
        (Some(_), None) => AtmResolution::MissingLeg {
            underlying,
            strike,
            side: OptionSide::Put,
        },
    }
}
