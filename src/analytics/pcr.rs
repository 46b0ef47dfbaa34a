//! Put/Call open-interest ratio

use crate::models::signal::Vote;

/// PUT open interest over CALL open interest, rounded to 2 decimals
///
/// Zero CALL open interest reads as a neutral 1.0.
pub fn put_call_ratio(call_oi: f64, put_oi: f64) -> f64 {
    if call_oi == 0.0 {
        return 1.0;
    }
    (put_oi / call_oi * 100.0).round() / 100.0
}

/// A heavy PUT book is read as support, so a high PCR favours calls.
/// Both bounds are strict.
pub fn pcr_vote(pcr: f64, lower: f64, upper: f64) -> Vote {
    if pcr > upper {
        Vote::Call
    } else if pcr < lower {
        Vote::Put
    } else {
        Vote::Neutral
    }
}
