//! Implied-volatility skew between the ATM legs

use crate::models::signal::Vote;

/// Vote for the richer side when its IV exceeds the other by more than `ratio`
///
/// Returns `None` when neither side clears the ratio.
pub fn iv_skew_vote(call_iv: f64, put_iv: f64, ratio: f64) -> Option<Vote> {
    if put_iv > call_iv * ratio {
        Some(Vote::Put)
    } else if call_iv > put_iv * ratio {
        Some(Vote::Call)
    } else {
        None
    }
}
