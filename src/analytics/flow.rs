//! Volume and open-interest-change comparison between the ATM legs

use crate::analytics::atm::AtmPair;
use crate::models::signal::Vote;

/// The side with the larger value wins; a tie is neutral
pub fn compare_sides(call: f64, put: f64) -> Vote {
    if put > call {
        Vote::Put
    } else if call > put {
        Vote::Call
    } else {
        Vote::Neutral
    }
}

pub fn volume_vote(pair: &AtmPair) -> Vote {
    compare_sides(pair.call.volume, pair.put.volume)
}

pub fn oi_change_vote(pair: &AtmPair) -> Vote {
    compare_sides(pair.call.open_interest_change, pair.put.open_interest_change)
}
