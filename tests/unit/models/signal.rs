//! Unit tests for signal and vote models

use chrono::{DateTime, FixedOffset, Utc};
use strikewise::models::signal::{DecisionRecord, PublishedSignal, Signal, Vote, VoteTally};

#[test]
fn test_signal_serializes_screaming_snake_case() {
    assert_eq!(serde_json::to_string(&Signal::StrongBuyCall).unwrap(), "\"STRONG_BUY_CALL\"");
    assert_eq!(serde_json::to_string(&Signal::NoData).unwrap(), "\"NO_DATA\"");
    let parsed: Signal = serde_json::from_str("\"MARKET_CLOSED\"").unwrap();
    assert_eq!(parsed, Signal::MarketClosed);
}

#[test]
fn test_signal_labels_and_colors() {
    assert_eq!(Signal::BuyCall.label(), "BUY CALL");
    assert_eq!(Signal::StrongBuyCall.to_string(), "STRONG BUY CALL (engulfing)");
    assert_eq!(Signal::BuyPut.color(), "#c0392b");
    assert_eq!(Signal::NoTrade.color(), Signal::NoData.color());
    assert!(Signal::ALL.iter().all(|s| s.color().starts_with('#')));
}

#[test]
fn test_only_buy_signals_are_directional() {
    let directional: Vec<Signal> = Signal::ALL.into_iter().filter(Signal::is_directional).collect();
    assert_eq!(
        directional,
        vec![Signal::BuyCall, Signal::BuyPut, Signal::StrongBuyCall]
    );
}

#[test]
fn test_tally_ignores_neutral_votes() {
    let tally: VoteTally = [Vote::Put, Vote::Neutral, Vote::Call, Vote::Put].into_iter().collect();
    assert_eq!(
        tally,
        VoteTally {
            call_count: 1,
            put_count: 2
        }
    );
}

#[test]
fn test_published_signal_reports_venue_time() {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    let at = DateTime::parse_from_rfc3339("2024-01-15T04:00:05Z").unwrap().with_timezone(&Utc);
    let record = DecisionRecord::terminal(Signal::NoData, vec!["Option chain snapshot is empty".into()]);
    let published = PublishedSignal::new(record, at, ist);

    assert_eq!(published.reported_time, "09:30:05");
    assert_eq!(published.label, "NO DATA");
    assert_eq!(published.color, "#7f8c8d");
}

#[test]
fn test_published_signal_json_flattens_record() {
    let ist = FixedOffset::east_opt(19_800).unwrap();
    let at = DateTime::from_timestamp(1_705_291_200, 0).unwrap();
    let record = DecisionRecord::terminal(Signal::MarketClosed, vec!["closed".into()]);
    let value = serde_json::to_value(PublishedSignal::new(record, at, ist)).unwrap();

    assert_eq!(value["signal"], "MARKET_CLOSED");
    assert_eq!(value["reasons"][0], "closed");
    assert_eq!(value["vote_tally"]["call_count"], 0);
    assert_eq!(value["label"], "MARKET CLOSED");
}

#[test]
fn test_published_equality_ignores_timestamps() {
    let ist = FixedOffset::east_opt(19_800).unwrap();
    let record = DecisionRecord::terminal(Signal::NoData, vec!["x".into()]);
    let a = PublishedSignal::new(record.clone(), DateTime::from_timestamp(0, 0).unwrap(), ist);
    let b = PublishedSignal::new(record, DateTime::from_timestamp(3_600, 0).unwrap(), ist);
    assert_eq!(a, b);
}
