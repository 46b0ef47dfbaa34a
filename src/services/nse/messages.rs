//! NSE option-chain API response shapes

use serde::Deserialize;

use crate::models::chain::{ChainSnapshot, OptionSide, StrikeRow};
use crate::services::error::FetchError;

#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainResponse {
    #[serde(default)]
    pub records: Option<Records>,
    #[serde(default)]
    pub filtered: Option<Filtered>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Records {
    #[serde(default)]
    pub expiry_dates: Vec<String>,
    #[serde(default)]
    pub data: Vec<StrikeRecord>,
    #[serde(default)]
    pub underlying_value: Option<f64>,
}

/// Nearest-expiry subset of `records.data`
#[derive(Debug, Clone, Deserialize)]
pub struct Filtered {
    #[serde(default)]
    pub data: Vec<StrikeRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeRecord {
    pub strike_price: f64,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(rename = "CE", default)]
    pub ce: Option<OptionLeg>,
    #[serde(rename = "PE", default)]
    pub pe: Option<OptionLeg>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionLeg {
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(rename = "changeinOpenInterest", default)]
    pub change_in_open_interest: Option<f64>,
    #[serde(default)]
    pub total_traded_volume: Option<f64>,
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    #[serde(default)]
    pub underlying_value: Option<f64>,
}

impl OptionLeg {
    fn to_row(&self, side: OptionSide, strike: i64) -> StrikeRow {
        StrikeRow::new(side, strike)
            .with_open_interest(self.open_interest.unwrap_or(0.0))
            .with_open_interest_change(self.change_in_open_interest.unwrap_or(0.0))
            .with_volume(self.total_traded_volume.unwrap_or(0.0))
            .with_implied_volatility(self.implied_volatility)
    }
}

impl OptionChainResponse {
    /// Flatten the nearest expiry into a chain snapshot
    ///
    /// Uses `filtered.data` when the API supplied it, otherwise the records
    /// of the first listed expiry.
    pub fn into_snapshot(self) -> Result<ChainSnapshot, FetchError> {
        let OptionChainResponse { records, filtered } = self;
        if records.is_none() && filtered.is_none() {
            return Err(FetchError::Shape(
                "response has neither records nor filtered data".to_string(),
            ));
        }

        let filtered_data = filtered.map(|f| f.data).unwrap_or_default();
        let (record_data, expiry_dates, records_underlying) = match records {
            Some(r) => (r.data, r.expiry_dates, r.underlying_value),
            None => (Vec::new(), Vec::new(), None),
        };

        let data = if !filtered_data.is_empty() {
            filtered_data
        } else {
            match expiry_dates.first() {
                Some(nearest) => record_data
                    .into_iter()
                    .filter(|record| {
                        record
                            .expiry_date
                            .as_deref()
                            .map_or(true, |expiry| expiry == nearest)
                    })
                    .collect(),
                None => record_data,
            }
        };

        let underlying = records_underlying.or_else(|| {
            data.iter()
                .flat_map(|record| [record.ce.as_ref(), record.pe.as_ref()])
                .flatten()
                .find_map(|leg| leg.underlying_value)
        });

        let mut rows = Vec::with_capacity(data.len() * 2);
        for record in &data {
            let strike = record.strike_price.round() as i64;
            if let Some(leg) = &record.ce {
                rows.push(leg.to_row(OptionSide::Call, strike));
            }
            if let Some(leg) = &record.pe {
                rows.push(leg.to_row(OptionSide::Put, strike));
            }
        }

        Ok(ChainSnapshot::new(rows, underlying)?)
    }
}
