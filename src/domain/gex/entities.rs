pub use super::value_objects::{ReferenceLevels, Timestamp};
use serde::{Deserialize, Serialize};

/// Domain entity - gamma exposure aggregated at one strike
///
/// `put_gex` arrives already signed (negative for dealer-short puts); nothing
/// in the domain re-signs it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeRecord {
    pub strike: f64,
    pub call_gex: f64,
    pub put_gex: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_oi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_oi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put_volume: Option<f64>,
}

impl StrikeRecord {
    pub fn new(strike: f64, call_gex: f64, put_gex: f64) -> Self {
        Self {
            strike,
            call_gex,
            put_gex,
            call_oi: None,
            put_oi: None,
            call_volume: None,
            put_volume: None,
        }
    }

    pub fn with_open_interest(mut self, call_oi: f64, put_oi: f64) -> Self {
        self.call_oi = Some(call_oi);
        self.put_oi = Some(put_oi);
        self
    }

    pub fn with_volume(mut self, call_volume: f64, put_volume: f64) -> Self {
        self.call_volume = Some(call_volume);
        self.put_volume = Some(put_volume);
        self
    }

    pub fn net_gex(&self) -> f64 {
        self.call_gex + self.put_gex
    }
}

/// Domain entity - one internally consistent sample from the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<StrikeRecord>,
    pub levels: ReferenceLevels,
    pub expiration_date: Option<String>,
    pub last_update_time: Timestamp,
}

impl Snapshot {
    pub fn new(records: Vec<StrikeRecord>, levels: ReferenceLevels, last_update_time: Timestamp) -> Self {
        Self { records, levels, expiration_date: None, last_update_time }
    }

    pub fn with_expiration(mut self, expiration_date: impl Into<String>) -> Self {
        self.expiration_date = Some(expiration_date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn strike_set(&self) -> StrikeSet {
        StrikeSet::from_records(&self.records)
    }

    /// Records ordered by ascending strike, whatever order the provider used
    pub fn sorted_records(&self) -> Vec<StrikeRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| a.strike.total_cmp(&b.strike));
        records
    }
}

/// Identity of a series: the distinct strikes it covers, order ignored
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StrikeSet(Vec<u64>);

impl StrikeSet {
    pub fn from_records(records: &[StrikeRecord]) -> Self {
        let mut strikes: Vec<f64> = records.iter().map(|r| r.strike).collect();
        strikes.sort_by(f64::total_cmp);
        let mut bits: Vec<u64> = strikes
            .into_iter()
            // -0.0 and 0.0 are the same strike
            .map(|s| if s == 0.0 { 0.0f64.to_bits() } else { s.to_bits() })
            .collect();
        bits.dedup();
        Self(bits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
