use crate::domain::errors::{FetchError, FetchResult};
use crate::domain::gex::{ReferenceLevels, Snapshot, StrikeRecord, Timestamp};
use serde::Deserialize;
use serde_json::Value;

/// One strike row of the `/gex` payload
#[derive(Debug, Clone, Deserialize)]
pub struct StrikeRecordDto {
    pub strike: f64,
    #[serde(default)]
    pub call_gex: f64,
    #[serde(default)]
    pub put_gex: f64,
    pub call_oi: Option<f64>,
    pub put_oi: Option<f64>,
    pub call_volume: Option<f64>,
    pub put_volume: Option<f64>,
}

impl StrikeRecordDto {
    pub fn to_domain(&self) -> StrikeRecord {
        StrikeRecord {
            strike: self.strike,
            call_gex: self.call_gex,
            put_gex: self.put_gex,
            call_oi: self.call_oi,
            put_oi: self.put_oi,
            call_volume: self.call_volume,
            put_volume: self.put_volume,
        }
    }
}

/// Body of `GET /gex?currency=XXX`. Totals the provider also sends are
/// ignored; they are recomputed from the records.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDto {
    #[serde(default)]
    pub data: Vec<StrikeRecordDto>,
    pub spot_price: Option<f64>,
    pub zero_gamma: Option<f64>,
    pub call_wall: Option<f64>,
    pub put_wall: Option<f64>,
    pub expiration_date: Option<String>,
    pub last_update_time: Option<Value>,
}

impl SnapshotDto {
    /// `fallback_time` stamps payloads without a usable `last_update_time`.
    pub fn to_domain(&self, fallback_time: u64) -> Snapshot {
        let levels = ReferenceLevels {
            spot_price: self.spot_price,
            zero_gamma: self.zero_gamma,
            call_wall: self.call_wall,
            put_wall: self.put_wall,
        };
        let time = self
            .last_update_time
            .as_ref()
            .and_then(parse_update_time)
            .unwrap_or(fallback_time);

        let snapshot = Snapshot::new(
            self.data.iter().map(StrikeRecordDto::to_domain).collect(),
            levels,
            Timestamp::from_millis(time),
        );
        match &self.expiration_date {
            Some(date) => snapshot.with_expiration(date.clone()),
            None => snapshot,
        }
    }
}

/// Epoch milliseconds, given as a JSON number or a numeric string
fn parse_update_time(value: &Value) -> Option<u64> {
    let millis = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (millis.is_finite() && millis >= 0.0).then_some(millis as u64)
}

/// Decode a provider body. `{"error": "..."}` is reported as a provider
/// failure rather than an empty snapshot.
pub fn parse_snapshot(body: &str, fallback_time: u64) -> FetchResult<Snapshot> {
    let value: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(error) = value.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FetchError::Provider(message));
    }

    let dto: SnapshotDto = serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(dto.to_domain(fallback_time))
}
