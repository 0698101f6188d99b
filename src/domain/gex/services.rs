use super::entities::{Snapshot, StrikeRecord};
use serde::Serialize;

/// Padding used when every known price collapses onto a single value
pub const DEFAULT_PADDING: f64 = 1000.0;

/// Share of the price span added above and below the extrema
pub const PADDING_RATIO: f64 = 0.1;

/// Aggregate figures shown beside the chart. Recomputed from every snapshot,
/// never stored on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub padding: Option<f64>,
    pub net_gex: f64,
    pub total_call_gex: f64,
    pub total_put_gex: f64,
    pub strike_count: usize,
    pub total_call_oi: f64,
    pub total_put_oi: f64,
    pub put_call_oi_ratio: Option<f64>,
    pub total_call_volume: f64,
    pub total_put_volume: f64,
    pub largest_call_strike: Option<f64>,
    pub largest_put_strike: Option<f64>,
    pub flip_strike: Option<f64>,
    pub spot_label: String,
    pub zero_gamma_label: String,
    pub call_wall_label: String,
    pub put_wall_label: String,
}

impl DerivedMetrics {
    /// `(min_price, max_price, padding)` once at least one finite price exists
    pub fn price_frame(&self) -> Option<(f64, f64, f64)> {
        match (self.min_price, self.max_price, self.padding) {
            (Some(min), Some(max), Some(padding)) => Some((min, max, padding)),
            _ => None,
        }
    }
}

/// Domain service turning a raw snapshot into panel figures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GexAnalysisService {
    padding_ratio: f64,
    default_padding: f64,
}

impl Default for GexAnalysisService {
    fn default() -> Self {
        Self::new(PADDING_RATIO, DEFAULT_PADDING)
    }
}

impl GexAnalysisService {
    pub fn new(padding_ratio: f64, default_padding: f64) -> Self {
        Self { padding_ratio, default_padding }
    }

    /// Pure and deterministic: the same snapshot always yields the same metrics.
    pub fn derive(&self, snapshot: &Snapshot) -> DerivedMetrics {
        let records = &snapshot.records;
        let levels = &snapshot.levels;

        let (min_price, max_price) = self.price_extrema(snapshot);
        let padding = match (min_price, max_price) {
            (Some(min), Some(max)) => Some(self.padding_for(min, max)),
            _ => None,
        };

        let total_call_gex = finite_sum(records.iter().map(|r| r.call_gex));
        let total_put_gex = finite_sum(records.iter().map(|r| r.put_gex));
        let total_call_oi = finite_sum(records.iter().filter_map(|r| r.call_oi));
        let total_put_oi = finite_sum(records.iter().filter_map(|r| r.put_oi));

        let put_call_oi_ratio = if total_call_oi > 0.0 {
            Some(total_put_oi / total_call_oi)
        } else {
            None
        };

        DerivedMetrics {
            min_price,
            max_price,
            padding,
            net_gex: total_call_gex + total_put_gex,
            total_call_gex,
            total_put_gex,
            strike_count: snapshot.strike_set().len(),
            total_call_oi,
            total_put_oi,
            put_call_oi_ratio,
            total_call_volume: finite_sum(records.iter().filter_map(|r| r.call_volume)),
            total_put_volume: finite_sum(records.iter().filter_map(|r| r.put_volume)),
            largest_call_strike: largest_call_strike(records),
            largest_put_strike: largest_put_strike(records),
            flip_strike: flip_strike(&snapshot.sorted_records(), levels.spot_price),
            spot_label: format_level(levels.spot_price),
            zero_gamma_label: format_level(levels.zero_gamma),
            call_wall_label: format_level(levels.call_wall),
            put_wall_label: format_level(levels.put_wall),
        }
    }

    /// Min/max over every strike plus every defined reference level.
    pub fn price_extrema(&self, snapshot: &Snapshot) -> (Option<f64>, Option<f64>) {
        snapshot
            .records
            .iter()
            .map(|r| r.strike)
            .chain(snapshot.levels.defined())
            .filter(|p| p.is_finite())
            .fold((None, None), |(min, max): (Option<f64>, Option<f64>), p| {
                (
                    Some(min.map_or(p, |m| m.min(p))),
                    Some(max.map_or(p, |m| m.max(p))),
                )
            })
    }

    pub fn padding_for(&self, min_price: f64, max_price: f64) -> f64 {
        let span = max_price - min_price;
        if span > 0.0 {
            span * self.padding_ratio
        } else {
            self.default_padding
        }
    }
}

fn finite_sum(values: impl Iterator<Item = f64>) -> f64 {
    values.filter(|v| v.is_finite()).sum()
}

fn largest_call_strike(records: &[StrikeRecord]) -> Option<f64> {
    records
        .iter()
        .filter(|r| r.call_gex.is_finite() && r.strike.is_finite())
        .max_by(|a, b| a.call_gex.total_cmp(&b.call_gex))
        .map(|r| r.strike)
}

fn largest_put_strike(records: &[StrikeRecord]) -> Option<f64> {
    records
        .iter()
        .filter(|r| r.put_gex.is_finite() && r.put_gex != 0.0 && r.strike.is_finite())
        .min_by(|a, b| a.put_gex.total_cmp(&b.put_gex))
        .map(|r| r.strike)
}

/// Linear interpolation of the per-strike net exposure crossing zero.
///
/// Expects records sorted by strike. When several sign changes exist the one
/// whose lower strike sits closest to spot wins; without spot, the lowest.
pub fn flip_strike(sorted: &[StrikeRecord], spot_price: Option<f64>) -> Option<f64> {
    let points: Vec<(f64, f64)> = sorted
        .iter()
        .map(|r| (r.strike, r.net_gex()))
        .filter(|(s, g)| s.is_finite() && g.is_finite())
        .collect();

    let crossing = points
        .windows(2)
        .filter(|w| sign(w[0].1) != sign(w[1].1))
        .min_by(|a, b| {
            let distance = |w: &&[(f64, f64)]| match spot_price {
                Some(spot) if spot.is_finite() => (w[0].0 - spot).abs(),
                _ => 0.0,
            };
            distance(a).total_cmp(&distance(b))
        })?;

    let (x1, y1) = crossing[0];
    let (x2, y2) = crossing[1];
    if y2 == y1 {
        return None;
    }
    Some(x1 - y1 * (x2 - x1) / (y2 - y1))
}

fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Panel text for an optional level
pub fn format_level(level: Option<f64>) -> String {
    match level {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "N/A".to_string(),
    }
}
