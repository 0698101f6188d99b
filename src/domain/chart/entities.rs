use super::services::ticks_for_domain;
use super::value_objects::{Viewport, ViewportLimits, ViewportMode};
use crate::domain::gex::{DerivedMetrics, Snapshot, StrikeSet};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_info};

/// What a new snapshot did to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotEffect {
    /// New strike set: domain rebuilt from extrema, user adjustment dropped
    Initialized,
    /// Same strike set: domain and ticks left as they were
    Preserved,
    /// No finite price available yet; waiting for a usable snapshot
    Deferred,
}

/// Owns the visible price range of the strike axis.
///
/// Every operation is total: inputs that would produce a non-finite or
/// inverted domain are ignored and the last valid domain is kept.
#[derive(Debug, Clone)]
pub struct ViewportController {
    mode: ViewportMode,
    viewport: Viewport,
    limits: ViewportLimits,
    tick_density: usize,
    series: Option<StrikeSet>,
}

impl ViewportController {
    pub fn new(limits: ViewportLimits, tick_density: usize) -> Self {
        Self {
            mode: ViewportMode::Uninitialized,
            viewport: Viewport::default(),
            limits,
            tick_density: tick_density.max(1),
            series: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn limits(&self) -> &ViewportLimits {
        &self.limits
    }

    pub fn tick_density(&self) -> usize {
        self.tick_density
    }

    pub fn is_initialized(&self) -> bool {
        self.mode != ViewportMode::Uninitialized
    }

    /// Domain becomes `[min_price - padding, max_price + padding]`, widened
    /// around its center when narrower than the configured floor.
    pub fn initialize(&mut self, min_price: f64, max_price: f64, padding: f64, tick_density: usize) -> bool {
        if !min_price.is_finite() || !max_price.is_finite() || !padding.is_finite() {
            return false;
        }

        let (low, high) = if min_price <= max_price { (min_price, max_price) } else { (max_price, min_price) };
        let padding = padding.abs();
        let (domain_min, domain_max) = self.floored(low - padding, high + padding);
        if !domain_min.is_finite() || !domain_max.is_finite() {
            return false;
        }

        self.tick_density = tick_density.max(1);
        self.apply(domain_min, domain_max);
        self.mode = ViewportMode::Tracking;

        log_info!(
            LogComponent::Domain("Viewport"),
            "initialized domain [{:.2}, {:.2}] with {} ticks",
            domain_min,
            domain_max,
            self.viewport.ticks.len()
        );
        true
    }

    /// Rebuild the domain only when the strike set changed since the last
    /// applied snapshot. Routine refreshes of the same series never move it.
    pub fn on_new_snapshot(&mut self, snapshot: &Snapshot, metrics: &DerivedMetrics) -> SnapshotEffect {
        let strikes = snapshot.strike_set();
        if self.is_initialized() && self.series.as_ref() == Some(&strikes) {
            log_debug!(LogComponent::Domain("Viewport"), "same series, domain preserved");
            return SnapshotEffect::Preserved;
        }

        let Some((min_price, max_price, padding)) = metrics.price_frame() else {
            log_debug!(LogComponent::Domain("Viewport"), "no finite price yet, initialization deferred");
            return SnapshotEffect::Deferred;
        };

        if self.initialize(min_price, max_price, padding, self.tick_density) {
            self.series = Some(strikes);
            SnapshotEffect::Initialized
        } else {
            SnapshotEffect::Deferred
        }
    }

    /// Center the domain on `center` with its range scaled by `factor`,
    /// never narrower than the floor.
    pub fn zoom(&mut self, center: f64, factor: f64) -> bool {
        if !self.is_initialized() || !center.is_finite() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }

        let new_range = (self.viewport.range() * factor).max(self.limits.min_range);
        let domain_min = center - new_range / 2.0;
        let domain_max = center + new_range / 2.0;
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_min >= domain_max {
            return false;
        }

        self.apply(domain_min, domain_max);
        self.mode = ViewportMode::UserAdjusted;
        true
    }

    /// Shift both bounds by `delta_price`; the range is unchanged.
    pub fn pan(&mut self, delta_price: f64) -> bool {
        let anchor = self.viewport.clone();
        self.pan_from(&anchor, delta_price)
    }

    /// Domain becomes `anchor` shifted by `delta_price`. Repeated calls with
    /// the same anchor do not accumulate.
    pub fn pan_from(&mut self, anchor: &Viewport, delta_price: f64) -> bool {
        if !self.is_initialized() || !delta_price.is_finite() {
            return false;
        }

        let domain_min = anchor.domain_min + delta_price;
        let domain_max = anchor.domain_max + delta_price;
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_min >= domain_max {
            return false;
        }

        self.apply(domain_min, domain_max);
        self.mode = ViewportMode::UserAdjusted;
        true
    }

    /// Recompute ticks for the current domain at a new density.
    pub fn set_tick_density(&mut self, tick_density: usize) {
        self.tick_density = tick_density.max(1);
        if self.is_initialized() {
            self.viewport.ticks = self.ticks_for(self.viewport.domain_min, self.viewport.domain_max);
        }
    }

    /// Forget the current series; the next snapshot initializes from scratch.
    pub fn reset(&mut self) {
        self.mode = ViewportMode::Uninitialized;
        self.series = None;
    }

    fn floored(&self, domain_min: f64, domain_max: f64) -> (f64, f64) {
        let range = domain_max - domain_min;
        if range >= self.limits.min_range {
            return (domain_min, domain_max);
        }
        let center = (domain_min + domain_max) / 2.0;
        let half = self.limits.min_range / 2.0;
        (center - half, center + half)
    }

    fn apply(&mut self, domain_min: f64, domain_max: f64) {
        self.viewport.ticks = self.ticks_for(domain_min, domain_max);
        self.viewport.domain_min = domain_min;
        self.viewport.domain_max = domain_max;
    }

    fn ticks_for(&self, domain_min: f64, domain_max: f64) -> Vec<f64> {
        ticks_for_domain(domain_min, domain_max, self.tick_density, self.limits.min_tick_step)
    }
}
