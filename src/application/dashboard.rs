use crate::config::DashboardConfig;
use crate::domain::{
    chart::{DeviceClass, GestureRouter, PointerInput, SnapshotEffect, Viewport, ViewportController, ViewportMode},
    errors::{FetchError, FetchResult},
    gex::{Currency, DerivedMetrics, GexAnalysisService, ReferenceLevels, Snapshot, StrikeRecord},
    logging::LogComponent,
};
use crate::time_utils::format_utc_time;
use crate::{log_debug, log_info, log_warn};
use derive_more::Display;
use serde::Serialize;

/// Coarse state shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    #[display(fmt = "loading")]
    Loading,
    #[display(fmt = "error")]
    Error,
    #[display(fmt = "ready")]
    Ready,
}

/// Identity of one issued poll. Only the most recently issued ticket may
/// change state when its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTicket {
    seq: u64,
    currency: Currency,
}

impl PollTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// What a completed poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Applied(SnapshotEffect),
    /// Provider answered with zero records; previous snapshot kept
    EmptyRetained,
    /// Transport or provider failure; previous snapshot kept
    Failed,
    /// Superseded by a newer poll or a currency switch; ignored
    Stale,
}

/// Read-only view handed to the presentation surface after every transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjection {
    pub currency: Currency,
    pub records: Vec<StrikeRecord>,
    pub domain: (f64, f64),
    pub ticks: Vec<f64>,
    pub reference_levels: ReferenceLevels,
    pub derived_metrics: Option<DerivedMetrics>,
    pub status: LoadStatus,
    pub error: Option<String>,
    pub no_data: bool,
    pub expiration_date: Option<String>,
    pub last_update_label: Option<String>,
    pub viewport_mode: ViewportMode,
    pub device_class: DeviceClass,
    pub is_dragging: bool,
}

/// Process-wide chart state: current snapshot, derived metrics, viewport
/// and gesture routing. Every method runs to completion synchronously.
#[derive(Debug, Clone)]
pub struct DashboardState {
    currency: Currency,
    snapshot: Option<Snapshot>,
    metrics: Option<DerivedMetrics>,
    analysis: GexAnalysisService,
    viewport: ViewportController,
    gestures: GestureRouter,
    status: LoadStatus,
    error: Option<FetchError>,
    no_data: bool,
    last_issued: u64,
}

impl DashboardState {
    pub fn new(config: &DashboardConfig, device_class: DeviceClass) -> Self {
        let limits = config.viewport;
        Self {
            currency: Currency::default(),
            snapshot: None,
            metrics: None,
            analysis: GexAnalysisService::new(limits.padding_ratio, limits.default_padding),
            viewport: ViewportController::new(limits, config.tick_density_for(device_class)),
            gestures: GestureRouter::with_factors(device_class, config.zoom_in_factor, config.zoom_out_factor),
            status: LoadStatus::Loading,
            error: None,
            no_data: false,
            last_issued: 0,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn metrics(&self) -> Option<&DerivedMetrics> {
        self.metrics.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        self.viewport.viewport()
    }

    pub fn viewport_controller(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn gestures(&self) -> &GestureRouter {
        &self.gestures
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn no_data(&self) -> bool {
        self.no_data
    }

    /// Register a new poll for the current currency. Any poll issued earlier
    /// becomes stale. Status turns Loading only while nothing has been shown
    /// yet; a background refresh keeps Ready or Error visible.
    pub fn begin_poll(&mut self) -> PollTicket {
        self.last_issued += 1;
        if self.snapshot.is_none() {
            self.status = LoadStatus::Loading;
        }
        let ticket = PollTicket { seq: self.last_issued, currency: self.currency };
        log_debug!(
            LogComponent::Application("Dashboard"),
            "poll #{} issued for {}",
            ticket.seq,
            ticket.currency
        );
        ticket
    }

    pub fn is_current(&self, ticket: &PollTicket) -> bool {
        ticket.seq == self.last_issued && ticket.currency == self.currency
    }

    /// Apply the response of `ticket` unless a newer poll has been issued.
    pub fn complete_poll(&mut self, ticket: PollTicket, result: FetchResult<Snapshot>) -> PollOutcome {
        if !self.is_current(&ticket) {
            log_debug!(
                LogComponent::Application("Dashboard"),
                "poll #{} ({}) superseded by #{}, response discarded",
                ticket.seq,
                ticket.currency,
                self.last_issued
            );
            return PollOutcome::Stale;
        }

        match result {
            Ok(snapshot) if snapshot.is_empty() => {
                self.status = LoadStatus::Ready;
                self.error = None;
                self.no_data = true;
                log_warn!(
                    LogComponent::Application("Dashboard"),
                    "{} returned no records, keeping previous snapshot",
                    ticket.currency
                );
                PollOutcome::EmptyRetained
            }
            Ok(snapshot) => PollOutcome::Applied(self.apply_snapshot(snapshot)),
            Err(e) => {
                log_warn!(LogComponent::Application("Dashboard"), "poll #{} failed: {}", ticket.seq, e);
                self.status = LoadStatus::Error;
                self.error = Some(e);
                PollOutcome::Failed
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) -> SnapshotEffect {
        let metrics = self.analysis.derive(&snapshot);
        let effect = self.viewport.on_new_snapshot(&snapshot, &metrics);
        if effect == SnapshotEffect::Initialized {
            // an open drag is anchored to the previous series
            self.gestures.cancel();
        }

        log_info!(
            LogComponent::Application("Dashboard"),
            "applied {} records for {} (net GEX {:.2}, viewport {:?})",
            snapshot.records.len(),
            self.currency,
            metrics.net_gex,
            effect
        );

        self.snapshot = Some(snapshot);
        self.metrics = Some(metrics);
        self.status = LoadStatus::Ready;
        self.error = None;
        self.no_data = false;
        effect
    }

    /// Switch series. Returns `false` when `currency` is already selected;
    /// otherwise the caller should issue a fresh poll.
    pub fn select_currency(&mut self, currency: Currency) -> bool {
        if currency == self.currency {
            return false;
        }

        log_info!(LogComponent::Application("Dashboard"), "currency {} -> {}", self.currency, currency);
        self.currency = currency;
        // invalidate whatever is still in flight for the old series
        self.last_issued += 1;
        self.snapshot = None;
        self.metrics = None;
        self.viewport.reset();
        self.gestures.cancel();
        self.status = LoadStatus::Loading;
        self.error = None;
        self.no_data = false;
        true
    }

    /// Route one pointer event. Returns whether the viewport changed.
    pub fn handle_input(&mut self, input: PointerInput) -> bool {
        self.gestures.handle(input, &mut self.viewport)
    }

    /// Reclassify the surface, e.g. after a resize crosses the touch threshold.
    pub fn reclassify_surface(&mut self, config: &DashboardConfig, device_class: DeviceClass) {
        if device_class == self.gestures.device_class() {
            return;
        }
        self.gestures = GestureRouter::with_factors(device_class, config.zoom_in_factor, config.zoom_out_factor);
        self.viewport.set_tick_density(config.tick_density_for(device_class));
    }

    pub fn projection(&self) -> ChartProjection {
        let viewport = self.viewport.viewport();
        let snapshot = self.snapshot.as_ref();
        ChartProjection {
            currency: self.currency,
            records: snapshot.map(Snapshot::sorted_records).unwrap_or_default(),
            domain: (viewport.domain_min, viewport.domain_max),
            ticks: viewport.ticks.clone(),
            reference_levels: snapshot.map(|s| s.levels).unwrap_or_default(),
            derived_metrics: self.metrics.clone(),
            status: self.status,
            error: self.error.as_ref().map(ToString::to_string),
            no_data: self.no_data,
            expiration_date: snapshot.and_then(|s| s.expiration_date.clone()),
            last_update_label: snapshot.map(|s| format_utc_time(s.last_update_time.value())),
            viewport_mode: self.viewport.mode(),
            device_class: self.gestures.device_class(),
            is_dragging: self.gestures.is_dragging(),
        }
    }
}
