use gex_chart_wasm::application::{DashboardState, LoadStatus, PollOutcome};
use gex_chart_wasm::config::DashboardConfig;
use gex_chart_wasm::domain::chart::{DeviceClass, PointerInput, SnapshotEffect, ViewportMode};
use gex_chart_wasm::domain::errors::FetchError;
use gex_chart_wasm::domain::gex::{Currency, ReferenceLevels, Snapshot, StrikeRecord, Timestamp};

fn snapshot(strikes: &[f64], at: u64) -> Snapshot {
    let records = strikes.iter().map(|&s| StrikeRecord::new(s, 1.0, -0.5)).collect();
    Snapshot::new(records, ReferenceLevels::default(), Timestamp::from_millis(at))
}

fn empty(at: u64) -> Snapshot {
    Snapshot::new(Vec::new(), ReferenceLevels::default(), Timestamp::from_millis(at))
}

fn state() -> DashboardState {
    DashboardState::new(&DashboardConfig::default(), DeviceClass::Mouse)
}

#[test]
fn starts_loading_with_nothing_to_show() {
    let s = state();
    assert_eq!(s.status(), LoadStatus::Loading);
    assert_eq!(s.currency(), Currency::BTC);
    let p = s.projection();
    assert!(p.records.is_empty());
    assert!(p.derived_metrics.is_none());
    assert_eq!(p.viewport_mode, ViewportMode::Uninitialized);
}

#[test]
fn later_poll_wins_when_it_resolves_first() {
    let mut s = state();
    let p1 = s.begin_poll();
    let p2 = s.begin_poll();

    let second = s.complete_poll(p2, Ok(snapshot(&[200.0, 300.0], 2)));
    let first = s.complete_poll(p1, Ok(snapshot(&[100.0, 110.0], 1)));

    assert_eq!(second, PollOutcome::Applied(SnapshotEffect::Initialized));
    assert_eq!(first, PollOutcome::Stale);
    assert_eq!(s.snapshot().map(|snap| snap.last_update_time.value()), Some(2));
    assert_eq!(s.status(), LoadStatus::Ready);
}

#[test]
fn response_for_previous_currency_is_discarded() {
    let mut s = state();
    let btc = s.begin_poll();
    assert!(s.select_currency(Currency::ETH));
    let eth = s.begin_poll();

    assert_eq!(s.complete_poll(eth, Ok(snapshot(&[3_000.0, 3_100.0], 2))), PollOutcome::Applied(SnapshotEffect::Initialized));
    assert_eq!(s.complete_poll(btc, Ok(snapshot(&[60_000.0, 70_000.0], 1))), PollOutcome::Stale);
    assert_eq!(s.projection().records.first().map(|r| r.strike), Some(3_000.0));
    assert_eq!(eth.currency(), Currency::ETH);
}

#[test]
fn in_flight_poll_is_invalidated_by_a_switch_even_without_a_new_poll() {
    let mut s = state();
    let btc = s.begin_poll();
    s.select_currency(Currency::SOL);
    assert!(!s.is_current(&btc));
    assert_eq!(s.complete_poll(btc, Ok(snapshot(&[1.0, 2.0], 1))), PollOutcome::Stale);
    assert!(s.snapshot().is_none());
}

#[test]
fn empty_response_keeps_previous_snapshot() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));

    let t = s.begin_poll();
    assert_eq!(s.complete_poll(t, Ok(empty(2))), PollOutcome::EmptyRetained);

    assert_eq!(s.snapshot().map(|snap| snap.records.len()), Some(2));
    assert!(s.no_data());
    assert_eq!(s.status(), LoadStatus::Ready);

    // next good snapshot clears the flag
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 3)));
    assert!(!s.no_data());
}

#[test]
fn empty_first_response_shows_no_data() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(empty(1)));
    let p = s.projection();
    assert!(p.no_data);
    assert!(p.records.is_empty());
    assert_eq!(p.viewport_mode, ViewportMode::Uninitialized);
}

#[test]
fn error_keeps_snapshot_and_reports() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));

    let t = s.begin_poll();
    let outcome = s.complete_poll(t, Err(FetchError::Network("offline".to_string())));

    assert_eq!(outcome, PollOutcome::Failed);
    assert_eq!(s.status(), LoadStatus::Error);
    assert!(s.snapshot().is_some());
    let p = s.projection();
    assert_eq!(p.error.as_deref(), Some("Network Error: offline"));
    assert_eq!(p.records.len(), 2);
}

#[test]
fn background_poll_keeps_error_visible() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));
    let t = s.begin_poll();
    s.complete_poll(t, Err(FetchError::Network("offline".to_string())));

    let retry = s.begin_poll();
    assert_eq!(s.status(), LoadStatus::Error);
    assert_eq!(s.projection().error.as_deref(), Some("Network Error: offline"));

    s.complete_poll(retry, Ok(snapshot(&[100.0, 200.0], 2)));
    assert_eq!(s.status(), LoadStatus::Ready);
    assert!(s.projection().error.is_none());
}

#[test]
fn background_poll_keeps_ready_status() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));

    s.begin_poll();
    assert_eq!(s.status(), LoadStatus::Ready);
    assert_eq!(s.projection().records.len(), 2);
}

#[test]
fn first_poll_after_a_switch_shows_loading() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));
    s.select_currency(Currency::SOL);

    s.begin_poll();
    assert_eq!(s.status(), LoadStatus::Loading);
}

#[test]
fn switching_currency_resets_everything() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[60_000.0, 70_000.0], 1)));
    s.handle_input(PointerInput::Wheel { delta_y: -1.0 });
    s.handle_input(PointerInput::MouseDown { coordinate: 5.0 });
    assert!(s.gestures().is_dragging());

    assert!(s.select_currency(Currency::ETH));
    assert!(!s.select_currency(Currency::ETH));

    assert!(s.snapshot().is_none());
    assert!(s.metrics().is_none());
    assert!(!s.gestures().is_dragging());
    assert!(!s.viewport_controller().is_initialized());
    assert_eq!(s.status(), LoadStatus::Loading);
}

#[test]
fn refresh_with_same_strikes_preserves_zoom() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[60_000.0, 65_000.0, 70_000.0], 1)));
    s.handle_input(PointerInput::Wheel { delta_y: -1.0 });
    let zoomed = s.viewport().clone();

    let t = s.begin_poll();
    let outcome = s.complete_poll(t, Ok(snapshot(&[60_000.0, 65_000.0, 70_000.0], 2)));

    assert_eq!(outcome, PollOutcome::Applied(SnapshotEffect::Preserved));
    assert_eq!(s.viewport(), &zoomed);
    assert_eq!(s.projection().viewport_mode, ViewportMode::UserAdjusted);
}

#[test]
fn new_series_cancels_open_drag() {
    let mut s = state();
    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0], 1)));
    s.handle_input(PointerInput::MouseDown { coordinate: 0.0 });
    assert!(s.projection().is_dragging);

    let t = s.begin_poll();
    s.complete_poll(t, Ok(snapshot(&[100.0, 200.0, 300.0], 2)));
    assert!(!s.projection().is_dragging);
}

#[test]
fn projection_carries_sorted_records_and_labels() {
    let mut s = state();
    let t = s.begin_poll();
    let snap = Snapshot::new(
        vec![StrikeRecord::new(300.0, 1.0, 0.0), StrikeRecord::new(100.0, 2.0, 0.0)],
        ReferenceLevels { spot_price: Some(250.0), ..ReferenceLevels::default() },
        Timestamp::from_millis(1_704_116_730_250),
    )
    .with_expiration("2024-01-02");
    s.complete_poll(t, Ok(snap));

    let p = s.projection();
    let strikes: Vec<f64> = p.records.iter().map(|r| r.strike).collect();
    assert_eq!(strikes, vec![100.0, 300.0]);
    assert_eq!(p.expiration_date.as_deref(), Some("2024-01-02"));
    assert_eq!(p.last_update_label.as_deref(), Some("13:45:30 UTC"));
    assert_eq!(p.reference_levels.spot_price, Some(250.0));
    assert_eq!(p.derived_metrics.map(|m| m.spot_label), Some("250.00".to_string()));
    assert_eq!(p.domain, (80.0, 320.0));
}

#[test]
fn touch_surface_uses_sparser_ticks() {
    let config = DashboardConfig::default();
    let mut s = state();
    s.reclassify_surface(&config, DeviceClass::Touch);
    assert_eq!(s.gestures().device_class(), DeviceClass::Touch);
    assert_eq!(s.viewport_controller().tick_density(), config.tick_density_touch);
}
