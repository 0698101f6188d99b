use gex_chart_wasm::domain::gex::{
    DEFAULT_PADDING, GexAnalysisService, ReferenceLevels, Snapshot, StrikeRecord, Timestamp,
};
use quickcheck_macros::quickcheck;

fn snapshot(records: Vec<StrikeRecord>, levels: ReferenceLevels) -> Snapshot {
    Snapshot::new(records, levels, Timestamp::from_millis(0))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn two_strikes_without_levels() {
    let snap = snapshot(
        vec![StrikeRecord::new(100.0, 5.0, -3.0), StrikeRecord::new(110.0, 2.0, -1.0)],
        ReferenceLevels::default(),
    );
    let m = GexAnalysisService::default().derive(&snap);

    assert_eq!(m.min_price, Some(100.0));
    assert_eq!(m.max_price, Some(110.0));
    assert!(approx(m.padding.unwrap(), 1.0));
    assert!(approx(m.net_gex, 3.0));
    assert!(approx(m.total_call_gex, 7.0));
    assert!(approx(m.total_put_gex, -4.0));
    assert_eq!(m.strike_count, 2);
}

#[test]
fn single_strike_uses_default_padding() {
    let snap = snapshot(vec![StrikeRecord::new(100.0, 0.0, 0.0)], ReferenceLevels::default());
    let m = GexAnalysisService::default().derive(&snap);

    assert_eq!(m.padding, Some(DEFAULT_PADDING));
    let (min, max, padding) = m.price_frame().unwrap();
    assert_eq!((max + padding) - (min - padding), 2.0 * DEFAULT_PADDING);
}

#[test]
fn reference_levels_widen_the_extrema() {
    let levels = ReferenceLevels {
        spot_price: Some(95.0),
        zero_gamma: None,
        call_wall: Some(130.0),
        put_wall: Some(f64::NAN),
    };
    let snap = snapshot(vec![StrikeRecord::new(100.0, 1.0, -1.0), StrikeRecord::new(120.0, 1.0, -1.0)], levels);
    let m = GexAnalysisService::default().derive(&snap);

    assert_eq!(m.min_price, Some(95.0));
    assert_eq!(m.max_price, Some(130.0));
    assert_eq!(m.spot_label, "95.00");
    assert_eq!(m.zero_gamma_label, "N/A");
    assert_eq!(m.put_wall_label, "N/A");
}

#[test]
fn empty_snapshot_has_no_price_frame() {
    let m = GexAnalysisService::default().derive(&snapshot(Vec::new(), ReferenceLevels::default()));
    assert_eq!(m.min_price, None);
    assert_eq!(m.padding, None);
    assert!(m.price_frame().is_none());
    assert_eq!(m.net_gex, 0.0);
}

#[test]
fn open_interest_and_walls() {
    let snap = snapshot(
        vec![
            StrikeRecord::new(90.0, 1.0, -4.0).with_open_interest(10.0, 30.0),
            StrikeRecord::new(100.0, 6.0, 0.0).with_open_interest(20.0, 0.0),
            StrikeRecord::new(110.0, 2.0, -1.0).with_open_interest(10.0, 10.0).with_volume(3.0, 1.0),
        ],
        ReferenceLevels::default(),
    );
    let m = GexAnalysisService::default().derive(&snap);

    assert_eq!(m.total_call_oi, 40.0);
    assert_eq!(m.total_put_oi, 40.0);
    assert_eq!(m.put_call_oi_ratio, Some(1.0));
    assert_eq!(m.total_call_volume, 3.0);
    assert_eq!(m.total_put_volume, 1.0);
    assert_eq!(m.largest_call_strike, Some(100.0));
    assert_eq!(m.largest_put_strike, Some(90.0));
}

#[test]
fn unsorted_records_still_find_the_flip() {
    let levels = ReferenceLevels { spot_price: Some(104.0), ..ReferenceLevels::default() };
    let snap = snapshot(
        vec![StrikeRecord::new(110.0, 0.0, -2.0), StrikeRecord::new(100.0, 2.0, 0.0)],
        levels,
    );
    let m = GexAnalysisService::default().derive(&snap);
    assert_eq!(m.flip_strike, Some(105.0));
}

#[quickcheck]
fn derivation_is_idempotent(rows: Vec<(i16, i16, i16)>, spot: Option<i16>) -> bool {
    let records = rows
        .into_iter()
        .map(|(s, c, p)| StrikeRecord::new(s as f64, c as f64, -(p as f64).abs()))
        .collect();
    let levels = ReferenceLevels { spot_price: spot.map(f64::from), ..ReferenceLevels::default() };
    let snap = snapshot(records, levels);
    let service = GexAnalysisService::default();
    service.derive(&snap) == service.derive(&snap)
}

#[quickcheck]
fn net_is_sum_of_call_and_put(rows: Vec<(i16, i16, i16)>) -> bool {
    let records: Vec<StrikeRecord> = rows
        .into_iter()
        .map(|(s, c, p)| StrikeRecord::new(s as f64, c as f64, p as f64))
        .collect();
    let m = GexAnalysisService::default().derive(&snapshot(records, ReferenceLevels::default()));
    approx(m.net_gex, m.total_call_gex + m.total_put_gex)
}
