use gex_chart_wasm::domain::errors::FetchError;
use gex_chart_wasm::infrastructure::dto::parse_snapshot;

const BODY: &str = r#"{
    "data": [
        {"strike": 65000, "call_gex": 12.5, "put_gex": -3.0, "open_interest": 40, "volume": 7,
         "call_oi": 30, "put_oi": 10, "call_volume": 5, "put_volume": 2},
        {"strike": 60000, "call_gex": 1.0, "put_gex": -9.5}
    ],
    "expiration_date": "2024-06-28",
    "spot_price": 63250.5,
    "zero_gamma": 61800.0,
    "call_wall": 65000.0,
    "put_wall": null,
    "total_oi_call_gex": 13.5,
    "last_update_time": 1719561600000
}"#;

#[test]
fn provider_payload_maps_to_snapshot() {
    let snap = parse_snapshot(BODY, 7).unwrap();

    assert_eq!(snap.records.len(), 2);
    assert_eq!(snap.records[0].strike, 65_000.0);
    assert_eq!(snap.records[0].call_oi, Some(30.0));
    assert_eq!(snap.records[1].call_volume, None);
    assert_eq!(snap.levels.spot_price, Some(63_250.5));
    assert_eq!(snap.levels.put_wall, None);
    assert_eq!(snap.expiration_date.as_deref(), Some("2024-06-28"));
    assert_eq!(snap.last_update_time.value(), 1_719_561_600_000);
}

#[test]
fn missing_update_time_uses_fallback() {
    let snap = parse_snapshot(r#"{"data": [], "zero_gamma": null}"#, 42).unwrap();
    assert!(snap.is_empty());
    assert_eq!(snap.last_update_time.value(), 42);
    assert_eq!(snap.expiration_date, None);
}

#[test]
fn error_body_is_a_provider_failure() {
    let err = parse_snapshot(r#"{"error": "Deribit unavailable"}"#, 0).unwrap_err();
    assert_eq!(err, FetchError::Provider("Deribit unavailable".to_string()));
    assert!(err.is_transient());
}

#[test]
fn garbage_is_a_decode_failure() {
    assert!(matches!(parse_snapshot("<html>", 0), Err(FetchError::Decode(_))));
    assert!(matches!(parse_snapshot(r#"{"data": [{"call_gex": 1}]}"#, 0), Err(FetchError::Decode(_))));
    assert!(!FetchError::Decode(String::new()).is_transient());
}

#[test]
fn error_messages() {
    insta::assert_snapshot!(
        FetchError::Http { status: 503, message: "Service Unavailable".to_string() },
        @"HTTP Error 503: Service Unavailable"
    );
    insta::assert_snapshot!(FetchError::Provider("rate limited".to_string()), @"Provider Error: rate limited");
}
