#![cfg(target_arch = "wasm32")]
use gex_chart_wasm::presentation::GexChartApi;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const BODY: &str = r#"{"data": [{"strike": 1000, "call_gex": 2, "put_gex": -1},
                                 {"strike": 2000, "call_gex": 1, "put_gex": -3}],
                       "spot_price": 1500, "last_update_time": 0}"#;

fn domain(json: &str) -> (f64, f64) {
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    (value["domain"][0].as_f64().unwrap(), value["domain"][1].as_f64().unwrap())
}

#[wasm_bindgen_test]
fn ingest_then_drag() {
    let api = GexChartApi::new(Some(r#"{"chart_height_px": 500}"#.to_string()), false).unwrap();
    let json = api.ingest_json(BODY).unwrap();
    assert_eq!(domain(&json), (900.0, 2100.0));

    api.pointer_down(100.0, 0).unwrap();
    let json = api.pointer_move(150.0).unwrap();
    assert_eq!(domain(&json), (1020.0, 2220.0));
    api.pointer_up().unwrap();
}

#[wasm_bindgen_test]
fn touch_surface_ignores_wheel() {
    let api = GexChartApi::new(None, true).unwrap();
    let before = api.ingest_json(BODY).unwrap();
    let after = api.wheel(-100.0).unwrap();
    assert_eq!(domain(&before), domain(&after));
}

#[wasm_bindgen_test]
fn unknown_currency_is_rejected() {
    let api = GexChartApi::new(None, false).unwrap();
    assert!(api.select_currency("DOGE").is_err());
    assert!(api.select_currency("eth").is_ok());
}
