use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{ChartProjection, DashboardState, PollOutcome, PollSnapshotsUseCase};
use crate::config::DashboardConfig;
use crate::domain::{
    chart::{DeviceClass, PointerInput},
    gex::Currency,
    logging::{LogComponent, get_logger, get_time_provider},
};
use crate::infrastructure::{GexHttpClient, dto::parse_snapshot};

/// Chart core for hosts that render on their own. Every call returns or
/// resolves to the current projection as JSON.
#[wasm_bindgen]
pub struct GexChartApi {
    config: DashboardConfig,
    dashboard: PollSnapshotsUseCase<GexHttpClient>,
}

#[wasm_bindgen]
impl GexChartApi {
    /// `config_json` may be partial; `touch` selects the touch gesture set.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, touch: bool) -> Result<GexChartApi, JsValue> {
        let config = match config_json {
            Some(json) => DashboardConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => DashboardConfig::default(),
        };
        let device_class = if touch { DeviceClass::Touch } else { DeviceClass::Mouse };

        let state = Rc::new(RefCell::new(DashboardState::new(&config, device_class)));
        let repository = Rc::new(GexHttpClient::new(config.api_base_url.clone()));
        let on_change: Rc<dyn Fn(ChartProjection)> = Rc::new(|_| {});
        let dashboard = PollSnapshotsUseCase::new(repository, state, on_change);

        get_logger().info(
            LogComponent::Presentation("GexChartApi"),
            &format!("created for {} ({})", config.api_base_url, device_class),
        );
        Ok(Self { config, dashboard })
    }

    /// Fetch the current currency; resolves to the projection after the
    /// response is applied or discarded.
    pub fn poll(&self) -> Promise {
        let dashboard = self.dashboard.clone();
        future_to_promise(async move {
            let outcome = dashboard.poll_once().await;
            if outcome == PollOutcome::Stale {
                get_logger().debug(LogComponent::Presentation("GexChartApi"), "poll superseded");
            }
            projection_json(&dashboard.state().borrow().projection())
        })
    }

    /// Apply a provider body the host fetched itself.
    #[wasm_bindgen(js_name = ingestJson)]
    pub fn ingest_json(&self, body: &str) -> Result<String, JsValue> {
        let state = self.dashboard.state();
        let ticket = state.borrow_mut().begin_poll();
        let result = parse_snapshot(body, get_time_provider().current_timestamp());
        state.borrow_mut().complete_poll(ticket, result);
        self.projection()
    }

    #[wasm_bindgen(js_name = selectCurrency)]
    pub fn select_currency(&self, code: &str) -> Result<String, JsValue> {
        let currency = code
            .parse::<Currency>()
            .map_err(|_| JsValue::from_str(&format!("unknown currency `{code}`")))?;
        self.dashboard.state().borrow_mut().select_currency(currency);
        self.projection()
    }

    pub fn wheel(&self, delta_y: f64) -> Result<String, JsValue> {
        self.input(PointerInput::Wheel { delta_y })
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, coordinate: f64, touches: u32) -> Result<String, JsValue> {
        let input = if touches == 0 {
            PointerInput::MouseDown { coordinate }
        } else {
            PointerInput::TouchStart { coordinate, touches }
        };
        self.input(input)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, coordinate: f64) -> Result<String, JsValue> {
        self.input(PointerInput::Move { coordinate, surface_height_px: self.config.chart_height_px })
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) -> Result<String, JsValue> {
        self.input(PointerInput::End)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) -> Result<String, JsValue> {
        self.input(PointerInput::Leave)
    }

    pub fn projection(&self) -> Result<String, JsValue> {
        let projection = self.dashboard.state().borrow().projection();
        serde_json::to_string(&projection).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl GexChartApi {
    fn input(&self, input: PointerInput) -> Result<String, JsValue> {
        self.dashboard.handle_input(input);
        self.projection()
    }
}

fn projection_json(projection: &ChartProjection) -> Result<JsValue, JsValue> {
    serde_json::to_string(projection)
        .map(|json| JsValue::from_str(&json))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
