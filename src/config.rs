use crate::domain::chart::{DeviceClass, ViewportLimits, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::logging::{LogComponent, LogLevel};
use crate::log_warn;
use serde::Deserialize;
use std::str::FromStr;

/// Element holding an optional JSON config blob on the host page
pub const CONFIG_ELEMENT_ID: &str = "gex-config";

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Runtime settings for the dashboard. Every field has a default, so a
/// partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub poll_interval_ms: u32,
    pub chart_height_px: f64,
    pub tick_density_mouse: usize,
    pub tick_density_touch: usize,
    pub touch_max_width_px: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub viewport: ViewportLimits,
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("GEX_API_URL").unwrap_or(DEFAULT_API_BASE_URL).to_string(),
            poll_interval_ms: 60_000,
            chart_height_px: 500.0,
            tick_density_mouse: 10,
            tick_density_touch: 5,
            touch_max_width_px: 768.0,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            viewport: ViewportLimits::default(),
            log_level: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the page's `#gex-config` script element, if present.
    pub fn from_page() -> Option<ConfigResult<Self>> {
        gloo::utils::document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .map(|raw| Self::from_json(&raw))
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(invalid("api_base_url", "must not be empty"));
        }
        if self.poll_interval_ms < 1_000 {
            return Err(invalid("poll_interval_ms", "must be at least 1000"));
        }
        if !(self.chart_height_px > 0.0) || !self.chart_height_px.is_finite() {
            return Err(invalid("chart_height_px", "must be a positive number"));
        }
        if !(self.touch_max_width_px > 0.0) || !self.touch_max_width_px.is_finite() {
            return Err(invalid("touch_max_width_px", "must be a positive number"));
        }
        if self.tick_density_mouse == 0 || self.tick_density_touch == 0 {
            return Err(invalid("tick_density", "must be at least 1"));
        }
        if !(self.zoom_in_factor > 0.0 && self.zoom_in_factor < 1.0) {
            return Err(invalid("zoom_in_factor", "must lie in (0, 1)"));
        }
        if !(self.zoom_out_factor > 1.0) || !self.zoom_out_factor.is_finite() {
            return Err(invalid("zoom_out_factor", "must be a finite number above 1"));
        }
        if !(self.viewport.min_range > 0.0) || !self.viewport.min_range.is_finite() {
            return Err(invalid("viewport.min_range", "must be a positive number"));
        }
        if !(self.viewport.default_padding > 0.0) || !self.viewport.default_padding.is_finite() {
            return Err(invalid("viewport.default_padding", "must be a positive number"));
        }
        if !(self.viewport.padding_ratio >= 0.0) || !self.viewport.padding_ratio.is_finite() {
            return Err(invalid("viewport.padding_ratio", "must be a non-negative number"));
        }
        if !(self.viewport.min_tick_step > 0.0) || !self.viewport.min_tick_step.is_finite() {
            return Err(invalid("viewport.min_tick_step", "must be a positive number"));
        }
        self.min_log_level()?;
        Ok(())
    }

    pub fn min_log_level(&self) -> ConfigResult<LogLevel> {
        LogLevel::from_str(self.log_level.trim())
            .map_err(|_| invalid("log_level", &format!("unknown level `{}`", self.log_level)))
    }

    pub fn tick_density_for(&self, device_class: DeviceClass) -> usize {
        match device_class {
            DeviceClass::Mouse => self.tick_density_mouse,
            DeviceClass::Touch => self.tick_density_touch,
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.to_string() }
}
