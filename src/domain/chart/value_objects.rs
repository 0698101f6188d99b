use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Narrowest visible price span
pub const MIN_RANGE: f64 = 100.0;

/// Tick step never goes below this many price units
pub const MIN_TICK_STEP: f64 = 500.0;

/// Range multiplier for one wheel notch towards the data
pub const ZOOM_IN_FACTOR: f64 = 0.8;

/// Range multiplier for one wheel notch away from the data
pub const ZOOM_OUT_FACTOR: f64 = 1.25;

/// Upper bound on generated ticks, whatever the step
pub const MAX_TICKS: usize = 512;

/// Value Object - bounds applied by the viewport controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportLimits {
    pub min_range: f64,
    pub default_padding: f64,
    pub padding_ratio: f64,
    pub min_tick_step: f64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            min_range: MIN_RANGE,
            default_padding: crate::domain::gex::DEFAULT_PADDING,
            padding_ratio: crate::domain::gex::PADDING_RATIO,
            min_tick_step: MIN_TICK_STEP,
        }
    }
}

/// Value Object - visible price range of the strike axis and its tick marks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub domain_min: f64,
    pub domain_max: f64,
    pub ticks: Vec<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { domain_min: 0.0, domain_max: MIN_RANGE, ticks: Vec::new() }
    }
}

impl Viewport {
    pub fn range(&self) -> f64 {
        self.domain_max - self.domain_min
    }

    pub fn center(&self) -> f64 {
        (self.domain_min + self.domain_max) / 2.0
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.domain_min && price <= self.domain_max
    }

    /// Screen Y for a price; the top edge shows `domain_max`
    pub fn price_to_y(&self, price: f64, height_px: f64) -> f64 {
        let range = self.range();
        if range <= 0.0 {
            return height_px / 2.0;
        }
        height_px * (1.0 - (price - self.domain_min) / range)
    }
}

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum ViewportMode {
    #[default]
    #[display(fmt = "uninitialized")]
    Uninitialized,
    /// Domain last set from data extrema
    #[display(fmt = "tracking")]
    Tracking,
    /// Domain last set by zoom or pan
    #[display(fmt = "user-adjusted")]
    UserAdjusted,
}

/// Input capability of a chart surface, decided once per surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum DeviceClass {
    #[default]
    #[display(fmt = "mouse")]
    Mouse,
    #[display(fmt = "touch")]
    Touch,
}

impl DeviceClass {
    /// Coarse heuristic: a touch-capable screen no wider than `touch_max_width_px`.
    pub fn classify(max_touch_points: i32, viewport_width_px: f64, touch_max_width_px: f64) -> Self {
        if max_touch_points > 0 && viewport_width_px <= touch_max_width_px {
            DeviceClass::Touch
        } else {
            DeviceClass::Mouse
        }
    }

    pub fn allows_wheel_zoom(&self) -> bool {
        matches!(self, DeviceClass::Mouse)
    }
}
