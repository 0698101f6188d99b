use leptos::*;
use wasm_bindgen::prelude::*;

use crate::app::{App, LeptosLogger};
use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::infrastructure::{BrowserTimeProvider, ConsoleLogger};

#[macro_use]
pub mod macros;

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod global_state;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Wire logging, read the page config and mount the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_time_provider(Box::new(BrowserTimeProvider::new()));

    let loaded = DashboardConfig::from_page();
    let config = match &loaded {
        Some(Ok(config)) => config.clone(),
        _ => DashboardConfig::default(),
    };
    let level = config.min_log_level().unwrap_or(LogLevel::Info);
    domain::logging::init_logger(Box::new(LeptosLogger::new(ConsoleLogger::new(level))));

    if let Some(Err(e)) = loaded {
        get_logger().warn(
            LogComponent::Presentation("Initialize"),
            &format!("{e}; falling back to defaults"),
        );
    }
    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("starting with log level {}", level),
    );

    mount_to_body(move || view! { <App config=config /> });
}
