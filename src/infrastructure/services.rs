use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider, get_time_provider};
use crate::time_utils::format_utc_time;

/// Logger writing to the browser console, dropping entries below `min_level`
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn accepts(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if !self.accepts(entry.level) {
            return;
        }
        let line = entry.format_with(get_time_provider());
        let line = wasm_bindgen::JsValue::from_str(&line);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

/// Wall clock from `Date.now()`
#[derive(Default)]
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format_utc_time(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_below_min_level() {
        let logger = ConsoleLogger::new(LogLevel::Info);
        assert!(!logger.accepts(LogLevel::Debug));
        assert!(logger.accepts(LogLevel::Info));
        assert!(logger.accepts(LogLevel::Error));
    }
}
