use derive_more::Display;

/// Failures at the ingestion boundary. Nothing inside the chart core fails.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum FetchError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "HTTP Error {}: {}", status, message)]
    Http { status: u16, message: String },
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(String),
    #[display(fmt = "Provider Error: {}", _0)]
    Provider(String),
}

impl FetchError {
    /// Whether the next scheduled poll may reasonably succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, FetchError::Decode(_))
    }
}

impl std::error::Error for FetchError {}

/// Rejected dashboard configuration
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConfigError {
    #[display(fmt = "Config Parse Error: {}", _0)]
    Parse(String),
    #[display(fmt = "Invalid config field `{}`: {}", field, reason)]
    Invalid { field: &'static str, reason: String },
}

impl std::error::Error for ConfigError {}

pub type FetchResult<T> = Result<T, FetchError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
