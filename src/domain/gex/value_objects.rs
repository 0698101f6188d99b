use derive_more::{Constructor, Deref, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - underlying asset whose option book is charted
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    #[default]
    BTC,
    ETH,
    SOL,
}

impl Currency {
    /// Query value expected by the provider endpoint
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Currency::BTC => "Bitcoin (BTC)",
            Currency::ETH => "Ethereum (ETH)",
            Currency::SOL => "Solana (SOL)",
        }
    }
}

/// Value Object - epoch milliseconds
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    From,
    Into,
    Deref,
    Constructor,
    Serialize,
    Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - provider-supplied price levels drawn as reference lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLevels {
    pub spot_price: Option<f64>,
    pub zero_gamma: Option<f64>,
    pub call_wall: Option<f64>,
    pub put_wall: Option<f64>,
}

impl ReferenceLevels {
    /// Defined, finite levels in a fixed order: spot, zero gamma, call wall, put wall
    pub fn defined(&self) -> impl Iterator<Item = f64> {
        [self.spot_price, self.zero_gamma, self.call_wall, self.put_wall]
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
    }
}
