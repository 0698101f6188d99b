pub mod dashboard;
pub mod use_cases;

pub use dashboard::*;
pub use use_cases::*;
