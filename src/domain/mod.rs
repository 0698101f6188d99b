pub mod chart;
pub mod errors;
pub mod gex;
pub mod logging;
