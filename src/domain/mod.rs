pub mod chart;
pub mod equity;
pub mod errors;
pub mod logging;
